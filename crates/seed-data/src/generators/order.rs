//! Order generation.

use docstore::{Record, RecordGenerator, Value};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{past_timestamp, pick, price};

const STATUSES: &[&str] = &["pending", "completed", "canceled"];

/// Generates `orders` records referencing customers and products.
///
/// References are drawn from id pools built alongside the customer and
/// product records, not read back from inserted documents. Once the
/// database assigns its own `_id` values on insert, these references match
/// nothing that was persisted. That is acceptable for disposable fixture
/// data and deliberately kept; anything that joins orders against customers
/// needs real ids.
pub struct OrderGenerator {
    rng: StdRng,
    customer_ids: Vec<String>,
    product_ids: Vec<String>,
}

impl OrderGenerator {
    pub fn new(customer_ids: Vec<String>, product_ids: Vec<String>) -> Self {
        Self {
            rng: StdRng::from_entropy(),
            customer_ids,
            product_ids,
        }
    }

    /// Seeded generator for reproducible runs.
    pub fn with_seed(seed: u64, customer_ids: Vec<String>, product_ids: Vec<String>) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            customer_ids,
            product_ids,
        }
    }

    fn reference(rng: &mut StdRng, pool: &[String]) -> Value {
        if pool.is_empty() {
            Value::Null
        } else {
            Value::from(pool[rng.gen_range(0..pool.len())].clone())
        }
    }
}

impl RecordGenerator for OrderGenerator {
    fn generate(&mut self) -> Record {
        let rng = &mut self.rng;
        let customer = Self::reference(rng, &self.customer_ids);
        let product = Self::reference(rng, &self.product_ids);

        let mut record = Record::new();
        record.insert("customerId".into(), customer);
        record.insert("productId".into(), product);
        record.insert("quantity".into(), Value::from(rng.gen_range(1..=5i64)));
        record.insert("price".into(), Value::from(price(rng, 10.0, 1000.0)));
        record.insert("status".into(), Value::from(pick(rng, STATUSES)));
        record.insert("date".into(), Value::from(past_timestamp(rng)));
        record
    }
}
