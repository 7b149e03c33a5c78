//! Customer generation.

use docstore::{Record, RecordGenerator, Value};
use fake::Fake;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

/// Generates `customers` records: first/last name, email, age.
///
/// Ages follow a normal distribution clamped to 18..=70 rather than a
/// uniform draw, which keeps aggregate queries over fixtures looking
/// plausible.
pub struct CustomerGenerator {
    rng: StdRng,
    age: Normal<f64>,
}

impl CustomerGenerator {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Seeded generator for reproducible runs.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng,
            age: Normal::new(40.0, 12.0).expect("valid age distribution"),
        }
    }
}

impl Default for CustomerGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordGenerator for CustomerGenerator {
    fn generate(&mut self) -> Record {
        let first_name: String = FirstName().fake_with_rng(&mut self.rng);
        let last_name: String = LastName().fake_with_rng(&mut self.rng);
        let email: String = SafeEmail().fake_with_rng(&mut self.rng);
        let age = self.age.sample(&mut self.rng).round().clamp(18.0, 70.0) as i64;

        let mut record = Record::new();
        record.insert("firstName".into(), Value::from(first_name));
        record.insert("lastName".into(), Value::from(last_name));
        record.insert("email".into(), Value::from(email));
        record.insert("age".into(), Value::from(age));
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_customer() {
        let mut generator = CustomerGenerator::new();
        let customer = generator.generate();

        assert!(!customer["firstName"].as_str().unwrap().is_empty());
        assert!(!customer["lastName"].as_str().unwrap().is_empty());
        assert!(customer["email"].as_str().unwrap().contains('@'));
        assert!((18..=70).contains(&customer["age"].as_i64().unwrap()));
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let mut a = CustomerGenerator::with_seed(99);
        let mut b = CustomerGenerator::with_seed(99);
        for _ in 0..10 {
            assert_eq!(a.generate(), b.generate());
        }
    }
}
