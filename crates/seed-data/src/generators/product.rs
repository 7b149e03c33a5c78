//! Catalog product generation.

use docstore::{Record, RecordGenerator, Value};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{pick, price};

const CATEGORIES: &[&str] = &["Electronics", "Clothing", "Books", "Toys", "Sports", "Home"];

const ADJECTIVES: &[&str] = &[
    "Rustic",
    "Sleek",
    "Ergonomic",
    "Incredible",
    "Practical",
    "Handcrafted",
    "Refined",
    "Luxurious",
];

const MATERIALS: &[&str] = &[
    "Steel", "Wooden", "Cotton", "Granite", "Rubber", "Plastic", "Bronze", "Ceramic",
];

const ITEMS: &[&str] = &[
    "Chair", "Lamp", "Keyboard", "Shirt", "Table", "Bottle", "Backpack", "Clock", "Speaker",
];

/// Generates `products` records: name, price, category, stock.
pub struct ProductGenerator {
    rng: StdRng,
}

impl ProductGenerator {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded generator for reproducible runs.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for ProductGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordGenerator for ProductGenerator {
    fn generate(&mut self) -> Record {
        let rng = &mut self.rng;
        let name = format!(
            "{} {} {}",
            pick(rng, ADJECTIVES),
            pick(rng, MATERIALS),
            pick(rng, ITEMS)
        );

        let mut record = Record::new();
        record.insert("name".into(), Value::from(name));
        record.insert("price".into(), Value::from(price(rng, 10.0, 1000.0)));
        record.insert("category".into(), Value::from(pick(rng, CATEGORIES)));
        record.insert("stock".into(), Value::from(rng.gen_range(0..=1000i64)));
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_product() {
        let mut generator = ProductGenerator::new();
        let product = generator.generate();

        assert!(!product["name"].as_str().unwrap().is_empty());
        assert!(CATEGORIES.contains(&product["category"].as_str().unwrap()));
        assert!((0..=1000).contains(&product["stock"].as_i64().unwrap()));
        match product["price"] {
            Value::Double(p) => assert!((10.0..1000.0).contains(&p)),
            ref other => panic!("price should be a double, got {other:?}"),
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let mut a = ProductGenerator::with_seed(12345);
        let mut b = ProductGenerator::with_seed(12345);
        for _ in 0..10 {
            assert_eq!(a.generate(), b.generate());
        }
    }
}
