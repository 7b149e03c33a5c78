//! Account user generation.

use std::collections::BTreeMap;

use docstore::{Record, RecordGenerator, Value};
use fake::Fake;
use fake::faker::address::en::{BuildingNumber, CityName, CountryName, StreetName};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::past_timestamp;

/// Generates `users` records: name, email, age, creation date, and a
/// nested address document.
pub struct UserGenerator {
    rng: StdRng,
}

impl UserGenerator {
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

impl Default for UserGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordGenerator for UserGenerator {
    fn generate(&mut self) -> Record {
        let name: String = Name().fake_with_rng(&mut self.rng);
        let email: String = SafeEmail().fake_with_rng(&mut self.rng);
        let building: String = BuildingNumber().fake_with_rng(&mut self.rng);
        let street_name: String = StreetName().fake_with_rng(&mut self.rng);
        let city: String = CityName().fake_with_rng(&mut self.rng);
        let country: String = CountryName().fake_with_rng(&mut self.rng);

        let mut address = BTreeMap::new();
        address.insert(
            "street".to_string(),
            Value::from(format!("{building} {street_name}")),
        );
        address.insert("city".to_string(), Value::from(city));
        address.insert("country".to_string(), Value::from(country));

        let mut record = Record::new();
        record.insert("name".into(), Value::from(name));
        record.insert("email".into(), Value::from(email));
        record.insert(
            "age".into(),
            Value::from(self.rng.gen_range(18..=80i64)),
        );
        record.insert(
            "createdAt".into(),
            Value::from(past_timestamp(&mut self.rng)),
        );
        record.insert("address".into(), Value::Document(address));
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_user() {
        let mut generator = UserGenerator::new();
        let user = generator.generate();

        assert!(!user["name"].as_str().unwrap().is_empty());
        assert!(user["email"].as_str().unwrap().contains('@'));
        assert!((18..=80).contains(&user["age"].as_i64().unwrap()));
        assert!(matches!(user["createdAt"], Value::DateTime(_)));

        match &user["address"] {
            Value::Document(address) => {
                assert!(!address["street"].as_str().unwrap().is_empty());
                assert!(!address["city"].as_str().unwrap().is_empty());
                assert!(!address["country"].as_str().unwrap().is_empty());
            }
            other => panic!("address should be a nested document, got {other:?}"),
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let mut a = UserGenerator::with_seed(4242);
        let mut b = UserGenerator::with_seed(4242);
        for _ in 0..10 {
            assert_eq!(a.generate(), b.generate());
        }
    }
}
