//! Record generators for the shop collections.
//!
//! Each generator implements [`docstore::RecordGenerator`] for one
//! collection's document shape:
//! - [`ProductGenerator`]: catalog entries with price, category, and stock
//! - [`CustomerGenerator`]: people with names, emails, and ages
//! - [`OrderGenerator`]: purchases referencing customer/product id pools
//! - [`UserGenerator`]: accounts with nested addresses
//!
//! Generators carry their own seedable randomness so the seeder stays
//! generic over document shape and runs can be reproduced.

pub mod customer;
pub mod order;
pub mod product;
pub mod user;

pub use customer::CustomerGenerator;
pub use order::OrderGenerator;
pub use product::ProductGenerator;
pub use user::UserGenerator;

use rand::Rng;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

/// A pool of fresh ids for cross-collection references.
pub fn id_pool(count: usize) -> Vec<String> {
    (0..count).map(|_| Uuid::new_v4().to_string()).collect()
}

/// Picks one entry from a non-empty word list.
pub(crate) fn pick<'a>(rng: &mut impl Rng, items: &'a [&'a str]) -> &'a str {
    items[rng.gen_range(0..items.len())]
}

/// A random moment within the past year.
pub(crate) fn past_timestamp(rng: &mut impl Rng) -> OffsetDateTime {
    OffsetDateTime::now_utc()
        - Duration::days(rng.gen_range(1..365))
        - Duration::seconds(rng.gen_range(0..86_400))
}

/// A price with two decimal places inside the given bounds.
pub(crate) fn price(rng: &mut impl Rng, min: f64, max: f64) -> f64 {
    (rng.gen_range(min..max) * 100.0).round() / 100.0
}
