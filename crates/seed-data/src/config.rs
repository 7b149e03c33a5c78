//! Configuration for seed runs.

use docstore::DEFAULT_MAX_BATCH;
use serde::{Deserialize, Serialize};

/// Record counts and batching for one seed run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedRunConfig {
    /// Number of account users to generate.
    pub users: usize,

    /// Number of catalog products to generate.
    pub products: usize,

    /// Number of customers to generate.
    pub customers: usize,

    /// Number of orders to generate.
    pub orders: usize,

    /// Maximum records per insert operation.
    pub batch_size: usize,

    /// Whether to drop each collection before seeding it.
    pub clear_first: bool,
}

impl Default for SeedRunConfig {
    fn default() -> Self {
        Self {
            users: 1_000,
            products: 50_000,
            customers: 1_000,
            orders: 2_000,
            batch_size: DEFAULT_MAX_BATCH,
            clear_first: true,
        }
    }
}

impl SeedRunConfig {
    /// Builds a config from `SEED_*` environment variables, falling back to
    /// the defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            users: env_count("SEED_USERS", defaults.users),
            products: env_count("SEED_PRODUCTS", defaults.products),
            customers: env_count("SEED_CUSTOMERS", defaults.customers),
            orders: env_count("SEED_ORDERS", defaults.orders),
            batch_size: env_count("SEED_BATCH_SIZE", defaults.batch_size),
            clear_first: std::env::var("SEED_CLEAR")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(defaults.clear_first),
        }
    }
}

fn env_count(var: &str, default: usize) -> usize {
    std::env::var(var)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
