//! Synthetic shop data for document-store fixtures.
//!
//! This crate supplies the record generators and run configuration for the
//! `seed` and `clone-schema` binaries. The pipelines themselves live in
//! [`docstore`]; everything here is specific to the shop's document shapes
//! (`products`, `customers`, `orders`, `users`).

pub mod config;
pub mod generators;

pub use config::SeedRunConfig;
pub use generators::{
    CustomerGenerator, OrderGenerator, ProductGenerator, UserGenerator, id_pool,
};
