//! The document-store seam both pipelines run against.

use async_trait::async_trait;

use crate::descriptors::{CollectionDescriptor, IndexDescriptor};
use crate::errors::Error;
use crate::value::Record;

/// One database worth of collections, as seen by the cloning and seeding
/// pipelines. Implementations wrap a live driver handle ([`crate::mongo::MongoStore`])
/// or an in-memory map ([`crate::memory::MemoryStore`]); the pipelines never
/// look behind this trait.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Enumerates user collections. Order is whatever the store reports;
    /// callers must not read meaning into it.
    async fn list_collections(&self) -> Result<Vec<CollectionDescriptor>, Error>;

    /// Enumerates the indexes of one collection, including the implicit
    /// identity index.
    async fn list_indexes(&self, collection: &str) -> Result<Vec<IndexDescriptor>, Error>;

    /// Creates a collection with the descriptor's options. Fails with
    /// [`Error::CollectionCreate`] if a collection of that name exists.
    async fn create_collection(&self, descriptor: &CollectionDescriptor) -> Result<(), Error>;

    /// Creates one index on a collection. Fails with [`Error::IndexCreate`]
    /// on a conflicting definition.
    async fn create_index(&self, collection: &str, index: &IndexDescriptor) -> Result<(), Error>;

    /// Inserts a batch of records as a single operation.
    async fn insert_many(&self, collection: &str, records: Vec<Record>) -> Result<(), Error>;

    /// Drops a collection if it exists. A missing collection is an
    /// already-satisfied precondition, not an error.
    async fn drop_collection(&self, collection: &str) -> Result<(), Error>;

    /// Number of documents currently in a collection (0 if it is missing).
    async fn count_documents(&self, collection: &str) -> Result<u64, Error>;
}
