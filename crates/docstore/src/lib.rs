//! Schema cloning and batched seeding for document databases.
//!
//! Two independent pipelines share one seam, the [`DocumentStore`] trait:
//!
//! - [`SchemaCloner`] reads collection and index definitions from a source
//!   database and reproduces them in a target.
//! - [`BatchSeeder`] fills a collection with generated records in
//!   bounded-size batches.
//!
//! Both run strictly sequentially, make no transactional guarantees, and
//! leave partial state behind on failure; they are built for disposable
//! fixture data, not for migrating anything you care about.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use docstore::{BatchSeeder, LogSink, MongoConnection, SchemaCloner};
//!
//! let conn = MongoConnection::connect("mongodb://localhost:27017").await?;
//! let source = conn.database("source_db");
//! let target = conn.database("local_db");
//!
//! SchemaCloner::new()
//!     .clone_schema(&source, &target, &LogSink)
//!     .await?;
//!
//! BatchSeeder::new()
//!     .clear_first(true)
//!     .seed(&target, "products", 50_000, &mut generator, &LogSink)
//!     .await?;
//! ```

pub mod clone;
pub mod config;
pub mod descriptors;
pub mod errors;
pub mod memory;
pub mod mongo;
pub mod progress;
pub mod seed;
pub mod store;
pub mod value;

pub use clone::{CloneFailure, CloneSummary, SchemaCloner};
pub use config::{DEFAULT_MAX_BATCH, FailureMode};
pub use descriptors::{CollectionDescriptor, ID_INDEX_NAME, IndexDescriptor, IndexDirection};
pub use errors::Error;
pub use memory::MemoryStore;
pub use mongo::{MongoConnection, MongoStore};
pub use progress::{LogSink, NullSink, ProgressEvent, ProgressSink};
pub use seed::{BatchSeeder, RecordGenerator, SeedSummary};
pub use store::DocumentStore;
pub use value::{OptionMap, Record, Value, record_from_json};
