//! Progress reporting for long-running runs.
//!
//! The pipelines produce [`ProgressEvent`]s; a [`ProgressSink`] consumes
//! them. The core only ever calls into the sink, never reads from it.

use tracing::info;

/// One observable step of a clone or seed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    CollectionCreated {
        collection: String,
    },
    IndexCreated {
        collection: String,
        index: String,
    },
    CollectionCleared {
        collection: String,
    },
    /// A batch committed; `total` is the cumulative count for this run.
    BatchInserted {
        collection: String,
        batch: usize,
        inserted: usize,
        total: u64,
    },
    SeedFinished {
        collection: String,
        total: u64,
    },
    CloneFinished {
        collections: usize,
        indexes: usize,
    },
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: ProgressEvent);
}

/// Forwards every event to `tracing` at info level.
pub struct LogSink;

impl ProgressSink for LogSink {
    fn emit(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::CollectionCreated { collection } => {
                info!("Created collection: {collection}");
            }
            ProgressEvent::IndexCreated { collection, index } => {
                info!("Created index {index} on {collection}");
            }
            ProgressEvent::CollectionCleared { collection } => {
                info!("Cleared collection: {collection}");
            }
            ProgressEvent::BatchInserted {
                collection,
                inserted,
                total,
                ..
            } => {
                info!("Inserted {inserted} records into {collection} ({total} total)");
            }
            ProgressEvent::SeedFinished { collection, total } => {
                info!("Seeded {collection} with {total} records");
            }
            ProgressEvent::CloneFinished {
                collections,
                indexes,
            } => {
                info!("Schema cloned: {collections} collections, {indexes} indexes");
            }
        }
    }
}

/// Discards every event.
pub struct NullSink;

impl ProgressSink for NullSink {
    fn emit(&self, _event: ProgressEvent) {}
}

#[cfg(test)]
pub(crate) struct RecordingSink {
    events: std::sync::Mutex<Vec<ProgressEvent>>,
}

#[cfg(test)]
impl RecordingSink {
    pub(crate) fn new() -> Self {
        Self {
            events: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl ProgressSink for RecordingSink {
    fn emit(&self, event: ProgressEvent) {
        self.events.lock().unwrap().push(event);
    }
}
