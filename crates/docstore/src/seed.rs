//! Batched seeding: populate a collection with generated records without
//! exceeding a maximum per-request batch size.

use tracing::warn;

use crate::config::{DEFAULT_MAX_BATCH, FailureMode};
use crate::errors::Error;
use crate::progress::{ProgressEvent, ProgressSink};
use crate::store::DocumentStore;
use crate::value::Record;

/// Produces one record per call. Implementations are specific to a target
/// collection's shape and carry their own randomness; the seeder stays
/// generic over document shape.
pub trait RecordGenerator: Send {
    fn generate(&mut self) -> Record;
}

/// Counts for a completed (or partially completed) seed run.
#[derive(Debug, Default)]
pub struct SeedSummary {
    /// Insert operations that committed.
    pub batches: usize,
    /// Records committed across all batches.
    pub inserted: u64,
    /// Batch failures, only populated under [`FailureMode::BestEffort`].
    pub failures: Vec<Error>,
}

/// Inserts a requested number of generated records into one collection,
/// splitting the total into consecutive batches of at most `batch_size`
/// records; the final batch holds the remainder.
///
/// Records are generated independently per batch and exist only until the
/// batch is submitted. Re-running a seed is not idempotent: it inserts the
/// full count again unless `clear_first` is set.
#[derive(Debug)]
pub struct BatchSeeder {
    batch_size: usize,
    clear_first: bool,
    mode: FailureMode,
}

impl Default for BatchSeeder {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_MAX_BATCH,
            clear_first: false,
            mode: FailureMode::default(),
        }
    }
}

impl BatchSeeder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum records per insert operation (at least 1).
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size.max(1);
        self
    }

    /// Drops the target collection before seeding. A missing collection is
    /// not an error.
    pub fn clear_first(mut self, clear: bool) -> Self {
        self.clear_first = clear;
        self
    }

    pub fn with_mode(mut self, mode: FailureMode) -> Self {
        self.mode = mode;
        self
    }

    /// Seeds `total` records into `collection`. Under
    /// [`FailureMode::FailFast`] the first failed insert aborts the run and
    /// earlier batches stay committed; under [`FailureMode::BestEffort`] the
    /// failed batch's records are skipped and the run continues.
    pub async fn seed<S>(
        &self,
        store: &S,
        collection: &str,
        total: usize,
        generator: &mut dyn RecordGenerator,
        progress: &dyn ProgressSink,
    ) -> Result<SeedSummary, Error>
    where
        S: DocumentStore + ?Sized,
    {
        let mut summary = SeedSummary::default();

        if self.clear_first {
            store.drop_collection(collection).await?;
            progress.emit(ProgressEvent::CollectionCleared {
                collection: collection.to_string(),
            });
        }

        let mut remaining = total;
        let mut batch = 0;
        while remaining > 0 {
            let size = remaining.min(self.batch_size);
            let records: Vec<Record> = (0..size).map(|_| generator.generate()).collect();
            batch += 1;

            match store.insert_many(collection, records).await {
                Ok(()) => {
                    summary.batches += 1;
                    summary.inserted += size as u64;
                    progress.emit(ProgressEvent::BatchInserted {
                        collection: collection.to_string(),
                        batch,
                        inserted: size,
                        total: summary.inserted,
                    });
                }
                Err(error) => match self.mode {
                    FailureMode::FailFast => return Err(error),
                    FailureMode::BestEffort => {
                        warn!("Batch {batch} for {collection} failed: {error}");
                        summary.failures.push(error);
                    }
                },
            }
            remaining -= size;
        }

        progress.emit(ProgressEvent::SeedFinished {
            collection: collection.to_string(),
            total: summary.inserted,
        });
        Ok(summary)
    }
}
