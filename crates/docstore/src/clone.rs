//! Schema cloning: reproduce a source database's collections and indexes
//! in a target database.

use tracing::warn;

use crate::config::FailureMode;
use crate::errors::Error;
use crate::progress::{ProgressEvent, ProgressSink};
use crate::store::DocumentStore;

/// One failed step of a best-effort clone run.
#[derive(Debug)]
pub struct CloneFailure {
    pub collection: String,
    /// `None` when the collection itself could not be created.
    pub index: Option<String>,
    pub error: Error,
}

/// Counts for a completed (or partially completed) clone run.
#[derive(Debug, Default)]
pub struct CloneSummary {
    pub collections_created: usize,
    pub indexes_created: usize,
    /// Only populated under [`FailureMode::BestEffort`].
    pub failures: Vec<CloneFailure>,
}

/// Reads every user collection and every non-identity index from a source
/// store and recreates them in a target store.
///
/// Collections are processed in the order the source enumerates them; that
/// order carries no meaning and the outcome does not depend on it, since
/// descriptors are independent of one another. When a collection cannot be
/// created (typically because the target already has one of that name), none
/// of its indexes are attempted. Nothing is retried or rolled back in either
/// mode; a failed run leaves the target in whatever partial state it reached.
#[derive(Debug, Default)]
pub struct SchemaCloner {
    mode: FailureMode,
}

impl SchemaCloner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mut self, mode: FailureMode) -> Self {
        self.mode = mode;
        self
    }

    /// Runs the clone. Enumeration failures on the source abort the run in
    /// both modes; creation failures abort under [`FailureMode::FailFast`]
    /// and are recorded in the summary under [`FailureMode::BestEffort`].
    pub async fn clone_schema<S, T>(
        &self,
        source: &S,
        target: &T,
        progress: &dyn ProgressSink,
    ) -> Result<CloneSummary, Error>
    where
        S: DocumentStore + ?Sized,
        T: DocumentStore + ?Sized,
    {
        let mut summary = CloneSummary::default();

        for descriptor in source.list_collections().await? {
            if let Err(error) = target.create_collection(&descriptor).await {
                match self.mode {
                    FailureMode::FailFast => return Err(error),
                    FailureMode::BestEffort => {
                        warn!("Skipping collection {}: {error}", descriptor.name);
                        summary.failures.push(CloneFailure {
                            collection: descriptor.name.clone(),
                            index: None,
                            error,
                        });
                        continue;
                    }
                }
            }
            summary.collections_created += 1;
            progress.emit(ProgressEvent::CollectionCreated {
                collection: descriptor.name.clone(),
            });

            for index in source.list_indexes(&descriptor.name).await? {
                if index.is_identity() {
                    continue;
                }
                match target.create_index(&descriptor.name, &index).await {
                    Ok(()) => {
                        summary.indexes_created += 1;
                        progress.emit(ProgressEvent::IndexCreated {
                            collection: descriptor.name.clone(),
                            index: index.name.clone(),
                        });
                    }
                    Err(error) => match self.mode {
                        FailureMode::FailFast => return Err(error),
                        FailureMode::BestEffort => {
                            warn!(
                                "Skipping index {} on {}: {error}",
                                index.name, descriptor.name
                            );
                            summary.failures.push(CloneFailure {
                                collection: descriptor.name.clone(),
                                index: Some(index.name.clone()),
                                error,
                            });
                        }
                    },
                }
            }
        }

        progress.emit(ProgressEvent::CloneFinished {
            collections: summary.collections_created,
            indexes: summary.indexes_created,
        });
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptors::{CollectionDescriptor, IndexDescriptor, IndexDirection};
    use crate::memory::MemoryStore;
    use crate::progress::{NullSink, RecordingSink};
    use crate::value::Value;

    async fn source_with_products() -> MemoryStore {
        let source = MemoryStore::new();
        source
            .create_collection(&CollectionDescriptor::new("products"))
            .await
            .unwrap();
        source
            .create_index(
                "products",
                &IndexDescriptor::new("idx_name", vec![("name".into(), IndexDirection::Ascending)])
                    .unique(true),
            )
            .await
            .unwrap();
        source
    }

    #[tokio::test]
    async fn test_clone_into_empty_target() {
        let source = source_with_products().await;
        let mut orders = CollectionDescriptor::new("orders");
        orders.options.insert("capped".into(), Value::Bool(false));
        source.create_collection(&orders).await.unwrap();

        let target = MemoryStore::new();
        let summary = SchemaCloner::new()
            .clone_schema(&source, &target, &NullSink)
            .await
            .unwrap();

        assert_eq!(summary.collections_created, 2);
        assert_eq!(summary.indexes_created, 1);
        assert!(summary.failures.is_empty());
        assert_eq!(target.collection_names(), source.collection_names());

        // Options survive the clone.
        let cloned = target.list_collections().await.unwrap();
        let orders_clone = cloned.iter().find(|c| c.name == "orders").unwrap();
        assert_eq!(orders_clone.options.get("capped"), Some(&Value::Bool(false)));
    }

    #[tokio::test]
    async fn test_unique_index_survives_clone() {
        let source = source_with_products().await;
        let target = MemoryStore::new();
        SchemaCloner::new()
            .clone_schema(&source, &target, &NullSink)
            .await
            .unwrap();

        let indexes = target.list_indexes("products").await.unwrap();
        let user_indexes: Vec<_> = indexes.iter().filter(|i| !i.is_identity()).collect();
        assert_eq!(user_indexes.len(), 1);
        assert_eq!(user_indexes[0].name, "idx_name");
        assert!(user_indexes[0].unique);
        assert_eq!(
            user_indexes[0].key,
            vec![("name".to_string(), IndexDirection::Ascending)]
        );
    }

    #[tokio::test]
    async fn test_identity_index_is_never_recreated_explicitly() {
        let source = source_with_products().await;
        let target = MemoryStore::new();
        let sink = RecordingSink::new();
        SchemaCloner::new()
            .clone_schema(&source, &target, &sink)
            .await
            .unwrap();

        for event in sink.events() {
            if let ProgressEvent::IndexCreated { index, .. } = event {
                assert_ne!(index, crate::descriptors::ID_INDEX_NAME);
            }
        }
        // The target still has one: it comes with collection creation.
        let indexes = target.list_indexes("products").await.unwrap();
        assert!(indexes.iter().any(IndexDescriptor::is_identity));
    }

    #[tokio::test]
    async fn test_existing_collection_aborts_fail_fast() {
        let source = source_with_products().await;
        let target = MemoryStore::new();
        target
            .create_collection(&CollectionDescriptor::new("products"))
            .await
            .unwrap();

        let sink = RecordingSink::new();
        let err = SchemaCloner::new()
            .clone_schema(&source, &target, &sink)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::CollectionCreate { .. }));
        // No index creation happened for the conflicting collection.
        assert!(
            !sink
                .events()
                .iter()
                .any(|e| matches!(e, ProgressEvent::IndexCreated { .. }))
        );
        let indexes = target.list_indexes("products").await.unwrap();
        assert!(indexes.iter().all(IndexDescriptor::is_identity));
    }

    #[tokio::test]
    async fn test_best_effort_continues_past_conflicts() {
        let source = source_with_products().await;
        source
            .create_collection(&CollectionDescriptor::new("customers"))
            .await
            .unwrap();

        let target = MemoryStore::new();
        // "customers" already exists in the target; enumeration visits it
        // before "products".
        target
            .create_collection(&CollectionDescriptor::new("customers"))
            .await
            .unwrap();

        let summary = SchemaCloner::new()
            .with_mode(FailureMode::BestEffort)
            .clone_schema(&source, &target, &NullSink)
            .await
            .unwrap();

        assert_eq!(summary.collections_created, 1);
        assert_eq!(summary.indexes_created, 1);
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].collection, "customers");
        assert!(summary.failures[0].index.is_none());
        assert!(target.collection_names().contains(&"products".to_string()));
    }
}
