//! In-memory [`DocumentStore`] for tests and dry runs.
//!
//! Mirrors the observable contract of the MongoDB adapter: creating an
//! existing collection fails, every collection carries an implicit identity
//! index, index and insert operations create missing collections on the fly,
//! and dropping a missing collection succeeds. Uniqueness constraints are
//! not enforced.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::descriptors::{CollectionDescriptor, ID_INDEX_NAME, IndexDescriptor, IndexDirection};
use crate::errors::Error;
use crate::store::DocumentStore;
use crate::value::{OptionMap, Record};

#[derive(Debug, Clone, Default)]
struct MemoryCollection {
    options: OptionMap,
    indexes: Vec<IndexDescriptor>,
    records: Vec<Record>,
}

impl MemoryCollection {
    fn with_options(options: OptionMap) -> Self {
        Self {
            options,
            indexes: vec![IndexDescriptor::new(
                ID_INDEX_NAME,
                vec![("_id".into(), IndexDirection::Ascending)],
            )],
            records: Vec::new(),
        }
    }
}

/// A single in-memory database. Collections enumerate in name order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: Mutex<BTreeMap<String, MemoryCollection>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of all collections currently present.
    pub fn collection_names(&self) -> Vec<String> {
        self.collections.lock().unwrap().keys().cloned().collect()
    }

    /// Snapshot of one collection's records (empty if it is missing).
    pub fn records(&self, collection: &str) -> Vec<Record> {
        self.collections
            .lock()
            .unwrap()
            .get(collection)
            .map(|c| c.records.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list_collections(&self) -> Result<Vec<CollectionDescriptor>, Error> {
        let collections = self.collections.lock().unwrap();
        Ok(collections
            .iter()
            .map(|(name, coll)| CollectionDescriptor {
                name: name.clone(),
                options: coll.options.clone(),
            })
            .collect())
    }

    async fn list_indexes(&self, collection: &str) -> Result<Vec<IndexDescriptor>, Error> {
        let collections = self.collections.lock().unwrap();
        collections
            .get(collection)
            .map(|coll| coll.indexes.clone())
            .ok_or_else(|| Error::connection(format!("namespace `{collection}` not found")))
    }

    async fn create_collection(&self, descriptor: &CollectionDescriptor) -> Result<(), Error> {
        let mut collections = self.collections.lock().unwrap();
        if collections.contains_key(&descriptor.name) {
            return Err(Error::collection_create(
                &descriptor.name,
                "collection already exists",
            ));
        }
        collections.insert(
            descriptor.name.clone(),
            MemoryCollection::with_options(descriptor.options.clone()),
        );
        Ok(())
    }

    async fn create_index(&self, collection: &str, index: &IndexDescriptor) -> Result<(), Error> {
        let mut collections = self.collections.lock().unwrap();
        let coll = collections.entry(collection.to_string()).or_insert_with(|| {
            MemoryCollection::with_options(OptionMap::new())
        });
        match coll.indexes.iter().find(|existing| existing.name == index.name) {
            // Recreating an identical index is a no-op, as on the server.
            Some(existing) if existing == index => Ok(()),
            Some(_) => Err(Error::index_create(
                collection,
                &index.name,
                "an index with this name already exists with a different definition",
            )),
            None => {
                coll.indexes.push(index.clone());
                Ok(())
            }
        }
    }

    async fn insert_many(&self, collection: &str, records: Vec<Record>) -> Result<(), Error> {
        let mut collections = self.collections.lock().unwrap();
        let coll = collections.entry(collection.to_string()).or_insert_with(|| {
            MemoryCollection::with_options(OptionMap::new())
        });
        coll.records.extend(records);
        Ok(())
    }

    async fn drop_collection(&self, collection: &str) -> Result<(), Error> {
        self.collections.lock().unwrap().remove(collection);
        Ok(())
    }

    async fn count_documents(&self, collection: &str) -> Result<u64, Error> {
        let collections = self.collections.lock().unwrap();
        Ok(collections
            .get(collection)
            .map(|coll| coll.records.len() as u64)
            .unwrap_or(0))
    }
}
