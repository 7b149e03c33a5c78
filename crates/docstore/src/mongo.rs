//! MongoDB adapter for the [`DocumentStore`] seam.
//!
//! Schema operations go through raw database commands (`listCollections`,
//! `create`, `listIndexes`, `createIndexes`) instead of the driver's typed
//! option structs, so the opaque option bags a source database reports
//! survive the round-trip untouched.

use async_trait::async_trait;
use mongodb::bson::document::ValueAccessError;
use mongodb::bson::{Bson, Document as BsonDocument, doc};
use mongodb::{Client, Database};
use time::OffsetDateTime;

use crate::descriptors::{
    CollectionDescriptor, IndexDescriptor, IndexDirection, RESERVED_INDEX_KEYS,
};
use crate::errors::Error;
use crate::store::DocumentStore;
use crate::value::{OptionMap, Record, Value};

/// A live client connection. Databases are selected from it; the handle
/// itself is closed once all stores derived from it are done.
pub struct MongoConnection {
    client: Client,
}

impl MongoConnection {
    /// Establishes a connection from a MongoDB connection string.
    pub async fn connect(uri: &str) -> Result<Self, Error> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| Error::connection("failed to establish connection").with_source(e))?;
        Ok(Self { client })
    }

    /// Selects one database on this connection.
    pub fn database(&self, name: &str) -> MongoStore {
        MongoStore {
            db: self.client.database(name),
        }
    }

    /// Shuts the connection down, waiting for in-flight work to finish.
    pub async fn close(self) {
        self.client.shutdown().await;
    }
}

/// One MongoDB database exposed as a [`DocumentStore`].
pub struct MongoStore {
    db: Database,
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn list_collections(&self) -> Result<Vec<CollectionDescriptor>, Error> {
        let infos = self
            .exhaust_command_cursor(doc! { "listCollections": 1 }, "listCollections")
            .await?;

        let mut descriptors = Vec::new();
        for info in &infos {
            let name = info
                .get_str("name")
                .map_err(|e| Error::connection("malformed listCollections reply").with_source(e))?;
            let options = info
                .get_document("options")
                .map(document_to_map)
                .unwrap_or_default();
            descriptors.push(CollectionDescriptor {
                name: name.to_string(),
                options,
            });
        }
        Ok(descriptors)
    }

    async fn list_indexes(&self, collection: &str) -> Result<Vec<IndexDescriptor>, Error> {
        let infos = self
            .exhaust_command_cursor(
                doc! { "listIndexes": collection },
                &format!("listIndexes on `{collection}`"),
            )
            .await?;

        let mut descriptors = Vec::new();
        for info in &infos {
            descriptors.push(parse_index(info)?);
        }
        Ok(descriptors)
    }

    async fn create_collection(&self, descriptor: &CollectionDescriptor) -> Result<(), Error> {
        let mut cmd = doc! { "create": &descriptor.name };
        for (key, value) in &descriptor.options {
            cmd.insert(key, value_to_bson(value));
        }
        self.db.run_command(cmd).await.map_err(|e| {
            Error::collection_create(&descriptor.name, e.to_string()).with_source(e)
        })?;
        Ok(())
    }

    async fn create_index(&self, collection: &str, index: &IndexDescriptor) -> Result<(), Error> {
        let mut key = BsonDocument::new();
        for (field, direction) in &index.key {
            key.insert(field, value_to_bson(&direction.as_value()));
        }
        let mut spec = doc! {
            "key": key,
            "name": &index.name,
            "unique": index.unique,
        };
        for (option, value) in index.passthrough_options() {
            spec.insert(option, value_to_bson(value));
        }

        self.db
            .run_command(doc! { "createIndexes": collection, "indexes": [spec] })
            .await
            .map_err(|e| {
                Error::index_create(collection, &index.name, e.to_string()).with_source(e)
            })?;
        Ok(())
    }

    async fn insert_many(&self, collection: &str, records: Vec<Record>) -> Result<(), Error> {
        let documents: Vec<BsonDocument> = records.iter().map(record_to_document).collect();
        self.db
            .collection::<BsonDocument>(collection)
            .insert_many(documents)
            .await
            .map_err(|e| Error::insert(collection, e.to_string()).with_source(e))?;
        Ok(())
    }

    async fn drop_collection(&self, collection: &str) -> Result<(), Error> {
        // The driver swallows "namespace not found", so dropping a missing
        // collection already reports success.
        self.db
            .collection::<BsonDocument>(collection)
            .drop()
            .await
            .map_err(|e| {
                Error::connection(format!("failed to drop `{collection}`")).with_source(e)
            })
    }

    async fn count_documents(&self, collection: &str) -> Result<u64, Error> {
        self.db
            .collection::<BsonDocument>(collection)
            .count_documents(doc! {})
            .await
            .map_err(|e| Error::connection(format!("failed to count `{collection}`")).with_source(e))
    }
}

impl MongoStore {
    /// Runs a cursor-returning command and drains every page. Replies carry
    /// only a first batch; while the reported cursor id is non-zero the
    /// server still holds more documents, and stopping there would silently
    /// truncate the enumeration, so `getMore` is issued until the cursor is
    /// exhausted.
    async fn exhaust_command_cursor(
        &self,
        command: BsonDocument,
        context: &str,
    ) -> Result<Vec<BsonDocument>, Error> {
        let reply = self
            .db
            .run_command(command)
            .await
            .map_err(|e| Error::connection(format!("{context} command failed")).with_source(e))?;
        let mut page = parse_cursor_page(&reply, "firstBatch", context)?;

        let mut documents = Vec::new();
        loop {
            documents.append(&mut page.documents);
            if page.id == 0 {
                return Ok(documents);
            }
            let reply = self
                .db
                .run_command(doc! { "getMore": page.id, "collection": &page.collection })
                .await
                .map_err(|e| {
                    Error::connection(format!("{context} getMore failed")).with_source(e)
                })?;
            page = parse_cursor_page(&reply, "nextBatch", context)?;
        }
    }
}

/// One page of a command cursor reply.
#[derive(Debug)]
struct CursorPage {
    documents: Vec<BsonDocument>,
    /// Server-side cursor id; 0 means the cursor is exhausted.
    id: i64,
    /// Collection part of the cursor namespace, as `getMore` expects it.
    collection: String,
}

fn parse_cursor_page(
    reply: &BsonDocument,
    batch_key: &str,
    context: &str,
) -> Result<CursorPage, Error> {
    let malformed =
        |e: ValueAccessError| Error::connection(format!("malformed {context} reply")).with_source(e);

    let cursor = reply.get_document("cursor").map_err(malformed)?;
    let documents = cursor
        .get_array(batch_key)
        .map_err(malformed)?
        .iter()
        .filter_map(Bson::as_document)
        .cloned()
        .collect();
    let id = cursor.get_i64("id").map_err(malformed)?;
    // The namespace is `<db>.<collection>`; getMore wants only the
    // collection part.
    let namespace = cursor.get_str("ns").unwrap_or_default();
    let collection = namespace
        .split_once('.')
        .map_or(namespace, |(_, coll)| coll)
        .to_string();

    Ok(CursorPage {
        documents,
        id,
        collection,
    })
}

fn parse_index(info: &BsonDocument) -> Result<IndexDescriptor, Error> {
    let name = info
        .get_str("name")
        .map_err(|e| Error::connection("index descriptor without a name").with_source(e))?;
    let key_doc = info.get_document("key").map_err(|e| {
        Error::connection(format!("index `{name}` has no key pattern")).with_source(e)
    })?;

    let key = key_doc
        .iter()
        .map(|(field, value)| {
            (
                field.clone(),
                IndexDirection::from_value(&bson_to_value(value)),
            )
        })
        .collect();
    let unique = info.get_bool("unique").unwrap_or(false);
    let extra_options: OptionMap = info
        .iter()
        .filter(|(k, _)| !RESERVED_INDEX_KEYS.contains(&k.as_str()))
        .map(|(k, v)| (k.clone(), bson_to_value(v)))
        .collect();

    Ok(IndexDescriptor {
        name: name.to_string(),
        key,
        unique,
        extra_options,
    })
}

fn record_to_document(record: &Record) -> BsonDocument {
    let mut doc = BsonDocument::new();
    for (key, value) in record {
        doc.insert(key, value_to_bson(value));
    }
    doc
}

fn document_to_map(doc: &BsonDocument) -> OptionMap {
    doc.iter()
        .map(|(k, v)| (k.clone(), bson_to_value(v)))
        .collect()
}

fn value_to_bson(value: &Value) -> Bson {
    match value {
        Value::Null => Bson::Null,
        Value::Bool(b) => Bson::Boolean(*b),
        Value::Int(n) => Bson::Int64(*n),
        Value::Double(n) => Bson::Double(*n),
        Value::String(s) => Bson::String(s.clone()),
        Value::DateTime(dt) => {
            Bson::DateTime(mongodb::bson::DateTime::from_millis(
                (dt.unix_timestamp_nanos() / 1_000_000) as i64,
            ))
        }
        Value::Array(items) => Bson::Array(items.iter().map(value_to_bson).collect()),
        Value::Document(fields) => {
            let mut doc = BsonDocument::new();
            for (k, v) in fields {
                doc.insert(k, value_to_bson(v));
            }
            Bson::Document(doc)
        }
    }
}

fn bson_to_value(bson: &Bson) -> Value {
    match bson {
        Bson::Null | Bson::Undefined => Value::Null,
        Bson::Boolean(b) => Value::Bool(*b),
        Bson::Int32(n) => Value::Int(i64::from(*n)),
        Bson::Int64(n) => Value::Int(*n),
        Bson::Double(n) => Value::Double(*n),
        Bson::String(s) => Value::String(s.clone()),
        Bson::DateTime(dt) => Value::DateTime(
            OffsetDateTime::from_unix_timestamp_nanos(
                i128::from(dt.timestamp_millis()) * 1_000_000,
            )
            .unwrap_or(OffsetDateTime::UNIX_EPOCH),
        ),
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::Array(items) => Value::Array(items.iter().map(bson_to_value).collect()),
        Bson::Document(doc) => Value::Document(document_to_map(doc)),
        // Anything else (Decimal128, regex, timestamps) degrades to its
        // relaxed extended-JSON rendering.
        other => Value::from(other.clone().into_relaxed_extjson()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_index_splits_reserved_and_extra_options() {
        let info = doc! {
            "v": 2,
            "key": { "name": 1, "sku": -1 },
            "name": "idx_name",
            "unique": true,
            "partialFilterExpression": { "stock": { "$gt": 0 } },
        };

        let idx = parse_index(&info).unwrap();
        assert_eq!(idx.name, "idx_name");
        assert!(idx.unique);
        assert_eq!(
            idx.key,
            vec![
                ("name".to_string(), IndexDirection::Ascending),
                ("sku".to_string(), IndexDirection::Descending),
            ]
        );
        assert!(idx.extra_options.contains_key("partialFilterExpression"));
        assert!(!idx.extra_options.contains_key("v"));
        assert!(!idx.extra_options.contains_key("unique"));
    }

    #[test]
    fn test_cursor_page_reports_open_cursor() {
        // A reply whose cursor is not exhausted in the first batch.
        let reply = doc! {
            "cursor": {
                "id": 42i64,
                "ns": "shop_db.$cmd.listCollections",
                "firstBatch": [{ "name": "products", "options": {} }],
            },
            "ok": 1,
        };

        let page = parse_cursor_page(&reply, "firstBatch", "listCollections").unwrap();
        assert_eq!(page.documents.len(), 1);
        assert_eq!(page.id, 42);
        assert_eq!(page.collection, "$cmd.listCollections");
    }

    #[test]
    fn test_cursor_page_exhausted_at_id_zero() {
        let reply = doc! {
            "cursor": {
                "id": 0i64,
                "ns": "shop_db.$cmd.listCollections",
                "nextBatch": [{ "name": "orders" }, { "name": "customers" }],
            },
            "ok": 1,
        };

        let page = parse_cursor_page(&reply, "nextBatch", "listCollections").unwrap();
        assert_eq!(page.documents.len(), 2);
        assert_eq!(page.id, 0);
    }

    #[test]
    fn test_cursor_page_rejects_malformed_reply() {
        let reply = doc! { "ok": 1 };
        let err = parse_cursor_page(&reply, "firstBatch", "listCollections").unwrap_err();
        assert!(matches!(err, Error::Connection { .. }));

        // A first-batch reply cannot be parsed as a getMore page.
        let reply = doc! {
            "cursor": { "id": 0i64, "ns": "db.c", "firstBatch": [] },
            "ok": 1,
        };
        let err = parse_cursor_page(&reply, "nextBatch", "listCollections").unwrap_err();
        assert!(matches!(err, Error::Connection { .. }));
    }

    #[test]
    fn test_value_bson_round_trip() {
        let mut record = Record::new();
        record.insert("name".into(), Value::from("Widget"));
        record.insert("stock".into(), Value::from(42i64));
        record.insert("price".into(), Value::from(9.99));
        record.insert("active".into(), Value::from(true));
        record.insert(
            "tags".into(),
            Value::from(vec![Value::from("a"), Value::from("b")]),
        );

        let doc = record_to_document(&record);
        let back = document_to_map(&doc);
        assert_eq!(back, record);
    }

    #[test]
    fn test_object_id_degrades_to_hex_string() {
        let oid = mongodb::bson::oid::ObjectId::new();
        let value = bson_to_value(&Bson::ObjectId(oid));
        assert_eq!(value.as_str().map(str::len), Some(24));
    }
}
