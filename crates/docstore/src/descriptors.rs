//! Immutable snapshots of collection and index definitions.
//!
//! Descriptors are read from a source database and used as blueprints for
//! recreation in a target. They never refer back to the store they came from.

use serde::{Deserialize, Serialize};

use crate::value::{OptionMap, Value};

/// Reserved name of the database's own index over document identity.
/// It is created implicitly with every collection and must never be
/// recreated explicitly.
pub const ID_INDEX_NAME: &str = "_id_";

/// Keys that are carried as explicit [`IndexDescriptor`] fields (or are
/// server bookkeeping) and therefore must not leak back in through the
/// opaque option bag.
pub(crate) const RESERVED_INDEX_KEYS: &[&str] = &["key", "name", "unique", "v", "ns"];

/// Definition of a collection: its name plus whatever creation options the
/// source database reported (storage engine, validators, capped settings).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionDescriptor {
    pub name: String,
    #[serde(default)]
    pub options: OptionMap,
}

impl CollectionDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: OptionMap::new(),
        }
    }
}

/// Sort direction of one field inside an index key pattern.
///
/// `Other` passes through special index kinds (`"hashed"`, `"text"`,
/// `"2dsphere"`) without the core having to understand them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexDirection {
    Ascending,
    Descending,
    Other(String),
}

impl IndexDirection {
    /// Wire form of the direction as it appears in an index key document.
    pub fn as_value(&self) -> Value {
        match self {
            Self::Ascending => Value::Int(1),
            Self::Descending => Value::Int(-1),
            Self::Other(kind) => Value::String(kind.clone()),
        }
    }

    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Int(n) if *n < 0 => Self::Descending,
            Value::Int(_) => Self::Ascending,
            Value::Double(n) if *n < 0.0 => Self::Descending,
            Value::Double(_) => Self::Ascending,
            Value::String(kind) => Self::Other(kind.clone()),
            other => Self::Other(format!("{other:?}")),
        }
    }
}

/// Definition of a single index: an ordered key pattern, a uniqueness flag,
/// a name, and an opaque bag of any further options (partial filter
/// expressions, TTLs, collations).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexDescriptor {
    pub name: String,
    /// Field-to-direction pairs in key-pattern order. Order is significant
    /// for compound indexes, which is why this is not a map.
    pub key: Vec<(String, IndexDirection)>,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub extra_options: OptionMap,
}

impl IndexDescriptor {
    pub fn new(name: impl Into<String>, key: Vec<(String, IndexDirection)>) -> Self {
        Self {
            name: name.into(),
            key,
            unique: false,
            extra_options: OptionMap::new(),
        }
    }

    pub fn unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    /// Whether this descriptor names the implicit identity index.
    pub fn is_identity(&self) -> bool {
        self.name == ID_INDEX_NAME
    }

    /// Extra options that may be passed through to index creation.
    ///
    /// The explicit `key`, `name`, and `unique` fields always win: if the
    /// source reported them redundantly inside the option bag, they are
    /// filtered out here so they can only fill gaps, never overwrite.
    pub fn passthrough_options(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.extra_options
            .iter()
            .filter(|(k, _)| !RESERVED_INDEX_KEYS.contains(&k.as_str()))
    }
}
