use thiserror::Error;

/// Boxed source error, so adapters can attach driver errors without the
/// core depending on any driver's error types.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors surfaced by the cloning and seeding pipelines.
///
/// Every variant is fatal to the operation that raised it. Enumeration
/// failures (listing collections or indexes) are reported as [`Error::Connection`]
/// since they mean the database handle could not be used.
#[derive(Debug, Error)]
pub enum Error {
    #[error("connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    #[error("failed to create collection `{collection}`: {message}")]
    CollectionCreate {
        collection: String,
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    #[error("failed to create index `{index}` on `{collection}`: {message}")]
    IndexCreate {
        collection: String,
        index: String,
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    #[error("insert into `{collection}` failed: {message}")]
    Insert {
        collection: String,
        message: String,
        #[source]
        source: Option<BoxError>,
    },
}

impl Error {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
            source: None,
        }
    }

    pub fn collection_create(collection: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CollectionCreate {
            collection: collection.into(),
            message: message.into(),
            source: None,
        }
    }

    pub fn index_create(
        collection: impl Into<String>,
        index: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::IndexCreate {
            collection: collection.into(),
            index: index.into(),
            message: message.into(),
            source: None,
        }
    }

    pub fn insert(collection: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Insert {
            collection: collection.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Attaches the underlying driver error.
    pub fn with_source(mut self, cause: impl Into<BoxError>) -> Self {
        let slot = match &mut self {
            Self::Connection { source, .. }
            | Self::CollectionCreate { source, .. }
            | Self::IndexCreate { source, .. }
            | Self::Insert { source, .. } => source,
        };
        *slot = Some(cause.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_target() {
        let err = Error::collection_create("products", "collection already exists");
        assert_eq!(
            err.to_string(),
            "failed to create collection `products`: collection already exists"
        );

        let err = Error::index_create("products", "idx_name", "name conflict");
        assert!(err.to_string().contains("idx_name"));
        assert!(err.to_string().contains("products"));
    }

    #[test]
    fn test_with_source_is_preserved() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = Error::connection("failed to reach server").with_source(io);
        assert!(std::error::Error::source(&err).is_some());
    }
}
