use thiserror::Error;

pub type DkResult<T> = Result<T, DkError>;

/// Failures raised while building or querying documents.
///
/// Every variant aborts the current operation; nothing is retried.
#[derive(Debug, Error)]
pub enum DkError {
    /// Strict mode found a key the target document does not declare.
    #[error("schema mismatch building {document}: unexpected key `{key}`")]
    SchemaMismatch { document: &'static str, key: String },

    /// A declared field was missing or had the wrong JSON type.
    #[error("could not build {document}: {source}")]
    Malformed {
        document: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("contest has no field `{0}`")]
    FieldNotFound(String),

    #[error("invalid filter: {0}")]
    InvalidFilter(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("{what}: expected exactly one match, found {count}")]
    AmbiguousResult { what: &'static str, count: usize },

    #[error("inconsistent data: {0}")]
    InconsistentData(String),

    #[error("invalid timestamp `{0}`")]
    InvalidTimestamp(String),

    #[error("unknown timezone `{0}`")]
    InvalidTimezone(String),

    #[error("unrecognized team `{0}`")]
    UnknownTeam(String),
}
