use shoresquad_shared::ValidationError;
use thiserror::Error;

/// Errors produced by the store layer.
#[derive(Error, Debug)]
pub enum StoreError {
    /// SQLite error from the on-disk backend.
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Failed to determine a platform data directory.
    #[error("Could not determine application data directory")]
    NoDataDir,

    /// Generic I/O error (e.g. creating the database directory).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be encoded before writing it.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A stored record exists but is not valid JSON for its type.
    #[error("Stored record {key:?} is malformed: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A stored record carries an id no newer record could follow.
    #[error("Stored record {key:?} has out-of-range id {id}")]
    IdOutOfRange { key: String, id: i64 },

    /// The id sequence has no successor left to issue.
    #[error("Record ids exhausted")]
    IdsExhausted,

    /// Migration failure.
    #[error("Migration error: {0}")]
    Migration(String),

    /// The caller's input was rejected. Nothing was written.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl StoreError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;
