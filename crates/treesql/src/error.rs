//! Error types for treesql.

use thiserror::Error;

/// Result type for treesql operations.
pub type Result<T> = std::result::Result<T, TreesqlError>;

#[derive(Error, Debug)]
pub enum TreesqlError {
    /// The virtual table constructor argument is missing or malformed.
    #[error("Invalid table argument: {0}")]
    Config(String),

    #[error("Repository not found: {path} ({source})")]
    RepositoryOpen {
        path: String,
        #[source]
        source: git2::Error,
    },

    /// The host could not accept the declared table schema.
    #[error("Schema declaration rejected: {0}")]
    Schema(String),

    /// An object id could not be parsed or resolved to an object.
    #[error("Lookup failed for {id}: {source}")]
    Lookup {
        id: String,
        #[source]
        source: git2::Error,
    },

    #[error("History walk failed: {0}")]
    Walker(#[source] git2::Error),

    #[error("Invalid column index: {0}")]
    InvalidColumn(i32),

    #[error("Cursor error: {0}")]
    Cursor(String),

    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("SQL error: {0}")]
    Sql(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Errors handed back to SQLite travel as module errors so the message
/// reaches the failing statement unchanged.
impl From<TreesqlError> for rusqlite::Error {
    fn from(err: TreesqlError) -> Self {
        match err {
            TreesqlError::Sql(inner) => inner,
            other => rusqlite::Error::ModuleError(other.to_string()),
        }
    }
}
