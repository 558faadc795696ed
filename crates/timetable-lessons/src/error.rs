use thiserror::Error;

/// The lesson database could not be opened.
///
/// Callers treat this as "no persistence available" and do not retry.
#[derive(Debug, Error)]
#[error("Cannot open lesson database at {path}: {source}")]
pub struct ConnectionError {
    pub path: String,
    #[source]
    pub source: rusqlite::Error,
}

/// Errors that can occur within the lesson store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Storage was unreachable when the operation tried to acquire a connection.
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    /// Underlying SQLite / rusqlite error.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The record failed validation before it reached storage.
    #[error("Invalid lesson: {0}")]
    InvalidRecord(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
