//! Error types at the data boundary.

use thiserror::Error;

/// Shown when a failure carries no message of its own.
pub const GENERIC_LOAD_MESSAGE: &str = "An error occurred while fetching Pokemon data";

/// Shown when the query succeeds but the collection is empty.
pub const NO_DATA_MESSAGE: &str = "No Pokemon data available";

/// Failures raised by an [`EntryStore`](crate::store::EntryStore) query.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    /// The SQLite collection could not be opened or queried.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The remote collection could not be reached.
    #[error("network error: {0}")]
    Network(String),

    /// The remote collection answered with a non-success status.
    #[error("store returned HTTP {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the response body.
        message: String,
    },

    /// Rows came back but could not be decoded into entries.
    #[error("malformed response: {0}")]
    Decode(String),

    /// Any other failure, carried as-is.
    #[error("{0}")]
    Other(String),
}

/// Why the initial load did not produce a ready list.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Query(#[from] StoreError),

    #[error("{}", NO_DATA_MESSAGE)]
    Empty,
}

impl LoadError {
    /// Message for the error view. Both failure kinds read the same way to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            GENERIC_LOAD_MESSAGE.to_string()
        } else {
            message
        }
    }
}
