//! Storage outcome classification.
//!
//! The driver reports unreachable servers, duplicate keys and command
//! failures through one open-ended error type. Classification into the
//! closed [`StoreError`] set happens here, once, so raw driver errors
//! never cross the persistence boundary.

use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Every way a store operation can fail, as seen by the request layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The backend could not be reached within the configured timeout.
    #[error("no reachable mongo server: {0}")]
    Unavailable(String),

    /// Fetch, update or delete referenced an id the collection lacks.
    #[error("not found")]
    NotFound,

    /// Insert referenced an id already present. Backend text preserved.
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    /// Update referenced a collection that was never created.
    #[error("non-existent collection for update: {0}")]
    CollectionMissing(String),

    /// Any other backend failure, message preserved opaquely.
    #[error("{0}")]
    Backend(String),
}

/// Server error code for a unique-key violation.
const DUPLICATE_KEY_CODE: i32 = 11000;

impl From<MongoError> for StoreError {
    fn from(err: MongoError) -> Self {
        match &*err.kind {
            ErrorKind::ServerSelection { message, .. } => Self::Unavailable(message.clone()),
            ErrorKind::DnsResolve { message, .. } => Self::Unavailable(message.clone()),
            ErrorKind::ConnectionPoolCleared { message, .. } => Self::Unavailable(message.clone()),
            ErrorKind::Io(io_err) => Self::Unavailable(io_err.to_string()),
            ErrorKind::Write(WriteFailure::WriteError(we)) if we.code == DUPLICATE_KEY_CODE => {
                Self::DuplicateKey(we.message.clone())
            }
            ErrorKind::Command(ce) if ce.code == DUPLICATE_KEY_CODE => {
                Self::DuplicateKey(ce.message.clone())
            }
            _ => Self::Backend(err.to_string()),
        }
    }
}
