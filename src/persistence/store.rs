//! The capability contract a storage backend must satisfy to serve
//! location requests.

use async_trait::async_trait;

use crate::hex::Loc;

use super::errors::StoreResult;

/// Storage operations over location records, keyed by collection name and
/// canonical id.
///
/// Implementations establish their backend connection lazily: every
/// operation performs an ensure-connected step first and fails with
/// [`StoreError::Unavailable`] when the backend cannot be reached. No
/// operation retries past that single implicit attempt.
///
/// [`StoreError::Unavailable`]: super::StoreError::Unavailable
#[async_trait]
pub trait LocationStore: Send + Sync {
    /// Establishes the backend connection. Idempotent; a no-op when the
    /// connection is already up.
    async fn connect(&self) -> StoreResult<()>;

    /// Inserts a new record. A duplicate canonical id is rejected; a
    /// collection that does not exist yet is created by the insert.
    async fn insert(&self, collection: &str, loc: &Loc) -> StoreResult<()>;

    /// Replaces the record with the matching id. Fails with
    /// `CollectionMissing` when the collection was never created, and with
    /// `NotFound` when the id is absent from it.
    async fn update(&self, collection: &str, loc: &Loc) -> StoreResult<()>;

    /// Fetches the record with the given id.
    async fn fetch(&self, collection: &str, id: &str) -> StoreResult<Loc>;

    /// Removes the record with the given id.
    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()>;
}
