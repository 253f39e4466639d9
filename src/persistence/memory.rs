//! In-memory store backend.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::hex::Loc;

use super::errors::{StoreError, StoreResult};
use super::store::LocationStore;

/// In-memory [`LocationStore`].
///
/// Honors the same outcome contract as the Mongo adapter, including the
/// created-by-insert collection semantics, so handler tests and local runs
/// exercise the real request paths without a server.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, HashMap<String, Loc>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held in `collection`.
    pub fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .map(|colls| colls.get(collection).map_or(0, HashMap::len))
            .unwrap_or(0)
    }
}

#[async_trait]
impl LocationStore for MemoryStore {
    async fn connect(&self) -> StoreResult<()> {
        // Nothing to dial.
        Ok(())
    }

    async fn insert(&self, collection: &str, loc: &Loc) -> StoreResult<()> {
        let mut colls = self
            .collections
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;
        let records = colls.entry(collection.to_string()).or_default();
        if records.contains_key(loc.id()) {
            return Err(StoreError::DuplicateKey(loc.id().to_string()));
        }
        records.insert(loc.id().to_string(), loc.clone());
        Ok(())
    }

    async fn update(&self, collection: &str, loc: &Loc) -> StoreResult<()> {
        let mut colls = self
            .collections
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;
        let records = colls
            .get_mut(collection)
            .ok_or_else(|| StoreError::CollectionMissing(collection.to_string()))?;
        match records.get_mut(loc.id()) {
            Some(slot) => {
                *slot = loc.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }

    async fn fetch(&self, collection: &str, id: &str) -> StoreResult<Loc> {
        let colls = self
            .collections
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;
        colls
            .get(collection)
            .and_then(|records| records.get(id))
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()> {
        let mut colls = self
            .collections
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;
        let removed = colls
            .get_mut(collection)
            .and_then(|records| records.remove(id));
        match removed {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound),
        }
    }
}
