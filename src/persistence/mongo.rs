//! MongoDB store backend.

use std::time::Duration;

use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::warn;

use crate::hex::Loc;

use super::errors::{StoreError, StoreResult};
use super::store::LocationStore;

/// Database name used when the caller passes an empty one.
pub const DEFAULT_DB_NAME: &str = "defaultDB";

/// Bound on connection attempts when the caller passes no timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// [`LocationStore`] backed by a MongoDB database.
///
/// The connection is dialed on first use and shared afterwards. The
/// ensure-connected step is double-checked under a write lock so
/// concurrent first calls collapse into one dial instead of racing.
pub struct MongoStore {
    mongo_url: String,
    db_name: String,
    timeout: Duration,
    db: RwLock<Option<Database>>,
}

/// Stored form of a location: the canonical id doubles as the document
/// key. Conversion back re-derives the id from the coordinates, so a
/// hand-edited document cannot smuggle an inconsistent one in.
#[derive(Debug, Serialize, Deserialize)]
struct StoredLoc {
    #[serde(rename = "_id")]
    id: String,
    x: i64,
    y: i64,
    z: i64,
    status: String,
}

impl From<&Loc> for StoredLoc {
    fn from(loc: &Loc) -> Self {
        Self {
            id: loc.id().to_string(),
            x: loc.x(),
            y: loc.y(),
            z: loc.z(),
            status: loc.status.clone(),
        }
    }
}

impl From<StoredLoc> for Loc {
    fn from(stored: StoredLoc) -> Self {
        let mut loc = Loc::from_coords(stored.x, stored.y, stored.z);
        loc.status = stored.status;
        loc
    }
}

impl MongoStore {
    /// Creates a store for the given connection string and database. An
    /// empty `db_name` falls back to [`DEFAULT_DB_NAME`], a `None` timeout
    /// to [`DEFAULT_TIMEOUT`]. Nothing is dialed until the first operation.
    pub fn new(mongo_url: impl Into<String>, db_name: &str, timeout: Option<Duration>) -> Self {
        let db_name = if db_name.is_empty() {
            DEFAULT_DB_NAME
        } else {
            db_name
        };
        Self {
            mongo_url: mongo_url.into(),
            db_name: db_name.to_string(),
            timeout: timeout.unwrap_or(DEFAULT_TIMEOUT),
            db: RwLock::new(None),
        }
    }

    /// The database this store talks to.
    pub fn db_name(&self) -> &str {
        &self.db_name
    }

    /// Ensure-connected step: returns the live handle, dialing if needed.
    async fn handle(&self) -> StoreResult<Database> {
        if let Some(db) = self.db.read().await.as_ref() {
            return Ok(db.clone());
        }
        let mut slot = self.db.write().await;
        if let Some(db) = slot.as_ref() {
            return Ok(db.clone());
        }
        match self.dial().await {
            Ok(db) => {
                *slot = Some(db.clone());
                Ok(db)
            }
            Err(err) => {
                warn!("could not establish mongo connection: {}", err);
                Err(err)
            }
        }
    }

    /// Dials the configured URL and pings the server. The driver itself
    /// connects lazily, so the ping is what actually bounds reachability
    /// to the configured timeout.
    async fn dial(&self) -> StoreResult<Database> {
        let mut options = ClientOptions::parse(&self.mongo_url)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        options.server_selection_timeout = Some(self.timeout);
        options.connect_timeout = Some(self.timeout);

        let client =
            Client::with_options(options).map_err(|e| StoreError::Unavailable(e.to_string()))?;
        let db = client.database(&self.db_name);
        db.run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(db)
    }

    async fn collection_exists(&self, db: &Database, name: &str) -> StoreResult<bool> {
        let names = db.list_collection_names().await.map_err(StoreError::from)?;
        Ok(names.iter().any(|n| n == name))
    }
}

#[async_trait]
impl LocationStore for MongoStore {
    async fn connect(&self) -> StoreResult<()> {
        self.handle().await.map(|_| ())
    }

    async fn insert(&self, collection: &str, loc: &Loc) -> StoreResult<()> {
        let db = self.handle().await?;
        db.collection::<StoredLoc>(collection)
            .insert_one(StoredLoc::from(loc))
            .await
            .map_err(StoreError::from)?;
        Ok(())
    }

    async fn update(&self, collection: &str, loc: &Loc) -> StoreResult<()> {
        let db = self.handle().await?;
        // Replacing into a missing collection would silently match nothing,
        // so the absent-collection case is checked up front.
        if !self.collection_exists(&db, collection).await? {
            return Err(StoreError::CollectionMissing(collection.to_string()));
        }
        let result = db
            .collection::<StoredLoc>(collection)
            .replace_one(doc! { "_id": loc.id() }, StoredLoc::from(loc))
            .await
            .map_err(StoreError::from)?;
        if result.matched_count == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn fetch(&self, collection: &str, id: &str) -> StoreResult<Loc> {
        let db = self.handle().await?;
        let found = db
            .collection::<StoredLoc>(collection)
            .find_one(doc! { "_id": id })
            .await
            .map_err(StoreError::from)?;
        found.map(Loc::from).ok_or(StoreError::NotFound)
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()> {
        let db = self.handle().await?;
        let result = db
            .collection::<StoredLoc>(collection)
            .delete_one(doc! { "_id": id })
            .await
            .map_err(StoreError::from)?;
        if result.deleted_count == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
