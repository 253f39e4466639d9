//! Persistence layer: the location store contract, its failure
//! classification, and the MongoDB and in-memory backends.

pub mod errors;
pub mod memory;
pub mod mongo;
pub mod store;

pub use errors::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use mongo::{MongoStore, DEFAULT_DB_NAME, DEFAULT_TIMEOUT};
pub use store::LocationStore;
