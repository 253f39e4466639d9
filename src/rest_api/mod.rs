//! # Location REST API Module
//!
//! HTTP endpoints for CRUD operations on the location collection, with
//! storage failures mapped onto a fixed set of response outcomes.

pub mod response;
pub mod server;

pub use response::LocResponse;
pub use server::LocServer;
