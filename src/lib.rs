//! hexloc - A MongoDB-backed location service for hex grid maps
//!
//! Locations are addressed by three integer cube coordinates whose
//! canonical string form `"x.y.z"` doubles as the storage key. The crate
//! provides the coordinate codec, a storage contract with MongoDB and
//! in-memory backends, and the HTTP CRUD surface that maps storage
//! failures onto a fixed set of response outcomes.

pub mod cli;
pub mod hex;
pub mod persistence;
pub mod rest_api;
