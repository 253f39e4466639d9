//! Hex-map coordinate domain: the location record, its string and JSON
//! codec, and the rectangular grid generator.

pub mod errors;
pub mod grid;
pub mod loc;

pub use errors::LocError;
pub use grid::Grid;
pub use loc::{Loc, NEW_STATUS};
