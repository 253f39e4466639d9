//! Error types for the coordinate codec.

use thiserror::Error;

/// Every way a textual or JSON location can fail to decode.
///
/// These are client-input errors. The request layer maps all of them onto
/// the bad-input outcome; the variants exist so messages can say what was
/// actually wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocError {
    /// The string is not three dot-delimited components.
    #[error("XYZ param must be of the format 'x.y.z'. Got: {0}")]
    Format(String),

    /// One component of an otherwise well-shaped string is not an integer.
    #[error("could not parse {axis} value as integer. Got: {input}")]
    Axis { axis: char, input: String },

    /// The body is not JSON at all.
    #[error("bad location JSON: {0}")]
    Malformed(String),

    /// The JSON object lacks at least one coordinate key.
    #[error("missing one or more x,y,z elements")]
    MissingField,

    /// A coordinate key is present but not an integer.
    #[error("{0}")]
    TypeMismatch(String),

    /// The supplied id disagrees with the coordinates it came with.
    #[error("id {id} doesn't match coordinates {x}.{y}.{z}")]
    IdMismatch { id: String, x: i64, y: i64, z: i64 },
}
