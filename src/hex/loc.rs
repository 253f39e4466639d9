//! The location record and its canonical representations.
//!
//! A `Loc` names one cell on a hex map by cube coordinates. The record has
//! exactly three forms: the struct itself, the canonical string `"x.y.z"`,
//! and a JSON object. The id is always derived from the coordinates, never
//! assigned, so a record can be rebuilt from any of its forms without loss.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::LocError;

/// Lifecycle tag every freshly constructed location starts with.
pub const NEW_STATUS: &str = "new";

/// A single addressable cell on the hex map.
///
/// Coordinates and the derived id are immutable once constructed; `status`
/// is the one field callers may change before a write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Loc {
    id: String,
    x: i64,
    y: i64,
    z: i64,
    /// Free-form lifecycle tag, `"new"` on construction.
    pub status: String,
}

/// Decode target for [`Loc::from_json`]. Private so every externally
/// supplied record passes through the canonical-id check.
#[derive(Deserialize)]
struct RawLoc {
    #[serde(default)]
    id: String,
    x: i64,
    y: i64,
    z: i64,
    #[serde(default = "default_status")]
    status: String,
}

fn default_status() -> String {
    NEW_STATUS.to_string()
}

impl Loc {
    /// Builds a location from cube coordinates. Never fails; the id is
    /// derived as `"x.y.z"` and the status starts as `"new"`.
    pub fn from_coords(x: i64, y: i64, z: i64) -> Self {
        Self {
            id: format!("{}.{}.{}", x, y, z),
            x,
            y,
            z,
            status: NEW_STATUS.to_string(),
        }
    }

    /// Decodes a JSON record.
    ///
    /// `x`, `y` and `z` must all be present and integral; unknown keys are
    /// ignored. An `id` that disagrees with the coordinates is rejected; an
    /// absent or empty one is derived. The same goes for `status`, which
    /// defaults to `"new"`.
    pub fn from_json(bytes: &[u8]) -> Result<Self, LocError> {
        let value: Value =
            serde_json::from_slice(bytes).map_err(|e| LocError::Malformed(e.to_string()))?;
        if value.get("x").is_none() || value.get("y").is_none() || value.get("z").is_none() {
            return Err(LocError::MissingField);
        }
        let raw: RawLoc =
            serde_json::from_value(value).map_err(|e| LocError::TypeMismatch(e.to_string()))?;
        let mut loc = Loc::from_coords(raw.x, raw.y, raw.z);
        if !raw.id.is_empty() && raw.id != loc.id {
            return Err(LocError::IdMismatch {
                id: raw.id,
                x: raw.x,
                y: raw.y,
                z: raw.z,
            });
        }
        loc.status = raw.status;
        Ok(loc)
    }

    /// Serializes as `{"id":...,"x":...,"y":...,"z":...,"status":...}`.
    /// Key order is part of the wire contract.
    pub fn to_json(&self) -> String {
        // A Loc holds only strings and integers; serialization cannot fail.
        serde_json::to_string(self).expect("Loc is always JSON-serializable")
    }

    /// The canonical id, `"x.y.z"`.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn x(&self) -> i64 {
        self.x
    }

    pub fn y(&self) -> i64 {
        self.y
    }

    pub fn z(&self) -> i64 {
        self.z
    }

    /// Chebyshev distance to `target`: the largest per-axis difference,
    /// which on a hex grid is the number of steps between the two cells.
    /// Differences are taken in i128 so no i64 pair can overflow.
    pub fn distance(&self, target: &Loc) -> u64 {
        let dx = (self.x as i128 - target.x as i128).unsigned_abs();
        let dy = (self.y as i128 - target.y as i128).unsigned_abs();
        let dz = (self.z as i128 - target.z as i128).unsigned_abs();
        dx.max(dy).max(dz) as u64
    }
}

impl FromStr for Loc {
    type Err = LocError;

    /// Parses the canonical `"x.y.z"` form: exactly three dot-delimited
    /// base-10 integers.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() != 3 {
            return Err(LocError::Format(s.to_string()));
        }
        let x = parse_axis(parts[0], 'x', s)?;
        let y = parse_axis(parts[1], 'y', s)?;
        let z = parse_axis(parts[2], 'z', s)?;
        Ok(Loc::from_coords(x, y, z))
    }
}

fn parse_axis(part: &str, axis: char, input: &str) -> Result<i64, LocError> {
    part.parse().map_err(|_| LocError::Axis {
        axis,
        input: input.to_string(),
    })
}

impl fmt::Display for Loc {
    /// The canonical `"x.y.z"` form, always equal to [`Loc::id`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.x, self.y, self.z)
    }
}
