//! Snapshot wire format for save/load collaborators.
//!
//! ```json
//! {
//!   "width": 5,
//!   "height": 7,
//!   "elements": [
//!     { "row": 1, "col": 2, "type": "corner", "rotation": 90 }
//!   ]
//! }
//! ```
//!
//! Legacy snapshots carried a single `gridSize` field instead of
//! `width`/`height`; when present and the explicit dimensions are absent it
//! sets both.

use serde::{Deserialize, Serialize};

use crate::element::{ElementType, Rotation};
use crate::error::{TrackError, TrackResult};

/// One placed element in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotElement {
    /// Row index.
    pub row: u32,
    /// Column index.
    pub col: u32,
    /// Element type string.
    #[serde(rename = "type")]
    pub element_type: ElementType,
    /// Clockwise rotation in degrees.
    pub rotation: Rotation,
}

/// A serializable view of the board plus its occupancy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SnapshotWire")]
pub struct Snapshot {
    /// Board width in cells.
    pub width: u32,
    /// Board height in cells.
    pub height: u32,
    /// Placed elements, sorted by (row, col) for stable round-trips.
    pub elements: Vec<SnapshotElement>,
}

/// Raw deserialization shape, before legacy-field resolution.
#[derive(Debug, Deserialize)]
struct SnapshotWire {
    width: Option<u32>,
    height: Option<u32>,
    #[serde(rename = "gridSize")]
    grid_size: Option<u32>,
    #[serde(default)]
    elements: Vec<SnapshotElement>,
}

impl TryFrom<SnapshotWire> for Snapshot {
    type Error = TrackError;

    fn try_from(wire: SnapshotWire) -> Result<Self, Self::Error> {
        let (width, height) = match (wire.width, wire.height, wire.grid_size) {
            (Some(w), Some(h), _) => (w, h),
            (None, None, Some(size)) => (size, size),
            _ => {
                return Err(TrackError::Validation(
                    "snapshot is missing board dimensions".to_string(),
                ))
            }
        };

        let mut elements = wire.elements;
        elements.sort_by_key(|e| (e.row, e.col));

        Ok(Self {
            width,
            height,
            elements,
        })
    }
}

impl Snapshot {
    /// Serialize to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> TrackResult<String> {
        serde_json::to_string(self).map_err(TrackError::Serialization)
    }

    /// Deserialize from JSON, resolving the legacy `gridSize` field.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed JSON or missing dimensions.
    pub fn from_json(json: &str) -> TrackResult<Self> {
        serde_json::from_str(json).map_err(TrackError::Serialization)
    }
}
