//! Track elements - the building blocks of layouts.

use serde::{Deserialize, Serialize};

/// The kind of track piece a cell holds.
///
/// The catalog of known kinds is closed, but unknown type strings coming from
/// snapshots or a host-side catalog are accepted structurally: they round-trip
/// unchanged and render via the fallback glyph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ElementType {
    /// Track start marker.
    Start,
    /// Straight track segment.
    Straight,
    /// 90-degree corner segment.
    Corner,
    /// Narrowing squeeze segment.
    Squeeze,
    /// Obstacle field.
    Obstacles,
    /// Gap to jump.
    Gap,
    /// Track finish marker.
    Finish,
    /// Blank filler piece.
    Blank,
    /// A type string outside the known catalog.
    Other(String),
}

impl ElementType {
    /// The catalog name, as used in snapshots and asset paths.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Start => "start",
            Self::Straight => "straight",
            Self::Corner => "corner",
            Self::Squeeze => "squeeze",
            Self::Obstacles => "obstacles",
            Self::Gap => "gap",
            Self::Finish => "finish",
            Self::Blank => "blank",
            Self::Other(name) => name,
        }
    }

    /// Single uppercase letter used when no icon asset is available.
    #[must_use]
    pub fn glyph(&self) -> char {
        self.name()
            .chars()
            .next()
            .map_or('?', |c| c.to_ascii_uppercase())
    }

    /// Whether this type belongs to the known catalog.
    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<String> for ElementType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "start" => Self::Start,
            "straight" => Self::Straight,
            "corner" => Self::Corner,
            "squeeze" => Self::Squeeze,
            "obstacles" => Self::Obstacles,
            "gap" => Self::Gap,
            "finish" => Self::Finish,
            "blank" => Self::Blank,
            _ => Self::Other(value),
        }
    }
}

impl From<ElementType> for String {
    fn from(value: ElementType) -> Self {
        value.name().to_string()
    }
}

impl std::fmt::Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Rotation of a placed element, in degrees clockwise.
///
/// Always a multiple of 90, normalized into [0, 360).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u16")]
pub struct Rotation(u16);

impl Rotation {
    /// Zero rotation.
    pub const ZERO: Self = Self(0);

    /// Create a rotation, snapping to the nearest lower multiple of 90 and
    /// normalizing mod 360.
    #[must_use]
    pub fn from_degrees(degrees: u32) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        Self(((degrees / 90 * 90) % 360) as u16)
    }

    /// The rotation in degrees, in [0, 360).
    #[must_use]
    pub const fn degrees(self) -> u16 {
        self.0
    }

    /// Rotated a quarter turn clockwise.
    #[must_use]
    pub const fn rotated(self) -> Self {
        Self((self.0 + 90) % 360)
    }
}

// Legacy snapshots carry unbounded rotation counters (90, 180, ... 450);
// normalize on the way in.
impl From<u32> for Rotation {
    fn from(degrees: u32) -> Self {
        Self::from_degrees(degrees)
    }
}

impl From<Rotation> for u16 {
    fn from(rotation: Rotation) -> Self {
        rotation.0
    }
}

/// An element placed on the board: its type plus accumulated rotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedElement {
    /// The kind of track piece.
    #[serde(rename = "type")]
    pub element_type: ElementType,
    /// Clockwise rotation applied to the piece.
    pub rotation: Rotation,
}

impl PlacedElement {
    /// Create a freshly placed element with zero rotation.
    #[must_use]
    pub fn new(element_type: ElementType) -> Self {
        Self {
            element_type,
            rotation: Rotation::ZERO,
        }
    }

    /// Rotate the element a quarter turn clockwise.
    pub fn rotate(&mut self) {
        self.rotation = self.rotation.rotated();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_types_round_trip() {
        for name in [
            "start",
            "straight",
            "corner",
            "squeeze",
            "obstacles",
            "gap",
            "finish",
            "blank",
        ] {
            let ty = ElementType::from(name.to_string());
            assert!(ty.is_known(), "{name} should be in the catalog");
            assert_eq!(ty.name(), name);
        }
    }

    #[test]
    fn test_unknown_type_is_preserved() {
        let ty = ElementType::from("teleporter".to_string());
        assert!(!ty.is_known());
        assert_eq!(ty.name(), "teleporter");
        assert_eq!(ty.glyph(), 'T');
    }

    #[test]
    fn test_type_serializes_as_plain_string() {
        let json = serde_json::to_string(&ElementType::Corner).expect("serialize");
        assert_eq!(json, "\"corner\"");

        let back: ElementType = serde_json::from_str("\"squeeze\"").expect("deserialize");
        assert_eq!(back, ElementType::Squeeze);
    }

    #[test]
    fn test_rotation_wraps_at_full_turn() {
        let mut rotation = Rotation::ZERO;
        for _ in 0..4 {
            rotation = rotation.rotated();
        }
        assert_eq!(rotation.degrees(), 0);
    }

    #[test]
    fn test_rotation_from_degrees_normalizes() {
        assert_eq!(Rotation::from_degrees(450).degrees(), 90);
        assert_eq!(Rotation::from_degrees(270).degrees(), 270);
        assert_eq!(Rotation::from_degrees(89).degrees(), 0);
    }

    #[test]
    fn test_placed_element_rotates() {
        let mut placed = PlacedElement::new(ElementType::Straight);
        assert_eq!(placed.rotation.degrees(), 0);
        placed.rotate();
        assert_eq!(placed.rotation.degrees(), 90);
    }

    #[test]
    fn test_glyph_is_uppercase_initial() {
        assert_eq!(ElementType::Start.glyph(), 'S');
        assert_eq!(ElementType::Gap.glyph(), 'G');
    }
}
