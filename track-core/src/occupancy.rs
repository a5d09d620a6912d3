//! Sparse occupancy map: which coordinates hold a placed element.
//!
//! This is the invariant source of truth for the editor. A coordinate is
//! either absent (empty) or present with exactly one [`PlacedElement`].

use std::collections::HashMap;

use crate::board::GridCoordinate;
use crate::element::PlacedElement;
use crate::error::{TrackError, TrackResult};

/// Sparse mapping from coordinate to placed element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OccupancyMap {
    entries: HashMap<GridCoordinate, PlacedElement>,
}

impl OccupancyMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the coordinate holds an element.
    #[must_use]
    pub fn is_occupied(&self, coord: GridCoordinate) -> bool {
        self.entries.contains_key(&coord)
    }

    /// Get the element at a coordinate.
    #[must_use]
    pub fn get(&self, coord: GridCoordinate) -> Option<&PlacedElement> {
        self.entries.get(&coord)
    }

    /// Get a mutable reference to the element at a coordinate.
    pub fn get_mut(&mut self, coord: GridCoordinate) -> Option<&mut PlacedElement> {
        self.entries.get_mut(&coord)
    }

    /// Place an element at an empty coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`TrackError::Occupied`] if the coordinate already holds an
    /// element; the map is unchanged in that case.
    pub fn set(&mut self, coord: GridCoordinate, element: PlacedElement) -> TrackResult<()> {
        if self.entries.contains_key(&coord) {
            return Err(TrackError::Occupied(coord));
        }
        self.entries.insert(coord, element);
        Ok(())
    }

    /// Remove the element at a coordinate. No-op if already empty.
    pub fn remove(&mut self, coord: GridCoordinate) -> Option<PlacedElement> {
        self.entries.remove(&coord)
    }

    /// Drop all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Move an element between coordinates, preserving its rotation.
    ///
    /// Either both steps happen or neither: the target is checked before the
    /// source entry is touched.
    ///
    /// # Errors
    ///
    /// Returns [`TrackError::Occupied`] if `to` holds an element, or
    /// [`TrackError::NotFound`] if `from` is empty.
    pub fn relocate(&mut self, from: GridCoordinate, to: GridCoordinate) -> TrackResult<()> {
        if self.entries.contains_key(&to) {
            return Err(TrackError::Occupied(to));
        }
        let element = self
            .entries
            .remove(&from)
            .ok_or(TrackError::NotFound(from))?;
        self.entries.insert(to, element);
        Ok(())
    }

    /// Iterate over all occupied coordinates and their elements.
    pub fn iter(&self) -> impl Iterator<Item = (GridCoordinate, &PlacedElement)> {
        self.entries.iter().map(|(coord, element)| (*coord, element))
    }

    /// Number of occupied coordinates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no coordinate is occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
