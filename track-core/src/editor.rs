//! The grid editor: orchestrates the board and occupancy map and exposes the
//! intent API consumed by the host UI.

use std::collections::HashSet;

use crate::board::{Board, GridCoordinate};
use crate::element::{ElementType, PlacedElement, Rotation};
use crate::error::{TrackError, TrackResult};
use crate::gesture::Intent;
use crate::occupancy::OccupancyMap;
use crate::snapshot::{Snapshot, SnapshotElement};

/// A state change the host UI should re-render from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    /// Board replaced; all occupancy discarded.
    Resized(Board),
    /// Element created at a cell.
    Placed(GridCoordinate),
    /// Element moved between cells.
    Moved {
        /// Previous cell.
        from: GridCoordinate,
        /// New cell.
        to: GridCoordinate,
    },
    /// Element rotated in place.
    Rotated {
        /// The cell.
        cell: GridCoordinate,
        /// Rotation after the turn.
        rotation: Rotation,
    },
    /// Element removed from a cell.
    Deleted(GridCoordinate),
    /// Filler elements placed into every empty cell.
    Filled {
        /// How many cells were filled.
        count: usize,
    },
    /// All occupancy dropped, dimensions kept.
    Cleared,
    /// Board and occupancy replaced from a snapshot.
    Restored,
}

/// Grid editor state: an explicit instance owned by the host UI.
#[derive(Debug, Clone, Default)]
pub struct GridEditor {
    board: Board,
    occupancy: OccupancyMap,
}

impl GridEditor {
    /// Create an editor with the given board dimensions (clamped).
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            board: Board::new(width, height),
            occupancy: OccupancyMap::new(),
        }
    }

    /// The current board.
    #[must_use]
    pub const fn board(&self) -> Board {
        self.board
    }

    /// The current occupancy map.
    #[must_use]
    pub const fn occupancy(&self) -> &OccupancyMap {
        &self.occupancy
    }

    /// Element at a cell, if any.
    #[must_use]
    pub fn element_at(&self, coord: GridCoordinate) -> Option<&PlacedElement> {
        self.occupancy.get(coord)
    }

    /// Number of placed elements.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.occupancy.len()
    }

    /// Replace the board, discarding all occupancy. Dimensions are clamped
    /// into the supported range, so this never fails.
    pub fn resize(&mut self, width: u32, height: u32) -> ChangeEvent {
        self.board = Board::new(width, height);
        self.occupancy.clear();
        tracing::info!(
            width = self.board.width(),
            height = self.board.height(),
            "board resized"
        );
        ChangeEvent::Resized(self.board)
    }

    /// Place a new element with zero rotation.
    ///
    /// # Errors
    ///
    /// [`TrackError::Validation`] if the coordinate is out of bounds,
    /// [`TrackError::Occupied`] if the cell already holds an element.
    pub fn place(
        &mut self,
        coord: GridCoordinate,
        element_type: ElementType,
    ) -> TrackResult<ChangeEvent> {
        self.check_bounds(coord)?;
        self.occupancy
            .set(coord, PlacedElement::new(element_type))?;
        tracing::debug!(%coord, "element placed");
        Ok(ChangeEvent::Placed(coord))
    }

    /// Move an element between cells, preserving its rotation.
    ///
    /// # Errors
    ///
    /// [`TrackError::Validation`] if either coordinate is out of bounds,
    /// [`TrackError::Occupied`] / [`TrackError::NotFound`] per the occupancy
    /// contract.
    pub fn move_element(
        &mut self,
        from: GridCoordinate,
        to: GridCoordinate,
    ) -> TrackResult<ChangeEvent> {
        self.check_bounds(from)?;
        self.check_bounds(to)?;
        self.occupancy.relocate(from, to)?;
        tracing::debug!(%from, %to, "element moved");
        Ok(ChangeEvent::Moved { from, to })
    }

    /// Rotate the element at a cell a quarter turn clockwise.
    ///
    /// Silent no-op (returns `None`) when the cell is empty.
    pub fn rotate(&mut self, coord: GridCoordinate) -> Option<ChangeEvent> {
        let element = self.occupancy.get_mut(coord)?;
        element.rotate();
        let rotation = element.rotation;
        tracing::debug!(%coord, degrees = rotation.degrees(), "element rotated");
        Some(ChangeEvent::Rotated {
            cell: coord,
            rotation,
        })
    }

    /// Remove the element at a cell.
    ///
    /// Silent no-op (returns `None`) when the cell is empty.
    pub fn delete(&mut self, coord: GridCoordinate) -> Option<ChangeEvent> {
        self.occupancy.remove(coord)?;
        tracing::debug!(%coord, "element deleted");
        Some(ChangeEvent::Deleted(coord))
    }

    /// Place a blank filler into every empty cell.
    ///
    /// Returns [`ChangeEvent::Filled`] carrying how many cells were filled;
    /// zero on an already-full board.
    pub fn fill_empty_spaces(&mut self) -> ChangeEvent {
        let empty: Vec<GridCoordinate> = self
            .board
            .coordinates()
            .filter(|coord| !self.occupancy.is_occupied(*coord))
            .collect();

        for coord in &empty {
            // Targets only empty cells, so this cannot fail.
            let _ = self
                .occupancy
                .set(*coord, PlacedElement::new(ElementType::Blank));
        }

        tracing::info!(count = empty.len(), "empty cells filled");
        ChangeEvent::Filled { count: empty.len() }
    }

    /// Drop all occupancy, keeping board dimensions. The host confirms the
    /// user's intent before calling this.
    pub fn clear(&mut self) -> ChangeEvent {
        self.occupancy.clear();
        tracing::info!("grid cleared");
        ChangeEvent::Cleared
    }

    /// Execute a resolved gesture intent.
    ///
    /// Returns the change notification for the host, or `None` for the
    /// intents that are silent no-ops on empty cells.
    ///
    /// # Errors
    ///
    /// Propagates the underlying operation's error; the model is unchanged
    /// on failure.
    pub fn apply(&mut self, intent: Intent) -> TrackResult<Option<ChangeEvent>> {
        match intent {
            Intent::Place { cell, element_type } => self.place(cell, element_type).map(Some),
            Intent::Move { from, to } => self.move_element(from, to).map(Some),
            Intent::Rotate(cell) => Ok(self.rotate(cell)),
            Intent::Delete(cell) => Ok(self.delete(cell)),
        }
    }

    /// Pure read: the board plus every placed element, sorted by (row, col).
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let mut elements: Vec<SnapshotElement> = self
            .occupancy
            .iter()
            .map(|(coord, element)| SnapshotElement {
                row: coord.row,
                col: coord.col,
                element_type: element.element_type.clone(),
                rotation: element.rotation,
            })
            .collect();
        elements.sort_by_key(|e| (e.row, e.col));

        Snapshot {
            width: self.board.width(),
            height: self.board.height(),
            elements,
        }
    }

    /// Replace board and occupancy from a snapshot.
    ///
    /// The whole snapshot is validated against the new (clamped) bounds
    /// before anything is mutated: an out-of-range or duplicate coordinate
    /// rejects the import and leaves the editor untouched.
    ///
    /// # Errors
    ///
    /// [`TrackError::Validation`] on out-of-range or duplicate coordinates.
    pub fn restore(&mut self, snapshot: &Snapshot) -> TrackResult<ChangeEvent> {
        let board = Board::new(snapshot.width, snapshot.height);

        let mut seen = HashSet::new();
        for element in &snapshot.elements {
            let coord = GridCoordinate::new(element.row, element.col);
            if !board.contains(coord) {
                return Err(TrackError::Validation(format!(
                    "snapshot element at {coord} is outside the {}x{} board",
                    board.width(),
                    board.height()
                )));
            }
            if !seen.insert(coord) {
                return Err(TrackError::Validation(format!(
                    "snapshot holds more than one element at {coord}"
                )));
            }
        }

        self.board = board;
        self.occupancy.clear();
        for element in &snapshot.elements {
            let placed = PlacedElement {
                element_type: element.element_type.clone(),
                rotation: element.rotation,
            };
            // Validated above: in bounds and unique.
            let _ = self
                .occupancy
                .set(GridCoordinate::new(element.row, element.col), placed);
        }

        tracing::info!(
            width = self.board.width(),
            height = self.board.height(),
            elements = self.occupancy.len(),
            "snapshot restored"
        );
        Ok(ChangeEvent::Restored)
    }

    fn check_bounds(&self, coord: GridCoordinate) -> TrackResult<()> {
        if self.board.contains(coord) {
            Ok(())
        } else {
            Err(TrackError::Validation(format!(
                "{coord} is outside the {}x{} board",
                self.board.width(),
                self.board.height()
            )))
        }
    }
}
