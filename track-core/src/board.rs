//! The board: the rectangular coordinate space of the grid.

use serde::{Deserialize, Serialize};

/// Minimum board dimension.
pub const MIN_DIMENSION: u32 = 3;
/// Maximum board dimension.
pub const MAX_DIMENSION: u32 = 10;

/// A cell position on the board, 0-indexed from the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCoordinate {
    /// Row index.
    pub row: u32,
    /// Column index.
    pub col: u32,
}

impl GridCoordinate {
    /// Create a coordinate.
    #[must_use]
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for GridCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Board dimensions. Both axes are clamped into
/// [[`MIN_DIMENSION`], [`MAX_DIMENSION`]] at construction, so a `Board` is
/// always valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    width: u32,
    height: u32,
}

impl Board {
    /// Create a board, clamping both dimensions into the supported range.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.clamp(MIN_DIMENSION, MAX_DIMENSION),
            height: height.clamp(MIN_DIMENSION, MAX_DIMENSION),
        }
    }

    /// Board width in cells.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Board height in cells.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells.
    #[must_use]
    pub const fn cell_count(&self) -> u32 {
        self.width * self.height
    }

    /// Whether the coordinate lies inside the board.
    #[must_use]
    pub const fn contains(&self, coord: GridCoordinate) -> bool {
        coord.row < self.height && coord.col < self.width
    }

    /// Iterate all coordinates in row-major order.
    pub fn coordinates(&self) -> impl Iterator<Item = GridCoordinate> + '_ {
        (0..self.height)
            .flat_map(move |row| (0..self.width).map(move |col| GridCoordinate::new(row, col)))
    }
}

impl Default for Board {
    fn default() -> Self {
        // The editor starts on a 5x7 grid.
        Self::new(5, 7)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_are_clamped() {
        let board = Board::new(1, 99);
        assert_eq!(board.width(), MIN_DIMENSION);
        assert_eq!(board.height(), MAX_DIMENSION);
    }

    #[test]
    fn test_contains() {
        let board = Board::new(5, 7);
        assert!(board.contains(GridCoordinate::new(0, 0)));
        assert!(board.contains(GridCoordinate::new(6, 4)));
        assert!(!board.contains(GridCoordinate::new(7, 0)));
        assert!(!board.contains(GridCoordinate::new(0, 5)));
    }

    #[test]
    fn test_coordinates_cover_every_cell() {
        let board = Board::new(3, 4);
        let coords: Vec<_> = board.coordinates().collect();
        assert_eq!(coords.len(), 12);
        assert_eq!(coords[0], GridCoordinate::new(0, 0));
        assert_eq!(coords[11], GridCoordinate::new(3, 2));
    }
}
