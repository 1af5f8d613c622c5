//! Tile grid and door state shared by rendering, sight and collision.
//!
//! The grid is fixed at load time. Everything that changes during play
//! (door animation, occupancy) lives in [`DoorMap`].
mod door;

pub use door::{Door, DoorLock, DoorMap, DoorRule, DoorTransition, KeyColor};

use crate::error::{ErrorSeverity, GameError};
use crate::geometry::GridCoord;

/// Classification of a tile code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileKind {
    Open,
    /// Solid wall; the code selects its texture.
    Wall(u16),
    Door,
}

impl TileKind {
    pub const fn from_code(code: u16) -> Self {
        match code {
            0 => Self::Open,
            6..=9 => Self::Door,
            other => Self::Wall(other),
        }
    }

    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("grid has no tiles")]
    Empty,

    #[error("row {row} has {found} tiles, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

impl GameError for GridError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Empty => "GRID_EMPTY",
            Self::RaggedRow { .. } => "GRID_RAGGED_ROW",
        }
    }
}

/// Row-major tile codes with equal-length rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    tiles: Vec<u16>,
}

impl Grid {
    /// Builds a grid from rows, rejecting empty or ragged input.
    pub fn from_rows(rows: Vec<Vec<u16>>) -> Result<Self, GridError> {
        let expected = rows.first().map(Vec::len).unwrap_or(0);
        if expected == 0 {
            return Err(GridError::Empty);
        }
        let mut tiles = Vec::with_capacity(expected * rows.len());
        for (row, codes) in rows.iter().enumerate() {
            if codes.len() != expected {
                return Err(GridError::RaggedRow {
                    row,
                    expected,
                    found: codes.len(),
                });
            }
            tiles.extend_from_slice(codes);
        }
        Ok(Self {
            width: expected as u32,
            height: rows.len() as u32,
            tiles,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn contains(&self, coord: GridCoord) -> bool {
        coord.x >= 0 && coord.y >= 0 && (coord.x as u32) < self.width && (coord.y as u32) < self.height
    }

    /// Raw tile code, `None` outside the grid.
    pub fn code(&self, coord: GridCoord) -> Option<u16> {
        if !self.contains(coord) {
            return None;
        }
        let index = coord.y as usize * self.width as usize + coord.x as usize;
        self.tiles.get(index).copied()
    }

    /// Tile classification, `None` outside the grid.
    pub fn kind(&self, coord: GridCoord) -> Option<TileKind> {
        self.code(coord).map(TileKind::from_code)
    }

    /// True for open floor inside the grid.
    pub fn is_open(&self, coord: GridCoord) -> bool {
        self.kind(coord).is_some_and(TileKind::is_open)
    }

    /// Every tile with its coordinate, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (GridCoord, u16)> + '_ {
        let width = self.width as usize;
        self.tiles.iter().enumerate().map(move |(index, code)| {
            (
                GridCoord::new((index % width) as i32, (index / width) as i32),
                *code,
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_ragged_rows() {
        let err = Grid::from_rows(vec![vec![1, 1, 1], vec![1, 0]]).unwrap_err();
        assert_eq!(
            err,
            GridError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            }
        );
        assert_eq!(err.error_code(), "GRID_RAGGED_ROW");
        assert_eq!(Grid::from_rows(Vec::new()), Err(GridError::Empty));
    }

    #[test]
    fn out_of_bounds_has_no_kind() {
        let grid = Grid::from_rows(vec![vec![1, 1], vec![0, 6]]).unwrap();
        assert_eq!(grid.kind(GridCoord::new(0, 1)), Some(TileKind::Open));
        assert_eq!(grid.kind(GridCoord::new(1, 1)), Some(TileKind::Door));
        assert_eq!(grid.kind(GridCoord::new(1, 0)), Some(TileKind::Wall(1)));
        assert_eq!(grid.kind(GridCoord::new(2, 0)), None);
        assert_eq!(grid.kind(GridCoord::new(-1, 0)), None);
        assert!(!grid.is_open(GridCoord::new(5, 5)));
    }

    #[test]
    fn cells_are_row_major() {
        let grid = Grid::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
        let cells: Vec<_> = grid.cells().collect();
        assert_eq!(cells[1], (GridCoord::new(1, 0), 2));
        assert_eq!(cells[2], (GridCoord::new(0, 1), 3));
    }
}
