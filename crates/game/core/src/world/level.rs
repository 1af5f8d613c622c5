//! Level description handed to [`World::new`](super::World::new).
use crate::error::{ErrorSeverity, GameError};
use crate::geometry::{GridCoord, Vec2};
use crate::grid::GridError;
use crate::pickup::PickupKind;

/// Sprite placed on the map by a letter token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlacementKind {
    Pickup(PickupKind),
    /// Non-interactive scenery, keyed by its map letter.
    Decoration(char),
}

impl PlacementKind {
    /// Classifies a map letter: known pickup letters first, anything else is scenery.
    pub fn from_map_letter(letter: char) -> Self {
        PickupKind::from_map_letter(letter).map_or(Self::Decoration(letter), Self::Pickup)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub cell: GridCoord,
    pub kind: PlacementKind,
}

/// Everything needed to build a [`World`](super::World), as produced by the
/// content loaders.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LevelData {
    pub name: String,
    /// Row-major tile codes.
    pub rows: Vec<Vec<u16>>,
    pub spawn: Vec2,
    /// Initial facing in radians.
    pub spawn_angle: f32,
    pub placements: Vec<Placement>,
    pub enemy_spawns: Vec<Vec2>,
}

impl LevelData {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<u16>>, spawn: Vec2, spawn_angle: f32) -> Self {
        Self {
            name: name.into(),
            rows,
            spawn,
            spawn_angle,
            placements: Vec::new(),
            enemy_spawns: Vec::new(),
        }
    }

    pub fn with_placement(mut self, cell: GridCoord, kind: PlacementKind) -> Self {
        self.placements.push(Placement { cell, kind });
        self
    }

    pub fn with_enemy(mut self, position: Vec2) -> Self {
        self.enemy_spawns.push(position);
        self
    }
}

/// Reasons a level is rejected at load.
///
/// Only problems that leave no sensible world are errors; misplaced sprites
/// and enemies are logged and skipped instead.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum LevelError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("player spawn {0} is not on an open tile")]
    SpawnBlocked(Vec2),

    #[error("door map does not match the door tiles of the grid")]
    DoorMismatch,
}

impl GameError for LevelError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Grid(error) => error.severity(),
            Self::SpawnBlocked(_) => ErrorSeverity::Validation,
            Self::DoorMismatch => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Grid(error) => error.error_code(),
            Self::SpawnBlocked(_) => "LEVEL_SPAWN_BLOCKED",
            Self::DoorMismatch => "LEVEL_DOOR_MISMATCH",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::KeyColor;

    #[test]
    fn letters_split_into_pickups_and_scenery() {
        assert_eq!(
            PlacementKind::from_map_letter('B'),
            PlacementKind::Pickup(PickupKind::Key(KeyColor::Blue))
        );
        assert_eq!(PlacementKind::from_map_letter('T'), PlacementKind::Decoration('T'));
    }

    #[test]
    fn grid_errors_keep_their_codes() {
        let error = LevelError::from(GridError::Empty);
        assert_eq!(error.error_code(), "GRID_EMPTY");
        assert_eq!(error.severity(), ErrorSeverity::Validation);
        assert_eq!(LevelError::DoorMismatch.severity(), ErrorSeverity::Internal);
    }
}
