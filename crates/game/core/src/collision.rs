//! Axis-separated movement against the tile grid.
//!
//! Each axis is tested on its own against the tiles the body's leading edge
//! would enter. A blocked axis leaves that coordinate untouched, so bodies
//! slide along walls instead of sticking to them.
use crate::geometry::{GridCoord, Vec2, fract};
use crate::grid::{DoorMap, DoorRule, Grid, TileKind};

/// Keeps a body resting exactly on a tile boundary out of the next tile.
const EDGE_EPSILON: f32 = 1e-4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

/// What a probed step runs into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Probe {
    Clear,
    /// Solid wall or the edge of the grid.
    Wall,
    /// A door that is not open enough, with its coordinate.
    Door(GridCoord),
}

impl Probe {
    pub fn is_clear(self) -> bool {
        matches!(self, Self::Clear)
    }

    /// Walls dominate doors, doors dominate clear space.
    fn worst(self, other: Self) -> Self {
        match (self, other) {
            (Self::Wall, _) | (_, Self::Wall) => Self::Wall,
            (door @ Self::Door(_), _) | (_, door @ Self::Door(_)) => door,
            _ => Self::Clear,
        }
    }
}

/// Where a body ended up and what each axis ran into.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoveOutcome {
    pub position: Vec2,
    pub x: Probe,
    pub y: Probe,
}

/// Square bodies against the grid and its doors.
#[derive(Clone, Copy, Debug)]
pub struct Collider<'a> {
    grid: &'a Grid,
    doors: &'a DoorMap,
    rule: DoorRule,
}

impl<'a> Collider<'a> {
    pub fn new(grid: &'a Grid, doors: &'a DoorMap, rule: DoorRule) -> Self {
        Self { grid, doors, rule }
    }

    /// Probes moving `delta` along `axis` from `position` for a square body
    /// with half-side `half_extent`.
    pub fn probe_axis(&self, position: Vec2, half_extent: f32, delta: f32, axis: Axis) -> Probe {
        if delta == 0.0 {
            return Probe::Clear;
        }
        let lead = if delta > 0.0 { half_extent } else { -half_extent };
        let (edge, low, high) = match axis {
            Axis::X => (position.x + delta + lead, position.y - half_extent, position.y + half_extent),
            Axis::Y => (position.y + delta + lead, position.x - half_extent, position.x + half_extent),
        };
        let column = edge.floor() as i32;
        let mut outcome = Probe::Clear;
        for across in [low, high - EDGE_EPSILON] {
            let row = across.floor() as i32;
            let cell = match axis {
                Axis::X => GridCoord::new(column, row),
                Axis::Y => GridCoord::new(row, column),
            };
            outcome = outcome.worst(self.probe_cell(cell, fract(across)));
        }
        outcome
    }

    /// Classifies one tile for a body crossing its edge at `local`.
    pub fn probe_cell(&self, cell: GridCoord, local: f32) -> Probe {
        match self.grid.kind(cell) {
            None | Some(TileKind::Wall(_)) => Probe::Wall,
            Some(TileKind::Open) => Probe::Clear,
            Some(TileKind::Door) => match self.doors.get(cell) {
                Some(door) if self.rule.blocks(door, local) => Probe::Door(cell),
                Some(_) => Probe::Clear,
                None => {
                    tracing::error!(%cell, "door tile without door state");
                    Probe::Wall
                }
            },
        }
    }

    /// Probes a whole step at once; the result is the worst of both axes.
    pub fn probe_step(&self, position: Vec2, half_extent: f32, motion: Vec2) -> Probe {
        let x = self.probe_axis(position, half_extent, motion.x, Axis::X);
        let y = self.probe_axis(position, half_extent, motion.y, Axis::Y);
        x.worst(y)
    }

    /// Moves X then Y independently. A clear axis is still rejected when
    /// `rejects` returns true for the candidate position.
    pub fn resolve<F>(&self, position: Vec2, half_extent: f32, motion: Vec2, mut rejects: F) -> MoveOutcome
    where
        F: FnMut(Vec2) -> bool,
    {
        let mut current = position;

        let x = self.probe_axis(current, half_extent, motion.x, Axis::X);
        if x.is_clear() && motion.x != 0.0 {
            let candidate = Vec2::new(current.x + motion.x, current.y);
            if !rejects(candidate) {
                current = candidate;
            }
        }

        let y = self.probe_axis(current, half_extent, motion.y, Axis::Y);
        if y.is_clear() && motion.y != 0.0 {
            let candidate = Vec2::new(current.x, current.y + motion.y);
            if !rejects(candidate) {
                current = candidate;
            }
        }

        MoveOutcome {
            position: current,
            x,
            y,
        }
    }
}

/// Overlap test for axis-aligned squares given by center and half-side.
pub fn squares_overlap(a: Vec2, a_half: f32, b: Vec2, b_half: f32) -> bool {
    (a.x - b.x).abs() < a_half + b_half && (a.y - b.y).abs() < a_half + b_half
}
