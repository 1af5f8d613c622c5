use arrayvec::ArrayVec;

use crate::geometry::Vec2;
use crate::grid::{DoorMap, DoorRule, Grid, TileKind};

use super::{CellProbe, Traversal};

/// Number of sample points used for enemy sight rays.
pub const SIGHT_SAMPLES: usize = 5;

/// Door-aware opacity of the static grid.
#[derive(Clone, Copy, Debug)]
pub struct Occluders<'a> {
    pub grid: &'a Grid,
    pub doors: &'a DoorMap,
    pub rule: DoorRule,
}

impl<'a> Occluders<'a> {
    pub fn new(grid: &'a Grid, doors: &'a DoorMap, rule: DoorRule) -> Self {
        Self { grid, doors, rule }
    }

    /// Same grid and doors judged by another rule.
    pub fn with_rule(self, rule: DoorRule) -> Self {
        Self { rule, ..self }
    }

    /// The hit a ray travelling along unit `direction` makes in the cell it
    /// just entered, `None` when it passes on. Door leaves stand on the cell's
    /// midline, so the returned hit for a door is the recessed crossing.
    pub fn hit(&self, entry: &CellProbe, direction: Vec2) -> Option<CellProbe> {
        match self.grid.kind(entry.cell) {
            None | Some(TileKind::Wall(_)) => Some(*entry),
            Some(TileKind::Open) => None,
            Some(TileKind::Door) => {
                let Some(door) = self.doors.get(entry.cell) else {
                    tracing::error!(cell = %entry.cell, "door tile without door state");
                    return Some(*entry);
                };
                let face = entry.recessed(direction)?;
                self.rule.blocks(door, face.local).then_some(face)
            }
        }
    }

    /// First hit along the ray, `None` if it leaves the grid.
    pub fn cast(&self, origin: Vec2, direction: Vec2) -> Option<CellProbe> {
        let mut traversal = Traversal::new(self.grid, origin, direction);
        let direction = traversal.direction();
        traversal.find_map(|entry| self.hit(&entry, direction))
    }

    /// True when nothing blocks the segment from `from` to the cell holding `to`.
    pub fn line_of_sight(&self, from: Vec2, to: Vec2) -> bool {
        let target = to.cell();
        if from.cell() == target {
            return true;
        }
        let Some(direction) = (to - from).normalized() else {
            return true;
        };
        let length = from.distance(to);
        for probe in Traversal::new(self.grid, from, direction) {
            if probe.distance > length || probe.cell == target {
                return true;
            }
            if self.hit(&probe, direction).is_some() {
                return false;
            }
        }
        false
    }

    /// Line of sight from any of [`SIGHT_SAMPLES`] points around `from`.
    ///
    /// The samples are the center plus four points `offset` away along the
    /// axes, which lets a watcher standing near a corner peek past it.
    pub fn line_of_sight_sampled(&self, from: Vec2, to: Vec2, offset: f32) -> bool {
        sample_points(from, offset)
            .into_iter()
            .any(|sample| self.line_of_sight(sample, to))
    }
}

fn sample_points(center: Vec2, offset: f32) -> ArrayVec<Vec2, SIGHT_SAMPLES> {
    let mut points = ArrayVec::new();
    points.push(center);
    points.push(center + Vec2::new(offset, 0.0));
    points.push(center + Vec2::new(-offset, 0.0));
    points.push(center + Vec2::new(0.0, offset));
    points.push(center + Vec2::new(0.0, -offset));
    points
}
