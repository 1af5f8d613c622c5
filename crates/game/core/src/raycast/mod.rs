//! Grid traversal shared by the renderer, line of sight, hit-scan and movement.
//!
//! [`Traversal`] walks every cell a ray enters using the Amanatides–Woo DDA
//! and yields one [`CellProbe`] per cell. Callers decide what blocks; the
//! common door-aware decision lives in [`Occluders`].
mod predicate;

pub use predicate::{Occluders, SIGHT_SAMPLES};

use crate::geometry::{GridCoord, Vec2, fract};
use crate::grid::Grid;

/// Which kind of grid line the ray crossed to enter a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HitSide {
    /// Crossed a vertical line (x step). The face normal is along X.
    Vertical,
    /// Crossed a horizontal line (y step). The face normal is along Y.
    Horizontal,
}

/// A cell entered by a ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellProbe {
    pub cell: GridCoord,
    pub side: HitSide,
    /// Position of the crossing along the entered edge, in `[0, 1)`.
    pub local: f32,
    /// Distance from the origin to the crossing along the ray.
    pub distance: f32,
    /// World-space crossing point.
    pub point: Vec2,
}

impl CellProbe {
    /// The crossing carried half a tile further along `direction`, onto the
    /// plane through the cell's center where door leaves sit. `None` when the
    /// ray leaves through a side of the cell before reaching that plane.
    pub fn recessed(&self, direction: Vec2) -> Option<CellProbe> {
        let across = match self.side {
            HitSide::Vertical => direction.x,
            HitSide::Horizontal => direction.y,
        }
        .abs();
        if across == 0.0 {
            return None;
        }
        let extra = 0.5 / across;
        let point = self.point + direction * extra;
        let (along, row) = match self.side {
            HitSide::Vertical => (point.y, self.cell.y),
            HitSide::Horizontal => (point.x, self.cell.x),
        };
        if along.floor() as i32 != row {
            return None;
        }
        Some(CellProbe {
            local: fract(along),
            distance: self.distance + extra,
            point,
            ..*self
        })
    }
}

/// Iterator over the cells a ray enters, in order, until it leaves the grid.
///
/// The origin cell itself is never yielded.
#[derive(Clone, Debug)]
pub struct Traversal<'g> {
    grid: &'g Grid,
    origin: Vec2,
    direction: Vec2,
    cell: GridCoord,
    step_x: i32,
    step_y: i32,
    delta: Vec2,
    side_dist: Vec2,
    finished: bool,
}

impl<'g> Traversal<'g> {
    /// Starts a traversal. A zero `direction` yields nothing.
    pub fn new(grid: &'g Grid, origin: Vec2, direction: Vec2) -> Self {
        let (direction, finished) = match direction.normalized() {
            Some(unit) => (unit, false),
            None => (Vec2::ZERO, true),
        };
        let cell = origin.cell();

        let delta_x = if direction.x == 0.0 {
            f32::INFINITY
        } else {
            (1.0 / direction.x).abs()
        };
        let delta_y = if direction.y == 0.0 {
            f32::INFINITY
        } else {
            (1.0 / direction.y).abs()
        };

        let (step_x, side_x) = if direction.x < 0.0 {
            (-1, (origin.x - cell.x as f32) * delta_x)
        } else {
            (1, (cell.x as f32 + 1.0 - origin.x) * delta_x)
        };
        let (step_y, side_y) = if direction.y < 0.0 {
            (-1, (origin.y - cell.y as f32) * delta_y)
        } else {
            (1, (cell.y as f32 + 1.0 - origin.y) * delta_y)
        };

        Self {
            grid,
            origin,
            direction,
            cell,
            step_x,
            step_y,
            delta: Vec2::new(delta_x, delta_y),
            // 0 * inf is NaN for an axis the ray never crosses
            side_dist: Vec2::new(
                if direction.x == 0.0 { f32::INFINITY } else { side_x },
                if direction.y == 0.0 { f32::INFINITY } else { side_y },
            ),
            finished,
        }
    }

    /// Starts a traversal along `angle` (radians).
    pub fn from_angle(grid: &'g Grid, origin: Vec2, angle: f32) -> Self {
        Self::new(grid, origin, Vec2::from_angle(angle))
    }

    /// Unit direction of the ray.
    pub fn direction(&self) -> Vec2 {
        self.direction
    }
}

impl Iterator for Traversal<'_> {
    type Item = CellProbe;

    fn next(&mut self) -> Option<CellProbe> {
        if self.finished {
            return None;
        }

        let (side, distance) = if self.side_dist.x < self.side_dist.y {
            let distance = self.side_dist.x;
            self.side_dist.x += self.delta.x;
            self.cell.x += self.step_x;
            (HitSide::Vertical, distance)
        } else {
            let distance = self.side_dist.y;
            self.side_dist.y += self.delta.y;
            self.cell.y += self.step_y;
            (HitSide::Horizontal, distance)
        };

        if !self.grid.contains(self.cell) {
            self.finished = true;
            return None;
        }

        let point = self.origin + self.direction * distance;
        let local = match side {
            HitSide::Vertical => fract(point.y),
            HitSide::Horizontal => fract(point.x),
        };

        Some(CellProbe {
            cell: self.cell,
            side,
            local,
            distance,
            point,
        })
    }
}

/// Marches from `origin` along `direction` and returns the first cell for
/// which `is_blocking` holds, or `None` if the ray leaves the grid.
pub fn march<F>(grid: &Grid, origin: Vec2, direction: Vec2, mut is_blocking: F) -> Option<CellProbe>
where
    F: FnMut(&CellProbe) -> bool,
{
    Traversal::new(grid, origin, direction).find(|probe| is_blocking(probe))
}

/// Removes fisheye distortion from a raw ray distance.
#[inline]
pub fn perpendicular_distance(raw: f32, ray_angle: f32, view_angle: f32) -> f32 {
    raw * (ray_angle - view_angle).cos()
}
