//! Per-column wall casting and texturing.
use crate::config::LightingConfig;
use crate::geometry::GridCoord;
use crate::grid::TileKind;
use crate::raycast::{CellProbe, HitSide, Occluders, Traversal, perpendicular_distance};

use super::camera::{Camera, wall_brightness};
use super::floor;
use super::frame::{DepthBuffer, FrameBuffer};
use super::texture::{Rgba, TextureOracle};

/// Flat color for walls whose texture is missing.
const MISSING_WALL: Rgba = Rgba::rgb(128, 128, 128);
/// Closest a wall may get before the slice height is clamped.
const MIN_DEPTH: f32 = 1e-4;

/// Result of casting the ray for one screen column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColumnCast {
    pub angle: f32,
    pub hit: Option<CellProbe>,
    /// Cell the ray was in just before the hit.
    pub previous: GridCoord,
    /// Fisheye-corrected distance, infinite when nothing was hit.
    pub depth: f32,
}

/// Casts the ray through `column` and corrects its distance.
pub fn cast_column(camera: &Camera, occluders: &Occluders<'_>, column: u32) -> ColumnCast {
    let angle = camera.ray_angle(column);
    let mut previous = camera.position.cell();
    let mut traversal = Traversal::from_angle(occluders.grid, camera.position, angle);
    let direction = traversal.direction();
    let hit = traversal.find_map(|entry| {
        let hit = occluders.hit(&entry, direction);
        if hit.is_none() {
            previous = entry.cell;
        }
        hit
    });
    let depth = hit
        .map(|probe| perpendicular_distance(probe.distance, angle, camera.angle).max(MIN_DEPTH))
        .unwrap_or(f32::INFINITY);
    ColumnCast {
        angle,
        hit,
        previous,
        depth,
    }
}

/// Draws walls, floor and ceiling for every column and fills `depth`.
pub fn render_walls<T>(
    camera: &Camera,
    occluders: &Occluders<'_>,
    textures: &T,
    lighting: &LightingConfig,
    frame: &mut FrameBuffer,
    depth: &mut DepthBuffer,
) where
    T: TextureOracle + ?Sized,
{
    let half = camera.height as i32 / 2;
    for column in 0..camera.width {
        let cast = cast_column(camera, occluders, column);
        depth.set(column, cast.depth);

        let (top, bottom) = match cast.hit {
            Some(hit) => {
                let line = (camera.height as f32 / cast.depth) as i32;
                let top = half - line / 2;
                let bottom = half + line / 2;
                draw_slice(camera, occluders, textures, lighting, column, &cast, hit, top, bottom, frame);
                (top, bottom)
            }
            None => (half, half),
        };

        floor::paint_column(camera, column, cast.angle, top, bottom, textures, lighting, frame);
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_slice<T>(
    camera: &Camera,
    occluders: &Occluders<'_>,
    textures: &T,
    lighting: &LightingConfig,
    column: u32,
    cast: &ColumnCast,
    hit: CellProbe,
    top: i32,
    bottom: i32,
    frame: &mut FrameBuffer,
) where
    T: TextureOracle + ?Sized,
{
    let code = occluders.grid.code(hit.cell).unwrap_or(0);
    let direction = crate::geometry::Vec2::from_angle(cast.angle);

    let (texture, u) = match TileKind::from_code(code) {
        TileKind::Door => {
            let open = occluders
                .doors
                .get(hit.cell)
                .map(|door| door.open_amount)
                .unwrap_or(0.0);
            (textures.wall(code), (hit.local - open).max(0.0))
        }
        _ => {
            let mut u = hit.local;
            let flip = match hit.side {
                HitSide::Vertical => direction.x > 0.0,
                HitSide::Horizontal => direction.y < 0.0,
            };
            if flip {
                u = 1.0 - u;
            }
            let through_door = occluders.grid.kind(cast.previous) == Some(TileKind::Door);
            let texture = if through_door {
                textures.door_frame().or_else(|| textures.wall(code))
            } else {
                textures.wall(code)
            };
            (texture, u)
        }
    };

    let brightness = wall_brightness(lighting, cast.depth, hit.side);
    let line = (bottom - top).max(1) as f32;
    let x = column as i32;
    let from = top.max(0);
    let to = bottom.min(camera.height as i32);

    match texture {
        Some(texture) => {
            for y in from..to {
                let v = (y - top) as f32 / line;
                frame.put(x, y, texture.sample(u, v).shade(brightness));
            }
        }
        None => {
            let color = MISSING_WALL.shade(brightness);
            for y in from..to {
                frame.put(x, y, color);
            }
        }
    }
}
