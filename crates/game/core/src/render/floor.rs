//! Floor and ceiling by inverse perspective mapping.
use crate::config::LightingConfig;
use crate::geometry::Vec2;

use super::camera::Camera;
use super::frame::FrameBuffer;
use super::texture::{Texture, TextureOracle};

/// Paints the floor below `bottom` and the ceiling above `top` in one column.
///
/// `top`/`bottom` bound the wall slice and may lie outside the screen.
#[allow(clippy::too_many_arguments)]
pub fn paint_column<T>(
    camera: &Camera,
    column: u32,
    ray_angle: f32,
    top: i32,
    bottom: i32,
    textures: &T,
    lighting: &LightingConfig,
    frame: &mut FrameBuffer,
) where
    T: TextureOracle + ?Sized,
{
    let height = camera.height as i32;
    let x = column as i32;
    let direction = Vec2::from_angle(ray_angle);
    let cos = (ray_angle - camera.angle).cos().max(f32::EPSILON);

    let floor_from = bottom.clamp(0, height);
    match textures.floor() {
        Some(texture) => {
            for y in floor_from..height {
                let offset = y as f32 / camera.height as f32 - 0.5;
                let color = surface_texel(camera, texture, direction, cos, offset)
                    .unwrap_or(lighting.floor_color);
                frame.put(x, y, color);
            }
        }
        None => {
            for y in floor_from..height {
                frame.put(x, y, lighting.floor_color);
            }
        }
    }

    let ceiling_to = top.clamp(0, height);
    match textures.ceiling() {
        Some(texture) => {
            for y in 0..ceiling_to {
                let offset = 0.5 - y as f32 / camera.height as f32;
                let color = surface_texel(camera, texture, direction, cos, offset)
                    .unwrap_or(lighting.ceiling_color);
                frame.put(x, y, color);
            }
        }
        None => {
            for y in 0..ceiling_to {
                frame.put(x, y, lighting.ceiling_color);
            }
        }
    }
}

/// Texel of a horizontal surface seen `offset` (fraction of screen height)
/// away from the horizon. `None` at or behind the horizon.
fn surface_texel(
    camera: &Camera,
    texture: &Texture,
    direction: Vec2,
    cos: f32,
    offset: f32,
) -> Option<super::texture::Rgba> {
    if offset <= 0.0 {
        return None;
    }
    let row_distance = camera.eye_height / offset / cos;
    let world = camera.position + direction * row_distance;
    Some(texture.sample_tiled(world.x, world.y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewConfig;
    use crate::render::texture::{Rgba, SpriteTexture};

    struct Checker(Texture);

    impl TextureOracle for Checker {
        fn wall(&self, _code: u16) -> Option<&Texture> {
            None
        }
        fn floor(&self) -> Option<&Texture> {
            Some(&self.0)
        }
        fn sprite(&self, _key: SpriteTexture) -> Option<&Texture> {
            None
        }
    }

    #[test]
    fn flat_colors_without_textures() {
        let camera = Camera::new(Vec2::new(1.5, 1.5), 0.0, &ViewConfig::default(), 4, 10);
        let lighting = LightingConfig::default();
        let mut frame = FrameBuffer::new(4, 10);
        paint_column(&camera, 1, 0.0, 4, 6, &crate::render::NoTextures, &lighting, &mut frame);
        assert_eq!(frame.get(1, 0), Some(lighting.ceiling_color));
        assert_eq!(frame.get(1, 3), Some(lighting.ceiling_color));
        assert_eq!(frame.get(1, 5), Some(Rgba::BLACK));
        assert_eq!(frame.get(1, 9), Some(lighting.floor_color));
    }

    #[test]
    fn floor_rows_land_at_expected_distance() {
        // Row at 3/4 of the screen is eye_height / 0.25 = 2 tiles ahead.
        let camera = Camera::new(Vec2::new(0.5, 0.5), 0.0, &ViewConfig::default(), 1, 8);
        let texture = Texture::from_fn(4, 4, |x, _| Rgba::rgb(x as u8 * 10, 0, 0));
        let checker = Checker(texture);
        let mut frame = FrameBuffer::new(1, 8);
        paint_column(&camera, 0, 0.0, 4, 4, &checker, &LightingConfig::default(), &mut frame);
        // world x = 2.5 -> frac 0.5 -> texel 2
        assert_eq!(frame.get(0, 6), Some(Rgba::rgb(20, 0, 0)));
    }
}
