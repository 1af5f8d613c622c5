use crate::config::{LightingConfig, ViewConfig};
use crate::geometry::{Vec2, normalize_angle};
use crate::raycast::HitSide;

/// Viewpoint plus the screen it projects onto.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec2,
    /// View axis in radians.
    pub angle: f32,
    /// Horizontal field of view in radians.
    pub fov: f32,
    pub width: u32,
    pub height: u32,
    pub eye_height: f32,
}

impl Camera {
    pub fn new(position: Vec2, angle: f32, view: &ViewConfig, width: u32, height: u32) -> Self {
        Self {
            position,
            angle,
            fov: view.fov_radians(),
            width: width.max(1),
            height: height.max(1),
            eye_height: view.eye_height,
        }
    }

    pub fn half_fov(&self) -> f32 {
        self.fov * 0.5
    }

    /// World angle of the ray through screen column `column`.
    pub fn ray_angle(&self, column: u32) -> f32 {
        self.angle - self.half_fov() + column as f32 * (self.fov / self.width as f32)
    }

    /// Screen column (fractional) for a view-relative angle.
    pub fn column_of(&self, relative_angle: f32) -> f32 {
        (relative_angle + self.half_fov()) / self.fov * self.width as f32
    }

    /// Column under the crosshair.
    pub fn center_column(&self) -> u32 {
        self.width / 2
    }

    /// Angle from the view axis to `point`, in `(-π, π]`.
    pub fn relative_angle(&self, point: Vec2) -> f32 {
        normalize_angle((point - self.position).angle() - self.angle)
    }
}

/// Brightness of a wall hit in `[ambient, 1]`.
///
/// Falls off linearly to the ambient floor at the falloff radius; hits on
/// horizontal faces are additionally darkened.
pub fn wall_brightness(lighting: &LightingConfig, distance: f32, side: HitSide) -> f32 {
    let shade = 1.0 - (distance / lighting.falloff_radius.max(f32::EPSILON)).min(1.0);
    let brightness = lighting.ambient + shade * (1.0 - lighting.ambient);
    match side {
        HitSide::Vertical => brightness,
        HitSide::Horizontal => brightness * lighting.horizontal_side_factor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera::new(Vec2::new(1.5, 1.5), 0.0, &ViewConfig::default(), 320, 200)
    }

    #[test]
    fn center_column_looks_down_the_axis() {
        let cam = camera();
        assert!(cam.ray_angle(cam.center_column()).abs() < 1e-6);
        assert!((cam.column_of(0.0) - 160.0).abs() < 1e-3);
        assert!((cam.ray_angle(0) + cam.half_fov()).abs() < 1e-6);
    }

    #[test]
    fn brightness_never_reaches_black() {
        let lighting = LightingConfig::default();
        let near = wall_brightness(&lighting, 0.0, HitSide::Vertical);
        let far = wall_brightness(&lighting, 100.0, HitSide::Vertical);
        assert!((near - 1.0).abs() < 1e-6);
        assert!((far - lighting.ambient).abs() < 1e-6);
        assert!(wall_brightness(&lighting, 100.0, HitSide::Horizontal) > 0.0);
        assert!(
            wall_brightness(&lighting, 2.0, HitSide::Horizontal)
                < wall_brightness(&lighting, 2.0, HitSide::Vertical)
        );
    }
}
