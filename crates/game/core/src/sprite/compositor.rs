//! Billboard projection and depth-tested drawing.
use crate::geometry::Vec2;
use crate::render::{Camera, DepthBuffer, FrameBuffer, TextureOracle};

use super::{SpriteId, SpriteList};

/// Screen-space footprint of a billboard.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteProjection {
    /// Fractional screen column of the sprite's center.
    pub center: f32,
    /// Euclidean distance from the camera.
    pub distance: f32,
    /// Distance along the view axis, compared against the depth buffer.
    pub depth: f32,
    pub width: f32,
    pub height: f32,
}

impl SpriteProjection {
    pub fn left(&self) -> i32 {
        (self.center - self.width / 2.0) as i32
    }

    pub fn right(&self) -> i32 {
        (self.center + self.width / 2.0) as i32
    }

    /// Whether `column` falls inside the centered band covering `fraction`
    /// of the sprite's width.
    pub fn band_contains(&self, column: f32, fraction: f32) -> bool {
        (column - self.center).abs() < self.width * fraction / 2.0
    }
}

/// Projects a billboard at `position` with texture `aspect` (width/height).
///
/// Returns `None` for sprites outside the field of view or closer than `near`.
pub fn project(camera: &Camera, position: Vec2, aspect: f32, near: f32) -> Option<SpriteProjection> {
    let distance = camera.position.distance(position);
    if distance < near {
        return None;
    }
    let relative = camera.relative_angle(position);
    if relative.abs() > camera.half_fov() {
        return None;
    }
    let depth = distance * relative.cos();
    let height = camera.height as f32 / depth;
    Some(SpriteProjection {
        center: camera.column_of(relative),
        distance,
        depth,
        width: height * aspect,
        height,
    })
}

/// A sprite that made it onto the screen this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibleSprite {
    pub id: SpriteId,
    pub projection: SpriteProjection,
}

/// Draws active sprites far to near; each column is drawn only in front of
/// the wall recorded in `depth`. Sprites whose texture is missing are skipped.
pub fn render_sprites<T>(
    camera: &Camera,
    sprites: &SpriteList,
    textures: &T,
    depth: &DepthBuffer,
    near: f32,
    frame: &mut FrameBuffer,
) -> Vec<VisibleSprite>
where
    T: TextureOracle + ?Sized,
{
    let mut order: Vec<_> = sprites
        .active()
        .map(|sprite| (camera.position.distance_squared(sprite.position), sprite))
        .collect();
    order.sort_by(|a, b| b.0.total_cmp(&a.0));

    let half = camera.height as f32 / 2.0;
    let mut visible = Vec::new();
    for (_, sprite) in order {
        let Some(texture) = textures.sprite(sprite.texture) else {
            continue;
        };
        let Some(projection) = project(camera, sprite.position, texture.aspect(), near) else {
            continue;
        };

        let left = projection.center - projection.width / 2.0;
        let top = half - projection.height / 2.0;
        let mut drawn = false;
        for x in projection.left().max(0)..projection.right().min(camera.width as i32) {
            if projection.depth >= depth.get(x) {
                continue;
            }
            let u = (x as f32 - left) / projection.width;
            if !(0.0..1.0).contains(&u) {
                continue;
            }
            drawn = true;
            let y_from = (top as i32).max(0);
            let y_to = ((half + projection.height / 2.0) as i32).min(camera.height as i32);
            for y in y_from..y_to {
                let v = (y as f32 - top) / projection.height;
                let texel = texture.sample(u, v);
                if !texel.is_transparent() {
                    frame.put(x, y, texel);
                }
            }
        }
        if drawn {
            visible.push(VisibleSprite {
                id: sprite.id,
                projection,
            });
        }
    }
    visible
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewConfig;
    use crate::render::{Rgba, SpriteTexture, Texture};
    use crate::sprite::SpriteKind;

    struct OneSprite(Texture);

    impl TextureOracle for OneSprite {
        fn wall(&self, _code: u16) -> Option<&Texture> {
            None
        }
        fn sprite(&self, _key: SpriteTexture) -> Option<&Texture> {
            Some(&self.0)
        }
    }

    fn camera() -> Camera {
        Camera::new(Vec2::new(0.5, 0.5), 0.0, &ViewConfig::default(), 40, 20)
    }

    #[test]
    fn behind_the_viewer_is_culled() {
        let cam = camera();
        assert!(project(&cam, Vec2::new(-3.0, 0.5), 1.0, 0.1).is_none());
        assert!(project(&cam, Vec2::new(0.55, 0.5), 1.0, 0.1).is_none());
        let p = project(&cam, Vec2::new(4.5, 0.5), 1.0, 0.1).unwrap();
        assert!((p.center - 20.0).abs() < 1e-3);
        assert!((p.height - 5.0).abs() < 1e-3);
        assert!(p.band_contains(20.0, 0.27));
        assert!(!p.band_contains(22.0, 0.27));
    }

    #[test]
    fn walls_occlude_per_column() {
        let cam = camera();
        let red = Rgba::rgb(255, 0, 0);
        let textures = OneSprite(Texture::solid(4, 4, red));
        let mut sprites = SpriteList::new();
        sprites.add(Vec2::new(2.5, 0.5), SpriteTexture::Decoration('X'), SpriteKind::Decoration);

        let mut depth = DepthBuffer::new(40);
        for column in 0..40 {
            depth.set(column, if column < 20 { 1.0 } else { 10.0 });
        }
        let mut frame = FrameBuffer::new(40, 20);
        let visible = render_sprites(&cam, &sprites, &textures, &depth, 0.1, &mut frame);

        assert_eq!(visible.len(), 1);
        assert_eq!(frame.get(19, 10), Some(Rgba::BLACK));
        assert_eq!(frame.get(21, 10), Some(red));
    }

    #[test]
    fn nearer_sprite_wins() {
        let cam = camera();
        let textures = OneSprite(Texture::solid(4, 4, Rgba::rgb(0, 255, 0)));
        let mut sprites = SpriteList::new();
        let far = sprites.add(Vec2::new(6.5, 0.5), SpriteTexture::Decoration('F'), SpriteKind::Decoration);
        let near = sprites.add(Vec2::new(2.5, 0.5), SpriteTexture::Decoration('N'), SpriteKind::Decoration);
        let depth = DepthBuffer::new(40);
        let mut frame = FrameBuffer::new(40, 20);
        let visible = render_sprites(&cam, &sprites, &textures, &depth, 0.1, &mut frame);
        let ids: Vec<_> = visible.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![far, near]);
    }
}
