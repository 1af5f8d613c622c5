//! Pixel data and the lookup the renderer uses to find it.
//!
//! Textures are owned by whoever implements [`TextureOracle`]. The core only
//! borrows them for the duration of a render call and never keeps handles.
use crate::pickup::PickupKind;

/// 8-bit RGBA color. Alpha 0 is fully transparent in sprites.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Multiplies the color channels by `factor` (clamped to `[0, 1]`).
    pub fn shade(self, factor: f32) -> Self {
        let f = factor.clamp(0.0, 1.0);
        let scale = |c: u8| (c as f32 * f).round() as u8;
        Self::new(scale(self.r), scale(self.g), scale(self.b), self.a)
    }
}

/// Row-major pixel grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Texture {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl Texture {
    /// Wraps `pixels`, or returns `None` if the size does not match.
    pub fn new(width: u32, height: u32, pixels: Vec<Rgba>) -> Option<Self> {
        if width == 0 || height == 0 || pixels.len() != (width * height) as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    /// A single-color texture.
    pub fn solid(width: u32, height: u32, color: Rgba) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            pixels: vec![color; (width * height) as usize],
        }
    }

    /// Builds a texture by evaluating `f(x, y)` for every texel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> Rgba) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let mut pixels = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Width over height.
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Texel at integer coordinates, clamped to the edges.
    pub fn texel(&self, x: u32, y: u32) -> Rgba {
        let x = x.min(self.width - 1);
        let y = y.min(self.height - 1);
        self.pixels[(y * self.width + x) as usize]
    }

    /// Texel at normalized coordinates, clamped to `[0, 1)`.
    pub fn sample(&self, u: f32, v: f32) -> Rgba {
        let x = (u.clamp(0.0, 1.0) * self.width as f32) as u32;
        let y = (v.clamp(0.0, 1.0) * self.height as f32) as u32;
        self.texel(x, y)
    }

    /// Texel at world-space coordinates, tiled by integer wraparound.
    pub fn sample_tiled(&self, u: f32, v: f32) -> Rgba {
        let x = ((u * self.width as f32).floor() as i64).rem_euclid(self.width as i64) as u32;
        let y = ((v * self.height as f32).floor() as i64).rem_euclid(self.height as i64) as u32;
        self.texel(x, y)
    }
}

/// Identifies the image a sprite shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteTexture {
    Pickup(PickupKind),
    /// A map decoration, by its map letter.
    Decoration(char),
    /// Enemy sheet frame seen from one of eight octants.
    Enemy { frame: u8, octant: u8 },
}

/// Resolves texture keys to pixels.
///
/// Every lookup may fail. Missing walls render as flat shaded gray, missing
/// floor/ceiling as the configured flat colors, and missing sprites are not
/// drawn at all.
pub trait TextureOracle {
    /// Wall or door-leaf texture for a tile code.
    fn wall(&self, code: u16) -> Option<&Texture>;

    /// Texture for walls seen through a doorway (the door jamb).
    fn door_frame(&self) -> Option<&Texture> {
        None
    }

    fn floor(&self) -> Option<&Texture> {
        None
    }

    fn ceiling(&self) -> Option<&Texture> {
        None
    }

    fn sprite(&self, key: SpriteTexture) -> Option<&Texture>;
}

/// An oracle with no textures; everything uses flat fallbacks.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoTextures;

impl TextureOracle for NoTextures {
    fn wall(&self, _code: u16) -> Option<&Texture> {
        None
    }

    fn sprite(&self, _key: SpriteTexture) -> Option<&Texture> {
        None
    }
}
