use super::texture::Rgba;

/// Target image for one rendered frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            pixels: vec![Rgba::BLACK; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn clear(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    /// Writes one pixel; writes outside the frame are dropped.
    #[inline]
    pub fn put(&mut self, x: i32, y: i32, color: Rgba) {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return;
        }
        self.pixels[(y as u32 * self.width + x as u32) as usize] = color;
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }

    /// Pixels of row `y`, top to bottom.
    pub fn row(&self, y: u32) -> &[Rgba] {
        let start = (y.min(self.height - 1) * self.width) as usize;
        &self.pixels[start..start + self.width as usize]
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }
}

/// Perpendicular wall distance per screen column.
#[derive(Clone, Debug, PartialEq)]
pub struct DepthBuffer {
    columns: Vec<f32>,
}

impl DepthBuffer {
    pub fn new(width: u32) -> Self {
        Self {
            columns: vec![f32::INFINITY; width as usize],
        }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Depth at `column`; columns outside the buffer are infinitely deep.
    pub fn get(&self, column: i32) -> f32 {
        if column < 0 {
            return f32::INFINITY;
        }
        self.columns
            .get(column as usize)
            .copied()
            .unwrap_or(f32::INFINITY)
    }

    pub fn set(&mut self, column: u32, depth: f32) {
        if let Some(slot) = self.columns.get_mut(column as usize) {
            *slot = depth;
        }
    }

    pub fn reset(&mut self) {
        self.columns.fill(f32::INFINITY);
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.columns
    }
}
