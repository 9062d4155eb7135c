// File: crates/race-core/src/types.rs
// Summary: Shared types and constants (surface size, paddings, pixel buffers).

/// Default surface width in pixels (10in figure at 100 dpi).
pub const WIDTH: i32 = 1000;
/// Default surface height in pixels (8in figure at 100 dpi).
pub const HEIGHT: i32 = 800;

/// Screen margins, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    /// Create new insets (non-negative by type).
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
}

impl Default for Insets {
    /// Right inset leaves room for the value label of the longest bar.
    fn default() -> Self {
        Self::new(96, 110, 64, 64)
    }
}

/// One rendered frame as tightly packed, unpremultiplied RGBA8 pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbaFrame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl RgbaFrame {
    pub fn stride(&self) -> usize { self.width as usize * 4 }

    /// RGBA of the pixel at (x, y), or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height { return None; }
        let i = y as usize * self.stride() + x as usize * 4;
        let px = self.pixels.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Convert into an `image` buffer for PNG/GIF encoding.
    pub fn into_image(self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.pixels)
    }
}
