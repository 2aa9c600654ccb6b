//! Pixel geometry.

/// Integer pixel rectangle used for atlas clips and draw destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IntRect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}

impl IntRect {
    /// Rectangle with top-left corner `(x, y)` and size `w` x `h`.
    #[inline]
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// True when `self` lies fully inside a `width` x `height` image.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.w >= 0
            && self.h >= 0
            && (self.x as i64 + self.w as i64) <= width as i64
            && (self.y as i64 + self.h as i64) <= height as i64
    }
}
