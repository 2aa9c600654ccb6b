//! Tiled's packed cell values.

use crate::render::FlipMode;

/// Horizontal flip flag (bit 31).
pub const FLIP_H: u32 = 0x8000_0000;
/// Vertical flip flag (bit 30).
pub const FLIP_V: u32 = 0x4000_0000;
/// Diagonal flip flag (bit 29).
pub const FLIP_D: u32 = 0x2000_0000;
/// Keeps the lower 29 bits: the gid without flip flags.
pub const GID_MASK: u32 = 0x1FFF_FFFF;

/// A raw cell value from a tile layer: a gid plus Tiled's flip flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileId(pub u32);

impl TileId {
    /// The value as stored, flags included.
    #[inline] pub fn raw(self) -> u32 { self.0 }
    /// The gid alone.
    #[inline] pub fn clean(self) -> u32 { self.0 & GID_MASK }
    /// [`FLIP_H`] is set.
    #[inline] pub fn flip_h(self) -> bool { (self.0 & FLIP_H) != 0 }
    /// [`FLIP_V`] is set.
    #[inline] pub fn flip_v(self) -> bool { (self.0 & FLIP_V) != 0 }
    /// [`FLIP_D`] is set.
    #[inline] pub fn flip_d(self) -> bool { (self.0 & FLIP_D) != 0 }

    /// Gid 0 marks a cell with no tile.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.clean() == 0
    }

    /// Flip mode and clockwise angle (degrees) for drawing this cell.
    ///
    /// Backends mirror the source first and rotate second. Tiled's diagonal
    /// flag swaps x and y, which is a vertical mirror followed by a 90°
    /// turn; the H/V flags applied after it commute through the turn as
    /// V/H.
    pub fn orientation(self) -> (FlipMode, f64) {
        let (h, v) = (self.flip_h(), self.flip_v());
        if self.flip_d() {
            (FlipMode::from_flags(v, !h), 90.0)
        } else {
            (FlipMode::from_flags(h, v), 0.0)
        }
    }
}
