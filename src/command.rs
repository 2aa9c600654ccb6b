//! Backend-facing draw commands.

use crate::geom::IntRect;
use crate::render::{FlipMode, TextureHandle};

/// One "copy texture region to screen" call handed to a backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    /// Texture to sample from.
    pub texture: TextureHandle,
    /// Region of the texture to copy; `None` copies the whole texture.
    pub source: Option<IntRect>,
    /// Destination rectangle in screen pixels.
    pub dest: IntRect,
    /// Clockwise rotation around the destination center, in degrees.
    pub angle: f64,
    /// Mirroring applied before the rotation.
    pub flip: FlipMode,
}

impl DrawCommand {
    /// True when the backend can use a plain copy without rotation or mirroring.
    pub fn is_plain(&self) -> bool {
        self.angle == 0.0 && self.flip == FlipMode::None
    }
}
