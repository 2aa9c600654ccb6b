//! Sprites and draw-time mirroring.

use macroquad::prelude::*;

use crate::error::{MapError, Result};
use crate::geom::IntRect;
use crate::render::Texture;

/// Mirroring applied to a sprite when it is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FlipMode {
    /// Drawn as stored.
    #[default]
    None,
    /// Mirrored left to right.
    Horizontal,
    /// Mirrored top to bottom.
    Vertical,
    /// Mirrored on both axes.
    Both,
}

impl FlipMode {
    /// Combines per-axis flags.
    pub fn from_flags(horizontal: bool, vertical: bool) -> Self {
        match (horizontal, vertical) {
            (false, false) => FlipMode::None,
            (true, false) => FlipMode::Horizontal,
            (false, true) => FlipMode::Vertical,
            (true, true) => FlipMode::Both,
        }
    }

    /// Mirrors left to right.
    pub fn flips_x(self) -> bool {
        matches!(self, FlipMode::Horizontal | FlipMode::Both)
    }

    /// Mirrors top to bottom.
    pub fn flips_y(self) -> bool {
        matches!(self, FlipMode::Vertical | FlipMode::Both)
    }
}

/// A drawable region of a texture.
///
/// Sprites are immutable once built; rotation and flipping are draw-call
/// arguments so a cached sprite can be shared by every caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    texture: Texture,
    clip: Option<IntRect>,
    scale: Vec2,
}

impl Sprite {
    /// The whole texture at scale 1.
    pub fn from_texture(texture: Texture) -> Self {
        Self {
            texture,
            clip: None,
            scale: Vec2::ONE,
        }
    }

    /// A sub-rectangle of `texture`; fails if it reaches outside the texture.
    pub fn clipped(texture: Texture, clip: IntRect) -> Result<Self> {
        if !clip.fits_within(texture.width, texture.height) {
            return Err(MapError::InvalidMap(format!(
                "clip {clip:?} exceeds {}x{} texture",
                texture.width, texture.height
            )));
        }
        Ok(Self {
            texture,
            clip: Some(clip),
            scale: Vec2::ONE,
        })
    }

    /// Same sprite with a new scale factor.
    pub fn with_scale(mut self, sx: f32, sy: f32) -> Self {
        self.scale = vec2(sx, sy);
        self
    }

    /// Texture the sprite samples.
    #[inline]
    pub fn texture(&self) -> &Texture {
        &self.texture
    }

    /// Source rectangle; `None` for the whole texture.
    #[inline]
    pub fn clip(&self) -> Option<IntRect> {
        self.clip
    }

    /// Scale applied by [`SpriteBatch::draw`](crate::SpriteBatch::draw).
    #[inline]
    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    /// Unscaled size in pixels: the clip size, or the texture size without a clip.
    pub fn source_size(&self) -> (i32, i32) {
        match self.clip {
            Some(c) => (c.w, c.h),
            None => (self.texture.width as i32, self.texture.height as i32),
        }
    }
}
