//! Atlas slicing.
//!
//! A [`SpriteSheet`] cuts its texture into a dense grid of [`Sprite`]s once,
//! at construction, so per-frame tile lookups are a bounds check and an index.

use std::path::Path;

use crate::error::{MapError, Result};
use crate::geom::IntRect;
use crate::render::{Sprite, Texture, TextureProvider};

/// Grid geometry of an atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SheetLayout {
    /// Tile width in pixels.
    pub tile_w: u32,
    /// Tile height in pixels.
    pub tile_h: u32,
    /// Pixels before the first column.
    pub margin_x: u32,
    /// Pixels above the first row.
    pub margin_y: u32,
    /// Pixels between columns.
    pub spacing_x: u32,
    /// Pixels between rows.
    pub spacing_y: u32,
}

impl SheetLayout {
    /// A tight grid: no margin, no spacing.
    pub fn grid(tile_w: u32, tile_h: u32) -> Self {
        Self {
            tile_w,
            tile_h,
            margin_x: 0,
            margin_y: 0,
            spacing_x: 0,
            spacing_y: 0,
        }
    }

    /// Sets the outer margin.
    pub fn with_margin(mut self, x: u32, y: u32) -> Self {
        self.margin_x = x;
        self.margin_y = y;
        self
    }

    /// Sets the gap between tiles.
    pub fn with_spacing(mut self, x: u32, y: u32) -> Self {
        self.spacing_x = x;
        self.spacing_y = y;
        self
    }
}

/// Number of whole tiles along one axis.
fn fit_count(extent: u32, tile: u32, margin: u32, spacing: u32) -> u32 {
    // n tiles need 2*margin + n*tile + (n-1)*spacing pixels.
    let avail = extent as i64 - 2 * margin as i64 + spacing as i64;
    if avail <= 0 {
        return 0;
    }
    (avail / (tile as i64 + spacing as i64)) as u32
}

/// An atlas cut into a row-major grid of sprites.
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    texture: Texture,
    layout: SheetLayout,
    columns: u32,
    rows: u32,
    tiles: Vec<Sprite>, // row-major, len == columns * rows
}

impl SpriteSheet {
    /// Slices every whole tile that fits in `texture`. Zero tile sizes are rejected.
    pub fn from_texture(texture: Texture, layout: SheetLayout) -> Result<Self> {
        if layout.tile_w == 0 || layout.tile_h == 0 {
            return Err(MapError::InvalidMap(format!(
                "sprite sheet tile size must be non-zero, got {}x{}",
                layout.tile_w, layout.tile_h
            )));
        }

        let columns = fit_count(texture.width, layout.tile_w, layout.margin_x, layout.spacing_x);
        let rows = fit_count(texture.height, layout.tile_h, layout.margin_y, layout.spacing_y);

        let mut tiles = Vec::with_capacity(columns as usize * rows as usize);
        for row in 0..rows {
            for col in 0..columns {
                let clip = IntRect::new(
                    (layout.margin_x + col * (layout.tile_w + layout.spacing_x)) as i32,
                    (layout.margin_y + row * (layout.tile_h + layout.spacing_y)) as i32,
                    layout.tile_w as i32,
                    layout.tile_h as i32,
                );
                tiles.push(Sprite::clipped(texture, clip)?);
            }
        }

        tracing::debug!(
            texture = texture.handle.0,
            columns,
            rows,
            "sliced sprite sheet"
        );

        Ok(Self {
            texture,
            layout,
            columns,
            rows,
            tiles,
        })
    }

    /// Loads `path` through `textures`, then slices it.
    pub fn from_file_path<P: TextureProvider + ?Sized>(
        textures: &mut P,
        path: &Path,
        layout: SheetLayout,
    ) -> Result<Self> {
        let texture = textures.get_texture(path)?;
        Self::from_texture(texture, layout)
    }

    /// Slices the texture behind `sprite`; the sprite's own clip is ignored.
    pub fn from_sprite(sprite: &Sprite, layout: SheetLayout) -> Result<Self> {
        Self::from_texture(*sprite.texture(), layout)
    }

    /// The sprite at a grid cell, or [`MapError::TileOutOfBounds`].
    #[inline]
    pub fn get_tile(&self, col: u32, row: u32) -> Result<&Sprite> {
        if col >= self.columns || row >= self.rows {
            return Err(MapError::TileOutOfBounds {
                col,
                row,
                columns: self.columns,
                rows: self.rows,
            });
        }
        Ok(&self.tiles[row as usize * self.columns as usize + col as usize])
    }

    /// Grid cell whose top-left corner is at atlas pixel `(px, py)`.
    ///
    /// Inverse of the slicing above; pixels inside margin or spacing map to
    /// the preceding cell.
    #[inline]
    pub fn cell_at_pixel(&self, px: u32, py: u32) -> (u32, u32) {
        let l = &self.layout;
        (
            px.saturating_sub(l.margin_x) / l.tile_w.saturating_add(l.spacing_x),
            py.saturating_sub(l.margin_y) / l.tile_h.saturating_add(l.spacing_y),
        )
    }

    /// The sliced atlas.
    pub fn texture(&self) -> &Texture {
        &self.texture
    }

    /// Grid geometry used for slicing.
    pub fn layout(&self) -> &SheetLayout {
        &self.layout
    }

    /// Tiles per row.
    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// Tile rows.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Total number of sliced tiles.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// True when not a single tile fits.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}
