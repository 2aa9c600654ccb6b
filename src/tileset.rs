//! Tilesets and their per-tile metadata.

use std::path::PathBuf;

use crate::properties::Properties;

/// One frame of a tile animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationFrame {
    /// Tileset-local id shown during this frame.
    pub tile_id: u32,
    /// How long the frame is shown.
    pub duration_ms: u32,
}

/// Per-tile metadata from a tileset's `tiles` list.
#[derive(Debug, Clone, Default)]
pub struct TileMetadata {
    /// Tileset-local id.
    pub id: u32,
    /// Custom properties of this tile.
    pub properties: Properties,
    /// Animation frames; empty for static tiles.
    pub animation: Vec<AnimationFrame>,
}

/// A tileset as referenced by a map: one image atlas on a regular grid.
#[derive(Debug, Clone)]
pub struct Tileset {
    /// Gid of the tileset's local tile 0.
    pub first_gid: u32,
    /// Tileset name.
    pub name: String,
    /// External tileset file, if the map referenced one.
    pub source: Option<PathBuf>,
    /// Atlas image, already resolved against the map (or tileset) directory.
    pub image: PathBuf,
    /// Declared atlas width; 0 when the file omits it.
    pub image_w: u32,
    /// Declared atlas height; 0 when the file omits it.
    pub image_h: u32,
    /// Tile width in pixels.
    pub tile_w: u32,
    /// Tile height in pixels.
    pub tile_h: u32,
    /// Number of tiles the tileset owns.
    pub tilecount: u32,
    /// Tiles per atlas row.
    pub columns: u32,
    /// Pixels between neighbouring tiles.
    pub spacing: u32,
    /// Pixels around the whole grid.
    pub margin: u32,
    /// Tileset-level custom properties.
    pub properties: Properties,
    /// Tiles that carry properties or animation.
    pub tiles: Vec<TileMetadata>,
}

impl Tileset {
    /// Loaded from its own `.tsj`/`.json` file.
    pub fn is_external(&self) -> bool {
        self.source.is_some()
    }

    /// Last gid this tileset owns, or `first_gid - 1` when it is empty.
    /// `None` when the range runs past `u32::MAX`.
    pub fn last_gid(&self) -> Option<u32> {
        let last = u64::from(self.first_gid) + u64::from(self.tilecount);
        u32::try_from(last.saturating_sub(1)).ok()
    }

    /// True when `gid` falls in `[first_gid, first_gid + tilecount)`.
    pub fn owns(&self, gid: u32) -> bool {
        gid >= self.first_gid && gid - self.first_gid < self.tilecount
    }

    /// Pixel position of a local tile inside the atlas image, or `None` when
    /// the id lies so far past the grid that the offset overflows.
    pub fn tile_pixel(&self, local_id: u32) -> Option<(u32, u32)> {
        let cols = self.columns.max(1);
        let offset = |index: u32, tile: u32| {
            tile.checked_add(self.spacing)
                .and_then(|step| index.checked_mul(step))
                .and_then(|o| o.checked_add(self.margin))
        };
        Some((
            offset(local_id % cols, self.tile_w)?,
            offset(local_id / cols, self.tile_h)?,
        ))
    }

    /// Metadata of a local tile, if it has any.
    pub fn tile(&self, local_id: u32) -> Option<&TileMetadata> {
        self.tiles.iter().find(|t| t.id == local_id)
    }

    /// Animation frames of a local tile; empty for static tiles.
    pub fn animation(&self, local_id: u32) -> &[AnimationFrame] {
        self.tile(local_id).map(|t| t.animation.as_slice()).unwrap_or(&[])
    }
}

#[cfg(test)]
pub(crate) fn atlas(first_gid: u32, columns: u32, tilecount: u32) -> Tileset {
    Tileset {
        first_gid,
        name: format!("ts{first_gid}"),
        source: None,
        image: PathBuf::from(format!("ts{first_gid}.png")),
        image_w: columns * 32,
        image_h: tilecount.div_ceil(columns) * 32,
        tile_w: 32,
        tile_h: 32,
        tilecount,
        columns,
        spacing: 0,
        margin: 0,
        properties: Properties::new(),
        tiles: Vec::new(),
    }
}
