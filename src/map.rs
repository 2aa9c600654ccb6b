//! A loaded, drawable map.

use std::collections::HashMap;
use std::path::Path;

use macroquad::prelude::*;

use crate::config::RenderConfig;
use crate::document::{MapDocument, Orientation};
use crate::error::{MapError, Result};
use crate::gid::TileId;
use crate::layer::{Layer, LayerKind, TiledObject};
use crate::loader::json_loader::decode_map_file;
use crate::render::{
    visible_cells, CellRange, RenderBackend, SheetLayout, SpriteBatch, SpriteSheet, TextureProvider,
};
use crate::tileset::Tileset;

/// Where a gid's image lives: tileset index, sheet index and grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileCell {
    /// Index into [`Map::tilesets`].
    pub tileset: usize,
    /// Index of the sheet, see [`Map::sheet_for`].
    pub sheet: usize,
    /// Tile index within the tileset.
    pub local_id: u32,
    /// Sheet column.
    pub col: u32,
    /// Sheet row.
    pub row: u32,
}

/// A loaded map: the parsed document plus one sliced sheet per distinct atlas.
pub struct Map {
    doc: MapDocument,
    sheets: Vec<SpriteSheet>,
    sheet_of: Vec<usize>, // tileset index -> sheets index
    origin: Vec2,
}

impl Map {
    /// Loads a `.json`/`.tmj` map with the default [`RenderConfig`].
    pub fn load<T>(path: impl AsRef<Path>, textures: &mut T) -> Result<Self>
    where
        T: TextureProvider + ?Sized,
    {
        Self::load_with_config(path, textures, &RenderConfig::default())
    }

    /// Loads a map, resolving assets against `config.asset_root` when set.
    pub fn load_with_config<T>(
        path: impl AsRef<Path>,
        textures: &mut T,
        config: &RenderConfig,
    ) -> Result<Self>
    where
        T: TextureProvider + ?Sized,
    {
        let path = path.as_ref();
        let (doc, _) = decode_map_file(path, config.asset_root.as_deref())?;
        Self::from_document(doc, textures)
    }

    /// Loads every atlas and slices it. Nothing is returned on failure.
    pub fn from_document<T>(mut doc: MapDocument, textures: &mut T) -> Result<Self>
    where
        T: TextureProvider + ?Sized,
    {
        doc.validate()?;

        let mut sheets: Vec<SpriteSheet> = Vec::new();
        let mut sheet_of = Vec::with_capacity(doc.tilesets.len());
        let mut cache: HashMap<_, usize> = HashMap::new();

        for ts in &doc.tilesets {
            let texture = textures.get_texture(&ts.image)?;
            let layout = SheetLayout::grid(ts.tile_w, ts.tile_h)
                .with_margin(ts.margin, ts.margin)
                .with_spacing(ts.spacing, ts.spacing);

            let idx = match cache.get(&(texture.handle, layout)) {
                Some(&idx) => idx,
                None => {
                    let sheet = SpriteSheet::from_texture(texture, layout)?;
                    sheets.push(sheet);
                    cache.insert((texture.handle, layout), sheets.len() - 1);
                    sheets.len() - 1
                }
            };
            check_sheet(ts, &sheets[idx])?;
            sheet_of.push(idx);
        }

        if doc.orientation != Orientation::Orthogonal {
            tracing::warn!(
                orientation = ?doc.orientation,
                "only orthogonal maps are drawn; this map will render nothing"
            );
        }

        tracing::info!(
            width = doc.width,
            height = doc.height,
            tile_w = doc.tile_w,
            tile_h = doc.tile_h,
            layers = doc.layers.len(),
            tilesets = doc.tilesets.len(),
            sheets = sheets.len(),
            "loaded map"
        );

        Ok(Self {
            doc,
            sheets,
            sheet_of,
            origin: Vec2::ZERO,
        })
    }

    /// The decoded map data.
    pub fn document(&self) -> &MapDocument {
        &self.doc
    }

    /// Width in cells.
    pub fn width(&self) -> u32 {
        self.doc.width
    }

    /// Height in cells.
    pub fn height(&self) -> u32 {
        self.doc.height
    }

    /// Grid cell size in pixels.
    pub fn tile_size(&self) -> (u32, u32) {
        (self.doc.tile_w, self.doc.tile_h)
    }

    /// Layers in draw order.
    pub fn layers(&self) -> &[Layer] {
        &self.doc.layers
    }

    /// First layer named `name`.
    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.doc.layer_by_name(name)
    }

    /// Tilesets sorted by `first_gid`.
    pub fn tilesets(&self) -> &[Tileset] {
        &self.doc.tilesets
    }

    /// Object layers in declaration order.
    pub fn object_layers(&self) -> Vec<&Layer> {
        self.doc.object_layers().collect()
    }

    /// Objects of every object layer.
    pub fn objects(&self) -> impl Iterator<Item = &TiledObject> {
        self.doc.objects()
    }

    /// The sheet a tileset was sliced into.
    pub fn sheet_for(&self, tileset: usize) -> Option<&SpriteSheet> {
        self.sheet_of.get(tileset).map(|&i| &self.sheets[i])
    }

    /// Number of distinct sheets; tilesets sharing an atlas and layout share one.
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// See [`Map::set_origin`].
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// World position of the map's top-left corner.
    pub fn set_origin(&mut self, origin: Vec2) {
        self.origin = origin;
    }

    /// Resolves a gid (flip flags allowed) to its sheet cell.
    pub fn tile_cell(&self, gid: u32) -> Result<TileCell> {
        let resolved = self.doc.resolver().resolve(TileId(gid).clean())?;
        let sheet = self.sheet_of[resolved.tileset];
        let (col, row) = self.sheets[sheet].cell_at_pixel(resolved.pixel.0, resolved.pixel.1);
        Ok(TileCell {
            tileset: resolved.tileset,
            sheet,
            local_id: resolved.local_id,
            col,
            row,
        })
    }

    /// Draws every layer in declaration order.
    pub fn draw<B: RenderBackend>(&self, batch: &mut SpriteBatch<B>) -> Result<()> {
        for layer in &self.doc.layers {
            self.draw_layer(layer, batch)?;
        }
        Ok(())
    }

    /// Draws one tile layer. Invisible, non-tile and zero-sized layers are skipped;
    /// a layer whose data does not cover its grid is an error.
    pub fn draw_layer<B: RenderBackend>(&self, layer: &Layer, batch: &mut SpriteBatch<B>) -> Result<()> {
        let Some((w, h)) = self.drawable_size(layer) else {
            return Ok(());
        };
        self.draw_cells(layer, CellRange::full(w, h), batch)
    }

    /// Like [`Map::draw`], but only cells overlapping the view rectangle.
    pub fn draw_visible_rect<B: RenderBackend>(
        &self,
        batch: &mut SpriteBatch<B>,
        view_min: Vec2,
        view_max: Vec2,
    ) -> Result<()> {
        let cell = vec2(self.doc.tile_w as f32, self.doc.tile_h as f32);
        for layer in &self.doc.layers {
            let Some((w, h)) = self.drawable_size(layer) else {
                continue;
            };
            let range = visible_cells(w, h, cell, self.origin + layer.offset, view_min, view_max);
            self.draw_cells(layer, range, batch)?;
        }
        Ok(())
    }

    fn drawable_size(&self, layer: &Layer) -> Option<(usize, usize)> {
        if !layer.visible || self.doc.orientation != Orientation::Orthogonal {
            return None;
        }
        match layer.kind {
            LayerKind::Tiles { width, height, .. } if width > 0 && height > 0 => Some((width, height)),
            _ => None,
        }
    }

    fn draw_cells<B: RenderBackend>(
        &self,
        layer: &Layer,
        range: CellRange,
        batch: &mut SpriteBatch<B>,
    ) -> Result<()> {
        let LayerKind::Tiles { width, height, data } = &layer.kind else {
            return Ok(());
        };
        if width.checked_mul(*height) != Some(data.len()) {
            return Err(MapError::InvalidLayerSize {
                layer: layer.name.clone(),
                expected: width.saturating_mul(*height),
                actual: data.len(),
            });
        }
        let (tw, th) = (self.doc.tile_w as f32, self.doc.tile_h as f32);
        let base = self.origin + layer.offset;

        for (col, row) in range.iter(self.doc.render_order) {
            let id = TileId(data[row * width + col]);
            if id.is_empty() {
                continue;
            }

            let cell = self.tile_cell(id.raw())?;
            let sprite = self.sheets[cell.sheet].get_tile(cell.col, cell.row)?;
            let (flip, angle) = id.orientation();

            let x = base.x + col as f32 * tw;
            let y = base.y + row as f32 * th;
            batch.draw(sprite, x, y, flip, angle)?;
        }
        Ok(())
    }
}

/// Tileset metadata and the sheet sliced for it must describe the same grid.
fn check_sheet(ts: &Tileset, sheet: &SpriteSheet) -> Result<()> {
    let mismatch = |reason: String| MapError::TilesetMismatch {
        tileset: ts.name.clone(),
        reason,
    };

    let tex = sheet.texture();
    if ts.image_w != 0 && ts.image_h != 0 && (ts.image_w, ts.image_h) != (tex.width, tex.height) {
        return Err(mismatch(format!(
            "declared image size {}x{} but texture is {}x{}",
            ts.image_w, ts.image_h, tex.width, tex.height
        )));
    }
    if sheet.columns() != ts.columns {
        return Err(mismatch(format!(
            "declared {} columns but the atlas holds {}",
            ts.columns,
            sheet.columns()
        )));
    }
    if (sheet.len() as u64) < ts.tilecount as u64 {
        return Err(mismatch(format!(
            "declared {} tiles but the atlas holds {}",
            ts.tilecount,
            sheet.len()
        )));
    }
    Ok(())
}
