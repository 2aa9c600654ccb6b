//! The parsed map: format-agnostic, read-only once decoded.

use std::str::FromStr;

use crate::error::MapError;
use crate::gid::GID_MASK;
use crate::layer::{Layer, LayerKind, TiledObject};
use crate::properties::Properties;
use crate::resolver::TilesetResolver;
use crate::tileset::Tileset;

/// Map projection. Only orthogonal maps are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Square grid.
    #[default]
    Orthogonal,
    /// Diamond grid.
    Isometric,
    /// Staggered isometric.
    Staggered,
    /// Hexagonal grid.
    Hexagonal,
}

impl FromStr for Orientation {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "orthogonal" => Ok(Orientation::Orthogonal),
            "isometric" => Ok(Orientation::Isometric),
            "staggered" => Ok(Orientation::Staggered),
            "hexagonal" => Ok(Orientation::Hexagonal),
            other => Err(MapError::InvalidMap(format!("unknown orientation '{other}'"))),
        }
    }
}

/// Order in which tile cells are visited when drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderOrder {
    /// Rows top to bottom, cells left to right.
    #[default]
    RightDown,
    /// Rows bottom to top, cells left to right.
    RightUp,
    /// Rows top to bottom, cells right to left.
    LeftDown,
    /// Rows bottom to top, cells right to left.
    LeftUp,
}

impl RenderOrder {
    /// Cells within a row are visited right to left.
    pub fn right_to_left(self) -> bool {
        matches!(self, RenderOrder::LeftDown | RenderOrder::LeftUp)
    }

    /// Rows are visited bottom to top.
    pub fn bottom_to_top(self) -> bool {
        matches!(self, RenderOrder::RightUp | RenderOrder::LeftUp)
    }
}

impl FromStr for RenderOrder {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "right-down" => Ok(RenderOrder::RightDown),
            "right-up" => Ok(RenderOrder::RightUp),
            "left-down" => Ok(RenderOrder::LeftDown),
            "left-up" => Ok(RenderOrder::LeftUp),
            other => Err(MapError::InvalidMap(format!("unknown render order '{other}'"))),
        }
    }
}

/// A decoded map, before any texture is loaded.
#[derive(Debug, Clone)]
pub struct MapDocument {
    /// Map size in cells.
    pub width: u32,
    /// Map size in cells.
    pub height: u32,
    /// Grid cell size in pixels.
    pub tile_w: u32,
    /// Grid cell size in pixels.
    pub tile_h: u32,
    /// Projection; see [`Orientation`].
    pub orientation: Orientation,
    /// Cell visiting order for tile layers.
    pub render_order: RenderOrder,
    /// Set for chunked maps; their tile layers are kept as unsupported.
    pub infinite: bool,
    /// Map-level custom properties.
    pub properties: Properties,
    /// Layers in draw order.
    pub layers: Vec<Layer>,
    /// Tilesets, sorted by `first_gid` once validated.
    pub tilesets: Vec<Tileset>,
}

impl MapDocument {
    /// Sorts tilesets and checks every structural invariant of the map.
    pub fn validate(&mut self) -> Result<(), MapError> {
        if self.width == 0 || self.height == 0 || self.tile_w == 0 || self.tile_h == 0 {
            return Err(MapError::InvalidMap(format!(
                "map dimensions must be non-zero, got {}x{} tiles of {}x{} px",
                self.width, self.height, self.tile_w, self.tile_h
            )));
        }

        self.tilesets.sort_by_key(|t| t.first_gid);
        for pair in self.tilesets.windows(2) {
            if pair[0].first_gid == pair[1].first_gid {
                return Err(MapError::InvalidMap(format!(
                    "tilesets '{}' and '{}' share firstgid {}",
                    pair[0].name, pair[1].name, pair[0].first_gid
                )));
            }
        }
        if let Some(ts) = self.tilesets.iter().find(|t| t.first_gid == 0) {
            return Err(MapError::InvalidMap(format!(
                "tileset '{}' has firstgid 0",
                ts.name
            )));
        }
        if let Some(ts) = self.tilesets.iter().find(|t| t.last_gid().is_none()) {
            return Err(MapError::InvalidMap(format!(
                "tileset '{}' runs past the largest gid (firstgid {} + {} tiles)",
                ts.name, ts.first_gid, ts.tilecount
            )));
        }

        let max_gid = self.max_gid();
        for layer in &self.layers {
            if let LayerKind::Tiles { width, height, data } = &layer.kind {
                let expected = width * height;
                if data.len() != expected {
                    return Err(MapError::InvalidLayerSize {
                        layer: layer.name.clone(),
                        expected,
                        actual: data.len(),
                    });
                }
                for &raw in data {
                    let gid = raw & GID_MASK;
                    if gid > max_gid {
                        return Err(MapError::InvalidTileGid {
                            layer: layer.name.clone(),
                            gid,
                            max_gid,
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// Largest gid owned by any tileset, 0 without tilesets.
    pub fn max_gid(&self) -> u32 {
        self.tilesets
            .iter()
            .map(|t| t.last_gid().unwrap_or(u32::MAX))
            .max()
            .unwrap_or(0)
    }

    /// Resolver over the (validated, sorted) tileset list.
    pub fn resolver(&self) -> TilesetResolver<'_> {
        TilesetResolver::new(&self.tilesets)
    }

    /// First layer with this name.
    pub fn layer_by_name(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name == name)
    }

    /// Object layers in declaration order.
    pub fn object_layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers
            .iter()
            .filter(|l| matches!(l.kind, LayerKind::Objects { .. }))
    }

    /// Every object of every object layer, in layer then declaration order.
    pub fn objects(&self) -> impl Iterator<Item = &TiledObject> {
        self.object_layers().flat_map(|l| l.objects().iter())
    }
}

#[cfg(test)]
pub(crate) fn sample(data: Vec<u32>, width: usize, tilesets: Vec<Tileset>) -> MapDocument {
    use macroquad::prelude::Vec2;

    let height = data.len() / width.max(1);
    MapDocument {
        width: width as u32,
        height: height as u32,
        tile_w: 32,
        tile_h: 32,
        orientation: Orientation::Orthogonal,
        render_order: RenderOrder::RightDown,
        infinite: false,
        properties: Properties::new(),
        layers: vec![Layer {
            name: "main".into(),
            visible: true,
            opacity: 1.0,
            offset: Vec2::ZERO,
            properties: Properties::new(),
            kind: LayerKind::Tiles {
                width,
                height,
                data,
            },
        }],
        tilesets,
    }
}
