//! Map layers and the objects of object layers.

use macroquad::prelude::*;

use crate::gid::TileId;
use crate::properties::Properties;

/// What a layer holds.
#[derive(Debug, Clone)]
pub enum LayerKind {
    /// Fixed-size grid of raw gids.
    Tiles {
        /// Columns.
        width: usize,
        /// Rows.
        height: usize,
        /// Raw gids, row-major, flip flags kept.
        data: Vec<u32>,
    },
    /// An object group.
    Objects {
        /// Objects in file order.
        objects: Vec<TiledObject>,
    },
    /// Image and group layers are parsed but carry nothing we draw.
    Unsupported,
}

/// One entry of the map's layer list.
#[derive(Debug, Clone)]
pub struct Layer {
    /// Name as given in the editor.
    pub name: String,
    /// Hidden layers are never drawn.
    pub visible: bool,
    /// Layer opacity, 0 to 1. Parsed, not applied when drawing.
    pub opacity: f32,
    /// World offset added to every cell of this layer.
    pub offset: Vec2,
    /// Custom properties.
    pub properties: Properties,
    /// Layer contents.
    pub kind: LayerKind,
}

impl Layer {
    /// True for grid layers, including empty ones.
    pub fn is_tile_layer(&self) -> bool {
        matches!(self.kind, LayerKind::Tiles { .. })
    }

    /// Dimensions of a tile layer, `None` for every other kind.
    pub fn dimensions(&self) -> Option<(usize, usize)> {
        match &self.kind {
            LayerKind::Tiles { width, height, .. } => Some((*width, *height)),
            _ => None,
        }
    }

    /// The raw cell at column `x`, row `y`; `None` outside the layer.
    pub fn tile_at(&self, x: usize, y: usize) -> Option<TileId> {
        match &self.kind {
            LayerKind::Tiles {
                width,
                height,
                data,
            } if x < *width && y < *height => data.get(y * width + x).map(|g| TileId(*g)),
            _ => None,
        }
    }

    /// Objects of an object layer; empty for every other kind.
    pub fn objects(&self) -> &[TiledObject] {
        match &self.kind {
            LayerKind::Objects { objects } => objects,
            _ => &[],
        }
    }
}

/// Geometry of a [`TiledObject`].
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectShape {
    /// Axis-aligned box of the object's size.
    Rectangle,
    /// A single point at the object's position.
    Point,
    /// Ellipse inscribed in the object's box.
    Ellipse,
    /// Closed outline, points relative to the object's position.
    Polygon(Vec<Vec2>),
    /// Open outline, points relative to the object's position.
    Polyline(Vec<Vec2>),
    /// A tile object, drawn by game code from `gid`.
    Tile {
        /// Raw gid, flip flags kept.
        gid: u32,
    },
}

/// An entry of an object layer. Data only: game logic consumes these.
#[derive(Debug, Clone)]
pub struct TiledObject {
    /// Unique id within the map.
    pub id: u32,
    /// Name as given in the editor; may be empty.
    pub name: String,
    /// Tiled's `class` (or the older `type`) string.
    pub class_name: String,
    /// Left edge in map pixels.
    pub x: f32,
    /// Top edge in map pixels. Tile objects use their bottom edge here, as Tiled does.
    pub y: f32,
    /// Width in map pixels; 0 for points.
    pub width: f32,
    /// Height in map pixels; 0 for points.
    pub height: f32,
    /// Clockwise rotation in degrees.
    pub rotation: f32,
    /// Editor visibility flag, passed through untouched.
    pub visible: bool,
    /// Geometry of the object.
    pub shape: ObjectShape,
    /// Custom properties.
    pub properties: Properties,
}
