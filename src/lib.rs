#![warn(missing_docs)]

//! Tiled JSON map loader with a texture-batching sprite renderer for Macroquad.
//!
//! Loading turns a map file into a [`MapDocument`] and slices one
//! [`SpriteSheet`] per atlas. Each frame, [`Map::draw`] resolves every
//! non-empty cell to a cached sprite and feeds a [`SpriteBatch`], which groups
//! adjacent same-texture draws before handing them to a [`RenderBackend`].

mod command;
pub mod config;
mod document;
mod error;
mod geom;
mod gid;
mod layer;
mod loader {
    pub mod json_loader;
    pub mod paths;
}
mod map;
mod properties;
pub mod render;
mod resolver;
mod tileset;

pub use command::DrawCommand;
pub use config::{RenderConfig, TextureFilter};
pub use document::{MapDocument, Orientation, RenderOrder};
pub use error::{MapError, Result};
pub use geom::IntRect;
pub use gid::{TileId, FLIP_D, FLIP_H, FLIP_V, GID_MASK};
pub use layer::{Layer, LayerKind, ObjectShape, TiledObject};
pub use loader::json_loader::{decode_map_file, decode_map_str};
pub use loader::paths::resolve_asset_path;
pub use map::{Map, TileCell};
pub use properties::{Properties, PropertyValue};
pub use render::{
    BatchStats, FlipMode, MacroquadRenderer, RenderBackend, SheetLayout, Sprite, SpriteBatch,
    SpriteSheet, Texture, TextureHandle, TextureProvider,
};
pub use resolver::{ResolvedTile, TilesetResolver};
pub use tileset::{AnimationFrame, TileMetadata, Tileset};
