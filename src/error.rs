//! Error type shared by loading and drawing.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or drawing a map.
#[derive(Debug, Error)]
pub enum MapError {
    /// A map, tileset or image file could not be read.
    #[error("I/O error reading {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A map or tileset file is not valid JSON for the expected shape.
    #[error("failed to parse {path}: {source}")]
    Json {
        /// File that failed.
        path: PathBuf,
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    /// Required fields are missing or hold impossible values.
    #[error("invalid map: {0}")]
    InvalidMap(String),

    /// A tile layer's data does not cover `width * height` cells.
    #[error("layer '{layer}' has {actual} tiles, expected {expected}")]
    InvalidLayerSize {
        /// Layer name.
        layer: String,
        /// `width * height`.
        expected: usize,
        /// Cells actually present.
        actual: usize,
    },

    /// A custom property declared a type this loader does not know.
    #[error("property '{name}' has unsupported type '{kind}'")]
    UnsupportedPropertyType {
        /// Property name.
        name: String,
        /// The declared type string.
        kind: String,
    },

    /// A tile layer references a gid beyond every tileset's range.
    #[error("layer '{layer}' references gid {gid}, but the largest known gid is {max_gid}")]
    InvalidTileGid {
        /// Layer (tile or object) holding the reference.
        layer: String,
        /// Gid with flip flags removed.
        gid: u32,
        /// Largest gid any tileset owns.
        max_gid: u32,
    },

    /// Tileset metadata disagrees with the atlas it was sliced from.
    #[error("tileset '{tileset}' does not match its atlas: {reason}")]
    TilesetMismatch {
        /// Tileset name.
        tileset: String,
        /// What disagreed.
        reason: String,
    },

    /// No tileset owns the gid.
    #[error("no tileset found for gid {gid}")]
    UnresolvedGid {
        /// Gid with flip flags removed.
        gid: u32,
    },

    /// A sprite sheet lookup fell outside the sliced grid.
    #[error("tile ({col}, {row}) is outside a {columns}x{rows} sprite sheet")]
    TileOutOfBounds {
        /// Requested column.
        col: u32,
        /// Requested row.
        row: u32,
        /// Columns in the sheet.
        columns: u32,
        /// Rows in the sheet.
        rows: u32,
    },

    /// `begin`/`draw`/`end` were called out of order.
    #[error("sprite batch misuse: {0}")]
    BatchState(&'static str),

    /// A texture could not be created from an image.
    #[error("failed to load texture {path}: {reason}")]
    Resource {
        /// Image that failed.
        path: PathBuf,
        /// Decoder or provider message.
        reason: String,
    },
}

impl MapError {
    /// True for errors that come from malformed map or tileset input.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            MapError::Json { .. }
                | MapError::InvalidMap(_)
                | MapError::InvalidLayerSize { .. }
                | MapError::UnsupportedPropertyType { .. }
                | MapError::InvalidTileGid { .. }
                | MapError::TilesetMismatch { .. }
        )
    }

    /// True for errors raised while loading assets from disk.
    pub fn is_resource_error(&self) -> bool {
        matches!(self, MapError::Io { .. } | MapError::Resource { .. })
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, MapError>;
