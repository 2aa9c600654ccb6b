//! Rendering configuration.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{MapError, Result};
use crate::render::DEFAULT_BATCH_CAPACITY;

/// Sampling used when textures are scaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextureFilter {
    /// Crisp pixels; the usual choice for pixel art.
    #[default]
    Nearest,
    /// Bilinear filtering.
    Linear,
}

/// Settings for map loading and the sprite batch.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Draw commands held before a forced flush.
    pub batch_capacity: usize,
    /// Filter applied to every loaded atlas.
    pub texture_filter: TextureFilter,
    /// Base directory for tileset and image paths. Defaults to the map's directory.
    pub asset_root: Option<PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            batch_capacity: DEFAULT_BATCH_CAPACITY,
            texture_filter: TextureFilter::Nearest,
            asset_root: None,
        }
    }
}

impl RenderConfig {
    /// Parses and validates a JSON config. Missing keys take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: RenderConfig = serde_json::from_str(json).map_err(|source| MapError::Json {
            path: PathBuf::from("<config>"),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reads [`RenderConfig::from_json_str`] input from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let txt = std::fs::read_to_string(path).map_err(|source| MapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: RenderConfig = serde_json::from_str(&txt).map_err(|source| MapError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects a zero batch capacity.
    pub fn validate(&self) -> Result<()> {
        if self.batch_capacity == 0 {
            return Err(MapError::InvalidMap(
                "batch_capacity must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let cfg = RenderConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg, RenderConfig::default());
        assert_eq!(cfg.batch_capacity, 1000);
    }

    #[test]
    fn reads_all_fields() {
        let cfg = RenderConfig::from_json_str(
            r#"{"batch_capacity": 64, "texture_filter": "linear", "asset_root": "assets"}"#,
        )
        .unwrap();
        assert_eq!(cfg.batch_capacity, 64);
        assert_eq!(cfg.texture_filter, TextureFilter::Linear);
        assert_eq!(cfg.asset_root, Some(PathBuf::from("assets")));
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let err = RenderConfig::from_json_str(r#"{"batch_capacity": 0}"#).unwrap_err();
        assert!(matches!(err, MapError::InvalidMap(_)));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("render.json");
        std::fs::write(&path, r#"{"batch_capacity": 8}"#).expect("write config");
        assert_eq!(RenderConfig::load(&path).unwrap().batch_capacity, 8);
        assert!(matches!(
            RenderConfig::load(dir.path().join("missing.json")),
            Err(MapError::Io { .. })
        ));
    }
}
