//! Macroquad implementation of the texture provider and render backend.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use macroquad::prelude::*;

use crate::command::DrawCommand;
use crate::config::{RenderConfig, TextureFilter};
use crate::error::{MapError, Result};
use crate::render::{RenderBackend, Texture, TextureHandle, TextureProvider};

/// Owns GPU textures and draws commands with `draw_texture_ex`.
///
/// Needs a live Macroquad context: create it inside `#[macroquad::main]`.
pub struct MacroquadRenderer {
    textures: Vec<Texture2D>,
    by_path: HashMap<PathBuf, Texture>,
    filter: FilterMode,
}

impl MacroquadRenderer {
    /// An empty renderer that loads textures with `filter`.
    pub fn new(filter: TextureFilter) -> Self {
        Self {
            textures: Vec::new(),
            by_path: HashMap::new(),
            filter: match filter {
                TextureFilter::Nearest => FilterMode::Nearest,
                TextureFilter::Linear => FilterMode::Linear,
            },
        }
    }

    /// Uses `config.texture_filter`.
    pub fn from_config(config: &RenderConfig) -> Self {
        Self::new(config.texture_filter)
    }

    /// The Macroquad texture behind a handle.
    pub fn texture2d(&self, handle: TextureHandle) -> Option<&Texture2D> {
        self.textures.get(handle.0 as usize)
    }

    /// Drops every cached texture, e.g. when a level is unloaded.
    pub fn clear(&mut self) {
        self.textures.clear();
        self.by_path.clear();
    }
}

impl TextureProvider for MacroquadRenderer {
    fn get_texture(&mut self, path: &Path) -> Result<Texture> {
        if let Some(tex) = self.by_path.get(path) {
            return Ok(*tex);
        }

        let bytes = std::fs::read(path).map_err(|source| MapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let image = Image::from_file_with_format(&bytes, None).map_err(|e| MapError::Resource {
            path: path.to_path_buf(),
            reason: format!("{e:?}"),
        })?;
        let tex2d = Texture2D::from_image(&image);
        tex2d.set_filter(self.filter);

        let tex = Texture {
            handle: TextureHandle(self.textures.len() as u32),
            width: image.width() as u32,
            height: image.height() as u32,
        };
        self.textures.push(tex2d);
        self.by_path.insert(path.to_path_buf(), tex);
        tracing::debug!(path = %path.display(), width = tex.width, height = tex.height, "loaded texture");
        Ok(tex)
    }
}

impl RenderBackend for MacroquadRenderer {
    fn draw(&mut self, cmd: &DrawCommand) {
        let Some(tex) = self.textures.get(cmd.texture.0 as usize) else {
            tracing::warn!(texture = cmd.texture.0, "draw with unknown texture handle");
            return;
        };

        draw_texture_ex(
            tex,
            cmd.dest.x as f32,
            cmd.dest.y as f32,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(cmd.dest.w as f32, cmd.dest.h as f32)),
                source: cmd
                    .source
                    .map(|r| Rect::new(r.x as f32, r.y as f32, r.w as f32, r.h as f32)),
                // Macroquad rotates around the destination center when no pivot is given.
                rotation: (cmd.angle as f32).to_radians(),
                flip_x: cmd.flip.flips_x(),
                flip_y: cmd.flip.flips_y(),
                pivot: None,
            },
        );
    }
}
