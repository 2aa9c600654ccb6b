// tests/common/mod.rs
#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tiled_batch::{DrawCommand, RenderBackend, Result, Texture, TextureHandle, TextureProvider};

/// Hands out textures of a fixed size without touching the disk.
pub struct FakeTextures {
    size: (u32, u32),
    overrides: HashMap<PathBuf, (u32, u32)>,
    handles: HashMap<PathBuf, TextureHandle>,
    pub requests: Vec<PathBuf>,
}

impl FakeTextures {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            overrides: HashMap::new(),
            handles: HashMap::new(),
            requests: Vec::new(),
        }
    }

    pub fn with_size(mut self, path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        self.overrides.insert(path.into(), (width, height));
        self
    }
}

impl TextureProvider for FakeTextures {
    fn get_texture(&mut self, path: &Path) -> Result<Texture> {
        self.requests.push(path.to_path_buf());
        let next = TextureHandle(self.handles.len() as u32 + 1);
        let handle = *self.handles.entry(path.to_path_buf()).or_insert(next);
        let (width, height) = self
            .overrides
            .get(path)
            .copied()
            .unwrap_or(self.size);
        Ok(Texture {
            handle,
            width,
            height,
        })
    }
}

/// Records every command the batch flushes, in order.
#[derive(Default)]
pub struct RecordingBackend {
    pub commands: Vec<DrawCommand>,
}

impl RenderBackend for RecordingBackend {
    fn draw(&mut self, cmd: &DrawCommand) {
        self.commands.push(*cmd);
    }
}

pub fn assets_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets")
}
