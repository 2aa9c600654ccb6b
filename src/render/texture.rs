//! Texture handles and the provider that loads them.

use std::path::Path;

use crate::error::Result;

/// Opaque id of a texture owned by a [`TextureProvider`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureHandle(pub u32);

/// A loaded texture: its handle plus pixel size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Texture {
    /// Provider-assigned id.
    pub handle: TextureHandle,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Loads textures by path and caches them, so equal paths yield equal handles.
pub trait TextureProvider {
    /// Returns the texture at `path`, loading it on first use.
    fn get_texture(&mut self, path: &Path) -> Result<Texture>;
}

impl<T: TextureProvider + ?Sized> TextureProvider for &mut T {
    fn get_texture(&mut self, path: &Path) -> Result<Texture> {
        (**self).get_texture(path)
    }
}
