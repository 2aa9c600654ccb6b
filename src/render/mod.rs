//! Sprites, atlas slicing and draw batching.

mod backend;
mod batch;
mod cull;
mod sheet;
mod sprite;
mod texture;

pub use backend::MacroquadRenderer;
pub use batch::{BatchStats, RenderBackend, SpriteBatch, DEFAULT_BATCH_CAPACITY};
pub use cull::{visible_cells, CellRange};
pub use sheet::{SheetLayout, SpriteSheet};
pub use sprite::{FlipMode, Sprite};
pub use texture::{Texture, TextureHandle, TextureProvider};
