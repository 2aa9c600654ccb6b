//! Texture-run batching in front of a [`RenderBackend`].
//!
//! The batch only groups *adjacent* draws that share a texture. It never
//! reorders, so later submissions always paint over earlier ones.

use crate::command::DrawCommand;
use crate::config::RenderConfig;
use crate::error::{MapError, Result};
use crate::geom::IntRect;
use crate::render::{FlipMode, Sprite, TextureHandle};

/// Queue length at which a batch flushes even without a texture change.
pub const DEFAULT_BATCH_CAPACITY: usize = 1000;

/// Something that executes draw commands immediately, in call order.
pub trait RenderBackend {
    /// Executes one command.
    fn draw(&mut self, cmd: &DrawCommand);
}

impl<B: RenderBackend + ?Sized> RenderBackend for &mut B {
    fn draw(&mut self, cmd: &DrawCommand) {
        (**self).draw(cmd)
    }
}

/// Counters for the current (or last finished) frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    /// Non-empty flushes sent to the backend.
    pub flushes: u32,
    /// Draw commands sent to the backend.
    pub commands: u32,
}

/// Queues sprite draws and forwards them in same-texture runs.
///
/// Each frame is `begin`, any number of `draw` calls, then `end`.
pub struct SpriteBatch<B> {
    backend: B,
    capacity: usize,
    drawing: bool,
    bound: Option<TextureHandle>,
    pending: Vec<DrawCommand>,
    stats: BatchStats,
}

impl<B: RenderBackend> SpriteBatch<B> {
    /// A batch with [`DEFAULT_BATCH_CAPACITY`].
    pub fn new(backend: B) -> Self {
        Self::with_capacity(backend, DEFAULT_BATCH_CAPACITY)
    }

    /// A capacity of 0 is treated as 1.
    pub fn with_capacity(backend: B, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            backend,
            capacity,
            drawing: false,
            bound: None,
            pending: Vec::with_capacity(capacity),
            stats: BatchStats::default(),
        }
    }

    /// A batch sized by `config.batch_capacity`.
    pub fn from_config(backend: B, config: &RenderConfig) -> Self {
        Self::with_capacity(backend, config.batch_capacity)
    }

    /// Starts a frame and resets [`BatchStats`].
    pub fn begin(&mut self) -> Result<()> {
        if self.drawing {
            return Err(MapError::BatchState("end() must be called before begin()"));
        }
        self.drawing = true;
        self.bound = None;
        self.pending.clear();
        self.stats = BatchStats::default();
        Ok(())
    }

    /// Queue `sprite` at `(x, y)`; both the size and the position are scaled
    /// by the sprite's scale.
    pub fn draw(&mut self, sprite: &Sprite, x: f32, y: f32, flip: FlipMode, angle: f64) -> Result<()> {
        if !self.drawing {
            return Err(MapError::BatchState("begin() must be called before draw()"));
        }

        let scale = sprite.scale();
        let (src_w, src_h) = sprite.source_size();
        // Degenerate scales still produce a visible, non-inverted rectangle.
        let w = ((src_w as f32 * scale.x).round() as i32).max(1);
        let h = ((src_h as f32 * scale.y).round() as i32).max(1);
        let dest = IntRect::new(
            (x * scale.x).round() as i32,
            (y * scale.y).round() as i32,
            w,
            h,
        );

        let handle = sprite.texture().handle;
        if self.bound != Some(handle) || self.pending.len() >= self.capacity {
            self.flush();
            self.bound = Some(handle);
        }

        self.pending.push(DrawCommand {
            texture: handle,
            source: sprite.clip(),
            dest,
            angle,
            flip,
        });
        Ok(())
    }

    /// Flushes what is queued and closes the frame.
    pub fn end(&mut self) -> Result<()> {
        if !self.drawing {
            return Err(MapError::BatchState("begin() must be called before end()"));
        }
        self.flush();
        self.drawing = false;
        self.bound = None;
        Ok(())
    }

    fn flush(&mut self) {
        if self.pending.is_empty() {
            return;
        }

        tracing::debug!(
            count = self.pending.len(),
            texture = ?self.bound,
            "flushing sprite batch"
        );

        for cmd in &self.pending {
            self.backend.draw(cmd);
        }
        self.stats.flushes += 1;
        self.stats.commands += self.pending.len() as u32;
        self.pending.clear();
    }

    /// Between `begin` and `end`.
    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Queue length that forces a flush.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Commands queued but not yet flushed.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Counters since the last `begin`.
    pub fn stats(&self) -> BatchStats {
        self.stats
    }

    /// The wrapped backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The wrapped backend, mutably.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Unwraps the backend. Queued commands are dropped.
    pub fn into_backend(self) -> B {
        self.backend
    }
}
