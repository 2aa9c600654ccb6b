//! View culling for tile layers.

use std::ops::Range;

use macroquad::prelude::*;

use crate::document::RenderOrder;

const CULL_MARGIN_CELLS: i64 = 1;

/// A rectangular block of cells in a tile layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellRange {
    /// Column span, end exclusive.
    pub cols: Range<usize>,
    /// Row span, end exclusive.
    pub rows: Range<usize>,
}

impl CellRange {
    /// Every cell of a `width` x `height` layer.
    pub fn full(width: usize, height: usize) -> Self {
        Self {
            cols: 0..width,
            rows: 0..height,
        }
    }

    /// True when no cell is covered.
    pub fn is_empty(&self) -> bool {
        self.cols.is_empty() || self.rows.is_empty()
    }

    /// `(col, row)` pairs, rows outer, in the given render order.
    pub fn iter(&self, order: RenderOrder) -> impl Iterator<Item = (usize, usize)> {
        let cols = self.cols.clone();
        let rows = self.rows.clone();
        let (left, up) = (order.right_to_left(), order.bottom_to_top());
        (0..rows.len()).flat_map(move |i| {
            let row = if up { rows.end - 1 - i } else { rows.start + i };
            let cols = cols.clone();
            (0..cols.len()).map(move |j| {
                let col = if left { cols.end - 1 - j } else { cols.start + j };
                (col, row)
            })
        })
    }
}

/// Cells of a `width` x `height` layer whose tiles overlap the view rectangle,
/// padded by one cell. `origin` is the layer's top-left in world space.
pub fn visible_cells(
    width: usize,
    height: usize,
    cell: Vec2,
    origin: Vec2,
    view_min: Vec2,
    view_max: Vec2,
) -> CellRange {
    let lo = view_min.min(view_max) - origin;
    let hi = view_min.max(view_max) - origin;

    let span = |lo: f32, hi: f32, size: f32, len: usize| -> Range<usize> {
        let first = (lo / size).floor() as i64 - CULL_MARGIN_CELLS;
        let last = (hi / size).floor() as i64 + CULL_MARGIN_CELLS;
        let start = first.clamp(0, len as i64) as usize;
        let end = (last + 1).clamp(0, len as i64) as usize;
        start..end.max(start)
    };

    CellRange {
        cols: span(lo.x, hi.x, cell.x, width),
        rows: span(lo.y, hi.y, cell.y, height),
    }
}
