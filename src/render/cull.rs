use std::ops::Range;

use macroquad::prelude::*;

const CULL_MARGIN_TILES: i32 = 1;

/// Rows and columns of a grid that intersect a view rectangle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileRange {
    /// Visible rows.
    pub rows: Range<usize>,
    /// Visible columns.
    pub columns: Range<usize>,
}

/// Tiles touched by `view` (world pixels), padded by one tile and clamped to the grid.
pub fn visible_tiles(view: Rect, tile_size: Vec2, rows: usize, columns: usize) -> TileRange {
    let span = |min: f32, max: f32, tile: f32, count: usize| {
        let mut lo = (min / tile).floor() as i32;
        let mut hi = (max / tile).floor() as i32;
        if lo > hi {
            std::mem::swap(&mut lo, &mut hi);
        }
        lo -= CULL_MARGIN_TILES;
        hi += CULL_MARGIN_TILES;
        let lo = lo.clamp(0, count as i32) as usize;
        let hi = (hi + 1).clamp(0, count as i32) as usize;
        lo..hi.max(lo)
    };

    TileRange {
        rows: span(view.y, view.y + view.h, tile_size.y, rows),
        columns: span(view.x, view.x + view.w, tile_size.x, columns),
    }
}
