//! Box overlap and tile walkability tests.

use macroquad::prelude::*;

use crate::map::MapGrid;

/// Axis-aligned box overlap. Boxes that only touch along an edge do not overlap.
pub fn overlaps(center_a: Vec2, half_a: Vec2, center_b: Vec2, half_b: Vec2) -> bool {
    let (min_a, max_a) = (center_a - half_a, center_a + half_a);
    let (min_b, max_b) = (center_b - half_b, center_b + half_b);

    !(max_a.y <= min_b.y || min_a.y >= max_b.y || max_a.x <= min_b.x || min_a.x >= max_b.x)
}

/// Whether an entity may move its center from `from` to `to`.
///
/// Staying inside the same tile is always allowed. Entering a new tile
/// requires every layer to have a walkable tile there.
pub fn can_enter(map: &MapGrid, from: Vec2, to: Vec2) -> bool {
    let start = map.cell_of(from);
    let end = map.cell_of(to);
    start == end || map.is_walkable(end.0, end.1)
}
