//! Translate-then-validate movement shared by the player and wandering entities.

use macroquad::prelude::*;

use crate::collision::can_enter;
use crate::map::MapGrid;

/// Keeps a box of `size` centered at `p` inside the map.
pub fn clamp_to_map(map: &MapGrid, p: Vec2, size: Vec2) -> Vec2 {
    let half = size / 2.0;
    let bounds = map.pixel_size();
    let axis = |v: f32, half: f32, max: f32| {
        if v - half < 0.0 {
            half
        } else if v + half > max {
            max - half
        } else {
            v
        }
    };
    vec2(axis(p.x, half.x, bounds.x), axis(p.y, half.y, bounds.y))
}

/// Moves a box from `from` toward `to`. The result is clamped to the map;
/// if the clamped center enters a tile that is not walkable on every layer,
/// the box stays at `from` on both axes.
pub fn try_move(map: &MapGrid, from: Vec2, to: Vec2, size: Vec2) -> Vec2 {
    let candidate = clamp_to_map(map, to, size);
    if can_enter(map, from, candidate) {
        candidate
    } else {
        from
    }
}

/// Integrates `velocity` over `dt` seconds and validates the result.
pub fn step(map: &MapGrid, position: Vec2, size: Vec2, velocity: Vec2, dt: f32) -> Vec2 {
    if velocity == Vec2::ZERO {
        return position;
    }
    try_move(map, position, position + velocity * dt, size)
}
