use macroquad::prelude::*;
use serde::Deserialize;

use crate::collision::overlaps;

/// Everything needed to load another map and place the player in it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Destination {
    /// Layer files of the map, bottom to top.
    pub layers: Vec<String>,
    /// Tileset image shared by the layers.
    pub texture: String,
    /// Teleporters file of the map.
    pub teleporters: String,
    /// Spawns file of the map.
    pub spawns: String,
    /// Player position after the switch, x.
    pub x: f32,
    /// Player position after the switch, y.
    pub y: f32,
}

/// A fixed zone that sends the player to a [`Destination`] on overlap.
#[derive(Debug, Clone, PartialEq)]
pub struct Teleporter {
    /// Zone center, world pixels.
    pub center: Vec2,
    /// Zone size.
    pub size: Vec2,
    /// Where the zone leads.
    pub destination: Destination,
}

impl Teleporter {
    /// Whether a box overlaps the zone (touching is not enough).
    pub fn contains(&self, center: Vec2, size: Vec2) -> bool {
        overlaps(self.center, self.size / 2.0, center, size / 2.0)
    }
}
