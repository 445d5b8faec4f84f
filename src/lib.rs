#![warn(missing_docs)]

//! Top-down tile map prototype for Macroquad: layered CSV maps, per-tile
//! walkability, teleporters that swap the active map, wandering NPCs and
//! enemies.

mod catalog;
mod collision;
mod combat;
mod config;
mod entity;
mod error;
mod game;
mod loader {
    pub mod descriptor;
    pub mod fields;
    pub mod layer;
    pub mod spawns;
    pub mod teleporters;
}
mod map;
mod motion;
mod render;
mod teleporter;
mod transition;
mod world;

pub use catalog::{TileCatalog, TileDescriptor, TileFamily, TileFamilyId, TilesetGeometry};
pub use collision::{can_enter, overlaps};
pub use combat::{collect_hearts, enemy_contact, player_attack};
pub use config::{Content, FamilyConfig, FamilyRegistry, GameConfig, PlayerConfig};
pub use entity::{Actor, Direction, Entity, EntityKind, FrameContext, IdleMovement, PlayerState, SpawnDef};
pub use error::MapError;
pub use game::{FrameOutcome, Game};
pub use loader::layer::{parse_layer, read_layer_file, LayerData};
pub use loader::spawns::{parse_spawns, read_spawns_file};
pub use loader::teleporters::{parse_teleporters, read_teleporters_file};
pub use map::{LayerIdx, MapGrid, PlacedTile};
pub use motion::{clamp_to_map, step, try_move};
pub use render::{visible_tiles, Assets, DrawLayer, MacroquadBackend, Renderer, TextureHandle, TileRange};
pub use teleporter::{Destination, Teleporter};
pub use transition::{PendingSwitch, TransitionController};
pub use world::World;
