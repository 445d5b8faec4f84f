//! Game configuration and the content bundle built from it at startup.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use macroquad::prelude::*;
use serde::Deserialize;

use crate::catalog::{TileCatalog, TileFamily, TileFamilyId, TilesetGeometry};
use crate::error::MapError;
use crate::loader::fields::read_file;
use crate::teleporter::Destination;

/// Tunables of the whole game. Every field has a default, so a config file
/// only needs the content it actually changes.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Tile width in world pixels.
    pub tile_width: f32,
    /// Tile height in world pixels.
    pub tile_height: f32,
    /// Window width in screen pixels.
    pub screen_width: f32,
    /// Window height in screen pixels.
    pub screen_height: f32,
    /// Pixels on screen per world pixel.
    pub render_scale: f32,
    /// Teleporter zones are thin so the player has to walk into the doorway.
    pub teleporter_width: f32,
    /// See `teleporter_width`.
    pub teleporter_height: f32,
    /// Player tunables.
    pub player: PlayerConfig,
    /// Wandering speed of NPCs, pixels per second.
    pub npc_velocity: f32,
    /// Wandering speed of enemies, pixels per second.
    pub enemy_velocity: f32,
    /// Hits an enemy takes.
    pub enemy_hp: i32,
    /// Seconds between idle-movement direction changes.
    pub idle_cooldown: f32,
    /// Stick values within ± this are ignored.
    pub stick_dead_zone: i16,
    /// Map loaded at startup.
    pub start: Destination,
    /// Tileset families and the layer files that use them.
    pub families: Vec<FamilyConfig>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            tile_width: 16.0,
            tile_height: 16.0,
            screen_width: 800.0,
            screen_height: 600.0,
            render_scale: 2.0,
            teleporter_width: 16.0,
            teleporter_height: 1.0,
            player: PlayerConfig::default(),
            npc_velocity: 50.0,
            enemy_velocity: 50.0,
            enemy_hp: 3,
            idle_cooldown: 1.2,
            stick_dead_zone: 8000,
            start: Destination::default(),
            families: Vec::new(),
        }
    }
}

/// Player tunables.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Sprite sheet path.
    pub texture: String,
    /// Bounding box width.
    pub width: f32,
    /// Bounding box height.
    pub height: f32,
    /// Start position, x.
    pub spawn_x: f32,
    /// Start position, y.
    pub spawn_y: f32,
    /// Pixels per second per axis.
    pub velocity: f32,
    /// Hit points at start and upper bound for healing.
    pub max_hp: i32,
    /// Seconds of invulnerability after a hit.
    pub damage_cooldown: f32,
    /// Seconds the player stays translucent after a hit.
    pub visibility_restore: f32,
    /// Alpha (0-255) while the player flickers after a hit.
    pub damaged_alpha: u8,
    /// Knock-back distance of hits, pixels.
    pub attack_recoil: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            texture: "player.png".to_owned(),
            width: 24.0,
            height: 24.0,
            spawn_x: 250.0,
            spawn_y: 250.0,
            velocity: 100.0,
            max_hp: 6,
            damage_cooldown: 1.0,
            visibility_restore: 1.0,
            damaged_alpha: 75,
            attack_recoil: 20.0,
        }
    }
}

/// One tileset and the layer files drawn with it.
#[derive(Debug, Clone, Deserialize)]
pub struct FamilyConfig {
    /// Registry id.
    pub id: TileFamilyId,
    /// Human readable name, for logs.
    #[serde(default)]
    pub name: String,
    /// Walkable descriptor file.
    pub walkable: String,
    /// Is-object descriptor file.
    pub is_object: String,
    /// Sprite-sheet cells per row.
    pub columns: u32,
    /// Sprite-sheet rows.
    pub rows: u32,
    /// Id that replaces negative or malformed layer entries.
    pub empty_tile_id: u32,
    /// Layer files drawn with this tileset.
    #[serde(default)]
    pub layers: Vec<String>,
}

impl GameConfig {
    /// Reads a JSON config file.
    pub fn load(path: &Path) -> Result<Self, MapError> {
        let txt = read_file(path)?;
        serde_json::from_str(&txt).map_err(|source| MapError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Tile size in world pixels.
    pub fn tile_size(&self) -> Vec2 {
        vec2(self.tile_width, self.tile_height)
    }

    /// Size of every teleporter zone.
    pub fn teleporter_size(&self) -> Vec2 {
        vec2(self.teleporter_width, self.teleporter_height)
    }

    /// World-space size of the camera rectangle.
    pub fn view_size(&self) -> Vec2 {
        vec2(self.screen_width, self.screen_height) / self.render_scale.max(f32::EPSILON)
    }
}

/// Explicit layer-file → tile family table.
#[derive(Debug, Clone, Default)]
pub struct FamilyRegistry {
    by_layer: HashMap<String, TileFamilyId>,
}

impl FamilyRegistry {
    /// Builds the table, rejecting a layer registered to two families.
    pub fn from_config(families: &[FamilyConfig]) -> Result<Self, MapError> {
        let mut by_layer = HashMap::new();
        for family in families {
            for layer in &family.layers {
                if let Some(prev) = by_layer.insert(layer.clone(), family.id) {
                    if prev != family.id {
                        return Err(MapError::InvalidConfig(format!(
                            "layer file {} is registered to families {} and {}",
                            layer, prev, family.id
                        )));
                    }
                }
            }
        }
        Ok(FamilyRegistry { by_layer })
    }

    /// Family of a layer file; unknown paths are configuration errors.
    pub fn family_for(&self, layer_path: &str) -> Result<TileFamilyId, MapError> {
        self.by_layer
            .get(layer_path)
            .copied()
            .ok_or_else(|| MapError::UnknownFamily {
                path: layer_path.to_owned(),
            })
    }
}

/// Configuration plus everything derived from it once at startup.
#[derive(Debug, Clone)]
pub struct Content {
    /// Tunables.
    pub config: GameConfig,
    /// Descriptors of every tile family.
    pub catalog: TileCatalog,
    /// Layer file → family table.
    pub families: FamilyRegistry,
    base_dir: PathBuf,
}

impl Content {
    /// Reads the config file and every tile family it names. Relative data
    /// paths are resolved against the config file's directory.
    pub fn load(config_path: &Path) -> Result<Self, MapError> {
        let config = GameConfig::load(config_path)?;
        let base_dir = config_path
            .parent()
            .map(|d| d.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("./"));
        Self::from_config(config, base_dir)
    }

    /// Loads the tile families of an already parsed config.
    pub fn from_config(config: GameConfig, base_dir: PathBuf) -> Result<Self, MapError> {
        if config.tile_width <= 0.0 || config.tile_height <= 0.0 {
            return Err(MapError::InvalidConfig("tile size must be positive".to_owned()));
        }
        if config.start.layers.is_empty() {
            return Err(MapError::InvalidConfig(
                "start destination has no layer files".to_owned(),
            ));
        }

        let mut catalog = TileCatalog::new();
        for family in &config.families {
            catalog.insert(TileFamily::load(
                family.id,
                TilesetGeometry {
                    columns: family.columns,
                    rows: family.rows,
                },
                family.empty_tile_id,
                &base_dir.join(&family.walkable),
                &base_dir.join(&family.is_object),
            )?)?;
        }
        let families = FamilyRegistry::from_config(&config.families)?;

        log::info!(
            "loaded {} tile families from {}",
            config.families.len(),
            base_dir.display()
        );

        Ok(Content {
            config,
            catalog,
            families,
            base_dir,
        })
    }

    /// Filesystem location of a path written in the data files.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        self.base_dir.join(path)
    }
}
