use std::collections::HashMap;

use macroquad::prelude::*;

use crate::config::Content;
use crate::entity::{Actor, Entity};
use crate::error::MapError;
use crate::loader::spawns::read_spawns_file;
use crate::loader::teleporters::read_teleporters_file;
use crate::map::MapGrid;
use crate::render::{Assets, DrawLayer, Renderer, TextureHandle};
use crate::teleporter::{Destination, Teleporter};

const HEART_SIZE: Vec2 = Vec2::new(8.0, 8.0);
const HEART_COLOR: Color = Color::new(0.9, 0.1, 0.2, 1.0);

/// The active map together with everything that lives and dies with it.
#[derive(Debug)]
pub struct World {
    /// Tile layers.
    pub map: MapGrid,
    /// Teleporters in file order.
    pub teleporters: Vec<Teleporter>,
    /// NPCs and enemies.
    pub entities: Vec<Entity>,
    /// Heart pickups dropped by defeated enemies.
    pub hearts: Vec<Vec2>,
    textures: Vec<TextureHandle>,
}

impl World {
    /// Loads every file a destination names. Either the whole world is built
    /// or nothing stays loaded in `assets`.
    pub fn load(dest: &Destination, content: &Content, assets: &mut dyn Assets) -> Result<Self, MapError> {
        let teleporters = read_teleporters_file(
            &content.resolve_path(&dest.teleporters),
            content.config.teleporter_size(),
        )?;
        let spawns = read_spawns_file(&content.resolve_path(&dest.spawns))?;
        let map = MapGrid::build(&dest.layers, &dest.texture, content, assets)?;

        let mut loaded: HashMap<&str, TextureHandle> = HashMap::new();
        let mut entities = Vec::with_capacity(spawns.len());
        for def in &spawns {
            let texture = match loaded.get(def.texture.as_str()) {
                Some(&t) => t,
                None => match assets.load_texture(&content.resolve_path(&def.texture)) {
                    Ok(t) => {
                        loaded.insert(&def.texture, t);
                        t
                    }
                    Err(source) => {
                        for &t in loaded.values() {
                            assets.release_texture(t);
                        }
                        map.release(assets);
                        return Err(MapError::Texture {
                            path: def.texture.clone(),
                            source,
                        });
                    }
                },
            };
            entities.push(Entity::from_spawn(def, texture, content.config.enemy_hp));
        }

        Ok(World {
            map,
            teleporters,
            entities,
            hearts: Vec::new(),
            textures: loaded.into_values().collect(),
        })
    }

    /// Frees the map texture and every entity texture.
    pub fn release(self, assets: &mut dyn Assets) {
        for t in self.textures {
            assets.release_texture(t);
        }
        self.map.release(assets);
    }

    /// Size of a heart pickup.
    pub fn heart_size(&self) -> Vec2 {
        HEART_SIZE
    }

    /// Queues the map, then hearts and entities unless `map_only`.
    pub fn draw(&self, renderer: &mut dyn Renderer, camera: Rect, map_only: bool) {
        self.map.draw(renderer, camera);
        if map_only {
            return;
        }
        for heart in &self.hearts {
            let tl = *heart - HEART_SIZE / 2.0 - vec2(camera.x, camera.y);
            renderer.queue_rect(
                DrawLayer::Spawns,
                Rect::new(tl.x, tl.y, HEART_SIZE.x, HEART_SIZE.y),
                HEART_COLOR,
            );
        }
        for e in &self.entities {
            e.draw(renderer, camera);
        }
    }
}
