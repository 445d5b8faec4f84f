use macroquad::prelude::*;
use ::rand::rngs::StdRng;
use ::rand::SeedableRng;

use crate::combat;
use crate::config::Content;
use crate::entity::{Actor, Direction, Entity, FrameContext};
use crate::error::MapError;
use crate::map::MapGrid;
use crate::render::{Assets, Renderer};
use crate::transition::TransitionController;
use crate::world::World;

/// What a call to [`Game::inject_frame`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Entities moved and interactions ran.
    Simulated,
    /// The frame was spent replacing the world.
    Switched,
    /// The player has no hit points left; nothing was simulated.
    GameOver,
}

/// Top-level controller: owns the player, the active world and the camera.
pub struct Game {
    content: Content,
    world: World,
    player: Entity,
    transition: TransitionController,
    rng: StdRng,
    camera: Rect,
    stick: [Option<Direction>; 2],
    attack_requested: bool,
    last_outcome: FrameOutcome,
}

impl Game {
    /// Loads the start destination and places the player at its spawn.
    pub fn new(content: Content, assets: &mut dyn Assets, seed: u64) -> Result<Self, MapError> {
        let world = World::load(&content.config.start, &content, assets)?;
        let player_cfg = &content.config.player;
        let texture = match assets.load_texture(&content.resolve_path(&player_cfg.texture)) {
            Ok(t) => t,
            Err(source) => {
                world.release(assets);
                return Err(MapError::Texture {
                    path: player_cfg.texture.clone(),
                    source,
                });
            }
        };
        let player = Entity::player(player_cfg, texture);

        log::info!(
            "game started on {:?} ({}x{} tiles)",
            content.config.start.layers,
            world.map.dimensions().0,
            world.map.dimensions().1
        );

        let mut game = Game {
            content,
            world,
            player,
            transition: TransitionController::new(),
            rng: StdRng::seed_from_u64(seed),
            camera: Rect::new(0.0, 0.0, 0.0, 0.0),
            stick: [None; 2],
            attack_requested: false,
            last_outcome: FrameOutcome::Simulated,
        };
        game.update_camera();
        Ok(game)
    }

    /// Advances the game by `dt` seconds.
    ///
    /// A switch staged by the previous frame is applied first and consumes
    /// the frame. If loading the destination fails the previous world stays
    /// active and the error is returned.
    pub fn inject_frame(&mut self, dt: f32, assets: &mut dyn Assets) -> Result<FrameOutcome, MapError> {
        if let Some(pending) = self.transition.take_pending() {
            let world = match World::load(&pending.destination, &self.content, assets) {
                Ok(w) => w,
                Err(e) => {
                    log::warn!("map switch to {:?} failed: {}", pending.destination.layers, e);
                    self.transition.switch_failed(pending.teleporter);
                    self.last_outcome = FrameOutcome::Simulated;
                    return Err(e);
                }
            };
            let old = std::mem::replace(&mut self.world, world);
            old.release(assets);

            self.player.position = vec2(pending.destination.x, pending.destination.y);
            self.transition.switch_completed();
            self.update_camera();
            log::info!(
                "switched to {:?}, player at {}",
                pending.destination.layers,
                self.player.position
            );
            self.last_outcome = FrameOutcome::Switched;
            return Ok(FrameOutcome::Switched);
        }

        if self.is_game_over() {
            self.last_outcome = FrameOutcome::GameOver;
            return Ok(FrameOutcome::GameOver);
        }

        let cfg = &self.content.config;
        let mut ctx = FrameContext {
            map: &self.world.map,
            rng: &mut self.rng,
            config: cfg,
        };
        self.player.update(&mut ctx, dt);
        for e in &mut self.world.entities {
            e.update(&mut ctx, dt);
        }

        if std::mem::take(&mut self.attack_requested) {
            combat::player_attack(&self.player, &mut self.world, &cfg.player);
        }
        combat::enemy_contact(&mut self.player, &self.world, &cfg.player);
        combat::collect_hearts(&mut self.player, &mut self.world);

        self.transition
            .check(&self.world.teleporters, self.player.position, self.player.size);
        self.update_camera();

        self.last_outcome = FrameOutcome::Simulated;
        Ok(FrameOutcome::Simulated)
    }

    /// Key press from the window.
    pub fn inject_key_down(&mut self, key: KeyCode) {
        match key {
            KeyCode::Space | KeyCode::J => self.attack_requested = true,
            _ => {
                if let Some(dir) = direction_for(key) {
                    self.player.on_key_down(dir);
                }
            }
        }
    }

    /// Key release from the window.
    pub fn inject_key_up(&mut self, key: KeyCode) {
        if let Some(dir) = direction_for(key) {
            self.player.on_key_up(dir);
        }
    }

    /// Analog stick motion; axis 0 is horizontal, 1 vertical. Values past the
    /// dead zone press the matching arrow key, coming back releases it.
    pub fn inject_stick(&mut self, axis: u8, value: i16) {
        let dz = self.content.config.stick_dead_zone;
        let (neg, pos) = match axis {
            0 => (Direction::Left, Direction::Right),
            1 => (Direction::Up, Direction::Down),
            _ => return,
        };
        let held = if value < -dz {
            Some(neg)
        } else if value > dz {
            Some(pos)
        } else {
            None
        };

        let slot = &mut self.stick[axis as usize];
        if *slot == held {
            return;
        }
        let previous = std::mem::replace(slot, held);
        if let Some(dir) = previous {
            self.player.on_key_up(dir);
        }
        if let Some(dir) = held {
            self.player.on_key_down(dir);
        }
    }

    /// World rectangle currently on screen.
    pub fn camera(&self) -> Rect {
        self.camera
    }

    /// The player.
    pub fn player(&self) -> &Entity {
        &self.player
    }

    /// Mutable access to the player, for scripted placement.
    pub fn player_mut(&mut self) -> &mut Entity {
        &mut self.player
    }

    /// The active world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The active map.
    pub fn map(&self) -> &MapGrid {
        &self.world.map
    }

    /// Loaded content.
    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Whether a map switch will happen on the next frame.
    pub fn is_switch_pending(&self) -> bool {
        self.transition.is_pending()
    }

    /// Whether the player has run out of hit points.
    pub fn is_game_over(&self) -> bool {
        self.player.player_state().is_some_and(|p| p.hp <= 0)
    }

    /// Queues the visible map and, unless the last frame was a map switch,
    /// the world's entities and the player.
    pub fn draw(&self, renderer: &mut dyn Renderer) {
        let map_only = self.last_outcome == FrameOutcome::Switched;
        self.world.draw(renderer, self.camera, map_only);
        if !map_only {
            self.player.draw(renderer, self.camera);
        }
    }

    /// Frees every texture the game holds.
    pub fn shutdown(self, assets: &mut dyn Assets) {
        assets.release_texture(self.player.texture);
        self.world.release(assets);
    }

    fn update_camera(&mut self) {
        let view = self.content.config.view_size();
        let bounds = self.world.map.pixel_size();
        let axis = |center: f32, size: f32, max: f32| {
            if max <= size {
                0.0
            } else {
                (center - size / 2.0).max(0.0).min(max - size)
            }
        };
        self.camera = Rect::new(
            axis(self.player.position.x, view.x, bounds.x),
            axis(self.player.position.y, view.y, bounds.y),
            view.x,
            view.y,
        );
    }
}

fn direction_for(key: KeyCode) -> Option<Direction> {
    match key {
        KeyCode::W | KeyCode::Up => Some(Direction::Up),
        KeyCode::S | KeyCode::Down => Some(Direction::Down),
        KeyCode::A | KeyCode::Left => Some(Direction::Left),
        KeyCode::D | KeyCode::Right => Some(Direction::Right),
        _ => None,
    }
}
