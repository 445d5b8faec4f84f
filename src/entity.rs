//! Player, NPC and enemy records sharing one shape and one update pipeline.

use macroquad::prelude::*;
use ::rand::rngs::StdRng;
use ::rand::Rng;

use crate::config::{GameConfig, PlayerConfig};
use crate::map::MapGrid;
use crate::motion;
use crate::render::{DrawLayer, Renderer, TextureHandle};

/// Facing / movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Not moving.
    #[default]
    None,
    /// Towards negative y.
    Up,
    /// Towards positive y.
    Down,
    /// Towards negative x.
    Left,
    /// Towards positive x.
    Right,
}

impl Direction {
    /// Choices for idle wandering; `None` means standing still.
    pub const IDLE_CHOICES: [Direction; 5] = [
        Direction::None,
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit vector (zero for `None`).
    pub fn unit(self) -> Vec2 {
        match self {
            Direction::None => Vec2::ZERO,
            Direction::Up => vec2(0.0, -1.0),
            Direction::Down => vec2(0.0, 1.0),
            Direction::Left => vec2(-1.0, 0.0),
            Direction::Right => vec2(1.0, 0.0),
        }
    }
}

/// Random wandering of a non-player entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdleMovement {
    /// Seconds left before a new direction is picked.
    pub timer: f32,
    /// Direction currently held.
    pub direction: Direction,
}

/// Player-only state.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    /// Current hit points.
    pub hp: i32,
    /// Upper bound for `hp`.
    pub max_hp: i32,
    /// Speed applied per held direction key.
    pub speed: f32,
    /// Seconds of invulnerability left after a hit.
    pub damage_cooldown: f32,
    /// Seconds left until the player is fully visible again.
    pub visibility_timer: f32,
    /// Alpha while `visibility_timer` runs.
    pub damaged_alpha: u8,
}

/// Variant payload of an [`Entity`].
#[derive(Debug, Clone, PartialEq)]
pub enum EntityKind {
    /// The controllable character.
    Player(PlayerState),
    /// A harmless NPC.
    Spawn {
        /// Id from the spawns file.
        id: i32,
    },
    /// A hostile NPC that can be hit.
    Enemy {
        /// Id from the spawns file.
        id: i32,
        /// Hits left.
        hp: i32,
    },
}

/// A spawns-file entry before its texture is loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnDef {
    /// Id from the file.
    pub id: i32,
    /// Center position.
    pub position: Vec2,
    /// Bounding box size.
    pub size: Vec2,
    /// Sprite sheet path.
    pub texture: String,
    /// Sprite sheet cell (pixels).
    pub sprite_offset: Vec2,
    /// Whether the entity wanders.
    pub idle_moves: bool,
    /// Whether the entity is an enemy.
    pub is_enemy: bool,
}

/// Anything that moves around the map.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Center of the bounding box, world pixels.
    pub position: Vec2,
    /// Bounding box size.
    pub size: Vec2,
    /// Pixels per second on each axis.
    pub velocity: Vec2,
    /// Last direction the entity faced.
    pub facing: Direction,
    /// Sprite sheet.
    pub texture: TextureHandle,
    /// Fixed sprite cell for non-player entities.
    pub sprite_offset: Vec2,
    /// Present for wandering entities.
    pub idle: Option<IdleMovement>,
    /// Variant payload.
    pub kind: EntityKind,
}

/// What an entity needs to know about the world while updating.
pub struct FrameContext<'a> {
    /// Active map.
    pub map: &'a MapGrid,
    /// Shared random source.
    pub rng: &'a mut StdRng,
    /// Tunables.
    pub config: &'a GameConfig,
}

/// Per-frame behaviour of every entity kind.
pub trait Actor {
    /// Advances the entity by `dt` seconds.
    fn update(&mut self, ctx: &mut FrameContext<'_>, dt: f32);
    /// Queues the entity's sprite relative to `camera`.
    fn draw(&self, renderer: &mut dyn Renderer, camera: Rect);
    /// Sprite sheet cell to draw this frame.
    fn sprite_offsets(&self) -> Vec2;
}

impl Entity {
    /// The player at its configured spawn point.
    pub fn player(cfg: &PlayerConfig, texture: TextureHandle) -> Self {
        Entity {
            position: vec2(cfg.spawn_x, cfg.spawn_y),
            size: vec2(cfg.width, cfg.height),
            velocity: Vec2::ZERO,
            facing: Direction::Down,
            texture,
            sprite_offset: Vec2::ZERO,
            idle: None,
            kind: EntityKind::Player(PlayerState {
                hp: cfg.max_hp,
                max_hp: cfg.max_hp,
                speed: cfg.velocity,
                damage_cooldown: 0.0,
                visibility_timer: 0.0,
                damaged_alpha: cfg.damaged_alpha,
            }),
        }
    }

    /// An NPC or enemy from the spawns file.
    pub fn from_spawn(def: &SpawnDef, texture: TextureHandle, enemy_hp: i32) -> Self {
        let kind = if def.is_enemy {
            EntityKind::Enemy {
                id: def.id,
                hp: enemy_hp,
            }
        } else {
            EntityKind::Spawn { id: def.id }
        };
        Entity {
            position: def.position,
            size: def.size,
            velocity: Vec2::ZERO,
            facing: Direction::Down,
            texture,
            sprite_offset: def.sprite_offset,
            idle: def.idle_moves.then_some(IdleMovement {
                timer: 0.0,
                direction: Direction::None,
            }),
            kind,
        }
    }

    /// Half extents of the bounding box.
    pub fn half_size(&self) -> Vec2 {
        self.size / 2.0
    }

    /// Player payload, if this is the player.
    pub fn player_state(&self) -> Option<&PlayerState> {
        match &self.kind {
            EntityKind::Player(state) => Some(state),
            _ => None,
        }
    }

    /// Mutable player payload, if this is the player.
    pub fn player_state_mut(&mut self) -> Option<&mut PlayerState> {
        match &mut self.kind {
            EntityKind::Player(state) => Some(state),
            _ => None,
        }
    }

    /// Whether this is an enemy.
    pub fn is_enemy(&self) -> bool {
        matches!(self.kind, EntityKind::Enemy { .. })
    }

    /// Applies a direction key press: adds the player speed on that axis,
    /// clamped to one key's worth, and faces that way.
    pub fn on_key_down(&mut self, direction: Direction) {
        let Some(speed) = self.player_state().map(|p| p.speed) else {
            return;
        };
        if direction == Direction::None {
            return;
        }
        self.velocity += direction.unit() * speed;
        self.velocity = self.velocity.clamp(Vec2::splat(-speed), Vec2::splat(speed));
        self.facing = direction;
    }

    /// Reverses [`Entity::on_key_down`] for a released key.
    pub fn on_key_up(&mut self, direction: Direction) {
        let Some(speed) = self.player_state().map(|p| p.speed) else {
            return;
        };
        self.velocity -= direction.unit() * speed;
        self.velocity = self.velocity.clamp(Vec2::splat(-speed), Vec2::splat(speed));
    }

    fn wander(&mut self, ctx: &mut FrameContext<'_>, dt: f32) {
        let speed = if self.is_enemy() {
            ctx.config.enemy_velocity
        } else {
            ctx.config.npc_velocity
        };
        let Some(idle) = self.idle.as_mut() else {
            return;
        };

        idle.timer -= dt;
        if idle.timer <= 0.0 {
            idle.timer = ctx.config.idle_cooldown;
            let pick = ctx.rng.gen_range(0..Direction::IDLE_CHOICES.len());
            idle.direction = Direction::IDLE_CHOICES[pick];
        }

        let direction = idle.direction;
        self.velocity = direction.unit() * speed;
        if direction != Direction::None {
            self.facing = direction;
        }
    }

    fn player_sprite_offsets(&self) -> Vec2 {
        let (w, h) = (self.size.x, self.size.y);
        let moving = self.velocity != Vec2::ZERO;
        match (moving, self.facing) {
            (true, Direction::Up) => vec2(w, h),
            (true, Direction::Down) => vec2(w, 0.0),
            (true, Direction::Left) => vec2(w * 2.0, h),
            (true, Direction::Right) => vec2(0.0, h * 2.0),
            (false, Direction::Up) => vec2(0.0, h * 3.0),
            (false, Direction::Down) => vec2(w * 2.0, h * 2.0),
            (false, Direction::Left) => vec2(w * 2.0, h * 3.0),
            (false, Direction::Right) => vec2(w, h * 3.0),
            (_, Direction::None) => Vec2::ZERO,
        }
    }
}

impl Actor for Entity {
    fn update(&mut self, ctx: &mut FrameContext<'_>, dt: f32) {
        if let EntityKind::Player(state) = &mut self.kind {
            state.damage_cooldown = (state.damage_cooldown - dt).max(0.0);
            state.visibility_timer = (state.visibility_timer - dt).max(0.0);
        } else if self.idle.is_some() {
            self.wander(ctx, dt);
        } else {
            return;
        }
        self.position = motion::step(ctx.map, self.position, self.size, self.velocity, dt);
    }

    fn draw(&self, renderer: &mut dyn Renderer, camera: Rect) {
        let (layer, tint) = match &self.kind {
            EntityKind::Player(state) if state.visibility_timer > 0.0 => {
                (DrawLayer::Player, Color::from_rgba(255, 255, 255, state.damaged_alpha))
            }
            EntityKind::Player(_) => (DrawLayer::Player, WHITE),
            _ => (DrawLayer::Spawns, WHITE),
        };
        let offset = self.sprite_offsets();
        let top_left = self.position - self.half_size();
        renderer.queue_sprite(
            layer,
            self.texture,
            Rect::new(offset.x, offset.y, self.size.x, self.size.y),
            Rect::new(
                top_left.x - camera.x,
                top_left.y - camera.y,
                self.size.x,
                self.size.y,
            ),
            tint,
        );
    }

    fn sprite_offsets(&self) -> Vec2 {
        match self.kind {
            EntityKind::Player(_) => self.player_sprite_offsets(),
            _ => self.sprite_offset,
        }
    }
}
