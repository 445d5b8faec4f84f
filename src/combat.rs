//! Enemy contact damage, player attacks and heart pickups.

use macroquad::prelude::*;

use crate::collision::overlaps;
use crate::config::PlayerConfig;
use crate::entity::{Entity, EntityKind};
use crate::motion::try_move;
use crate::world::World;

/// Hurts the player if it touches an enemy and is not invulnerable.
/// Returns whether damage was dealt.
pub fn enemy_contact(player: &mut Entity, world: &World, cfg: &PlayerConfig) -> bool {
    let vulnerable = player
        .player_state()
        .is_some_and(|p| p.damage_cooldown <= 0.0 && p.hp > 0);
    if !vulnerable {
        return false;
    }

    let Some(enemy) = world.entities.iter().find(|e| {
        e.is_enemy() && overlaps(player.position, player.half_size(), e.position, e.half_size())
    }) else {
        return false;
    };

    let away = (player.position - enemy.position).normalize_or_zero();
    let recoil = if away == Vec2::ZERO {
        -player.facing.unit()
    } else {
        away
    };
    player.position = try_move(
        &world.map,
        player.position,
        player.position + recoil * cfg.attack_recoil,
        player.size,
    );

    if let Some(state) = player.player_state_mut() {
        state.hp = (state.hp - 1).max(0);
        state.damage_cooldown = cfg.damage_cooldown;
        state.visibility_timer = cfg.visibility_restore;
        log::debug!("player hit, {} hp left", state.hp);
    }
    true
}

/// Strikes the box one player-length ahead. Every enemy in it loses a hit
/// point and is knocked back; defeated enemies drop a heart.
/// Returns the number of enemies hit.
pub fn player_attack(player: &Entity, world: &mut World, cfg: &PlayerConfig) -> usize {
    let reach = player.facing.unit() * player.size;
    if reach == Vec2::ZERO {
        return 0;
    }
    let center = player.position + reach;
    let half = player.half_size();

    let mut hits = 0;
    let World { map, entities, hearts, .. } = world;
    for e in entities.iter_mut() {
        if !e.is_enemy() || !overlaps(center, half, e.position, e.half_size()) {
            continue;
        }
        hits += 1;
        let knock = player.facing.unit() * cfg.attack_recoil;
        e.position = try_move(map, e.position, e.position + knock, e.size);
        if let EntityKind::Enemy { hp, .. } = &mut e.kind {
            *hp -= 1;
        }
    }

    entities.retain(|e| match e.kind {
        EntityKind::Enemy { hp, id } if hp <= 0 => {
            log::debug!("enemy {} defeated", id);
            hearts.push(e.position);
            false
        }
        _ => true,
    });
    hits
}

/// Consumes hearts the player overlaps, one hit point each, up to max hp.
pub fn collect_hearts(player: &mut Entity, world: &mut World) -> usize {
    let heart_half = world.heart_size() / 2.0;
    let (pos, half) = (player.position, player.half_size());
    let Some(state) = player.player_state_mut() else {
        return 0;
    };

    let before = world.hearts.len();
    world.hearts.retain(|&h| {
        if state.hp < state.max_hp && overlaps(pos, half, h, heart_half) {
            state.hp += 1;
            false
        } else {
            true
        }
    });
    before - world.hearts.len()
}
