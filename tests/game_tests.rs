// tests/game_tests.rs

mod common;

use common::{content, fixture, write, FakeAssets, RecordingRenderer, CONFIG};
use macroquad::prelude::*;
use macroquad_tile_quest::{
    collect_hearts, DrawLayer, Entity, EntityKind, FrameOutcome, Game, MapError, TextureHandle, World,
};

const DT: f32 = 0.1;

fn start() -> (Game, FakeAssets, std::path::PathBuf) {
    let dir = fixture();
    let mut assets = FakeAssets::default();
    let game = Game::new(content(&dir), &mut assets, 7).expect("game should start");
    (game, assets, dir)
}

fn step_on_front_door(game: &mut Game) {
    game.player_mut().position = vec2(64.0, 94.0);
}

#[test]
fn starts_in_the_house() {
    let (game, assets, _dir) = start();
    assert_eq!(game.map().dimensions(), (8, 8, 2));
    assert_eq!(game.player().position, vec2(40.0, 40.0));
    assert_eq!(game.player().player_state().expect("player").hp, 6);
    assert_eq!(assets.live_names(), vec!["player.png".to_owned(), "tiles.png".to_owned()]);
    assert!(!game.is_switch_pending());
}

#[test]
fn player_walks_and_is_stopped_by_walls() {
    let (mut game, mut assets, _dir) = start();

    game.inject_key_down(KeyCode::D);
    game.inject_frame(DT, &mut assets).expect("frame");
    assert_eq!(game.player().position, vec2(50.0, 40.0));

    // Column 4 of row 2 holds a blocking object on the upper layer.
    game.player_mut().position = vec2(60.0, 40.0);
    game.inject_frame(DT, &mut assets).expect("frame");
    assert_eq!(game.player().position, vec2(60.0, 40.0));

    game.inject_key_up(KeyCode::D);
    game.inject_key_down(KeyCode::S);
    game.inject_frame(DT, &mut assets).expect("frame");
    assert_eq!(game.player().position, vec2(60.0, 50.0));
}

#[test]
fn teleporter_switch_happens_on_the_next_frame() {
    let (mut game, mut assets, _dir) = start();
    step_on_front_door(&mut game);

    assert_eq!(game.inject_frame(DT, &mut assets).expect("frame"), FrameOutcome::Simulated);
    assert!(game.is_switch_pending());
    assert_eq!(game.map().dimensions(), (8, 8, 2));

    game.inject_key_down(KeyCode::Right);
    assert_eq!(game.inject_frame(DT, &mut assets).expect("frame"), FrameOutcome::Switched);
    assert!(!game.is_switch_pending());
    assert_eq!(game.map().dimensions(), (6, 6, 1));
    // Relocated exactly; no motion was applied during the switch frame.
    assert_eq!(game.player().position, vec2(40.0, 40.0));
    assert_eq!(game.world().entities.len(), 2);
    assert_eq!(
        assets.live_names(),
        vec![
            "bat.png".to_owned(),
            "npc.png".to_owned(),
            "player.png".to_owned(),
            "tiles.png".to_owned()
        ]
    );

    assert_eq!(game.inject_frame(DT, &mut assets).expect("frame"), FrameOutcome::Simulated);
    assert_eq!(game.player().position, vec2(50.0, 40.0));
}

#[test]
fn switch_frame_draws_only_the_map() {
    let (mut game, mut assets, _dir) = start();
    step_on_front_door(&mut game);
    game.inject_frame(DT, &mut assets).expect("frame");
    game.inject_frame(DT, &mut assets).expect("frame");

    let mut renderer = RecordingRenderer::default();
    game.draw(&mut renderer);
    assert!(!renderer.sprites.is_empty());
    assert!(renderer
        .sprites
        .iter()
        .all(|(layer, ..)| matches!(layer, DrawLayer::Ground | DrawLayer::Objects)));

    game.inject_frame(DT, &mut assets).expect("frame");
    let mut renderer = RecordingRenderer::default();
    game.draw(&mut renderer);
    assert!(renderer.sprites.iter().any(|(layer, ..)| *layer == DrawLayer::Player));
    assert!(renderer.sprites.iter().any(|(layer, ..)| *layer == DrawLayer::Spawns));
}

#[test]
fn failed_switch_keeps_the_previous_world() {
    let dir = fixture();
    let mut assets = FakeAssets::default();
    let mut game = Game::new(content(&dir), &mut assets, 7).expect("game should start");
    write(&dir, "cave_base.csv", "1,1\n1,1,1\n");

    step_on_front_door(&mut game);
    game.inject_frame(DT, &mut assets).expect("frame");
    let err = game.inject_frame(DT, &mut assets).unwrap_err();
    assert!(matches!(err, MapError::RaggedRow { .. }));

    assert_eq!(game.map().dimensions(), (8, 8, 2));
    assert_eq!(game.player().position, vec2(64.0, 94.0));
    assert!(!game.is_switch_pending());
    assert_eq!(assets.live_names(), vec!["player.png".to_owned(), "tiles.png".to_owned()]);

    // Standing on the broken door does not retry every frame.
    game.inject_frame(DT, &mut assets).expect("frame");
    assert!(!game.is_switch_pending());

    // Stepping off and back on tries again.
    game.player_mut().position = vec2(40.0, 40.0);
    game.inject_frame(DT, &mut assets).expect("frame");
    step_on_front_door(&mut game);
    game.inject_frame(DT, &mut assets).expect("frame");
    assert!(game.is_switch_pending());
}

#[test]
fn round_trip_back_to_the_house() {
    let (mut game, mut assets, _dir) = start();
    step_on_front_door(&mut game);
    game.inject_frame(DT, &mut assets).expect("frame");
    game.inject_frame(DT, &mut assets).expect("frame");

    game.player_mut().position = vec2(72.0, 30.0);
    game.inject_frame(0.0, &mut assets).expect("frame");
    assert!(game.is_switch_pending());
    assert_eq!(game.inject_frame(DT, &mut assets).expect("frame"), FrameOutcome::Switched);
    assert_eq!(game.map().dimensions(), (8, 8, 2));
    assert_eq!(game.player().position, vec2(64.0, 80.0));
    assert_eq!(assets.live_names(), vec!["player.png".to_owned(), "tiles.png".to_owned()]);
}

#[test]
fn idle_npc_wanders_only_on_walkable_tiles() {
    let (mut game, mut assets, _dir) = start();
    step_on_front_door(&mut game);
    game.inject_frame(DT, &mut assets).expect("frame");
    game.inject_frame(DT, &mut assets).expect("frame");
    // Keep the bat away from the player.
    game.player_mut().position = vec2(72.0, 40.0);

    let start = game.world().entities[1].position;
    let mut moved = false;
    for _ in 0..200 {
        game.inject_frame(DT, &mut assets).expect("frame");
        let npc = &game.world().entities[1];
        let (row, col) = game.map().cell_of(npc.position);
        assert!(game.map().is_walkable(row, col), "npc left the floor at {}", npc.position);
        moved |= npc.position != start;
    }
    assert!(moved);
    // The bat does not wander.
    assert_eq!(game.world().entities[0].position, vec2(40.0, 72.0));
}

#[test]
fn stick_beyond_dead_zone_moves_the_player() {
    let (mut game, mut assets, _dir) = start();

    game.inject_stick(0, 5000);
    game.inject_frame(DT, &mut assets).expect("frame");
    assert_eq!(game.player().position, vec2(40.0, 40.0));

    game.inject_stick(1, 20000);
    game.inject_stick(1, 25000);
    game.inject_frame(DT, &mut assets).expect("frame");
    assert_eq!(game.player().position, vec2(40.0, 50.0));

    game.inject_stick(1, -20000);
    game.inject_frame(DT, &mut assets).expect("frame");
    assert_eq!(game.player().position, vec2(40.0, 40.0));

    game.inject_stick(1, 0);
    game.inject_frame(DT, &mut assets).expect("frame");
    assert_eq!(game.player().position, vec2(40.0, 40.0));
    assert_eq!(game.player().velocity, Vec2::ZERO);
}

#[test]
fn camera_is_clamped_to_small_maps() {
    let (game, _assets, _dir) = start();
    let cam = game.camera();
    assert_eq!((cam.x, cam.y), (0.0, 0.0));
    assert_eq!((cam.w, cam.h), (400.0, 300.0));
}

#[test]
fn enemy_contact_and_hearts() {
    let (mut game, mut assets, _dir) = start();
    step_on_front_door(&mut game);
    game.inject_frame(DT, &mut assets).expect("frame");
    game.inject_frame(DT, &mut assets).expect("frame");

    // Walk into the bat.
    game.player_mut().position = vec2(40.0, 56.0);
    game.inject_frame(DT, &mut assets).expect("frame");
    let state = game.player().player_state().expect("player").clone();
    assert_eq!(state.hp, 5);
    assert!(state.damage_cooldown > 0.0);
    assert_eq!(game.player().position, vec2(40.0, 36.0));

    // Invulnerable while the cooldown runs.
    game.player_mut().position = vec2(40.0, 56.0);
    game.inject_frame(DT, &mut assets).expect("frame");
    assert_eq!(game.player().player_state().expect("player").hp, 5);

    // Three hits defeat the bat, which leaves a heart.
    game.player_mut().position = vec2(40.0, 48.0);
    game.player_mut().facing = macroquad_tile_quest::Direction::Down;
    for _ in 0..3 {
        let bat = game
            .world()
            .entities
            .iter()
            .find(|e| e.is_enemy())
            .map(|e| e.position);
        if let Some(p) = bat {
            game.player_mut().position = p - vec2(0.0, 24.0);
        }
        game.inject_key_down(KeyCode::Space);
        game.inject_frame(0.0, &mut assets).expect("frame");
    }
    assert!(game.world().entities.iter().all(|e| !e.is_enemy()));
    assert_eq!(game.world().hearts.len(), 1);

    let heart = game.world().hearts[0];
    game.player_mut().position = heart;
    game.inject_frame(0.0, &mut assets).expect("frame");
    assert!(game.world().hearts.is_empty());
    assert_eq!(game.player().player_state().expect("player").hp, 6);
    assert!(matches!(game.player().kind, EntityKind::Player(_)));
}

fn enter_cave(game: &mut Game, assets: &mut FakeAssets) {
    step_on_front_door(game);
    game.inject_frame(DT, assets).expect("frame");
    assert_eq!(game.inject_frame(DT, assets).expect("frame"), FrameOutcome::Switched);
}

#[test]
fn no_hit_points_left_ends_the_game() {
    let (mut game, mut assets, _dir) = start();
    enter_cave(&mut game, &mut assets);
    let npcs: Vec<Vec2> = game.world().entities.iter().map(|e| e.position).collect();

    game.inject_key_down(KeyCode::D);
    game.player_mut().player_state_mut().expect("player").hp = 0;
    assert!(game.is_game_over());

    for _ in 0..20 {
        assert_eq!(game.inject_frame(DT, &mut assets).expect("frame"), FrameOutcome::GameOver);
    }
    assert_eq!(game.player().position, vec2(40.0, 40.0));
    let after: Vec<Vec2> = game.world().entities.iter().map(|e| e.position).collect();
    assert_eq!(after, npcs);
}

#[test]
fn hearts_stay_on_the_ground_at_full_health() {
    let dir = fixture();
    let content = content(&dir);
    let mut assets = FakeAssets::default();
    let mut world = World::load(&content.config.start, &content, &mut assets).expect("house");
    let mut player = Entity::player(&content.config.player, TextureHandle(99));
    world.hearts.push(player.position);

    assert_eq!(collect_hearts(&mut player, &mut world), 0);
    assert_eq!(world.hearts.len(), 1);
    assert_eq!(player.player_state().expect("player").hp, 6);

    player.player_state_mut().expect("player").hp = 4;
    assert_eq!(collect_hearts(&mut player, &mut world), 1);
    assert!(world.hearts.is_empty());
    assert_eq!(player.player_state().expect("player").hp, 5);
}

fn player_alpha(game: &Game) -> f32 {
    let mut renderer = RecordingRenderer::default();
    game.draw(&mut renderer);
    renderer
        .tints
        .iter()
        .find(|(layer, _)| *layer == DrawLayer::Player)
        .map(|(_, tint)| tint.a)
        .expect("player drawn")
}

#[test]
fn player_is_translucent_after_a_hit() {
    let (mut game, mut assets, _dir) = start();
    enter_cave(&mut game, &mut assets);
    game.inject_frame(0.0, &mut assets).expect("frame");
    assert_eq!(player_alpha(&game), 1.0);

    game.player_mut().position = vec2(40.0, 56.0);
    game.inject_frame(DT, &mut assets).expect("frame");
    assert_eq!(game.player().player_state().expect("player").hp, 5);
    assert!((player_alpha(&game) - 75.0 / 255.0).abs() < 1e-6);

    for _ in 0..12 {
        game.inject_frame(DT, &mut assets).expect("frame");
    }
    assert_eq!(player_alpha(&game), 1.0);
}

#[test]
fn wandering_enemies_use_the_enemy_speed() {
    let dir = fixture();
    write(
        &dir,
        "game.json",
        &CONFIG.replacen(
            r#""player":"#,
            r#""enemy_velocity": 30, "npc_velocity": 80, "player":"#,
            1,
        ),
    );
    write(
        &dir,
        "cave_spawns.txt",
        "1,40,72,16,16,bat.png,0,0,true,true\n2,72,72,16,16,npc.png,16,0,true,false\n",
    );
    let mut assets = FakeAssets::default();
    let mut game = Game::new(content(&dir), &mut assets, 11).expect("game should start");
    enter_cave(&mut game, &mut assets);
    game.player_mut().player_state_mut().expect("player").damage_cooldown = 100.0;

    let mut seen = [false; 2];
    for _ in 0..40 {
        game.inject_frame(0.4, &mut assets).expect("frame");
        for (i, (e, speed)) in game.world().entities.iter().zip([30.0, 80.0]).enumerate() {
            let v = e.velocity.length();
            assert!(v == 0.0 || (v - speed).abs() < 1e-4, "entity {} moved at {}", i, v);
            seen[i] |= v > 0.0;
        }
    }
    assert_eq!(seen, [true, true]);
}
