use std::path::PathBuf;

use anyhow::Context;
use macroquad::prelude::*;
use macroquad_tile_quest::{Content, FrameOutcome, Game, MacroquadBackend};

const KEYS: [KeyCode; 10] = [
    KeyCode::W,
    KeyCode::A,
    KeyCode::S,
    KeyCode::D,
    KeyCode::Up,
    KeyCode::Down,
    KeyCode::Left,
    KeyCode::Right,
    KeyCode::Space,
    KeyCode::J,
];

fn window_conf() -> Conf {
    Conf {
        window_title: "Tile Quest".into(),
        window_width: 800,
        window_height: 600,
        ..Default::default()
    }
}

fn config_path() -> PathBuf {
    std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("resources/game.json"))
}

async fn run() -> anyhow::Result<()> {
    let path = config_path();
    let content = Content::load(&path).with_context(|| format!("Loading {}", path.display()))?;
    let mut backend = MacroquadBackend::new(content.config.render_scale);
    let seed = (get_time() * 1_000_000.0) as u64;
    let mut game = Game::new(content, &mut backend, seed).context("Starting game")?;

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }
        for key in KEYS {
            if is_key_pressed(key) {
                game.inject_key_down(key);
            }
            if is_key_released(key) {
                game.inject_key_up(key);
            }
        }

        match game.inject_frame(get_frame_time(), &mut backend) {
            Ok(FrameOutcome::GameOver) => {
                log::info!("game over");
                break;
            }
            Ok(_) => {}
            Err(e) => log::error!("{:#}", anyhow::Error::new(e)),
        }

        clear_background(BLACK);
        game.draw(&mut backend);
        backend.flush();

        next_frame().await;
    }

    game.shutdown(&mut backend);
    Ok(())
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();
    if let Err(e) = run().await {
        log::error!("{:#}", e);
    }
}
