#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use macroquad::prelude::*;
use macroquad_tile_quest::{Assets, Content, DrawLayer, Renderer, TextureHandle};

pub fn temp_dir() -> PathBuf {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock went backwards")
        .as_nanos();
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    let dir = std::env::temp_dir().join(format!("mq_tile_quest_{nanos}_{n}"));
    fs::create_dir_all(&dir).expect("failed to create temp dir");
    dir
}

pub fn write(dir: &Path, name: &str, text: &str) {
    fs::write(dir.join(name), text).expect("failed to write fixture");
}

/// Tileset: 4x4 cells. 1 floor, 2 wall, 3 rug (object, walkable), 15 empty (walkable).
pub const WALKABLE: &str = "0:false\n1:true\n2:false\n3:true\n15:true\n";
pub const IS_OBJECT: &str = "3:true\n";

/// 8x8 room, walls around the border.
pub const HOUSE_BASE: &str = "\
2,2,2,2,2,2,2,2
2,1,1,1,1,1,1,2
2,1,1,1,1,1,1,2
2,1,1,1,1,1,1,2
2,1,1,1,1,1,1,2
2,1,1,1,1,1,1,2
2,1,1,1,1,1,1,2
2,2,2,2,2,2,2,2
";

/// Overlay with a rug and one blocking tile at row 2, column 4.
pub const HOUSE_OBJECTS: &str = "\
-1,-1,-1,-1,-1,-1,-1,-1
-1,-1,-1,-1,-1,-1,-1,-1
-1,-1,-1,-1,2,-1,-1,-1
-1,3,3,-1,-1,-1,-1,-1
-1,-1,-1,-1,-1,-1,-1,-1
-1,-1,-1,-1,-1,-1,-1,-1
-1,-1,-1,-1,-1,-1,-1,-1
-1,-1,-1,-1,-1,-1,-1,-1
";

/// 6x6 cave.
pub const CAVE_BASE: &str = "\
2,2,2,2,2,2
2,1,1,1,1,2
2,1,1,1,1,2
2,1,1,1,1,2
2,1,1,1,1,2
2,2,2,2,2,2
";

/// Door at the bottom of the house leading to the cave.
pub const HOUSE_TELEPORTERS: &str = "\
-- front door
64;104;cave_base.csv;tiles.png;cave_teleporters.txt;cave_spawns.txt;40;40
";

pub const CAVE_TELEPORTERS: &str = "\
72;24;house_base.csv,house_objects.csv;tiles.png;house_teleporters.txt;house_spawns.txt;64;80
";

pub const HOUSE_SPAWNS: &str = "\
-- nobody home
";

pub const CAVE_SPAWNS: &str = "\
1,40,72,16,16,bat.png,0,0,false,true
2,72,72,16,16,npc.png,16,0,true,false
";

pub const CONFIG: &str = r#"{
  "player": { "texture": "player.png", "spawn_x": 40, "spawn_y": 40 },
  "start": {
    "layers": ["house_base.csv", "house_objects.csv"],
    "texture": "tiles.png",
    "teleporters": "house_teleporters.txt",
    "spawns": "house_spawns.txt"
  },
  "families": [
    {
      "id": 0,
      "name": "interior",
      "walkable": "walkable.txt",
      "is_object": "is_object.txt",
      "columns": 4,
      "rows": 4,
      "empty_tile_id": 15,
      "layers": [
        "house_base.csv", "house_objects.csv", "cave_base.csv",
        "broken.csv", "wide.csv"
      ]
    },
    {
      "id": 1,
      "name": "outdoor",
      "walkable": "walkable.txt",
      "is_object": "is_object.txt",
      "columns": 4,
      "rows": 4,
      "empty_tile_id": 15,
      "layers": ["field.csv"]
    }
  ]
}"#;

/// Writes the two-map fixture and returns its directory.
pub fn fixture() -> PathBuf {
    let dir = temp_dir();
    write(&dir, "game.json", CONFIG);
    write(&dir, "walkable.txt", WALKABLE);
    write(&dir, "is_object.txt", IS_OBJECT);
    write(&dir, "house_base.csv", HOUSE_BASE);
    write(&dir, "house_objects.csv", HOUSE_OBJECTS);
    write(&dir, "house_teleporters.txt", HOUSE_TELEPORTERS);
    write(&dir, "house_spawns.txt", HOUSE_SPAWNS);
    write(&dir, "cave_base.csv", CAVE_BASE);
    write(&dir, "cave_teleporters.txt", CAVE_TELEPORTERS);
    write(&dir, "cave_spawns.txt", CAVE_SPAWNS);
    write(&dir, "field.csv", "1,1\n1,1\n");
    write(&dir, "wide.csv", "1,1,1,1,1,1,1,1,1\n");
    dir
}

pub fn content(dir: &Path) -> Content {
    Content::load(&dir.join("game.json")).expect("content should load")
}

/// Texture store that never touches the GPU. Paths whose file name is in
/// `failing` refuse to load.
#[derive(Default)]
pub struct FakeAssets {
    next: u32,
    pub live: HashMap<TextureHandle, PathBuf>,
    pub failing: Vec<String>,
}

impl FakeAssets {
    pub fn failing_on(names: &[&str]) -> Self {
        FakeAssets {
            failing: names.iter().map(|n| n.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn live_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .live
            .values()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

impl Assets for FakeAssets {
    fn load_texture(&mut self, path: &Path) -> anyhow::Result<TextureHandle> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if self.failing.contains(&name) {
            anyhow::bail!("cannot decode {}", name);
        }
        let handle = TextureHandle(self.next);
        self.next += 1;
        self.live.insert(handle, path.to_path_buf());
        Ok(handle)
    }

    fn texture_size(&self, texture: TextureHandle) -> Option<Vec2> {
        self.live.get(&texture).map(|_| vec2(64.0, 64.0))
    }

    fn release_texture(&mut self, texture: TextureHandle) {
        self.live.remove(&texture);
    }
}

#[derive(Default)]
pub struct RecordingRenderer {
    pub sprites: Vec<(DrawLayer, TextureHandle, Rect, Rect)>,
    pub rects: Vec<(DrawLayer, Rect)>,
    pub tints: Vec<(DrawLayer, Color)>,
}

impl Renderer for RecordingRenderer {
    fn queue_sprite(&mut self, layer: DrawLayer, texture: TextureHandle, source: Rect, dest: Rect, tint: Color) {
        self.sprites.push((layer, texture, source, dest));
        self.tints.push((layer, tint));
    }

    fn queue_rect(&mut self, layer: DrawLayer, rect: Rect, _color: Color) {
        self.rects.push((layer, rect));
    }
}
