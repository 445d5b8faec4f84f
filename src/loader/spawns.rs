//! `id,x,y,width,height,texture,offsetX,offsetY,idleMoves,isEnemy` lines.

use std::path::Path;

use macroquad::prelude::*;

use crate::entity::SpawnDef;
use crate::error::MapError;
use crate::loader::fields::{is_comment, read_file, Record};

/// Reads a spawns file; see [`parse_spawns`].
pub fn read_spawns_file(path: &Path) -> Result<Vec<SpawnDef>, MapError> {
    let text = read_file(path)?;
    parse_spawns(path, &text)
}

/// Parses spawn lines, skipping comments. A short or malformed line fails the load.
pub fn parse_spawns(path: &Path, text: &str) -> Result<Vec<SpawnDef>, MapError> {
    let mut out = Vec::new();
    for (n, line) in text.lines().enumerate() {
        if is_comment(line) {
            continue;
        }
        let mut rec = Record::new(path, n + 1, line, ',');
        out.push(SpawnDef {
            id: rec.next_parsed("id")?,
            position: vec2(rec.next_parsed("spawnX")?, rec.next_parsed("spawnY")?),
            size: vec2(rec.next_parsed("width")?, rec.next_parsed("height")?),
            texture: rec.next_str("texturePath")?.to_owned(),
            sprite_offset: vec2(
                rec.next_parsed("spriteOffsetX")?,
                rec.next_parsed("spriteOffsetY")?,
            ),
            idle_moves: rec.next_parsed("shouldIdleMove")?,
            is_enemy: rec.next_parsed("isEnemy")?,
        });
    }
    Ok(out)
}
