//! `x;y;layers;texture;teleporters;spawns;destX;destY` lines, layers comma-joined.

use std::path::Path;

use macroquad::prelude::*;

use crate::error::MapError;
use crate::loader::fields::{is_comment, read_file, split_fields, Record};
use crate::teleporter::{Destination, Teleporter};

/// Reads a teleporters file; every zone gets `size`.
pub fn read_teleporters_file(path: &Path, size: Vec2) -> Result<Vec<Teleporter>, MapError> {
    let text = read_file(path)?;
    parse_teleporters(path, &text, size)
}

/// Teleporters in file order.
pub fn parse_teleporters(path: &Path, text: &str, size: Vec2) -> Result<Vec<Teleporter>, MapError> {
    let mut out = Vec::new();
    for (n, line) in text.lines().enumerate() {
        if is_comment(line) {
            continue;
        }
        out.push(parse_line(path, n + 1, line, size)?);
    }
    Ok(out)
}

fn parse_line(path: &Path, line: usize, text: &str, size: Vec2) -> Result<Teleporter, MapError> {
    let mut rec = Record::new(path, line, text, ';');
    let x: f32 = rec.next_parsed("x")?;
    let y: f32 = rec.next_parsed("y")?;
    let layers = split_fields(rec.next_str("destinationLayers")?, ',')
        .into_iter()
        .filter(|l| !l.is_empty())
        .map(str::to_owned)
        .collect::<Vec<_>>();
    if layers.is_empty() {
        return Err(MapError::MissingField {
            path: path.to_path_buf(),
            line,
            field: "destinationLayers",
        });
    }
    let texture = rec.next_str("destinationTexture")?.to_owned();
    let teleporters = rec.next_str("destinationTeleporters")?.to_owned();
    let spawns = rec.next_str("destinationSpawns")?.to_owned();
    let dest_x: f32 = rec.next_parsed("destinationX")?;
    let dest_y: f32 = rec.next_parsed("destinationY")?;

    Ok(Teleporter {
        center: vec2(x, y),
        size,
        destination: Destination {
            layers,
            texture,
            teleporters,
            spawns,
            x: dest_x,
            y: dest_y,
        },
    })
}
