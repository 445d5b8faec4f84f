//! Comma separated layer grids: one line per row, one tile id per column.

use std::path::Path;

use crate::error::MapError;
use crate::loader::fields::read_file;

/// Raw tile ids of one layer, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerData {
    /// Non-blank lines.
    pub rows: usize,
    /// Ids per row.
    pub columns: usize,
    /// `rows * columns` ids.
    pub ids: Vec<u32>,
}

/// Reads a layer file; see [`parse_layer`].
pub fn read_layer_file(path: &Path, empty_tile_id: u32) -> Result<LayerData, MapError> {
    let text = read_file(path)?;
    parse_layer(path, &text, empty_tile_id)
}

/// Parses a layer. Blank lines are skipped, negative or malformed ids become
/// `empty_tile_id`, and every row must have as many ids as the first.
pub fn parse_layer(path: &Path, text: &str, empty_tile_id: u32) -> Result<LayerData, MapError> {
    let mut ids = Vec::new();
    let mut rows = 0;
    let mut columns = 0;

    for line in text.lines().filter(|l| !l.trim().is_empty()) {
        let before = ids.len();
        for token in line.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            ids.push(tile_id(token, empty_tile_id));
        }
        let found = ids.len() - before;

        if rows == 0 {
            columns = found;
        } else if found != columns {
            return Err(MapError::RaggedRow {
                path: path.to_path_buf(),
                row: rows,
                expected: columns,
                found,
            });
        }
        rows += 1;
    }

    if rows == 0 || columns == 0 {
        return Err(MapError::EmptyLayer {
            path: path.to_path_buf(),
        });
    }

    Ok(LayerData { rows, columns, ids })
}

fn tile_id(token: &str, empty_tile_id: u32) -> u32 {
    match token.parse::<i64>() {
        Ok(id) if id >= 0 && id <= u32::MAX as i64 => id as u32,
        _ => {
            log::debug!("tile id '{}' remapped to empty tile {}", token, empty_tile_id);
            empty_tile_id
        }
    }
}
