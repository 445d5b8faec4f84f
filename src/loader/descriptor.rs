//! `<id>:<true|false>` flag files describing a tileset.

use std::collections::HashMap;
use std::path::Path;

use crate::error::MapError;
use crate::loader::fields::read_file;

pub fn read_flag_file(path: &Path) -> Result<HashMap<u32, bool>, MapError> {
    let text = read_file(path)?;
    Ok(parse_flags(path, &text))
}

/// Lines that do not parse are skipped; their ids keep the `false` default.
pub fn parse_flags(path: &Path, text: &str) -> HashMap<u32, bool> {
    let mut flags = HashMap::new();
    for (n, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let parsed = line.split_once(':').and_then(|(id, flag)| {
            Some((id.trim().parse::<u32>().ok()?, flag.trim().parse::<bool>().ok()?))
        });
        match parsed {
            Some((id, flag)) => {
                flags.insert(id, flag);
            }
            None => log::warn!("{}:{}: skipping malformed flag '{}'", path.display(), n + 1, line),
        }
    }
    flags
}
