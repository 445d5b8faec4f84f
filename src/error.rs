use std::{error, fmt, io, path::PathBuf};

use crate::catalog::TileFamilyId;

/// Everything that can go wrong while loading content or switching maps.
#[derive(Debug)]
pub enum MapError {
    /// A data file could not be opened or read.
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The game configuration is not valid JSON for [`crate::GameConfig`].
    Json {
        /// Config file that failed.
        path: PathBuf,
        /// Underlying parse error.
        source: serde_json::Error,
    },
    /// The texture backend refused to load an image.
    Texture {
        /// Image path as written in the data files.
        path: String,
        /// Backend error.
        source: anyhow::Error,
    },
    /// A teleporter or spawn line ended before a required field.
    MissingField {
        /// File containing the line.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// Name of the missing field.
        field: &'static str,
    },
    /// A teleporter or spawn field could not be parsed.
    InvalidField {
        /// File containing the line.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// Name of the field.
        field: &'static str,
        /// Raw (trimmed) field text.
        value: String,
    },
    /// A layer file produced no rows.
    EmptyLayer {
        /// Layer file.
        path: PathBuf,
    },
    /// A row inside one layer has a different column count than the first row.
    RaggedRow {
        /// Layer file.
        path: PathBuf,
        /// 0-based row index.
        row: usize,
        /// Column count of the first row.
        expected: usize,
        /// Column count of this row.
        found: usize,
    },
    /// A layer's dimensions differ from the first layer of the same map.
    LayerParity {
        /// Offending layer file.
        path: PathBuf,
        /// Rows established by the first layer.
        expected_rows: usize,
        /// Columns established by the first layer.
        expected_columns: usize,
        /// Rows found in this layer.
        rows: usize,
        /// Columns found in this layer.
        columns: usize,
    },
    /// A layer file path has no entry in the tile family registry.
    UnknownFamily {
        /// Layer path as written in the data files.
        path: String,
    },
    /// Layers of one map belong to different tile families.
    MixedFamilies {
        /// Offending layer path.
        path: String,
        /// Family of the first layer.
        expected: TileFamilyId,
        /// Family of this layer.
        found: TileFamilyId,
    },
    /// A tile id is outside the family's tileset.
    UnknownTile {
        /// Family that was queried.
        family: TileFamilyId,
        /// Tile id that was queried.
        id: u32,
    },
    /// Two families share an id in the configuration.
    DuplicateFamily {
        /// Duplicated id.
        id: TileFamilyId,
    },
    /// Any other inconsistency in the configuration.
    InvalidConfig(String),
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::Io { path, source } => {
                write!(f, "I/O error reading {}: {}", path.display(), source)
            }
            MapError::Json { path, source } => {
                write!(f, "Failed to parse JSON {}: {}", path.display(), source)
            }
            MapError::Texture { path, source } => {
                write!(f, "Failed to load texture {}: {:#}", path, source)
            }
            MapError::MissingField { path, line, field } => write!(
                f,
                "{}:{}: missing field '{}'",
                path.display(),
                line,
                field
            ),
            MapError::InvalidField {
                path,
                line,
                field,
                value,
            } => write!(
                f,
                "{}:{}: invalid value '{}' for field '{}'",
                path.display(),
                line,
                value,
                field
            ),
            MapError::EmptyLayer { path } => {
                write!(f, "Layer file {} contains no rows", path.display())
            }
            MapError::RaggedRow {
                path,
                row,
                expected,
                found,
            } => write!(
                f,
                "Layer file {} row {} has {} columns, expected {}",
                path.display(),
                row,
                found,
                expected
            ),
            MapError::LayerParity {
                path,
                expected_rows,
                expected_columns,
                rows,
                columns,
            } => write!(
                f,
                "Layer file {} is {}x{}, but the map is {}x{}",
                path.display(),
                rows,
                columns,
                expected_rows,
                expected_columns
            ),
            MapError::UnknownFamily { path } => {
                write!(f, "No tile family registered for layer file {}", path)
            }
            MapError::MixedFamilies {
                path,
                expected,
                found,
            } => write!(
                f,
                "Layer file {} belongs to tile family {}, but the map uses family {}",
                path, found, expected
            ),
            MapError::UnknownTile { family, id } => {
                write!(f, "Tile id {} does not exist in tile family {}", id, family)
            }
            MapError::DuplicateFamily { id } => {
                write!(f, "Tile family {} is configured more than once", id)
            }
            MapError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl error::Error for MapError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            MapError::Io { source, .. } => Some(source),
            MapError::Json { source, .. } => Some(source),
            MapError::Texture { source, .. } => Some(&**source),
            _ => None,
        }
    }
}
