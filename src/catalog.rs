//! Tile id → sprite cell and behaviour flags, one table per tileset family.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::error::MapError;
use crate::loader::descriptor::read_flag_file;

/// Identifies the tileset (and descriptor files) a map layer is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct TileFamilyId(pub u32);

impl fmt::Display for TileFamilyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a single tile id looks like and how entities interact with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TileDescriptor {
    /// Row of the tile's cell in the sprite sheet.
    pub sprite_row: u32,
    /// Column of the tile's cell in the sprite sheet.
    pub sprite_column: u32,
    /// Whether an entity's center may occupy the tile.
    pub walkable: bool,
    /// Objects draw above the ground layer.
    pub is_object: bool,
}

/// Fixed sprite-sheet geometry of a tileset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TilesetGeometry {
    /// Cells per sprite-sheet row.
    pub columns: u32,
    /// Sprite-sheet rows.
    pub rows: u32,
}

impl TilesetGeometry {
    /// Number of tile ids the sheet holds; `None` if it does not fit in a `u32`.
    pub fn tile_count(&self) -> Option<u32> {
        self.columns.checked_mul(self.rows)
    }
}

/// Descriptors for every tile id of one tileset.
#[derive(Debug, Clone)]
pub struct TileFamily {
    id: TileFamilyId,
    descriptors: Vec<TileDescriptor>,
    empty_tile_id: u32,
}

impl TileFamily {
    /// Reads the walkable and is-object descriptor files of a tileset.
    pub fn load(
        id: TileFamilyId,
        geometry: TilesetGeometry,
        empty_tile_id: u32,
        walkable_path: &Path,
        is_object_path: &Path,
    ) -> Result<Self, MapError> {
        let walkable = read_flag_file(walkable_path)?;
        let is_object = read_flag_file(is_object_path)?;
        Self::from_flags(id, geometry, empty_tile_id, &walkable, &is_object)
    }

    /// Synthesizes one descriptor per id; ids missing from a flag table get `false`.
    pub fn from_flags(
        id: TileFamilyId,
        geometry: TilesetGeometry,
        empty_tile_id: u32,
        walkable: &HashMap<u32, bool>,
        is_object: &HashMap<u32, bool>,
    ) -> Result<Self, MapError> {
        if geometry.columns == 0 || geometry.rows == 0 {
            return Err(MapError::InvalidConfig(format!(
                "tile family {} has an empty tileset",
                id
            )));
        }
        let Some(tile_count) = geometry.tile_count() else {
            return Err(MapError::InvalidConfig(format!(
                "tile family {} has too many tiles ({}x{})",
                id, geometry.columns, geometry.rows
            )));
        };
        if empty_tile_id >= tile_count {
            return Err(MapError::InvalidConfig(format!(
                "empty tile {} is outside tile family {} ({} tiles)",
                empty_tile_id, id, tile_count
            )));
        }

        let descriptors = (0..tile_count)
            .map(|tile| TileDescriptor {
                sprite_row: tile / geometry.columns,
                sprite_column: tile % geometry.columns,
                walkable: walkable.get(&tile).copied().unwrap_or(false),
                is_object: is_object.get(&tile).copied().unwrap_or(false),
            })
            .collect();

        Ok(TileFamily {
            id,
            descriptors,
            empty_tile_id,
        })
    }

    /// Family id.
    pub fn id(&self) -> TileFamilyId {
        self.id
    }

    /// Id substituted for negative or malformed layer entries.
    pub fn empty_tile_id(&self) -> u32 {
        self.empty_tile_id
    }

    /// Descriptor of `tile`, if the tileset has it.
    pub fn get(&self, tile: u32) -> Option<&TileDescriptor> {
        self.descriptors.get(tile as usize)
    }
}

/// All tile families known to the game, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct TileCatalog {
    families: HashMap<TileFamilyId, TileFamily>,
}

impl TileCatalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a family; ids must be unique.
    pub fn insert(&mut self, family: TileFamily) -> Result<(), MapError> {
        let id = family.id();
        if self.families.contains_key(&id) {
            return Err(MapError::DuplicateFamily { id });
        }
        self.families.insert(id, family);
        Ok(())
    }

    /// The family registered under `id`.
    pub fn family(&self, id: TileFamilyId) -> Result<&TileFamily, MapError> {
        self.families
            .get(&id)
            .ok_or_else(|| MapError::InvalidConfig(format!("tile family {} is not loaded", id)))
    }

    /// Looks up a descriptor. Unknown pairs are data errors and are reported, never defaulted.
    pub fn resolve(&self, family: TileFamilyId, tile: u32) -> Result<TileDescriptor, MapError> {
        self.families
            .get(&family)
            .and_then(|f| f.get(tile))
            .copied()
            .ok_or(MapError::UnknownTile { family, id: tile })
    }
}
