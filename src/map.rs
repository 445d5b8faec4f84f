use std::path::{Path, PathBuf};

use macroquad::prelude::*;

use crate::catalog::{TileCatalog, TileDescriptor, TileFamilyId};
use crate::config::Content;
use crate::error::MapError;
use crate::loader::layer::{read_layer_file, LayerData};
use crate::render::{visible_tiles, Assets, DrawLayer, Renderer, TextureHandle};

/// Index of a layer inside a [`MapGrid`], in file order.
pub type LayerIdx = usize;

/// A tile at a fixed grid position with its descriptor resolved at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedTile {
    /// Tile id as read from the layer file (after empty-tile remapping).
    pub id: u32,
    /// Grid row.
    pub row: usize,
    /// Grid column.
    pub column: usize,
    /// Sprite cell and flags.
    pub descriptor: TileDescriptor,
}

/// All layers of the active map plus the tileset texture they share.
///
/// Every layer holds exactly `rows * columns` tiles; the first layer fixes
/// the dimensions.
#[derive(Debug)]
pub struct MapGrid {
    family: TileFamilyId,
    rows: usize,
    columns: usize,
    layers: Vec<Vec<PlacedTile>>,
    texture: TextureHandle,
    tile_size: Vec2,
}

impl MapGrid {
    /// Parses every layer file, resolves all tiles, then loads the texture.
    /// Nothing is loaded into `assets` if any layer fails.
    pub fn build(
        layer_paths: &[String],
        texture_path: &str,
        content: &Content,
        assets: &mut dyn Assets,
    ) -> Result<Self, MapError> {
        let family = family_of(layer_paths, content)?;
        let empty_tile_id = content.catalog.family(family)?.empty_tile_id();

        let mut layers = Vec::with_capacity(layer_paths.len());
        for path in layer_paths {
            let fs_path = content.resolve_path(path);
            let data = read_layer_file(&fs_path, empty_tile_id)?;
            layers.push((fs_path, data));
        }

        let mut grid = Self::from_layers(
            family,
            &layers,
            &content.catalog,
            content.config.tile_size(),
            TextureHandle(u32::MAX),
        )?;

        grid.texture = assets
            .load_texture(&content.resolve_path(texture_path))
            .map_err(|source| MapError::Texture {
                path: texture_path.to_owned(),
                source,
            })?;

        log::debug!(
            "built {}x{} map with {} layers (family {})",
            grid.rows,
            grid.columns,
            grid.layers.len(),
            family
        );
        Ok(grid)
    }

    /// Assembles a grid from already parsed layers.
    pub fn from_layers(
        family: TileFamilyId,
        layers: &[(PathBuf, LayerData)],
        catalog: &TileCatalog,
        tile_size: Vec2,
        texture: TextureHandle,
    ) -> Result<Self, MapError> {
        let Some((_, first)) = layers.first() else {
            return Err(MapError::InvalidConfig("map has no layers".to_owned()));
        };
        let (rows, columns) = (first.rows, first.columns);

        let mut placed = Vec::with_capacity(layers.len());
        for (path, data) in layers {
            check_parity(path, data, rows, columns)?;

            let mut tiles = Vec::with_capacity(rows * columns);
            for (idx, &id) in data.ids.iter().enumerate() {
                tiles.push(PlacedTile {
                    id,
                    row: idx / columns,
                    column: idx % columns,
                    descriptor: catalog.resolve(family, id)?,
                });
            }
            placed.push(tiles);
        }

        Ok(MapGrid {
            family,
            rows,
            columns,
            layers: placed,
            texture,
            tile_size,
        })
    }

    /// Tile at a grid position; `None` outside the grid.
    pub fn tile_at(&self, row: i32, column: i32, layer: LayerIdx) -> Option<&PlacedTile> {
        if row < 0 || column < 0 {
            return None;
        }
        let (row, column) = (row as usize, column as usize);
        if row >= self.rows || column >= self.columns {
            return None;
        }
        self.layers.get(layer)?.get(row * self.columns + column)
    }

    /// `(rows, columns, layers)`.
    pub fn dimensions(&self) -> (usize, usize, usize) {
        (self.rows, self.columns, self.layers.len())
    }

    /// Tile family every layer of this map uses.
    pub fn family(&self) -> TileFamilyId {
        self.family
    }

    /// Size of one tile in world pixels.
    pub fn tile_size(&self) -> Vec2 {
        self.tile_size
    }

    /// Size of the whole map in world pixels.
    pub fn pixel_size(&self) -> Vec2 {
        vec2(
            self.columns as f32 * self.tile_size.x,
            self.rows as f32 * self.tile_size.y,
        )
    }

    /// Grid cell containing a world position.
    pub fn cell_of(&self, p: Vec2) -> (i32, i32) {
        (
            (p.y / self.tile_size.y).floor() as i32,
            (p.x / self.tile_size.x).floor() as i32,
        )
    }

    /// Whether every layer has a walkable tile at the cell.
    pub fn is_walkable(&self, row: i32, column: i32) -> bool {
        (0..self.layers.len()).all(|layer| {
            self.tile_at(row, column, layer)
                .is_some_and(|t| t.descriptor.walkable)
        })
    }

    /// Queues the tiles under `camera`, layer by layer.
    pub fn draw(&self, renderer: &mut dyn Renderer, camera: Rect) {
        let visible = visible_tiles(camera, self.tile_size, self.rows, self.columns);
        let (tw, th) = (self.tile_size.x, self.tile_size.y);

        for tiles in &self.layers {
            for row in visible.rows.clone() {
                for column in visible.columns.clone() {
                    let tile = &tiles[row * self.columns + column];
                    let d = tile.descriptor;
                    let layer = if d.is_object {
                        DrawLayer::Objects
                    } else {
                        DrawLayer::Ground
                    };
                    renderer.queue_sprite(
                        layer,
                        self.texture,
                        Rect::new(d.sprite_column as f32 * tw, d.sprite_row as f32 * th, tw, th),
                        Rect::new(
                            column as f32 * tw - camera.x,
                            row as f32 * th - camera.y,
                            tw,
                            th,
                        ),
                        WHITE,
                    );
                }
            }
        }
    }

    /// Tears the map down, freeing its texture.
    pub fn release(self, assets: &mut dyn Assets) {
        assets.release_texture(self.texture);
    }
}

fn family_of(layer_paths: &[String], content: &Content) -> Result<TileFamilyId, MapError> {
    let Some(first) = layer_paths.first() else {
        return Err(MapError::InvalidConfig("map has no layers".to_owned()));
    };
    let expected = content.families.family_for(first)?;
    for path in &layer_paths[1..] {
        let found = content.families.family_for(path)?;
        if found != expected {
            return Err(MapError::MixedFamilies {
                path: path.clone(),
                expected,
                found,
            });
        }
    }
    Ok(expected)
}

fn check_parity(path: &Path, data: &LayerData, rows: usize, columns: usize) -> Result<(), MapError> {
    if data.rows != rows || data.columns != columns || data.ids.len() != rows * columns {
        return Err(MapError::LayerParity {
            path: path.to_path_buf(),
            expected_rows: rows,
            expected_columns: columns,
            rows: data.rows,
            columns: data.columns,
        });
    }
    Ok(())
}
