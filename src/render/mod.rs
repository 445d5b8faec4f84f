//! Drawing and texture interfaces the game core talks to.
//!
//! The core never touches the GPU: it queues sprite-sheet cells and filled
//! rectangles through [`Renderer`] and obtains textures through [`Assets`].
//! [`MacroquadBackend`] implements both on top of Macroquad.

mod backend;
pub(crate) mod cull;

use std::path::Path;

use macroquad::prelude::*;

pub use backend::MacroquadBackend;
pub use cull::{visible_tiles, TileRange};

/// Opaque reference to a texture owned by an [`Assets`] implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Draw order, back to front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DrawLayer {
    /// Walkable floor tiles.
    Ground,
    /// Tiles flagged as objects.
    Objects,
    /// Non-player entities and pickups.
    Spawns,
    /// The player.
    Player,
}

/// Loads and frees textures.
pub trait Assets {
    /// Loads an image file.
    fn load_texture(&mut self, path: &Path) -> anyhow::Result<TextureHandle>;
    /// Pixel size of a loaded texture.
    fn texture_size(&self, texture: TextureHandle) -> Option<Vec2>;
    /// Frees a texture; the handle must not be used afterwards.
    fn release_texture(&mut self, texture: TextureHandle);
}

/// Accepts draw requests in camera-relative world pixels.
pub trait Renderer {
    /// Draws the `source` cell of `texture` into `dest`.
    fn queue_sprite(&mut self, layer: DrawLayer, texture: TextureHandle, source: Rect, dest: Rect, tint: Color);
    /// Draws a filled rectangle.
    fn queue_rect(&mut self, layer: DrawLayer, rect: Rect, color: Color);
}
