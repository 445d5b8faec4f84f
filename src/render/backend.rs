use std::path::Path;

use anyhow::Context;
use macroquad::prelude::*;

use super::{Assets, DrawLayer, Renderer, TextureHandle};

enum Queued {
    Sprite {
        texture: TextureHandle,
        source: Rect,
        dest: Rect,
        tint: Color,
    },
    Rect {
        rect: Rect,
        color: Color,
    },
}

/// Macroquad implementation of [`Assets`] and [`Renderer`].
///
/// Draw requests are queued during the frame and flushed layer by layer,
/// scaled by the render scale.
pub struct MacroquadBackend {
    textures: Vec<Option<Texture2D>>,
    queue: Vec<(DrawLayer, Queued)>,
    scale: f32,
}

impl MacroquadBackend {
    /// A backend drawing every world pixel as `scale` screen pixels.
    pub fn new(scale: f32) -> Self {
        MacroquadBackend {
            textures: Vec::new(),
            queue: Vec::new(),
            scale,
        }
    }

    /// Draws and clears everything queued since the last flush.
    pub fn flush(&mut self) {
        self.queue.sort_by_key(|(layer, _)| *layer);
        let s = self.scale;

        for (_, item) in self.queue.drain(..) {
            match item {
                Queued::Sprite {
                    texture,
                    source,
                    dest,
                    tint,
                } => {
                    let Some(Some(tex)) = self.textures.get(texture.0 as usize) else {
                        continue;
                    };
                    draw_texture_ex(
                        tex,
                        dest.x * s,
                        dest.y * s,
                        tint,
                        DrawTextureParams {
                            source: Some(source),
                            dest_size: Some(vec2(dest.w * s, dest.h * s)),
                            ..Default::default()
                        },
                    );
                }
                Queued::Rect { rect, color } => {
                    draw_rectangle(rect.x * s, rect.y * s, rect.w * s, rect.h * s, color);
                }
            }
        }
    }
}

impl Assets for MacroquadBackend {
    fn load_texture(&mut self, path: &Path) -> anyhow::Result<TextureHandle> {
        let bytes = std::fs::read(path).with_context(|| format!("Reading {}", path.display()))?;
        let image = Image::from_file_with_format(&bytes, None)
            .with_context(|| format!("Decoding {}", path.display()))?;
        let tex = Texture2D::from_image(&image);
        tex.set_filter(FilterMode::Nearest);

        let slot = match self.textures.iter().position(Option::is_none) {
            Some(free) => {
                self.textures[free] = Some(tex);
                free
            }
            None => {
                self.textures.push(Some(tex));
                self.textures.len() - 1
            }
        };
        Ok(TextureHandle(slot as u32))
    }

    fn texture_size(&self, texture: TextureHandle) -> Option<Vec2> {
        self.textures
            .get(texture.0 as usize)
            .and_then(Option::as_ref)
            .map(|t| t.size())
    }

    fn release_texture(&mut self, texture: TextureHandle) {
        if let Some(slot) = self.textures.get_mut(texture.0 as usize) {
            *slot = None;
        }
    }
}

impl Renderer for MacroquadBackend {
    fn queue_sprite(&mut self, layer: DrawLayer, texture: TextureHandle, source: Rect, dest: Rect, tint: Color) {
        self.queue.push((
            layer,
            Queued::Sprite {
                texture,
                source,
                dest,
                tint,
            },
        ));
    }

    fn queue_rect(&mut self, layer: DrawLayer, rect: Rect, color: Color) {
        self.queue.push((layer, Queued::Rect { rect, color }));
    }
}
