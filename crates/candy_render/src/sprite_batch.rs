//! CPU-side mesh built from a frame's draw commands.
//!
//! Each textured command becomes one quad. Consecutive quads that share a
//! texture are merged into a single draw call. Commands whose texture is not
//! loaded produce nothing, which is how a missing asset degrades to "not drawn".

use candy_core::{DrawCommand, Rect, TextureKey};

use crate::vertex::SpriteVertex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawCall {
    pub texture: TextureKey,
    pub index_start: u32,
    pub index_count: u32,
}

#[derive(Debug, Default)]
pub struct SpriteBatch {
    pub vertices: Vec<SpriteVertex>,
    pub indices: Vec<u32>,
    pub draw_calls: Vec<DrawCall>,
    pub clear: bool,
}

impl SpriteBatch {
    pub fn build(
        commands: &[DrawCommand],
        logical: (u32, u32),
        is_loaded: impl Fn(TextureKey) -> bool,
    ) -> Self {
        let mut batch = Self {
            vertices: Vec::with_capacity(commands.len() * 4),
            indices: Vec::with_capacity(commands.len() * 6),
            draw_calls: Vec::with_capacity(commands.len()),
            clear: false,
        };
        let full_screen = Rect::new(0, 0, logical.0 as i32, logical.1 as i32);

        for command in commands {
            let (texture, dest) = match *command {
                DrawCommand::Clear => {
                    batch.clear = true;
                    continue;
                }
                DrawCommand::Fullscreen(texture) => (texture, full_screen),
                DrawCommand::Sprite { texture, dest } => (texture, dest),
            };
            if !is_loaded(texture) {
                log::trace!("Skipping draw of {:?}: texture not loaded", texture);
                continue;
            }
            batch.add_quad(texture, dest);
        }
        batch
    }

    pub fn sprite_count(&self) -> usize {
        self.vertices.len() / 4
    }

    fn add_quad(&mut self, texture: TextureKey, dest: Rect) {
        let left = dest.x as f32;
        let top = dest.y as f32;
        let right = dest.right() as f32;
        let bottom = dest.bottom() as f32;
        let base_index = self.vertices.len() as u32;

        self.vertices.extend_from_slice(&[
            SpriteVertex {
                position: [left, top],
                tex_coords: [0.0, 0.0],
            },
            SpriteVertex {
                position: [right, top],
                tex_coords: [1.0, 0.0],
            },
            SpriteVertex {
                position: [right, bottom],
                tex_coords: [1.0, 1.0],
            },
            SpriteVertex {
                position: [left, bottom],
                tex_coords: [0.0, 1.0],
            },
        ]);

        let draw_start = self.indices.len() as u32;
        self.indices.extend_from_slice(&[
            base_index,
            base_index + 1,
            base_index + 2,
            base_index,
            base_index + 2,
            base_index + 3,
        ]);

        self.push_draw_call(texture, draw_start, 6);
    }

    fn push_draw_call(&mut self, texture: TextureKey, index_start: u32, index_count: u32) {
        if let Some(last) = self.draw_calls.last_mut() {
            let contiguous = last.index_start + last.index_count == index_start;
            if last.texture == texture && contiguous {
                last.index_count += index_count;
                return;
            }
        }
        self.draw_calls.push(DrawCall {
            texture,
            index_start,
            index_count,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(cake: TextureKey, dest: Rect) -> Vec<DrawCommand> {
        vec![
            DrawCommand::Clear,
            DrawCommand::Fullscreen(TextureKey::Background),
            DrawCommand::Sprite {
                texture: cake,
                dest,
            },
        ]
    }

    #[test]
    fn background_stretches_over_logical_screen() {
        let batch = SpriteBatch::build(
            &frame(TextureKey::Cake(0), Rect::new(10, 20, 88, 88)),
            (800, 600),
            |_| true,
        );
        assert!(batch.clear);
        assert_eq!(batch.sprite_count(), 2);
        assert_eq!(batch.vertices[0].position, [0.0, 0.0]);
        assert_eq!(batch.vertices[2].position, [800.0, 600.0]);
    }

    #[test]
    fn sprite_quad_covers_destination_rect() {
        let batch = SpriteBatch::build(
            &frame(TextureKey::Cake(4), Rect::new(10, 20, 88, 88)),
            (800, 600),
            |_| true,
        );
        let quad = &batch.vertices[4..8];
        assert_eq!(quad[0].position, [10.0, 20.0]);
        assert_eq!(quad[1].position, [98.0, 20.0]);
        assert_eq!(quad[2].position, [98.0, 108.0]);
        assert_eq!(quad[3].position, [10.0, 108.0]);
        assert_eq!(quad[0].tex_coords, [0.0, 0.0]);
        assert_eq!(quad[2].tex_coords, [1.0, 1.0]);
    }

    #[test]
    fn draws_are_issued_in_command_order() {
        let batch = SpriteBatch::build(
            &frame(TextureKey::Cake(4), Rect::new(0, 0, 88, 88)),
            (800, 600),
            |_| true,
        );
        assert_eq!(
            batch.draw_calls,
            vec![
                DrawCall {
                    texture: TextureKey::Background,
                    index_start: 0,
                    index_count: 6,
                },
                DrawCall {
                    texture: TextureKey::Cake(4),
                    index_start: 6,
                    index_count: 6,
                },
            ]
        );
        assert_eq!(batch.indices.len(), 12);
        assert_eq!(&batch.indices[6..12], &[4, 5, 6, 4, 6, 7]);
    }

    #[test]
    fn missing_texture_is_skipped_without_breaking_the_frame() {
        let batch = SpriteBatch::build(
            &frame(TextureKey::Cake(2), Rect::new(0, 0, 88, 88)),
            (800, 600),
            |key| key != TextureKey::Cake(2),
        );
        assert!(batch.clear);
        assert_eq!(batch.sprite_count(), 1);
        assert_eq!(batch.draw_calls.len(), 1);
        assert_eq!(batch.draw_calls[0].texture, TextureKey::Background);
    }

    #[test]
    fn nothing_loaded_still_clears() {
        let batch = SpriteBatch::build(
            &frame(TextureKey::Cake(0), Rect::new(0, 0, 88, 88)),
            (800, 600),
            |_| false,
        );
        assert!(batch.clear);
        assert!(batch.vertices.is_empty());
        assert!(batch.draw_calls.is_empty());
    }

    #[test]
    fn same_texture_quads_merge_into_one_call() {
        let commands = vec![
            DrawCommand::Sprite {
                texture: TextureKey::Cake(1),
                dest: Rect::new(0, 0, 10, 10),
            },
            DrawCommand::Sprite {
                texture: TextureKey::Cake(1),
                dest: Rect::new(20, 0, 10, 10),
            },
        ];
        let batch = SpriteBatch::build(&commands, (800, 600), |_| true);
        assert_eq!(batch.draw_calls.len(), 1);
        assert_eq!(batch.draw_calls[0].index_count, 12);
        assert!(!batch.clear);
    }
}
