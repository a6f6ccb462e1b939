//! Owner of every texture the game draws.
//!
//! Textures are loaded once at startup and released exactly once at teardown,
//! either through an explicit `release()` or, failing that, on drop. Entities
//! refer to textures by `TextureKey` only. A file that is missing or fails to
//! decode is logged and leaves an empty slot; draws against an empty slot are
//! skipped by the renderer.

use std::path::{Path, PathBuf};

use candy_core::TextureKey;

use crate::sprite_pipeline::SpritePipeline;
use crate::texture::Texture;

pub struct GpuSpriteTexture {
    pub texture: Texture,
    pub bind_group: wgpu::BindGroup,
}

#[derive(Debug, Clone)]
pub struct AssetPaths {
    pub root: PathBuf,
    pub background: String,
    pub cake_prefix: String,
    pub extension: String,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            root: PathBuf::from("assets"),
            background: "background.png".to_string(),
            cake_prefix: "cake_eaten".to_string(),
            extension: "png".to_string(),
        }
    }
}

impl AssetPaths {
    pub fn background_path(&self) -> PathBuf {
        self.root.join(&self.background)
    }

    pub fn cake_path(&self, index: usize) -> PathBuf {
        self.root
            .join(format!("{}{}.{}", self.cake_prefix, index, self.extension))
    }

    pub fn path_for(&self, key: TextureKey) -> PathBuf {
        match key {
            TextureKey::Background => self.background_path(),
            TextureKey::Cake(index) => self.cake_path(index),
        }
    }
}

pub struct TextureCache {
    background: Option<GpuSpriteTexture>,
    cakes: Vec<Option<GpuSpriteTexture>>,
    released: bool,
}

impl TextureCache {
    pub fn load(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        pipeline: &SpritePipeline,
        paths: &AssetPaths,
        cake_count: usize,
    ) -> Self {
        let load = |key: TextureKey| {
            let path = paths.path_for(key);
            match load_texture_file(device, queue, pipeline, &path) {
                Ok(texture) => {
                    log::debug!("Loaded texture '{}'", path.display());
                    Some(texture)
                }
                Err(err) => {
                    log::error!("unable to load image: {err}");
                    None
                }
            }
        };

        let background = load(TextureKey::Background);
        let cakes: Vec<_> = (0..cake_count).map(|i| load(TextureKey::Cake(i))).collect();

        let cache = Self {
            background,
            cakes,
            released: false,
        };
        log::info!(
            "Texture cache ready: {}/{} textures loaded",
            cache.loaded_count(),
            cake_count + 1
        );
        cache
    }

    pub fn get(&self, key: TextureKey) -> Option<&GpuSpriteTexture> {
        match key {
            TextureKey::Background => self.background.as_ref(),
            TextureKey::Cake(index) => self.cakes.get(index).and_then(Option::as_ref),
        }
    }

    pub fn contains(&self, key: TextureKey) -> bool {
        self.get(key).is_some()
    }

    pub fn loaded_count(&self) -> usize {
        self.background.iter().count() + self.cakes.iter().flatten().count()
    }

    /// Destroy every GPU texture. Safe to call more than once; only the first
    /// call does anything. Returns how many textures were destroyed.
    pub fn release(&mut self) -> usize {
        if self.released {
            return 0;
        }
        self.released = true;

        let mut count = 0;
        for slot in std::iter::once(&mut self.background).chain(self.cakes.iter_mut()) {
            if let Some(entry) = slot.take() {
                entry.texture.destroy();
                count += 1;
            }
        }
        log::info!("released {count} textures");
        count
    }
}

impl Drop for TextureCache {
    fn drop(&mut self) {
        self.release();
    }
}

fn load_texture_file(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    pipeline: &SpritePipeline,
    path: &Path,
) -> Result<GpuSpriteTexture, String> {
    let bytes =
        std::fs::read(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let label = path.display().to_string();
    let texture = Texture::from_image_bytes(device, queue, &bytes, &label)?;
    let bind_group = pipeline.create_texture_bind_group(device, &texture);
    Ok(GpuSpriteTexture {
        texture,
        bind_group,
    })
}
