pub mod camera;
pub mod gpu_context;
pub mod renderer;
pub mod sprite_batch;
pub mod sprite_pipeline;
pub mod texture;
pub mod texture_cache;
pub mod vertex;

pub use camera::{Camera2D, CameraUniform, Viewport};
pub use gpu_context::{FrameTarget, GpuContext};
pub use renderer::SpriteRenderer;
pub use sprite_batch::{DrawCall, SpriteBatch};
pub use sprite_pipeline::SpritePipeline;
pub use texture::Texture;
pub use texture_cache::{AssetPaths, GpuSpriteTexture, TextureCache};
pub use vertex::SpriteVertex;
