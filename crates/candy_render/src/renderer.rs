use wgpu::util::DeviceExt;

use candy_core::DrawCommand;

use crate::camera::{Camera2D, Viewport};
use crate::gpu_context::GpuContext;
use crate::sprite_batch::SpriteBatch;
use crate::sprite_pipeline::SpritePipeline;
use crate::texture_cache::TextureCache;
use crate::vertex::SpriteVertex;

/// Draws a frame's command list into the window surface at a fixed logical
/// resolution, letterboxed to the physical size.
///
/// Vertex and index buffers are rebuilt on the CPU every frame and streamed
/// to the GPU. They grow to the next power of two when needed and never shrink.
pub struct SpriteRenderer {
    pub pipeline: SpritePipeline,
    camera: Camera2D,
    _camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    vertex_capacity: usize,
    index_capacity: usize,
}

impl SpriteRenderer {
    pub fn new(gpu: &GpuContext, logical: (u32, u32)) -> Self {
        let pipeline = SpritePipeline::new(&gpu.device, gpu.surface_format);
        let camera = Camera2D::new(logical.0, logical.1);
        let camera_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Uniform Buffer"),
                contents: bytemuck::cast_slice(&[camera.build_uniform()]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
        let camera_bind_group = pipeline.create_camera_bind_group(&gpu.device, &camera_buffer);

        // Background + cake.
        let vertex_capacity = 8;
        let index_capacity = 12;
        Self {
            vertex_buffer: create_vertex_buffer(&gpu.device, vertex_capacity),
            index_buffer: create_index_buffer(&gpu.device, index_capacity),
            pipeline,
            camera,
            _camera_buffer: camera_buffer,
            camera_bind_group,
            vertex_capacity,
            index_capacity,
        }
    }

    pub fn logical_size(&self) -> (u32, u32) {
        self.camera.logical
    }

    pub fn render(&mut self, gpu: &GpuContext, textures: &TextureCache, commands: &[DrawCommand]) {
        let batch = SpriteBatch::build(commands, self.camera.logical, |key| textures.contains(key));
        self.upload(gpu, &batch);

        let Some(frame) = gpu.acquire_frame() else {
            return;
        };

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let load = if batch.clear {
                wgpu::LoadOp::Clear(wgpu::Color::BLACK)
            } else {
                wgpu::LoadOp::Load
            };
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Sprite Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });

            if !batch.draw_calls.is_empty() {
                let viewport = Viewport::letterbox(gpu.size, self.camera.logical);
                render_pass.set_viewport(
                    viewport.x,
                    viewport.y,
                    viewport.width,
                    viewport.height,
                    0.0,
                    1.0,
                );
                render_pass.set_pipeline(&self.pipeline.render_pipeline);
                render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
                render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                render_pass
                    .set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);

                for draw in &batch.draw_calls {
                    if let Some(texture) = textures.get(draw.texture) {
                        render_pass.set_bind_group(1, &texture.bind_group, &[]);
                        render_pass.draw_indexed(
                            draw.index_start..(draw.index_start + draw.index_count),
                            0,
                            0..1,
                        );
                    }
                }
            }
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
        frame.output.present();
    }

    fn upload(&mut self, gpu: &GpuContext, batch: &SpriteBatch) {
        let needed_vertices = batch.vertices.len().max(1);
        if needed_vertices > self.vertex_capacity {
            self.vertex_capacity = needed_vertices.next_power_of_two();
            self.vertex_buffer = create_vertex_buffer(&gpu.device, self.vertex_capacity);
        }
        let needed_indices = batch.indices.len().max(1);
        if needed_indices > self.index_capacity {
            self.index_capacity = needed_indices.next_power_of_two();
            self.index_buffer = create_index_buffer(&gpu.device, self.index_capacity);
        }

        if !batch.vertices.is_empty() {
            gpu.queue
                .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&batch.vertices));
        }
        if !batch.indices.is_empty() {
            gpu.queue
                .write_buffer(&self.index_buffer, 0, bytemuck::cast_slice(&batch.indices));
        }
    }
}

fn create_vertex_buffer(device: &wgpu::Device, vertex_capacity: usize) -> wgpu::Buffer {
    let byte_len = (vertex_capacity * std::mem::size_of::<SpriteVertex>()).max(1) as u64;
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Sprite Vertex Buffer"),
        size: byte_len,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_index_buffer(device: &wgpu::Device, index_capacity: usize) -> wgpu::Buffer {
    let byte_len = (index_capacity * std::mem::size_of::<u32>()).max(1) as u64;
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Sprite Index Buffer"),
        size: byte_len,
        usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}
