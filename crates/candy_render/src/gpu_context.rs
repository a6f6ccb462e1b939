//! Window surface plus the device and queue that draw into it.

use std::sync::Arc;
use winit::window::Window;

/// A surface texture acquired for one frame, with the view the pass renders into.
pub struct FrameTarget {
    pub output: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
}

pub struct GpuContext {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub surface_format: wgpu::TextureFormat,
    pub size: (u32, u32),
}

impl GpuContext {
    /// Blocks until an adapter and device are ready. Any failure here is a
    /// startup failure for the caller.
    pub fn new(window: Arc<Window>) -> Result<Self, String> {
        let physical = window.inner_size();
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });
        let surface = instance
            .create_surface(window)
            .map_err(|e| format!("Failed to create surface: {e}"))?;

        let (adapter, device, queue) = pollster::block_on(open_device(&instance, &surface))?;

        let caps = surface.get_capabilities(&adapter);
        let config = surface_config(&caps, physical.width, physical.height)?;
        surface.configure(&device, &config);
        log::info!(
            "Surface configured: {:?} {}x{} ({:?})",
            config.format,
            config.width,
            config.height,
            config.present_mode
        );

        Ok(Self {
            surface_format: config.format,
            surface,
            device,
            queue,
            config,
            size: (physical.width, physical.height),
        })
    }

    /// Zero-sized requests (minimized window) keep the previous configuration.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.size = (width, height);
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    /// `None` means skip drawing this frame. A lost or outdated surface is
    /// reconfigured so the next frame can proceed.
    pub fn acquire_frame(&self) -> Option<FrameTarget> {
        match self.surface.get_current_texture() {
            Ok(output) => {
                let view = output
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());
                Some(FrameTarget { output, view })
            }
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("Surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                None
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory");
                None
            }
            Err(e) => {
                log::warn!("Surface error: {e:?}");
                None
            }
        }
    }
}

async fn open_device(
    instance: &wgpu::Instance,
    surface: &wgpu::Surface<'static>,
) -> Result<(wgpu::Adapter, wgpu::Device, wgpu::Queue), String> {
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(surface),
            force_fallback_adapter: false,
        })
        .await
        .ok_or_else(|| "Failed to find a suitable GPU adapter".to_string())?;
    log::info!("GPU adapter: {:?}", adapter.get_info().name);

    // Two textured quads a frame; the downlevel limits are plenty.
    let (device, queue) = adapter
        .request_device(
            &wgpu::DeviceDescriptor {
                label: Some("Candy Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_defaults(),
                ..Default::default()
            },
            None,
        )
        .await
        .map_err(|e| format!("Failed to create device: {e}"))?;
    Ok((adapter, device, queue))
}

/// Prefers an sRGB format. Presentation does not wait on vsync: frame cadence
/// comes from the loop's own sleep.
pub fn surface_config(
    caps: &wgpu::SurfaceCapabilities,
    width: u32,
    height: u32,
) -> Result<wgpu::SurfaceConfiguration, String> {
    let format = caps
        .formats
        .iter()
        .find(|f| f.is_srgb())
        .or_else(|| caps.formats.first())
        .copied()
        .ok_or_else(|| "Surface reports no supported formats".to_string())?;
    let alpha_mode = caps
        .alpha_modes
        .first()
        .copied()
        .unwrap_or(wgpu::CompositeAlphaMode::Auto);

    Ok(wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format,
        width: width.max(1),
        height: height.max(1),
        present_mode: wgpu::PresentMode::AutoNoVsync,
        alpha_mode,
        view_formats: vec![],
        desired_maximum_frame_latency: 2,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caps(formats: Vec<wgpu::TextureFormat>) -> wgpu::SurfaceCapabilities {
        wgpu::SurfaceCapabilities {
            formats,
            present_modes: vec![wgpu::PresentMode::Fifo],
            alpha_modes: vec![wgpu::CompositeAlphaMode::Opaque],
            usages: wgpu::TextureUsages::RENDER_ATTACHMENT,
        }
    }

    #[test]
    fn srgb_format_is_preferred() {
        let config = surface_config(
            &caps(vec![
                wgpu::TextureFormat::Bgra8Unorm,
                wgpu::TextureFormat::Bgra8UnormSrgb,
            ]),
            800,
            600,
        )
        .expect("config");
        assert_eq!(config.format, wgpu::TextureFormat::Bgra8UnormSrgb);
        assert_eq!(config.alpha_mode, wgpu::CompositeAlphaMode::Opaque);
        assert_eq!(config.present_mode, wgpu::PresentMode::AutoNoVsync);
    }

    #[test]
    fn falls_back_to_first_format() {
        let config =
            surface_config(&caps(vec![wgpu::TextureFormat::Rgba8Unorm]), 800, 600).expect("config");
        assert_eq!(config.format, wgpu::TextureFormat::Rgba8Unorm);
    }

    #[test]
    fn zero_size_is_clamped_to_one_pixel() {
        let config = surface_config(&caps(vec![wgpu::TextureFormat::Rgba8UnormSrgb]), 0, 0)
            .expect("config");
        assert_eq!((config.width, config.height), (1, 1));
    }

    #[test]
    fn no_formats_is_an_error() {
        assert!(surface_config(&caps(vec![]), 800, 600).is_err());
    }
}
