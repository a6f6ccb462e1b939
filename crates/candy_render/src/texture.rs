use image::RgbaImage;

pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub size: (u32, u32),
}

impl Texture {
    /// Decode PNG bytes, key out pure black, and upload as sRGB RGBA8.
    pub fn from_image_bytes(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        bytes: &[u8],
        label: &str,
    ) -> Result<Self, String> {
        let image = decode_color_keyed(bytes).map_err(|e| format!("{label}: {e}"))?;
        let (width, height) = image.dimensions();
        Ok(Self::from_rgba8(device, queue, &image, width, height, label))
    }

    pub fn from_rgba8(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        rgba: &[u8],
        width: u32,
        height: u32,
        label: &str,
    ) -> Self {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        // Pixel art: nearest filtering, no smoothing when scaled.
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
            size: (width, height),
        }
    }

    pub fn destroy(&self) {
        self.texture.destroy();
    }
}

/// Startup probe: assets are PNG, so a build without a PNG decoder cannot run.
pub fn ensure_png_support() -> Result<(), String> {
    if image::ImageFormat::Png.reading_enabled() {
        Ok(())
    } else {
        Err("failed to initialize image library: PNG decoding is not available".to_string())
    }
}

/// Decode an image and make every pure-black pixel fully transparent.
pub fn decode_color_keyed(bytes: &[u8]) -> Result<RgbaImage, String> {
    let mut image = image::load_from_memory(bytes)
        .map_err(|e| format!("Failed to decode image: {e}"))?
        .to_rgba8();
    for pixel in image.pixels_mut() {
        let [r, g, b, _] = pixel.0;
        if r == 0 && g == 0 && b == 0 {
            pixel.0[3] = 0;
        }
    }
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba};
    use std::io::Cursor;

    fn encode_png(image: &RgbaImage) -> Vec<u8> {
        let mut bytes = Cursor::new(Vec::new());
        image
            .write_to(&mut bytes, ImageFormat::Png)
            .expect("encode png");
        bytes.into_inner()
    }

    #[test]
    fn black_pixels_become_transparent() {
        let mut source = RgbaImage::new(2, 1);
        source.put_pixel(0, 0, Rgba([0, 0, 0, 255]));
        source.put_pixel(1, 0, Rgba([200, 40, 90, 255]));

        let decoded = decode_color_keyed(&encode_png(&source)).expect("decode");
        assert_eq!(decoded.get_pixel(0, 0).0, [0, 0, 0, 0]);
        assert_eq!(decoded.get_pixel(1, 0).0, [200, 40, 90, 255]);
    }

    #[test]
    fn near_black_is_kept_opaque() {
        let mut source = RgbaImage::new(1, 1);
        source.put_pixel(0, 0, Rgba([1, 0, 0, 255]));

        let decoded = decode_color_keyed(&encode_png(&source)).expect("decode");
        assert_eq!(decoded.get_pixel(0, 0).0[3], 255);
    }

    #[test]
    fn png_decoding_is_available() {
        assert!(ensure_png_support().is_ok());
    }

    #[test]
    fn garbage_bytes_are_an_error() {
        let err = decode_color_keyed(b"not a png").expect_err("should fail");
        assert!(err.contains("Failed to decode image"));
    }
}
