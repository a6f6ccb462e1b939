use glam::Mat4;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

/// Fixed orthographic camera over the game's logical resolution. The top-left
/// corner is (0, 0) and y grows downward, matching the sprite rectangles.
pub struct Camera2D {
    pub logical: (u32, u32),
}

impl Camera2D {
    pub fn new(logical_width: u32, logical_height: u32) -> Self {
        Self {
            logical: (logical_width, logical_height),
        }
    }

    pub fn build_uniform(&self) -> CameraUniform {
        let proj = Mat4::orthographic_rh(
            0.0,
            self.logical.0 as f32,
            self.logical.1 as f32,
            0.0,
            -1.0,
            1.0,
        );

        CameraUniform {
            view_proj: proj.to_cols_array_2d(),
        }
    }
}

/// Region of the physical surface the logical screen is drawn into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Largest centred rectangle with the logical aspect ratio that fits the
    /// physical surface. The remainder is left as black bars.
    pub fn letterbox(physical: (u32, u32), logical: (u32, u32)) -> Self {
        let (pw, ph) = (physical.0.max(1) as f32, physical.1.max(1) as f32);
        let (lw, lh) = (logical.0.max(1) as f32, logical.1.max(1) as f32);
        let scale = (pw / lw).min(ph / lh);
        let width = lw * scale;
        let height = lh * scale;
        Self {
            x: ((pw - width) * 0.5).floor(),
            y: ((ph - height) * 0.5).floor(),
            width,
            height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    fn project(camera: &Camera2D, x: f32, y: f32) -> (f32, f32) {
        let m = Mat4::from_cols_array_2d(&camera.build_uniform().view_proj);
        let p = m * Vec4::new(x, y, 0.0, 1.0);
        (p.x, p.y)
    }

    #[test]
    fn top_left_maps_to_clip_top_left() {
        let camera = Camera2D::new(800, 600);
        let (x, y) = project(&camera, 0.0, 0.0);
        assert!((x + 1.0).abs() < 1e-5);
        assert!((y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn bottom_right_maps_to_clip_bottom_right() {
        let camera = Camera2D::new(800, 600);
        let (x, y) = project(&camera, 800.0, 600.0);
        assert!((x - 1.0).abs() < 1e-5);
        assert!((y + 1.0).abs() < 1e-5);
    }

    #[test]
    fn matching_aspect_fills_surface() {
        let vp = Viewport::letterbox((1600, 1200), (800, 600));
        assert_eq!(vp, Viewport { x: 0.0, y: 0.0, width: 1600.0, height: 1200.0 });
    }

    #[test]
    fn widescreen_gets_pillarboxed() {
        let vp = Viewport::letterbox((1920, 1080), (800, 600));
        assert!((vp.height - 1080.0).abs() < 1e-3);
        assert!((vp.width - 1440.0).abs() < 1e-3);
        assert!((vp.x - 240.0).abs() < 1e-3);
        assert_eq!(vp.y, 0.0);
    }

    #[test]
    fn tall_surface_gets_letterboxed() {
        let vp = Viewport::letterbox((800, 1000), (800, 600));
        assert!((vp.width - 800.0).abs() < 1e-3);
        assert!((vp.height - 600.0).abs() < 1e-3);
        assert_eq!(vp.x, 0.0);
        assert!((vp.y - 200.0).abs() < 1e-3);
    }

    #[test]
    fn zero_sized_surface_does_not_divide_by_zero() {
        let vp = Viewport::letterbox((0, 0), (800, 600));
        assert!(vp.width.is_finite() && vp.height.is_finite());
    }
}
