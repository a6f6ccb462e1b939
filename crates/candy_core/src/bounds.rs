//! Axis-aligned rectangle predicates in integer pixel space.

/// Pixel rectangle with its origin at the top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }
}

/// Logical screen size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Screen {
    pub width: i32,
    pub height: i32,
}

/// Overlap test. Rectangles that only share an edge are not touching.
pub fn touching(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.y < b.bottom() && b.x < a.right() && b.y < a.bottom()
}

/// Origin-only bounds check: `(x, y)` must lie in `[0, width] x [0, height]`.
///
/// Width and height are ignored, so a rectangle whose corner is on screen can
/// still extend past the right or bottom edge. The movement code clamps with
/// its own per-axis checks and does not rely on this.
pub fn in_bounds(rect: &Rect, screen: Screen) -> bool {
    (0..=screen.width).contains(&rect.x) && (0..=screen.height).contains(&rect.y)
}
