use crate::bounds::Rect;

/// Handle into the texture cache. The cache owns the GPU texture; entities only
/// point at it, so swapping or dropping an entity never frees anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureKey {
    Background,
    Cake(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entity {
    pub rect: Rect,
    pub texture: TextureKey,
}

impl Entity {
    pub fn new(rect: Rect, texture: TextureKey) -> Self {
        Self { rect, texture }
    }

    /// The square cake sprite at the top-left corner showing its first frame.
    pub fn cake(size: i32) -> Self {
        Self::new(Rect::new(0, 0, size, size), TextureKey::Cake(0))
    }
}

/// Monotonic frame counter indexed modulo the number of cake textures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureCycle {
    counter: usize,
    len: usize,
}

impl TextureCycle {
    pub fn new(start: usize, len: usize) -> Self {
        Self {
            counter: start,
            len: len.max(1),
        }
    }

    /// Returns the frame for the current counter, then bumps the counter.
    pub fn advance(&mut self) -> usize {
        let frame = self.counter % self.len;
        self.counter = self.counter.wrapping_add(1);
        frame
    }

    pub fn counter(&self) -> usize {
        self.counter
    }

    pub fn frame_count(&self) -> usize {
        self.len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cake_starts_at_origin_with_first_texture() {
        let cake = Entity::cake(88);
        assert_eq!(cake.rect, Rect::new(0, 0, 88, 88));
        assert_eq!(cake.texture, TextureKey::Cake(0));
    }

    #[test]
    fn thirteen_advances_from_one_wrap_to_zero() {
        let mut cycle = TextureCycle::new(1, 13);
        let frames: Vec<usize> = (0..13).map(|_| cycle.advance()).collect();
        let expected: Vec<usize> = (1..13).chain(std::iter::once(0)).collect();
        assert_eq!(frames, expected);
        assert_eq!(cycle.counter(), 14);
    }

    #[test]
    fn zero_length_cycle_is_treated_as_single_frame() {
        let mut cycle = TextureCycle::new(5, 0);
        assert_eq!(cycle.frame_count(), 1);
        assert_eq!(cycle.advance(), 0);
        assert_eq!(cycle.advance(), 0);
    }
}
