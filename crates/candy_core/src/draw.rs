use crate::bounds::Rect;
use crate::entity::TextureKey;

/// One step of a frame's render sequence, in submission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawCommand {
    /// Clear the frame to black.
    Clear,
    /// Draw a texture stretched over the whole logical screen.
    Fullscreen(TextureKey),
    /// Draw a texture into a destination rectangle in logical pixels.
    Sprite { texture: TextureKey, dest: Rect },
}

impl DrawCommand {
    pub fn texture(&self) -> Option<TextureKey> {
        match *self {
            Self::Clear => None,
            Self::Fullscreen(texture) | Self::Sprite { texture, .. } => Some(texture),
        }
    }
}
