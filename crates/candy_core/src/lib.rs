pub mod bounds;
pub mod config;
pub mod controller;
pub mod draw;
pub mod entity;
pub mod input;
#[cfg(test)]
mod replay;
pub mod time;

pub use bounds::{in_bounds, touching, Rect, Screen};
pub use config::GameConfig;
pub use controller::{ExitReason, FrameInput, GameLoop, LoopState};
pub use draw::DrawCommand;
pub use entity::{Entity, TextureCycle, TextureKey};
pub use input::{Button, Direction, JoystickSnapshot, JoystickState};
pub use time::{FramePacer, FrameStats, PacingMode};
