pub mod joystick;
pub mod window;

pub use joystick::Joystick;
pub use window::{create_window, PlatformConfig};
