//! Joystick access through SDL's joystick subsystem.
//!
//! Only the joystick subsystem is initialized; windowing and rendering go
//! through winit and wgpu. Device state is refreshed explicitly once per tick
//! with `refresh()`, since no SDL event pump runs.

use candy_core::input::JoystickState;
use sdl2::joystick::Joystick as SdlJoystick;
use sdl2::{GameControllerSubsystem, JoystickSubsystem, Sdl};

pub struct Joystick {
    device: SdlJoystick,
    subsystem: JoystickSubsystem,
    _sdl: Sdl,
}

impl Joystick {
    /// Open the first attached joystick. Fails when none is connected.
    pub fn open_first() -> Result<Self, String> {
        let sdl = sdl2::init().map_err(|e| format!("Failed to initialize SDL: {e}"))?;
        let subsystem = sdl
            .joystick()
            .map_err(|e| format!("Failed to initialize joystick subsystem: {e}"))?;

        let count = subsystem
            .num_joysticks()
            .map_err(|e| format!("Failed to enumerate joysticks: {e}"))?;
        log::info!("found {count} joysticks");

        match sdl.game_controller() {
            Ok(controllers) => log_supported_controllers(&controllers, count),
            Err(err) => log::warn!("Game controller mappings unavailable: {err}"),
        }

        if count == 0 {
            return Err("No joystick found".to_string());
        }

        let device = subsystem
            .open(0)
            .map_err(|e| format!("Failed to open joystick 0: {e}"))?;
        log::info!(
            "Opened joystick '{}' ({} axes, {} buttons)",
            device.name(),
            device.num_axes(),
            device.num_buttons()
        );

        Ok(Self {
            device,
            subsystem,
            _sdl: sdl,
        })
    }

    /// Pull fresh axis and button state from the OS.
    pub fn refresh(&self) {
        self.subsystem.update();
    }

    pub fn name(&self) -> String {
        self.device.name()
    }
}

fn log_supported_controllers(controllers: &GameControllerSubsystem, count: u32) {
    for id in 0..count {
        if controllers.is_game_controller(id) {
            log::info!("Joystick {id} is supported!");
        }
    }
}

impl JoystickState for Joystick {
    fn num_axes(&self) -> u32 {
        self.device.num_axes()
    }

    fn axis(&self, index: u32) -> i16 {
        self.device.axis(index).unwrap_or_else(|err| {
            log::trace!("Axis {index} read failed: {err}");
            0
        })
    }

    fn num_buttons(&self) -> u32 {
        self.device.num_buttons()
    }

    fn button(&self, index: u32) -> bool {
        self.device.button(index).unwrap_or_else(|err| {
            log::trace!("Button {index} read failed: {err}");
            false
        })
    }
}
