use crate::config::GameConfig;
use crate::draw::DrawCommand;
use crate::entity::{Entity, TextureCycle, TextureKey};
use crate::input::{decode_button, decode_direction, Button, Direction, JoystickState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// The windowing layer asked the game to close.
    QuitEvent,
    /// START was the lowest pressed button this tick.
    StartButton,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    /// Terminal. Once entered, further ticks change nothing.
    Exiting(ExitReason),
}

impl LoopState {
    pub fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }
}

/// Everything the loop consumes in one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub quit_requested: bool,
    pub direction: Direction,
    pub button: Option<u32>,
}

impl FrameInput {
    pub fn poll(quit_requested: bool, joystick: &impl JoystickState) -> Self {
        Self {
            quit_requested,
            direction: decode_direction(joystick),
            button: decode_button(joystick),
        }
    }
}

/// The cake game's per-tick state machine: movement, texture cycling and the
/// exit conditions. Rendering and sleeping are left to the caller, which reads
/// `draw_list()` after each running tick.
#[derive(Debug, Clone)]
pub struct GameLoop {
    config: GameConfig,
    entity: Entity,
    cycle: TextureCycle,
    state: LoopState,
    ticks: u64,
}

impl GameLoop {
    pub fn new(config: GameConfig) -> Self {
        Self {
            entity: Entity::cake(config.sprite_size),
            cycle: TextureCycle::new(config.first_cake_frame, config.cake_texture_count),
            state: LoopState::Running,
            ticks: 0,
            config,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Number of ticks processed while running, including the one that exited.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn tick(&mut self, input: FrameInput) -> LoopState {
        if !self.state.is_running() {
            return self.state;
        }
        self.ticks += 1;

        if input.quit_requested {
            self.exit(ExitReason::QuitEvent);
            return self.state;
        }

        self.apply_direction(input.direction);
        if let Some(index) = input.button {
            self.apply_button(Button::from_index(index));
        }
        self.state
    }

    /// Render sequence for the current state: clear, background, cake.
    pub fn draw_list(&self) -> Vec<DrawCommand> {
        vec![
            DrawCommand::Clear,
            DrawCommand::Fullscreen(TextureKey::Background),
            DrawCommand::Sprite {
                texture: self.entity.texture,
                dest: self.entity.rect,
            },
        ]
    }

    fn apply_direction(&mut self, direction: Direction) {
        if direction.is_empty() {
            return;
        }
        let max_x = self.config.screen_width - self.entity.rect.w;
        let max_y = self.config.screen_height - self.entity.rect.h;
        let rect = &mut self.entity.rect;

        // Each flag is checked against the position left by the previous one.
        // The step is clamped so a velocity that doesn't divide the free space
        // cannot carry the sprite past an edge.
        if direction.down() && rect.y < max_y {
            rect.y = (rect.y + self.config.velocity_y).min(max_y);
        }
        if direction.up() && rect.y > 0 {
            rect.y = (rect.y - self.config.velocity_y).max(0);
        }
        if direction.right() && rect.x < max_x {
            rect.x = (rect.x + self.config.velocity_x).min(max_x);
        }
        if direction.left() && rect.x > 0 {
            rect.x = (rect.x - self.config.velocity_x).max(0);
        }
    }

    fn apply_button(&mut self, button: Button) {
        match button {
            Button::A => {
                let frame = self.cycle.advance();
                self.entity.texture = TextureKey::Cake(frame);
                log::debug!("Cake texture -> frame {frame}");
            }
            // Reserved for shrinking the cake; intentionally inert.
            Button::B => {}
            Button::Start => self.exit(ExitReason::StartButton),
            Button::Select | Button::Other(_) => {}
        }
    }

    fn exit(&mut self, reason: ExitReason) {
        log::info!("Leaving game loop after {} ticks: {:?}", self.ticks, reason);
        self.state = LoopState::Exiting(reason);
    }
}
