use crate::bounds::Screen;
use crate::time::PacingMode;

/// Fixed game parameters handed to the loop at construction. Nothing here
/// changes while the game is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub screen_width: i32,
    pub screen_height: i32,
    pub velocity_x: i32,
    pub velocity_y: i32,
    /// Edge length of the square cake sprite (22px art scaled 4x).
    pub sprite_size: i32,
    pub cake_texture_count: usize,
    /// Initial value of the cake frame counter; the first A press shows this frame.
    pub first_cake_frame: usize,
    pub tick_budget_ms: u64,
    pub pacing: PacingMode,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 800,
            screen_height: 600,
            velocity_x: 10,
            velocity_y: 10,
            sprite_size: 22 * 4,
            cake_texture_count: 13,
            first_cake_frame: 1,
            tick_budget_ms: 20,
            pacing: PacingMode::default(),
        }
    }
}

impl GameConfig {
    pub fn screen(&self) -> Screen {
        Screen {
            width: self.screen_width,
            height: self.screen_height,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.screen_width <= 0 || self.screen_height <= 0 {
            return Err("Config validation failed: screen size must be > 0".to_string());
        }
        if self.sprite_size <= 0 {
            return Err("Config validation failed: sprite_size must be > 0".to_string());
        }
        if self.sprite_size > self.screen_width || self.sprite_size > self.screen_height {
            return Err(format!(
                "Config validation failed: sprite_size {} does not fit a {}x{} screen",
                self.sprite_size, self.screen_width, self.screen_height
            ));
        }
        if self.velocity_x < 0 || self.velocity_y < 0 {
            return Err("Config validation failed: velocities must be >= 0".to_string());
        }
        if self.cake_texture_count == 0 {
            return Err("Config validation failed: cake_texture_count must be > 0".to_string());
        }
        if self.tick_budget_ms == 0 {
            return Err("Config validation failed: tick_budget_ms must be > 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_game_constants() {
        let config = GameConfig::default();
        assert_eq!(config.screen(), Screen { width: 800, height: 600 });
        assert_eq!((config.velocity_x, config.velocity_y), (10, 10));
        assert_eq!(config.sprite_size, 88);
        assert_eq!(config.cake_texture_count, 13);
        assert_eq!(config.tick_budget_ms, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_oversized_sprite() {
        let config = GameConfig {
            sprite_size: 900,
            ..GameConfig::default()
        };
        let err = config.validate().expect_err("sprite larger than screen");
        assert!(err.contains("does not fit"));
    }

    #[test]
    fn validate_rejects_zero_budget_and_empty_texture_set() {
        let zero_budget = GameConfig {
            tick_budget_ms: 0,
            ..GameConfig::default()
        };
        assert!(zero_budget.validate().is_err());

        let no_textures = GameConfig {
            cake_texture_count: 0,
            ..GameConfig::default()
        };
        assert!(no_textures.validate().is_err());
    }
}
