use serde::{Deserialize, Serialize};

/// The full fixed parameter set for one session. Loaded once at startup
/// (or taken from `Default`) and never mutated mid-game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSettings {
    /// Fixed body length; the snake never grows past it.
    pub snake_len: usize,
    /// Base interval between forward steps, in milliseconds.
    pub base_step_ms: u32,
    pub speed_boost_duration_ms: u64,
    pub invincibility_duration_ms: u64,
    /// Every Nth red apple triggers a speed boost.
    pub apples_for_speed_boost: u32,
    pub obstacle_spawn_every_steps: u64,
    pub obstacle_spawn_chance: f32,
    pub spawn_ahead_min: i32,
    pub spawn_ahead_max: i32,
    pub apple_spawn_probability: f32,
    pub golden_apple_chance: f32,
    pub max_apple_count: usize,
    /// Reaching this row (or above) while alive wins the race.
    pub finish_line_y: i32,
    /// Columns per player pane; player 1 owns [0, pane_cols-1],
    /// player 2 owns [pane_cols, 2*pane_cols-1].
    pub pane_cols: i32,
    /// Visible rows per pane, used for camera lead and offscreen cleanup.
    pub grid_h: i32,
    pub start_row: i32,
    pub player1_name: String,
    pub player2_name: String,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            snake_len: 6,
            base_step_ms: 100,
            speed_boost_duration_ms: 4000,
            invincibility_duration_ms: 5000,
            apples_for_speed_boost: 5,
            obstacle_spawn_every_steps: 12,
            obstacle_spawn_chance: 0.45,
            spawn_ahead_min: 8,
            spawn_ahead_max: 16,
            apple_spawn_probability: 0.08,
            golden_apple_chance: 0.15,
            max_apple_count: 50,
            finish_line_y: -180,
            pane_cols: 14,
            grid_h: 24,
            start_row: 0,
            player1_name: "Player 1".to_string(),
            player2_name: "Player 2".to_string(),
        }
    }
}

impl GameSettings {
    pub fn validate(&self) -> Result<(), String> {
        if self.snake_len < 2 || self.snake_len > 20 {
            return Err("Snake length must be between 2 and 20".to_string());
        }
        if self.base_step_ms < 20 || self.base_step_ms > 2000 {
            return Err("Base step interval must be between 20ms and 2000ms".to_string());
        }
        if self.speed_boost_duration_ms < 100 || self.speed_boost_duration_ms > 60000 {
            return Err("Speed boost duration must be between 100ms and 60000ms".to_string());
        }
        if self.invincibility_duration_ms < 100 || self.invincibility_duration_ms > 60000 {
            return Err("Invincibility duration must be between 100ms and 60000ms".to_string());
        }
        if self.apples_for_speed_boost < 1 || self.apples_for_speed_boost > 50 {
            return Err("Apples per speed boost must be between 1 and 50".to_string());
        }
        if self.obstacle_spawn_every_steps < 1 {
            return Err("Obstacle spawn step interval must be at least 1".to_string());
        }
        if !(0.0..=1.0).contains(&self.obstacle_spawn_chance) {
            return Err("Obstacle spawn chance must be between 0.0 and 1.0".to_string());
        }
        if self.spawn_ahead_min < 1 {
            return Err("Obstacle spawn lookahead must be at least 1 row".to_string());
        }
        if self.spawn_ahead_max < self.spawn_ahead_min {
            return Err("Obstacle spawn lookahead max must not be below min".to_string());
        }
        if !(0.0..=1.0).contains(&self.apple_spawn_probability) {
            return Err("Apple spawn probability must be between 0.0 and 1.0".to_string());
        }
        if !(0.0..=1.0).contains(&self.golden_apple_chance) {
            return Err("Golden apple chance must be between 0.0 and 1.0".to_string());
        }
        if self.max_apple_count < 1 || self.max_apple_count > 200 {
            return Err("Max apple count must be between 1 and 200".to_string());
        }
        if self.pane_cols < 4 || self.pane_cols > 100 {
            return Err("Pane width must be between 4 and 100 columns".to_string());
        }
        if self.grid_h < 8 || self.grid_h > 100 {
            return Err("Visible grid height must be between 8 and 100 rows".to_string());
        }
        if self.finish_line_y >= self.start_row {
            return Err("Finish line must be above the start row".to_string());
        }
        if self.player1_name.is_empty() || self.player2_name.is_empty() {
            return Err("Player names must not be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        assert!(GameSettings::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_tiny_step_interval() {
        let settings = GameSettings {
            base_step_ms: 5,
            ..GameSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_out_of_range_probability() {
        let settings = GameSettings {
            apple_spawn_probability: 1.5,
            ..GameSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_inverted_lookahead_range() {
        let settings = GameSettings {
            spawn_ahead_min: 10,
            spawn_ahead_max: 5,
            ..GameSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_finish_line_below_start() {
        let settings = GameSettings {
            finish_line_y: 10,
            start_row: 0,
            ..GameSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_empty_player_name() {
        let settings = GameSettings {
            player2_name: String::new(),
            ..GameSettings::default()
        };
        assert!(settings.validate().is_err());
    }
}
