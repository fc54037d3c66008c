use serde::Serialize;

use super::game_state::GameState;
use super::pane::Pane;
use super::snake::Snake;
use super::types::{DeathCause, GameOutcome, Point, PowerUpKind};

#[derive(Clone, Debug, Serialize)]
pub struct SnakeView {
    pub name: String,
    pub pane: Pane,
    pub body: Vec<Point>,
    pub alive: bool,
    pub death_cause: Option<DeathCause>,
    pub active_powerup: Option<PowerUpKind>,
    pub apples_collected: u32,
    pub current_step_ms: u32,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct AppleView {
    pub position: Point,
    pub is_golden: bool,
}

/// Consistent post-tick snapshot of the whole session. Built fresh each
/// frame; consumers never see (or touch) live simulation state.
#[derive(Clone, Debug, Serialize)]
pub struct GameSnapshot {
    pub tick: u64,
    pub clock_ms: u64,
    pub snakes: [SnakeView; 2],
    pub apples: Vec<AppleView>,
    pub obstacles: Vec<Point>,
    pub camera_y_p1: f32,
    pub camera_y_p2: f32,
    pub finish_line_y: i32,
    pub grid_h: i32,
    pub winner_text: Option<String>,
    pub outcome: Option<GameOutcome>,
}

impl GameSnapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            tick: state.tick(),
            clock_ms: state.clock_ms(),
            snakes: [snake_view(&state.snake1), snake_view(&state.snake2)],
            apples: state
                .apples
                .iter()
                .map(|apple| AppleView {
                    position: apple.position,
                    is_golden: apple.is_golden,
                })
                .collect(),
            obstacles: state.obstacles.iter().copied().collect(),
            camera_y_p1: state.camera_y_p1,
            camera_y_p2: state.camera_y_p2,
            finish_line_y: state.settings().finish_line_y,
            grid_h: state.settings().grid_h,
            winner_text: state.winner_text.clone(),
            outcome: state.outcome,
        }
    }
}

impl GameState {
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(self)
    }
}

fn snake_view(snake: &Snake) -> SnakeView {
    SnakeView {
        name: snake.name.clone(),
        pane: snake.pane,
        body: snake.body.iter().copied().collect(),
        alive: snake.is_alive(),
        death_cause: snake.death_cause,
        active_powerup: snake.active_powerup.map(|p| p.kind),
        apples_collected: snake.apples_collected,
        current_step_ms: snake.current_step_ms,
    }
}
