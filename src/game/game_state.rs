use std::collections::HashSet;

use crate::log;

use super::apple::{Apple, Apples};
use super::game_rng::GameRng;
use super::obstacles::Obstacles;
use super::pane::Pane;
use super::settings::GameSettings;
use super::snake::Snake;
use super::types::{DeathCause, FrameInput, GameOutcome, PlayerSlot, Point, WinReason};

/// Hard cap on per-frame elapsed time. A stalled frame is absorbed instead
/// of triggering a runaway catch-up burst of steps.
pub const MAX_FRAME_DELTA_MS: u32 = 250;

/// Fraction of the remaining distance the camera covers each tick.
const CAMERA_SMOOTHING: f32 = 0.2;
/// The camera sits this fraction of the visible height ahead of the head.
const CAMERA_LEAD: f32 = 0.75;
/// Extra rows behind the visible window before offscreen entities are
/// reclaimed.
const OFFSCREEN_MARGIN_ROWS: i32 = 2;

/// One full session: both snakes, the shared registries, the cameras and
/// the terminal banner. `update` runs exactly one tick.
#[derive(Clone, Debug)]
pub struct GameState {
    pub snake1: Snake,
    pub snake2: Snake,
    pub apples: Apples,
    pub obstacles: Obstacles,
    pub camera_y_p1: f32,
    pub camera_y_p2: f32,
    pub winner_text: Option<String>,
    pub outcome: Option<GameOutcome>,
    clock_ms: u64,
    tick: u64,
    settings: GameSettings,
}

impl GameState {
    pub fn new(settings: GameSettings) -> Self {
        let pane1 = Pane::new(0, settings.pane_cols - 1);
        let pane2 = Pane::new(settings.pane_cols, 2 * settings.pane_cols - 1);

        let snake1 = Snake::new(
            settings.player1_name.clone(),
            pane1,
            Point::new(pane1.x0 + pane1.width() / 2, settings.start_row),
            &settings,
        );
        let snake2 = Snake::new(
            settings.player2_name.clone(),
            pane2,
            Point::new(pane2.x0 + pane2.width() / 2, settings.start_row),
            &settings,
        );

        Self {
            snake1,
            snake2,
            apples: Apples::new(),
            obstacles: Obstacles::new(),
            camera_y_p1: 0.0,
            camera_y_p2: 0.0,
            winner_text: None,
            outcome: None,
            clock_ms: 0,
            tick: 0,
            settings,
        }
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Full-state replacement; there is no partial reset path.
    pub fn reset(&mut self) {
        *self = Self::new(self.settings.clone());
        log!("Game reset");
    }

    /// One simulation tick. Steering is sampled every frame; everything
    /// after it freezes once a winner is declared, until a restart.
    pub fn update(&mut self, dt_ms: u32, input: FrameInput, rng: &mut GameRng) {
        if input.restart {
            self.reset();
        }

        let dt_ms = dt_ms.min(MAX_FRAME_DELTA_MS);

        self.snake1.steer(input.p1_left, input.p1_right);
        self.snake2.steer(input.p2_left, input.p2_right);

        if self.winner_text.is_some() {
            return;
        }

        self.clock_ms += dt_ms as u64;
        self.tick += 1;

        self.snake1.update_powerups(self.clock_ms);
        self.snake2.update_powerups(self.clock_ms);

        let was_alive = (self.snake1.is_alive(), self.snake2.is_alive());

        self.snake1.advance(dt_ms);
        self.snake2.advance(dt_ms);
        self.check_obstacle_collisions();
        self.log_death_transitions(was_alive);

        self.handle_apple_collection();
        self.try_spawn_apple(rng);
        self.update_cameras();
        self.try_spawn_obstacles(rng);
        self.check_win_conditions();
        self.cleanup_offscreen();
    }

    fn check_obstacle_collisions(&mut self) {
        let obstacles = &self.obstacles;
        for snake in [&mut self.snake1, &mut self.snake2] {
            if snake.is_alive()
                && !snake.is_invincible()
                && obstacles.collides(&snake.head())
            {
                snake.death_cause = Some(DeathCause::Obstacle);
            }
        }
    }

    fn log_death_transitions(&self, was_alive: (bool, bool)) {
        for (alive_before, snake) in [(was_alive.0, &self.snake1), (was_alive.1, &self.snake2)] {
            if alive_before
                && let Some(cause) = snake.death_cause
            {
                log!("{} {}", snake.name, death_cause_label(cause));
            }
        }
    }

    /// Scan apples in insertion order. Player 1 is checked first for every
    /// apple, so a cell shared by both heads goes to player 1 and each
    /// apple is consumed at most once. Removal happens after the scan.
    fn handle_apple_collection(&mut self) {
        let now = self.clock_ms;
        let mut collected: Vec<usize> = Vec::new();

        for (index, apple) in self.apples.iter().enumerate() {
            if self.snake1.is_alive() && self.snake1.head() == apple.position {
                if apple.is_golden {
                    self.snake1.collect_golden_apple(now);
                } else {
                    self.snake1.collect_apple(now);
                }
                log!(
                    "{} collected {} apple at ({}, {})",
                    self.snake1.name,
                    apple_label(apple),
                    apple.position.x,
                    apple.position.y
                );
                collected.push(index);
            } else if self.snake2.is_alive() && self.snake2.head() == apple.position {
                if apple.is_golden {
                    self.snake2.collect_golden_apple(now);
                } else {
                    self.snake2.collect_apple(now);
                }
                log!(
                    "{} collected {} apple at ({}, {})",
                    self.snake2.name,
                    apple_label(apple),
                    apple.position.x,
                    apple.position.y
                );
                collected.push(index);
            }
        }

        self.apples.sweep(&collected);
    }

    fn try_spawn_apple(&mut self, rng: &mut GameRng) {
        if self.apples.len() >= self.settings.max_apple_count {
            return;
        }
        if !rng.chance(self.settings.apple_spawn_probability) {
            return;
        }

        let (pane, head) = if rng.random_bool() {
            (self.snake1.pane, self.snake1.head())
        } else {
            (self.snake2.pane, self.snake2.head())
        };

        let mut occupied: HashSet<Point> = self.apples.positions();
        occupied.extend(self.obstacles.iter().copied());
        occupied.extend(self.snake1.body.iter().copied());
        occupied.extend(self.snake2.body.iter().copied());

        let y_min = head.y - self.settings.grid_h;
        let y_max = head.y - 2;
        if let Some(position) = pane.random_empty_cell(&occupied, y_min, y_max, rng) {
            let is_golden = rng.chance(self.settings.golden_apple_chance);
            self.apples.add(Apple::new(position, is_golden));
        }
    }

    fn update_cameras(&mut self) {
        let lead = self.settings.grid_h as f32 * CAMERA_LEAD;

        let target_p1 = self.snake1.head().y as f32 - lead;
        self.camera_y_p1 += (target_p1 - self.camera_y_p1) * CAMERA_SMOOTHING;

        let target_p2 = self.snake2.head().y as f32 - lead;
        self.camera_y_p2 += (target_p2 - self.camera_y_p2) * CAMERA_SMOOTHING;
    }

    fn try_spawn_obstacles(&mut self, rng: &mut GameRng) {
        spawn_obstacles_for_snake(&self.snake1, &mut self.obstacles, &self.settings, rng);
        spawn_obstacles_for_snake(&self.snake2, &mut self.obstacles, &self.settings, rng);
    }

    /// Fixed priority: finish line for player 1, finish line for player 2,
    /// then crash wins, then a draw. The first match sticks until restart.
    fn check_win_conditions(&mut self) {
        let finish = self.settings.finish_line_y;
        let p1 = &self.snake1;
        let p2 = &self.snake2;

        let (winner, reason, text) = if p1.is_alive() && p1.head().y <= finish {
            (
                Some(PlayerSlot::One),
                WinReason::FinishLine,
                format!("{} wins! Reached the finish line!", p1.name),
            )
        } else if p2.is_alive() && p2.head().y <= finish {
            (
                Some(PlayerSlot::Two),
                WinReason::FinishLine,
                format!("{} wins! Reached the finish line!", p2.name),
            )
        } else if !p1.is_alive() && p2.is_alive() {
            (
                Some(PlayerSlot::Two),
                WinReason::OpponentCrashed,
                format!("{} wins! {} crashed!", p2.name, p1.name),
            )
        } else if !p2.is_alive() && p1.is_alive() {
            (
                Some(PlayerSlot::One),
                WinReason::OpponentCrashed,
                format!("{} wins! {} crashed!", p1.name, p2.name),
            )
        } else if !p1.is_alive() && !p2.is_alive() {
            (None, WinReason::BothCrashed, "Draw! Both crashed!".to_string())
        } else {
            return;
        };

        log!("{}", text);
        self.outcome = Some(GameOutcome { winner, reason });
        self.winner_text = Some(text);
    }

    /// Reclaim entities scrolled past the trailing edge of both visible
    /// windows; neither snake can ever reach them again.
    fn cleanup_offscreen(&mut self) {
        let trailing = self.camera_y_p1.max(self.camera_y_p2) + self.settings.grid_h as f32;
        let threshold = trailing.floor() as i32 + OFFSCREEN_MARGIN_ROWS;
        self.obstacles.cleanup(threshold);
        self.apples.cleanup(threshold);
    }
}

fn spawn_obstacles_for_snake(
    snake: &Snake,
    obstacles: &mut Obstacles,
    settings: &GameSettings,
    rng: &mut GameRng,
) {
    if !snake.is_alive() {
        return;
    }
    if snake.steps % settings.obstacle_spawn_every_steps != 0 {
        return;
    }
    if !rng.chance(settings.obstacle_spawn_chance) {
        return;
    }

    let ahead = rng.random_range(settings.spawn_ahead_min..=settings.spawn_ahead_max);
    let head = snake.head();
    let y = head.y - ahead;

    let span = rng.random_range(1..=3i32).min(snake.pane.width());
    // Clamp the start column so the whole span fits inside the pane.
    let max_start = snake.pane.x1 - (span - 1);
    let start_x = rng.random_range(snake.pane.x0..=max_start);

    for i in 0..span {
        obstacles.add(Point::new(start_x + i, y));
    }
}

fn apple_label(apple: &Apple) -> &'static str {
    if apple.is_golden { "a golden" } else { "a red" }
}

fn death_cause_label(cause: DeathCause) -> &'static str {
    match cause {
        DeathCause::PaneBoundary => "hit the pane edge",
        DeathCause::SelfCollision => "ran into itself",
        DeathCause::Obstacle => "hit an obstacle",
    }
}
