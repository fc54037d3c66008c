use std::collections::VecDeque;

use super::pane::Pane;
use super::settings::GameSettings;
use super::types::{ActivePowerUp, DeathCause, Point, PowerUpKind};

/// One player's snake. Owns its step cadence: the millisecond accumulator
/// lives here so a session reset replaces it together with the body.
#[derive(Clone, Debug)]
pub struct Snake {
    pub name: String,
    pub pane: Pane,
    /// Head is the front element. Length stays at `max_len` once initialized.
    pub body: VecDeque<Point>,
    /// Horizontal heading, -1/0/1. The vertical component is always -1.
    pub dx: i32,
    pub death_cause: Option<DeathCause>,
    pub steps: u64,
    pub apples_collected: u32,
    pub active_powerup: Option<ActivePowerUp>,
    pub base_step_ms: u32,
    pub current_step_ms: u32,
    acc_ms: u32,
    max_len: usize,
    apples_for_speed_boost: u32,
    speed_boost_duration_ms: u64,
    invincibility_duration_ms: u64,
}

impl Snake {
    pub fn new(name: String, pane: Pane, start: Point, settings: &GameSettings) -> Self {
        let body: VecDeque<Point> = (0..settings.snake_len)
            .map(|i| Point::new(start.x, start.y + i as i32))
            .collect();
        let base_step_ms = settings.base_step_ms.max(1);

        Self {
            name,
            pane,
            body,
            dx: 0,
            death_cause: None,
            steps: 0,
            apples_collected: 0,
            active_powerup: None,
            base_step_ms,
            current_step_ms: base_step_ms,
            acc_ms: 0,
            max_len: settings.snake_len,
            apples_for_speed_boost: settings.apples_for_speed_boost.max(1),
            speed_boost_duration_ms: settings.speed_boost_duration_ms,
            invincibility_duration_ms: settings.invincibility_duration_ms,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.death_cause.is_none()
    }

    pub fn head(&self) -> Point {
        *self.body.front().expect("Snake body should never be empty")
    }

    pub fn is_invincible(&self) -> bool {
        matches!(
            self.active_powerup,
            Some(ActivePowerUp {
                kind: PowerUpKind::Invincibility,
                ..
            })
        )
    }

    /// Left wins when both keys are held; releasing both keeps the
    /// previous heading.
    pub fn steer(&mut self, left: bool, right: bool) {
        if !self.is_alive() {
            return;
        }
        if left {
            self.dx = -1;
        } else if right {
            self.dx = 1;
        }
    }

    /// Feed elapsed time into the step accumulator and take however many
    /// steps it covers. The remainder carries over to the next frame, and a
    /// cadence change from a power-up applies from the next comparison on.
    pub fn advance(&mut self, dt_ms: u32) {
        self.acc_ms += dt_ms;
        while self.acc_ms >= self.current_step_ms {
            self.acc_ms -= self.current_step_ms;
            self.step();
        }
    }

    /// One forward step. Leaving the pane kills without moving; landing on
    /// another body segment kills after moving (the snake stays on screen).
    pub fn step(&mut self) {
        if !self.is_alive() {
            return;
        }

        self.steps += 1;
        let head = self.head();
        let next = Point::new(head.x + self.dx, head.y - 1);

        if !self.pane.contains_x(next.x) {
            self.death_cause = Some(DeathCause::PaneBoundary);
            return;
        }

        self.body.push_front(next);
        while self.body.len() > self.max_len {
            self.body.pop_back();
        }

        if self.body.iter().skip(1).any(|segment| *segment == next) {
            self.death_cause = Some(DeathCause::SelfCollision);
        }
    }

    pub fn collect_apple(&mut self, now_ms: u64) {
        if !self.is_alive() {
            return;
        }
        self.apples_collected += 1;
        if self.apples_collected % self.apples_for_speed_boost == 0 {
            self.activate_powerup(PowerUpKind::SpeedBoost, now_ms);
        }
    }

    pub fn collect_golden_apple(&mut self, now_ms: u64) {
        if !self.is_alive() {
            return;
        }
        self.activate_powerup(PowerUpKind::Invincibility, now_ms);
    }

    /// Replaces whatever power-up is active; there is no stacking.
    pub fn activate_powerup(&mut self, kind: PowerUpKind, now_ms: u64) {
        let duration_ms = match kind {
            PowerUpKind::SpeedBoost => self.speed_boost_duration_ms,
            PowerUpKind::Invincibility => self.invincibility_duration_ms,
        };
        self.active_powerup = Some(ActivePowerUp {
            kind,
            expires_at_ms: now_ms + duration_ms,
        });
        self.current_step_ms = match kind {
            // 30% faster ticking.
            PowerUpKind::SpeedBoost => (self.base_step_ms * 7 / 10).max(1),
            PowerUpKind::Invincibility => self.base_step_ms,
        };
    }

    /// Expiry check, run once per tick before movement so a lapsed boost
    /// never drives another step.
    pub fn update_powerups(&mut self, now_ms: u64) {
        if let Some(powerup) = &self.active_powerup
            && now_ms >= powerup.expires_at_ms
        {
            self.active_powerup = None;
            self.current_step_ms = self.base_step_ms;
        }
    }

    #[cfg(test)]
    pub(crate) fn set_body(&mut self, segments: Vec<Point>) {
        self.body = segments.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_settings() -> GameSettings {
        GameSettings {
            snake_len: 4,
            base_step_ms: 100,
            speed_boost_duration_ms: 4000,
            invincibility_duration_ms: 5000,
            apples_for_speed_boost: 5,
            pane_cols: 10,
            ..GameSettings::default()
        }
    }

    fn create_snake() -> Snake {
        Snake::new(
            "Player 1".to_string(),
            Pane::new(0, 9),
            Point::new(5, 50),
            &test_settings(),
        )
    }

    #[test]
    fn test_new_snake_body_extends_behind_the_head() {
        let snake = create_snake();
        let body: Vec<Point> = snake.body.iter().copied().collect();
        assert_eq!(
            body,
            vec![
                Point::new(5, 50),
                Point::new(5, 51),
                Point::new(5, 52),
                Point::new(5, 53),
            ]
        );
        assert_eq!(snake.dx, 0);
        assert!(snake.is_alive());
    }

    #[test]
    fn test_step_moves_forward_and_keeps_length() {
        let mut snake = create_snake();
        snake.step();
        assert_eq!(snake.head(), Point::new(5, 49));
        assert_eq!(snake.body.len(), 4);
        assert_eq!(snake.steps, 1);
    }

    #[test]
    fn test_first_step_has_no_false_self_collision() {
        let mut snake = create_snake();
        snake.step();
        assert!(snake.is_alive());
    }

    #[test]
    fn test_steering_left_takes_precedence() {
        let mut snake = create_snake();
        snake.steer(true, true);
        assert_eq!(snake.dx, -1);
    }

    #[test]
    fn test_steering_is_sticky() {
        let mut snake = create_snake();
        snake.steer(false, true);
        assert_eq!(snake.dx, 1);
        snake.steer(false, false);
        assert_eq!(snake.dx, 1);
    }

    #[test]
    fn test_boundary_exit_kills_without_moving() {
        let settings = test_settings();
        let mut snake = Snake::new(
            "Player 1".to_string(),
            Pane::new(0, 9),
            Point::new(9, 50),
            &settings,
        );
        snake.steer(false, true);
        let body_before: Vec<Point> = snake.body.iter().copied().collect();

        snake.step();

        assert!(!snake.is_alive());
        assert_eq!(snake.death_cause, Some(DeathCause::PaneBoundary));
        let body_after: Vec<Point> = snake.body.iter().copied().collect();
        assert_eq!(body_before, body_after);
    }

    #[test]
    fn test_self_collision_kills_but_keeps_new_head() {
        let mut snake = create_snake();
        // Head at (5, 50) steering right lands on (6, 49), already a segment.
        snake.set_body(vec![
            Point::new(5, 50),
            Point::new(6, 49),
            Point::new(7, 49),
            Point::new(7, 50),
        ]);
        snake.steer(false, true);

        snake.step();

        assert!(!snake.is_alive());
        assert_eq!(snake.death_cause, Some(DeathCause::SelfCollision));
        assert_eq!(snake.head(), Point::new(6, 49));
        assert_eq!(snake.body.len(), 4);
    }

    #[test]
    fn test_dead_snake_never_mutates() {
        let mut snake = create_snake();
        snake.death_cause = Some(DeathCause::Obstacle);
        let body_before: Vec<Point> = snake.body.iter().copied().collect();

        snake.steer(true, false);
        snake.advance(1000);
        snake.collect_apple(0);
        snake.collect_golden_apple(0);

        assert_eq!(snake.dx, 0);
        assert_eq!(snake.steps, 0);
        assert_eq!(snake.apples_collected, 0);
        assert!(snake.active_powerup.is_none());
        let body_after: Vec<Point> = snake.body.iter().copied().collect();
        assert_eq!(body_before, body_after);
    }

    #[test]
    fn test_accumulator_carries_remainder_across_frames() {
        let mut snake = create_snake();
        snake.advance(40);
        snake.advance(40);
        assert_eq!(snake.steps, 0);
        snake.advance(40);
        // 120 accumulated covers one 100ms step with 20ms left over.
        assert_eq!(snake.steps, 1);
        snake.advance(80);
        assert_eq!(snake.steps, 2);
    }

    #[test]
    fn test_accumulator_is_additive_regardless_of_chunking() {
        let mut chunked = create_snake();
        for _ in 0..6 {
            chunked.advance(50);
        }
        let mut whole = create_snake();
        whole.advance(300);

        assert_eq!(chunked.steps, 3);
        assert_eq!(whole.steps, 3);
    }

    #[test]
    fn test_speed_boost_scales_interval_down_and_back() {
        let mut snake = create_snake();
        snake.activate_powerup(PowerUpKind::SpeedBoost, 1000);
        assert_eq!(snake.current_step_ms, 70);

        snake.update_powerups(4999);
        assert_eq!(snake.current_step_ms, 70);

        snake.update_powerups(5000);
        assert!(snake.active_powerup.is_none());
        assert_eq!(snake.current_step_ms, 100);
    }

    #[test]
    fn test_invincibility_leaves_interval_alone() {
        let mut snake = create_snake();
        snake.activate_powerup(PowerUpKind::Invincibility, 0);
        assert!(snake.is_invincible());
        assert_eq!(snake.current_step_ms, 100);
    }

    #[test]
    fn test_powerups_overwrite_instead_of_stacking() {
        let mut snake = create_snake();
        snake.activate_powerup(PowerUpKind::SpeedBoost, 0);
        snake.collect_golden_apple(1000);

        assert!(snake.is_invincible());
        assert_eq!(snake.current_step_ms, 100);
        let powerup = snake.active_powerup.unwrap();
        assert_eq!(powerup.expires_at_ms, 6000);
    }

    #[test]
    fn test_fifth_apple_triggers_exactly_one_boost() {
        let mut snake = create_snake();
        for _ in 0..4 {
            snake.collect_apple(0);
            assert!(snake.active_powerup.is_none());
        }
        snake.collect_apple(0);
        assert_eq!(
            snake.active_powerup.map(|p| p.kind),
            Some(PowerUpKind::SpeedBoost)
        );
        assert_eq!(snake.apples_collected, 5);
    }

    #[test]
    fn test_tenth_apple_triggers_boost_again() {
        let mut snake = create_snake();
        for _ in 0..9 {
            snake.collect_apple(0);
        }
        snake.active_powerup = None;
        snake.collect_apple(0);
        assert_eq!(
            snake.active_powerup.map(|p| p.kind),
            Some(PowerUpKind::SpeedBoost)
        );
    }

    #[test]
    fn test_boosted_cadence_takes_more_steps_for_same_time() {
        let mut boosted = create_snake();
        boosted.activate_powerup(PowerUpKind::SpeedBoost, 0);
        let mut normal = create_snake();

        boosted.advance(700);
        normal.advance(700);

        assert_eq!(boosted.steps, 10);
        assert_eq!(normal.steps, 7);
    }

    #[test]
    fn test_expired_boost_restores_cadence_before_next_advance() {
        let mut snake = create_snake();
        snake.activate_powerup(PowerUpKind::SpeedBoost, 0);
        snake.update_powerups(4000);
        snake.advance(200);
        assert_eq!(snake.steps, 2);
    }
}
