use std::collections::HashSet;

use serde::Serialize;

use super::game_rng::GameRng;
use super::types::Point;

const EMPTY_CELL_ATTEMPTS: u32 = 50;

/// The fixed column range `[x0, x1]` (inclusive) owned by one player.
/// Vertical movement is unbounded; only columns are fenced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Pane {
    pub x0: i32,
    pub x1: i32,
}

impl Pane {
    pub fn new(x0: i32, x1: i32) -> Self {
        Self { x0, x1 }
    }

    pub fn contains_x(&self, x: i32) -> bool {
        (self.x0..=self.x1).contains(&x)
    }

    pub fn width(&self) -> i32 {
        self.x1 - self.x0 + 1
    }

    pub fn rand_x(&self, rng: &mut GameRng) -> i32 {
        rng.random_range(self.x0..=self.x1)
    }

    /// Bounded random probe for a free cell in this pane's columns and the
    /// given row window. Returns `None` once the attempts are exhausted.
    pub fn random_empty_cell(
        &self,
        occupied: &HashSet<Point>,
        y_min: i32,
        y_max: i32,
        rng: &mut GameRng,
    ) -> Option<Point> {
        for _ in 0..EMPTY_CELL_ATTEMPTS {
            let candidate = Point::new(self.rand_x(rng), rng.random_range(y_min..=y_max));
            if !occupied.contains(&candidate) {
                return Some(candidate);
            }
        }
        None
    }
}
