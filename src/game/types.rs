use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum PowerUpKind {
    SpeedBoost,
    Invincibility,
}

/// At most one power-up is active at a time; activating a new one
/// overwrites the previous kind and expiry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActivePowerUp {
    pub kind: PowerUpKind,
    pub expires_at_ms: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DeathCause {
    PaneBoundary,
    SelfCollision,
    Obstacle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum PlayerSlot {
    One,
    Two,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum WinReason {
    FinishLine,
    OpponentCrashed,
    BothCrashed,
}

/// Terminal result of a session. `winner` is `None` for a draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct GameOutcome {
    pub winner: Option<PlayerSlot>,
    pub reason: WinReason,
}

/// Raw per-frame signals from the shell. Steering is sampled every frame;
/// `restart` replaces the whole session before anything else runs.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameInput {
    pub restart: bool,
    pub p1_left: bool,
    pub p1_right: bool,
    pub p2_left: bool,
    pub p2_right: bool,
}
