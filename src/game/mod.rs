mod apple;
mod game_rng;
mod game_state;
mod obstacles;
mod pane;
mod settings;
mod snake;
mod snapshot;
mod types;

pub use apple::{Apple, Apples};
pub use game_rng::GameRng;
pub use game_state::{GameState, MAX_FRAME_DELTA_MS};
pub use obstacles::Obstacles;
pub use pane::Pane;
pub use settings::GameSettings;
pub use snake::Snake;
pub use snapshot::{AppleView, GameSnapshot, SnakeView};
pub use types::{
    ActivePowerUp, DeathCause, FrameInput, GameOutcome, PlayerSlot, Point, PowerUpKind, WinReason,
};
