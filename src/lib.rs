pub mod config;
pub mod game;
pub mod logger;

pub use game::{FrameInput, GameRng, GameSettings, GameSnapshot, GameState};
