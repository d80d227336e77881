//! Dash Runner - An endless-runner arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collisions, game state)
//! - `renderer`: Triangle-list geometry for every entity
//! - `platform`: Frame driver and browser bridge
//! - `settings`: Player preferences
//! - `highscores`: Best runs leaderboard

pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use platform::FrameDriver;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz display frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum ticks per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Default viewport (the playfield is always 400px tall)
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 400.0;

    /// Downward acceleration added to the player's velocity every tick
    pub const GRAVITY: f32 = 1.0;

    /// Player defaults
    pub const PLAYER_X: f32 = 50.0;
    pub const PLAYER_SIZE: f32 = 30.0;
    pub const PLAYER_JUMP_POWER: f32 = -20.0;

    /// Monster (pursuer) defaults
    pub const MONSTER_SIZE: f32 = 40.0;
    pub const MONSTER_SPEED: f32 = 0.5;
    /// Minimum gap kept between the monster's left edge and the player's left edge
    pub const MONSTER_TRAIL_OFFSET: f32 = 45.0;

    /// Ticks between obstacle spawns
    pub const SPAWN_INTERVAL: u64 = 100;
}
