//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per display frame, fixed units per tick
//! - Seeded RNG only
//! - Stable iteration order (obstacles in spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod tuning;

pub use collision::{Body, Rect, aabb_overlap};
pub use spawn::{build_obstacle, spawn_obstacles};
pub use state::{
    EntityRef, GameEvent, GamePhase, GameState, Monster, Obstacle, ObstacleKind, Particle,
    ParticleKind, Player, Viewport,
};
pub use tick::{TickInput, tick};
pub use tuning::Difficulty;
