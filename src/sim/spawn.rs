//! Obstacle spawning
//!
//! Cadence is deterministic (one obstacle every `SPAWN_INTERVAL` ticks); only the
//! obstacle's variant and size are rolled, from the state's seeded RNG.

use glam::Vec2;
use rand::Rng;

use super::state::{GameState, Obstacle, ObstacleKind};
use super::tuning::{Difficulty, ObstacleProfile, VariantPool};
use crate::consts::SPAWN_INTERVAL;

/// Whether an obstacle spawns on the tick that starts at `frames`
#[inline]
pub fn is_spawn_frame(frames: u64) -> bool {
    frames.is_multiple_of(SPAWN_INTERVAL)
}

/// Roll a variant from a tier's pool
pub fn pick_kind(pool: VariantPool, rng: &mut impl Rng) -> ObstacleKind {
    match pool {
        VariantPool::Basic => {
            if rng.random_bool(0.5) {
                ObstacleKind::Block
            } else {
                ObstacleKind::Spike
            }
        }
        VariantPool::Weighted { rotator_chance } => {
            if rng.random_bool(rotator_chance) {
                ObstacleKind::Rotator { angle: 0.0 }
            } else {
                ObstacleKind::MovingBlock {
                    phase: 0.0,
                    base_y: 0.0,
                }
            }
        }
        VariantPool::Any => match rng.random_range(0..5u32) {
            0 => ObstacleKind::Spike,
            1 => ObstacleKind::Block,
            2 => ObstacleKind::Rotator { angle: 0.0 },
            3 => ObstacleKind::MovingBlock {
                phase: 0.0,
                base_y: 0.0,
            },
            _ => ObstacleKind::Portal,
        },
    }
}

/// Roll a size within a profile's ranges
pub fn pick_size(profile: &ObstacleProfile, rng: &mut impl Rng) -> Vec2 {
    if profile.is_fixed_size() {
        return Vec2::new(profile.min_width, profile.min_height);
    }
    let w = rng.random_range(profile.min_width..=profile.max_width);
    let h = rng.random_range(profile.min_height..=profile.max_height);
    Vec2::new(w, h)
}

/// Build one obstacle at the right edge of the viewport, tuned for `difficulty`
pub fn build_obstacle(state: &mut GameState, difficulty: Difficulty) -> Obstacle {
    let profile = difficulty.profile();
    let kind = pick_kind(profile.pool, &mut state.rng);
    let size = pick_size(&profile, &mut state.rng);
    let id = state.next_entity_id();
    Obstacle::new(
        id,
        kind,
        state.viewport.width,
        state.viewport.floor_y(),
        size,
        profile.speed,
    )
}

/// Append an obstacle if this tick is on the spawn cadence. Returns whether one spawned.
pub fn spawn_obstacles(state: &mut GameState) -> bool {
    if !is_spawn_frame(state.frames) {
        return false;
    }
    let difficulty = state.difficulty;
    let obstacle = build_obstacle(state, difficulty);
    log::debug!(
        "Spawned {} #{} ({}x{}) at frame {}",
        obstacle.kind.name(),
        obstacle.id,
        obstacle.size.x,
        obstacle.size.y,
        state.frames
    );
    state.obstacles.push(obstacle);
    true
}
