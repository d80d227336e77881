//! Simulation tick
//!
//! Core game loop that advances simulation deterministically, one display frame
//! per call. All distances and velocities are in pixels per tick.

use glam::Vec2;

use super::collision::Body;
use super::spawn::spawn_obstacles;
use super::state::{GameEvent, GamePhase, GameState, MAX_PARTICLES, Particle, ParticleKind};
use crate::consts::GRAVITY;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump (space / up / tap)
    pub jump: bool,
    /// Start a new run after a game over
    pub restart: bool,
    /// Demo mode - the simulation jumps on its own
    pub autopilot: bool,
}

/// How far ahead of the player (pixels from its right edge) the autopilot looks
const AUTOPILOT_LOOKAHEAD: f32 = 60.0;

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    update_effects(state);

    if state.phase == GamePhase::GameOver {
        if input.restart {
            log::info!("Restarting (attempt {})", state.attempts + 1);
            state.restart();
        }
        return;
    }

    let wants_jump = input.jump || (input.autopilot && autopilot_should_jump(state));
    if wants_jump && state.player.jump() {
        state.events.push(GameEvent::Jumped);
    }

    // 1. Player and pursuer
    let floor_y = state.viewport.floor_y();
    if state.player.update(GRAVITY, floor_y) {
        state.events.push(GameEvent::Landed);
        spawn_dust(state);
    }
    state.monster.update(&state.player);

    // 2. Spawner
    spawn_obstacles(state);

    // 3-4. Obstacles: advance, collide, prune
    let player = &state.player;
    let mut hit = false;
    let mut passed = 0u64;
    state.obstacles.retain_mut(|obstacle| {
        obstacle.update();
        if obstacle.touches(player) {
            log::debug!("Player hit {} #{}", obstacle.kind.name(), obstacle.id);
            hit = true;
        }
        if obstacle.is_off_screen() {
            passed += 1;
            false
        } else {
            true
        }
    });
    for _ in 0..passed {
        state.score += 1;
        state.events.push(GameEvent::ObstaclePassed { score: state.score });
    }

    if state.monster.touches(&state.player) {
        log::debug!("Player caught by monster");
        hit = true;
    }

    // 5. Frame counter
    state.frames += 1;

    if hit {
        game_over(state);
    }
}

/// End the run: count the attempt and notify the host
fn game_over(state: &mut GameState) {
    state.phase = GamePhase::GameOver;
    state.attempts += 1;
    state.best_score = state.best_score.max(state.score);
    state.events.push(GameEvent::GameOver {
        score: state.score,
        attempts: state.attempts,
    });
    log::info!(
        "Game over: score {} (best {}), attempt {} on {}",
        state.score,
        state.best_score,
        state.attempts,
        state.difficulty.as_str()
    );

    spawn_burst(state);
    state.screen_shake = 1.0;
}

/// Jump when the nearest obstacle ahead is about to reach the player
fn autopilot_should_jump(state: &GameState) -> bool {
    let player_right = state.player.pos.x + state.player.size.x;
    state
        .obstacles
        .iter()
        .filter(|o| o.pos.x + o.size.x >= state.player.pos.x)
        .map(|o| o.pos.x - player_right)
        .any(|gap| gap <= AUTOPILOT_LOOKAHEAD)
}

/// Decay shake and age particles (runs in every phase)
fn update_effects(state: &mut GameState) {
    state.screen_shake *= 0.9;
    if state.screen_shake < 0.01 {
        state.screen_shake = 0.0;
    }

    let floor_y = state.viewport.floor_y();
    for particle in state.particles.iter_mut() {
        particle.pos += particle.vel;
        particle.vel.y += 0.25; // Particles feel gravity too, just less
        if particle.pos.y > floor_y {
            particle.pos.y = floor_y;
            particle.vel.y *= -0.4;
        }
        particle.life -= match particle.kind {
            ParticleKind::Dust => 0.05,
            ParticleKind::Burst => 0.02,
        };
        particle.size *= 0.98;
    }
    state.particles.retain(|p| p.life > 0.0);
}

/// Cheap deterministic scatter so effects never touch the gameplay RNG
fn hash_unit(seed: u32, i: u32) -> (f32, f32, f32) {
    let hash = seed.wrapping_mul(2654435761).wrapping_add(i.wrapping_mul(7919));
    let r1 = (hash % 1000) as f32 / 1000.0;
    let r2 = ((hash >> 10) % 1000) as f32 / 1000.0;
    let r3 = ((hash >> 20) % 1000) as f32 / 1000.0;
    (r1, r2, r3)
}

fn push_particle(state: &mut GameState, particle: Particle) {
    if state.particles.len() >= MAX_PARTICLES {
        // Remove oldest particles to make room
        state.particles.remove(0);
    }
    state.particles.push(particle);
}

/// Puff of dust at the player's feet
fn spawn_dust(state: &mut GameState) {
    let feet = Vec2::new(
        state.player.pos.x + state.player.size.x * 0.5,
        state.player.bottom(),
    );
    let seed = state.frames as u32;
    for i in 0..6 {
        let (r1, r2, r3) = hash_unit(seed, i);
        let dir = if i % 2 == 0 { -1.0 } else { 1.0 };
        push_particle(
            state,
            Particle {
                pos: feet,
                vel: Vec2::new(dir * (0.5 + r1 * 1.5), -(0.5 + r2 * 1.5)),
                kind: ParticleKind::Dust,
                life: 0.6 + r3 * 0.4,
                size: 2.0 + r2 * 2.0,
            },
        );
    }
}

/// Explosion around the player on game over
fn spawn_burst(state: &mut GameState) {
    let center = state.player.bounds().center();
    let seed = (state.frames as u32) ^ state.attempts;
    for i in 0..32 {
        let (r1, r2, r3) = hash_unit(seed, i);
        let angle = (i as f32 / 32.0 + r1 * 0.1) * std::f32::consts::TAU;
        let speed = 2.0 + r2 * 4.0;
        push_particle(
            state,
            Particle {
                pos: center,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                kind: ParticleKind::Burst,
                life: 0.7 + r3 * 0.3,
                size: 3.0 + r3 * 3.0,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::{Obstacle, ObstacleKind};
    use crate::sim::{Difficulty, Viewport};
    use proptest::prelude::*;

    fn jump_input() -> TickInput {
        TickInput {
            jump: true,
            ..Default::default()
        }
    }

    fn restart_input() -> TickInput {
        TickInput {
            restart: true,
            ..Default::default()
        }
    }

    /// Move the player out of the obstacle lane so nothing can hit it
    fn park_player(state: &mut GameState) {
        state.player.pos.x = -10_000.0;
    }

    #[test]
    fn test_first_tick_spawns() {
        let mut state = GameState::new(1);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.frames, 1);
        // Spawned at the edge, then advanced once in the same tick
        let obstacle = &state.obstacles[0];
        assert_eq!(obstacle.pos.x, VIEWPORT_WIDTH - obstacle.speed);
    }

    #[test]
    fn test_spawner_cadence_over_ticks() {
        let mut state = GameState::with_config(2, Viewport::default(), Difficulty::Easy);
        park_player(&mut state);

        let mut spawns = 0;
        for t in 0..(SPAWN_INTERVAL * 5) {
            let seen_before = state.obstacles.len() as u64 + state.score;
            tick(&mut state, &TickInput::default());
            let seen_after = state.obstacles.len() as u64 + state.score;
            let spawned = seen_after - seen_before;
            if t.is_multiple_of(SPAWN_INTERVAL) {
                assert_eq!(spawned, 1, "expected a spawn at tick {}", t);
            } else {
                assert_eq!(spawned, 0, "unexpected spawn at tick {}", t);
            }
            spawns += spawned;
        }
        assert_eq!(spawns, 5);
    }

    #[test]
    fn test_end_to_end_score_counts_passed_obstacles() {
        // Easy obstacles: 20px wide at 4px/tick from x=800 leave after 206 ticks.
        let mut state = GameState::with_config(3, Viewport::new(800.0, 400.0), Difficulty::Easy);
        park_player(&mut state);

        for _ in 0..205 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.score, 0);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 1);

        for _ in 206..1000 {
            tick(&mut state, &TickInput::default());
        }
        // Spawns at ticks 1, 101, ..., 901; the first eight are gone by tick 1000
        assert_eq!(state.score, 8);
        assert_eq!(state.obstacles.len(), 2);
        assert_eq!(state.attempts, 0);
        assert_eq!(state.phase, GamePhase::Running);

        let passed = state
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::ObstaclePassed { .. }))
            .count();
        assert_eq!(passed as u64, state.score);
    }

    #[test]
    fn test_forced_overlap_is_game_over() {
        let mut state = GameState::new(4);
        let id = state.next_entity_id();
        let floor_y = state.viewport.floor_y();
        // Wide block sitting right on top of the player
        state.obstacles.push(Obstacle::new(
            id,
            ObstacleKind::Block,
            state.player.pos.x,
            floor_y,
            Vec2::new(60.0, 40.0),
            1.0,
        ));

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.attempts, 1);
        assert!(state.events.contains(&GameEvent::GameOver { score: 0, attempts: 1 }));
        assert!(!state.particles.is_empty());
        assert!(state.screen_shake > 0.0);
    }

    #[test]
    fn test_monster_catching_player_is_game_over() {
        let mut state = GameState::new(11);
        // Past its chase limit the monster holds position, so it stays on the player
        state.monster.pos.x = state.player.pos.x;
        assert!(state.monster.touches(&state.player));

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.attempts, 1);
        assert!(state.events.contains(&GameEvent::GameOver { score: 0, attempts: 1 }));
    }

    #[test]
    fn test_monster_trails_grounded_player() {
        let mut state = GameState::new(12);
        let limit = state.player.pos.x - MONSTER_TRAIL_OFFSET;
        for _ in 0..2000 {
            tick(&mut state, &TickInput::default());
            state.obstacles.clear();
            assert!(state.player.grounded);
            assert!(state.monster.pos.x <= limit);
            assert!(!state.monster.touches(&state.player));
        }
        // Closed the whole gap but never made contact
        assert_eq!(state.monster.pos.x, limit);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.attempts, 0);
    }

    #[test]
    fn test_game_over_halts_until_restart() {
        let mut state = GameState::new(5);
        state.score = 3;
        game_over(&mut state);
        assert_eq!(state.best_score, 3);
        let frames = state.frames;
        let player_y = state.player.pos.y;

        for _ in 0..50 {
            tick(&mut state, &jump_input());
        }
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.frames, frames);
        assert_eq!(state.player.pos.y, player_y);
        assert_eq!(state.attempts, 1);

        tick(&mut state, &restart_input());
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.attempts, 1);
        assert_eq!(state.best_score, 3);
    }

    #[test]
    fn test_restart_ignored_while_running() {
        let mut state = GameState::new(6);
        for _ in 0..10 {
            tick(&mut state, &TickInput::default());
        }
        tick(&mut state, &restart_input());
        assert_eq!(state.frames, 11);
        assert!(!state.events.contains(&GameEvent::Restarted));
    }

    #[test]
    fn test_jump_event_and_landing_dust() {
        let mut state = GameState::new(7);
        park_player(&mut state);
        tick(&mut state, &jump_input());
        assert!(!state.player.grounded);
        assert_eq!(state.events[0], GameEvent::Jumped);

        // Holding jump in the air does nothing
        tick(&mut state, &jump_input());
        let jumps = state.events.iter().filter(|e| **e == GameEvent::Jumped).count();
        assert_eq!(jumps, 1);

        for _ in 0..60 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.player.grounded);
        assert!(state.events.contains(&GameEvent::Landed));
    }

    #[test]
    fn test_difficulty_change_only_affects_new_obstacles() {
        let mut state = GameState::with_config(8, Viewport::default(), Difficulty::Easy);
        park_player(&mut state);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.obstacles[0].speed, 4.0);

        state.set_difficulty(Difficulty::Hard);
        assert!(state.obstacles.is_empty());
        tick(&mut state, &TickInput::default());
        assert_eq!(state.obstacles[0].speed, 9.0);
    }

    #[test]
    fn test_autopilot_survives_easy() {
        let mut state = GameState::with_config(9, Viewport::default(), Difficulty::Easy);
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..3000 {
            tick(&mut state, &input);
        }
        assert_eq!(state.attempts, 0);
        assert!(state.score > 20);
    }

    #[test]
    fn test_effects_fade_during_game_over() {
        let mut state = GameState::new(10);
        game_over(&mut state);
        assert!(!state.particles.is_empty());
        for _ in 0..200 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.particles.is_empty());
        assert_eq!(state.screen_shake, 0.0);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::with_config(99999, Viewport::default(), Difficulty::Hard);
        let mut state2 = GameState::with_config(99999, Viewport::default(), Difficulty::Hard);

        let inputs = [
            TickInput {
                autopilot: true,
                ..Default::default()
            },
            jump_input(),
            TickInput::default(),
        ];

        for i in 0..2000 {
            let input = &inputs[i % inputs.len()];
            tick(&mut state1, input);
            tick(&mut state2, input);
        }

        assert_eq!(state1.frames, state2.frames);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.attempts, state2.attempts);
        assert_eq!(state1.obstacles.len(), state2.obstacles.len());
        assert_eq!(state1.player.pos, state2.player.pos);
    }

    proptest! {
        #[test]
        fn invariants_hold_every_tick(
            seed in 0u64..1000,
            tier in 0i32..3,
            jumps in proptest::collection::vec(any::<bool>(), 50..400),
        ) {
            let difficulty = Difficulty::from_index(tier);
            let mut state = GameState::with_config(seed, Viewport::default(), difficulty);
            for jump in jumps {
                let score_before = state.score;
                let attempts_before = state.attempts;
                let was_running = state.phase == GamePhase::Running;

                let input = TickInput {
                    jump,
                    restart: true,
                    ..Default::default()
                };
                tick(&mut state, &input);

                prop_assert!(state.player.bottom() <= state.viewport.floor_y());
                prop_assert!(state.monster.pos.x <= state.player.pos.x - MONSTER_TRAIL_OFFSET);
                prop_assert!(state.obstacles.iter().all(|o| !o.is_off_screen()));
                if was_running {
                    // At most one obstacle can leave per tick at these speeds
                    prop_assert!(state.score <= score_before + 1);
                    prop_assert!(state.attempts <= attempts_before + 1);
                } else {
                    prop_assert_eq!(state.score, 0);
                    prop_assert_eq!(state.attempts, attempts_before);
                }
            }
        }
    }
}
