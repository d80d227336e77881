//! Game state and core simulation types
//!
//! All state that must be persisted for determinism lives here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Body, Rect};
use super::tuning::{Difficulty, ROTATOR_SPIN, WAVE_AMPLITUDE, WAVE_FREQUENCY};
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Run ended, waiting for a restart request
    GameOver,
}

/// Playfield bounds, fixed for the lifetime of a state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: VIEWPORT_WIDTH,
            height: VIEWPORT_HEIGHT,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        debug_assert!(width > 0.0 && height > 0.0, "viewport must be non-empty");
        Self { width, height }
    }

    /// The floor is the bottom edge of the viewport
    #[inline]
    pub fn floor_y(&self) -> f32 {
        self.height
    }
}

/// The runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (negative is up)
    pub vel_y: f32,
    /// Velocity applied on jump
    pub jump_power: f32,
    pub grounded: bool,
}

impl Player {
    /// A player standing on the floor
    pub fn new(floor_y: f32) -> Self {
        Self {
            pos: Vec2::new(PLAYER_X, floor_y - PLAYER_SIZE),
            size: Vec2::splat(PLAYER_SIZE),
            vel_y: 0.0,
            jump_power: PLAYER_JUMP_POWER,
            grounded: true,
        }
    }

    /// Jump if standing on the floor. Returns whether the jump happened.
    pub fn jump(&mut self) -> bool {
        if !self.grounded {
            return false;
        }
        self.vel_y = self.jump_power;
        self.grounded = false;
        true
    }

    /// Integrate gravity and clamp to the floor. Returns true on the tick the player lands.
    pub fn update(&mut self, gravity: f32, floor_y: f32) -> bool {
        let was_grounded = self.grounded;

        self.vel_y += gravity;
        self.pos.y += self.vel_y;

        if self.pos.y + self.size.y >= floor_y {
            self.pos.y = floor_y - self.size.y;
            self.vel_y = 0.0;
            self.grounded = true;
        } else {
            self.grounded = false;
        }

        self.grounded && !was_grounded
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

impl Body for Player {
    fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// Obstacle variants. Motion state lives on the variant that uses it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Triangle on the floor
    Spike,
    /// Plain box
    Block,
    /// Spinning square; the spin is cosmetic
    Rotator { angle: f32 },
    /// Box bobbing on a sine wave around `base_y`
    MovingBlock { phase: f32, base_y: f32 },
    /// Glowing ring
    Portal,
}

impl ObstacleKind {
    pub fn name(&self) -> &'static str {
        match self {
            ObstacleKind::Spike => "spike",
            ObstacleKind::Block => "block",
            ObstacleKind::Rotator { .. } => "rotator",
            ObstacleKind::MovingBlock { .. } => "movingBlock",
            ObstacleKind::Portal => "portal",
        }
    }
}

/// Something to jump over
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub pos: Vec2,
    pub size: Vec2,
    /// Pixels per tick, leftward
    pub speed: f32,
}

impl Obstacle {
    /// Create an obstacle with its left edge at `x`, resting on the floor.
    ///
    /// Moving blocks rest `WAVE_AMPLITUDE` higher so the wave never dips below the floor.
    pub fn new(id: u32, kind: ObstacleKind, x: f32, floor_y: f32, size: Vec2, speed: f32) -> Self {
        debug_assert!(size.x > 0.0 && size.y > 0.0, "obstacle size must be positive");
        debug_assert!(speed > 0.0, "obstacles must move left");

        let rest_y = floor_y - size.y;
        let (kind, y) = match kind {
            ObstacleKind::MovingBlock { phase, .. } => {
                let base_y = rest_y - WAVE_AMPLITUDE;
                (ObstacleKind::MovingBlock { phase, base_y }, base_y)
            }
            other => (other, rest_y),
        };

        Self {
            id,
            kind,
            pos: Vec2::new(x, y),
            size,
            speed,
        }
    }

    /// Advance one tick
    pub fn update(&mut self) {
        self.pos.x -= self.speed;

        match &mut self.kind {
            ObstacleKind::MovingBlock { phase, base_y } => {
                *phase += self.speed;
                self.pos.y = *base_y + (*phase * WAVE_FREQUENCY).sin() * WAVE_AMPLITUDE;
            }
            ObstacleKind::Rotator { angle } => {
                *angle = (*angle + ROTATOR_SPIN) % std::f32::consts::TAU;
            }
            ObstacleKind::Spike | ObstacleKind::Block | ObstacleKind::Portal => {}
        }
    }

    /// Fully past the left edge of the viewport
    #[inline]
    pub fn is_off_screen(&self) -> bool {
        self.pos.x + self.size.x < 0.0
    }
}

impl Body for Obstacle {
    fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// The pursuer that creeps up behind the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Monster {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
}

impl Monster {
    /// A monster standing on the floor just off the left edge
    pub fn new(floor_y: f32) -> Self {
        Self {
            pos: Vec2::new(-MONSTER_SIZE, floor_y - MONSTER_SIZE),
            size: Vec2::splat(MONSTER_SIZE),
            speed: MONSTER_SPEED,
        }
    }

    /// Rightmost x the monster may reach while chasing `player`
    #[inline]
    pub fn chase_limit(player: &Player) -> f32 {
        player.pos.x - MONSTER_TRAIL_OFFSET
    }

    /// Creep toward the player, never closer than the trail offset
    pub fn update(&mut self, player: &Player) {
        let limit = Self::chase_limit(player);
        if self.pos.x < limit {
            self.pos.x = (self.pos.x + self.speed).min(limit);
        }
    }
}

impl Body for Monster {
    fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// Borrowed view of any entity, in draw order
#[derive(Debug, Clone, Copy)]
pub enum EntityRef<'a> {
    Player(&'a Player),
    Obstacle(&'a Obstacle),
    Monster(&'a Monster),
}

impl Body for EntityRef<'_> {
    fn bounds(&self) -> Rect {
        match self {
            EntityRef::Player(p) => p.bounds(),
            EntityRef::Obstacle(o) => o.bounds(),
            EntityRef::Monster(m) => m.bounds(),
        }
    }
}

/// Things the host may want to react to (sound, HUD, modal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    Landed,
    ObstaclePassed { score: u64 },
    GameOver { score: u64, attempts: u32 },
    Restarted,
}

/// Particle flavor, used for color lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    /// Kicked up on landing
    Dust,
    /// Game over explosion
    Burst,
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub kind: ParticleKind,
    pub life: f32, // 0-1, decreases over time
    pub size: f32,
}

/// Maximum particles
pub const MAX_PARTICLES: usize = 256;

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    /// Gameplay RNG (obstacle variants and sizes only)
    pub rng: Pcg32,
    pub viewport: Viewport,
    /// Tier applied to newly spawned obstacles
    pub difficulty: Difficulty,
    pub phase: GamePhase,
    /// Ticks since the run started
    pub frames: u64,
    /// Obstacles passed this run
    pub score: u64,
    /// Runs that ended in a game over (never reset)
    pub attempts: u32,
    /// Highest score across all runs of this state
    pub best_score: u64,
    pub player: Player,
    pub monster: Monster,
    /// Live obstacles, in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Visual particles (not gameplay-affecting)
    #[serde(skip)]
    pub particles: Vec<Particle>,
    /// Screen shake intensity (0-1)
    #[serde(skip)]
    pub screen_shake: f32,
    /// Events since the host last drained them
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// New run on the default viewport at Normal difficulty
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, Viewport::default(), Difficulty::default())
    }

    pub fn with_config(seed: u64, viewport: Viewport, difficulty: Difficulty) -> Self {
        let floor_y = viewport.floor_y();
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            viewport,
            difficulty,
            phase: GamePhase::Running,
            frames: 0,
            score: 0,
            attempts: 0,
            best_score: 0,
            player: Player::new(floor_y),
            monster: Monster::new(floor_y),
            obstacles: Vec::new(),
            particles: Vec::new(),
            screen_shake: 0.0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Start a fresh run. Attempts and best score carry over.
    pub fn restart(&mut self) {
        let floor_y = self.viewport.floor_y();
        self.player = Player::new(floor_y);
        self.monster = Monster::new(floor_y);
        self.obstacles.clear();
        self.frames = 0;
        self.score = 0;
        self.phase = GamePhase::Running;
        self.events.push(GameEvent::Restarted);
    }

    /// Switch tier and restart. Does not count as an attempt.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        log::info!(
            "Difficulty {} -> {}",
            self.difficulty.as_str(),
            difficulty.as_str()
        );
        self.difficulty = difficulty;
        self.restart();
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Every entity in draw order: monster, obstacles, player
    pub fn entities(&self) -> impl Iterator<Item = EntityRef<'_>> {
        std::iter::once(EntityRef::Monster(&self.monster))
            .chain(self.obstacles.iter().map(EntityRef::Obstacle))
            .chain(std::iter::once(EntityRef::Player(&self.player)))
    }
}
