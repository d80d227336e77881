//! Platform abstraction layer
//!
//! Sits between the display refresh callback and the simulation:
//! - Fixed-step accumulator (frame time in, whole ticks out)
//! - One-shot input latching between ticks
//! - Key mapping
//! - Browser bridge (`web`, wasm32 only)

#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::sim::{Difficulty, GameEvent, GameState, TickInput, Viewport, tick};

/// What a key press means to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Jump,
    Restart,
    ToggleAutopilot,
}

/// Map a `KeyboardEvent.code` to an action
pub fn key_action(code: &str) -> Option<KeyAction> {
    match code {
        "Space" | "ArrowUp" | "KeyW" => Some(KeyAction::Jump),
        "KeyR" | "Enter" => Some(KeyAction::Restart),
        "KeyI" => Some(KeyAction::ToggleAutopilot),
        _ => None,
    }
}

/// A run that ended in a game over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinishedRun {
    pub score: u64,
    pub attempts: u32,
}

/// Outcome of a headless session
#[derive(Debug, Clone, Default)]
pub struct SessionReport {
    /// Ticks run across every restart
    pub ticks: u64,
    pub runs: Vec<FinishedRun>,
}

/// Owns the game state and feeds it whole ticks
pub struct FrameDriver {
    pub state: GameState,
    input: TickInput,
    accumulator: f32,
    last_time: f64,
}

impl FrameDriver {
    pub fn new(seed: u64, viewport: Viewport, difficulty: Difficulty) -> Self {
        Self {
            state: GameState::with_config(seed, viewport, difficulty),
            input: TickInput::default(),
            accumulator: 0.0,
            last_time: 0.0,
        }
    }

    /// Request a jump on the next tick
    pub fn jump(&mut self) {
        self.input.jump = true;
    }

    /// Request a restart on the next tick (ignored unless the run is over)
    pub fn restart(&mut self) {
        self.input.restart = true;
    }

    pub fn set_autopilot(&mut self, on: bool) {
        self.input.autopilot = on;
        log::info!("Autopilot: {}", on);
    }

    pub fn autopilot(&self) -> bool {
        self.input.autopilot
    }

    /// Difficulty changes take effect immediately with a fresh run
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.state.set_difficulty(difficulty);
        self.accumulator = 0.0;
        self.input.jump = false;
        self.input.restart = false;
    }

    /// Apply a keyboard press. Returns whether the key was used.
    pub fn handle_key(&mut self, code: &str) -> bool {
        match key_action(code) {
            Some(KeyAction::Jump) => self.jump(),
            Some(KeyAction::Restart) => self.restart(),
            Some(KeyAction::ToggleAutopilot) => self.set_autopilot(!self.input.autopilot),
            None => return false,
        }
        true
    }

    /// Run as many ticks as `dt` seconds cover. Returns the number of ticks run.
    pub fn advance(&mut self, dt: f32) -> u32 {
        let dt = dt.clamp(0.0, 0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.step();
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        // Drop what we couldn't catch up on instead of spiralling
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }

        substeps
    }

    /// One tick, then clear one-shot inputs
    fn step(&mut self) {
        tick(&mut self.state, &self.input);
        self.input.jump = false;
        self.input.restart = false;
    }

    /// Run `ticks` ticks without a display, restarting after every game over.
    /// Stops early once `max_runs` runs have finished.
    pub fn run_session(&mut self, ticks: u64, max_runs: usize) -> SessionReport {
        let mut report = SessionReport::default();
        while report.ticks < ticks && report.runs.len() < max_runs {
            self.step();
            report.ticks += 1;
            for event in self.state.drain_events() {
                if let GameEvent::GameOver { score, attempts } = event {
                    report.runs.push(FinishedRun { score, attempts });
                    self.restart();
                }
            }
        }
        report
    }

    /// Display refresh callback: `time` is the rAF timestamp in milliseconds
    pub fn frame(&mut self, time: f64) -> u32 {
        let dt = if self.last_time > 0.0 {
            ((time - self.last_time) / 1000.0) as f32
        } else {
            SIM_DT
        };
        self.last_time = time;
        self.advance(dt)
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GamePhase;

    fn driver() -> FrameDriver {
        FrameDriver::new(1, Viewport::default(), Difficulty::Easy)
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(key_action("Space"), Some(KeyAction::Jump));
        assert_eq!(key_action("ArrowUp"), Some(KeyAction::Jump));
        assert_eq!(key_action("KeyR"), Some(KeyAction::Restart));
        assert_eq!(key_action("KeyQ"), None);
    }

    #[test]
    fn test_one_tick_per_frame_at_60hz() {
        let mut d = driver();
        assert_eq!(d.frame(1000.0), 1);
        for i in 1..=60 {
            d.frame(1000.0 + i as f64 * 1000.0 / 60.0);
        }
        // Float drift may cost or gain a tick, never more
        assert!((60..=62).contains(&d.state.frames), "frames {}", d.state.frames);
    }

    #[test]
    fn test_jump_latched_until_tick() {
        let mut d = driver();
        d.handle_key("Space");
        // Not enough time for a tick yet
        assert_eq!(d.advance(SIM_DT * 0.5), 0);
        assert!(d.state.player.grounded);

        assert_eq!(d.advance(SIM_DT * 0.6), 1);
        assert!(!d.state.player.grounded);
        assert!(d.drain_events().contains(&GameEvent::Jumped));
    }

    #[test]
    fn test_jump_consumed_once() {
        let mut d = driver();
        d.jump();
        d.advance(SIM_DT * 3.5);
        let jumps = d
            .drain_events()
            .into_iter()
            .filter(|e| *e == GameEvent::Jumped)
            .count();
        assert_eq!(jumps, 1);
    }

    #[test]
    fn test_substeps_capped() {
        let mut d = driver();
        assert_eq!(d.advance(10.0), MAX_SUBSTEPS);
        assert!(d.accumulator <= SIM_DT);
    }

    #[test]
    fn test_restart_key_after_game_over() {
        let mut d = driver();
        d.state.phase = GamePhase::GameOver;
        d.state.attempts = 1;
        d.handle_key("KeyR");
        d.advance(SIM_DT);
        assert_eq!(d.state.phase, GamePhase::Running);
        assert_eq!(d.state.attempts, 1);
    }

    #[test]
    fn test_set_difficulty_clears_latched_input() {
        let mut d = driver();
        d.jump();
        d.set_difficulty(Difficulty::Hard);
        d.advance(SIM_DT);
        assert!(d.state.player.grounded);
        assert_eq!(d.state.difficulty, Difficulty::Hard);
    }

    #[test]
    fn test_session_length_spans_restarts() {
        // Nobody jumps, so every run ends on the first obstacle
        let mut d = FrameDriver::new(3, Viewport::default(), Difficulty::Hard);
        let report = d.run_session(3000, 100);
        assert_eq!(report.ticks, 3000);
        assert!(report.runs.len() >= 2, "runs {}", report.runs.len());
        assert!(d.state.frames < 3000);
        let attempts: Vec<u32> = report.runs.iter().map(|r| r.attempts).collect();
        let expected: Vec<u32> = (1..=report.runs.len() as u32).collect();
        assert_eq!(attempts, expected);
    }

    #[test]
    fn test_session_stops_at_max_runs() {
        let mut d = FrameDriver::new(4, Viewport::default(), Difficulty::Hard);
        let report = d.run_session(1_000_000, 2);
        assert_eq!(report.runs.len(), 2);
        assert!(report.ticks < 1_000_000);
    }

    #[test]
    fn test_autopilot_toggle() {
        let mut d = driver();
        assert!(!d.autopilot());
        assert!(d.handle_key("KeyI"));
        assert!(d.autopilot());
    }
}
