//! Browser bridge
//!
//! The page owns the canvas, the DOM text nodes, the difficulty dropdown and
//! the audio. It drives a `WebRunner` from `requestAnimationFrame` and keyboard
//! listeners, then draws the vertex list it gets back.

use wasm_bindgen::prelude::*;

use super::FrameDriver;
use crate::highscores::HighScores;
use crate::renderer::scene::palette_for;
use crate::renderer::{Vertex, build_scene};
use crate::settings::Settings;
use crate::sim::{Difficulty, GameEvent, Viewport};

/// Install the panic hook and console logger once per page
#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Dash Runner starting...");
}

#[wasm_bindgen]
pub struct WebRunner {
    driver: FrameDriver,
    settings: Settings,
    high_scores: HighScores,
    /// Set when a run ends, cleared by `take_game_over`
    game_over_pending: bool,
    /// Rank of the last finished run on the leaderboard (0 = not ranked)
    last_rank: u32,
}

#[wasm_bindgen]
impl WebRunner {
    /// Viewport size is read once; resizing the page needs a new runner
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32) -> WebRunner {
        let settings = Settings::load();
        let high_scores = HighScores::load();
        let seed = js_sys::Date::now() as u64;
        let driver = FrameDriver::new(seed, Viewport::new(width, height), settings.difficulty);
        log::info!(
            "Game initialized with seed: {} ({}x{}, {})",
            seed,
            width,
            height,
            settings.difficulty.as_str()
        );
        WebRunner {
            driver,
            settings,
            high_scores,
            game_over_pending: false,
            last_rank: 0,
        }
    }

    /// Call from `requestAnimationFrame` with its timestamp
    pub fn frame(&mut self, time: f64) -> u32 {
        let ticks = self.driver.frame(time);
        for event in self.driver.drain_events() {
            if let GameEvent::GameOver { score, attempts } = event {
                self.game_over_pending = true;
                let difficulty = self.driver.state.difficulty;
                self.last_rank = self
                    .high_scores
                    .add_score(score, difficulty, attempts, js_sys::Date::now())
                    .map(|r| r as u32)
                    .unwrap_or(0);
                if self.last_rank > 0 {
                    log::info!("New high score #{}: {}", self.last_rank, score);
                    self.high_scores.save();
                }
            }
        }
        ticks
    }

    pub fn jump(&mut self) {
        self.driver.jump();
    }

    pub fn restart(&mut self) {
        self.driver.restart();
    }

    /// `KeyboardEvent.code`; returns true if the page should preventDefault
    pub fn key_down(&mut self, code: &str) -> bool {
        self.driver.handle_key(code)
    }

    /// Dropdown index; out-of-range values select Normal
    pub fn set_difficulty(&mut self, index: i32) {
        let difficulty = Difficulty::from_index(index);
        self.driver.set_difficulty(difficulty);
        self.game_over_pending = false;
        self.settings.difficulty = difficulty;
        self.settings.save();
    }

    pub fn difficulty(&self) -> i32 {
        self.driver.state.difficulty.index()
    }

    pub fn score(&self) -> f64 {
        self.driver.state.score as f64
    }

    pub fn attempts(&self) -> u32 {
        self.driver.state.attempts
    }

    pub fn best_score(&self) -> f64 {
        self.high_scores
            .top_score()
            .unwrap_or(0)
            .max(self.driver.state.best_score) as f64
    }

    /// Best finished run on the tier being played
    pub fn best_for_current_tier(&self) -> f64 {
        self.high_scores
            .best_for(self.driver.state.difficulty)
            .unwrap_or(0) as f64
    }

    pub fn is_game_over(&self) -> bool {
        self.driver.state.is_game_over()
    }

    /// True exactly once per game over, for showing the message
    pub fn take_game_over(&mut self) -> bool {
        std::mem::take(&mut self.game_over_pending)
    }

    pub fn last_rank(&self) -> u32 {
        self.last_rank
    }

    /// Flattened triangle list: x, y, r, g, b, a per vertex
    pub fn vertices(&self) -> Vec<f32> {
        let vertices = build_scene(&self.driver.state, &self.settings);
        bytemuck::cast_slice::<Vertex, f32>(&vertices).to_vec()
    }

    /// RGBA the page should clear the canvas with
    pub fn clear_color(&self) -> Vec<f32> {
        palette_for(&self.settings).background.to_vec()
    }

    /// Preset name ("low", "medium", "high"); returns false if unknown
    pub fn set_quality(&mut self, name: &str) -> bool {
        let changed = self.settings.set_quality(name);
        if changed {
            self.settings.save();
        }
        changed
    }

    pub fn set_high_contrast(&mut self, on: bool) {
        self.settings.high_contrast = on;
        self.settings.save();
    }

    pub fn set_reduced_motion(&mut self, on: bool) {
        self.settings.reduced_motion = on;
        self.settings.save();
    }
}
