//! High score leaderboard system
//!
//! Persisted to LocalStorage, tracks the top 10 runs.

use serde::{Deserialize, Serialize};

use crate::sim::Difficulty;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Obstacles passed
    pub score: u64,
    /// Tier the run was played on
    pub difficulty: Difficulty,
    /// Which attempt this was
    pub attempt: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "dash_runner_highscores";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Add a new score to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(
        &mut self,
        score: u64,
        difficulty: Difficulty,
        attempt: u32,
        timestamp: f64,
    ) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            score,
            difficulty,
            attempt,
            timestamp,
        };

        // Find insertion point (sorted descending by score, ties keep the older run first)
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Best score on one tier
    pub fn best_for(&self, difficulty: Difficulty) -> Option<u64> {
        self.entries
            .iter()
            .filter(|e| e.difficulty == difficulty)
            .map(|e| e.score)
            .max()
    }

    /// Load high scores from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str::<HighScores>(&json) {
                    Ok(scores) => {
                        log::info!("Loaded {} high scores", scores.entries.len());
                        return scores;
                    }
                    Err(e) => log::warn!("Discarding unreadable high scores: {}", e),
                }
            }
        }

        log::info!("No high scores found, starting fresh");
        Self::new()
    }

    /// Save high scores to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("High scores saved ({} entries)", self.entries.len());
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_never_qualifies() {
        let mut scores = HighScores::new();
        assert!(!scores.qualifies(0));
        assert_eq!(scores.add_score(0, Difficulty::Easy, 1, 0.0), None);
        assert!(scores.entries.is_empty());
    }

    #[test]
    fn test_sorted_descending() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(5, Difficulty::Easy, 1, 0.0), Some(1));
        assert_eq!(scores.add_score(9, Difficulty::Hard, 2, 0.0), Some(1));
        assert_eq!(scores.add_score(7, Difficulty::Normal, 3, 0.0), Some(2));
        let ordered: Vec<u64> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(ordered, vec![9, 7, 5]);
        assert_eq!(scores.top_score(), Some(9));
        assert_eq!(scores.best_for(Difficulty::Easy), Some(5));
        assert_eq!(scores.best_for(Difficulty::Normal), Some(7));
    }

    #[test]
    fn test_best_for_ignores_other_tiers() {
        let mut scores = HighScores::new();
        scores.add_score(40, Difficulty::Hard, 1, 0.0);
        scores.add_score(12, Difficulty::Easy, 2, 0.0);
        scores.add_score(30, Difficulty::Easy, 3, 0.0);
        assert_eq!(scores.top_score(), Some(40));
        assert_eq!(scores.best_for(Difficulty::Easy), Some(30));
        assert_eq!(scores.best_for(Difficulty::Normal), None);
    }

    #[test]
    fn test_full_board_truncates() {
        let mut scores = HighScores::new();
        for s in 1..=MAX_HIGH_SCORES as u64 {
            scores.add_score(s * 10, Difficulty::Normal, s as u32, 0.0);
        }
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert!(!scores.qualifies(10));
        assert!(scores.qualifies(15));

        assert_eq!(scores.add_score(1000, Difficulty::Hard, 11, 0.0), Some(1));
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.entries.last().map(|e| e.score), Some(20));
    }
}
