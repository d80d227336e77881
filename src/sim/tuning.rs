//! Difficulty tiers and obstacle balance tables

use serde::{Deserialize, Serialize};

/// Difficulty tier, selected from the menu and applied to newly spawned obstacles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" | "0" => Some(Difficulty::Easy),
            "normal" | "medium" | "1" => Some(Difficulty::Normal),
            "hard" | "2" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Map a dropdown index to a tier. Anything out of range falls back to Normal.
    pub fn from_index(index: i32) -> Self {
        match index {
            0 => Difficulty::Easy,
            1 => Difficulty::Normal,
            2 => Difficulty::Hard,
            other => {
                log::warn!("Unknown difficulty index {}, using Normal", other);
                Difficulty::Normal
            }
        }
    }

    /// Like `from_str`, but unknown names fall back to Normal
    pub fn parse_or_default(s: &str) -> Self {
        Self::from_str(s).unwrap_or_else(|| {
            log::warn!("Unknown difficulty {:?}, using Normal", s);
            Difficulty::Normal
        })
    }

    pub fn index(&self) -> i32 {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Normal => 1,
            Difficulty::Hard => 2,
        }
    }

    /// Obstacle balance for this tier
    pub fn profile(&self) -> ObstacleProfile {
        match self {
            Difficulty::Easy => EASY_PROFILE,
            Difficulty::Normal => NORMAL_PROFILE,
            Difficulty::Hard => HARD_PROFILE,
        }
    }
}

/// Which obstacle variants a tier may spawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VariantPool {
    /// Block or spike, 50/50
    Basic,
    /// Rotator with the given probability, moving block otherwise
    Weighted { rotator_chance: f64 },
    /// Any of the five variants, uniform
    Any,
}

/// Size and speed ranges for obstacles of one tier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleProfile {
    pub pool: VariantPool,
    pub min_width: f32,
    pub max_width: f32,
    pub min_height: f32,
    pub max_height: f32,
    /// Pixels per tick, leftward
    pub speed: f32,
}

impl ObstacleProfile {
    /// Whether the profile uses one fixed size
    pub fn is_fixed_size(&self) -> bool {
        self.min_width == self.max_width && self.min_height == self.max_height
    }
}

pub const EASY_PROFILE: ObstacleProfile = ObstacleProfile {
    pool: VariantPool::Basic,
    min_width: 20.0,
    max_width: 20.0,
    min_height: 40.0,
    max_height: 40.0,
    speed: 4.0,
};

pub const NORMAL_PROFILE: ObstacleProfile = ObstacleProfile {
    pool: VariantPool::Weighted { rotator_chance: 0.3 },
    min_width: 20.0,
    max_width: 50.0,
    min_height: 40.0,
    max_height: 70.0,
    speed: 6.0,
};

pub const HARD_PROFILE: ObstacleProfile = ObstacleProfile {
    pool: VariantPool::Any,
    min_width: 30.0,
    max_width: 60.0,
    min_height: 55.0,
    max_height: 85.0,
    speed: 9.0,
};

/// Vertical travel of a moving block (pixels either side of its resting line)
pub const WAVE_AMPLITUDE: f32 = 30.0;
/// Converts a moving block's phase (accumulated speed) into radians
pub const WAVE_FREQUENCY: f32 = 0.02;
/// Rotator spin per tick (radians)
pub const ROTATOR_SPIN: f32 = 0.1;
