//! Difficulty profiles and match configuration
//!
//! Settings are validated here, before anything reaches the simulation.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{BALL_SPEED_OVERRIDE_MAX, BALL_SPEED_OVERRIDE_MIN};
use crate::error::GameError;

/// Difficulty tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Tuning values for this tier
    pub fn profile(&self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                ball_speed: 4.0,
                opponent_speed: 3.0,
                reaction_delay_ms: 150,
                win_score: 5,
            },
            Difficulty::Medium => DifficultyProfile {
                ball_speed: 6.0,
                opponent_speed: 5.0,
                reaction_delay_ms: 80,
                win_score: 7,
            },
            Difficulty::Hard => DifficultyProfile {
                ball_speed: 8.0,
                opponent_speed: 7.0,
                reaction_delay_ms: 30,
                win_score: 10,
            },
        }
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" | "med" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(GameError::InvalidTier(s.to_string())),
        }
    }
}

/// Per-tier tuning. Speeds are in pixels per tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Base ball speed at the start of each rally
    pub ball_speed: f32,
    /// Opponent paddle step per tick
    pub opponent_speed: f32,
    /// Minimum interval between opponent target recomputations
    pub reaction_delay_ms: u32,
    /// Points needed to win the match
    pub win_score: u32,
}

/// Look up the profile for a tier key
pub fn profile_for(tier: &str) -> Result<DifficultyProfile, GameError> {
    Ok(tier.parse::<Difficulty>()?.profile())
}

/// Match configuration chosen before a match starts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub difficulty: Difficulty,
    /// Manual ball speed; `None` means auto (taken from the difficulty profile)
    #[serde(default)]
    ball_speed_override: Option<u32>,
}

impl Settings {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            ball_speed_override: None,
        }
    }

    pub fn profile(&self) -> DifficultyProfile {
        self.difficulty.profile()
    }

    pub fn ball_speed_override(&self) -> Option<u32> {
        self.ball_speed_override
    }

    /// Set a manual ball speed, replacing the profile's base speed
    pub fn set_ball_speed_override(&mut self, speed: u32) -> Result<(), GameError> {
        if !(BALL_SPEED_OVERRIDE_MIN..=BALL_SPEED_OVERRIDE_MAX).contains(&speed) {
            log::warn!("Rejected ball speed override {}", speed);
            return Err(GameError::InvalidSpeedOverride(speed));
        }
        self.ball_speed_override = Some(speed);
        Ok(())
    }

    /// Return to automatic ball speed
    pub fn reset_ball_speed(&mut self) {
        self.ball_speed_override = None;
    }

    /// Effective base speed: the override when set, else the profile's
    pub fn base_ball_speed(&self) -> f32 {
        match self.ball_speed_override {
            Some(speed) => speed as f32,
            None => self.profile().ball_speed,
        }
    }

    /// Display text for the speed control
    pub fn speed_label(&self) -> String {
        match self.ball_speed_override {
            Some(speed) => speed.to_string(),
            None => format!("Auto ({})", self.profile().ball_speed),
        }
    }

    /// Parse settings from JSON, validating the override range
    pub fn from_json(json: &str) -> Result<Self, String> {
        let settings: Settings = serde_json::from_str(json).map_err(|e| e.to_string())?;
        if let Some(speed) = settings.ball_speed_override {
            let mut checked = Settings::new(settings.difficulty);
            checked
                .set_ball_speed_override(speed)
                .map_err(|e| e.to_string())?;
            return Ok(checked);
        }
        Ok(settings)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
