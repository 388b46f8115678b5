//! Error taxonomy
//!
//! Configuration errors are rejected before they reach the simulation.
//! Nothing in a tick produces an error; clamping keeps state valid instead.

use crate::sim::MatchPhase;

/// Errors raised at the configuration and control boundary
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GameError {
    /// Unknown difficulty key
    #[error("Unknown difficulty tier : {0:?}")]
    InvalidTier(String),

    /// Zero, negative or non-finite playfield dimensions
    #[error("Invalid playfield bounds : {width}x{height}")]
    InvalidBounds { width: f32, height: f32 },

    /// Manual ball speed outside the accepted range
    #[error("Ball speed override {0} out of range")]
    InvalidSpeedOverride(u32),

    /// Control action not legal in the current phase (state left untouched)
    #[error("Cannot {action} while {phase:?}")]
    IllegalTransition {
        action: &'static str,
        phase: MatchPhase,
    },
}
