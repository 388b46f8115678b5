//! Neon Pong - single-player Pong against a scripted opponent
//!
//! Core modules:
//! - `sim`: Simulation (arena, physics, opponent, match state machine)
//! - `settings`: Difficulty profiles and ball speed configuration
//! - `error`: Error taxonomy for configuration and transitions
//! - `web`: Browser host bindings (wasm32 only)

pub mod error;
pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::GameError;
pub use settings::{Difficulty, DifficultyProfile, Settings, profile_for};

/// Game configuration constants
pub mod consts {
    /// Paddle width as a fraction of playfield width
    pub const PADDLE_WIDTH_RATIO: f32 = 0.25;
    /// Paddle width bounds (pixels)
    pub const PADDLE_MIN_WIDTH: f32 = 80.0;
    pub const PADDLE_MAX_WIDTH: f32 = 120.0;
    pub const PADDLE_HEIGHT: f32 = 14.0;
    /// Player paddle center sits this far above the bottom edge
    pub const PLAYER_PADDLE_INSET: f32 = 30.0;
    /// Opponent paddle center sits this far below the top edge
    pub const OPPONENT_PADDLE_INSET: f32 = 20.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;

    /// Maximum bounce angle off a paddle (45 degrees)
    pub const MAX_BOUNCE_ANGLE: f32 = std::f32::consts::FRAC_PI_4;
    /// Horizontal velocity multiplier applied on a paddle bounce
    pub const BOUNCE_DX_FACTOR: f32 = 1.5;
    /// Speed boost when the player returns the ball (multiplicative)
    pub const PADDLE_BOOST: f32 = 1.02;
    /// Rally speed ceiling as a multiple of the base speed
    pub const MAX_SPEED_FACTOR: f32 = 1.5;

    /// Manual ball speed override bounds
    pub const BALL_SPEED_OVERRIDE_MIN: u32 = 1;
    pub const BALL_SPEED_OVERRIDE_MAX: u32 = 20;
}

/// Clamp a paddle center into `[half_width, extent - half_width]`.
///
/// When the extent is narrower than the paddle the paddle is centered.
#[inline]
pub fn clamp_center(x: f32, half_width: f32, extent: f32) -> f32 {
    let lo = half_width;
    let hi = extent - half_width;
    if lo > hi || x.is_nan() {
        extent / 2.0
    } else {
        x.clamp(lo, hi)
    }
}
