//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform dependencies:
//! - One step per `tick(now)`, driven by the host
//! - Seeded RNG only
//! - All state owned by a `MatchSession`

pub mod arena;
pub mod collision;
pub mod opponent;
pub mod state;
pub mod tick;

pub use arena::{Arena, Paddle, paddle_width_for};
pub use collision::{bounce_angle, reflect_off_walls, step};
pub use opponent::OpponentController;
pub use state::{Ball, GameEvent, MatchPhase, MatchSession, ScoreEvent, Side, Snapshot};
pub use tick::{TickInput, tick};
