//! Scripted opponent
//!
//! The opponent re-reads the ball only once per reaction delay and then
//! walks its paddle toward the chosen target at a fixed step per tick.
//! Prediction is a linear projection `x + dx * (paddle_y - y) / |dy|` onto the
//! opponent's paddle line; wall bounces on the way are ignored, so
//! multi-bounce shots are misjudged.

use super::arena::Arena;
use super::state::Ball;
use crate::settings::DifficultyProfile;

/// Opponent decision state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpponentController {
    /// Where the paddle is heading
    pub target_x: f32,
    /// Host timestamp (ms) of the last target recomputation
    last_decision_ms: Option<f64>,
}

impl OpponentController {
    pub fn new(target_x: f32) -> Self {
        Self {
            target_x,
            last_decision_ms: None,
        }
    }

    /// Forget the previous decision and aim for `target_x` (start of a match)
    pub fn reset(&mut self, target_x: f32) {
        self.target_x = target_x;
        self.last_decision_ms = None;
    }

    pub fn last_decision_ms(&self) -> Option<f64> {
        self.last_decision_ms
    }

    /// Run one opponent update: maybe pick a new target, then step toward it
    pub fn decide(&mut self, now_ms: f64, ball: &Ball, arena: &mut Arena, profile: &DifficultyProfile) {
        let due = match self.last_decision_ms {
            Some(last) => now_ms - last > profile.reaction_delay_ms as f64,
            None => true,
        };

        if due {
            self.target_x = predict_target(ball, arena);
            self.last_decision_ms = Some(now_ms);
        }

        let current = arena.opponent.x;
        let diff = self.target_x - current;
        let step = profile.opponent_speed;
        let next = if diff.abs() > step {
            current + step * diff.signum()
        } else {
            self.target_x
        };

        arena.set_opponent_x(next);
    }
}

/// Where the opponent wants its paddle center
fn predict_target(ball: &Ball, arena: &Arena) -> f32 {
    if ball.vel.y < 0.0 {
        ball.pos.x + ball.vel.x * (arena.opponent.y - ball.pos.y) / ball.vel.y.abs()
    } else {
        arena.width() / 2.0
    }
}
