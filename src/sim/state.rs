//! Match state and lifecycle
//!
//! `MatchSession` owns everything a match needs: arena, ball, opponent,
//! phase and scores. It is the only place phase and scores change.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arena::{Arena, Paddle};
use super::opponent::OpponentController;
use crate::consts::*;
use crate::error::GameError;
use crate::settings::{Difficulty, DifficultyProfile, Settings};

/// Current phase of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// No match in progress (menu)
    Idle,
    /// Ticks advance the simulation
    Playing,
    /// Halted mid-match, state kept
    Paused,
    /// Someone reached the win score
    Finished,
}

/// A participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Player,
    Opponent,
}

/// Reported by the physics step when the ball leaves the playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreEvent {
    pub scorer: Side,
}

/// Notifications for the score display and menus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged { from: MatchPhase, to: MatchPhase },
    PointScored { scorer: Side, player: u32, opponent: u32 },
    MatchFinished { winner: Side, player: u32, opponent: u32 },
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Displacement per tick
    pub vel: Vec2,
    pub radius: f32,
    /// Rally speed; drives the bounce velocity and ramps on player returns
    pub speed: f32,
}

impl Default for Ball {
    fn default() -> Self {
        Self::new()
    }
}

impl Ball {
    pub fn new() -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
            speed: 0.0,
        }
    }

    /// Put the ball at `center` and launch it at `speed`.
    ///
    /// Launch angle is uniform in [45°, 135°) from the horizontal, with random
    /// horizontal sign and random vertical direction.
    pub fn serve<R: Rng>(&mut self, center: Vec2, speed: f32, rng: &mut R) {
        use std::f32::consts::PI;

        self.pos = center;
        self.speed = speed;

        let angle = rng.random_range(0.25 * PI..0.75 * PI);
        let vertical = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let horizontal = if rng.random_bool(0.5) { 1.0 } else { -1.0 };

        self.vel = Vec2::new(
            angle.cos() * speed * horizontal,
            angle.sin() * speed * vertical,
        );
    }
}

/// Read-only view for the renderer and score display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: MatchPhase,
    pub width: f32,
    pub height: f32,
    pub ball: Ball,
    pub player: Paddle,
    pub opponent: Paddle,
    pub player_score: u32,
    pub opponent_score: u32,
    pub winner: Option<Side>,
}

/// One player-versus-opponent session
#[derive(Debug, Clone)]
pub struct MatchSession {
    /// Seed the session RNG was built from
    pub seed: u64,
    rng: Pcg32,
    settings: Settings,
    /// Profile and base speed in force for the current match
    profile: DifficultyProfile,
    base_speed: f32,
    pub(super) phase: MatchPhase,
    pub(super) player_score: u32,
    pub(super) opponent_score: u32,
    pub(super) winner: Option<Side>,
    pub(super) arena: Arena,
    pub(super) ball: Ball,
    pub(super) opponent: OpponentController,
    /// Ticks processed while playing
    pub(super) time_ticks: u64,
    events: Vec<GameEvent>,
}

impl MatchSession {
    pub fn new(seed: u64, settings: Settings, width: f32, height: f32) -> Result<Self, GameError> {
        let arena = Arena::new(width, height)?;
        let profile = settings.profile();
        let base_speed = settings.base_ball_speed();
        Ok(Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            settings,
            profile,
            base_speed,
            phase: MatchPhase::Idle,
            player_score: 0,
            opponent_score: 0,
            winner: None,
            opponent: OpponentController::new(width / 2.0),
            arena,
            ball: Ball::new(),
            time_ticks: 0,
            events: Vec::new(),
        })
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn player_score(&self) -> u32 {
        self.player_score
    }

    pub fn opponent_score(&self) -> u32 {
        self.opponent_score
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn opponent(&self) -> &OpponentController {
        &self.opponent
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Profile of the match in progress (or the last one started)
    pub fn profile(&self) -> &DifficultyProfile {
        &self.profile
    }

    /// Base ball speed of the match in progress
    pub fn base_speed(&self) -> f32 {
        self.base_speed
    }

    /// Choose the difficulty; takes effect on the next `start()`
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.settings.difficulty = difficulty;
    }

    /// Set a manual ball speed; takes effect on the next `start()`
    pub fn set_ball_speed_override(&mut self, speed: u32) -> Result<(), GameError> {
        self.settings.set_ball_speed_override(speed)
    }

    /// Back to automatic ball speed; takes effect on the next `start()`
    pub fn reset_ball_speed(&mut self) {
        self.settings.reset_ball_speed();
    }

    /// Begin a fresh match from any phase
    pub fn start(&mut self) {
        self.profile = self.settings.profile();
        self.base_speed = self.settings.base_ball_speed();
        self.player_score = 0;
        self.opponent_score = 0;
        self.winner = None;
        self.time_ticks = 0;

        self.arena.reset_paddles();
        self.opponent.reset(self.arena.width() / 2.0);
        self.serve();

        log::info!(
            "Match started: {} (base speed {}, first to {})",
            self.settings.difficulty.as_str(),
            self.base_speed,
            self.profile.win_score
        );
        self.set_phase(MatchPhase::Playing);
    }

    /// Halt a running match
    pub fn pause(&mut self) -> Result<(), GameError> {
        match self.phase {
            MatchPhase::Playing => {
                self.set_phase(MatchPhase::Paused);
                Ok(())
            }
            phase => Err(self.reject("pause", phase)),
        }
    }

    /// Continue a paused match
    pub fn resume(&mut self) -> Result<(), GameError> {
        match self.phase {
            MatchPhase::Paused => {
                self.set_phase(MatchPhase::Playing);
                Ok(())
            }
            phase => Err(self.reject("resume", phase)),
        }
    }

    /// Abandon whatever is in progress and return to idle
    pub fn quit(&mut self) {
        self.player_score = 0;
        self.opponent_score = 0;
        self.winner = None;
        self.arena.end_drag();
        self.set_phase(MatchPhase::Idle);
    }

    /// Apply new playfield dimensions between ticks
    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), GameError> {
        let in_match = matches!(self.phase, MatchPhase::Playing | MatchPhase::Paused);
        self.arena.resize(width, height, in_match).inspect_err(|e| {
            log::warn!("Resize rejected: {}", e);
        })
    }

    /// Pointer input: absolute paddle center. Ignored unless playing.
    pub fn apply_player_input(&mut self, x: f32) -> bool {
        if self.phase != MatchPhase::Playing {
            return false;
        }
        self.arena.apply_player_input(x);
        true
    }

    /// Touch input: start of a drag. Ignored unless playing.
    pub fn begin_drag(&mut self, x: f32) -> bool {
        if self.phase != MatchPhase::Playing {
            return false;
        }
        self.arena.begin_drag(x);
        true
    }

    /// Touch input: drag moved. Ignored unless playing.
    pub fn drag_to(&mut self, x: f32) -> bool {
        if self.phase != MatchPhase::Playing {
            return false;
        }
        self.arena.drag_to(x);
        true
    }

    pub fn end_drag(&mut self) {
        self.arena.end_drag();
    }

    /// Notifications produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            width: self.arena.width(),
            height: self.arena.height(),
            ball: self.ball,
            player: self.arena.player,
            opponent: self.arena.opponent,
            player_score: self.player_score,
            opponent_score: self.opponent_score,
            winner: self.winner,
        }
    }

    /// Re-serve the ball from the center of the playfield at base speed
    pub(super) fn serve(&mut self) {
        let center = Vec2::new(self.arena.width() / 2.0, self.arena.height() / 2.0);
        self.ball.serve(center, self.base_speed, &mut self.rng);
    }

    /// Credit a point, then either finish the match or re-serve
    pub(super) fn award_point(&mut self, scorer: Side) {
        match scorer {
            Side::Player => self.player_score += 1,
            Side::Opponent => self.opponent_score += 1,
        }
        log::debug!(
            "Point to {:?}: {} - {}",
            scorer,
            self.player_score,
            self.opponent_score
        );
        self.events.push(GameEvent::PointScored {
            scorer,
            player: self.player_score,
            opponent: self.opponent_score,
        });

        self.check_win();

        if self.phase == MatchPhase::Playing {
            self.serve();
        }
    }

    fn check_win(&mut self) {
        let win_score = self.profile.win_score;
        let winner = if self.player_score >= win_score {
            Side::Player
        } else if self.opponent_score >= win_score {
            Side::Opponent
        } else {
            return;
        };

        self.winner = Some(winner);
        log::info!(
            "Match finished, {:?} wins {} - {}",
            winner,
            self.player_score,
            self.opponent_score
        );
        self.events.push(GameEvent::MatchFinished {
            winner,
            player: self.player_score,
            opponent: self.opponent_score,
        });
        self.set_phase(MatchPhase::Finished);
    }

    fn set_phase(&mut self, to: MatchPhase) {
        let from = self.phase;
        self.phase = to;
        if from != to {
            log::info!("Phase {:?} -> {:?}", from, to);
            self.events.push(GameEvent::PhaseChanged { from, to });
        }
    }

    fn reject(&self, action: &'static str, phase: MatchPhase) -> GameError {
        log::debug!("Ignored {} while {:?}", action, phase);
        GameError::IllegalTransition { action, phase }
    }
}
