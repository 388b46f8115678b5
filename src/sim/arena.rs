//! Playfield bounds and paddles
//!
//! The player defends the bottom edge, the opponent the top edge. Paddle
//! centers are clamped after every mutation.

use serde::{Deserialize, Serialize};

use crate::clamp_center;
use crate::consts::*;
use crate::error::GameError;

/// A horizontal paddle (center-anchored)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Paddle {
    fn new(x: f32, y: f32, width: f32) -> Self {
        Self {
            x,
            y,
            width,
            height: PADDLE_HEIGHT,
        }
    }

    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }

    pub fn half_height(&self) -> f32 {
        self.height / 2.0
    }

    pub fn left(&self) -> f32 {
        self.x - self.half_width()
    }

    pub fn right(&self) -> f32 {
        self.x + self.half_width()
    }

    pub fn top(&self) -> f32 {
        self.y - self.half_height()
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.half_height()
    }
}

/// Paddle width for a playfield width
pub fn paddle_width_for(playfield_width: f32) -> f32 {
    (playfield_width * PADDLE_WIDTH_RATIO).clamp(PADDLE_MIN_WIDTH, PADDLE_MAX_WIDTH)
}

/// Touch drag in progress: pointer and paddle positions when it began
#[derive(Debug, Clone, Copy, PartialEq)]
struct Drag {
    origin_x: f32,
    paddle_x: f32,
}

/// The playfield and both paddles
#[derive(Debug, Clone, PartialEq)]
pub struct Arena {
    width: f32,
    height: f32,
    pub player: Paddle,
    pub opponent: Paddle,
    drag: Option<Drag>,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Result<Self, GameError> {
        validate_bounds(width, height)?;
        let paddle_width = paddle_width_for(width);
        let mut arena = Self {
            width,
            height,
            player: Paddle::new(width / 2.0, 0.0, paddle_width),
            opponent: Paddle::new(width / 2.0, 0.0, paddle_width),
            drag: None,
        };
        arena.place_paddles();
        Ok(arena)
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Apply new playfield dimensions.
    ///
    /// Paddle width always follows the new width. When `in_match` is set the
    /// paddles are also re-placed at their vertical insets and clamped into
    /// the new horizontal range.
    pub fn resize(&mut self, width: f32, height: f32, in_match: bool) -> Result<(), GameError> {
        validate_bounds(width, height)?;
        self.width = width;
        self.height = height;

        let paddle_width = paddle_width_for(width);
        self.player.width = paddle_width;
        self.opponent.width = paddle_width;

        if in_match {
            self.place_paddles();
        }
        Ok(())
    }

    /// Center both paddles (start of a match)
    pub fn reset_paddles(&mut self) {
        self.player.x = self.width / 2.0;
        self.opponent.x = self.width / 2.0;
        self.drag = None;
        self.place_paddles();
    }

    /// Set the player paddle center from an absolute pointer coordinate
    pub fn apply_player_input(&mut self, x: f32) {
        self.player.x = self.clamp_paddle_x(x);
    }

    /// Start a touch drag at pointer coordinate `x`
    pub fn begin_drag(&mut self, x: f32) {
        self.drag = Some(Drag {
            origin_x: x,
            paddle_x: self.player.x,
        });
    }

    /// Move the player paddle by the drag delta since `begin_drag`.
    /// Without an active drag the position is treated as a fresh drag origin.
    pub fn drag_to(&mut self, x: f32) {
        match self.drag {
            Some(drag) => self.apply_player_input(drag.paddle_x + (x - drag.origin_x)),
            None => self.begin_drag(x),
        }
    }

    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    /// Clamp a paddle center into the valid range for the current width
    pub fn clamp_paddle_x(&self, x: f32) -> f32 {
        clamp_center(x, self.player.half_width(), self.width)
    }

    /// Move the opponent paddle, keeping it in bounds
    pub fn set_opponent_x(&mut self, x: f32) {
        self.opponent.x = clamp_center(x, self.opponent.half_width(), self.width);
    }

    fn place_paddles(&mut self) {
        self.player.y = self.height - PLAYER_PADDLE_INSET;
        self.opponent.y = OPPONENT_PADDLE_INSET;
        self.player.x = self.clamp_paddle_x(self.player.x);
        self.opponent.x = clamp_center(self.opponent.x, self.opponent.half_width(), self.width);
    }
}

fn validate_bounds(width: f32, height: f32) -> Result<(), GameError> {
    if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
        Ok(())
    } else {
        Err(GameError::InvalidBounds { width, height })
    }
}
