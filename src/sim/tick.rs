//! Simulation tick
//!
//! The host calls `tick` at its own cadence (nominally once per display
//! refresh). Each call performs exactly one step and never blocks.

use super::collision;
use super::state::{MatchPhase, MatchSession, ScoreEvent};

/// Input gathered by the host since the previous tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Absolute player paddle center (from pointer position)
    pub player_x: Option<f32>,
}

/// Advance the match by one step.
///
/// Does nothing unless the match is playing. Order: player input, opponent
/// update, ball physics, then scoring and the win check.
pub fn tick(session: &mut MatchSession, input: &TickInput, now_ms: f64) -> Option<ScoreEvent> {
    if session.phase != MatchPhase::Playing {
        return None;
    }

    session.time_ticks += 1;

    if let Some(x) = input.player_x {
        session.arena.apply_player_input(x);
    }

    let profile = *session.profile();
    session
        .opponent
        .decide(now_ms, &session.ball, &mut session.arena, &profile);

    let base_speed = session.base_speed();
    let event = collision::step(&mut session.ball, &session.arena, base_speed);

    if let Some(ScoreEvent { scorer }) = event {
        session.award_point(scorer);
    }

    event
}

impl MatchSession {
    /// One step with no new input
    pub fn tick(&mut self, now_ms: f64) -> Option<ScoreEvent> {
        tick(self, &TickInput::default(), now_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{Difficulty, Settings};
    use crate::sim::state::{GameEvent, Side};
    use glam::Vec2;

    /// 16ms per tick, roughly 60 Hz
    const FRAME_MS: f64 = 16.0;

    fn session(difficulty: Difficulty) -> MatchSession {
        MatchSession::new(4242, Settings::new(difficulty), 400.0, 600.0).unwrap()
    }

    /// Aim the ball straight down past the player's paddle
    fn send_past_player(s: &mut MatchSession) {
        s.arena.apply_player_input(350.0);
        s.ball.pos = Vec2::new(60.0, 605.0);
        s.ball.vel = Vec2::new(0.0, 10.0);
    }

    #[test]
    fn test_idle_tick_is_noop() {
        let mut s = session(Difficulty::Easy);
        assert_eq!(s.tick(0.0), None);
        assert_eq!(s.time_ticks(), 0);
    }

    #[test]
    fn test_tick_moves_ball_and_opponent() {
        let mut s = session(Difficulty::Easy);
        s.start();
        s.ball.pos = Vec2::new(200.0, 300.0);
        s.ball.vel = Vec2::new(-2.0, -4.0);

        let input = TickInput {
            player_x: Some(120.0),
        };
        assert_eq!(tick(&mut s, &input, 1000.0), None);
        assert_eq!(s.ball().pos, Vec2::new(198.0, 296.0));
        assert_eq!(s.arena().player.x, 120.0);
        // Target 200 + (-2) * (20 - 300) / 4 = 340, stepped by 3
        assert_eq!(s.opponent().target_x, 340.0);
        assert_eq!(s.arena().opponent.x, 203.0);
        assert_eq!(s.time_ticks(), 1);
    }

    #[test]
    fn test_opponent_point_reserves_once() {
        let mut s = session(Difficulty::Easy);
        s.start();
        send_past_player(&mut s);
        s.drain_events();

        let event = s.tick(0.0);
        assert_eq!(
            event,
            Some(ScoreEvent {
                scorer: Side::Opponent
            })
        );
        assert_eq!(s.opponent_score(), 1);
        assert_eq!(s.player_score(), 0);
        assert_eq!(s.ball().pos, Vec2::new(200.0, 300.0));
        assert_eq!(s.phase(), MatchPhase::Playing);
        assert_eq!(
            s.drain_events(),
            vec![GameEvent::PointScored {
                scorer: Side::Opponent,
                player: 0,
                opponent: 1
            }]
        );
    }

    #[test]
    fn test_opponent_wins_and_ticks_stop() {
        let mut s = session(Difficulty::Easy);
        assert_eq!(s.profile().win_score, 5);
        s.start();

        for i in 0..5 {
            send_past_player(&mut s);
            s.tick(i as f64 * FRAME_MS);
        }

        assert_eq!(s.phase(), MatchPhase::Finished);
        assert_eq!(s.winner(), Some(Side::Opponent));
        assert_eq!(s.opponent_score(), 5);

        let frozen = s.snapshot();
        let ticks = s.time_ticks();
        for i in 0..10 {
            assert_eq!(s.tick(1000.0 + i as f64 * FRAME_MS), None);
        }
        assert_eq!(s.snapshot(), frozen);
        assert_eq!(s.time_ticks(), ticks);

        // Finished holds until start or quit
        assert!(s.resume().is_err());
        s.start();
        assert_eq!(s.phase(), MatchPhase::Playing);
        assert_eq!(s.opponent_score(), 0);
    }

    #[test]
    fn test_player_point() {
        let mut s = session(Difficulty::Medium);
        s.start();
        s.arena.set_opponent_x(350.0);
        s.ball.pos = Vec2::new(60.0, -5.0);
        s.ball.vel = Vec2::new(0.0, -10.0);

        assert_eq!(
            s.tick(0.0),
            Some(ScoreEvent {
                scorer: Side::Player
            })
        );
        assert_eq!(s.player_score(), 1);
    }

    #[test]
    fn test_paused_match_does_not_advance() {
        let mut s = session(Difficulty::Hard);
        s.start();
        s.pause().unwrap();
        let before = s.snapshot();
        assert_eq!(s.tick(0.0), None);
        assert_eq!(s.snapshot(), before);

        s.resume().unwrap();
        s.tick(FRAME_MS);
        assert_ne!(s.snapshot().ball.pos, before.ball.pos);
    }

    #[test]
    fn test_long_rally_invariants() {
        let mut s = session(Difficulty::Hard);
        s.start();
        let base = s.base_speed();
        let mut last_speed = s.ball().speed;
        let mut last_points = 0;

        for i in 0..5000 {
            if s.phase() != MatchPhase::Playing {
                break;
            }
            // Scripted player follows the ball
            let input = TickInput {
                player_x: Some(s.ball().pos.x),
            };
            tick(&mut s, &input, i as f64 * FRAME_MS);

            let points = s.player_score() + s.opponent_score();
            let speed = s.ball().speed;
            if points == last_points {
                assert!(speed >= last_speed);
            } else if s.phase() == MatchPhase::Playing {
                assert_eq!(speed, base);
            }
            assert!(speed <= base * 1.5 + 1e-4);
            last_speed = speed;
            last_points = points;

            let arena = s.arena();
            for paddle in [arena.player, arena.opponent] {
                assert!(paddle.x >= paddle.half_width());
                assert!(paddle.x <= arena.width() - paddle.half_width());
            }
        }
    }
}
