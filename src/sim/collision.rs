//! Ball physics and collision response
//!
//! One explicit Euler step per tick, no substepping. A fast ball can cross a
//! paddle's band between two ticks and pass through it; this is a known
//! limitation of the model.

use super::arena::{Arena, Paddle};
use super::state::{Ball, ScoreEvent, Side};
use crate::consts::*;

/// Which face of a paddle the ball is allowed to hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Face {
    /// Player paddle: ball arrives moving down, leaves moving up
    Top,
    /// Opponent paddle: ball arrives moving up, leaves moving down
    Bottom,
}

/// Advance the ball one tick and resolve collisions.
///
/// Returns the scoring side if the ball left the playfield. The ball is not
/// re-served here.
pub fn step(ball: &mut Ball, arena: &Arena, base_speed: f32) -> Option<ScoreEvent> {
    ball.pos += ball.vel;

    reflect_off_walls(ball, arena.width());

    if paddle_hit(ball, &arena.player, Face::Top) {
        bounce(ball, &arena.player, Face::Top);
        ball.speed = (ball.speed * PADDLE_BOOST).min(base_speed * MAX_SPEED_FACTOR);
    }

    if paddle_hit(ball, &arena.opponent, Face::Bottom) {
        bounce(ball, &arena.opponent, Face::Bottom);
    }

    if ball.pos.y > arena.height() + ball.radius {
        Some(ScoreEvent {
            scorer: Side::Opponent,
        })
    } else if ball.pos.y < -ball.radius {
        Some(ScoreEvent {
            scorer: Side::Player,
        })
    } else {
        None
    }
}

/// Bounce off the left/right walls. Returns true on contact.
pub fn reflect_off_walls(ball: &mut Ball, width: f32) -> bool {
    let r = ball.radius;
    if ball.pos.x - r <= 0.0 || ball.pos.x + r >= width {
        ball.vel.x = -ball.vel.x;
        ball.pos.x = crate::clamp_center(ball.pos.x, r, width);
        true
    } else {
        false
    }
}

/// Bounce angle from the contact offset: 0 at the paddle center, ±45° at the edges
pub fn bounce_angle(ball_x: f32, paddle: &Paddle) -> f32 {
    let hit_pos = (ball_x - paddle.x) / paddle.half_width();
    hit_pos * MAX_BOUNCE_ANGLE
}

fn paddle_hit(ball: &Ball, paddle: &Paddle, face: Face) -> bool {
    let approaching = match face {
        Face::Top => ball.vel.y > 0.0,
        Face::Bottom => ball.vel.y < 0.0,
    };

    approaching
        && ball.pos.y + ball.radius >= paddle.top()
        && ball.pos.y - ball.radius <= paddle.bottom()
        && ball.pos.x >= paddle.left()
        && ball.pos.x <= paddle.right()
}

fn bounce(ball: &mut Ball, paddle: &Paddle, face: Face) {
    let angle = bounce_angle(ball.pos.x, paddle);
    ball.vel.x = angle.sin() * ball.speed * BOUNCE_DX_FACTOR;
    match face {
        Face::Top => {
            ball.vel.y = -ball.vel.y.abs();
            ball.pos.y = paddle.top() - ball.radius;
        }
        Face::Bottom => {
            ball.vel.y = ball.vel.y.abs();
            ball.pos.y = paddle.bottom() + ball.radius;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;
    use std::f32::consts::FRAC_PI_4;

    fn arena() -> Arena {
        // 400 wide: paddles are 100 wide; player at y=570, opponent at y=20
        Arena::new(400.0, 600.0).unwrap()
    }

    fn ball(pos: Vec2, vel: Vec2, speed: f32) -> Ball {
        let mut ball = Ball::new();
        ball.pos = pos;
        ball.vel = vel;
        ball.speed = speed;
        ball
    }

    #[test]
    fn test_free_flight() {
        let arena = arena();
        let mut b = ball(Vec2::new(200.0, 300.0), Vec2::new(3.0, -4.0), 5.0);
        assert_eq!(step(&mut b, &arena, 5.0), None);
        assert_eq!(b.pos, Vec2::new(203.0, 296.0));
        assert_eq!(b.vel, Vec2::new(3.0, -4.0));
    }

    #[test]
    fn test_wall_reflection_negates_dx_only() {
        let arena = arena();
        let mut b = ball(Vec2::new(395.0, 300.0), Vec2::new(4.0, 2.5), 5.0);
        step(&mut b, &arena, 5.0);
        assert_eq!(b.vel, Vec2::new(-4.0, 2.5));
        assert_eq!(b.pos.x, 390.0);

        let mut b = ball(Vec2::new(12.0, 300.0), Vec2::new(-4.0, -2.5), 5.0);
        step(&mut b, &arena, 5.0);
        assert_eq!(b.vel, Vec2::new(4.0, -2.5));
        assert_eq!(b.pos.x, 10.0);
    }

    #[test]
    fn test_player_hit_far_right_edge() {
        let arena = arena();
        // Lands exactly on the paddle's right edge (x = 250)
        let mut b = ball(Vec2::new(250.0, 550.0), Vec2::new(0.0, 4.0), 4.0);
        let result = step(&mut b, &arena, 4.0);
        assert_eq!(result, None);

        let expected_dx = FRAC_PI_4.sin() * 4.0 * 1.5;
        assert!((b.vel.x - expected_dx).abs() < 1e-5);
        assert_eq!(b.vel.y, -4.0);
        // Flush against the paddle's top face: 570 - 7 - 10
        assert_eq!(b.pos.y, 553.0);
        assert!((b.speed - 4.08).abs() < 1e-5);
    }

    #[test]
    fn test_bounce_angle() {
        let arena = arena();
        assert_eq!(bounce_angle(200.0, &arena.player), 0.0);
        assert!((bounce_angle(250.0, &arena.player) - FRAC_PI_4).abs() < 1e-6);
        assert!((bounce_angle(150.0, &arena.player) + FRAC_PI_4).abs() < 1e-6);
    }

    #[test]
    fn test_center_hit_goes_straight_up() {
        let arena = arena();
        let mut b = ball(Vec2::new(197.0, 550.0), Vec2::new(3.0, 4.0), 5.0);
        step(&mut b, &arena, 5.0);
        assert_eq!(b.vel.x, 0.0);
        assert_eq!(b.vel.y, -4.0);
    }

    #[test]
    fn test_opponent_hit_bounces_down_without_boost() {
        let arena = arena();
        let mut b = ball(Vec2::new(175.0, 40.0), Vec2::new(0.0, -5.0), 5.0);
        step(&mut b, &arena, 5.0);
        assert_eq!(b.vel.y, 5.0);
        let expected_dx = (-0.5 * FRAC_PI_4).sin() * 5.0 * 1.5;
        assert!((b.vel.x - expected_dx).abs() < 1e-5);
        // Flush below the opponent paddle: 20 + 7 + 10
        assert_eq!(b.pos.y, 37.0);
        assert_eq!(b.speed, 5.0);
    }

    #[test]
    fn test_ball_moving_away_passes_paddle() {
        let arena = arena();
        // Moving up through the player band: no collision
        let mut b = ball(Vec2::new(200.0, 575.0), Vec2::new(0.0, -2.0), 5.0);
        step(&mut b, &arena, 5.0);
        assert_eq!(b.vel.y, -2.0);
    }

    #[test]
    fn test_miss_beside_paddle() {
        let arena = arena();
        let mut b = ball(Vec2::new(300.0, 560.0), Vec2::new(0.0, 5.0), 5.0);
        step(&mut b, &arena, 5.0);
        assert_eq!(b.vel.y, 5.0);
    }

    #[test]
    fn test_speed_ramp_is_capped() {
        let arena = arena();
        let mut b = ball(Vec2::new(200.0, 550.0), Vec2::new(0.0, 7.0), 7.4);
        step(&mut b, &arena, 5.0);
        assert_eq!(b.speed, 7.5);
    }

    #[test]
    fn test_scoring() {
        let arena = arena();
        let mut b = ball(Vec2::new(50.0, 609.0), Vec2::new(0.0, 2.0), 5.0);
        assert_eq!(
            step(&mut b, &arena, 5.0),
            Some(ScoreEvent {
                scorer: Side::Opponent
            })
        );

        let mut b = ball(Vec2::new(50.0, -9.0), Vec2::new(0.0, -2.0), 5.0);
        assert_eq!(
            step(&mut b, &arena, 5.0),
            Some(ScoreEvent {
                scorer: Side::Player
            })
        );

        // Exactly on the threshold is still in play
        let mut b = ball(Vec2::new(50.0, 608.0), Vec2::new(0.0, 2.0), 5.0);
        assert_eq!(step(&mut b, &arena, 5.0), None);
    }

    #[test]
    fn test_tunneling_at_high_speed() {
        let arena = arena();
        // Moves from above the band to below it in one tick
        let mut b = ball(Vec2::new(200.0, 540.0), Vec2::new(0.0, 60.0), 60.0);
        step(&mut b, &arena, 60.0);
        assert_eq!(b.vel.y, 60.0);
        assert_eq!(b.pos.y, 600.0);
    }

    proptest! {
        #[test]
        fn prop_player_hit_sends_ball_up(
            x in 150.0f32..=250.0,
            dx in -8.0f32..8.0,
            dy in 0.5f32..8.0,
            speed in 1.0f32..12.0,
        ) {
            let arena = arena();
            let mut b = ball(Vec2::new(x - dx, 553.0 - dy + 1.0), Vec2::new(dx, dy), speed);
            let before = b.speed;
            step(&mut b, &arena, speed);
            if b.pos.y == 553.0 {
                prop_assert!(b.vel.y < 0.0);
                prop_assert!(b.speed >= before);
                prop_assert!(b.speed <= speed * MAX_SPEED_FACTOR + 1e-4);
            }
        }

        #[test]
        fn prop_opponent_hit_sends_ball_down(
            x in 150.0f32..=250.0,
            dy in 0.5f32..8.0,
            speed in 1.0f32..12.0,
        ) {
            let arena = arena();
            let mut b = ball(Vec2::new(x, 37.0 + dy - 1.0), Vec2::new(0.0, -dy), speed);
            step(&mut b, &arena, speed);
            prop_assert!(b.vel.y > 0.0);
            prop_assert_eq!(b.speed, speed);
        }
    }
}
