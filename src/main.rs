//! Neon Pong entry point
//!
//! The browser build is driven from JavaScript through `neon_pong::web`.
//! Natively this runs a headless match between a scripted player and the
//! opponent and logs the result.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use neon_pong::Difficulty;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let difficulty = match std::env::args().nth(1) {
        Some(tier) => match tier.parse::<Difficulty>() {
            Ok(difficulty) => difficulty,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(2);
            }
        },
        None => Difficulty::default(),
    };

    log::info!("Neon Pong (native) starting...");
    log::info!("Native mode is headless - serve the wasm build for the playable version");

    match headless::run(difficulty, 0x5eed) {
        Ok(summary) => println!("{}", summary),
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::wasm_start, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use neon_pong::sim::{MatchPhase, MatchSession, Side, TickInput, tick};
    use neon_pong::{Difficulty, GameError, Settings};

    /// Simulated host frame interval
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up after ten simulated minutes
    const MAX_TICKS: u64 = 60 * 60 * 10;
    /// Ticks of ball travel the scripted player trails behind
    const PLAYER_LAG_TICKS: f32 = 6.0;

    pub fn run(difficulty: Difficulty, seed: u64) -> Result<String, GameError> {
        let mut session = MatchSession::new(seed, Settings::new(difficulty), 480.0, 800.0)?;
        session.start();

        let mut now = 0.0;
        while session.phase() == MatchPhase::Playing && session.time_ticks() < MAX_TICKS {
            // Chase the ball, imperfectly, so both sides win points
            let ball = session.ball();
            let target = ball.pos.x - ball.vel.x * PLAYER_LAG_TICKS;
            let input = TickInput {
                player_x: Some(target),
            };
            tick(&mut session, &input, now);
            now += FRAME_MS;

            for event in session.drain_events() {
                log::debug!("{:?}", event);
            }
        }

        let result = match session.winner() {
            Some(Side::Player) => "Player wins",
            Some(Side::Opponent) => "Opponent wins",
            None => "No winner",
        };
        Ok(format!(
            "{} on {}: {} - {} after {} ticks",
            result,
            difficulty.as_str(),
            session.player_score(),
            session.opponent_score(),
            session.time_ticks()
        ))
    }
}
