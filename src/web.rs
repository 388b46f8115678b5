//! Browser host bindings
//!
//! The page owns the canvas, the menus and the animation frame loop; it calls
//! into `WebMatch` for every control action and once per frame for `tick`.

use wasm_bindgen::prelude::*;

use crate::settings::{Difficulty, Settings};
use crate::sim::{MatchSession, TickInput, tick};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    // Ignore a second init (several modules on one page)
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Neon Pong core loaded");
}

fn js_err(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// One match session exposed to JavaScript
#[wasm_bindgen]
pub struct WebMatch {
    session: MatchSession,
    input: TickInput,
}

#[wasm_bindgen]
impl WebMatch {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32) -> Result<WebMatch, JsValue> {
        let seed = js_sys::Date::now() as u64;
        let session = MatchSession::new(seed, Settings::default(), width, height).map_err(js_err)?;
        log::info!("Session created with seed: {}", seed);
        Ok(Self {
            session,
            input: TickInput::default(),
        })
    }

    pub fn start(&mut self) {
        self.input = TickInput::default();
        self.session.start();
    }

    /// Returns false when there was no running match to pause
    pub fn pause(&mut self) -> bool {
        self.session.pause().is_ok()
    }

    /// Returns false when there was no paused match to resume
    pub fn resume(&mut self) -> bool {
        self.session.resume().is_ok()
    }

    pub fn quit(&mut self) {
        self.session.quit();
    }

    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), JsValue> {
        self.session.resize(width, height).map_err(js_err)
    }

    /// Mouse position relative to the canvas; applied on the next tick
    pub fn pointer_move(&mut self, x: f32) {
        if self.session.phase() == crate::sim::MatchPhase::Playing {
            self.input.player_x = Some(x);
        }
    }

    pub fn touch_start(&mut self, x: f32) {
        self.session.begin_drag(x);
    }

    pub fn touch_move(&mut self, x: f32) {
        self.session.drag_to(x);
    }

    pub fn touch_end(&mut self) {
        self.session.end_drag();
    }

    /// Run one step at host time `now_ms`. Returns true while the match is
    /// still playing, so the page knows whether to request another frame.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        let input = std::mem::take(&mut self.input);
        tick(&mut self.session, &input, now_ms);
        self.session.phase() == crate::sim::MatchPhase::Playing
    }

    pub fn set_difficulty(&mut self, tier: &str) -> Result<(), JsValue> {
        let difficulty: Difficulty = tier.parse().map_err(js_err)?;
        self.session.set_difficulty(difficulty);
        Ok(())
    }

    pub fn set_ball_speed(&mut self, speed: u32) -> Result<(), JsValue> {
        self.session.set_ball_speed_override(speed).map_err(js_err)
    }

    pub fn reset_ball_speed(&mut self) {
        self.session.reset_ball_speed();
    }

    pub fn speed_label(&self) -> String {
        self.session.settings().speed_label()
    }

    /// Ball, paddles, scores and phase as JSON for the renderer
    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.session.snapshot()).unwrap_or_default()
    }

    /// Events since the previous call as a JSON array
    pub fn drain_events_json(&mut self) -> String {
        serde_json::to_string(&self.session.drain_events()).unwrap_or_default()
    }
}
