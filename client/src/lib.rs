mod render;

pub use render::*;
pub use common::*;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// A match replay driven from `requestAnimationFrame`.
///
/// Every `now` argument is `performance.now()` in milliseconds.
#[wasm_bindgen]
pub struct ReplayHandle {
    session: ReplaySession<StandardScorer>,
}

#[wasm_bindgen]
impl ReplayHandle {
    #[wasm_bindgen(constructor)]
    pub fn new(match_json: &str) -> Result<ReplayHandle, JsValue> {
        let replay = MatchReplay::from_json(match_json).map_err(|e| {
            log::error!("Rejected match document: {:#}", e);
            js_error(format!("{:#}", e))
        })?;
        Ok(ReplayHandle {
            session: ReplaySession::new(replay, StandardScorer),
        })
    }

    pub fn play(&mut self, now: f64) {
        self.session.play(now);
    }

    pub fn pause(&mut self) {
        self.session.pause();
    }

    #[wasm_bindgen(js_name = togglePlay)]
    pub fn toggle_play(&mut self, now: f64) {
        self.session.toggle_play(now);
    }

    /// Returns true when the boards need repainting.
    pub fn tick(&mut self, now: f64) -> bool {
        self.session.tick(now)
    }

    pub fn seek(&mut self, time: f64) {
        self.session.seek(time);
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }

    #[wasm_bindgen(js_name = setSpeed)]
    pub fn set_speed(&mut self, speed: f64, now: f64) {
        self.session.set_speed(speed, now);
    }

    #[wasm_bindgen(getter, js_name = currentTime)]
    pub fn current_time(&self) -> f64 {
        self.session.current_time()
    }

    #[wasm_bindgen(getter, js_name = maxTime)]
    pub fn max_time(&self) -> f64 {
        self.session.max_time()
    }

    #[wasm_bindgen(getter, js_name = isPlaying)]
    pub fn is_playing(&self) -> bool {
        self.session.is_playing()
    }

    #[wasm_bindgen(getter)]
    pub fn speed(&self) -> f64 {
        self.session.speed()
    }

    #[wasm_bindgen(getter, js_name = playerCount)]
    pub fn player_count(&self) -> usize {
        self.session.states().len()
    }

    #[wasm_bindgen(getter, js_name = totalPoints)]
    pub fn total_points(&self) -> u32 {
        self.session.total_points()
    }

    #[wasm_bindgen(js_name = playerName)]
    pub fn player_name(&self, player: usize) -> Option<String> {
        self.session.replay().players.get(player).map(|p| p.name.clone())
    }

    /// The player's derived state as JSON, for the page's own widgets.
    #[wasm_bindgen(js_name = playerStateJson)]
    pub fn player_state_json(&self, player: usize) -> Result<String, JsValue> {
        let state = self
            .session
            .state(player)
            .ok_or_else(|| js_error(format!("No player {}", player)))?;
        serde_json::to_string(state).map_err(js_error)
    }

    /// Catalog classification of the player's current word.
    #[wasm_bindgen(js_name = currentWordMatch)]
    pub fn current_word_match(&self, player: usize) -> Option<String> {
        let state = self.session.state(player)?;
        let word_match = self
            .session
            .catalog()
            .classify(state.current_word(), &state.found_words_set);
        Some(word_match.as_str().to_string())
    }
}

impl ReplayHandle {
    pub(crate) fn session(&self) -> &ReplaySession<StandardScorer> {
        &self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MATCH_JSON: &str = r#"{
        "board": {"letters": ["CATS", "ODES", "RNGE", "LIPS"]},
        "boardWords": ["cat", "cats"],
        "players": [{"name": "alice", "recording": [
            {"type": "swipe_letter", "timestamp": 100, "x": 0, "y": 0, "word": "C"},
            {"type": "swipe_letter", "timestamp": 200, "x": 0, "y": 1, "word": "CA"},
            {"type": "word_submit", "timestamp": 900, "word": "cat"}
        ]}]
    }"#;

    #[test]
    fn handle_drives_the_session() {
        let mut handle = ReplayHandle::new(MATCH_JSON).unwrap();
        assert_eq!(handle.max_time(), 900.0);
        assert_eq!(handle.player_count(), 1);
        assert_eq!(handle.player_name(0).as_deref(), Some("alice"));
        assert_eq!(handle.player_name(1), None);

        handle.play(1000.0);
        assert!(handle.tick(1250.0));
        assert_eq!(handle.current_time(), 250.0);
        assert_eq!(handle.current_word_match(0).as_deref(), Some("partial"));

        let json = handle.player_state_json(0).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["currentSwipeWord"], "CA");

        handle.seek(900.0);
        assert!(!handle.is_playing());
        assert_eq!(handle.session().state(0).unwrap().score, 5);
    }
}
