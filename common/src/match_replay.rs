use std::collections::BTreeSet;

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::catalog::WordCatalog;
use crate::clock::PlaybackClock;
use crate::constants::PLAYBACK_SPEEDS;
use crate::events::Recording;
use crate::replay::{PlayerState, reconstruct};
use crate::scoring::{WordScorer, total_points};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecording {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(default)]
    pub recording: Recording,
    /// Words already credited before this recording starts
    #[serde(default)]
    pub initial_found_words: Vec<String>,
}

/// One recorded match: a board, its word list and every player's input log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchReplay {
    pub board: Board,
    #[serde(default)]
    pub board_words: WordCatalog,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_points: Option<u32>,
    #[serde(default)]
    pub players: Vec<PlayerRecording>,
}

impl MatchReplay {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse match replay")
    }

    /// Latest timestamp across every player's log.
    pub fn max_time(&self) -> f64 {
        self.players
            .iter()
            .map(|p| p.recording.max_time())
            .fold(0.0, f64::max)
    }
}

/// Plays back every player of a match against one shared clock.
///
/// Each player's state is reconstructed independently at the same
/// `current_time` whenever the clock moves.
pub struct ReplaySession<S> {
    replay: MatchReplay,
    scorer: S,
    initial_found: Vec<BTreeSet<String>>,
    clock: PlaybackClock,
    states: Vec<PlayerState>,
}

impl<S: WordScorer> ReplaySession<S> {
    pub fn new(replay: MatchReplay, scorer: S) -> Self {
        let initial_found = replay
            .players
            .iter()
            .map(|p| p.initial_found_words.iter().map(|w| w.to_lowercase()).collect())
            .collect();
        let clock = PlaybackClock::new(replay.max_time());
        info!(
            "Loaded replay with {} players, {} board words, {:.1}s long",
            replay.players.len(),
            replay.board_words.len(),
            clock.max_time() / 1000.0
        );

        let mut session = ReplaySession {
            replay,
            scorer,
            initial_found,
            clock,
            states: Vec::new(),
        };
        session.refresh();
        session
    }

    fn refresh(&mut self) {
        let time = self.clock.current_time();
        let board = &self.replay.board;
        let scorer = &self.scorer;
        self.states = self
            .replay
            .players
            .iter()
            .zip(&self.initial_found)
            .map(|(player, found)| reconstruct(&player.recording, time, found, board, scorer))
            .collect();
    }

    pub fn play(&mut self, now: f64) {
        if self.clock.play(now) {
            self.refresh();
        }
    }

    pub fn pause(&mut self) {
        self.clock.pause();
    }

    pub fn toggle_play(&mut self, now: f64) {
        if self.clock.is_playing() {
            self.pause();
        } else {
            self.play(now);
        }
    }

    /// Per-frame update. Returns true when the states were re-derived.
    pub fn tick(&mut self, now: f64) -> bool {
        if self.clock.tick(now).is_some() {
            self.refresh();
            true
        } else {
            false
        }
    }

    pub fn seek(&mut self, time: f64) {
        self.clock.seek(time);
        self.refresh();
    }

    pub fn seek_by(&mut self, delta: f64) {
        self.clock.seek_by(delta);
        self.refresh();
    }

    pub fn reset(&mut self) {
        self.clock.reset();
        self.states = vec![PlayerState::default(); self.replay.players.len()];
        self.refresh();
    }

    /// Change speed. The clock catches up to `now` first, so the states follow it.
    pub fn set_speed(&mut self, speed: f64, now: f64) {
        self.clock.set_speed(speed, now);
        self.refresh();
    }

    /// Move to the next faster or slower preset speed.
    pub fn step_speed(&mut self, faster: bool, now: f64) {
        let current = self.clock.speed();
        let next = if faster {
            PLAYBACK_SPEEDS.iter().copied().find(|s| *s > current)
        } else {
            PLAYBACK_SPEEDS.iter().rev().copied().find(|s| *s < current)
        };
        if let Some(speed) = next {
            self.set_speed(speed, now);
        }
    }

    pub fn replay(&self) -> &MatchReplay {
        &self.replay
    }

    pub fn board(&self) -> &Board {
        &self.replay.board
    }

    pub fn catalog(&self) -> &WordCatalog {
        &self.replay.board_words
    }

    pub fn clock(&self) -> &PlaybackClock {
        &self.clock
    }

    pub fn current_time(&self) -> f64 {
        self.clock.current_time()
    }

    pub fn max_time(&self) -> f64 {
        self.clock.max_time()
    }

    pub fn is_playing(&self) -> bool {
        self.clock.is_playing()
    }

    pub fn speed(&self) -> f64 {
        self.clock.speed()
    }

    pub fn states(&self) -> &[PlayerState] {
        &self.states
    }

    pub fn state(&self, player: usize) -> Option<&PlayerState> {
        self.states.get(player)
    }

    /// Points available on the board, supplied or computed from the catalog.
    pub fn total_points(&self) -> u32 {
        let words: Vec<&str> = self.replay.board_words.iter().collect();
        total_points(&words, &self.replay.board, &self.scorer, self.replay.total_points)
    }
}
