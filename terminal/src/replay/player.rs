use common::{MatchReplay, PlayerState, ReplaySession, StandardScorer};
use std::time::Instant;

/// Terminal side of a replay session: turns `Instant`s into the
/// millisecond wall clock the session runs on.
pub struct ReplayPlayer {
    session: ReplaySession<StandardScorer>,
    epoch: Instant,
}

impl ReplayPlayer {
    pub fn new(replay: MatchReplay) -> Self {
        Self::with_epoch(replay, Instant::now())
    }

    pub fn with_epoch(replay: MatchReplay, epoch: Instant) -> Self {
        Self {
            session: ReplaySession::new(replay, StandardScorer),
            epoch,
        }
    }

    fn wall_ms(&self, now: Instant) -> f64 {
        now.saturating_duration_since(self.epoch).as_secs_f64() * 1000.0
    }

    pub fn toggle_play(&mut self, now: Instant) {
        let now = self.wall_ms(now);
        self.session.toggle_play(now);
    }

    /// Advance playback; returns true when the boards changed.
    pub fn update(&mut self, now: Instant) -> bool {
        let now = self.wall_ms(now);
        self.session.tick(now)
    }

    /// Seek relative to the current time in milliseconds. Stops playback.
    pub fn step(&mut self, delta_ms: f64) {
        self.session.seek_by(delta_ms);
    }

    pub fn seek(&mut self, time_ms: f64) {
        self.session.seek(time_ms);
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }

    pub fn faster(&mut self, now: Instant) {
        let now = self.wall_ms(now);
        self.session.step_speed(true, now);
    }

    pub fn slower(&mut self, now: Instant) {
        let now = self.wall_ms(now);
        self.session.step_speed(false, now);
    }

    pub fn is_playing(&self) -> bool {
        self.session.is_playing()
    }

    pub fn current_time(&self) -> f64 {
        self.session.current_time()
    }

    pub fn max_time(&self) -> f64 {
        self.session.max_time()
    }

    pub fn speed(&self) -> f64 {
        self.session.speed()
    }

    pub fn session(&self) -> &ReplaySession<StandardScorer> {
        &self.session
    }

    pub fn replay(&self) -> &MatchReplay {
        self.session.replay()
    }

    pub fn states(&self) -> &[PlayerState] {
        self.session.states()
    }
}
