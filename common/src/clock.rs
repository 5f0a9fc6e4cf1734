use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_PLAYBACK_SPEED;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClockState {
    Stopped,
    Playing,
}

/// Drives replay time from a caller supplied wall clock.
///
/// All `now` arguments are wall-clock milliseconds from any fixed origin
/// (`Instant` based in the terminal, `performance.now()` in the browser).
/// Every mutating call returns or exposes the new `current_time`; the caller
/// is responsible for re-deriving board state from it.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackClock {
    state: ClockState,
    current_time: f64,
    max_time: f64,
    speed: f64,
    start_ref: f64,
}

impl PlaybackClock {
    pub fn new(max_time: f64) -> Self {
        PlaybackClock {
            state: ClockState::Stopped,
            current_time: 0.0,
            max_time: sanitize_time(max_time),
            speed: DEFAULT_PLAYBACK_SPEED,
            start_ref: 0.0,
        }
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == ClockState::Playing
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn max_time(&self) -> f64 {
        self.max_time
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// An empty log leaves nothing to play.
    pub fn is_inert(&self) -> bool {
        self.max_time <= 0.0
    }

    pub fn set_max_time(&mut self, max_time: f64) {
        self.max_time = sanitize_time(max_time);
        if self.current_time > self.max_time {
            self.current_time = self.max_time;
        }
    }

    /// Start playing. Returns true when the clock rewound to 0 first because
    /// the log was already exhausted.
    pub fn play(&mut self, now: f64) -> bool {
        if self.is_inert() || self.is_playing() {
            return false;
        }

        let rewound = self.current_time >= self.max_time;
        if rewound {
            self.current_time = 0.0;
        }
        self.start_ref = now - self.current_time / self.speed;
        self.state = ClockState::Playing;
        rewound
    }

    pub fn pause(&mut self) {
        self.state = ClockState::Stopped;
    }

    /// Advance while playing. Returns the new time, or `None` when stopped.
    pub fn tick(&mut self, now: f64) -> Option<f64> {
        if !self.is_playing() {
            return None;
        }

        let elapsed = (now - self.start_ref) * self.speed;
        self.current_time = elapsed.clamp(0.0, self.max_time);
        if self.current_time >= self.max_time {
            self.state = ClockState::Stopped;
        }
        Some(self.current_time)
    }

    /// Jump to `time`, clamped to the log, and stop.
    pub fn seek(&mut self, time: f64) -> f64 {
        self.state = ClockState::Stopped;
        self.current_time = sanitize_time(time).min(self.max_time);
        self.current_time
    }

    /// Seek relative to the current time.
    pub fn seek_by(&mut self, delta: f64) -> f64 {
        self.seek(self.current_time + delta)
    }

    pub fn reset(&mut self) -> f64 {
        self.seek(0.0)
    }

    /// Change the rate of future advancement without moving `current_time`.
    pub fn set_speed(&mut self, speed: f64, now: f64) {
        if !speed.is_finite() || speed <= 0.0 {
            return;
        }
        if self.is_playing() {
            // Bring current_time up to date at the old rate, then rebase.
            self.tick(now);
            self.start_ref = now - self.current_time / speed;
        }
        self.speed = speed;
    }
}

fn sanitize_time(time: f64) -> f64 {
    if time.is_nan() { 0.0 } else { time.max(0.0) }
}
