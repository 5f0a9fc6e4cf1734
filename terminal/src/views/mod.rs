pub mod replay_selector;
pub mod replay_viewer;

pub use replay_selector::ReplaySelectorState;
pub use replay_viewer::ReplayViewerState;

use crate::app::AppCommand;
use crossterm::event::KeyEvent;
use ratatui::Frame;
use std::time::Instant;

pub trait View {
    fn handle_input(&mut self, key: KeyEvent, now: Instant) -> Option<AppCommand>;
    /// Called once per frame with the frame's wall-clock time.
    fn update(&mut self, now: Instant);
    fn render(&self, frame: &mut Frame);
}
