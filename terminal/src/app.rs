use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::Frame;
use std::path::PathBuf;
use std::time::Instant;

use crate::replay::reader::ReplayReader;
use crate::views::{ReplaySelectorState, ReplayViewerState, View};

#[derive(Debug)]
pub enum AppCommand {
    Quit,
    BackToSelector,
    OpenReplay(PathBuf),
}

pub enum AppState {
    ReplaySelector(Box<ReplaySelectorState>),
    ReplayViewer(Box<ReplayViewerState>),
}

pub struct App {
    pub state: AppState,
    pub replay_dir: PathBuf,
}

impl App {
    pub fn new(replay_dir: PathBuf) -> Result<Self> {
        let selector = ReplaySelectorState::new(replay_dir.clone())?;
        Ok(Self {
            state: AppState::ReplaySelector(Box::new(selector)),
            replay_dir,
        })
    }

    fn view_mut(&mut self) -> &mut dyn View {
        match &mut self.state {
            AppState::ReplaySelector(selector) => selector.as_mut(),
            AppState::ReplayViewer(viewer) => viewer.as_mut(),
        }
    }

    fn view(&self) -> &dyn View {
        match &self.state {
            AppState::ReplaySelector(selector) => selector.as_ref(),
            AppState::ReplayViewer(viewer) => viewer.as_ref(),
        }
    }

    pub fn handle_input(&mut self, key: KeyEvent, now: Instant) -> Option<AppCommand> {
        self.view_mut().handle_input(key, now)
    }

    pub fn update(&mut self, now: Instant) {
        self.view_mut().update(now);
    }

    pub fn render(&self, frame: &mut Frame) {
        self.view().render(frame);
    }

    pub fn handle_command(&mut self, command: AppCommand) -> Result<()> {
        match command {
            AppCommand::OpenReplay(path) => {
                let replay = ReplayReader::load_replay(&path)?;
                tracing::info!(?path, "Opening replay");
                self.state = AppState::ReplayViewer(Box::new(ReplayViewerState::new(replay)));
            }
            AppCommand::BackToSelector => {
                let selector = ReplaySelectorState::new(self.replay_dir.clone())?;
                self.state = AppState::ReplaySelector(Box::new(selector));
            }
            AppCommand::Quit => {
                // Handled in main loop
            }
        }
        Ok(())
    }
}
