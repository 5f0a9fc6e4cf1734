use super::View;
use crate::app::AppCommand;
use crate::replay::reader::ReplayReader;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};
use std::path::{Path, PathBuf};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

pub fn format_size(size: u64) -> String {
    if size < 1024 {
        format!("{} B", size)
    } else if size < 1024 * 1024 {
        format!("{:.1} KB", size as f64 / 1024.0)
    } else {
        format!("{:.1} MB", size as f64 / (1024.0 * 1024.0))
    }
}

pub fn format_age(age_secs: u64) -> String {
    if age_secs < 60 {
        "just now".to_string()
    } else if age_secs < 3600 {
        format!("{}m ago", age_secs / 60)
    } else if age_secs < 86400 {
        format!("{}h ago", age_secs / 3600)
    } else {
        format!("{}d ago", age_secs / 86400)
    }
}

struct ReplayEntry {
    path: PathBuf,
    name: String,
    detail: String,
}

impl ReplayEntry {
    fn from_path(path: PathBuf, dir: &Path) -> Self {
        // Show nested replays relative to the scanned directory
        let name = path
            .strip_prefix(dir)
            .unwrap_or(&path)
            .to_string_lossy()
            .into_owned();

        let detail = match path.metadata() {
            Ok(metadata) => {
                let modified = metadata
                    .modified()
                    .ok()
                    .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
                    .zip(SystemTime::now().duration_since(UNIX_EPOCH).ok())
                    .map(|(modified, now)| format_age(now.as_secs().saturating_sub(modified.as_secs())))
                    .unwrap_or_else(|| "unknown".to_string());
                format!(" ({}, {})", format_size(metadata.len()), modified)
            }
            Err(_) => String::new(),
        };

        Self { path, name, detail }
    }
}

pub struct ReplaySelectorState {
    entries: Vec<ReplayEntry>,
    selected_index: usize,
}

impl ReplaySelectorState {
    pub fn new(replay_dir: PathBuf) -> Result<Self> {
        let entries = ReplayReader::list_replays(&replay_dir)?
            .into_iter()
            .map(|path| ReplayEntry::from_path(path, &replay_dir))
            .collect();
        Ok(Self {
            entries,
            selected_index: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn selected_path(&self) -> Option<&Path> {
        self.entries.get(self.selected_index).map(|e| e.path.as_path())
    }

    fn move_selection_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.entries.len() {
            self.selected_index += 1;
        }
    }

    fn scroll_offset(&self, visible_height: usize) -> usize {
        if visible_height == 0 {
            return self.selected_index;
        }
        self.selected_index.saturating_sub(visible_height - 1)
    }
}

impl View for ReplaySelectorState {
    fn handle_input(&mut self, key: KeyEvent, _now: Instant) -> Option<AppCommand> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(AppCommand::Quit),
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_selection_down();
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_selection_up();
                None
            }
            KeyCode::Enter => self
                .selected_path()
                .map(|path| AppCommand::OpenReplay(path.to_path_buf())),
            _ => None,
        }
    }

    fn update(&mut self, _now: Instant) {}

    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(frame.area());

        let title = Paragraph::new("Boojum Replay Viewer")
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let list_area = chunks[1];
        let visible_height = list_area.height.saturating_sub(2) as usize;
        let scroll_offset = self.scroll_offset(visible_height);

        let items: Vec<ListItem> = self
            .entries
            .iter()
            .enumerate()
            .skip(scroll_offset)
            .take(visible_height)
            .map(|(i, entry)| {
                let style = if i == self.selected_index {
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };

                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:>3} ", i + 1), Style::default().fg(Color::DarkGray)),
                    Span::styled(entry.name.as_str(), style),
                    Span::styled(entry.detail.as_str(), Style::default().fg(Color::DarkGray)),
                ]))
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .title(format!("Select Match ({})", self.entries.len()))
                .borders(Borders::ALL),
        );
        frame.render_widget(list, list_area);

        let help_text = if self.entries.is_empty() {
            "No replay files found. Press 'q' to quit."
        } else {
            "↑/k: Up | ↓/j: Down | Enter: Open | q: Quit"
        };

        let help = Paragraph::new(help_text)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[2]);
    }
}
