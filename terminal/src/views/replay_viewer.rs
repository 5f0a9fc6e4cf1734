use super::View;
use crate::app::AppCommand;
use crate::render::board::BoardRenderer;
use crate::render::standard_renderer::StandardRenderer;
use crate::render::types::{CharDimensions, RenderConfig};
use crate::replay::{MatchReplay, player::ReplayPlayer};
use common::{PlayerState, SEEK_STEP_LARGE_MS, SEEK_STEP_SMALL_MS, WordCatalog, WordMatch};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
};
use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq)]
enum LayoutMode {
    SingleColumn,
    TwoColumn,
}

impl LayoutMode {
    fn from_dimensions(width: u16, height: u16) -> Self {
        const MIN_WIDTH_FOR_TWO_COLUMN: u16 = 100;
        const ASPECT_RATIO_THRESHOLD: f32 = 1.8;

        let aspect_ratio = width as f32 / height.max(1) as f32;
        if width >= MIN_WIDTH_FOR_TWO_COLUMN && aspect_ratio >= ASPECT_RATIO_THRESHOLD {
            LayoutMode::TwoColumn
        } else {
            LayoutMode::SingleColumn
        }
    }
}

pub fn format_time(ms: f64) -> String {
    format!("{:.1}s", ms / 1000.0)
}

fn match_color(word_match: WordMatch) -> Color {
    match word_match {
        WordMatch::Match => Color::Green,
        WordMatch::Partial => Color::Yellow,
        WordMatch::AlreadyFound => Color::Blue,
        WordMatch::NoMatch => Color::Red,
    }
}

/// Catalog words among `found`; words found off the catalog are not counted.
fn board_words_found(catalog: &WordCatalog, found: &BTreeSet<String>) -> usize {
    catalog.len() - catalog.missing(found).count()
}

fn saturating_line_count(lines: usize) -> u16 {
    u16::try_from(lines).unwrap_or(u16::MAX)
}

pub struct ReplayViewerState {
    player: ReplayPlayer,
    words_scroll: u16,
    words_total_lines: Cell<u16>,
    words_scrollbar_state: RefCell<ScrollbarState>,
}

impl ReplayViewerState {
    pub fn new(replay: MatchReplay) -> Self {
        Self {
            player: ReplayPlayer::new(replay),
            words_scroll: 0,
            words_total_lines: Cell::new(0),
            words_scrollbar_state: RefCell::new(ScrollbarState::default()),
        }
    }

    pub fn player(&self) -> &ReplayPlayer {
        &self.player
    }
}

impl View for ReplayViewerState {
    fn handle_input(&mut self, key: KeyEvent, now: Instant) -> Option<AppCommand> {
        let shifted = key.modifiers.contains(KeyModifiers::SHIFT);
        match key.code {
            KeyCode::Char(' ') => self.player.toggle_play(now),
            KeyCode::Char('h') => self.player.step(-SEEK_STEP_LARGE_MS),
            KeyCode::Char('l') => self.player.step(SEEK_STEP_LARGE_MS),
            KeyCode::Char('j') if shifted => self.scroll_words_down(1),
            KeyCode::Char('k') if shifted => self.scroll_words_up(1),
            KeyCode::Char('j') => self.player.step(SEEK_STEP_SMALL_MS),
            KeyCode::Char('k') => self.player.step(-SEEK_STEP_SMALL_MS),
            KeyCode::Char('J') => self.scroll_words_down(1),
            KeyCode::Char('K') => self.scroll_words_up(1),
            KeyCode::Char('g') => self.player.seek(0.0),
            KeyCode::Char('G') => self.player.seek(self.player.max_time()),
            KeyCode::Char('+') | KeyCode::Char('=') => self.player.faster(now),
            KeyCode::Char('-') => self.player.slower(now),
            KeyCode::Char('r') => self.player.reset(),
            KeyCode::PageUp => self.scroll_words_up(5),
            KeyCode::PageDown => self.scroll_words_down(5),
            KeyCode::Char('q') | KeyCode::Esc => return Some(AppCommand::BackToSelector),
            _ => {}
        }
        None
    }

    fn update(&mut self, now: Instant) {
        self.player.update(now);
    }

    fn render(&self, frame: &mut Frame) {
        match LayoutMode::from_dimensions(frame.area().width, frame.area().height) {
            LayoutMode::SingleColumn => self.render_single_column(frame),
            LayoutMode::TwoColumn => self.render_two_column(frame),
        }
    }
}

impl ReplayViewerState {
    fn scroll_words_up(&mut self, lines: u16) {
        self.words_scroll = self.words_scroll.saturating_sub(lines);
        let mut scrollbar_state = self.words_scrollbar_state.borrow_mut();
        *scrollbar_state = scrollbar_state.position(self.words_scroll as usize);
    }

    fn scroll_words_down(&mut self, lines: u16) {
        let max_scroll = self.words_total_lines.get().saturating_sub(1);
        self.words_scroll = (self.words_scroll + lines).min(max_scroll);
        let mut scrollbar_state = self.words_scrollbar_state.borrow_mut();
        *scrollbar_state = scrollbar_state.position(self.words_scroll as usize);
    }

    fn render_single_column(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3),  // Clock
                Constraint::Min(16),    // Boards
                Constraint::Length(10), // Found words
                Constraint::Length(4),  // Controls
            ])
            .split(frame.area());

        frame.render_widget(self.render_header(), chunks[0]);
        self.render_boards(frame, chunks[1]);
        self.render_found_words(frame, chunks[2]);
        frame.render_widget(self.render_controls(), chunks[3]);
    }

    fn render_two_column(&self, frame: &mut Frame) {
        let main_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .margin(1)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(frame.area());

        self.render_boards(frame, main_chunks[0]);

        let info_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(6),
                Constraint::Length(4),
            ])
            .split(main_chunks[1]);

        frame.render_widget(self.render_header(), info_chunks[0]);
        self.render_found_words(frame, info_chunks[1]);
        frame.render_widget(self.render_controls(), info_chunks[2]);
    }

    fn render_header(&self) -> Paragraph<'_> {
        let title = format!(
            "Time: {} / {} | Speed: {}x | {}",
            format_time(self.player.current_time()),
            format_time(self.player.max_time()),
            self.player.speed(),
            if self.player.is_playing() { "▶ Playing" } else { "⏸ Paused" }
        );

        Paragraph::new(title)
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL))
    }

    fn render_boards(&self, frame: &mut Frame, area: Rect) {
        let states = self.player.states();
        if states.is_empty() {
            let empty = Paragraph::new("This match has no player recordings.")
                .alignment(Alignment::Center)
                .block(Block::default().title("Boards").borders(Borders::ALL));
            frame.render_widget(empty, area);
            return;
        }

        let constraints = vec![Constraint::Ratio(1, states.len() as u32); states.len()];
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(area);

        for (index, (state, column)) in states.iter().zip(columns.iter()).enumerate() {
            self.render_player_board(frame, *column, index, state);
        }
    }

    fn render_player_board(&self, frame: &mut Frame, area: Rect, index: usize, state: &PlayerState) {
        let replay = self.player.replay();
        let title = match replay.players.get(index) {
            Some(p) => match &p.team {
                Some(team) => format!("{} [{}]", p.name, team),
                None => p.name.clone(),
            },
            None => format!("Player {}", index + 1),
        };
        let block = Block::default().title(title).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let char_dims = CharDimensions::new(3, 1);
        let renderer = BoardRenderer::new(StandardRenderer::new(char_dims));
        let config = RenderConfig { chars_per_point: char_dims };
        let char_grid = renderer.render(&replay.board, state, &config);

        let grid_width = char_grid.physical_width() as u16;
        let x_offset = inner.width.saturating_sub(grid_width) / 2;
        let padding = " ".repeat(x_offset as usize);

        let mut lines: Vec<Line> = Vec::new();
        for (chars, styles) in char_grid.into_styled_lines() {
            let mut spans = vec![Span::raw(padding.clone())];
            for (ch, style) in chars.into_iter().zip(styles) {
                spans.push(Span::styled(ch.to_string(), style));
            }
            lines.push(Line::from(spans));
        }
        lines.push(Line::from(""));

        let word = state.current_word();
        let word_match = self
            .player
            .session()
            .catalog()
            .classify(word, &state.found_words_set);
        lines.push(Line::from(vec![
            Span::raw("Word: "),
            Span::styled(
                word.to_uppercase(),
                Style::default().fg(match_color(word_match)).add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::from(format!(
            "Score: {} / {}",
            state.score,
            self.player.session().total_points()
        )));
        lines.push(Line::from(format!(
            "Found: {} | Rotation: {}°",
            state.found_words_set.len(),
            state.board_rotation
        )));

        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Left), inner);
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let lines = vec![
            Line::from("Space: Play/Pause | j/k: ±1s | h/l: ±5s | g/G: Start/End | +/-: Speed | r: Reset"),
            Line::from("Shift+J/K, PageUp/Down: Scroll found words | q: Back to menu"),
        ];

        Paragraph::new(lines)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL))
    }

    fn render_found_words(&self, frame: &mut Frame, area: Rect) {
        let replay = self.player.replay();
        let catalog = self.player.session().catalog();
        let mut lines = Vec::new();

        for (index, state) in self.player.states().iter().enumerate() {
            let name = replay
                .players
                .get(index)
                .map(|p| p.name.as_str())
                .unwrap_or("?");
            let found_on_board = board_words_found(catalog, &state.found_words_set);
            lines.push(Line::from(vec![Span::styled(
                format!("=== {} ({}/{} board words) ===", name, found_on_board, catalog.len()),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )]));
            for word in &state.found_words_set {
                lines.push(Line::from(format!("  {}", word)));
            }
            lines.push(Line::from(""));
        }

        let total_lines = lines.len();
        self.words_total_lines.set(saturating_line_count(total_lines));

        let mut scrollbar_state = self.words_scrollbar_state.borrow_mut();
        *scrollbar_state = scrollbar_state
            .content_length(total_lines)
            .position(self.words_scroll as usize);

        let words = Paragraph::new(lines)
            .block(Block::default().title("Found Words").borders(Borders::ALL))
            .style(Style::default().fg(Color::White))
            .scroll((self.words_scroll, 0));
        frame.render_widget(words, area);

        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"));
        frame.render_stateful_widget(
            scrollbar,
            area.inner(Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut *scrollbar_state,
        );
    }
}
