use common::Bonus;
use ratatui::style::{Color, Modifier, Style};
use super::traits::{TileHighlight, TileRenderer};
use super::types::{CharPattern, CharDimensions};

pub struct StandardRenderer {
    char_dims: CharDimensions,
}

impl StandardRenderer {
    pub fn new(char_dims: CharDimensions) -> Self {
        Self { char_dims }
    }

    fn tile_style(highlight: TileHighlight, bonus: Bonus) -> Style {
        let base = match bonus {
            Bonus::None => Style::default().fg(Color::White),
            Bonus::Snark => Style::default().fg(Color::Magenta),
            Bonus::Boojum => Style::default().fg(Color::Yellow),
        };
        match highlight {
            TileHighlight::None => base,
            TileHighlight::Swiped => base.bg(Color::Blue).add_modifier(Modifier::BOLD),
            TileHighlight::Traced => base.bg(Color::DarkGray).add_modifier(Modifier::BOLD),
        }
    }
}

impl TileRenderer for StandardRenderer {
    fn render_tile(&self, letter: char, highlight: TileHighlight, bonus: Bonus) -> CharPattern {
        let CharDimensions { horizontal, vertical } = self.char_dims;
        let mut chars = vec![vec![' '; horizontal]; vertical];
        let (cx, cy) = self.char_dims.center();
        chars[cy][cx] = letter.to_ascii_uppercase();

        // Brackets only fit when there is room either side of the letter.
        if horizontal >= 3 {
            let (open, close) = match highlight {
                TileHighlight::None => (' ', ' '),
                TileHighlight::Swiped => ('[', ']'),
                TileHighlight::Traced => ('(', ')'),
            };
            chars[cy][0] = open;
            chars[cy][horizontal - 1] = close;
        }

        if vertical >= 2 {
            let marker = match bonus {
                Bonus::None => ' ',
                Bonus::Snark => '*',
                Bonus::Boojum => '+',
            };
            chars[0][horizontal - 1] = marker;
        }

        CharPattern::new(chars).styled(Self::tile_style(highlight, bonus))
    }

    fn render_connector(&self, dx: i32, dy: i32) -> CharPattern {
        let ch = match (dx.signum(), dy.signum()) {
            (_, 0) => '─',
            (0, _) => '│',
            (1, 1) | (-1, -1) => '╲',
            _ => '╱',
        };
        let mut pattern = CharPattern::empty(self.char_dims);
        let (cx, cy) = self.char_dims.center();
        pattern.chars[cy][cx] = ch;
        pattern.styled(Style::default().fg(Color::Cyan))
    }
}
