use ratatui::style::Style;

#[derive(Clone, Copy, Debug)]
pub struct RenderConfig {
    /// Characters used for one logical cell (tile or connector gap)
    pub chars_per_point: CharDimensions,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharDimensions {
    pub horizontal: usize,
    pub vertical: usize,
}

impl CharDimensions {
    pub fn new(horizontal: usize, vertical: usize) -> Self {
        Self { horizontal, vertical }
    }

    /// Column of the middle character, used to place a tile's letter.
    pub fn center(&self) -> (usize, usize) {
        (self.horizontal / 2, self.vertical / 2)
    }
}

pub struct CharGrid {
    grid: Vec<Vec<char>>,
    styles: Vec<Vec<Style>>,
    logical_width: usize,
    char_dims: CharDimensions,
}

impl CharGrid {
    pub fn new(logical_width: usize, logical_height: usize, char_dims: CharDimensions) -> Self {
        let physical_width = logical_width * char_dims.horizontal;
        let physical_height = logical_height * char_dims.vertical;
        Self {
            grid: vec![vec![' '; physical_width]; physical_height],
            styles: vec![vec![Style::default(); physical_width]; physical_height],
            logical_width,
            char_dims,
        }
    }

    pub fn set_logical_point(&mut self, x: usize, y: usize, pattern: &CharPattern) {
        let start_x = x * self.char_dims.horizontal;
        let start_y = y * self.char_dims.vertical;

        for (dy, row) in pattern.chars.iter().enumerate() {
            for (dx, &ch) in row.iter().enumerate() {
                if let Some(cell) = self.grid.get_mut(start_y + dy).and_then(|r| r.get_mut(start_x + dx)) {
                    *cell = ch;
                }
                if let Some(style) = self.styles.get_mut(start_y + dy).and_then(|r| r.get_mut(start_x + dx)) {
                    *style = pattern.style;
                }
            }
        }
    }

    pub fn into_lines(self) -> Vec<Vec<char>> {
        self.grid
    }

    pub fn into_styled_lines(self) -> Vec<(Vec<char>, Vec<Style>)> {
        self.grid.into_iter().zip(self.styles).collect()
    }

    pub fn physical_width(&self) -> usize {
        self.logical_width * self.char_dims.horizontal
    }
}

#[derive(Clone, Debug)]
pub struct CharPattern {
    pub chars: Vec<Vec<char>>,
    pub style: Style,
}

impl CharPattern {
    pub fn new(chars: Vec<Vec<char>>) -> Self {
        Self {
            chars,
            style: Style::default(),
        }
    }

    pub fn single(ch: char, dims: CharDimensions) -> Self {
        Self::new(vec![vec![ch; dims.horizontal]; dims.vertical])
    }

    pub fn empty(dims: CharDimensions) -> Self {
        Self::single(' ', dims)
    }

    pub fn styled(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}
