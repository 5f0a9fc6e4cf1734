use common::{BOARD_SIZE, Board, PlayerState, Position, TILE_COUNT};
use super::traits::{TileHighlight, TileRenderer};
use super::types::{CharGrid, RenderConfig};

/// Tiles sit on even logical cells, connectors on the odd cells between them.
const LOGICAL_SIZE: usize = BOARD_SIZE * 2 - 1;

/// Clockwise quarter turns for a rotation in degrees, snapped to 90.
pub fn quarter_turns(degrees: f64) -> u8 {
    if !degrees.is_finite() {
        return 0;
    }
    ((degrees / 90.0).round() as i64).rem_euclid(4) as u8
}

/// Screen (row, column) of a board position after rotating the board clockwise.
pub fn rotate(position: Position, turns: u8) -> (usize, usize) {
    let last = BOARD_SIZE - 1;
    let (r, c) = (position.x as usize, position.y as usize);
    match turns % 4 {
        0 => (r, c),
        1 => (c, last - r),
        2 => (last - r, last - c),
        _ => (last - c, r),
    }
}

pub struct BoardRenderer<R: TileRenderer> {
    renderer: R,
}

impl<R: TileRenderer> BoardRenderer<R> {
    pub fn new(renderer: R) -> Self {
        Self { renderer }
    }

    pub fn render(&self, board: &Board, state: &PlayerState, config: &RenderConfig) -> CharGrid {
        let mut grid = CharGrid::new(LOGICAL_SIZE, LOGICAL_SIZE, config.chars_per_point);
        let turns = quarter_turns(state.board_rotation);

        for index in 0..TILE_COUNT {
            let Some(position) = Position::from_tile_index(index) else {
                continue;
            };
            let letter = board.letter_at(position).unwrap_or(' ');
            let highlight = if state.current_swipe_path[index] {
                TileHighlight::Swiped
            } else if state.current_keyboard_trace_path[index] {
                TileHighlight::Traced
            } else {
                TileHighlight::None
            };
            let pattern = self
                .renderer
                .render_tile(letter, highlight, board.bonus_grid().get(position));
            let (row, col) = rotate(position, turns);
            grid.set_logical_point(col * 2, row * 2, &pattern);
        }

        for line in &state.swipe_lines {
            if !line.from.is_on_board() || !line.to.is_on_board() {
                continue;
            }
            let (r1, c1) = rotate(line.from, turns);
            let (r2, c2) = rotate(line.to, turns);
            let dx = c2 as i32 - c1 as i32;
            let dy = r2 as i32 - r1 as i32;
            // Only neighbouring tiles have a gap cell between them.
            if dx.abs() > 1 || dy.abs() > 1 {
                continue;
            }
            let pattern = self.renderer.render_connector(dx, dy);
            grid.set_logical_point(c1 + c2, r1 + r2, &pattern);
        }

        grid
    }
}
