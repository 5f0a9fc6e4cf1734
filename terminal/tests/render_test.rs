use common::{Board, Bonus, BonusGrid, InputEvent, PlayerState, Recording, StandardScorer, reconstruct};
use std::collections::BTreeSet;
use terminal::render::{
    board::{quarter_turns, rotate, BoardRenderer},
    standard_renderer::StandardRenderer,
    types::{CharDimensions, RenderConfig},
};

fn board() -> Board {
    Board::from_rows(&["CATS", "ODES", "RNGE", "LIPS"]).unwrap()
}

fn render(board: &Board, state: &PlayerState, char_dims: CharDimensions) -> Vec<Vec<char>> {
    let renderer = BoardRenderer::new(StandardRenderer::new(char_dims));
    let config = RenderConfig { chars_per_point: char_dims };
    renderer.render(board, state, &config).into_lines()
}

fn state_after(events: Vec<InputEvent>) -> PlayerState {
    reconstruct(&Recording::new(events), f64::INFINITY, &BTreeSet::new(), &board(), &StandardScorer)
}

#[test]
fn test_3x1_rendering() {
    let lines = render(&board(), &PlayerState::default(), CharDimensions::new(3, 1));

    // 4 tiles plus 3 gaps in each direction
    assert_eq!(lines.len(), 7);
    assert_eq!(lines[0].len(), 21);

    // Tile (0,0) occupies chars 0..3 of row 0, letter in the middle
    assert_eq!(lines[0][1], 'C');
    // Tile (0,1) starts at logical column 2 -> char 6
    assert_eq!(lines[0][7], 'A');
    // Tile (3,3) on the last row
    assert_eq!(lines[6][19], 'S');
    // Gap rows are blank
    assert!(lines[1].iter().all(|c| *c == ' '));
}

#[test]
fn test_swipe_path_brackets_and_connectors() {
    let state = state_after(vec![
        InputEvent::swipe_letter(100.0, 0, 0, Some("C")),
        InputEvent::swipe_letter(200.0, 0, 1, Some("CA")),
        InputEvent::swipe_letter(300.0, 1, 2, Some("CAE")),
    ]);
    let lines = render(&board(), &state, CharDimensions::new(3, 1));

    assert_eq!(&lines[0][0..3], &['[', 'C', ']']);
    assert_eq!(&lines[0][6..9], &['[', 'A', ']']);
    // Horizontal connector between (0,0) and (0,1)
    assert_eq!(lines[0][4], '─');
    // Diagonal down-right from (0,1) to (1,2) sits at logical (3,1)
    assert_eq!(lines[1][10], '╲');
    // Untouched tile has no brackets
    assert_eq!(&lines[0][18..21], &[' ', 'S', ' ']);
}

#[test]
fn test_keyboard_trace_uses_parentheses() {
    let mut trace = vec![false; 16];
    trace[3] = true;
    let state = state_after(vec![InputEvent::keyboard_word(100.0, "S", trace)]);
    let lines = render(&board(), &state, CharDimensions::new(3, 1));
    assert_eq!(&lines[0][18..21], &['(', 'S', ')']);
}

#[test]
fn test_rotation_moves_tiles() {
    let state = state_after(vec![InputEvent::board_rotation(100.0, 90.0)]);
    let lines = render(&board(), &state, CharDimensions::new(1, 1));

    // A quarter turn clockwise puts the first column on the top row, bottom up.
    let top: String = lines[0].iter().step_by(2).collect();
    assert_eq!(top, "LROC");

    assert_eq!(quarter_turns(-90.0), 3);
    assert_eq!(quarter_turns(450.0), 1);
    assert_eq!(quarter_turns(f64::NAN), 0);
    assert_eq!(rotate(common::Position::new(0, 0), 2), (3, 3));
}

#[test]
fn test_bonus_markers_on_two_row_tiles() {
    let mut grid = BonusGrid::default();
    grid.0[0][0] = Bonus::Snark;
    grid.0[0][1] = Bonus::Boojum;
    let board = board().with_bonus_grid(grid);
    let lines = render(&board, &PlayerState::default(), CharDimensions::new(3, 2));

    assert_eq!(lines.len(), 14);
    assert_eq!(lines[0][2], '*');
    assert_eq!(lines[0][8], '+');
    assert_eq!(lines[1][1], 'C');
}
