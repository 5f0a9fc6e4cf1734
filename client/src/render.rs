use common::{BOARD_SIZE, Bonus, Position, TILE_COUNT, WordMatch};
use wasm_bindgen::prelude::*;

use crate::ReplayHandle;

const BACKGROUND: &str = "#ffffff";
const TILE_FILL: &str = "#f3efe4";
const TILE_SWIPED: &str = "#7aa8c1";
const TILE_TRACED: &str = "#c1d8e4";
const SNARK_BORDER: &str = "#b05cc1";
const BOOJUM_BORDER: &str = "#d4a72c";
const LINE_COLOR: &str = "rgba(30, 80, 120, 0.7)";

fn word_color(word_match: WordMatch) -> &'static str {
    match word_match {
        WordMatch::Match => "#3d8b3d",
        WordMatch::Partial => "#b8860b",
        WordMatch::AlreadyFound => "#4a6fa5",
        WordMatch::NoMatch => "#b03a3a",
    }
}

/// Paints one player's board onto a canvas.
///
/// The board is drawn as a 4x4 grid of `cell_size` tiles rotated about its
/// centre, with a status line for the current word and score beneath it.
#[wasm_bindgen]
pub fn render_board(
    handle: &ReplayHandle,
    player: usize,
    canvas: web_sys::HtmlCanvasElement,
    cell_size: f64,
) -> Result<(), JsValue> {
    let session = handle.session();
    let state = session
        .state(player)
        .ok_or_else(|| JsValue::from_str(&format!("No player {}", player)))?;
    let board = session.board();

    let context = canvas
        .get_context("2d")
        .map_err(|_| JsValue::from_str("Failed to get 2d context"))?
        .ok_or_else(|| JsValue::from_str("2d context is null"))?;

    let ctx = context
        .dyn_into::<web_sys::CanvasRenderingContext2d>()
        .map_err(|_| JsValue::from_str("Failed to cast to 2d context"))?;

    let canvas_width = canvas.width() as f64;
    let canvas_height = canvas.height() as f64;
    let board_px = cell_size * BOARD_SIZE as f64;
    let gap = cell_size * 0.08;

    ctx.set_fill_style(&JsValue::from_str(BACKGROUND));
    ctx.fill_rect(0.0, 0.0, canvas_width, canvas_height);

    // Rotate the board about its centre; the status line stays upright.
    ctx.save();
    ctx.translate(board_px / 2.0, board_px / 2.0)?;
    ctx.rotate(state.board_rotation.to_radians())?;
    ctx.translate(-board_px / 2.0, -board_px / 2.0)?;

    let highlighted = state.highlighted();
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.set_font(&format!("bold {}px sans-serif", (cell_size * 0.5).round()));

    for index in 0..TILE_COUNT {
        let Some(position) = Position::from_tile_index(index) else {
            continue;
        };
        let x = position.y as f64 * cell_size;
        let y = position.x as f64 * cell_size;

        let fill = if state.current_swipe_path[index] {
            TILE_SWIPED
        } else if highlighted[index] {
            TILE_TRACED
        } else {
            TILE_FILL
        };
        ctx.set_fill_style(&JsValue::from_str(fill));
        ctx.fill_rect(x + gap, y + gap, cell_size - 2.0 * gap, cell_size - 2.0 * gap);

        let border = match board.bonus_grid().get(position) {
            Bonus::None => None,
            Bonus::Snark => Some(SNARK_BORDER),
            Bonus::Boojum => Some(BOOJUM_BORDER),
        };
        if let Some(color) = border {
            ctx.set_stroke_style(&JsValue::from_str(color));
            ctx.set_line_width(3.0);
            ctx.stroke_rect(x + gap, y + gap, cell_size - 2.0 * gap, cell_size - 2.0 * gap);
        }

        if let Some(letter) = board.letter_at(position) {
            ctx.set_fill_style(&JsValue::from_str("#222222"));
            ctx.fill_text(
                &letter.to_uppercase().to_string(),
                x + cell_size / 2.0,
                y + cell_size / 2.0,
            )?;
        }
    }

    if !state.swipe_lines.is_empty() {
        ctx.set_stroke_style(&JsValue::from_str(LINE_COLOR));
        ctx.set_line_width(cell_size * 0.12);
        ctx.set_line_cap("round");
        ctx.begin_path();
        for line in &state.swipe_lines {
            let centre = |p: Position| {
                (
                    p.y as f64 * cell_size + cell_size / 2.0,
                    p.x as f64 * cell_size + cell_size / 2.0,
                )
            };
            let (x1, y1) = centre(line.from);
            let (x2, y2) = centre(line.to);
            ctx.move_to(x1, y1);
            ctx.line_to(x2, y2);
        }
        ctx.stroke();
    }

    ctx.restore();

    let word = state.current_word();
    let word_match = session.catalog().classify(word, &state.found_words_set);
    let status_y = board_px + cell_size * 0.5;

    ctx.set_text_align("left");
    ctx.set_font(&format!("{}px sans-serif", (cell_size * 0.35).round()));
    ctx.set_fill_style(&JsValue::from_str(word_color(word_match)));
    ctx.fill_text(&word.to_uppercase(), 0.0, status_y)?;

    ctx.set_text_align("right");
    ctx.set_fill_style(&JsValue::from_str("#222222"));
    ctx.fill_text(
        &format!("{} / {}", state.score, session.total_points()),
        board_px,
        status_y,
    )?;

    Ok(())
}
