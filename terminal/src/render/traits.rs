use common::Bonus;
use super::types::CharPattern;

/// How a tile is lit in the current frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileHighlight {
    None,
    /// Part of the active swipe path
    Swiped,
    /// Part of the typed word's trace
    Traced,
}

pub trait TileRenderer {
    fn render_tile(&self, letter: char, highlight: TileHighlight, bonus: Bonus) -> CharPattern;

    /// Connector drawn in the gap between two swiped tiles, `dx`/`dy` being
    /// the screen column/row step from the earlier tile to the later one.
    fn render_connector(&self, dx: i32, dy: i32) -> CharPattern;
}
