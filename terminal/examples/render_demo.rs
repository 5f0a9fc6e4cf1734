use common::{Board, Bonus, BonusGrid, InputEvent, Recording, StandardScorer, reconstruct};
use std::collections::BTreeSet;
use terminal::render::{
    board::BoardRenderer,
    standard_renderer::StandardRenderer,
    types::{CharDimensions, RenderConfig},
};

fn main() {
    let mut bonus = BonusGrid::default();
    bonus.0[1][3] = Bonus::Snark;
    bonus.0[3][0] = Bonus::Boojum;
    let board = Board::from_rows(&["CATS", "ODES", "RNGE", "LIPS"])
        .expect("demo board is well formed")
        .with_bonus_grid(bonus);

    let recording = Recording::new(vec![
        InputEvent::swipe_letter(100.0, 1, 0, Some("O")),
        InputEvent::swipe_letter(200.0, 1, 1, Some("OD")),
        InputEvent::swipe_letter(300.0, 1, 2, Some("ODE")),
        InputEvent::swipe_letter(400.0, 1, 3, Some("ODES")),
        InputEvent::swipe_letter(500.0, 2, 2, Some("ODESG")),
        InputEvent::swipe_letter(600.0, 1, 3, Some("ODES")),
    ]);

    let char_dims = CharDimensions::new(3, 2);
    let renderer = BoardRenderer::new(StandardRenderer::new(char_dims));
    let config = RenderConfig { chars_per_point: char_dims };

    for time in [250.0, 500.0, 600.0] {
        let state = reconstruct(&recording, time, &BTreeSet::new(), &board, &StandardScorer);
        println!("t={}ms word={:?}", time, state.current_swipe_word);
        for line in renderer.render(&board, &state, &config).into_lines() {
            println!("{}", line.into_iter().collect::<String>());
        }
        println!();
    }
}
