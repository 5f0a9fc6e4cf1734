use std::collections::BTreeSet;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::board::{Board, Position};
use crate::constants::TILE_COUNT;
use crate::events::{InputEventKind, Recording};
use crate::scoring::WordScorer;

/// Segment drawn between two consecutively swiped tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwipeLine {
    pub from: Position,
    pub to: Position,
}

/// Everything a renderer needs to paint one player's board at a point in time.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerState {
    pub current_swipe_path: [bool; TILE_COUNT],
    pub current_keyboard_word: String,
    pub current_keyboard_trace_path: [bool; TILE_COUNT],
    pub swipe_lines: Vec<SwipeLine>,
    pub found_words_set: BTreeSet<String>,
    pub current_swipe_word: String,
    pub board_rotation: f64,
    pub score: u32,
    pub swipe_path_indexes: Vec<Position>,
}

impl PlayerState {
    /// The word currently being built, swipe first then keyboard.
    pub fn current_word(&self) -> &str {
        if self.current_swipe_word.is_empty() {
            &self.current_keyboard_word
        } else {
            &self.current_swipe_word
        }
    }

    /// Union of the swipe highlight and the keyboard trace.
    pub fn highlighted(&self) -> [bool; TILE_COUNT] {
        let mut mask = self.current_swipe_path;
        for (cell, traced) in mask.iter_mut().zip(self.current_keyboard_trace_path) {
            *cell |= traced;
        }
        mask
    }
}

/// Swipe accumulator for a single reconstruction pass.
#[derive(Default)]
struct SwipeTrail {
    path: Vec<Position>,
    highlight: [bool; TILE_COUNT],
}

impl SwipeTrail {
    fn clear(&mut self) {
        self.path.clear();
        self.highlight = [false; TILE_COUNT];
    }

    fn touch(&mut self, position: Position, index: usize) {
        match self.path.iter().position(|p| *p == position) {
            Some(at) => {
                // Re-touched an earlier tile: drop everything after it.
                for dropped in self.path.drain(at + 1..) {
                    if let Some(i) = dropped.tile_index() {
                        self.highlight[i] = false;
                    }
                }
            }
            None => self.path.push(position),
        }
        self.highlight[index] = true;
    }
}

/// Decide whether a reported cumulative word begins a fresh swipe instead of
/// continuing the accumulated one.
///
/// A single letter after two or more accumulated letters is a restart, as is
/// any pair where neither word is a prefix of the other. This misreads a
/// genuine restart on the same first letter when only one letter was
/// accumulated; renderers depend on exactly this behavior.
pub fn starts_new_sequence(reported: &str, accumulated: &str) -> bool {
    let reported = reported.to_lowercase();
    let accumulated = accumulated.to_lowercase();

    if reported.chars().count() == 1 && accumulated.chars().count() >= 2 {
        return true;
    }
    !(reported.starts_with(&accumulated) || accumulated.starts_with(&reported))
}

fn trace_mask(trace_path: &[bool]) -> [bool; TILE_COUNT] {
    let mut mask = [false; TILE_COUNT];
    for (cell, traced) in mask.iter_mut().zip(trace_path) {
        *cell = *traced;
    }
    mask
}

/// Rebuild a player's board state as of `query_time` by scanning the whole recording.
///
/// The result depends only on the arguments, so callers may seek backwards
/// and forwards freely. Events later than `query_time` are ignored wherever
/// they sit in the log.
pub fn reconstruct<S>(
    recording: &Recording,
    query_time: f64,
    initial_found_words: &BTreeSet<String>,
    board: &Board,
    scorer: &S,
) -> PlayerState
where
    S: WordScorer + ?Sized,
{
    let query_time = if query_time.is_nan() { 0.0 } else { query_time };
    let boojum = board.boojum_letter();
    let snark = board.snark_letter();

    let mut state = PlayerState {
        found_words_set: initial_found_words.clone(),
        ..PlayerState::default()
    };
    let mut trail = SwipeTrail::default();
    let mut last_swipe_start = 0.0;

    for event in recording.events_until(query_time) {
        match &event.kind {
            InputEventKind::SwipeLetter { x, y, word } => {
                if event.timestamp < last_swipe_start {
                    trace!("Skipping stale swipe at {} (sequence began {})", event.timestamp, last_swipe_start);
                    continue;
                }
                let position = Position::new(*x, *y);
                let Some(index) = position.tile_index() else {
                    debug!("Skipping off-board swipe at {:?} (t={})", position, event.timestamp);
                    continue;
                };

                if let Some(reported) = word {
                    let accumulated = board.word_along(&trail.path);
                    if starts_new_sequence(reported, &accumulated) {
                        trail.clear();
                        last_swipe_start = event.timestamp;
                    }
                }
                trail.touch(position, index);
            }

            // The letters that formed it were already applied one by one.
            InputEventKind::SwipeWord { .. } => {}

            InputEventKind::KeyboardWord { word, trace_path } => {
                state.current_keyboard_word = word.clone();
                state.current_keyboard_trace_path = trace_mask(trace_path);
            }

            InputEventKind::WordClear => {
                state.current_keyboard_word.clear();
                state.current_keyboard_trace_path = [false; TILE_COUNT];
                trail.clear();
                last_swipe_start = event.timestamp;
            }

            InputEventKind::WordSubmit { word } => {
                state.found_words_set.insert(word.to_lowercase());
                state.score += scorer.word_score(word, boojum, snark);
                state.current_keyboard_word.clear();
                state.current_keyboard_trace_path = [false; TILE_COUNT];
                trail.clear();
                last_swipe_start = event.timestamp;
            }

            InputEventKind::BoardRotation { rotation } => {
                if rotation.is_finite() {
                    state.board_rotation = *rotation;
                }
            }
        }
    }

    state.swipe_lines = trail
        .path
        .windows(2)
        .map(|pair| SwipeLine {
            from: pair[0],
            to: pair[1],
        })
        .collect();
    state.current_swipe_word = board.word_along(&trail.path);
    state.current_swipe_path = trail.highlight;
    state.swipe_path_indexes = trail.path;
    state
}

/// The fixed inputs shared by every reconstruction of one player's board.
#[derive(Debug, Clone)]
pub struct ReplayContext<S> {
    board: Board,
    scorer: S,
    initial_found_words: BTreeSet<String>,
}

impl<S: WordScorer> ReplayContext<S> {
    pub fn new(board: Board, scorer: S) -> Self {
        ReplayContext {
            board,
            scorer,
            initial_found_words: BTreeSet::new(),
        }
    }

    pub fn with_initial_found_words<I, W>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = W>,
        W: AsRef<str>,
    {
        self.initial_found_words = words.into_iter().map(|w| w.as_ref().to_lowercase()).collect();
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    pub fn initial_found_words(&self) -> &BTreeSet<String> {
        &self.initial_found_words
    }

    pub fn state_at(&self, recording: &Recording, time: f64) -> PlayerState {
        reconstruct(recording, time, &self.initial_found_words, &self.board, &self.scorer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::InputEvent;

    fn board() -> Board {
        Board::from_rows(&["CATS", "ODES", "RNGE", "LIPS"]).unwrap()
    }

    fn state_at(events: Vec<InputEvent>, time: f64) -> PlayerState {
        let recording = Recording::new(events);
        reconstruct(&recording, time, &BTreeSet::new(), &board(), &|_: &str, _: Option<char>, _: Option<char>| 1u32)
    }

    #[test]
    fn new_sequence_heuristic() {
        assert!(starts_new_sequence("D", "CAT"));
        assert!(starts_new_sequence("C", "CA"));
        assert!(starts_new_sequence("DO", "CA"));
        assert!(!starts_new_sequence("CAT", "CA"));
        assert!(!starts_new_sequence("CA", "CAT"));
        assert!(!starts_new_sequence("C", ""));
        assert!(!starts_new_sequence("c", "C"));
        // One accumulated letter is not enough to force a restart on a repeat.
        assert!(!starts_new_sequence("C", "C"));
    }

    #[test]
    fn swipe_without_reported_word_appends() {
        let state = state_at(
            vec![
                InputEvent::swipe_letter(10.0, 0, 0, None),
                InputEvent::swipe_letter(20.0, 1, 1, None),
            ],
            100.0,
        );
        assert_eq!(state.swipe_path_indexes, vec![Position::new(0, 0), Position::new(1, 1)]);
        assert_eq!(state.current_swipe_word, "CD");
        assert_eq!(state.swipe_lines.len(), 1);
    }

    #[test]
    fn off_board_swipes_are_skipped() {
        let state = state_at(
            vec![
                InputEvent::swipe_letter(10.0, 0, 0, Some("C")),
                InputEvent::swipe_letter(20.0, 4, 0, Some("CX")),
                InputEvent::swipe_letter(30.0, -1, 2, None),
                InputEvent::swipe_letter(40.0, 0, 1, Some("CA")),
            ],
            100.0,
        );
        assert_eq!(state.swipe_path_indexes, vec![Position::new(0, 0), Position::new(0, 1)]);
        assert_eq!(state.current_swipe_word, "CA");
    }

    #[test]
    fn stale_swipes_before_clear_are_ignored() {
        // Stored after the clear but stamped before it.
        let state = state_at(
            vec![
                InputEvent::swipe_letter(10.0, 0, 0, Some("C")),
                InputEvent::word_clear(50.0),
                InputEvent::swipe_letter(40.0, 0, 1, Some("CA")),
                InputEvent::swipe_letter(60.0, 1, 1, Some("D")),
            ],
            100.0,
        );
        assert_eq!(state.swipe_path_indexes, vec![Position::new(1, 1)]);
    }

    #[test]
    fn keyboard_word_replaces_previous_trace() {
        let mut first = vec![false; TILE_COUNT];
        first[0] = true;
        first[1] = true;
        let mut second = vec![false; 3];
        second[2] = true;

        let state = state_at(
            vec![
                InputEvent::keyboard_word(10.0, "CA", first),
                InputEvent::keyboard_word(20.0, "T", second),
            ],
            100.0,
        );
        assert_eq!(state.current_keyboard_word, "T");
        let lit: Vec<usize> = (0..TILE_COUNT).filter(|i| state.current_keyboard_trace_path[*i]).collect();
        assert_eq!(lit, vec![2]);
        assert_eq!(state.current_word(), "T");
    }

    #[test]
    fn word_clear_resets_keyboard_and_swipe() {
        let state = state_at(
            vec![
                InputEvent::keyboard_word(10.0, "CA", vec![true, true]),
                InputEvent::swipe_letter(15.0, 0, 0, Some("C")),
                InputEvent::word_clear(20.0),
            ],
            100.0,
        );
        assert_eq!(state, PlayerState::default());
    }

    #[test]
    fn submit_records_lowercase_word() {
        let state = state_at(
            vec![InputEvent::word_submit(10.0, "Cat"), InputEvent::word_submit(20.0, "DOG")],
            100.0,
        );
        assert_eq!(state.score, 2);
        assert!(state.found_words_set.contains("cat"));
        assert!(state.found_words_set.contains("dog"));
    }

    #[test]
    fn nan_query_time_reads_as_zero() {
        let state = state_at(vec![InputEvent::word_submit(0.0, "cat"), InputEvent::word_submit(5.0, "dog")], f64::NAN);
        assert_eq!(state.found_words_set.len(), 1);
    }

    #[test]
    fn highlighted_merges_swipe_and_keyboard() {
        let state = state_at(
            vec![
                InputEvent::keyboard_word(5.0, "S", vec![false, false, false, true]),
                InputEvent::swipe_letter(10.0, 0, 0, Some("C")),
            ],
            100.0,
        );
        let mask = state.highlighted();
        assert!(mask[0]);
        assert!(mask[3]);
        assert!(!mask[1]);
    }

    #[test]
    fn context_applies_initial_found_words() {
        let context = ReplayContext::new(board(), |_: &str, _: Option<char>, _: Option<char>| 3u32)
            .with_initial_found_words(["Dog"]);
        let recording = Recording::new(vec![InputEvent::word_submit(10.0, "cat")]);

        let before = context.state_at(&recording, 5.0);
        assert_eq!(before.found_words_set.iter().collect::<Vec<_>>(), vec!["dog"]);
        assert_eq!(before.score, 0);

        let after = context.state_at(&recording, 10.0);
        assert_eq!(after.found_words_set.len(), 2);
        assert_eq!(after.score, 3);
    }
}
