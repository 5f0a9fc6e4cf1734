use crate::board::Board;

/// Scores a single word given the board's bonus letters.
pub trait WordScorer {
    fn word_score(&self, word: &str, boojum: Option<char>, snark: Option<char>) -> u32;

    /// Score a word using the bonus letters found on `board`.
    fn score_on(&self, word: &str, board: &Board) -> u32 {
        self.word_score(word, board.boojum_letter(), board.snark_letter())
    }
}

impl<F> WordScorer for F
where
    F: Fn(&str, Option<char>, Option<char>) -> u32,
{
    fn word_score(&self, word: &str, boojum: Option<char>, snark: Option<char>) -> u32 {
        self(word, boojum, snark)
    }
}

/// Default scoring table.
///
/// Letters use the familiar tile values. Every occurrence of the snark letter
/// counts double, any word containing the boojum letter scores double, and
/// each letter past the fourth adds one point.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardScorer;

impl StandardScorer {
    pub fn letter_value(letter: char) -> u32 {
        match letter.to_ascii_lowercase() {
            'a' | 'e' | 'i' | 'o' | 'u' | 'l' | 'n' | 's' | 't' | 'r' => 1,
            'd' | 'g' => 2,
            'b' | 'c' | 'm' | 'p' => 3,
            'f' | 'h' | 'v' | 'w' | 'y' => 4,
            'k' => 5,
            'j' | 'x' => 8,
            'q' | 'z' => 10,
            _ => 0,
        }
    }
}

impl WordScorer for StandardScorer {
    fn word_score(&self, word: &str, boojum: Option<char>, snark: Option<char>) -> u32 {
        let snark = snark.map(|c| c.to_ascii_lowercase());
        let boojum = boojum.map(|c| c.to_ascii_lowercase());

        let mut total = 0;
        let mut has_boojum = false;
        let mut length = 0;
        for letter in word.chars().map(|c| c.to_ascii_lowercase()) {
            length += 1;
            let value = Self::letter_value(letter);
            total += if Some(letter) == snark { value * 2 } else { value };
            if Some(letter) == boojum {
                has_boojum = true;
            }
        }

        if length > 4 {
            total += length - 4;
        }
        if has_boojum {
            total *= 2;
        }
        total
    }
}

/// Total points available on a board.
///
/// An externally supplied total wins; otherwise every catalog word is scored.
pub fn total_points<S, W>(words: &[W], board: &Board, scorer: &S, supplied: Option<u32>) -> u32
where
    S: WordScorer + ?Sized,
    W: AsRef<str>,
{
    if let Some(points) = supplied {
        return points;
    }
    words.iter().map(|w| scorer.score_on(w.as_ref(), board)).sum()
}
