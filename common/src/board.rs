use anyhow::{Context, Result, bail};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::{BOARD_SIZE, TILE_COUNT};

/// A tile coordinate as reported by the input recorder.
///
/// `x` is the row and `y` the column. Both are signed so that a malformed
/// event still deserializes and can be rejected later instead of poisoning
/// the whole recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    pub fn is_on_board(&self) -> bool {
        (0..BOARD_SIZE as i32).contains(&self.x) && (0..BOARD_SIZE as i32).contains(&self.y)
    }

    /// Index into a row-major 16 element mask, `None` when off the board.
    pub fn tile_index(&self) -> Option<usize> {
        if self.is_on_board() {
            Some(self.x as usize * BOARD_SIZE + self.y as usize)
        } else {
            None
        }
    }

    pub fn from_tile_index(index: usize) -> Option<Self> {
        if index < TILE_COUNT {
            Some(Position {
                x: (index / BOARD_SIZE) as i32,
                y: (index % BOARD_SIZE) as i32,
            })
        } else {
            None
        }
    }
}

/// Bonus marker on a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum Bonus {
    #[default]
    None,
    /// Letter multiplier
    Snark,
    /// Word multiplier
    Boojum,
}

impl From<u8> for Bonus {
    fn from(value: u8) -> Self {
        match value {
            1 => Bonus::Snark,
            2 => Bonus::Boojum,
            _ => Bonus::None,
        }
    }
}

impl From<Bonus> for u8 {
    fn from(value: Bonus) -> Self {
        match value {
            Bonus::None => 0,
            Bonus::Snark => 1,
            Bonus::Boojum => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BonusGrid(pub [[Bonus; BOARD_SIZE]; BOARD_SIZE]);

impl BonusGrid {
    pub fn get(&self, position: Position) -> Bonus {
        if position.is_on_board() {
            self.0[position.x as usize][position.y as usize]
        } else {
            Bonus::None
        }
    }
}

/// The fixed letter grid for one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    #[serde(serialize_with = "serialize_rows", deserialize_with = "deserialize_rows")]
    letters: [[char; BOARD_SIZE]; BOARD_SIZE],
    #[serde(default)]
    bonus_grid: BonusGrid,
}

impl Board {
    pub fn new(letters: [[char; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        Board {
            letters,
            bonus_grid: BonusGrid::default(),
        }
    }

    /// Parse a board from four rows of four letters each.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        if rows.len() != BOARD_SIZE {
            bail!("Expected {} board rows, got {}", BOARD_SIZE, rows.len());
        }

        let mut letters = [[' '; BOARD_SIZE]; BOARD_SIZE];
        for (x, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let chars: Vec<char> = row.chars().collect();
            if chars.len() != BOARD_SIZE {
                bail!("Board row {} ({:?}) must have {} letters", x, row, BOARD_SIZE);
            }
            letters[x].copy_from_slice(&chars);
        }

        Ok(Board::new(letters))
    }

    pub fn with_bonus_grid(mut self, bonus_grid: BonusGrid) -> Self {
        self.bonus_grid = bonus_grid;
        self
    }

    pub fn letters(&self) -> &[[char; BOARD_SIZE]; BOARD_SIZE] {
        &self.letters
    }

    pub fn bonus_grid(&self) -> &BonusGrid {
        &self.bonus_grid
    }

    pub fn letter_at(&self, position: Position) -> Option<char> {
        if position.is_on_board() {
            Some(self.letters[position.x as usize][position.y as usize])
        } else {
            None
        }
    }

    /// Join the letters under `path`, skipping off-board coordinates.
    pub fn word_along(&self, path: &[Position]) -> String {
        path.iter().filter_map(|p| self.letter_at(*p)).collect()
    }

    /// Letter on the first snark cell in row-major order.
    pub fn snark_letter(&self) -> Option<char> {
        self.first_letter_with(Bonus::Snark)
    }

    /// Letter on the first boojum cell in row-major order.
    pub fn boojum_letter(&self) -> Option<char> {
        self.first_letter_with(Bonus::Boojum)
    }

    fn first_letter_with(&self, bonus: Bonus) -> Option<char> {
        (0..TILE_COUNT)
            .filter_map(Position::from_tile_index)
            .find(|p| self.bonus_grid.get(*p) == bonus)
            .and_then(|p| self.letter_at(p))
    }
}

fn serialize_rows<S: Serializer>(
    letters: &[[char; BOARD_SIZE]; BOARD_SIZE],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    let rows: Vec<String> = letters.iter().map(|row| row.iter().collect()).collect();
    rows.serialize(serializer)
}

fn deserialize_rows<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<[[char; BOARD_SIZE]; BOARD_SIZE], D::Error> {
    let rows = Vec::<String>::deserialize(deserializer)?;
    Board::from_rows(&rows)
        .context("Invalid board letters")
        .map(|board| board.letters)
        .map_err(|e| serde::de::Error::custom(format!("{:#}", e)))
}
