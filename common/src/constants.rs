/// Tiles per board side. Boards are always square.
pub const BOARD_SIZE: usize = 4;

/// Total tiles on a board, and the length of every highlight mask.
pub const TILE_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// Playback speed used when a session is created
pub const DEFAULT_PLAYBACK_SPEED: f64 = 1.0;

/// Speed multipliers the viewers step through with +/-
pub const PLAYBACK_SPEEDS: [f64; 6] = [0.25, 0.5, 1.0, 2.0, 4.0, 8.0];

/// Seek step for coarse scrubbing in milliseconds
pub const SEEK_STEP_LARGE_MS: f64 = 5000.0;

/// Seek step for fine scrubbing in milliseconds
pub const SEEK_STEP_SMALL_MS: f64 = 1000.0;
