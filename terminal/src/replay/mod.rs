pub mod reader;
pub mod player;

pub use common::{MatchReplay, PlayerRecording};
