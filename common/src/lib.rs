mod board;
mod catalog;
mod clock;
mod constants;
mod events;
mod match_replay;
mod replay;
mod scoring;

pub use board::*;
pub use catalog::*;
pub use clock::*;
pub use constants::*;
pub use events::*;
pub use match_replay::*;
pub use replay::*;
pub use scoring::*;
