//! Core module - pure game logic with no I/O dependencies
//!
//! Everything the board engine needs lives here: grid storage, the
//! deterministic RNG, the match scanner, snapshots, and the state machine
//! itself. Nothing in this module touches the terminal, the network, or
//! wall-clock time.

pub mod board;
pub mod engine;
pub mod matches;
pub mod rng;
pub mod sink;
pub mod snapshot;

// Re-export commonly used types
pub use board::Board;
pub use engine::{ConfigError, Engine, EngineConfig};
pub use matches::{board_is_stable, find_column_matches, find_row_matches, MatchSpan};
pub use rng::SimpleRng;
pub use sink::{BoardSink, NullSink, RecordingSink};
pub use snapshot::BoardSnapshot;
