//! Protocol module - JSON message types for remote control
//!
//! Line-delimited JSON over TCP: the client sends one `Command` per line
//! and receives `Event` lines back. Board events are full replacements;
//! cleared cells are encoded as `-1` so mid-cascade frames are
//! representable.

use serde::{Deserialize, Serialize};

use crate::core::BoardSnapshot;
use crate::types::Position;

/// Client -> engine messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Try to swap two cells; answered with a `result` event, followed by
    /// the board events of the resolution if the swap was accepted.
    Swap { seq: u64, a: [u8; 2], b: [u8; 2] },
    /// Request the current board; answered with a `board` event carrying
    /// the same seq.
    Board { seq: u64 },
}

impl Command {
    pub fn from_line(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }

    pub fn seq(&self) -> u64 {
        match self {
            Command::Swap { seq, .. } | Command::Board { seq } => *seq,
        }
    }
}

/// Engine -> client messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Outcome of a swap command.
    Result { seq: u64, accepted: bool },
    /// Full board state. Unsolicited stream events (one per engine state
    /// transition) carry seq 0; replies to `board` commands echo the
    /// request seq.
    Board {
        seq: u64,
        state: String,
        cells: Vec<Vec<i16>>,
    },
    /// The previous line could not be parsed or delivered.
    Error { seq: u64, message: String },
}

impl Event {
    /// Serialize to one newline-terminated wire line.
    pub fn to_line(&self) -> String {
        let mut line = serde_json::to_string(self).expect("event serialization cannot fail");
        line.push('\n');
        line
    }

    pub fn board(seq: u64, snapshot: &BoardSnapshot) -> Self {
        let cells = snapshot
            .rows()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.map_or(-1, |gem| gem as i16))
                    .collect()
            })
            .collect();
        Event::Board {
            seq,
            state: snapshot.state.as_str().to_string(),
            cells,
        }
    }
}

pub fn position(pair: [u8; 2]) -> Position {
    Position::new(pair[0], pair[1])
}
