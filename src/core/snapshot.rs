//! Full-board snapshots pushed to the presentation sink.

use crate::core::Board;
use crate::types::{Cell, EngineState};

/// A full replacement view of the board at one engine state transition.
/// Consumers must not treat it as a diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSnapshot {
    width: u8,
    height: u8,
    /// Row-major cells; `None` marks a cleared cell mid-resolution.
    cells: Vec<Cell>,
    /// Engine state the snapshot was taken in (the state being entered).
    pub state: EngineState,
}

impl BoardSnapshot {
    pub fn capture(board: &Board, state: EngineState) -> Self {
        Self {
            width: board.width(),
            height: board.height(),
            cells: board.cells().to_vec(),
            state,
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn get(&self, x: u8, y: u8) -> Option<Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.cells[y as usize * self.width as usize + x as usize])
    }

    /// Iterate rows top to bottom, each a row-major cell slice.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width as usize)
    }

    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_none()).count()
    }
}
