//! Board engine - the match-three state machine
//!
//! Owns the board, the RNG, and the match/refill queues, and advances one
//! discrete step per `tick()`. Drivers decide pacing: the interactive
//! binary inserts a cooldown between ticks so cascades are visible, tests
//! and the adapter call `drain()` for zero-delay resolution.
//!
//! Swaps are a try/verify/revert protocol: collaborators never observe a
//! half-applied swap, only the snapshot pushed on each state transition.

use std::collections::VecDeque;
use std::fmt;

use log::{debug, error};

use crate::core::matches::{find_column_matches, find_row_matches, MatchSpan};
use crate::core::{Board, BoardSink, BoardSnapshot, SimpleRng};
use crate::types::{
    EngineState, Position, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, DEFAULT_COLORS,
    DEFAULT_SEED, MAX_COLORS, MIN_COLORS,
};

/// Construction parameters for an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub width: u8,
    pub height: u8,
    pub num_colors: u8,
    pub seed: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
            num_colors: DEFAULT_COLORS,
            seed: DEFAULT_SEED,
        }
    }
}

impl EngineConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroDimension);
        }
        if self.num_colors < MIN_COLORS || self.num_colors > MAX_COLORS {
            return Err(ConfigError::ColorCountOutOfRange(self.num_colors));
        }
        Ok(())
    }
}

/// Rejected construction parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    ZeroDimension,
    ColorCountOutOfRange(u8),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroDimension => write!(f, "board width and height must be at least 1"),
            ConfigError::ColorCountOutOfRange(n) => write!(
                f,
                "number of colors must be in [{}, {}], got {}",
                MIN_COLORS, MAX_COLORS, n
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// The board engine. Exactly one logical actor mutates the board: this.
pub struct Engine {
    board: Board,
    rng: SimpleRng,
    num_colors: u8,
    state: EngineState,
    /// Row matches in scan order (rows top-to-bottom).
    row_matches: VecDeque<MatchSpan>,
    /// Column matches in scan order (columns left-to-right).
    column_matches: VecDeque<MatchSpan>,
    /// Cleared spans awaiting gravity refill, in discovery order.
    refill_jobs: VecDeque<MatchSpan>,
    sink: Box<dyn BoardSink>,
}

impl Engine {
    /// Build a board engine: fill the grid from the seeded RNG, then
    /// resolve any accidental initial runs so the stability invariant
    /// holds before the first input. Returns in `WaitingForInput`.
    ///
    /// Every transition of the initial resolve is pushed to `sink`, so a
    /// presentation layer attached from the start sees the board settle.
    pub fn new(config: EngineConfig, sink: Box<dyn BoardSink>) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut engine = Self {
            board: Board::new(config.width, config.height),
            rng: SimpleRng::new(config.seed),
            num_colors: config.num_colors,
            state: EngineState::Idle,
            row_matches: VecDeque::new(),
            column_matches: VecDeque::new(),
            refill_jobs: VecDeque::new(),
            sink,
        };

        engine.create_initial_board();
        engine.drain();
        Ok(engine)
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn num_colors(&self) -> u8 {
        self.num_colors
    }

    /// Snapshot of the current board and state, outside the transition
    /// push cycle. Used by drivers that need an initial frame.
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::capture(&self.board, self.state)
    }

    /// Request a swap of two cells.
    ///
    /// Rejected (false, no side effect) unless the engine is waiting for
    /// input and the positions are on-board 4-directional neighbours.
    /// An accepted swap that produces no match is reverted in full before
    /// returning false.
    pub fn try_swap(&mut self, a: Position, b: Position) -> bool {
        if self.state != EngineState::WaitingForInput {
            debug!(
                "swap rejected: engine is {} not waiting_for_input",
                self.state.as_str()
            );
            return false;
        }
        if !self.board.contains(a) || !self.board.contains(b) || !a.is_adjacent(b) {
            debug!(
                "swap rejected: ({},{}) and ({},{}) are not adjacent board cells",
                a.x, a.y, b.x, b.y
            );
            return false;
        }

        self.change_state(EngineState::SwappingGems);
        self.board.swap(a, b);
        self.scan_board();

        if self.row_matches.is_empty() && self.column_matches.is_empty() {
            // No run produced: restore the original cells.
            self.board.swap(a, b);
            self.change_state(EngineState::WaitingForInput);
            false
        } else {
            self.change_state(EngineState::CheckingBoardState);
            true
        }
    }

    /// Advance the state machine by one discrete step: one full-board
    /// scan, one match clear, or one refill job. Returns false when the
    /// engine is idle or waiting for input (nothing to advance).
    pub fn tick(&mut self) -> bool {
        match self.state {
            EngineState::Idle | EngineState::WaitingForInput | EngineState::SwappingGems => false,
            EngineState::CheckingBoardState => {
                self.scan_board();
                if self.row_matches.is_empty() && self.column_matches.is_empty() {
                    self.change_state(EngineState::WaitingForInput);
                } else {
                    self.change_state(EngineState::ScoringCombinations);
                }
                true
            }
            EngineState::ScoringCombinations => {
                if !self.score_one_match() {
                    self.change_state(EngineState::RefillingEmptySlots);
                }
                true
            }
            EngineState::RefillingEmptySlots => {
                if !self.refill_one_job() {
                    self.change_state(EngineState::CheckingBoardState);
                }
                true
            }
        }
    }

    /// Process steps until the board is stable and the engine is waiting
    /// for input again. A no-op (no snapshot, no transition) when already
    /// there.
    pub fn drain(&mut self) {
        while self.state != EngineState::WaitingForInput {
            if !self.tick() {
                break;
            }
        }
    }

    /// Pseudo-random fill of every cell, then hand off to the scan state.
    /// The board may contain accidental runs at this point; `drain` in
    /// `new` resolves them before the engine accepts input.
    fn create_initial_board(&mut self) {
        for y in 0..self.board.height() {
            for x in 0..self.board.width() {
                let gem = self.rng.next_gem(self.num_colors);
                self.board.set(x, y, Some(gem));
            }
        }
        self.change_state(EngineState::CheckingBoardState);
    }

    /// Enter a new state and push one snapshot to the sink. Re-entering
    /// the current state is a logic fault: loud in debug builds, logged
    /// and ignored in release.
    fn change_state(&mut self, next: EngineState) {
        if next == self.state {
            debug_assert!(false, "invalid transition: re-entering {:?}", self.state);
            error!("invalid transition: re-entering {}", self.state.as_str());
            return;
        }

        self.state = next;
        let snapshot = BoardSnapshot::capture(&self.board, self.state);
        self.sink.board_changed(&snapshot);
    }

    /// Full-board scan. Queues are rebuilt from scratch each pass so a
    /// swap's verification scan and the following check pass never
    /// double-book the same run.
    fn scan_board(&mut self) {
        self.row_matches.clear();
        self.column_matches.clear();
        self.row_matches.extend(find_row_matches(&self.board));
        self.column_matches.extend(find_column_matches(&self.board));
    }

    /// Clear one queued match (all row matches drain before any column
    /// match) and queue its span for refill. Returns false when both
    /// queues are empty.
    fn score_one_match(&mut self) -> bool {
        let span = match self.row_matches.pop_front() {
            Some(span) => span,
            None => match self.column_matches.pop_front() {
                Some(span) => span,
                None => return false,
            },
        };

        for pos in span.positions() {
            self.board.set(pos.x, pos.y, None);
        }
        self.refill_jobs.push_back(span);
        true
    }

    /// Apply gravity to one queued refill span. Horizontal spans touch
    /// several columns; each is compacted independently since gravity only
    /// acts vertically. Returns false when the queue is empty.
    fn refill_one_job(&mut self) -> bool {
        let Some(span) = self.refill_jobs.pop_front() else {
            return false;
        };
        for x in span.columns() {
            self.compact_column(x);
        }
        true
    }

    /// Bottom-up column compaction: slide every gem down over the empties
    /// below it, then synthesize fresh gems for the vacated top cells.
    /// Equivalent to the cascade of single-cell drops, without recursion.
    fn compact_column(&mut self, x: u8) {
        let height = self.board.height();

        if !(0..height).any(|y| self.board.is_empty(Position::new(x, y))) {
            // Recoverable: the span was already refilled by gravity from
            // an earlier overlapping job.
            debug!("redundant fill: column {} has no empty cells", x);
            return;
        }

        // Next row to land a gem in, moving upward from the bottom.
        let mut write = height;
        for y in (0..height).rev() {
            if let Some(gem) = self.board.gem(Position::new(x, y)) {
                write -= 1;
                if write != y {
                    self.board.set(x, write, Some(gem));
                    self.board.set(x, y, None);
                }
            }
        }

        // Rows above the landed gems get fresh random colors.
        for y in 0..write {
            let gem = self.rng.next_gem(self.num_colors);
            self.board.set(x, y, Some(gem));
        }
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("board", &self.board)
            .field("state", &self.state)
            .field("num_colors", &self.num_colors)
            .field("row_matches", &self.row_matches)
            .field("column_matches", &self.column_matches)
            .field("refill_jobs", &self.refill_jobs)
            .finish_non_exhaustive()
    }
}
