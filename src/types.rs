//! Core types shared across the application
//! This module contains pure data types with no external dependencies

/// Default board configuration used by the interactive binary.
pub const DEFAULT_BOARD_WIDTH: u8 = 8;
pub const DEFAULT_BOARD_HEIGHT: u8 = 8;
pub const DEFAULT_COLORS: u8 = 5;
pub const DEFAULT_SEED: u32 = 1;

/// Allowed color-count range. Fewer than 2 colors makes every board a
/// permanent cascade; more than 6 starves the player of matches.
pub const MIN_COLORS: u8 = 2;
pub const MAX_COLORS: u8 = 6;

/// Minimum run length that counts as a match.
pub const MATCH_LEN: usize = 3;

/// Game timing constants (in milliseconds)
pub const TICK_MS: u32 = 16;
/// Cooldown between visible board steps, so cascades resolve one clear at
/// a time on screen instead of snapping to the final board.
pub const BOARD_REFRESH_MS: u32 = 200;

/// A single gem: a color index in `0..num_colors`.
pub type Gem = u8;

/// Cell on the board (None = cleared/empty, Some = gem color index)
pub type Cell = Option<Gem>;

/// Grid coordinate. `x` runs left to right, `y` runs top to bottom;
/// gravity pulls gems toward larger `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: u8,
    pub y: u8,
}

impl Position {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another position.
    pub fn manhattan_distance(&self, other: Position) -> u16 {
        let dx = (self.x as i16 - other.x as i16).unsigned_abs();
        let dy = (self.y as i16 - other.y as i16).unsigned_abs();
        dx + dy
    }

    /// True when `other` is a 4-directional neighbour (diagonals excluded).
    pub fn is_adjacent(&self, other: Position) -> bool {
        self.manhattan_distance(other) == 1
    }
}

/// Axis of a match run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Row,
    Column,
}

/// Board engine states. One snapshot is pushed to the presentation sink on
/// every transition between these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineState {
    /// Constructed but not yet filled.
    Idle,
    /// Stable board, swap requests accepted.
    WaitingForInput,
    /// A swap is being validated; transient within `try_swap`.
    SwappingGems,
    /// Full-board scan for runs of three or more.
    CheckingBoardState,
    /// Clearing queued matches, one per step.
    ScoringCombinations,
    /// Refilling cleared spans, one job per step.
    RefillingEmptySlots,
}

impl EngineState {
    /// Convert to string (for logs, status line, and the wire protocol)
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineState::Idle => "idle",
            EngineState::WaitingForInput => "waiting_for_input",
            EngineState::SwappingGems => "swapping_gems",
            EngineState::CheckingBoardState => "checking_board_state",
            EngineState::ScoringCombinations => "scoring_combinations",
            EngineState::RefillingEmptySlots => "refilling_empty_slots",
        }
    }
}

/// A resolved request to swap two adjacent cells, produced by the input
/// layer and consumed by `Engine::try_swap`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapRequest {
    pub a: Position,
    pub b: Position,
}

/// Actions the input layer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    /// Anchor the cursor cell, or complete a swap against the anchor.
    Confirm,
    /// Drop the current anchor.
    Cancel,
}
