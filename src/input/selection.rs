//! Two-step cell selection: anchor one gem, confirm a neighbour to swap.
//!
//! This is the input-normalization layer in front of the engine. It owns
//! the cursor and at most one anchored cell, and emits a `SwapRequest`
//! only when the player confirms a second, adjacent cell. The engine is
//! still free to reject the request (bad timing, no resulting match).

use crate::types::{InputAction, Position, SwapRequest};

#[derive(Debug, Clone, Copy)]
pub struct SelectionState {
    board_width: u8,
    board_height: u8,
    cursor: Position,
    anchor: Option<Position>,
}

impl SelectionState {
    pub fn new(board_width: u8, board_height: u8) -> Self {
        Self {
            board_width,
            board_height,
            cursor: Position::new(0, 0),
            anchor: None,
        }
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// The currently anchored cell, if any.
    pub fn anchor(&self) -> Option<Position> {
        self.anchor
    }

    /// Apply one input action. Returns a swap request when the action
    /// completed a pair, None otherwise.
    pub fn apply(&mut self, action: InputAction) -> Option<SwapRequest> {
        match action {
            InputAction::MoveLeft => {
                self.cursor.x = self.cursor.x.saturating_sub(1);
                None
            }
            InputAction::MoveRight => {
                self.cursor.x = (self.cursor.x + 1).min(self.board_width - 1);
                None
            }
            InputAction::MoveUp => {
                self.cursor.y = self.cursor.y.saturating_sub(1);
                None
            }
            InputAction::MoveDown => {
                self.cursor.y = (self.cursor.y + 1).min(self.board_height - 1);
                None
            }
            InputAction::Cancel => {
                self.anchor = None;
                None
            }
            InputAction::Confirm => self.confirm(),
        }
    }

    fn confirm(&mut self) -> Option<SwapRequest> {
        match self.anchor {
            None => {
                self.anchor = Some(self.cursor);
                None
            }
            Some(anchor) if anchor == self.cursor => {
                // Confirming the anchor again deselects it.
                self.anchor = None;
                None
            }
            Some(anchor) if anchor.is_adjacent(self.cursor) => {
                self.anchor = None;
                Some(SwapRequest {
                    a: anchor,
                    b: self.cursor,
                })
            }
            Some(_) => {
                // Too far away: treat this as a fresh first selection.
                self.anchor = Some(self.cursor);
                None
            }
        }
    }
}
