//! Input module - keyboard handling for the terminal game
//!
//! Raw key events become `InputAction`s here; `selection` turns confirmed
//! cells into swap requests. The engine itself never sees a key code.

pub mod selection;

pub use selection::SelectionState;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::InputAction;

/// Map keyboard input to input actions
pub fn handle_key_event(key: KeyEvent) -> Option<InputAction> {
    match key.code {
        // Cursor movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('a') => Some(InputAction::MoveLeft),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('d') => Some(InputAction::MoveRight),
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('w') => Some(InputAction::MoveUp),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('s') => Some(InputAction::MoveDown),

        // Select / swap
        KeyCode::Char(' ') | KeyCode::Enter => Some(InputAction::Confirm),
        KeyCode::Esc => Some(InputAction::Cancel),

        _ => None,
    }
}

/// Check if key should quit the game
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
