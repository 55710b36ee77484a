//! Key mapping from terminal events to host actions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::cursor::Direction;

/// Everything the player can ask the host to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostAction {
    Move(Direction),
    /// Select the tile under the cursor (or swap with the selection).
    Select,
    /// Drop the current selection.
    Deselect,
    /// Highlight a swap that would match.
    Hint,
    /// Replay the current level.
    Retry,
    /// Continue to the next level after a win.
    NextLevel,
}

/// Map keyboard input to host actions.
pub fn handle_key_event(key: KeyEvent) -> Option<HostAction> {
    match key.code {
        // Cursor
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('a') => {
            Some(HostAction::Move(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('d') => {
            Some(HostAction::Move(Direction::Right))
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('w') => {
            Some(HostAction::Move(Direction::Up))
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('s') => {
            Some(HostAction::Move(Direction::Down))
        }

        // Tiles
        KeyCode::Char(' ') | KeyCode::Enter => Some(HostAction::Select),
        KeyCode::Esc => Some(HostAction::Deselect),

        // Level
        KeyCode::Char('?') | KeyCode::Char('i') | KeyCode::Char('I') => Some(HostAction::Hint),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(HostAction::Retry),
        KeyCode::Char('n') | KeyCode::Char('N') => Some(HostAction::NextLevel),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
