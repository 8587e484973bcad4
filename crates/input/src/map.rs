//! Key mapping from terminal events to engine commands.

use crate::types::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to a command.
///
/// `paused` selects between `Pause` and `Resume` for the pause key. Digits
/// `1`..`9` use the inventory item at `digit - 1`.
pub fn map_key(key: KeyEvent, paused: bool) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h' | 'H' | 'a' | 'A') => Some(Command::MoveLeft),
        KeyCode::Right | KeyCode::Char('l' | 'L' | 'd' | 'D') => Some(Command::MoveRight),
        KeyCode::Down | KeyCode::Char('j' | 'J' | 's' | 'S') => Some(Command::SoftDrop),

        // Rotation
        KeyCode::Up | KeyCode::Char('k' | 'K' | 'w' | 'W') => Some(Command::Rotate),

        // Actions
        KeyCode::Char(' ') | KeyCode::Enter => Some(Command::HardDrop),
        KeyCode::Char('p' | 'P') | KeyCode::Esc => Some(if paused {
            Command::Resume
        } else {
            Command::Pause
        }),
        KeyCode::Char('r' | 'R') => Some(Command::Restart),

        // Inventory slots
        KeyCode::Char(c @ '1'..='9') => c
            .to_digit(10)
            .map(|d| Command::UseItem(d as usize - 1)),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
