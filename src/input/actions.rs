//! Game action definitions
//!
//! Arrow keys steer, space starts, digits/backspace/enter answer riddles.

use macroquad::prelude::KeyCode;

/// All possible game actions that can be triggered by the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement (held)
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,

    // Menu / game over
    Start,          // Space

    // Challenge answer box
    SubmitAnswer,   // Enter
    EraseDigit,     // Backspace
}

impl Action {
    /// Keys bound to this action. Any of them triggers it.
    pub fn keys(self) -> &'static [KeyCode] {
        match self {
            Action::MoveLeft => &[KeyCode::Left],
            Action::MoveRight => &[KeyCode::Right],
            Action::MoveUp => &[KeyCode::Up],
            Action::MoveDown => &[KeyCode::Down],
            Action::Start => &[KeyCode::Space],
            Action::SubmitAnswer => &[KeyCode::Enter, KeyCode::KpEnter],
            Action::EraseDigit => &[KeyCode::Backspace],
        }
    }
}
