//! Input state management
//!
//! Polls macroquad once per frame and turns it into a plain `FrameInput`
//! value: which direction keys are held right now, plus the discrete key
//! presses that arrived since the last frame. The game never reads the
//! keyboard directly, so it can be driven by hand-built input in tests.

use macroquad::prelude::*;
use super::Action;

/// Direction keys held this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Directions {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl Directions {
    /// Exactly one horizontal and one vertical direction (opposites cancel)
    pub fn is_diagonal(&self) -> bool {
        (self.left != self.right) && (self.up != self.down)
    }
}

#[cfg(test)]
impl Directions {
    pub const NONE: Directions = Directions { left: false, right: false, up: false, down: false };
    pub const LEFT: Directions = Directions { left: true, ..Directions::NONE };
    pub const RIGHT: Directions = Directions { right: true, ..Directions::NONE };
    pub const UP: Directions = Directions { up: true, ..Directions::NONE };
    pub const DOWN: Directions = Directions { down: true, ..Directions::NONE };

    pub fn any(&self) -> bool {
        self.left || self.right || self.up || self.down
    }

    /// Combine two sets of held directions
    pub fn with(self, other: Directions) -> Directions {
        Directions {
            left: self.left || other.left,
            right: self.right || other.right,
            up: self.up || other.up,
            down: self.down || other.down,
        }
    }
}

/// A discrete key press, already filtered down to what the game understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPress {
    Start,
    Digit(char),
    Erase,
    Submit,
}

/// Everything the game needs to know about the keyboard for one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    pub held: Directions,
    /// Presses in arrival order (digits first, then control keys)
    pub presses: Vec<KeyPress>,
}

#[cfg(test)]
impl FrameInput {
    pub fn holding(held: Directions) -> Self {
        Self { held, presses: Vec::new() }
    }

    pub fn pressing(presses: impl IntoIterator<Item = KeyPress>) -> Self {
        Self { held: Directions::NONE, presses: presses.into_iter().collect() }
    }

    /// Digit presses for every ASCII digit in `text`; anything else is dropped.
    pub fn typing(text: &str) -> Self {
        Self::pressing(text.chars().filter(char::is_ascii_digit).map(KeyPress::Digit))
    }
}

/// Keyboard poller
pub struct InputState;

impl InputState {
    pub fn new() -> Self {
        Self
    }

    /// Call once per frame. Drains macroquad's character queue.
    pub fn poll(&mut self) -> FrameInput {
        let held = Directions {
            left: Self::action_down(Action::MoveLeft),
            right: Self::action_down(Action::MoveRight),
            up: Self::action_down(Action::MoveUp),
            down: Self::action_down(Action::MoveDown),
        };

        let mut presses = Vec::new();

        // Character input (non-digits are filtered here)
        while let Some(ch) = get_char_pressed() {
            if ch.is_ascii_digit() {
                presses.push(KeyPress::Digit(ch));
            }
        }

        if Self::action_pressed(Action::EraseDigit) {
            presses.push(KeyPress::Erase);
        }
        if Self::action_pressed(Action::SubmitAnswer) {
            presses.push(KeyPress::Submit);
        }
        if Self::action_pressed(Action::Start) {
            presses.push(KeyPress::Start);
        }

        FrameInput { held, presses }
    }

    /// Check if action is currently held down
    fn action_down(action: Action) -> bool {
        action.keys().iter().any(|&key| is_key_down(key))
    }

    /// Check if action was just pressed this frame
    fn action_pressed(action: Action) -> bool {
        action.keys().iter().any(|&key| is_key_pressed(key))
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}
