//! Numeric answer field for the riddle scroll
//!
//! Only ASCII digits are accepted and the field holds at most
//! `MAX_ANSWER_DIGITS` of them. The cursor sits at the end of the text and
//! blinks on a frame counter rather than wall time, so the field behaves
//! the same in tests as on screen.

/// Longest answer the field accepts
pub const MAX_ANSWER_DIGITS: usize = 6;

/// Frames per cursor blink cycle (on for half, off for half)
const BLINK_FRAMES: u32 = 60;

/// State for the answer field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerInput {
    text: String,
    blink_timer: u32,
}

impl AnswerInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a digit. Returns false (and changes nothing) for non-digits
    /// or when the field is full.
    pub fn insert_digit(&mut self, ch: char) -> bool {
        if !ch.is_ascii_digit() || self.text.len() >= MAX_ANSWER_DIGITS {
            return false;
        }
        self.text.push(ch);
        self.blink_timer = 0;
        true
    }

    /// Remove the last digit, if any
    pub fn backspace(&mut self) {
        if self.text.pop().is_some() {
            self.blink_timer = 0;
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Advance the cursor blink by one frame
    pub fn tick_blink(&mut self) {
        self.blink_timer = (self.blink_timer + 1) % BLINK_FRAMES;
    }

    pub fn cursor_visible(&self) -> bool {
        self.blink_timer < BLINK_FRAMES / 2
    }
}
