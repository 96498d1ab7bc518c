//! Keyboard input
//!
//! Action-based bindings polled once per frame into a `FrameInput`.

mod actions;
mod state;

pub use actions::*;
pub use state::*;
