//! Game Module
//!
//! The adventure itself, independent of the window:
//! - `entity`: explorer, chest and key
//! - `collision`: circle overlap and tile-aware movement
//! - `challenge`: riddle generation, checking and rank tracking
//! - `camera`: viewport that follows the explorer
//! - `minimap`: scaled-down map overlay
//! - `event`: per-frame event queue
//! - `runtime`: the `GameController` state machine
//! - `renderer`: draws a controller through a `RenderContext`

pub mod entity;
pub mod collision;
pub mod challenge;
pub mod camera;
pub mod minimap;
pub mod event;
pub mod runtime;
pub mod renderer;

// Re-export main types
pub use entity::MAX_HEARTS;
pub use event::GameEvent;
pub use runtime::{limit_frame_rate, FpsLimit, GameController, SCREEN_HEIGHT, SCREEN_WIDTH};
pub use renderer::draw;
