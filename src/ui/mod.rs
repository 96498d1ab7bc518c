//! Screen drawing support
//!
//! - `rect`: rectangle math for layout
//! - `theme`: colors and font sizes
//! - `canvas`: the drawing seam (`Canvas`) and the `RenderContext`
//! - `text_input`: the numeric answer field

mod rect;
mod theme;
mod canvas;
mod text_input;

pub use rect::*;
pub use theme::*;
pub use canvas::*;
pub use text_input::*;
