//! World module - procedurally generated island terrain
//!
//! - `tile`: terrain kinds and grid cells
//! - `map`: the row-major tile grid, island generation and walkability queries

mod map;
mod tile;

pub use map::*;
pub use tile::*;
