//! UI Theme - Shared colors and styling constants
//!
//! Centralized color definitions for the map, the entities and the screens.

use macroquad::prelude::Color;
use crate::world::TileKind;

// =============================================================================
// Terrain
// =============================================================================

pub const WATER: Color = Color::new(0.255, 0.412, 0.882, 1.0); // ~65, 105, 225
pub const SAND: Color = Color::new(0.957, 0.843, 0.694, 1.0); // ~244, 215, 177
pub const GRASS: Color = Color::new(0.486, 0.988, 0.0, 1.0); // ~124, 252, 0
pub const FOREST: Color = Color::new(0.0, 0.392, 0.0, 1.0); // ~0, 100, 0
pub const ROCK: Color = Color::new(0.502, 0.502, 0.502, 1.0); // ~128, 128, 128

/// Fill color for a terrain tile
pub fn tile_color(kind: TileKind) -> Color {
    match kind {
        TileKind::Water => WATER,
        TileKind::Sand => SAND,
        TileKind::Grass => GRASS,
        TileKind::Forest => FOREST,
        TileKind::Rock => ROCK,
    }
}

// =============================================================================
// Entities
// =============================================================================

/// Explorer body (cornflower blue)
pub const EXPLORER_BODY: Color = Color::new(0.392, 0.584, 0.929, 1.0); // ~100, 149, 237
pub const EXPLORER_SKIN: Color = Color::new(1.0, 0.835, 0.667, 1.0); // ~255, 213, 170
pub const CHEST_WOOD: Color = Color::new(0.545, 0.271, 0.075, 1.0); // ~139, 69, 19
pub const GOLD: Color = Color::new(1.0, 0.843, 0.0, 1.0); // ~255, 215, 0

// =============================================================================
// Screens
// =============================================================================

pub const BACKGROUND: Color = Color::new(0.0, 0.0, 0.0, 1.0);
pub const TEXT_COLOR: Color = Color::new(1.0, 1.0, 1.0, 1.0);
pub const TEXT_DARK: Color = Color::new(0.0, 0.0, 0.0, 1.0);

/// Dims the map behind the riddle scroll
pub const CHALLENGE_OVERLAY: Color = Color::new(0.0, 0.0, 0.0, 0.706); // alpha ~180
/// Dims the map behind the game over summary
pub const GAME_OVER_OVERLAY: Color = Color::new(0.0, 0.0, 0.0, 0.784); // alpha ~200

pub const PARCHMENT: Color = Color::new(0.957, 0.890, 0.737, 1.0); // ~244, 227, 188
pub const PARCHMENT_EDGE: Color = Color::new(0.776, 0.663, 0.357, 1.0); // ~198, 169, 91
pub const ANSWER_BG: Color = Color::new(1.0, 1.0, 1.0, 1.0);

/// Previous attempt feedback on the scroll
pub const RESULT_WRONG: Color = Color::new(0.7, 0.1, 0.1, 1.0);

// =============================================================================
// Font Sizes
// =============================================================================

/// Title text size
pub const FONT_SIZE_LARGE: f32 = 48.0;

/// Headline / prompt text size
pub const FONT_SIZE_MEDIUM: f32 = 32.0;

/// HUD and body text size
pub const FONT_SIZE_SMALL: f32 = 24.0;
