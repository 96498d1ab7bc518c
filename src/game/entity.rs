//! Explorer, treasure chest and magic key
//!
//! Entities are plain position/state holders. Each one is a circle for
//! collision purposes; drawing lives in the renderer.

use macroquad::math::Vec2;

/// Most hearts an explorer can carry
pub const MAX_HEARTS: u32 = 3;
pub const EXPLORER_RADIUS: f32 = 20.0;
pub const TREASURE_RADIUS: f32 = 20.0;
pub const KEY_RADIUS: f32 = 15.0;

/// Anything with a circular collision footprint
pub trait Body {
    fn center(&self) -> Vec2;
    fn radius(&self) -> f32;
}

/// The player character
#[derive(Debug, Clone, PartialEq)]
pub struct Explorer {
    pub position: Vec2,
    /// Pixels per frame along each held axis
    pub speed: f32,
    pub radius: f32,
    /// Treasures claimed this session
    pub treasures: u32,
    /// Keys picked up this session
    pub keys: u32,
    /// Remaining hearts, 0..=MAX_HEARTS
    hearts: u32,
}

impl Explorer {
    pub fn new(position: Vec2, speed: f32, hearts: u32) -> Self {
        Self {
            position,
            speed,
            radius: EXPLORER_RADIUS,
            treasures: 0,
            keys: 0,
            hearts: hearts.min(MAX_HEARTS),
        }
    }

    pub fn hearts(&self) -> u32 {
        self.hearts
    }

    #[cfg(test)]
    pub fn set_hearts(&mut self, hearts: u32) {
        self.hearts = hearts.min(MAX_HEARTS);
    }

    /// Take one heart away. Returns true if that was the last one.
    pub fn lose_heart(&mut self) -> bool {
        self.hearts = self.hearts.saturating_sub(1);
        self.hearts == 0
    }
}

impl Body for Explorer {
    fn center(&self) -> Vec2 {
        self.position
    }

    fn radius(&self) -> f32 {
        self.radius
    }
}

/// The chest guarding the current riddle
#[derive(Debug, Clone, PartialEq)]
pub struct Treasure {
    pub position: Vec2,
    pub radius: f32,
}

impl Treasure {
    pub fn new(position: Vec2) -> Self {
        Self { position, radius: TREASURE_RADIUS }
    }

    /// Move the chest somewhere new after it has been claimed
    pub fn reset(&mut self, position: Vec2) {
        self.position = position;
    }
}

impl Body for Treasure {
    fn center(&self) -> Vec2 {
        self.position
    }

    fn radius(&self) -> f32 {
        self.radius
    }
}

/// The key that unlocks the chest
#[derive(Debug, Clone, PartialEq)]
pub struct Key {
    pub position: Vec2,
    pub radius: f32,
    pub collected: bool,
}

impl Key {
    pub fn new(position: Vec2) -> Self {
        Self { position, radius: KEY_RADIUS, collected: false }
    }

    /// Put the key back on the map, uncollected
    pub fn reset(&mut self, position: Vec2) {
        self.position = position;
        self.collected = false;
    }
}

impl Body for Key {
    fn center(&self) -> Vec2 {
        self.position
    }

    fn radius(&self) -> f32 {
        self.radius
    }
}
