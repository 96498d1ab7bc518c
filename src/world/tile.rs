//! Terrain tiles
//!
//! One cell of the island grid. Tiles are created as water and painted over
//! by the generator; after generation they never change.

use macroquad::math::Vec2;

/// Terrain type of a single tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileKind {
    Water,
    Sand,
    Grass,
    Forest,
    Rock,
}

impl TileKind {
    pub const ALL: [TileKind; 5] = [
        TileKind::Water,
        TileKind::Sand,
        TileKind::Grass,
        TileKind::Forest,
        TileKind::Rock,
    ];

    /// Can the explorer stand on this tile?
    pub fn is_walkable(self) -> bool {
        !matches!(self, TileKind::Water | TileKind::Rock)
    }
}

/// A square cell of the world grid, positioned by its top-left corner in
/// world pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    pub kind: TileKind,
    pub position: Vec2,
    pub size: f32,
}

impl Tile {
    pub fn new(kind: TileKind, position: Vec2, size: f32) -> Self {
        Self { kind, position, size }
    }

    /// World position of the tile's center
    pub fn center(&self) -> Vec2 {
        self.position + Vec2::splat(self.size * 0.5)
    }

    pub fn is_walkable(&self) -> bool {
        self.kind.is_walkable()
    }
}
