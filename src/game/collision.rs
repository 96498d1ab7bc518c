//! Collision System
//!
//! Two kinds of collision:
//! - Entity vs entity: circle-circle overlap test
//! - Explorer vs terrain: look-ahead tile test. The candidate position is
//!   computed from the held directions and accepted only if the tile under
//!   it is walkable; otherwise the explorer stays put for this frame.

use macroquad::math::Vec2;
use crate::input::Directions;
use crate::world::TileMap;
use super::entity::Body;

/// Do two bodies overlap? Touching circles don't count.
pub fn collides(a: &impl Body, b: &impl Body) -> bool {
    a.center().distance(b.center()) < a.radius() + b.radius()
}

/// Result of a movement step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveResult {
    /// Position after the step (unchanged if blocked)
    pub position: Vec2,
    /// The candidate landed on water, rock or off the map
    pub blocked: bool,
}

/// Step a body of `radius` across the map.
///
/// Each axis only steps while the body is still inside
/// [radius, extent - radius] in the direction of travel, and the candidate
/// is clamped to [0, extent]. Both axes are tested together: the combined
/// candidate is accepted or rejected as a whole.
///
/// Diagonals are not normalized unless asked, so by default moving
/// diagonally covers `speed` on both axes.
pub fn step_on_map(
    map: &TileMap,
    position: Vec2,
    radius: f32,
    speed: f32,
    held: Directions,
    normalize_diagonal: bool,
) -> MoveResult {
    let step = if normalize_diagonal && held.is_diagonal() {
        speed * std::f32::consts::FRAC_1_SQRT_2
    } else {
        speed
    };

    let mut candidate = position;
    if held.left && position.x > radius {
        candidate.x = (candidate.x - step).max(0.0);
    }
    if held.right && position.x < map.width() - radius {
        candidate.x = (candidate.x + step).min(map.width());
    }
    if held.up && position.y > radius {
        candidate.y = (candidate.y - step).max(0.0);
    }
    if held.down && position.y < map.height() - radius {
        candidate.y = (candidate.y + step).min(map.height());
    }

    if candidate == position {
        return MoveResult { position, blocked: false };
    }

    if map.is_walkable(candidate) {
        MoveResult { position: candidate, blocked: false }
    } else {
        MoveResult { position, blocked: true }
    }
}
