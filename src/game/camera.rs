//! Follow camera
//!
//! The camera is the top-left corner of the viewport in world space. It
//! centers on the explorer and is clamped so it never shows past the map
//! edges (maps smaller than the viewport pin it to the origin).

use macroquad::math::Vec2;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Camera {
    pub offset: Vec2,
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Center on `target`, clamped to [0, map - viewport] on each axis
    pub fn follow(&mut self, target: Vec2, viewport: Vec2, map_size: Vec2) {
        let wanted = target - viewport * 0.5;
        let max = map_size - viewport;
        self.offset = Vec2::new(
            wanted.x.min(max.x).max(0.0),
            wanted.y.min(max.y).max(0.0),
        );
    }

    /// World position to screen position
    pub fn to_screen(&self, world: Vec2) -> Vec2 {
        world - self.offset
    }

    /// Is a point within `margin` pixels of the viewport?
    pub fn is_visible(&self, world: Vec2, margin: f32, viewport: Vec2) -> bool {
        let screen = self.to_screen(world);
        screen.x >= -margin
            && screen.y >= -margin
            && screen.x <= viewport.x + margin
            && screen.y <= viewport.y + margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);
    const MAP: Vec2 = Vec2::new(2400.0, 1800.0);

    #[test]
    fn test_centers_on_target() {
        let mut camera = Camera::new();
        camera.follow(Vec2::new(1200.0, 900.0), VIEWPORT, MAP);
        assert_eq!(camera.offset, Vec2::new(800.0, 600.0));
        assert_eq!(camera.to_screen(Vec2::new(1200.0, 900.0)), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_clamps_to_map_bounds() {
        let mut camera = Camera::new();
        camera.follow(Vec2::new(10.0, 10.0), VIEWPORT, MAP);
        assert_eq!(camera.offset, Vec2::ZERO);

        camera.follow(Vec2::new(2390.0, 1790.0), VIEWPORT, MAP);
        assert_eq!(camera.offset, Vec2::new(1600.0, 1200.0));
    }

    #[test]
    fn test_small_map_pins_to_origin() {
        let mut camera = Camera::new();
        camera.follow(Vec2::new(300.0, 200.0), VIEWPORT, Vec2::new(400.0, 300.0));
        assert_eq!(camera.offset, Vec2::ZERO);
    }

    #[test]
    fn test_visibility_margin() {
        let camera = Camera { offset: Vec2::new(100.0, 100.0) };
        assert!(camera.is_visible(Vec2::new(100.0, 100.0), 0.0, VIEWPORT));
        assert!(!camera.is_visible(Vec2::new(80.0, 100.0), 10.0, VIEWPORT));
        assert!(camera.is_visible(Vec2::new(80.0, 100.0), 20.0, VIEWPORT));
    }
}
