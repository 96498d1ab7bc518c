//! Rectangle type for screen layout

/// A rectangle defined by position and size
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Create from screen dimensions
    pub fn screen(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// A `w` x `h` rectangle centered inside `outer`
    pub fn centered_in(outer: Rect, w: f32, h: f32) -> Self {
        Self::new(outer.center_x() - w * 0.5, outer.center_y() - h * 0.5, w, h)
    }

    /// Bottom edge
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Center X
    pub fn center_x(&self) -> f32 {
        self.x + self.w * 0.5
    }

    /// Center Y
    pub fn center_y(&self) -> f32 {
        self.y + self.h * 0.5
    }

    /// Same size, moved by (dx, dy)
    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.w, self.h)
    }

    /// Keep the left part, `ratio` (0.0 - 1.0) of the width
    pub fn left_fraction(&self, ratio: f32) -> Self {
        Self::new(self.x, self.y, self.w * ratio.clamp(0.0, 1.0), self.h)
    }
}
