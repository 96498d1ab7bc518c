//! Drawing surface and render context
//!
//! Everything the game draws goes through the `Canvas` trait: filled and
//! outlined rectangles, filled circles and text. `MacroquadCanvas` draws to
//! the window. The `RenderContext` bundles a canvas with the fixed viewport
//! size and font sizes; it is built once at startup and handed to every draw
//! function, so nothing renders through global state.

use macroquad::prelude::{
    draw_circle, draw_rectangle, draw_rectangle_lines, draw_text, measure_text, Color, Vec2,
};
use super::rect::Rect;
use super::theme;

/// Drawing primitives
pub trait Canvas {
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn stroke_rect(&mut self, rect: Rect, thickness: f32, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    /// Draw text with its baseline at `y`
    fn text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color);
    /// Rendered width of `text` at `size`
    fn measure_text(&self, text: &str, size: f32) -> f32;
}

/// Canvas backed by macroquad's immediate-mode drawing
#[derive(Debug, Clone, Copy, Default)]
pub struct MacroquadCanvas;

impl Canvas for MacroquadCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        draw_rectangle(rect.x, rect.y, rect.w, rect.h, color);
    }

    fn stroke_rect(&mut self, rect: Rect, thickness: f32, color: Color) {
        draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, thickness, color);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        draw_circle(center.x, center.y, radius, color);
    }

    fn text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color) {
        draw_text(text, x, y, size, color);
    }

    fn measure_text(&self, text: &str, size: f32) -> f32 {
        measure_text(text, None, size as u16, 1.0).width
    }
}

/// Text sizes used by the screens
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSizes {
    pub large: f32,
    pub medium: f32,
    pub small: f32,
}

impl Default for FontSizes {
    fn default() -> Self {
        Self {
            large: theme::FONT_SIZE_LARGE,
            medium: theme::FONT_SIZE_MEDIUM,
            small: theme::FONT_SIZE_SMALL,
        }
    }
}

/// Rendering state shared by all draw functions
pub struct RenderContext<C: Canvas = MacroquadCanvas> {
    pub canvas: C,
    /// Window size in pixels
    pub viewport: Vec2,
    pub fonts: FontSizes,
}

impl<C: Canvas> RenderContext<C> {
    pub fn new(canvas: C, viewport: Vec2) -> Self {
        Self { canvas, viewport, fonts: FontSizes::default() }
    }

    /// The whole window as a rectangle
    pub fn screen(&self) -> Rect {
        Rect::screen(self.viewport.x, self.viewport.y)
    }

    /// Draw a line of text horizontally centered on the window
    pub fn centered_text(&mut self, text: &str, y: f32, size: f32, color: Color) {
        let width = self.canvas.measure_text(text, size);
        let x = (self.viewport.x - width) * 0.5;
        self.canvas.text(text, x, y, size, color);
    }
}

/// Greedy word wrap: break `text` into lines no wider than `max_width`.
///
/// A single word wider than the budget gets a line to itself.
pub fn wrap_text(text: &str, max_width: f32, measure: impl Fn(&str) -> f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{} {}", current, word);
        if measure(&candidate) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
