//! Minimap overlay
//!
//! The terrain layer is built once per map: every tile is scaled down to the
//! minimap and horizontal runs of the same terrain are merged into a single
//! rectangle. Markers for the viewport, the explorer, the chest and the key
//! are drawn on top each frame.

use macroquad::math::Vec2;
use crate::ui::{tile_color, Canvas, Rect, RenderContext, GOLD, EXPLORER_BODY, TEXT_COLOR, BACKGROUND};
use crate::world::{TileKind, TileMap};
use super::camera::Camera;
use super::entity::{Explorer, Key, Treasure};

/// Default edge length in pixels
pub const MINIMAP_SIZE: f32 = 150.0;
/// Gap between the minimap and the window's top-right corner
const MARGIN: f32 = 10.0;

/// One merged run of terrain, in minimap-local pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinimapCell {
    pub rect: Rect,
    pub kind: TileKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Minimap {
    size: f32,
    /// World pixels to minimap pixels, per axis
    scale: Vec2,
    cells: Vec<MinimapCell>,
}

impl Minimap {
    pub fn new(map: &TileMap, size: f32) -> Self {
        let scale = Vec2::new(
            size / map.width().max(1.0),
            size / map.height().max(1.0),
        );
        let cell_w = (map.tile_size() * scale.x).max(1.0);
        let cell_h = (map.tile_size() * scale.y).max(1.0);

        let mut cells = Vec::new();
        for row in map.tiles().chunks(map.columns().max(1)) {
            let mut run: Option<MinimapCell> = None;
            for tile in row {
                let x = tile.position.x * scale.x;
                let y = tile.position.y * scale.y;
                match run.as_mut() {
                    Some(cell) if cell.kind == tile.kind => {
                        cell.rect.w = x + cell_w - cell.rect.x;
                    }
                    _ => {
                        cells.extend(run.take());
                        run = Some(MinimapCell {
                            rect: Rect::new(x, y, cell_w, cell_h),
                            kind: tile.kind,
                        });
                    }
                }
            }
            cells.extend(run);
        }

        Self { size, scale, cells }
    }

    /// Top-left corner on screen: pinned to the top-right of the window
    pub fn origin(&self, viewport: Vec2) -> Vec2 {
        Vec2::new(viewport.x - self.size - MARGIN, MARGIN)
    }

    /// World position to minimap-local pixels
    pub fn project(&self, world: Vec2) -> Vec2 {
        world * self.scale
    }

    pub fn draw<C: Canvas>(
        &self,
        ctx: &mut RenderContext<C>,
        camera: &Camera,
        explorer: &Explorer,
        treasure: &Treasure,
        key: &Key,
    ) {
        let origin = self.origin(ctx.viewport);
        let canvas = &mut ctx.canvas;

        canvas.fill_rect(Rect::new(origin.x, origin.y, self.size, self.size), BACKGROUND);
        for cell in &self.cells {
            canvas.fill_rect(cell.rect.offset(origin.x, origin.y), tile_color(cell.kind));
        }

        // Viewport outline
        let view = self.project(camera.offset) + origin;
        let view_size = self.project(ctx.viewport);
        canvas.stroke_rect(Rect::new(view.x, view.y, view_size.x, view_size.y), 1.0, TEXT_COLOR);

        let explorer_dot = self.project(explorer.position) + origin;
        canvas.fill_circle(explorer_dot, 3.0, EXPLORER_BODY);

        let chest = self.project(treasure.position) + origin;
        canvas.fill_rect(Rect::new(chest.x - 2.0, chest.y - 2.0, 4.0, 4.0), GOLD);

        if !key.collected {
            let key_dot = self.project(key.position) + origin;
            canvas.fill_circle(key_dot, 2.0, TEXT_COLOR);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::recording::{DrawCommand, RecordingCanvas};

    #[test]
    fn test_uniform_map_merges_rows() {
        let map = TileMap::filled(300, 300, 30, TileKind::Water);
        let minimap = Minimap::new(&map, MINIMAP_SIZE);

        // One run per row, each spanning the full width
        assert_eq!(minimap.cells.len(), map.rows());
        for cell in &minimap.cells {
            assert_eq!(cell.kind, TileKind::Water);
            assert!((cell.rect.w - MINIMAP_SIZE).abs() < 1e-3);
        }
    }

    #[test]
    fn test_runs_split_on_terrain_change() {
        let mut map = TileMap::filled(300, 300, 30, TileKind::Water);
        if let Some(tile) = map.tile_mut(4, 0) {
            tile.kind = TileKind::Sand;
        }
        let minimap = Minimap::new(&map, MINIMAP_SIZE);

        let first_row: Vec<_> = minimap.cells.iter().filter(|c| c.rect.y == 0.0).collect();
        assert_eq!(first_row.len(), 3);
        assert_eq!(first_row[1].kind, TileKind::Sand);
        assert!((first_row[1].rect.x - 60.0).abs() < 1e-3);
        assert!((first_row[1].rect.w - 15.0).abs() < 1e-3);
    }

    #[test]
    fn test_tiny_tiles_keep_one_pixel() {
        // 3000px map with 10px tiles scales each tile to 0.5px
        let map = TileMap::filled(3000, 3000, 10, TileKind::Grass);
        let minimap = Minimap::new(&map, MINIMAP_SIZE);
        assert!(minimap.cells.iter().all(|c| c.rect.h >= 1.0));
    }

    #[test]
    fn test_collected_key_is_hidden() {
        let map = TileMap::filled(2400, 1800, 30, TileKind::Grass);
        let minimap = Minimap::new(&map, MINIMAP_SIZE);
        let explorer = Explorer::new(Vec2::new(100.0, 100.0), 5.0, 3);
        let treasure = Treasure::new(Vec2::new(500.0, 500.0));
        let mut key = Key::new(Vec2::new(900.0, 900.0));
        let camera = Camera::new();

        let count_key_dots = |ctx: &RenderContext<RecordingCanvas>| {
            ctx.canvas
                .commands
                .iter()
                .filter(|c| matches!(c, DrawCommand::FillCircle(_, r, _) if *r == 2.0))
                .count()
        };

        let mut ctx = RenderContext::new(RecordingCanvas::default(), Vec2::new(800.0, 600.0));
        minimap.draw(&mut ctx, &camera, &explorer, &treasure, &key);
        assert_eq!(count_key_dots(&ctx), 1);

        key.collected = true;
        let mut ctx = RenderContext::new(RecordingCanvas::default(), Vec2::new(800.0, 600.0));
        minimap.draw(&mut ctx, &camera, &explorer, &treasure, &key);
        assert_eq!(count_key_dots(&ctx), 0);
    }

    #[test]
    fn test_origin_top_right() {
        let map = TileMap::filled(2400, 1800, 30, TileKind::Water);
        let minimap = Minimap::new(&map, MINIMAP_SIZE);
        assert_eq!(minimap.origin(Vec2::new(800.0, 600.0)), Vec2::new(640.0, 10.0));
    }
}
