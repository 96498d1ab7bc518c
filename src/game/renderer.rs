//! Game Renderer
//!
//! Draws the current `GameController` state through a `RenderContext`.
//! Rendering only reads the controller, so drawing the same state twice
//! yields the same picture.

use macroquad::color::Color;
use macroquad::math::Vec2;
use crate::ui::{
    self, wrap_text, Canvas, Rect, RenderContext, CHEST_WOOD, EXPLORER_BODY, EXPLORER_SKIN,
    GOLD, TEXT_COLOR, TEXT_DARK,
};
use crate::world::TileMap;
use super::camera::Camera;
use super::challenge::ChallengeOutcome;
use super::entity::{Explorer, Key, Treasure};
use super::runtime::{ChallengeRound, GameController, GameState, Session};

/// Distance from the top of a line of text to its baseline, per unit of size
const ASCENT: f32 = 0.75;

/// Size of the black panel behind the HUD text
const HUD_PANEL: Rect = Rect::new(0.0, 0.0, 200.0, 190.0);
const HUD_LINE_HEIGHT: f32 = 30.0;

const MENU_INSTRUCTIONS: [&str; 4] = [
    "Use arrow keys to guide your explorer",
    "Find magical keys to unlock ancient treasures",
    "Solve mysterious riddles to claim your rewards!",
    "Explore the larger world with multiple islands!",
];

/// Draw one frame for the controller's current state
pub fn draw<C: Canvas>(controller: &GameController, ctx: &mut RenderContext<C>) {
    let session = controller.session();
    match &session.state {
        GameState::Menu => draw_menu(ctx),
        GameState::Playing => {
            draw_world(session, ctx);
            session.minimap.draw(ctx, &session.camera, &session.explorer, &session.treasure, &session.key);
            draw_hud(session, ctx);
        }
        GameState::Challenge(round) => {
            draw_tiles(&session.map, &session.camera, ctx);
            let screen = ctx.screen();
            ctx.canvas.fill_rect(screen, ui::CHALLENGE_OVERLAY);
            draw_challenge(round, session.last_result, ctx);
        }
        GameState::GameOver => {
            draw_tiles(&session.map, &session.camera, ctx);
            let screen = ctx.screen();
            ctx.canvas.fill_rect(screen, ui::GAME_OVER_OVERLAY);
            draw_game_over(session, ctx);
        }
    }
}

/// Centered text whose top edge sits at `top`
fn centered_line<C: Canvas>(ctx: &mut RenderContext<C>, text: &str, top: f32, size: f32, color: Color) {
    ctx.centered_text(text, top + size * ASCENT, size, color);
}

// =============================================================================
// World
// =============================================================================

/// Terrain, chest, key and explorer
fn draw_world<C: Canvas>(session: &Session, ctx: &mut RenderContext<C>) {
    draw_tiles(&session.map, &session.camera, ctx);
    draw_treasure(&session.treasure, &session.camera, ctx);
    draw_key(&session.key, &session.camera, ctx);
    draw_explorer(&session.explorer, &session.camera, ctx);
}

/// Only the tiles that overlap the viewport are drawn
fn draw_tiles<C: Canvas>(map: &TileMap, camera: &Camera, ctx: &mut RenderContext<C>) {
    let size = map.tile_size();
    let first_column = (camera.offset.x / size).floor().max(0.0) as usize;
    let first_row = (camera.offset.y / size).floor().max(0.0) as usize;
    let last_column = (((camera.offset.x + ctx.viewport.x) / size).ceil() as usize).min(map.columns());
    let last_row = (((camera.offset.y + ctx.viewport.y) / size).ceil() as usize).min(map.rows());

    let tiles = map.tiles();
    for row in first_row..last_row {
        for column in first_column..last_column {
            let tile = &tiles[row * map.columns() + column];
            let screen = camera.to_screen(tile.position);
            ctx.canvas.fill_rect(
                Rect::new(screen.x, screen.y, tile.size, tile.size),
                ui::tile_color(tile.kind),
            );
        }
    }
}

fn draw_treasure<C: Canvas>(treasure: &Treasure, camera: &Camera, ctx: &mut RenderContext<C>) {
    let r = treasure.radius;
    if !camera.is_visible(treasure.position, r * 2.0, ctx.viewport) {
        return;
    }
    let pos = camera.to_screen(treasure.position);
    let (w, h) = (r * 2.0, r * 1.5);

    let base = Rect::new(pos.x - w * 0.5, pos.y - h * 0.5, w, h);
    let lid = Rect::new(base.x, base.y - 5.0, w, h / 3.0);
    let canvas = &mut ctx.canvas;
    canvas.fill_rect(base, CHEST_WOOD);
    canvas.fill_rect(lid, CHEST_WOOD);
    canvas.stroke_rect(base, 2.0, GOLD);
    canvas.stroke_rect(lid, 2.0, GOLD);
    // Lock
    canvas.fill_rect(Rect::new(pos.x - 5.0, base.y - 3.0, 10.0, 8.0), GOLD);
}

fn draw_key<C: Canvas>(key: &Key, camera: &Camera, ctx: &mut RenderContext<C>) {
    let r = key.radius;
    if key.collected || !camera.is_visible(key.position, r * 2.0, ctx.viewport) {
        return;
    }
    let pos = camera.to_screen(key.position);
    let canvas = &mut ctx.canvas;
    canvas.fill_circle(pos, r * 0.5, GOLD);
    // Shaft and two teeth
    canvas.fill_rect(Rect::new(pos.x, pos.y, r, r * 0.25), GOLD);
    canvas.fill_rect(Rect::new(pos.x + r, pos.y - r * 0.25, r * 0.25, r * 0.5), GOLD);
    canvas.fill_rect(Rect::new(pos.x + r * 0.7, pos.y - r * 0.25, r * 0.25, r * 0.5), GOLD);
}

fn draw_explorer<C: Canvas>(explorer: &Explorer, camera: &Camera, ctx: &mut RenderContext<C>) {
    let r = explorer.radius;
    let pos = camera.to_screen(explorer.position);
    let head = Vec2::new(pos.x, pos.y - r - 5.0);
    let canvas = &mut ctx.canvas;
    canvas.fill_circle(pos, r, EXPLORER_BODY);
    canvas.fill_circle(head, r * 0.5, EXPLORER_SKIN);
    canvas.fill_circle(Vec2::new(head.x - 5.0, head.y), 3.0, TEXT_DARK);
    canvas.fill_circle(Vec2::new(head.x + 5.0, head.y), 3.0, TEXT_DARK);
}

// =============================================================================
// Screens
// =============================================================================

fn draw_hud<C: Canvas>(session: &Session, ctx: &mut RenderContext<C>) {
    let size = ctx.fonts.small;
    let lines = [
        format!("Adventure Points: {}", session.adventure_points),
        format!("Explorer Rank: {}", session.rank()),
        format!("Treasures: {}", session.explorer.treasures),
        format!("Hearts: {}", session.explorer.hearts()),
        format!("Magic Key: {}", if session.key.collected { "Yes" } else { "No" }),
        format!(
            "Location: ({}, {})",
            session.explorer.position.x as i32,
            session.explorer.position.y as i32
        ),
    ];

    ctx.canvas.fill_rect(HUD_PANEL, ui::BACKGROUND);
    for (i, line) in lines.iter().enumerate() {
        let top = 10.0 + i as f32 * HUD_LINE_HEIGHT;
        ctx.canvas.text(line, 10.0, top + size * ASCENT, size, TEXT_COLOR);
    }
}

fn draw_menu<C: Canvas>(ctx: &mut RenderContext<C>) {
    let h = ctx.viewport.y;
    let fonts = ctx.fonts;

    centered_line(ctx, "Treasure Hunter Adventure", h / 4.0, fonts.large, GOLD);
    centered_line(ctx, "Press SPACE to start your adventure!", h / 2.0, fonts.medium, TEXT_COLOR);

    let mut top = (h * 2.0 / 3.0).floor();
    for line in MENU_INSTRUCTIONS {
        centered_line(ctx, line, top, fonts.small, TEXT_COLOR);
        top += 40.0;
    }
}

/// Feedback for the previous attempt at this chest
fn result_message(outcome: ChallengeOutcome) -> Option<&'static str> {
    match outcome {
        ChallengeOutcome::Correct => None,
        ChallengeOutcome::Wrong => Some("Not quite! You lost a heart. Try this one:"),
        ChallengeOutcome::TimedOut => Some("Time ran out! You lost a heart. Try this one:"),
    }
}

/// Parchment scroll with the riddle, the answer box and the timer
fn draw_challenge<C: Canvas>(
    round: &ChallengeRound,
    last_result: Option<ChallengeOutcome>,
    ctx: &mut RenderContext<C>,
) {
    let (w, h) = (ctx.viewport.x, ctx.viewport.y);
    let fonts = ctx.fonts;
    let scroll = Rect::centered_in(ctx.screen(), (w * 2.0 / 3.0).floor(), (h * 2.0 / 3.0).floor());

    ctx.canvas.fill_rect(scroll, ui::PARCHMENT);
    ctx.canvas.stroke_rect(scroll, 5.0, ui::PARCHMENT_EDGE);
    ctx.canvas.fill_circle(Vec2::new(scroll.center_x(), scroll.y + 20.0), 10.0, ui::PARCHMENT_EDGE);
    ctx.canvas.fill_circle(Vec2::new(scroll.center_x(), scroll.bottom() - 20.0), 10.0, ui::PARCHMENT_EDGE);

    centered_line(ctx, "Ancient Riddle!", h / 4.0, fonts.medium, CHEST_WOOD);

    let lines = wrap_text(&round.challenge.prompt, scroll.w - 40.0, |s| {
        ctx.canvas.measure_text(s, fonts.small)
    });
    let mut top = (h / 3.0).floor();
    for line in &lines {
        centered_line(ctx, line, top, fonts.small, TEXT_DARK);
        top += 30.0;
    }

    // Answer box with a blinking cursor after the digits
    let answer_box = Rect::new((w / 3.0).floor(), (h * 2.0 / 3.0).floor() - 40.0, (w / 3.0).floor(), 40.0);
    ctx.canvas.fill_rect(answer_box, ui::ANSWER_BG);
    ctx.canvas.stroke_rect(answer_box, 2.0, CHEST_WOOD);
    let answer = round.answer.as_str();
    let answer_width = ctx.canvas.measure_text(answer, fonts.small);
    let answer_x = answer_box.center_x() - answer_width * 0.5;
    let baseline = answer_box.y + 10.0 + fonts.small * ASCENT;
    ctx.canvas.text(answer, answer_x, baseline, fonts.small, TEXT_DARK);
    if round.answer.cursor_visible() {
        let cursor = Rect::new(answer_x + answer_width + 2.0, answer_box.y + 8.0, 2.0, answer_box.h - 16.0);
        ctx.canvas.fill_rect(cursor, TEXT_DARK);
    }

    if let Some(message) = last_result.and_then(result_message) {
        centered_line(ctx, message, answer_box.bottom() + 8.0, fonts.small, ui::RESULT_WRONG);
    }

    let timer = Rect::new(scroll.x, scroll.bottom() - 30.0, scroll.w, 10.0)
        .left_fraction(round.challenge.time_fraction());
    ctx.canvas.fill_rect(timer, ui::PARCHMENT_EDGE);

    centered_line(ctx, "Write your answer and press ENTER", (h * 5.0 / 6.0).floor(), fonts.small, TEXT_COLOR);
}

fn draw_game_over<C: Canvas>(session: &Session, ctx: &mut RenderContext<C>) {
    let h = ctx.viewport.y;
    let fonts = ctx.fonts;

    centered_line(ctx, "Adventure Complete!", h / 4.0, fonts.large, GOLD);
    let summary = [
        format!("Final Adventure Points: {}", session.adventure_points),
        format!("Treasures Discovered: {}", session.explorer.treasures),
        format!("Explorer Rank: {}", session.rank()),
    ];
    for (i, line) in summary.iter().enumerate() {
        centered_line(ctx, line, h / 2.0 - 40.0 + i as f32 * 50.0, fonts.medium, TEXT_COLOR);
    }
    centered_line(ctx, "Press SPACE to start a new adventure", h * 3.0 / 4.0, fonts.medium, TEXT_COLOR);
}
