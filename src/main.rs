//! Treasure Hunter: a top-down island treasure hunt
//!
//! Explore a generated archipelago, pick up the magic key, reach the chest
//! and answer its riddle before time runs out. Wrong answers and timeouts
//! cost a heart; every fifth treasure raises the explorer's rank.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod config;
mod game;
mod input;
mod ui;
mod world;

use macroquad::logging::{info, warn};
use macroquad::prelude::*;
use config::GameConfig;
use game::{GameController, GameEvent, SCREEN_HEIGHT, SCREEN_WIDTH};
use input::InputState;
use ui::{MacroquadCanvas, RenderContext};

fn window_conf() -> Conf {
    Conf {
        window_title: "Treasure Hunter Adventure".to_owned(),
        window_width: SCREEN_WIDTH as i32,
        window_height: SCREEN_HEIGHT as i32,
        window_resizable: false,
        ..Default::default()
    }
}

/// Seed for this run: the configured one, else the clock
fn run_seed(config: &GameConfig) -> u64 {
    config
        .seed
        .unwrap_or_else(|| (macroquad::miniquad::date::now() * 1000.0) as u64)
}

fn log_event(event: GameEvent) {
    match event {
        GameEvent::AdventureStarted => info!("Adventure started"),
        GameEvent::KeyCollected => info!("Magic key collected"),
        GameEvent::ChallengeStarted(kind) => info!("Riddle: {:?}", kind),
        GameEvent::ChallengeResolved(outcome) => info!("Riddle outcome: {:?}", outcome),
        GameEvent::RankUp(rank) => info!("Rank up: {}", rank),
        GameEvent::GameOver { points, treasures } => {
            info!("Game over: {} points, {} treasures", points, treasures)
        }
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    info!("=== Treasure Hunter v{} ===", VERSION);

    let config = GameConfig::load_or_default();
    match config.to_ron() {
        Ok(text) => info!("Effective config:\n{}", text),
        Err(e) => warn!("Could not print config: {}", e),
    }
    let seed = run_seed(&config);
    let fps_limit = config.target_fps;
    info!("Frame limit: {}", fps_limit.label());

    let mut controller = GameController::new(config, seed);
    let mut input = InputState::new();
    let mut ctx = RenderContext::new(MacroquadCanvas, controller.viewport());

    loop {
        // Track frame start time for FPS limiting
        let frame_start = get_time();

        let frame_input = input.poll();
        let previous = controller.state().name();
        controller.frame(&frame_input);
        let current = controller.state().name();
        if previous != current {
            info!("State: {} -> {}", previous, current);
        }
        for event in controller.drain_events() {
            log_event(event);
        }

        clear_background(ui::BACKGROUND);
        game::draw(&controller, &mut ctx);

        game::limit_frame_rate(fps_limit, frame_start, get_time);
        next_frame().await;
    }
}
