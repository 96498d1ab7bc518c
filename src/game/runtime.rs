//! Game Runtime
//!
//! `GameController` owns one adventure (`Session`) and advances it one frame
//! at a time from a `FrameInput`. It never touches the window: the main loop
//! polls input, calls `frame`, then hands the controller to the renderer.
//!
//! State machine:
//! - Menu --space--> Playing
//! - Playing --key collected, then chest reached--> Challenge
//! - Challenge --correct--> Playing (chest and key move)
//! - Challenge --wrong or timeout, hearts left--> Challenge (new riddle)
//! - Challenge --wrong or timeout, last heart--> GameOver
//! - GameOver --space--> Playing (fresh session)

use macroquad::logging::{info, warn};
use macroquad::math::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use crate::config::GameConfig;
use crate::input::{FrameInput, KeyPress};
use crate::ui::AnswerInput;
use crate::world::TileMap;
use super::camera::Camera;
use super::challenge::{Challenge, ChallengeGenerator, ChallengeOutcome};
use super::collision::{collides, step_on_map};
use super::entity::{Explorer, Key, Treasure};
use super::event::{EventQueue, GameEvent};
use super::minimap::Minimap;

/// Window size in pixels. The map is a multiple of this.
pub const SCREEN_WIDTH: u32 = 800;
pub const SCREEN_HEIGHT: u32 = 600;

/// FPS limit setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FpsLimit {
    Fps30,
    /// Matches the simulation tick rate
    #[default]
    Fps60,
    /// Unlocked (as fast as possible)
    Unlocked,
}

impl FpsLimit {
    /// Get the target frame time in seconds (None = unlocked)
    pub fn frame_time(&self) -> Option<f64> {
        match self {
            FpsLimit::Fps30 => Some(1.0 / 30.0),
            FpsLimit::Fps60 => Some(1.0 / 60.0),
            FpsLimit::Unlocked => None,
        }
    }

    /// Display name
    pub fn label(&self) -> &'static str {
        match self {
            FpsLimit::Fps30 => "30",
            FpsLimit::Fps60 => "60",
            FpsLimit::Unlocked => "Unlocked",
        }
    }
}

/// Block until `frame_start + limit` has passed.
///
/// Native: sleep for the bulk, then spin for the last couple of
/// milliseconds. Web: busy-wait, the browser paces frames anyway.
pub fn limit_frame_rate(limit: FpsLimit, frame_start: f64, now: impl Fn() -> f64) {
    let Some(target_frame_time) = limit.frame_time() else {
        return;
    };
    if now() - frame_start >= target_frame_time {
        return;
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let spin_margin = 0.002; // 2ms
        while now() - frame_start + spin_margin < target_frame_time {
            std::thread::sleep(std::time::Duration::from_millis(1));
        }
        while now() - frame_start < target_frame_time {
            std::hint::spin_loop();
        }
    }
    #[cfg(target_arch = "wasm32")]
    {
        while now() - frame_start < target_frame_time {}
    }
}

/// A riddle in progress together with what the player has typed
#[derive(Debug, Clone, PartialEq)]
pub struct ChallengeRound {
    pub challenge: Challenge,
    pub answer: AnswerInput,
}

impl ChallengeRound {
    pub fn new(challenge: Challenge) -> Self {
        Self { challenge, answer: AnswerInput::new() }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GameState {
    Menu,
    Playing,
    Challenge(ChallengeRound),
    GameOver,
}

impl GameState {
    pub fn name(&self) -> &'static str {
        match self {
            GameState::Menu => "Menu",
            GameState::Playing => "Playing",
            GameState::Challenge(_) => "Challenge",
            GameState::GameOver => "GameOver",
        }
    }
}

/// Everything that belongs to one adventure. Restarting swaps in a new one.
#[derive(Debug, Clone)]
pub struct Session {
    pub map: TileMap,
    pub minimap: Minimap,
    pub explorer: Explorer,
    pub treasure: Treasure,
    pub key: Key,
    pub camera: Camera,
    pub challenges: ChallengeGenerator,
    pub adventure_points: u32,
    /// Outcome of the previous attempt at the current chest, if any
    pub last_result: Option<ChallengeOutcome>,
    pub state: GameState,
}

impl Session {
    /// Generate a map and place the explorer, chest and key on it
    pub fn new(config: &GameConfig, viewport: Vec2, rng: &mut StdRng) -> Self {
        let map = generate_map(config, rng);
        Self::on_map(map, config, viewport, rng)
    }

    /// Build a session on an existing map
    pub fn on_map(map: TileMap, config: &GameConfig, viewport: Vec2, rng: &mut StdRng) -> Self {
        let explorer = Explorer::new(
            map.get_valid_position(rng),
            config.explorer_speed,
            config.starting_hearts,
        );
        let treasure = Treasure::new(map.get_valid_position(rng));
        let key = Key::new(map.get_valid_position(rng));
        let minimap = Minimap::new(&map, config.minimap_size);

        let mut camera = Camera::new();
        camera.follow(explorer.position, viewport, map.size());

        Self {
            map,
            minimap,
            explorer,
            treasure,
            key,
            camera,
            challenges: ChallengeGenerator::new(config.challenge_ticks()),
            adventure_points: 0,
            last_result: None,
            state: GameState::Menu,
        }
    }

    pub fn rank(&self) -> u32 {
        self.challenges.rank()
    }

    /// The riddle on screen, if any
    #[cfg(test)]
    pub fn challenge(&self) -> Option<&ChallengeRound> {
        match &self.state {
            GameState::Challenge(round) => Some(round),
            _ => None,
        }
    }
}

/// Generate a map, retrying when one comes out without any land.
///
/// After `map_attempts` tries the last map is kept anyway and every spawn
/// falls back to the map center.
fn generate_map(config: &GameConfig, rng: &mut StdRng) -> TileMap {
    let attempts = config.map_attempts.max(1);
    let mut attempt = 1;
    loop {
        let map = TileMap::generate(
            SCREEN_WIDTH,
            SCREEN_HEIGHT,
            config.tile_size,
            config.map_scale,
            rng,
        );
        let walkable = map.walkable_count();
        if walkable > 0 {
            info!(
                "Generated {}x{} map with {} walkable tiles (attempt {})",
                map.columns(), map.rows(), walkable, attempt
            );
            return map;
        }
        if attempt >= attempts {
            warn!("No land after {} map attempts, spawning at map center", attempts);
            return map;
        }
        warn!("Map attempt {} has no walkable tiles, regenerating", attempt);
        attempt += 1;
    }
}

pub struct GameController {
    config: GameConfig,
    rng: StdRng,
    viewport: Vec2,
    session: Session,
    events: EventQueue<GameEvent>,
}

impl GameController {
    /// New controller sitting on the menu. All randomness derives from `seed`.
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let viewport = Vec2::new(SCREEN_WIDTH as f32, SCREEN_HEIGHT as f32);
        let session = Session::new(&config, viewport, &mut rng);
        info!("New adventure (seed {})", seed);
        Self {
            config,
            rng,
            viewport,
            session,
            events: EventQueue::new(),
        }
    }

    #[cfg(test)]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> &GameState {
        &self.session.state
    }

    /// Throw the current adventure away and start a new one on a fresh map.
    /// The RNG carries on, so a seeded run stays reproducible.
    pub fn reset(&mut self) {
        self.session = Session::new(&self.config, self.viewport, &mut self.rng);
    }

    /// Run one frame: discrete presses first, then the simulation step
    pub fn frame(&mut self, input: &FrameInput) {
        self.handle_input(input);
        self.update(input);
    }

    /// Apply this frame's key presses in arrival order
    pub fn handle_input(&mut self, input: &FrameInput) {
        for &press in &input.presses {
            match press {
                KeyPress::Start => match self.session.state {
                    GameState::Menu => self.start_adventure(),
                    GameState::GameOver => {
                        self.reset();
                        self.start_adventure();
                    }
                    GameState::Playing | GameState::Challenge(_) => {}
                },
                KeyPress::Digit(ch) => {
                    if let GameState::Challenge(round) = &mut self.session.state {
                        round.answer.insert_digit(ch);
                    }
                }
                KeyPress::Erase => {
                    if let GameState::Challenge(round) = &mut self.session.state {
                        round.answer.backspace();
                    }
                }
                KeyPress::Submit => self.submit_answer(),
            }
        }
    }

    /// Advance the simulation by one tick
    pub fn update(&mut self, input: &FrameInput) {
        match self.session.state {
            GameState::Playing => self.update_playing(input),
            GameState::Challenge(ref mut round) => {
                round.answer.tick_blink();
                if round.challenge.tick() {
                    self.fail_attempt(ChallengeOutcome::TimedOut);
                }
            }
            GameState::Menu | GameState::GameOver => {}
        }
    }

    /// Take everything that happened since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain().collect()
    }

    fn start_adventure(&mut self) {
        self.session.state = GameState::Playing;
        self.events.send(GameEvent::AdventureStarted);
    }

    fn update_playing(&mut self, input: &FrameInput) {
        let session = &mut self.session;

        let step = step_on_map(
            &session.map,
            session.explorer.position,
            session.explorer.radius,
            session.explorer.speed,
            input.held,
            self.config.normalize_diagonal,
        );
        session.explorer.position = step.position;
        session.camera.follow(session.explorer.position, self.viewport, session.map.size());

        if !session.key.collected && collides(&session.explorer, &session.key) {
            session.key.collected = true;
            session.explorer.keys += 1;
            self.events.send(GameEvent::KeyCollected);
        }

        if session.key.collected && collides(&session.explorer, &session.treasure) {
            session.last_result = None;
            self.begin_challenge();
        }
    }

    /// Put a fresh riddle in front of the explorer
    pub fn begin_challenge(&mut self) {
        let challenge = self.session.challenges.generate(&mut self.rng);
        self.events.send(GameEvent::ChallengeStarted(challenge.kind()));
        self.session.state = GameState::Challenge(ChallengeRound::new(challenge));
    }

    /// Check the typed answer against the riddle. Ignored outside a riddle.
    pub fn submit_answer(&mut self) {
        let correct = match &self.session.state {
            GameState::Challenge(round) => round.challenge.check(round.answer.as_str()),
            _ => return,
        };
        if correct {
            self.claim_treasure();
        } else {
            self.fail_attempt(ChallengeOutcome::Wrong);
        }
    }

    fn claim_treasure(&mut self) {
        let session = &mut self.session;
        session.adventure_points += session.challenges.reward();
        session.explorer.treasures += 1;
        session.last_result = Some(ChallengeOutcome::Correct);
        self.events.send(GameEvent::ChallengeResolved(ChallengeOutcome::Correct));

        if session.challenges.record_treasure(session.explorer.treasures) {
            info!("Explorer reached rank {}", session.challenges.rank());
            self.events.send(GameEvent::RankUp(session.challenges.rank()));
        }

        session.treasure.reset(session.map.get_valid_position(&mut self.rng));
        session.key.reset(session.map.get_valid_position(&mut self.rng));
        session.state = GameState::Playing;
    }

    /// Cost a heart for a wrong answer or a timeout. Out of hearts ends the
    /// adventure; otherwise a new riddle replaces the old one.
    pub fn fail_attempt(&mut self, outcome: ChallengeOutcome) {
        self.events.send(GameEvent::ChallengeResolved(outcome));
        if self.session.explorer.lose_heart() {
            let points = self.session.adventure_points;
            let treasures = self.session.explorer.treasures;
            info!("Adventure over: {} points, {} treasures", points, treasures);
            self.session.last_result = Some(outcome);
            self.session.state = GameState::GameOver;
            self.events.send(GameEvent::GameOver { points, treasures });
        } else {
            self.begin_challenge();
            self.session.last_result = Some(outcome);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Directions;
    use crate::world::TileKind;

    /// A controller on an all-grass map, chest at (300, 300), key at (600, 300)
    fn grass_controller() -> GameController {
        let config = GameConfig::default();
        let mut controller = GameController::new(config.clone(), 7);
        let map = TileMap::filled(2400, 1800, config.tile_size, TileKind::Grass);
        let mut session = Session::on_map(map, &config, controller.viewport, &mut controller.rng);
        session.explorer.position = Vec2::new(100.0, 300.0);
        session.treasure.position = Vec2::new(300.0, 300.0);
        session.key.position = Vec2::new(600.0, 300.0);
        controller.session = session;
        controller
    }

    /// Enter a riddle directly
    fn in_challenge() -> GameController {
        let mut controller = grass_controller();
        controller.session.state = GameState::Playing;
        controller.begin_challenge();
        controller
    }

    fn answer(controller: &GameController) -> String {
        controller.session.challenge().unwrap().challenge.answer.clone()
    }

    fn wrong_answer(controller: &GameController) -> String {
        // No riddle answer has more than 6 digits
        let right: u32 = answer(controller).parse().unwrap();
        (right + 1).to_string()
    }

    #[test]
    fn test_starts_on_menu_and_space_starts() {
        let mut controller = GameController::new(GameConfig::default(), 1);
        assert_eq!(controller.state(), &GameState::Menu);

        // Movement is ignored on the menu
        let before = controller.session.explorer.position;
        controller.frame(&FrameInput::holding(Directions::RIGHT));
        assert_eq!(controller.session.explorer.position, before);

        controller.handle_input(&FrameInput::pressing([KeyPress::Start]));
        assert_eq!(controller.state(), &GameState::Playing);
        assert_eq!(controller.drain_events(), vec![GameEvent::AdventureStarted]);
    }

    #[test]
    fn test_seeded_sessions_match() {
        let a = GameController::new(GameConfig::default(), 99);
        let b = GameController::new(GameConfig::default(), 99);
        assert_eq!(a.session.map, b.session.map);
        assert_eq!(a.session.explorer, b.session.explorer);
        assert_eq!(a.session.key, b.session.key);
    }

    #[test]
    fn test_spawns_on_land() {
        let controller = GameController::new(GameConfig::default(), 3);
        let session = controller.session();
        if session.map.walkable_count() > 0 {
            assert!(session.map.is_walkable(session.explorer.position));
            assert!(session.map.is_walkable(session.treasure.position));
            assert!(session.map.is_walkable(session.key.position));
        }
    }

    #[test]
    fn test_no_land_spawns_at_center() {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(0);
        let map = TileMap::filled(2400, 1800, config.tile_size, TileKind::Water);
        let session = Session::on_map(map, &config, Vec2::new(800.0, 600.0), &mut rng);
        assert_eq!(session.explorer.position, Vec2::new(1200.0, 900.0));
        assert_eq!(session.treasure.position, Vec2::new(1200.0, 900.0));
    }

    #[test]
    fn test_chest_locked_without_key() {
        let mut controller = grass_controller();
        controller.session.state = GameState::Playing;
        controller.session.explorer.position = Vec2::new(290.0, 300.0);

        controller.frame(&FrameInput::default());
        assert_eq!(controller.state(), &GameState::Playing);
    }

    #[test]
    fn test_key_then_chest_starts_challenge() {
        let mut controller = grass_controller();
        controller.session.state = GameState::Playing;

        controller.session.explorer.position = Vec2::new(580.0, 300.0);
        controller.frame(&FrameInput::default());
        assert!(controller.session.key.collected);
        assert_eq!(controller.session.explorer.keys, 1);

        // Walk left onto the chest
        controller.session.explorer.position = Vec2::new(335.0, 300.0);
        controller.frame(&FrameInput::holding(Directions::LEFT));
        assert_eq!(controller.session.explorer.position, Vec2::new(330.0, 300.0));
        assert!(controller.session.challenge().is_some());

        let events = controller.drain_events();
        assert_eq!(events[0], GameEvent::KeyCollected);
        assert!(matches!(events[1], GameEvent::ChallengeStarted(_)));
    }

    #[test]
    fn test_camera_follows_explorer() {
        let mut controller = grass_controller();
        controller.session.state = GameState::Playing;
        controller.session.explorer.position = Vec2::new(1200.0, 900.0);
        controller.frame(&FrameInput::holding(Directions::DOWN));
        assert_eq!(controller.session.camera.offset, Vec2::new(800.0, 605.0));
    }

    #[test]
    fn test_correct_answer_ranks_up_on_fifth_treasure() {
        let mut controller = in_challenge();
        controller.session.explorer.treasures = 4;
        let old_treasure = controller.session.treasure.position;
        controller.session.key.collected = true;

        let typed = answer(&controller);
        controller.frame(&FrameInput::typing(&typed));
        controller.frame(&FrameInput::pressing([KeyPress::Submit]));

        let session = controller.session();
        assert_eq!(session.state, GameState::Playing);
        assert_eq!(session.explorer.treasures, 5);
        assert_eq!(session.rank(), 2);
        assert_eq!(session.adventure_points, 100);
        assert_eq!(session.last_result, Some(ChallengeOutcome::Correct));
        assert!(!session.key.collected);
        assert!(session.map.is_walkable(session.treasure.position));
        // Overwhelmingly likely on a 120x90 grass map
        assert_ne!(session.treasure.position, old_treasure);

        let events = controller.drain_events();
        assert!(events.contains(&GameEvent::RankUp(2)));
    }

    #[test]
    fn test_reward_scales_with_rank() {
        let mut controller = in_challenge();
        controller.session.challenges.set_rank(3);
        controller.begin_challenge();
        let typed = answer(&controller);
        controller.frame(&FrameInput::typing(&typed));
        controller.frame(&FrameInput::pressing([KeyPress::Submit]));
        assert_eq!(controller.session.adventure_points, 300);
    }

    #[test]
    fn test_wrong_answer_on_last_heart_ends_game() {
        let mut controller = in_challenge();
        controller.session.explorer.set_hearts(1);

        let typed = wrong_answer(&controller);
        controller.frame(&FrameInput::typing(&typed));
        controller.frame(&FrameInput::pressing([KeyPress::Submit]));

        assert_eq!(controller.session.explorer.hearts(), 0);
        assert_eq!(controller.state(), &GameState::GameOver);
        assert!(controller
            .drain_events()
            .contains(&GameEvent::GameOver { points: 0, treasures: 0 }));
    }

    #[test]
    fn test_wrong_answer_retries_with_new_riddle() {
        let mut controller = in_challenge();
        let typed = wrong_answer(&controller);
        controller.handle_input(&FrameInput::typing(&typed));
        controller.handle_input(&FrameInput::pressing([KeyPress::Submit]));

        assert_eq!(controller.session.explorer.hearts(), 2);
        let round = controller.session.challenge().unwrap();
        assert_eq!(round.answer.as_str(), "");
        assert_eq!(round.challenge.time_remaining, round.challenge.time_limit);
        assert_eq!(controller.session.last_result, Some(ChallengeOutcome::Wrong));
    }

    #[test]
    fn test_timeout_costs_a_heart() {
        let mut controller = in_challenge();
        controller.session.explorer.set_hearts(2);
        let limit = controller.config.challenge_ticks();

        for _ in 0..limit - 1 {
            controller.frame(&FrameInput::default());
        }
        assert_eq!(controller.session.explorer.hearts(), 2);

        controller.frame(&FrameInput::default());
        assert_eq!(controller.session.explorer.hearts(), 1);
        assert!(controller.session.challenge().is_some());
        assert_eq!(controller.session.last_result, Some(ChallengeOutcome::TimedOut));
        let round = controller.session.challenge().unwrap();
        assert_eq!(round.challenge.time_remaining, limit);
    }

    #[test]
    fn test_answer_editing() {
        let mut controller = in_challenge();
        controller.frame(&FrameInput::typing("129"));
        controller.frame(&FrameInput::pressing([KeyPress::Erase]));
        assert_eq!(controller.session.challenge().unwrap().answer.as_str(), "12");
    }

    #[test]
    fn test_empty_answer_is_wrong() {
        let mut controller = in_challenge();
        controller.frame(&FrameInput::pressing([KeyPress::Submit]));
        assert_eq!(controller.session.explorer.hearts(), 2);
    }

    #[test]
    fn test_space_ignored_during_challenge() {
        let mut controller = in_challenge();
        controller.frame(&FrameInput::pressing([KeyPress::Start]));
        assert!(controller.session.challenge().is_some());
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut controller = in_challenge();
        controller.session.adventure_points = 500;
        controller.session.explorer.set_hearts(1);
        controller.fail_attempt(ChallengeOutcome::Wrong);
        assert_eq!(controller.state(), &GameState::GameOver);

        controller.handle_input(&FrameInput::pressing([KeyPress::Start]));
        let session = controller.session();
        assert_eq!(session.state, GameState::Playing);
        assert_eq!(session.adventure_points, 0);
        assert_eq!(session.explorer.hearts(), 3);
        assert_eq!(session.rank(), 1);
        assert_eq!(session.last_result, None);
    }

    #[test]
    fn test_fps_limit_frame_time() {
        assert_eq!(FpsLimit::default(), FpsLimit::Fps60);
        assert_eq!(FpsLimit::Unlocked.frame_time(), None);
        assert!((FpsLimit::Fps30.frame_time().unwrap() - 1.0 / 30.0).abs() < 1e-12);
    }

    #[test]
    fn test_limit_frame_rate_waits_for_target() {
        let start = std::time::Instant::now();
        let now = || start.elapsed().as_secs_f64();
        limit_frame_rate(FpsLimit::Fps60, 0.0, now);
        assert!(now() >= 1.0 / 60.0);

        // Unlocked returns right away
        limit_frame_rate(FpsLimit::Unlocked, now(), now);
    }
}
