//! Game configuration
//!
//! Tunables live in a small RON file. Every field has a default, so a
//! partial file (or none at all) is fine. Lookup order on native builds:
//! `<config dir>/treasure-hunter/config.ron`, then `./treasure-hunter.ron`.
//! Web builds always use the defaults.

use std::fs;
use std::path::{Path, PathBuf};
use macroquad::logging::{info, warn};
use serde::{Deserialize, Serialize};
use crate::game::minimap::MINIMAP_SIZE;
use crate::game::FpsLimit;

/// Simulation ticks per second of challenge time
pub const TICKS_PER_SECOND: u32 = 60;

/// Name of the file inside the per-user config directory
#[cfg(not(target_arch = "wasm32"))]
const CONFIG_FILE: &str = "config.ron";
/// Fallback file in the working directory
#[cfg(not(target_arch = "wasm32"))]
const LOCAL_CONFIG_FILE: &str = "treasure-hunter.ron";

/// Validation limits
pub mod limits {
    pub const MIN_TILE_SIZE: u32 = 4;
    pub const MAX_TILE_SIZE: u32 = 200;
    pub const MAX_MAP_SCALE: u32 = 8;
    pub const MAX_SPEED: f32 = 100.0;
    pub const MAX_CHALLENGE_SECONDS: u32 = 600;
    pub const MAX_MAP_ATTEMPTS: u32 = 100;
}

/// Error type for config loading
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    SerializeError(ron::Error),
    ValidationError(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::ParseError(e)
    }
}

impl From<ron::Error> for ConfigError {
    fn from(e: ron::Error) -> Self {
        ConfigError::SerializeError(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
            ConfigError::SerializeError(e) => write!(f, "Serialize error: {}", e),
            ConfigError::ValidationError(e) => write!(f, "Validation error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Edge length of a terrain tile in pixels
    pub tile_size: u32,
    /// Map size as a multiple of the window size
    pub map_scale: u32,
    /// Explorer pixels per frame along each held axis
    pub explorer_speed: f32,
    pub starting_hearts: u32,
    /// Time allowed for each riddle attempt
    pub challenge_seconds: u32,
    pub target_fps: FpsLimit,
    pub minimap_size: f32,
    /// Scale diagonal steps by 1/sqrt(2) so diagonals are not faster
    pub normalize_diagonal: bool,
    /// Fixed RNG seed. `None` seeds from the clock.
    pub seed: Option<u64>,
    /// Maps to try before settling for one without any land
    pub map_attempts: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tile_size: 20,
            map_scale: 3,
            explorer_speed: 5.0,
            starting_hearts: 3,
            challenge_seconds: 20,
            target_fps: FpsLimit::Fps60,
            minimap_size: MINIMAP_SIZE,
            normalize_diagonal: false,
            seed: None,
            map_attempts: 5,
        }
    }
}

impl GameConfig {
    /// Riddle time limit in simulation ticks
    pub fn challenge_ticks(&self) -> u32 {
        self.challenge_seconds * TICKS_PER_SECOND
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let fail = |msg: String| -> Result<(), ConfigError> {
            Err(ConfigError::ValidationError(msg))
        };

        if !(limits::MIN_TILE_SIZE..=limits::MAX_TILE_SIZE).contains(&self.tile_size) {
            return fail(format!(
                "tile_size must be in {}..={} (got {})",
                limits::MIN_TILE_SIZE, limits::MAX_TILE_SIZE, self.tile_size
            ));
        }
        if self.map_scale == 0 || self.map_scale > limits::MAX_MAP_SCALE {
            return fail(format!(
                "map_scale must be in 1..={} (got {})",
                limits::MAX_MAP_SCALE, self.map_scale
            ));
        }
        if !self.explorer_speed.is_finite()
            || self.explorer_speed <= 0.0
            || self.explorer_speed > limits::MAX_SPEED
        {
            return fail(format!("explorer_speed out of range (got {})", self.explorer_speed));
        }
        if self.starting_hearts == 0 || self.starting_hearts > crate::game::MAX_HEARTS {
            return fail(format!(
                "starting_hearts must be in 1..={} (got {})",
                crate::game::MAX_HEARTS, self.starting_hearts
            ));
        }
        if self.challenge_seconds == 0 || self.challenge_seconds > limits::MAX_CHALLENGE_SECONDS {
            return fail(format!(
                "challenge_seconds must be in 1..={} (got {})",
                limits::MAX_CHALLENGE_SECONDS, self.challenge_seconds
            ));
        }
        if !self.minimap_size.is_finite() || self.minimap_size <= 0.0 {
            return fail(format!("minimap_size must be positive (got {})", self.minimap_size));
        }
        if self.map_attempts == 0 || self.map_attempts > limits::MAX_MAP_ATTEMPTS {
            return fail(format!(
                "map_attempts must be in 1..={} (got {})",
                limits::MAX_MAP_ATTEMPTS, self.map_attempts
            ));
        }
        Ok(())
    }

    /// Parse and validate a config from RON text
    pub fn from_ron(contents: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = ron::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_ron(&self) -> Result<String, ConfigError> {
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(2)
            .indentor("  ".to_string());
        Ok(ron::ser::to_string_pretty(self, pretty)?)
    }

    /// Load a config file. A missing file is an `IoError` of kind `NotFound`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_ron(&contents)
    }

    /// First config file found in `paths`, or defaults.
    ///
    /// Missing files are skipped quietly. A file that fails to load is
    /// reported and the defaults are used instead of looking further.
    pub fn load_first(paths: &[PathBuf]) -> Self {
        for path in paths {
            match Self::load(path) {
                Ok(config) => {
                    info!("Loaded config from {}", path.display());
                    return config;
                }
                Err(ConfigError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    warn!("Ignoring config {}: {}", path.display(), e);
                    return Self::default();
                }
            }
        }
        info!("No config file found, using defaults");
        Self::default()
    }

    /// Load from the standard locations
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_or_default() -> Self {
        Self::load_first(&search_paths())
    }

    #[cfg(target_arch = "wasm32")]
    pub fn load_or_default() -> Self {
        Self::default()
    }
}

/// Config file candidates, most specific first
#[cfg(not(target_arch = "wasm32"))]
pub fn search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("treasure-hunter").join(CONFIG_FILE));
    }
    paths.push(PathBuf::from(LOCAL_CONFIG_FILE));
    paths
}
