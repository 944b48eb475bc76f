use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Smallest playable grid side
pub const MIN_GRID_SIDE: usize = 5;
/// Largest grid side; anything bigger cannot fit on a terminal anyway
pub const MAX_GRID_SIDE: usize = 200;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,

    /// Base time between moves
    pub tick_ms: u64,
    /// Floor for the score-based speed-up
    pub min_tick_ms: u64,
    /// Points needed per speed-up step (0 keeps the pace fixed)
    pub speedup_every: u32,
    /// Milliseconds taken off the tick per speed-up step
    pub speedup_step_ms: u64,

    /// Probability that a spawned food is a special item
    pub special_food_chance: f64,
    /// How many ticks a food effect lasts
    pub effect_ticks: u32,

    /// Fixed RNG seed for reproducible games
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            initial_snake_length: 3,
            tick_ms: 125,
            min_tick_ms: 50,
            speedup_every: 5,
            speedup_step_ms: 10,
            special_food_chance: 0.2,
            effect_ticks: 40,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Create a large grid
    pub fn large() -> Self {
        Self::new(30, 30)
    }

    /// Load a JSON config file. Missing fields take their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        tracing::debug!(?path, "loaded game config");
        Ok(config)
    }

    /// Check that the configuration describes a playable game
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width < MIN_GRID_SIDE || self.grid_height < MIN_GRID_SIDE {
            return Err(ConfigError::Invalid(format!(
                "grid must be at least {MIN_GRID_SIDE}x{MIN_GRID_SIDE}, got {}x{}",
                self.grid_width, self.grid_height
            )));
        }

        if self.grid_width > MAX_GRID_SIDE || self.grid_height > MAX_GRID_SIDE {
            return Err(ConfigError::Invalid(format!(
                "grid must be at most {MAX_GRID_SIDE}x{MAX_GRID_SIDE}, got {}x{}",
                self.grid_width, self.grid_height
            )));
        }

        // The snake starts centred, facing right, with its body to the left
        let max_length = self.grid_width / 2 + 1;
        if self.initial_snake_length == 0 || self.initial_snake_length > max_length {
            return Err(ConfigError::Invalid(format!(
                "initial_snake_length must be between 1 and {max_length}, got {}",
                self.initial_snake_length
            )));
        }

        if self.min_tick_ms == 0 {
            return Err(ConfigError::Invalid("min_tick_ms must be positive".into()));
        }

        if self.tick_ms < self.min_tick_ms {
            return Err(ConfigError::Invalid(format!(
                "tick_ms ({}) must not be below min_tick_ms ({})",
                self.tick_ms, self.min_tick_ms
            )));
        }

        if !(0.0..=1.0).contains(&self.special_food_chance) {
            return Err(ConfigError::Invalid(format!(
                "special_food_chance must be within [0, 1], got {}",
                self.special_food_chance
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width, 20);
        assert_eq!(config.grid_height, 20);
        assert_eq!(config.initial_snake_length, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 12);
        assert_eq!(config.grid_width, 15);
        assert_eq!(config.grid_height, 12);
        assert_eq!(config.tick_ms, 125);
    }

    #[test]
    fn test_rejects_tiny_grid() {
        let config = GameConfig::new(4, 20);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_huge_grid() {
        assert!(GameConfig::new(MAX_GRID_SIDE, MAX_GRID_SIDE).validate().is_ok());
        assert!(GameConfig::new(40000, 5).validate().is_err());
        assert!(GameConfig::new(20, MAX_GRID_SIDE + 1).validate().is_err());
    }

    #[test]
    fn test_rejects_snake_longer_than_half_grid() {
        let mut config = GameConfig::small();
        config.initial_snake_length = 6;
        assert!(config.validate().is_ok());

        config.initial_snake_length = 7;
        assert!(config.validate().is_err());

        config.initial_snake_length = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_timing_and_chance() {
        let config = GameConfig {
            tick_ms: 10,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = GameConfig {
            special_food_chance: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "grid_width": 30, "seed": 7 }}"#).unwrap();

        let config = GameConfig::from_file(file.path()).unwrap();
        assert_eq!(config.grid_width, 30);
        assert_eq!(config.grid_height, 20);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_from_file_errors() {
        let missing = GameConfig::from_file(Path::new("/definitely/not/here.json"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let garbage = GameConfig::from_file(file.path());
        assert!(matches!(garbage, Err(ConfigError::Parse { .. })));

        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "grid_width": 2 }}"#).unwrap();
        let invalid = GameConfig::from_file(file.path());
        assert!(matches!(invalid, Err(ConfigError::Invalid(_))));
    }
}
