//! Tunable game parameters.
//!
//! Every field has a default matching the classic feel of the game; a TOML
//! file only needs to name the values it changes.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of background stars.
    pub star_count: usize,

    pub player_width: f32,
    pub player_height: f32,
    pub player_speed: f32,
    /// Distance from the player's top edge to the bottom of the viewport.
    pub player_bottom_offset: f32,

    pub bullet_width: f32,
    pub bullet_height: f32,
    pub bullet_speed: f32,

    pub enemy_width: f32,
    pub enemy_height: f32,
    pub enemy_speed: f32,
    /// Spawn row for new enemies (above the viewport).
    pub enemy_spawn_y: f32,

    /// Spawn delay is drawn uniformly from `[min, max)` milliseconds.
    pub spawn_delay_min_ms: u64,
    pub spawn_delay_max_ms: u64,

    pub score_per_kill: u32,
    pub fps: u32,
    /// Pixels moved per arrow-key press.
    pub keyboard_step: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            star_count: 100,
            player_width: 40.0,
            player_height: 20.0,
            player_speed: 5.0,
            player_bottom_offset: 50.0,
            bullet_width: 4.0,
            bullet_height: 10.0,
            bullet_speed: 7.0,
            enemy_width: 30.0,
            enemy_height: 20.0,
            enemy_speed: 3.0,
            enemy_spawn_y: -30.0,
            spawn_delay_min_ms: 1000,
            spawn_delay_max_ms: 3000,
            score_per_kill: 10,
            fps: 60,
            keyboard_step: 20.0,
        }
    }
}

impl GameConfig {
    /// Load and validate a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: GameConfig = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fps == 0 {
            return Err(ConfigError::Invalid("fps must be positive".into()));
        }
        if self.spawn_delay_min_ms >= self.spawn_delay_max_ms {
            return Err(ConfigError::Invalid(format!(
                "spawn_delay_min_ms ({}) must be below spawn_delay_max_ms ({})",
                self.spawn_delay_min_ms, self.spawn_delay_max_ms
            )));
        }
        let sizes = [
            ("player", self.player_width, self.player_height),
            ("bullet", self.bullet_width, self.bullet_height),
            ("enemy", self.enemy_width, self.enemy_height),
        ];
        for (name, w, h) in sizes {
            if w <= 0.0 || h <= 0.0 {
                return Err(ConfigError::Invalid(format!("{name} size must be positive")));
            }
        }
        Ok(())
    }

    /// Duration of one frame tick.
    pub fn frame_duration(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / f64::from(self.fps.max(1)))
    }
}
