//! Game tuning and runtime settings.
//!
//! Every gameplay constant lives here as a named field. Defaults reproduce
//! the classic tuning; any subset can be overridden from a TOML file.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable naming an optional config file.
pub const CONFIG_ENV_VAR: &str = "ARENA_SHOOTER_CONFIG";

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub gameplay: GameplayConfig,
    pub audio: AudioConfig,
    pub display: DisplayConfig,
}

/// Gameplay constants. Speeds are per-frame displacements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    pub player_speed: f32,
    pub player_radius: f32,
    pub max_health: u32,
    /// Distance the player is kept from every playfield edge
    pub player_margin: f32,
    /// Health lost when an enemy reaches the player
    pub collision_damage: u32,

    pub bullet_speed: f32,
    pub bullet_radius: f32,

    pub enemy_speed: f32,
    pub enemy_radius: f32,
    pub enemy_health: u32,
    /// Distance beyond the edge at which enemies appear
    pub spawn_offset: f32,
    pub spawn_interval_ms: u64,

    pub points_per_kill: u32,
    pub victory_score: u32,
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            player_speed: 7.0,
            player_radius: 25.0,
            max_health: 100,
            player_margin: 25.0,
            collision_damage: 10,
            bullet_speed: 10.0,
            bullet_radius: 6.0,
            enemy_speed: 5.0,
            enemy_radius: 20.0,
            enemy_health: 3,
            spawn_offset: 20.0,
            spawn_interval_ms: 1500,
            points_per_kill: 10,
            victory_score: 200,
        }
    }
}

impl GameplayConfig {
    pub fn spawn_interval(&self) -> Duration {
        Duration::from_millis(self.spawn_interval_ms)
    }
}

/// Sound files, resolved against `sounds_dir`, and cue volumes from 0.0 to 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub enabled: bool,
    pub sounds_dir: String,
    pub music_file: String,
    pub shot_file: String,
    /// Played when a bullet strikes an enemy
    pub hit_file: String,
    /// Played when an enemy reaches the player
    pub collision_file: String,
    pub music_volume: f32,
    pub shot_volume: f32,
    pub hit_volume: f32,
    pub collision_volume: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sounds_dir: "assets/sounds".to_string(),
            music_file: "background_music.wav".to_string(),
            shot_file: "shooting_effect.mp3".to_string(),
            hit_file: "tap_effect.mp3".to_string(),
            collision_file: "hit_effect.wav".to_string(),
            music_volume: 0.5,
            shot_volume: 0.3,
            hit_volume: 0.2,
            collision_volume: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub target_fps: u32,
    /// World units covered by one terminal column
    pub cell_width: f32,
    /// World units covered by one terminal row
    pub cell_height: f32,
    /// Frames a key counts as held after its last press, for terminals
    /// that never report key releases
    pub key_hold_frames: u8,
    pub log_file: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            cell_width: 8.0,
            cell_height: 16.0,
            key_hold_frames: 8,
            log_file: "arena-shooter.log".to_string(),
        }
    }
}

impl DisplayConfig {
    pub fn frame_budget(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.target_fps.max(1)))
    }
}

impl GameConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Loads `path` when one is given, otherwise returns the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let g = &self.gameplay;
        let positive = [
            ("gameplay.player_speed", g.player_speed),
            ("gameplay.bullet_speed", g.bullet_speed),
            ("gameplay.enemy_speed", g.enemy_speed),
            ("gameplay.enemy_radius", g.enemy_radius),
            ("gameplay.player_radius", g.player_radius),
            ("display.cell_width", self.display.cell_width),
            ("display.cell_height", self.display.cell_height),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be a positive number",
                });
            }
        }
        if g.max_health == 0 {
            return Err(ConfigError::Invalid {
                field: "gameplay.max_health",
                reason: "must be at least 1",
            });
        }
        if g.enemy_health == 0 {
            return Err(ConfigError::Invalid {
                field: "gameplay.enemy_health",
                reason: "must be at least 1",
            });
        }
        if self.display.target_fps == 0 {
            return Err(ConfigError::Invalid {
                field: "display.target_fps",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }
}
