//! Game configuration.
//!
//! Every field has a default matching the stock game, and every struct is
//! `#[serde(default)]`, so a config file only needs the values it changes:
//!
//! ```json
//! { "seed": 7, "battle": { "skill_cost": 5 } }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::scene::BattleConfig;
use crate::world::{MAX_MONSTER_LEVEL, MAX_TILE_SIZE, PlayerConfig, WorldConfig};

/// Complete game configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// RNG seed; `None` seeds from the clock.
    pub seed: Option<u64>,
    /// Largest frame delta, in seconds, fed to a single tick.
    pub max_frame_dt: f32,
    /// Starting player stats.
    pub player: PlayerConfig,
    /// Battle timings and costs.
    pub battle: BattleConfig,
    /// Map and spawns.
    pub world: WorldConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_frame_dt: 0.25,
            player: PlayerConfig::default(),
            battle: BattleConfig::default(),
            world: WorldConfig::default(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a config from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] / [`ConfigError::Map`] for unplayable values.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`GameConfig::from_json_str`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Check that the config describes a playable game.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: &str) -> ConfigError {
            ConfigError::Invalid {
                field,
                reason: reason.to_string(),
            }
        }

        if self.max_frame_dt.is_nan() || self.max_frame_dt <= 0.0 {
            return Err(invalid("max_frame_dt", "must be positive"));
        }
        if self.player.speed.is_nan() || self.player.speed <= 0.0 {
            return Err(invalid("player.speed", "must be positive"));
        }
        if self.player.max_hp == 0 {
            return Err(invalid("player.max_hp", "must be positive"));
        }
        if self.player.experience_to_next == 0 {
            return Err(invalid("player.experience_to_next", "must be positive"));
        }

        let flee = self.battle.flee_chance;
        if flee.denominator == 0 {
            return Err(invalid("battle.flee_chance", "denominator must be positive"));
        }
        if flee.numerator > flee.denominator {
            return Err(invalid("battle.flee_chance", "numerator exceeds denominator"));
        }
        if self.battle.skill_multiplier == 0 {
            return Err(invalid("battle.skill_multiplier", "must be positive"));
        }
        let delays = [
            self.battle.action_delay,
            self.battle.insufficient_mp_delay,
            self.battle.item_delay,
            self.battle.flee_delay,
            self.battle.enemy_delay,
        ];
        if delays.iter().any(|d| d.is_nan() || *d < 0.0) {
            return Err(invalid("battle", "delays must be zero or positive"));
        }

        if self.world.tile_size == 0 {
            return Err(invalid("world.tile_size", "must be positive"));
        }
        if self.world.tile_size > MAX_TILE_SIZE {
            return Err(ConfigError::Invalid {
                field: "world.tile_size",
                reason: format!("must be at most {MAX_TILE_SIZE}"),
            });
        }
        let map = self.world.build_map()?;
        let (sx, sy) = self.world.player_start;
        if !map.get_tile(i32::from(sx), i32::from(sy)).is_walkable() {
            return Err(invalid("world.player_start", "start tile is not walkable"));
        }
        for spawn in &self.world.spawns {
            if spawn.level > MAX_MONSTER_LEVEL {
                return Err(ConfigError::Invalid {
                    field: "world.spawns",
                    reason: format!(
                        "{} level {} exceeds {MAX_MONSTER_LEVEL}",
                        spawn.kind.name(),
                        spawn.level
                    ),
                });
            }
            if !map.in_bounds(i32::from(spawn.x), i32::from(spawn.y)) {
                return Err(ConfigError::Invalid {
                    field: "world.spawns",
                    reason: format!(
                        "{} at ({}, {}) is outside the map",
                        spawn.kind.name(),
                        spawn.x,
                        spawn.y
                    ),
                });
            }
        }

        Ok(())
    }
}
