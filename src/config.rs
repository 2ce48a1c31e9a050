use std::env;
use std::str::FromStr;

use bevy_ecs::resource::Resource;

use crate::constants::timing::{ANIMATION_INTERVAL_MS, COMBAT_INTERVAL_MS, FRAME_MS};
use crate::error::{GameError, GameResult};

/// Timing and seeding knobs for a game session.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Game time advanced per movement tick.
    pub frame_ms: u64,
    /// Interval between combat resolution passes.
    pub combat_interval_ms: u64,
    /// Interval between animation frame advances.
    pub animation_interval_ms: u64,
    /// Seed for AI jitter; `None` draws from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            frame_ms: FRAME_MS,
            combat_interval_ms: COMBAT_INTERVAL_MS,
            animation_interval_ms: ANIMATION_INTERVAL_MS,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Rejects a zero frame length and cadences faster than the movement tick.
    pub fn validate(&self) -> GameResult<()> {
        if self.frame_ms == 0 {
            return Err(GameError::InvalidConfig("frame_ms must be positive".to_string()));
        }
        for (name, interval) in [
            ("combat_interval_ms", self.combat_interval_ms),
            ("animation_interval_ms", self.animation_interval_ms),
        ] {
            if interval < self.frame_ms {
                return Err(GameError::InvalidConfig(format!(
                    "{name} ({interval}) is shorter than frame_ms ({})",
                    self.frame_ms
                )));
            }
        }
        Ok(())
    }

    /// Overrides defaults from `SHARKIE_FRAME_MS`, `SHARKIE_COMBAT_MS`, `SHARKIE_ANIMATION_MS` and `SHARKIE_SEED`.
    pub fn from_env() -> GameResult<Self> {
        let defaults = Self::default();
        let config = Self {
            frame_ms: env_or("SHARKIE_FRAME_MS", defaults.frame_ms)?,
            combat_interval_ms: env_or("SHARKIE_COMBAT_MS", defaults.combat_interval_ms)?,
            animation_interval_ms: env_or("SHARKIE_ANIMATION_MS", defaults.animation_interval_ms)?,
            seed: env_opt("SHARKIE_SEED")?,
        };
        config.validate()?;
        Ok(config)
    }
}

fn env_opt<T: FromStr>(key: &str) -> GameResult<Option<T>> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| GameError::InvalidConfig(format!("{key} is not a valid number: {raw:?}"))),
        Err(_) => Ok(None),
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> GameResult<T> {
    Ok(env_opt(key)?.unwrap_or(default))
}
