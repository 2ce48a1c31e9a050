use bevy_ecs::resource::Resource;
use bevy_ecs::system::{Res, ResMut};

use crate::config::GameConfig;
use crate::systems::GameClock;

/// A fixed-rate schedule riding on top of the movement tick.
///
/// Starts primed, so the first tick after a (re)load always runs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    pub interval_ms: u64,
    elapsed_ms: u64,
    due: bool,
}

impl Cadence {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            elapsed_ms: interval_ms,
            due: false,
        }
    }

    /// Accumulates `delta_ms` and reports whether the cadence fires this tick.
    pub fn advance(&mut self, delta_ms: u64) -> bool {
        self.elapsed_ms += delta_ms;
        self.due = self.elapsed_ms >= self.interval_ms;
        if self.due {
            self.elapsed_ms = (self.elapsed_ms - self.interval_ms).min(self.interval_ms);
        }
        self.due
    }

    pub fn is_due(&self) -> bool {
        self.due
    }
}

/// The slower schedules sharing the movement tick.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadences {
    pub combat: Cadence,
    pub animation: Cadence,
}

impl Cadences {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            combat: Cadence::new(config.combat_interval_ms),
            animation: Cadence::new(config.animation_interval_ms),
        }
    }
}

/// Advances game time by one movement tick and decides which cadences fire.
pub fn clock_system(config: Res<GameConfig>, mut clock: ResMut<GameClock>, mut cadences: ResMut<Cadences>) {
    clock.tick += 1;
    clock.now_ms += config.frame_ms;
    cadences.combat.advance(config.frame_ms);
    cadences.animation.advance(config.frame_ms);
}

/// Run condition for the combat pass.
pub fn combat_due(cadences: Res<Cadences>) -> bool {
    cadences.combat.is_due()
}

/// Run condition for animation frame advances.
pub fn animation_due(cadences: Res<Cadences>) -> bool {
    cadences.animation.is_due()
}
