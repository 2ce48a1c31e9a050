//! This module contains all the tuning constants used by the core.

use std::time::Duration;

use glam::Vec2;

/// Duration of one movement tick when driven in real time.
pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);

/// Timing windows, in milliseconds of game time.
pub mod timing {
    /// Default length of one movement tick (~60 Hz).
    pub const FRAME_MS: u64 = 16;
    /// Default interval between combat resolution passes (~5 Hz).
    pub const COMBAT_INTERVAL_MS: u64 = 200;
    /// Default interval between animation frames (~5 Hz).
    pub const ANIMATION_INTERVAL_MS: u64 = 200;

    /// Window after taking damage during which hurt state wins and repeat damage is ignored.
    pub const HURT_WINDOW_MS: u64 = 1000;
    /// Length of the fin slap attack window.
    pub const FIN_SLAP_MS: u64 = 600;
    /// Full invulnerability granted at the start of a fin slap.
    pub const FIN_SLAP_INVULNERABLE_MS: u64 = 300;
    /// Wind-up before a bubble leaves the character.
    pub const BUBBLE_WIND_UP_MS: u64 = 600;
    /// A bubble that hits nothing pops after this long.
    pub const BUBBLE_LIFETIME_MS: u64 = 2000;
    /// How long a bubbled jellyfish stays trapped before being released.
    pub const NEUTRALIZED_MS: u64 = 1000;
    /// Length of the boss intro animation.
    pub const BOSS_INTRO_MS: u64 = 1200;
    /// Length of the boss attack window.
    pub const BOSS_ATTACK_MS: u64 = 600;
    /// Time without input before the character falls asleep.
    pub const LONG_IDLE_MS: u64 = 10_000;
}

/// Character tuning.
pub mod character {
    use super::Vec2;
    use crate::systems::Inset;

    pub const SIZE: Vec2 = Vec2::new(200.0, 200.0);
    pub const INSET: Inset = Inset::new(40.0, 95.0, 40.0, 45.0);
    pub const SPEED: f32 = 5.0;
    pub const ENERGY: u32 = 100;
    pub const ATTACK: u32 = 10;

    /// Bubble spawn point relative to the character when facing right.
    pub const BUBBLE_OFFSET_RIGHT: Vec2 = Vec2::new(160.0, 100.0);
    /// Bubble spawn point relative to the character when facing left.
    pub const BUBBLE_OFFSET_LEFT: Vec2 = Vec2::new(0.0, 100.0);
    /// Energy restored by a life pickup.
    pub const LIFE_PICKUP_ENERGY: u32 = 20;
    /// Tolerance shrink applied to the cross axis of directional barrier probes.
    pub const BARRIER_TOLERANCE: f32 = 3.0;
}

/// Projectile tuning.
pub mod projectile {
    use super::Vec2;

    pub const SIZE: Vec2 = Vec2::new(40.0, 40.0);
    /// Velocity of a bubble fired to the right; mirrored on x when fired to the left.
    pub const VELOCITY: Vec2 = Vec2::new(6.0, -1.5);
    pub const BUBBLE_ATTACK: u32 = 10;
    pub const POISON_BUBBLE_ATTACK: u32 = 20;
}

/// Enemy tuning.
pub mod enemy {
    use super::Vec2;
    use crate::systems::Inset;

    pub const PUFFER_SIZE: Vec2 = Vec2::new(90.0, 80.0);
    pub const PUFFER_INSET: Inset = Inset::new(5.0, 5.0, 10.0, 20.0);
    pub const PUFFER_ENERGY: u32 = 10;
    pub const PUFFER_ATTACK: u32 = 5;

    pub const JELLYFISH_SIZE: Vec2 = Vec2::new(80.0, 110.0);
    pub const JELLYFISH_INSET: Inset = Inset::new(5.0, 5.0, 5.0, 10.0);
    pub const JELLYFISH_ENERGY: u32 = 10;
    pub const JELLYFISH_ATTACK: u32 = 10;
    pub const DANGEROUS_JELLYFISH_ATTACK: u32 = 20;

    /// Drift applied every tick once an enemy has died.
    pub const FLOAT_AWAY_VELOCITY: Vec2 = Vec2::new(2.0, -4.0);

    pub const BOSS_SIZE: Vec2 = Vec2::new(350.0, 400.0);
    pub const BOSS_INSET: Inset = Inset::new(20.0, 180.0, 30.0, 60.0);
    pub const BOSS_ENERGY: u32 = 100;
    pub const BOSS_ATTACK: u32 = 25;
    pub const BOSS_SPEED: f32 = 3.0;
    pub const BOSS_WANDER_DISTANCE: f32 = 300.0;
    pub const BOSS_TRIGGER_DISTANCE: f32 = 500.0;
}

/// Pickup tuning.
pub mod pickup {
    use super::Vec2;

    pub const COIN_SIZE: Vec2 = Vec2::new(40.0, 40.0);
    pub const LIFE_SIZE: Vec2 = Vec2::new(50.0, 50.0);
    pub const POISON_SIZE: Vec2 = Vec2::new(50.0, 60.0);
}
