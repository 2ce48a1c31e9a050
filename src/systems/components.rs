use bevy_ecs::{component::Component, entity::Entity, resource::Resource};
use bitflags::bitflags;
use glam::Vec2;
use rand::{rngs::SmallRng, SeedableRng};

use crate::constants::timing::HURT_WINDOW_MS;

/// Top-left corner of an entity in level pixel space.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Position(pub Vec2);

/// Per-side shrink applied to a bounding box before collision testing.
///
/// Compensates for the transparent padding around sprites.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Inset {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Inset {
    pub const ZERO: Inset = Inset::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }
}

/// Bounding box size plus inset. Never mirrored, whatever way the entity faces.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub size: Vec2,
    pub inset: Inset,
}

impl Collider {
    pub fn new(size: Vec2, inset: Inset) -> Self {
        Self { size, inset }
    }

    /// A collider that uses its full bounding box.
    pub fn solid(size: Vec2) -> Self {
        Self { size, inset: Inset::ZERO }
    }

    /// Whether the inset swallows the whole box on either axis.
    pub fn is_degenerate(&self) -> bool {
        self.inset.left + self.inset.right >= self.size.x || self.inset.top + self.inset.bottom >= self.size.y
    }
}

/// Rendering orientation. `true` means the sprite faces left.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Mirrored(pub bool);

/// Movement step in pixels per movement tick.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Speed(pub f32);

/// Damage dealt by this entity on a successful hit.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attack(pub u32);

/// Result of applying damage to something [`Damageable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// The target was already dead; nothing changed.
    Ignored,
    /// The target lost energy and is still alive.
    Hurt,
    /// This hit brought the target to zero energy.
    Killed,
}

/// Anything that takes damage. Implemented once by [`Health`], shared by every combatant.
pub trait Damageable {
    fn apply_damage(&mut self, amount: u32, now: u64) -> DamageOutcome;
    fn is_dead(&self) -> bool;
}

/// Energy of a combatant together with the timestamp of the last hit it took.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    pub energy: u32,
    pub max: u32,
    pub last_hit_at: Option<u64>,
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self {
            energy: max,
            max,
            last_hit_at: None,
        }
    }

    pub fn with_energy(energy: u32, max: u32) -> Self {
        Self {
            energy: energy.min(max),
            max,
            last_hit_at: None,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.energy == 0
    }

    /// True during the hurt window that follows a hit.
    pub fn is_hurt(&self, now: u64) -> bool {
        self.last_hit_at
            .is_some_and(|hit_at| now.saturating_sub(hit_at) < HURT_WINDOW_MS)
    }

    /// Restores energy up to `max`. The dead stay dead. Returns the amount actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        if self.is_dead() {
            return 0;
        }
        let healed = self.energy.saturating_add(amount).min(self.max);
        let restored = healed - self.energy;
        self.energy = healed;
        restored
    }

    /// Energy as a percentage of `max`, for status bars.
    pub fn percent(&self) -> u8 {
        if self.max == 0 {
            return 0;
        }
        ((self.energy as u64 * 100) / self.max as u64).min(100) as u8
    }
}

impl Damageable for Health {
    fn apply_damage(&mut self, amount: u32, now: u64) -> DamageOutcome {
        if self.is_dead() {
            return DamageOutcome::Ignored;
        }
        self.energy = self.energy.saturating_sub(amount);
        self.last_hit_at = Some(now);
        if self.is_dead() {
            DamageOutcome::Killed
        } else {
            DamageOutcome::Hurt
        }
    }

    fn is_dead(&self) -> bool {
        Health::is_dead(self)
    }
}

/// Tag for everything spawned from a level description; despawned on restart.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct LevelEntity;

/// Static movement-blocking obstacle.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Barrier;

/// The kinds of enemy the character can meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display, strum_macros::EnumIter)]
pub enum EnemyKind {
    PufferFish,
    Jellyfish,
    DangerousJellyfish,
    Boss,
}

impl EnemyKind {
    pub fn is_jellyfish(self) -> bool {
        matches!(self, EnemyKind::Jellyfish | EnemyKind::DangerousJellyfish)
    }

    /// Whether an open fin slap window stops this kind from hurting the character.
    pub fn is_melee_exempt(self) -> bool {
        matches!(self, EnemyKind::PufferFish)
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Enemy {
    pub kind: EnemyKind,
}

/// Player projectiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum ProjectileKind {
    Bubble,
    PoisonBubble,
}

impl ProjectileKind {
    /// Jellyfish can be trapped by any bubble; the boss only reacts to poison.
    pub fn can_hit(self, target: EnemyKind) -> bool {
        match target {
            EnemyKind::Jellyfish | EnemyKind::DangerousJellyfish => true,
            EnemyKind::Boss => self == ProjectileKind::PoisonBubble,
            EnemyKind::PufferFish => false,
        }
    }
}

bitflags! {
    /// Logical controls held during the current tick, independent of keyboard or touch.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Controls: u8 {
        const UP = 1 << 0;
        const RIGHT = 1 << 1;
        const DOWN = 1 << 2;
        const LEFT = 1 << 3;
        const FIN_SLAP = 1 << 4;
        const BUBBLE = 1 << 5;
        const POISON_BUBBLE = 1 << 6;

        const MOVEMENT = Self::UP.bits() | Self::RIGHT.bits() | Self::DOWN.bits() | Self::LEFT.bits();
        const ATTACKS = Self::FIN_SLAP.bits() | Self::BUBBLE.bits() | Self::POISON_BUBBLE.bits();
    }
}

/// Snapshot of held controls, replaced by the host every tick.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState(pub Controls);

/// Game time, advanced by the driver once per movement tick.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameClock {
    /// Milliseconds of game time since the level was loaded.
    pub now_ms: u64,
    /// Movement ticks since the level was loaded.
    pub tick: u64,
}

/// Horizontal camera translation. Always `-character.x`.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct Camera {
    pub offset_x: f32,
}

/// The four status bar percentages pushed to the UI collaborator.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusBars {
    pub life: u8,
    pub boss_life: u8,
    pub coins: u8,
    pub poison: u8,
}

impl Default for StatusBars {
    fn default() -> Self {
        Self {
            life: 100,
            boss_life: 100,
            coins: 0,
            poison: 0,
        }
    }
}

/// Session-wide flags with an explicit lifecycle per level load.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    pub character_dead: bool,
    pub boss_defeated: bool,
    /// Persisted by the host between runs.
    pub sound_on: bool,
    /// Set on teardown; every timer callback and tick checks it first.
    pub stopped: bool,
}

impl Default for GameSession {
    fn default() -> Self {
        Self {
            character_dead: false,
            boss_defeated: false,
            sound_on: true,
            stopped: false,
        }
    }
}

impl GameSession {
    /// Clears per-level state, keeping the host's sound preference.
    pub fn reset(&mut self) {
        *self = Self {
            sound_on: self.sound_on,
            ..Self::default()
        };
    }
}

/// The single slot for the character's live projectile.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActiveProjectile(pub Option<Entity>);

/// Random source for AI jitter. Seedable so tests can pin it.
#[derive(Resource, Debug, Clone)]
pub struct GameRng(pub SmallRng);

impl GameRng {
    pub fn seeded(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self(SmallRng::from_rng(&mut rand::rng()))
    }
}
