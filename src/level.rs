//! Level descriptions: what a level contains, how it is validated and how it is spawned.

use bevy_ecs::entity::Entity;
use bevy_ecs::resource::Resource;
use bevy_ecs::world::World;
use glam::Vec2;
use tracing::debug;

use crate::constants::{character, enemy};
use crate::error::{GameResult, LevelError};
use crate::systems::{
    enemy_profile, Axis, BarrierBundle, Boss, BossBundle, Character, CharacterBundle, Collider, Controls, EnemyBundle,
    EnemyKind, Health, Inset, Patrol, PickupBundle, PickupKind,
};

/// The rectangle the character's position may move within.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelBounds {
    pub min_x: f32,
    pub level_end_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Default for LevelBounds {
    fn default() -> Self {
        Self {
            min_x: 0.0,
            level_end_x: 3000.0,
            min_y: -100.0,
            max_y: 280.0,
        }
    }
}

impl LevelBounds {
    /// Whether a character at `position` may take a step in `direction`.
    pub fn allows(&self, position: Vec2, direction: Controls) -> bool {
        if direction == Controls::RIGHT {
            position.x < self.level_end_x
        } else if direction == Controls::LEFT {
            position.x > self.min_x
        } else if direction == Controls::UP {
            position.y > self.min_y
        } else if direction == Controls::DOWN {
            position.y < self.max_y
        } else {
            true
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CharacterSpec {
    pub position: Vec2,
    pub energy: u32,
    pub poison: u32,
    pub coins: u32,
}

impl Default for CharacterSpec {
    fn default() -> Self {
        Self {
            position: Vec2::new(100.0, 100.0),
            energy: character::ENERGY,
            poison: 0,
            coins: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarrierSpec {
    pub position: Vec2,
    pub size: Vec2,
    pub inset: Inset,
}

impl BarrierSpec {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            size,
            inset: Inset::ZERO,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnemySpec {
    pub kind: EnemyKind,
    pub position: Vec2,
    pub axis: Axis,
    pub patrol_start: f32,
    pub patrol_end: f32,
    pub speed: f32,
    /// Overrides the kind's default energy.
    pub energy: Option<u32>,
}

impl EnemySpec {
    /// A horizontal patroller starting at the near end of its range.
    pub fn horizontal(kind: EnemyKind, y: f32, start: f32, end: f32, speed: f32) -> Self {
        Self {
            kind,
            position: Vec2::new(start, y),
            axis: Axis::Horizontal,
            patrol_start: start,
            patrol_end: end,
            speed,
            energy: None,
        }
    }

    /// A vertical patroller starting at the top of its range.
    pub fn vertical(kind: EnemyKind, x: f32, start: f32, end: f32, speed: f32) -> Self {
        Self {
            kind,
            position: Vec2::new(x, start),
            axis: Axis::Vertical,
            patrol_start: start,
            patrol_end: end,
            speed,
            energy: None,
        }
    }

    pub fn with_energy(mut self, energy: u32) -> Self {
        self.energy = Some(energy);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BossSpec {
    pub anchor: Vec2,
    pub wander_distance: f32,
    pub trigger_distance: f32,
    pub speed: f32,
    pub energy: u32,
}

impl BossSpec {
    pub fn at(anchor: Vec2) -> Self {
        Self {
            anchor,
            wander_distance: enemy::BOSS_WANDER_DISTANCE,
            trigger_distance: enemy::BOSS_TRIGGER_DISTANCE,
            speed: enemy::BOSS_SPEED,
            energy: enemy::BOSS_ENERGY,
        }
    }
}

/// Everything a level is made of. Absent lists are empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LevelData {
    pub bounds: LevelBounds,
    pub character: CharacterSpec,
    pub barriers: Vec<BarrierSpec>,
    pub enemies: Vec<EnemySpec>,
    pub boss: Option<BossSpec>,
    pub coins: Vec<Vec2>,
    pub lives: Vec<Vec2>,
    pub poisons: Vec<Vec2>,
}

/// The loaded level: its bounds and what the status bars measure against.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct Level {
    pub bounds: LevelBounds,
    pub coin_capacity: u32,
    pub poison_capacity: u32,
    pub character: Entity,
}

fn check_collider(entity: &'static str, collider: &Collider) -> Result<(), LevelError> {
    if collider.is_degenerate() {
        return Err(LevelError::DegenerateCollider {
            entity,
            width: collider.size.x,
            height: collider.size.y,
            left: collider.inset.left,
            top: collider.inset.top,
            right: collider.inset.right,
            bottom: collider.inset.bottom,
        });
    }
    Ok(())
}

fn check_speed(entity: &'static str, speed: f32) -> Result<(), LevelError> {
    if speed <= 0.0 || !speed.is_finite() {
        return Err(LevelError::InvalidSpeed { entity, speed });
    }
    Ok(())
}

impl LevelData {
    /// Rejects malformed level data before anything is spawned.
    pub fn validate(&self) -> Result<(), LevelError> {
        let bounds = &self.bounds;
        if bounds.min_x >= bounds.level_end_x {
            return Err(LevelError::InvalidBounds(format!(
                "min_x {} >= level_end_x {}",
                bounds.min_x, bounds.level_end_x
            )));
        }
        if bounds.min_y >= bounds.max_y {
            return Err(LevelError::InvalidBounds(format!(
                "min_y {} >= max_y {}",
                bounds.min_y, bounds.max_y
            )));
        }

        check_collider("character", &Collider::new(character::SIZE, character::INSET))?;

        for barrier in &self.barriers {
            check_collider("barrier", &Collider::new(barrier.size, barrier.inset))?;
        }

        for placed in &self.enemies {
            if placed.kind == EnemyKind::Boss {
                return Err(LevelError::BossOnPatrol);
            }
            if placed.patrol_start >= placed.patrol_end {
                return Err(LevelError::InvalidPatrol {
                    start: placed.patrol_start,
                    end: placed.patrol_end,
                });
            }
            check_speed("enemy", placed.speed)?;
            let (size, inset, ..) = enemy_profile(placed.kind);
            check_collider("enemy", &Collider::new(size, inset))?;
        }

        if let Some(boss) = &self.boss {
            check_speed("boss", boss.speed)?;
        }

        Ok(())
    }

    /// Validates and spawns the level into `world`, returning the character entity.
    ///
    /// Every spawned entity is tagged `LevelEntity`; the [`Level`] resource is (re)inserted.
    pub fn spawn(&self, world: &mut World) -> GameResult<Entity> {
        self.validate()?;

        let start = &self.character;
        let character = world
            .spawn(CharacterBundle::new(
                start.position,
                Character::with_supplies(start.poison, start.coins),
                Health::with_energy(start.energy, character::ENERGY),
            ))
            .id();

        for barrier in &self.barriers {
            world.spawn(BarrierBundle::new(
                barrier.position,
                Collider::new(barrier.size, barrier.inset),
            ));
        }

        for placed in &self.enemies {
            let patrol = Patrol::new(placed.axis, placed.patrol_start, placed.patrol_end);
            world.spawn(EnemyBundle::new(placed.kind, placed.position, patrol, placed.speed, placed.energy));
        }

        if let Some(placed) = &self.boss {
            let boss = Boss::new(placed.anchor, placed.wander_distance, placed.trigger_distance);
            world.spawn(BossBundle::new(boss, placed.speed, placed.energy));
        }

        let pickups = [
            (PickupKind::Coin, &self.coins),
            (PickupKind::Life, &self.lives),
            (PickupKind::Poison, &self.poisons),
        ];
        for (kind, positions) in pickups {
            for position in positions {
                world.spawn(PickupBundle::new(kind, *position));
            }
        }

        world.insert_resource(Level {
            bounds: self.bounds,
            coin_capacity: self.coins.len() as u32 + start.coins,
            poison_capacity: self.poisons.len() as u32 + start.poison,
            character,
        });

        debug!(
            barriers = self.barriers.len(),
            enemies = self.enemies.len(),
            boss = self.boss.is_some(),
            coins = self.coins.len(),
            lives = self.lives.len(),
            poisons = self.poisons.len(),
            "Level spawned"
        );
        Ok(character)
    }
}

/// The first (and only) Sharkie level.
pub fn level_one() -> LevelData {
    LevelData {
        bounds: LevelBounds {
            min_x: 0.0,
            level_end_x: 2900.0,
            min_y: -100.0,
            max_y: 280.0,
        },
        character: CharacterSpec::default(),
        barriers: vec![
            BarrierSpec::new(Vec2::new(900.0, -60.0), Vec2::new(220.0, 150.0)),
            BarrierSpec::new(Vec2::new(1450.0, 330.0), Vec2::new(300.0, 150.0)),
        ],
        enemies: vec![
            EnemySpec::horizontal(EnemyKind::PufferFish, 200.0, 450.0, 750.0, 1.5),
            EnemySpec::horizontal(EnemyKind::PufferFish, 50.0, 1150.0, 1400.0, 2.0),
            EnemySpec::vertical(EnemyKind::Jellyfish, 1250.0, 0.0, 300.0, 1.0),
            EnemySpec::vertical(EnemyKind::Jellyfish, 1800.0, -50.0, 250.0, 1.5),
            EnemySpec::vertical(EnemyKind::DangerousJellyfish, 2050.0, 0.0, 320.0, 2.0),
        ],
        boss: Some(BossSpec::at(Vec2::new(2700.0, 0.0))),
        coins: vec![
            Vec2::new(400.0, 60.0),
            Vec2::new(450.0, 40.0),
            Vec2::new(500.0, 60.0),
            Vec2::new(1000.0, 250.0),
            Vec2::new(1050.0, 230.0),
            Vec2::new(1600.0, 100.0),
            Vec2::new(1650.0, 80.0),
            Vec2::new(2200.0, 150.0),
        ],
        lives: vec![Vec2::new(1300.0, 350.0), Vec2::new(2150.0, 60.0)],
        poisons: vec![
            Vec2::new(600.0, 300.0),
            Vec2::new(1100.0, 100.0),
            Vec2::new(1500.0, 200.0),
            Vec2::new(1950.0, 50.0),
            Vec2::new(2300.0, 250.0),
            Vec2::new(2350.0, 120.0),
        ],
    }
}
