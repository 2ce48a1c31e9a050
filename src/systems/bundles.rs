use bevy_ecs::bundle::Bundle;
use glam::Vec2;

use crate::constants::{character, enemy};
use crate::systems::{
    Animation, Attack, Barrier, Boss, BossAnimation, Character, CharacterAnimation, Collider, Enemy, EnemyAnimation,
    EnemyKind, EnemyState, Health, Inset, LevelEntity, Mirrored, Patrol, Pickup, PickupKind, Position, Speed,
};

#[derive(Bundle)]
pub struct CharacterBundle {
    pub character: Character,
    pub position: Position,
    pub collider: Collider,
    pub speed: Speed,
    pub health: Health,
    pub attack: Attack,
    pub mirrored: Mirrored,
    pub animation: Animation<CharacterAnimation>,
    pub level: LevelEntity,
}

impl CharacterBundle {
    pub fn new(position: Vec2, character: Character, health: Health) -> Self {
        Self {
            character,
            position: Position(position),
            collider: Collider::new(character::SIZE, character::INSET),
            speed: Speed(character::SPEED),
            health,
            attack: Attack(character::ATTACK),
            mirrored: Mirrored(false),
            animation: Animation::new(CharacterAnimation::Idle),
            level: LevelEntity,
        }
    }
}

/// Size, inset, energy and attack of a patrolling enemy kind.
pub fn enemy_profile(kind: EnemyKind) -> (Vec2, Inset, u32, u32) {
    match kind {
        EnemyKind::PufferFish => (
            enemy::PUFFER_SIZE,
            enemy::PUFFER_INSET,
            enemy::PUFFER_ENERGY,
            enemy::PUFFER_ATTACK,
        ),
        EnemyKind::Jellyfish => (
            enemy::JELLYFISH_SIZE,
            enemy::JELLYFISH_INSET,
            enemy::JELLYFISH_ENERGY,
            enemy::JELLYFISH_ATTACK,
        ),
        EnemyKind::DangerousJellyfish => (
            enemy::JELLYFISH_SIZE,
            enemy::JELLYFISH_INSET,
            enemy::JELLYFISH_ENERGY,
            enemy::DANGEROUS_JELLYFISH_ATTACK,
        ),
        EnemyKind::Boss => (enemy::BOSS_SIZE, enemy::BOSS_INSET, enemy::BOSS_ENERGY, enemy::BOSS_ATTACK),
    }
}

#[derive(Bundle)]
pub struct EnemyBundle {
    pub enemy: Enemy,
    pub state: EnemyState,
    pub patrol: Patrol,
    pub position: Position,
    pub collider: Collider,
    pub speed: Speed,
    pub health: Health,
    pub attack: Attack,
    pub mirrored: Mirrored,
    pub animation: Animation<EnemyAnimation>,
    pub level: LevelEntity,
}

impl EnemyBundle {
    pub fn new(kind: EnemyKind, position: Vec2, patrol: Patrol, speed: f32, energy: Option<u32>) -> Self {
        let (size, inset, default_energy, attack) = enemy_profile(kind);
        Self {
            enemy: Enemy { kind },
            state: EnemyState::Patrolling,
            patrol,
            position: Position(position),
            collider: Collider::new(size, inset),
            speed: Speed(speed),
            health: Health::new(energy.unwrap_or(default_energy)),
            attack: Attack(attack),
            mirrored: Mirrored(false),
            animation: Animation::new(EnemyAnimation::Swim),
            level: LevelEntity,
        }
    }
}

#[derive(Bundle)]
pub struct BossBundle {
    pub enemy: Enemy,
    pub boss: Boss,
    pub position: Position,
    pub collider: Collider,
    pub speed: Speed,
    pub health: Health,
    pub attack: Attack,
    pub mirrored: Mirrored,
    pub animation: Animation<BossAnimation>,
    pub level: LevelEntity,
}

impl BossBundle {
    pub fn new(boss: Boss, speed: f32, energy: u32) -> Self {
        Self {
            enemy: Enemy { kind: EnemyKind::Boss },
            position: Position(boss.anchor),
            boss,
            collider: Collider::new(enemy::BOSS_SIZE, enemy::BOSS_INSET),
            speed: Speed(speed),
            health: Health::new(energy),
            attack: Attack(enemy::BOSS_ATTACK),
            mirrored: Mirrored(false),
            animation: Animation::new(BossAnimation::Dormant),
            level: LevelEntity,
        }
    }
}

#[derive(Bundle)]
pub struct PickupBundle {
    pub pickup: Pickup,
    pub position: Position,
    pub collider: Collider,
    pub level: LevelEntity,
}

impl PickupBundle {
    pub fn new(kind: PickupKind, position: Vec2) -> Self {
        Self {
            pickup: Pickup { kind },
            position: Position(position),
            collider: Collider::solid(kind.size()),
            level: LevelEntity,
        }
    }
}

#[derive(Bundle)]
pub struct BarrierBundle {
    pub barrier: Barrier,
    pub position: Position,
    pub collider: Collider,
    pub level: LevelEntity,
}

impl BarrierBundle {
    pub fn new(position: Vec2, collider: Collider) -> Self {
        Self {
            barrier: Barrier,
            position: Position(position),
            collider,
            level: LevelEntity,
        }
    }
}
