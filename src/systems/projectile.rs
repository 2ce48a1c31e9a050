use bevy_ecs::component::Component;
use bevy_ecs::entity::Entity;
use bevy_ecs::system::{Commands, Query};
use glam::Vec2;
use tracing::trace;

use crate::constants::character::{BUBBLE_OFFSET_LEFT, BUBBLE_OFFSET_RIGHT};
use crate::constants::projectile::{BUBBLE_ATTACK, POISON_BUBBLE_ATTACK, SIZE, VELOCITY};
use crate::constants::timing::BUBBLE_LIFETIME_MS;
use crate::systems::{ActiveProjectile, Attack, Collider, LevelEntity, Mirrored, Position, ProjectileKind, TimeToLive};

/// A bubble in flight.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub kind: ProjectileKind,
    pub velocity: Vec2,
}

impl ProjectileKind {
    pub fn attack(self) -> u32 {
        match self {
            ProjectileKind::Bubble => BUBBLE_ATTACK,
            ProjectileKind::PoisonBubble => POISON_BUBBLE_ATTACK,
        }
    }
}

/// Where a bubble leaves a character standing at `position`.
pub fn bubble_origin(position: Vec2, mirrored: bool) -> Vec2 {
    position + if mirrored { BUBBLE_OFFSET_LEFT } else { BUBBLE_OFFSET_RIGHT }
}

/// Bubble velocity for the given facing.
pub fn bubble_velocity(mirrored: bool) -> Vec2 {
    if mirrored {
        Vec2::new(-VELOCITY.x, VELOCITY.y)
    } else {
        VELOCITY
    }
}

/// Spawns a projectile into the single active slot.
///
/// Whatever occupied the slot is despawned first. Every path that removes a projectile also
/// clears the slot, so an occupied slot always names a live (or pending) entity.
pub fn spawn_projectile(
    commands: &mut Commands,
    slot: &mut ActiveProjectile,
    kind: ProjectileKind,
    origin: Vec2,
    mirrored: bool,
) -> Entity {
    if let Some(previous) = slot.0.take() {
        trace!(?previous, "Replacing projectile in flight");
        commands.entity(previous).despawn();
    }

    let entity = commands
        .spawn((
            Projectile {
                kind,
                velocity: bubble_velocity(mirrored),
            },
            Position(origin),
            Collider::solid(SIZE),
            Attack(kind.attack()),
            Mirrored(mirrored),
            TimeToLive::new(BUBBLE_LIFETIME_MS),
            LevelEntity,
        ))
        .id();
    slot.0 = Some(entity);
    entity
}

/// Advances every projectile by its velocity.
pub fn projectile_movement_system(mut projectiles: Query<(&mut Position, &Projectile)>) {
    for (mut position, projectile) in projectiles.iter_mut() {
        position.0 += projectile.velocity;
    }
}
