use bevy_ecs::entity::Entity;
use bevy_ecs::event::{Event, EventWriter};
use bevy_ecs::query::With;
use bevy_ecs::system::Query;
use glam::Vec2;

use crate::constants::character::BARRIER_TOLERANCE;
use crate::systems::{Boss, Character, Collider, EnemyState, Health, Pickup, Position, Projectile};

/// An inset-adjusted collision rectangle in level pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// The collision rectangle of an entity: its bounding box shrunk by its inset on every side.
    pub fn of(position: &Position, collider: &Collider) -> Self {
        let inset = collider.inset;
        Self {
            min: position.0 + Vec2::new(inset.left, inset.top),
            max: position.0 + collider.size - Vec2::new(inset.right, inset.bottom),
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }
}

/// Full overlap test between two collision rectangles. Symmetric in its arguments.
pub fn overlaps(a: Aabb, b: Aabb) -> bool {
    a.max.x > b.min.x && a.max.y > b.min.y && a.min.x < b.max.x && a.min.y < b.max.y
}

/// Horizontal contact probe.
///
/// The vertical ranges must overlap after shrinking `a` by the barrier tolerance, then only
/// the horizontal ranges are compared, with `a` widened by `reach` on both sides.
pub fn overlaps_on_x(a: Aabb, b: Aabb, reach: f32) -> bool {
    let vertical = a.max.y - BARRIER_TOLERANCE > b.min.y && a.min.y + BARRIER_TOLERANCE < b.max.y;
    vertical && a.max.x + reach > b.min.x && a.min.x - reach < b.max.x
}

/// Vertical contact probe; the mirror image of [`overlaps_on_x`].
pub fn overlaps_on_y(a: Aabb, b: Aabb, reach: f32) -> bool {
    let horizontal = a.max.x - BARRIER_TOLERANCE > b.min.x && a.min.x + BARRIER_TOLERANCE < b.max.x;
    horizontal && a.max.y + reach > b.min.y && a.min.y - reach < b.max.y
}

/// Helper function to check collision between two entities with colliders.
pub fn check_collision(pos1: &Position, collider1: &Collider, pos2: &Position, collider2: &Collider) -> bool {
    overlaps(Aabb::of(pos1, collider1), Aabb::of(pos2, collider2))
}

/// Two entities found overlapping during a combat pass.
///
/// The first entity is always the active party: the character or a projectile.
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub struct CollisionEvent(pub Entity, pub Entity);

/// Whether an enemy currently takes part in combat collisions.
pub fn is_collidable(health: &Health, state: Option<&EnemyState>, boss: Option<&Boss>) -> bool {
    !health.is_dead()
        && state.is_none_or(|state| state.is_collidable())
        && boss.is_none_or(|boss| boss.is_active())
}

/// Detects overlapping entities and generates collision events for the combat systems.
///
/// Checks the character against live enemies and pickups, and the character's projectile
/// against live enemies. Neutralized, dead or dormant enemies are skipped entirely. Consumers
/// decide what an overlap means; this system only reports it.
#[allow(clippy::type_complexity)]
pub fn collision_system(
    characters: Query<(Entity, &Position, &Collider, &Health), With<Character>>,
    enemies: Query<(Entity, &Position, &Collider, &Health, Option<&EnemyState>, Option<&Boss>)>,
    pickups: Query<(Entity, &Position, &Collider), With<Pickup>>,
    projectiles: Query<(Entity, &Position, &Collider), With<Projectile>>,
    mut events: EventWriter<CollisionEvent>,
) {
    let live_enemies = || {
        enemies
            .iter()
            .filter(|(_, _, _, health, state, boss)| is_collidable(health, *state, *boss))
    };

    for (character, char_pos, char_collider, char_health) in characters.iter() {
        if char_health.is_dead() {
            continue;
        }

        // Check CHARACTER × ENEMY collisions
        for (enemy, enemy_pos, enemy_collider, ..) in live_enemies() {
            if check_collision(char_pos, char_collider, enemy_pos, enemy_collider) {
                events.write(CollisionEvent(character, enemy));
            }
        }

        // Check CHARACTER × PICKUP collisions
        for (pickup, pickup_pos, pickup_collider) in pickups.iter() {
            if check_collision(char_pos, char_collider, pickup_pos, pickup_collider) {
                events.write(CollisionEvent(character, pickup));
            }
        }
    }

    // Check PROJECTILE × ENEMY collisions
    for (projectile, projectile_pos, projectile_collider) in projectiles.iter() {
        for (enemy, enemy_pos, enemy_collider, ..) in live_enemies() {
            if check_collision(projectile_pos, projectile_collider, enemy_pos, enemy_collider) {
                events.write(CollisionEvent(projectile, enemy));
            }
        }
    }
}
