use bevy_ecs::{
    component::Component,
    entity::Entity,
    event::{EventReader, EventWriter},
    system::{Commands, Query},
};
use glam::Vec2;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::{
    constants::{
        character::LIFE_PICKUP_ENERGY,
        pickup::{COIN_SIZE, LIFE_SIZE, POISON_SIZE},
    },
    events::AudioEvent,
    systems::{Character, CollisionEvent, Health},
};

/// The collectibles scattered through a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display, strum_macros::EnumIter)]
pub enum PickupKind {
    Coin,
    Life,
    Poison,
}

impl PickupKind {
    pub fn size(self) -> Vec2 {
        match self {
            PickupKind::Coin => COIN_SIZE,
            PickupKind::Life => LIFE_SIZE,
            PickupKind::Poison => POISON_SIZE,
        }
    }
}

/// Something the character can pick up.
pub trait Collectible {
    /// Applies the pickup to the character. Returns false when it cannot be taken.
    fn collect(&self, character: &mut Character, health: &mut Health) -> bool;
}

impl Collectible for PickupKind {
    fn collect(&self, character: &mut Character, health: &mut Health) -> bool {
        if health.is_dead() {
            return false;
        }
        match self {
            PickupKind::Coin => character.coins += 1,
            PickupKind::Life => {
                health.heal(LIFE_PICKUP_ENERGY);
            }
            PickupKind::Poison => character.poison += 1,
        }
        true
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pickup {
    pub kind: PickupKind,
}

/// Applies and despawns every pickup the character touched.
///
/// A pickup is taken at most once, even when reported several times in one pass.
pub fn pickup_system(
    mut commands: Commands,
    mut collisions: EventReader<CollisionEvent>,
    mut characters: Query<(&mut Character, &mut Health)>,
    pickups: Query<&Pickup>,
    mut audio: EventWriter<AudioEvent>,
) {
    let mut taken: SmallVec<[Entity; 4]> = SmallVec::new();

    for &CollisionEvent(first, second) in collisions.read() {
        if taken.contains(&second) {
            continue;
        }
        let Ok(pickup) = pickups.get(second) else {
            continue;
        };
        let Ok((mut character, mut health)) = characters.get_mut(first) else {
            continue;
        };

        if !pickup.kind.collect(&mut character, &mut health) {
            trace!(kind = %pickup.kind, "Pickup refused");
            continue;
        }
        taken.push(second);
        commands.entity(second).despawn();
        audio.write(AudioEvent::Collect(pickup.kind));
        debug!(
            kind = %pickup.kind,
            coins = character.coins,
            poison = character.poison,
            energy = health.energy,
            "Pickup collected"
        );
    }
}
