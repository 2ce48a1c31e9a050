use bevy_ecs::{
    component::Component,
    entity::Entity,
    event::EventWriter,
    system::{Commands, Query, Res, ResMut},
};

use crate::config::GameConfig;
use crate::events::AudioEvent;
use crate::systems::ActiveProjectile;

/// Component for entities that should be automatically deleted after some game time
#[derive(Component, Debug, Clone, Copy)]
pub struct TimeToLive {
    pub remaining_ms: u64,
}

impl TimeToLive {
    pub fn new(ms: u64) -> Self {
        Self { remaining_ms: ms }
    }
}

/// System that manages entities with TimeToLive components, decrementing their remaining time
/// and despawning them when they expire. An expiring projectile frees the active slot.
pub fn time_to_live_system(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut slot: ResMut<ActiveProjectile>,
    mut query: Query<(Entity, &mut TimeToLive)>,
    mut audio: EventWriter<AudioEvent>,
) {
    for (entity, mut ttl) in query.iter_mut() {
        if ttl.remaining_ms <= config.frame_ms {
            // Entity has expired, despawn it
            commands.entity(entity).despawn();
            if slot.0 == Some(entity) {
                slot.0 = None;
                audio.write(AudioEvent::BubblePop);
            }
        } else {
            ttl.remaining_ms -= config.frame_ms;
        }
    }
}
