use bevy_ecs::component::Component;
use bevy_ecs::entity::Entity;
use bevy_ecs::event::EventWriter;
use bevy_ecs::system::{Query, Res, ResMut};
use tracing::{debug, trace};

use crate::constants::timing::{BUBBLE_WIND_UP_MS, FIN_SLAP_INVULNERABLE_MS, FIN_SLAP_MS};
use crate::events::AudioEvent;
use crate::systems::{
    BarrierContact, Controls, EnemyKind, GameClock, GameSession, Health, InputState, ProjectileKind, TimerAction, Timers,
};

/// The player-controlled shark.
#[derive(Component, Debug, Clone, PartialEq, Default)]
pub struct Character {
    /// Poison bottles available for poison bubbles.
    pub poison: u32,
    pub coins: u32,
    /// Kind of the enemy that last damaged the character.
    pub hit_by: Option<EnemyKind>,
    /// Sides currently touching a barrier.
    pub barriers: BarrierContact,
    /// The character's box is inside a barrier.
    pub blocked: bool,
    pub fin_slapping: bool,
    /// Set while a bubble is winding up.
    pub bubble_trapping: Option<ProjectileKind>,
    /// Game time until which no damage is taken.
    pub invulnerable_until: u64,
    /// Game time of the last movement or attack input.
    pub last_active_at: u64,
}

impl Character {
    pub fn with_supplies(poison: u32, coins: u32) -> Self {
        Self {
            poison,
            coins,
            ..Self::default()
        }
    }

    pub fn is_invulnerable(&self, now: u64) -> bool {
        now < self.invulnerable_until
    }

    pub fn is_attacking(&self) -> bool {
        self.fin_slapping || self.bubble_trapping.is_some()
    }
}

/// Starts the attack requested by the held controls.
///
/// Attacks are mutually exclusive per tick, in priority order: fin slap, bubble, poison bubble.
/// A poison bubble needs a poison bottle and spends it when the wind-up starts. An attack that
/// is already running is not restarted.
pub fn attack_input_system(
    input: Res<InputState>,
    clock: Res<GameClock>,
    session: Res<GameSession>,
    mut timers: ResMut<Timers>,
    mut characters: Query<(Entity, &Health, &mut Character)>,
    mut audio: EventWriter<AudioEvent>,
) {
    let controls = input.0;
    let now = clock.now_ms;
    let Ok((entity, health, mut character)) = characters.single_mut() else {
        return;
    };
    if health.is_dead() || session.stopped || session.boss_defeated {
        return;
    }
    if controls.intersects(Controls::ATTACKS) {
        character.last_active_at = now;
    }

    if controls.contains(Controls::FIN_SLAP) {
        if character.fin_slapping {
            return;
        }
        character.fin_slapping = true;
        character.invulnerable_until = now + FIN_SLAP_INVULNERABLE_MS;
        timers.schedule(entity, now, FIN_SLAP_MS, TimerAction::EndFinSlap);
        audio.write(AudioEvent::FinSlap);
        debug!(now, "Fin slap started");
    } else if controls.contains(Controls::BUBBLE) {
        start_bubble(entity, now, ProjectileKind::Bubble, &mut character, &mut timers, &mut audio);
    } else if controls.contains(Controls::POISON_BUBBLE) {
        if character.bubble_trapping.is_some() {
            return;
        }
        if character.poison == 0 {
            trace!("Poison bubble requested without poison");
            return;
        }
        character.poison -= 1;
        start_bubble(
            entity,
            now,
            ProjectileKind::PoisonBubble,
            &mut character,
            &mut timers,
            &mut audio,
        );
    }
}

fn start_bubble(
    entity: Entity,
    now: u64,
    kind: ProjectileKind,
    character: &mut Character,
    timers: &mut Timers,
    audio: &mut EventWriter<AudioEvent>,
) {
    if character.bubble_trapping.is_some() {
        return;
    }
    character.bubble_trapping = Some(kind);
    timers.schedule(entity, now, BUBBLE_WIND_UP_MS, TimerAction::ReleaseBubble(kind));
    audio.write(AudioEvent::Bubble(kind));
    debug!(%kind, now, poison = character.poison, "Bubble wind-up started");
}
