use bevy_ecs::entity::Entity;
use bevy_ecs::event::{EventReader, EventWriter};
use bevy_ecs::query::Without;
use bevy_ecs::system::{Commands, Query, Res, ResMut};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::constants::timing::{BOSS_ATTACK_MS, NEUTRALIZED_MS};
use crate::events::{AudioEvent, GameEvent};
use crate::systems::{
    is_collidable, ActiveProjectile, Attack, Boss, Character, CollisionEvent, DamageOutcome, Damageable, Enemy,
    EnemyState, GameClock, Health, Projectile, TimerAction, Timers,
};

/// Resolves character contacts with enemies.
///
/// An open fin slap window damages patrolling enemies first, at most once per enemy hurt
/// window; killed enemies float away. The
/// boss starts its attack window on contact. The character then takes the enemy's attack unless
/// it is still in its hurt window, invulnerable, or slapping an enemy that melee disarms.
#[allow(clippy::type_complexity)]
pub fn enemy_contact_system(
    clock: Res<GameClock>,
    mut timers: ResMut<Timers>,
    mut collisions: EventReader<CollisionEvent>,
    mut characters: Query<(&Attack, &mut Health, &mut Character)>,
    mut enemies: Query<(&Enemy, &Attack, &mut Health, Option<&mut EnemyState>, Option<&mut Boss>), Without<Character>>,
    mut events: EventWriter<GameEvent>,
    mut audio: EventWriter<AudioEvent>,
) {
    let now = clock.now_ms;

    for &CollisionEvent(first, second) in collisions.read() {
        let Ok((char_attack, mut char_health, mut character)) = characters.get_mut(first) else {
            continue;
        };
        let Ok((enemy, enemy_attack, mut enemy_health, mut state, boss)) = enemies.get_mut(second) else {
            continue;
        };
        if char_health.is_dead()
            || !is_collidable(&enemy_health, state.as_deref(), boss.as_deref())
        {
            continue;
        }

        // One melee hit per enemy hurt window.
        if character.fin_slapping && !enemy_health.is_hurt(now) {
            if let Some(state) = state.as_deref_mut() {
                let outcome = enemy_health.apply_damage(char_attack.0, now);
                trace!(kind = %enemy.kind, ?outcome, energy = enemy_health.energy, "Fin slap landed");
                if outcome == DamageOutcome::Killed {
                    *state = EnemyState::FloatingAway;
                    events.write(GameEvent::EnemyDefeated {
                        entity: second,
                        kind: enemy.kind,
                    });
                    debug!(kind = %enemy.kind, "Enemy slapped away");
                    continue;
                }
            }
        }

        if let Some(mut boss) = boss {
            if !boss.attacking {
                boss.attacking = true;
                timers.schedule(second, now, BOSS_ATTACK_MS, TimerAction::EndBossAttack);
                trace!("Boss attack started");
            }
        }

        if character.fin_slapping && enemy.kind.is_melee_exempt() {
            continue;
        }
        if char_health.is_hurt(now) || character.is_invulnerable(now) {
            continue;
        }

        let outcome = char_health.apply_damage(enemy_attack.0, now);
        character.hit_by = Some(enemy.kind);
        events.write(GameEvent::CharacterHurt { by: enemy.kind });
        audio.write(AudioEvent::Hurt(enemy.kind));
        debug!(by = %enemy.kind, ?outcome, energy = char_health.energy, "Character hurt");
    }
}

/// Resolves projectile hits.
///
/// A projectile is consumed by the first enemy it can hit, freeing the active slot. Jellyfish
/// are neutralized for a while; the boss only takes the damage.
#[allow(clippy::type_complexity)]
pub fn projectile_hit_system(
    mut commands: Commands,
    clock: Res<GameClock>,
    mut timers: ResMut<Timers>,
    mut slot: ResMut<ActiveProjectile>,
    mut collisions: EventReader<CollisionEvent>,
    projectiles: Query<(&Projectile, &Attack)>,
    mut enemies: Query<(&Enemy, &mut Health, Option<&mut EnemyState>, Option<&Boss>)>,
    mut events: EventWriter<GameEvent>,
    mut audio: EventWriter<AudioEvent>,
) {
    let now = clock.now_ms;
    let mut consumed: SmallVec<[Entity; 2]> = SmallVec::new();

    for &CollisionEvent(first, second) in collisions.read() {
        if consumed.contains(&first) {
            continue;
        }
        let Ok((projectile, attack)) = projectiles.get(first) else {
            continue;
        };
        let Ok((enemy, mut health, mut state, boss)) = enemies.get_mut(second) else {
            continue;
        };
        if !projectile.kind.can_hit(enemy.kind) || !is_collidable(&health, state.as_deref(), boss) {
            continue;
        }

        let outcome = health.apply_damage(attack.0, now);
        consumed.push(first);
        commands.entity(first).despawn();
        if slot.0 == Some(first) {
            slot.0 = None;
        }
        audio.write(AudioEvent::BubblePop);
        debug!(projectile = %projectile.kind, target = %enemy.kind, ?outcome, energy = health.energy, "Projectile hit");

        if let Some(state) = state.as_deref_mut() {
            if enemy.kind.is_jellyfish() {
                *state = EnemyState::Neutralized;
                timers.schedule(second, now, NEUTRALIZED_MS, TimerAction::ReleaseNeutralized);
            }
            if outcome == DamageOutcome::Killed {
                events.write(GameEvent::EnemyDefeated {
                    entity: second,
                    kind: enemy.kind,
                });
            }
        }
    }
}
