use bevy_ecs::entity::Entity;
use bevy_ecs::resource::Resource;
use bevy_ecs::system::{Commands, Query, Res, ResMut};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::systems::{
    bubble_origin, spawn_projectile, ActiveProjectile, Boss, BossPhase, Character, EnemyState, GameClock, GameSession,
    Health, Mirrored, Position, ProjectileKind,
};

pub type TimerId = u64;

/// Deferred state changes owned by an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum TimerAction {
    /// Closes the character's fin slap window.
    EndFinSlap,
    /// Ends the wind-up and releases a bubble.
    ReleaseBubble(ProjectileKind),
    /// Ends the boss intro; the boss becomes active.
    FinishBossIntro,
    /// Closes the boss attack window.
    EndBossAttack,
    /// Frees a bubbled jellyfish.
    ReleaseNeutralized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    pub id: TimerId,
    pub owner: Entity,
    pub due_at: u64,
    pub action: TimerAction,
}

/// Registry of every pending one-shot timer, keyed by owner so death and teardown can
/// cancel them in one sweep.
#[derive(Resource, Debug, Default)]
pub struct Timers {
    next_id: TimerId,
    pending: Vec<Timer>,
}

impl Timers {
    pub fn schedule(&mut self, owner: Entity, now: u64, delay_ms: u64, action: TimerAction) -> TimerId {
        let id = self.next_id;
        self.next_id += 1;
        self.pending.push(Timer {
            id,
            owner,
            due_at: now + delay_ms,
            action,
        });
        trace!(id, ?owner, %action, due_at = now + delay_ms, "Timer scheduled");
        id
    }

    /// Returns whether a pending timer was removed.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|timer| timer.id != id);
        self.pending.len() != before
    }

    /// Cancels every timer owned by `owner`, returning how many were dropped.
    pub fn cancel_owner(&mut self, owner: Entity) -> usize {
        let before = self.pending.len();
        self.pending.retain(|timer| timer.owner != owner);
        before - self.pending.len()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn pending_for(&self, owner: Entity) -> impl Iterator<Item = &Timer> {
        self.pending.iter().filter(move |timer| timer.owner == owner)
    }

    /// Removes and returns every timer due at `now`, oldest deadline first.
    pub fn take_due(&mut self, now: u64) -> SmallVec<[Timer; 4]> {
        let mut due: SmallVec<[Timer; 4]> = SmallVec::new();
        self.pending.retain(|timer| {
            if timer.due_at <= now {
                due.push(*timer);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|timer| (timer.due_at, timer.id));
        due
    }
}

/// Fires due timers.
///
/// Every callback first re-checks that the session is running and that its owner still
/// exists and is alive; stale timers are dropped silently.
#[allow(clippy::type_complexity)]
pub fn timer_system(
    mut commands: Commands,
    clock: Res<GameClock>,
    session: Res<GameSession>,
    mut timers: ResMut<Timers>,
    mut slot: ResMut<ActiveProjectile>,
    mut characters: Query<(&Position, &Mirrored, &Health, &mut Character)>,
    mut bosses: Query<(&Health, &mut Boss)>,
    mut enemies: Query<(&Health, &mut EnemyState)>,
) {
    if session.stopped {
        timers.clear();
        return;
    }

    for timer in timers.take_due(clock.now_ms) {
        match timer.action {
            TimerAction::EndFinSlap => {
                let Ok((_, _, health, mut character)) = characters.get_mut(timer.owner) else {
                    continue;
                };
                if health.is_dead() || session.character_dead {
                    continue;
                }
                character.fin_slapping = false;
            }
            TimerAction::ReleaseBubble(kind) => {
                let Ok((position, mirrored, health, mut character)) = characters.get_mut(timer.owner) else {
                    continue;
                };
                if health.is_dead() || session.character_dead {
                    continue;
                }
                character.bubble_trapping = None;
                let origin = bubble_origin(position.0, mirrored.0);
                let projectile = spawn_projectile(&mut commands, &mut slot, kind, origin, mirrored.0);
                debug!(%kind, ?projectile, "Bubble released");
            }
            TimerAction::FinishBossIntro => {
                let Ok((health, mut boss)) = bosses.get_mut(timer.owner) else {
                    continue;
                };
                if health.is_dead() || boss.phase != BossPhase::Introducing {
                    continue;
                }
                boss.phase = BossPhase::Active;
                debug!("Boss intro finished");
            }
            TimerAction::EndBossAttack => {
                let Ok((health, mut boss)) = bosses.get_mut(timer.owner) else {
                    continue;
                };
                if health.is_dead() {
                    continue;
                }
                boss.attacking = false;
            }
            TimerAction::ReleaseNeutralized => {
                let Ok((health, mut state)) = enemies.get_mut(timer.owner) else {
                    continue;
                };
                if *state != EnemyState::Neutralized {
                    continue;
                }
                *state = if health.is_dead() {
                    EnemyState::FloatingAway
                } else {
                    EnemyState::Patrolling
                };
                trace!(owner = ?timer.owner, state = ?*state, "Neutralized enemy released");
            }
        }
    }
}
