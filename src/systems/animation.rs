use bevy_ecs::component::Component;
use bevy_ecs::system::{Query, Res};
use tracing::trace;

use crate::constants::timing::LONG_IDLE_MS;
use crate::systems::{
    Boss, BossPhase, Character, Controls, EnemyKind, EnemyState, GameClock, Health, InputState, ProjectileKind,
};

/// Animation cursor for some state machine `S`.
///
/// The frame counter restarts whenever the state changes; the renderer maps
/// `(state, frame)` onto its own frame lists.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Animation<S: Copy + Eq + Send + Sync + 'static> {
    pub state: S,
    pub frame: u32,
}

impl<S: Copy + Eq + Send + Sync + 'static> Animation<S> {
    pub fn new(state: S) -> Self {
        Self { state, frame: 0 }
    }

    /// Moves to `next`, restarting the frame counter on a state change. Returns true if the state changed.
    pub fn advance(&mut self, next: S) -> bool {
        if next == self.state {
            self.frame = self.frame.wrapping_add(1);
            false
        } else {
            self.state = next;
            self.frame = 0;
            true
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum CharacterAnimation {
    Idle,
    /// No input for a long while; the shark falls asleep.
    LongIdle,
    Swim,
    FinSlap,
    BubbleTrap(ProjectileKind),
    Hurt(Option<EnemyKind>),
    Dead(Option<EnemyKind>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum BossAnimation {
    Dormant,
    Intro,
    Float,
    Attack,
    Hurt,
    Dead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum EnemyAnimation {
    Swim,
    Trapped,
    Dead,
}

/// Picks the character animation. Death wins, then hurt, then attacks, then movement.
pub fn character_animation(health: &Health, character: &Character, controls: Controls, now: u64) -> CharacterAnimation {
    if health.is_dead() {
        CharacterAnimation::Dead(character.hit_by)
    } else if health.is_hurt(now) {
        CharacterAnimation::Hurt(character.hit_by)
    } else if character.fin_slapping {
        CharacterAnimation::FinSlap
    } else if let Some(kind) = character.bubble_trapping {
        CharacterAnimation::BubbleTrap(kind)
    } else if controls.intersects(Controls::MOVEMENT) {
        CharacterAnimation::Swim
    } else if now.saturating_sub(character.last_active_at) >= LONG_IDLE_MS {
        CharacterAnimation::LongIdle
    } else {
        CharacterAnimation::Idle
    }
}

pub fn boss_animation(boss: &Boss, health: &Health, now: u64) -> BossAnimation {
    match boss.phase {
        _ if health.is_dead() => BossAnimation::Dead,
        BossPhase::Dead => BossAnimation::Dead,
        BossPhase::Dormant | BossPhase::Triggered => BossAnimation::Dormant,
        BossPhase::Introducing => BossAnimation::Intro,
        BossPhase::Active if health.is_hurt(now) => BossAnimation::Hurt,
        BossPhase::Active if boss.attacking => BossAnimation::Attack,
        BossPhase::Active => BossAnimation::Float,
    }
}

pub fn enemy_animation(state: EnemyState) -> EnemyAnimation {
    match state {
        EnemyState::Patrolling => EnemyAnimation::Swim,
        EnemyState::Neutralized => EnemyAnimation::Trapped,
        EnemyState::FloatingAway => EnemyAnimation::Dead,
    }
}

pub fn character_animation_system(
    input: Res<InputState>,
    clock: Res<GameClock>,
    mut query: Query<(&Health, &Character, &mut Animation<CharacterAnimation>)>,
) {
    for (health, character, mut animation) in query.iter_mut() {
        let next = character_animation(health, character, input.0, clock.now_ms);
        if animation.advance(next) {
            trace!(state = %next, "Character animation changed");
        }
    }
}

pub fn boss_animation_system(clock: Res<GameClock>, mut query: Query<(&Boss, &Health, &mut Animation<BossAnimation>)>) {
    for (boss, health, mut animation) in query.iter_mut() {
        let next = boss_animation(boss, health, clock.now_ms);
        if animation.advance(next) {
            trace!(state = %next, "Boss animation changed");
        }
    }
}

pub fn enemy_animation_system(mut query: Query<(&EnemyState, &mut Animation<EnemyAnimation>)>) {
    for (state, mut animation) in query.iter_mut() {
        animation.advance(enemy_animation(*state));
    }
}
