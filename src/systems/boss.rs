use std::ops::Range;

use bevy_ecs::component::Component;
use bevy_ecs::entity::Entity;
use bevy_ecs::event::EventWriter;
use bevy_ecs::query::With;
use bevy_ecs::system::{Query, Res, ResMut};
use glam::Vec2;
use rand::Rng;
use tracing::{debug, trace};

use crate::constants::timing::BOSS_INTRO_MS;
use crate::events::{AudioEvent, GameEvent};
use crate::systems::{
    Character, GameClock, GameRng, GameSession, Health, Mirrored, Position, Speed, TimerAction, Timers,
};

/// Lifecycle of the boss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum_macros::Display)]
pub enum BossPhase {
    /// Waiting, hidden, for the character to come close.
    #[default]
    Dormant,
    /// The character came within trigger distance this tick.
    Triggered,
    /// Playing the intro; cannot be hit yet.
    Introducing,
    /// Wandering and fighting.
    Active,
    Dead,
}

/// The seven legs of the boss's wander route, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display, strum_macros::EnumCount, strum_macros::EnumIter)]
pub enum Waypoint {
    DashOne,
    ReturnOne,
    Dive,
    DashTwo,
    Surface,
    DashThree,
    ReturnHome,
}

impl Waypoint {
    pub fn index(self) -> usize {
        self as usize
    }

    /// The next leg; wraps around to the start after returning home.
    pub fn next(self) -> Self {
        match self {
            Waypoint::DashOne => Waypoint::ReturnOne,
            Waypoint::ReturnOne => Waypoint::Dive,
            Waypoint::Dive => Waypoint::DashTwo,
            Waypoint::DashTwo => Waypoint::Surface,
            Waypoint::Surface => Waypoint::DashThree,
            Waypoint::DashThree => Waypoint::ReturnHome,
            Waypoint::ReturnHome => Waypoint::DashOne,
        }
    }

    /// Where this leg ends, for a route anchored at `anchor` spanning `distance` pixels.
    pub fn target(self, anchor: Vec2, distance: f32) -> Vec2 {
        let offset = match self {
            Waypoint::DashOne => Vec2::new(-distance / 2.0, 0.0),
            Waypoint::ReturnOne | Waypoint::ReturnHome => Vec2::ZERO,
            Waypoint::Dive => Vec2::new(0.0, distance / 2.0),
            Waypoint::DashTwo => Vec2::new(-distance * 0.75, distance / 2.0),
            Waypoint::Surface => Vec2::new(-distance * 0.75, 0.0),
            Waypoint::DashThree => Vec2::new(-distance, 0.0),
        };
        anchor + offset
    }

    /// Random speed multiplier range for dash legs; other legs move at base speed.
    pub fn speed_range(self) -> Option<Range<f32>> {
        match self {
            Waypoint::DashOne => Some(1.0..1.5),
            Waypoint::DashTwo => Some(1.5..2.0),
            Waypoint::DashThree => Some(2.0..2.5),
            _ => None,
        }
    }
}

/// Progress along the wander route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WanderRoute {
    pub leg: Waypoint,
    pub speed_factor: f32,
    /// Full cycles completed.
    pub cycles: u32,
    leg_started: bool,
}

impl Default for WanderRoute {
    fn default() -> Self {
        Self {
            leg: Waypoint::DashOne,
            speed_factor: 1.0,
            cycles: 0,
            leg_started: false,
        }
    }
}

impl WanderRoute {
    /// Legs completed in the current cycle. Drops back to zero once the boss returns home.
    pub fn completed_legs(&self) -> usize {
        self.leg.index()
    }

    /// Moves `position` one step along the route.
    ///
    /// The speed factor is drawn once per leg. A leg ends by snapping onto its target. Returns
    /// true on the tick that completes a full cycle.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        position: &mut Vec2,
        anchor: Vec2,
        distance: f32,
        base_speed: f32,
        rng: &mut R,
    ) -> bool {
        if !self.leg_started {
            self.speed_factor = match self.leg.speed_range() {
                Some(range) => rng.random_range(range),
                None => 1.0,
            };
            self.leg_started = true;
        }

        let target = self.leg.target(anchor, distance);
        let step = base_speed * self.speed_factor;
        let remaining = target - *position;
        if remaining.length() > step {
            *position += remaining.normalize_or_zero() * step;
            return false;
        }

        *position = target;
        let finished = self.leg;
        self.leg = finished.next();
        self.leg_started = false;
        if finished == Waypoint::ReturnHome {
            self.cycles += 1;
            return true;
        }
        false
    }
}

/// The end boss.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Boss {
    pub phase: BossPhase,
    /// Home position; the wander route is laid out relative to it.
    pub anchor: Vec2,
    pub wander_distance: f32,
    pub trigger_distance: f32,
    /// Latched by the first trigger; the intro never replays.
    pub already_triggered: bool,
    pub attacking: bool,
    pub route: WanderRoute,
}

impl Boss {
    pub fn new(anchor: Vec2, wander_distance: f32, trigger_distance: f32) -> Self {
        Self {
            phase: BossPhase::Dormant,
            anchor,
            wander_distance,
            trigger_distance,
            already_triggered: false,
            attacking: false,
            route: WanderRoute::default(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.phase == BossPhase::Active
    }

    /// Whether a character at `character_x` wakes the boss.
    pub fn should_trigger(&self, character_x: f32) -> bool {
        self.phase == BossPhase::Dormant
            && !self.already_triggered
            && (self.anchor.x - character_x).abs() < self.trigger_distance
    }
}

/// Wakes the boss once the character comes within trigger distance, then starts the intro.
pub fn boss_trigger_system(
    clock: Res<GameClock>,
    mut timers: ResMut<Timers>,
    characters: Query<(&Position, &Health), With<Character>>,
    mut bosses: Query<(Entity, &Health, &mut Boss)>,
    mut audio: EventWriter<AudioEvent>,
) {
    let Ok((position, health)) = characters.single() else {
        return;
    };
    if health.is_dead() {
        return;
    }

    for (entity, boss_health, mut boss) in bosses.iter_mut() {
        if boss_health.is_dead() {
            continue;
        }
        if boss.should_trigger(position.0.x) {
            boss.already_triggered = true;
            boss.phase = BossPhase::Triggered;
            audio.write(AudioEvent::BossTheme);
            debug!(character_x = position.0.x, anchor_x = boss.anchor.x, "Boss triggered");
        }
        if boss.phase == BossPhase::Triggered {
            boss.phase = BossPhase::Introducing;
            timers.schedule(entity, clock.now_ms, BOSS_INTRO_MS, TimerAction::FinishBossIntro);
        }
    }
}

/// Walks the active boss along its wander route.
///
/// The boss holds still while attacking or hurt.
pub fn boss_wander_system(
    clock: Res<GameClock>,
    mut rng: ResMut<GameRng>,
    mut bosses: Query<(&mut Position, &Speed, &Health, &mut Mirrored, &mut Boss)>,
) {
    for (mut position, speed, health, mut mirrored, mut boss) in bosses.iter_mut() {
        if !boss.is_active() || boss.attacking || health.is_dead() || health.is_hurt(clock.now_ms) {
            continue;
        }

        let anchor = boss.anchor;
        let distance = boss.wander_distance;
        let before = position.0;
        let cycled = boss.route.step(&mut position.0, anchor, distance, speed.0, &mut rng.0);
        if position.0.x != before.x {
            mirrored.0 = position.0.x < before.x;
        }
        if cycled {
            trace!(cycles = boss.route.cycles, "Boss finished a wander cycle");
        }
    }
}

/// Handles the boss's death: stops its timers and marks the level as won.
pub fn boss_lifecycle_system(
    mut timers: ResMut<Timers>,
    mut session: ResMut<GameSession>,
    mut bosses: Query<(Entity, &Health, &mut Boss)>,
    mut events: EventWriter<GameEvent>,
    mut audio: EventWriter<AudioEvent>,
) {
    for (entity, health, mut boss) in bosses.iter_mut() {
        if !health.is_dead() || boss.phase == BossPhase::Dead {
            continue;
        }
        boss.phase = BossPhase::Dead;
        boss.attacking = false;
        let cancelled = timers.cancel_owner(entity);
        session.boss_defeated = true;
        events.write(GameEvent::BossDefeated);
        audio.write(AudioEvent::StopBossTheme);
        debug!(cancelled, "Boss defeated");
    }
}
