use bevy_ecs::query::{With, Without};
use bevy_ecs::system::{Query, Res, ResMut};
use bitflags::bitflags;
use glam::Vec2;
use tracing::trace;

use crate::level::Level;
use crate::systems::{
    overlaps, overlaps_on_x, overlaps_on_y, Aabb, Barrier, Camera, Character, Collider, Controls, GameClock, GameSession,
    Health, InputState, Mirrored, Position, Speed,
};

bitflags! {
    /// Sides on which the character is touching a barrier.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct BarrierContact: u8 {
        const UP = 1 << 0;
        const RIGHT = 1 << 1;
        const DOWN = 1 << 2;
        const LEFT = 1 << 3;

        const HORIZONTAL = Self::RIGHT.bits() | Self::LEFT.bits();
        const VERTICAL = Self::UP.bits() | Self::DOWN.bits();
    }
}

/// What a barrier probe found around the character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BarrierProbe {
    /// The character's box is inside some barrier.
    pub inside: bool,
    /// Side of the nearest barrier within reach horizontally.
    pub horizontal: Option<BarrierContact>,
    /// Side of the nearest barrier within reach vertically.
    pub vertical: Option<BarrierContact>,
}

/// Probes every barrier around `mover`, reaching `reach` pixels along each axis.
///
/// The side is decided by comparing box centres. When several barriers are in reach on one
/// axis, the nearest one wins.
pub fn probe_barriers(mover: Aabb, reach: f32, barriers: impl IntoIterator<Item = Aabb>) -> BarrierProbe {
    let center = mover.center();
    let mut probe = BarrierProbe::default();
    let mut nearest_x = f32::INFINITY;
    let mut nearest_y = f32::INFINITY;

    for barrier in barriers {
        let barrier_center = barrier.center();
        if overlaps(mover, barrier) {
            probe.inside = true;
        }
        let dx = barrier_center.x - center.x;
        if overlaps_on_x(mover, barrier, reach) && dx.abs() < nearest_x {
            nearest_x = dx.abs();
            probe.horizontal = Some(if dx > 0.0 {
                BarrierContact::RIGHT
            } else {
                BarrierContact::LEFT
            });
        }
        let dy = barrier_center.y - center.y;
        if overlaps_on_y(mover, barrier, reach) && dy.abs() < nearest_y {
            nearest_y = dy.abs();
            probe.vertical = Some(if dy > 0.0 {
                BarrierContact::DOWN
            } else {
                BarrierContact::UP
            });
        }
    }

    probe
}

impl Character {
    /// Folds a probe into the contact flags.
    ///
    /// While fully blocked the flags are left untouched, so the character can only back out
    /// the way it came in.
    pub fn apply_probe(&mut self, probe: BarrierProbe) {
        self.blocked = probe.inside;
        if self.blocked {
            return;
        }
        self.barriers.remove(BarrierContact::HORIZONTAL);
        if let Some(side) = probe.horizontal {
            self.barriers.insert(side);
        }
        self.barriers.remove(BarrierContact::VERTICAL);
        if let Some(side) = probe.vertical {
            self.barriers.insert(side);
        }
    }
}

/// The four movement directions: control, unit step, the barrier side that blocks it and
/// the facing it leaves behind.
const DIRECTIONS: [(Controls, Vec2, BarrierContact, Option<bool>); 4] = [
    (Controls::RIGHT, Vec2::new(1.0, 0.0), BarrierContact::RIGHT, Some(false)),
    (Controls::LEFT, Vec2::new(-1.0, 0.0), BarrierContact::LEFT, Some(true)),
    (Controls::UP, Vec2::new(0.0, -1.0), BarrierContact::UP, None),
    (Controls::DOWN, Vec2::new(0.0, 1.0), BarrierContact::DOWN, None),
];

/// Moves the character one step per held direction.
///
/// A direction is applied when the level bounds allow it and no barrier blocks that side.
/// Barriers are re-probed before each direction. Dead characters and finished levels stay put.
#[allow(clippy::type_complexity)]
pub fn character_movement_system(
    input: Res<InputState>,
    clock: Res<GameClock>,
    session: Res<GameSession>,
    level: Option<Res<Level>>,
    mut characters: Query<(&mut Position, &Collider, &Speed, &Health, &mut Mirrored, &mut Character)>,
    barriers: Query<(&Position, &Collider), (With<Barrier>, Without<Character>)>,
) {
    let Some(level) = level else {
        return;
    };
    let controls = input.0 & Controls::MOVEMENT;

    for (mut position, collider, speed, health, mut mirrored, mut character) in characters.iter_mut() {
        if health.is_dead() || session.boss_defeated {
            continue;
        }
        if !controls.is_empty() {
            character.last_active_at = clock.now_ms;
        }

        for (control, step, side, facing) in DIRECTIONS {
            if !controls.contains(control) || !level.bounds.allows(position.0, control) {
                continue;
            }

            let mover = Aabb::of(&position, collider);
            let probe = probe_barriers(mover, speed.0, barriers.iter().map(|(pos, col)| Aabb::of(pos, col)));
            character.apply_probe(probe);
            if character.barriers.contains(side) {
                trace!(?side, "Barrier blocks movement");
                continue;
            }

            position.0 += step * speed.0;
            if let Some(facing) = facing {
                mirrored.0 = facing;
            }
        }
    }
}

/// Keeps the camera locked to the character: `offset_x = -character.x`.
pub fn camera_system(mut camera: ResMut<Camera>, characters: Query<&Position, With<Character>>) {
    if let Ok(position) = characters.single() {
        camera.offset_x = -position.0.x;
    }
}
