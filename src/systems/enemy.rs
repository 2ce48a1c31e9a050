use bevy_ecs::component::Component;
use bevy_ecs::system::Query;

use crate::constants::enemy::FLOAT_AWAY_VELOCITY;
use crate::systems::{Mirrored, Position, Speed};

/// The axis a patrolling enemy moves along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Back-and-forth movement between `start` and `end` on one axis.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Patrol {
    pub axis: Axis,
    pub start: f32,
    pub end: f32,
    /// Set once the far end has been reached; cleared again at the start.
    pub reached_far_end: bool,
}

impl Patrol {
    pub fn new(axis: Axis, start: f32, end: f32) -> Self {
        Self {
            axis,
            start,
            end,
            reached_far_end: false,
        }
    }

    /// The coordinate this patrol moves.
    pub fn coordinate(&self, position: &Position) -> f32 {
        match self.axis {
            Axis::Horizontal => position.0.x,
            Axis::Vertical => position.0.y,
        }
    }

    /// One check-then-move step. Returns the next coordinate.
    ///
    /// Direction flips once the coordinate has passed an end, then the enemy moves one step
    /// in the (possibly new) direction. The coordinate overshoots an end by at most `speed`.
    pub fn step(&mut self, coordinate: f32, speed: f32) -> f32 {
        if coordinate > self.end {
            self.reached_far_end = true;
        } else if coordinate < self.start {
            self.reached_far_end = false;
        }

        if self.reached_far_end {
            coordinate - speed
        } else {
            coordinate + speed
        }
    }
}

/// Lifecycle of a patrolling enemy.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default, strum_macros::Display)]
pub enum EnemyState {
    #[default]
    Patrolling,
    /// Trapped in a bubble; held in place and ignored by collisions.
    Neutralized,
    /// Dead; drifts up and off screen.
    FloatingAway,
}

impl EnemyState {
    pub fn is_collidable(&self) -> bool {
        matches!(self, EnemyState::Patrolling)
    }
}

/// Moves patrolling enemies along their patrol axis.
pub fn patrol_system(mut enemies: Query<(&mut Position, &Speed, &mut Patrol, &mut Mirrored, &EnemyState)>) {
    for (mut position, speed, mut patrol, mut mirrored, state) in enemies.iter_mut() {
        if *state != EnemyState::Patrolling {
            continue;
        }

        let coordinate = patrol.coordinate(&position);
        let next = patrol.step(coordinate, speed.0);
        match patrol.axis {
            Axis::Horizontal => {
                position.0.x = next;
                mirrored.0 = patrol.reached_far_end;
            }
            Axis::Vertical => position.0.y = next,
        }
    }
}

/// Drifts dead enemies up and away.
pub fn float_away_system(mut enemies: Query<(&mut Position, &EnemyState)>) {
    for (mut position, state) in enemies.iter_mut() {
        if *state == EnemyState::FloatingAway {
            position.0 += FLOAT_AWAY_VELOCITY;
        }
    }
}
