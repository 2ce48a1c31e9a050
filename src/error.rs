//! Centralized error types for the Sharkie core.
//!
//! The simulation itself never fails at runtime: missing collaborators are
//! no-ops and numeric state saturates. Errors only surface while validating
//! configuration and level data, before anything is spawned.

/// Main error type for the Sharkie core.
///
/// This is the primary error type that should be used in public APIs.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Level error: {0}")]
    Level(#[from] LevelError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Errors raised while validating a level description.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum LevelError {
    #[error("{entity} collider is degenerate: size {width}x{height} with insets ({left}, {top}, {right}, {bottom})")]
    DegenerateCollider {
        entity: &'static str,
        width: f32,
        height: f32,
        left: f32,
        top: f32,
        right: f32,
        bottom: f32,
    },

    #[error("Patrol range must have start < end, found {start}..{end}")]
    InvalidPatrol { start: f32, end: f32 },

    #[error("Level bounds are inverted: {0}")]
    InvalidBounds(String),

    #[error("{entity} has non-positive speed {speed}")]
    InvalidSpeed { entity: &'static str, speed: f32 },

    #[error("The boss cannot be placed as a patrolling enemy")]
    BossOnPatrol,
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
