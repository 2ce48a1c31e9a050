//! Collision-and-combat core of Sharkie, an underwater side-scrolling platformer.
//!
//! Rendering, audio playback and input devices belong to the host; this crate owns the
//! world, the per-tick simulation and the state the host reads back.

pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod formatter;
pub mod game;
pub mod level;
pub mod systems;
