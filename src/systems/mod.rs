//! The Entity-Component-System (ECS) module.
//!
//! This module contains all the ECS-related logic, including components, systems,
//! and resources.

pub mod animation;
pub mod boss;
pub mod bundles;
pub mod clock;
pub mod collision;
pub mod combat;
pub mod components;
pub mod enemy;
pub mod item;
pub mod lifetime;
pub mod movement;
pub mod player;
pub mod projectile;
pub mod state;
pub mod status;
pub mod timers;

pub use self::animation::*;
pub use self::boss::*;
pub use self::bundles::*;
pub use self::clock::*;
pub use self::collision::*;
pub use self::combat::*;
pub use self::components::*;
pub use self::enemy::*;
pub use self::item::*;
pub use self::lifetime::*;
pub use self::movement::*;
pub use self::player::*;
pub use self::projectile::*;
pub use self::state::*;
pub use self::status::*;
pub use self::timers::*;
