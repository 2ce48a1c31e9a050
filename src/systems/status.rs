use bevy_ecs::change_detection::DetectChangesMut;
use bevy_ecs::query::With;
use bevy_ecs::system::{Query, Res, ResMut};

use crate::level::Level;
use crate::systems::{Boss, Character, Health, StatusBars};

/// `count` as a percentage of `capacity`, clamped to 100.
pub fn fill_percent(count: u32, capacity: u32) -> u8 {
    if capacity == 0 {
        return 0;
    }
    ((count as u64 * 100) / capacity as u64).min(100) as u8
}

/// Recomputes the four status bars from the current level state.
pub fn status_system(
    level: Option<Res<Level>>,
    mut status: ResMut<StatusBars>,
    characters: Query<(&Health, &Character)>,
    bosses: Query<&Health, With<Boss>>,
) {
    let mut next = *status;
    if let Ok((health, character)) = characters.single() {
        next.life = health.percent();
        if let Some(level) = &level {
            next.coins = fill_percent(character.coins, level.coin_capacity);
            next.poison = fill_percent(character.poison, level.poison_capacity);
        }
    }
    if let Ok(health) = bosses.single() {
        next.boss_life = health.percent();
    }
    status.set_if_neq(next);
}
