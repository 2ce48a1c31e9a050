use bevy_ecs::{
    entity::Entity,
    event::EventWriter,
    resource::Resource,
    system::{Query, Res, ResMut},
};
use tracing::debug;

use crate::{
    events::{AudioEvent, GameEvent},
    systems::{Character, GameSession, Health, Timers},
};

/// A resource to track the overall stage of the game from a high-level perspective.
#[derive(Resource, Debug, PartialEq, Eq, Clone, Copy, Default, strum_macros::Display)]
pub enum GameStage {
    /// The main gameplay loop is active.
    #[default]
    Playing,
    /// The host paused the game; game time stands still.
    Paused,
    /// The boss is dead.
    Victory,
    /// The character is dead.
    Defeat,
}

impl GameStage {
    pub fn is_finished(self) -> bool {
        matches!(self, GameStage::Victory | GameStage::Defeat)
    }
}

/// Handles the character's death exactly once.
///
/// Pending timers are cancelled and attack windows closed, so nothing fires on a dead character.
pub fn character_lifecycle_system(
    mut timers: ResMut<Timers>,
    mut session: ResMut<GameSession>,
    mut characters: Query<(Entity, &Health, &mut Character)>,
    mut events: EventWriter<GameEvent>,
) {
    for (entity, health, mut character) in characters.iter_mut() {
        if !health.is_dead() || session.character_dead {
            continue;
        }
        session.character_dead = true;
        let cancelled = timers.cancel_owner(entity);
        character.fin_slapping = false;
        character.bubble_trapping = None;
        events.write(GameEvent::CharacterDied { by: character.hit_by });
        debug!(by = ?character.hit_by, cancelled, "Character died");
    }
}

/// Moves the stage to Victory or Defeat once the session says the level is over.
pub fn stage_system(
    mut stage: ResMut<GameStage>,
    session: Res<GameSession>,
    mut events: EventWriter<GameEvent>,
    mut audio: EventWriter<AudioEvent>,
) {
    let next = match *stage {
        GameStage::Playing if session.character_dead => GameStage::Defeat,
        GameStage::Playing if session.boss_defeated => GameStage::Victory,
        current => current,
    };
    if next == *stage {
        return;
    }

    events.write(GameEvent::StageChanged { from: *stage, to: next });
    audio.write(match next {
        GameStage::Victory => AudioEvent::Victory,
        _ => AudioEvent::Defeat,
    });
    debug!(from = %*stage, to = %next, "Stage changed");
    *stage = next;
}
