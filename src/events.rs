use bevy_ecs::prelude::*;

use crate::systems::{EnemyKind, GameStage, PickupKind, ProjectileKind};

/// Commands issued by the host outside of the per-tick input snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
pub enum GameCommand {
    ToggleSound,
    TogglePause,
    Restart,
}

/// Gameplay outcomes, readable by the host after every tick.
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    CharacterHurt { by: EnemyKind },
    CharacterDied { by: Option<EnemyKind> },
    EnemyDefeated { entity: Entity, kind: EnemyKind },
    BossDefeated,
    StageChanged { from: GameStage, to: GameStage },
}

/// Discrete sound cues for the host's audio collaborator.
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioEvent {
    Hurt(EnemyKind),
    Collect(PickupKind),
    FinSlap,
    Bubble(ProjectileKind),
    BubblePop,
    BossTheme,
    StopBossTheme,
    Victory,
    Defeat,
}
