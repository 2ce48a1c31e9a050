//! This module contains the main game driver: world setup, the system schedule and host commands.

use bevy_ecs::entity::Entity;
use bevy_ecs::event::{Event, EventRegistry, Events};
use bevy_ecs::query::With;
use bevy_ecs::schedule::{IntoScheduleConfigs, Schedule};
use bevy_ecs::world::World;
use tracing::{debug, info, warn};

use crate::config::GameConfig;
use crate::error::{GameError, GameResult};
use crate::events::{AudioEvent, GameCommand, GameEvent};
use crate::formatter;
use crate::level::{Level, LevelData};
use crate::systems::{
    animation_due, attack_input_system, boss_animation_system, boss_lifecycle_system, boss_trigger_system,
    boss_wander_system, camera_system, character_animation_system, character_lifecycle_system,
    character_movement_system, clock_system, collision_system, combat_due, enemy_animation_system,
    enemy_contact_system, float_away_system, patrol_system, pickup_system, projectile_hit_system,
    projectile_movement_system, stage_system, status_system, time_to_live_system, timer_system, ActiveProjectile,
    Cadences, Camera, CollisionEvent, Controls, GameClock, GameRng, GameSession, GameStage, InputState, LevelEntity,
    StatusBars, Timers,
};

/// The `Game` struct is the main entry point for the core.
///
/// It owns the ECS world and the system schedule. The host feeds it input, calls [`Game::tick`]
/// once per movement tick, and reads status, animation and audio state back out.
pub struct Game {
    pub world: World,
    pub schedule: Schedule,
    level: LevelData,
}

impl Game {
    pub fn new(config: GameConfig, level: LevelData) -> GameResult<Game> {
        config.validate()?;
        level.validate()?;

        let mut world = World::default();
        EventRegistry::register_event::<CollisionEvent>(&mut world);
        EventRegistry::register_event::<GameEvent>(&mut world);
        EventRegistry::register_event::<AudioEvent>(&mut world);

        world.insert_resource(match config.seed {
            Some(seed) => GameRng::seeded(seed),
            None => GameRng::from_entropy(),
        });
        world.insert_resource(GameSession::default());
        world.insert_resource(config);
        Self::reset_resources(&mut world);

        let character = level.spawn(&mut world)?;
        debug!(?character, "Game created");

        Ok(Game {
            world,
            schedule: Self::build_schedule(),
            level,
        })
    }

    fn build_schedule() -> Schedule {
        let mut schedule = Schedule::default();
        schedule.add_systems(
            (
                clock_system,
                attack_input_system,
                character_movement_system,
                camera_system,
                (patrol_system, float_away_system, boss_trigger_system, boss_wander_system).chain(),
                (projectile_movement_system, time_to_live_system).chain(),
                (collision_system, enemy_contact_system, projectile_hit_system, pickup_system)
                    .chain()
                    .run_if(combat_due),
                timer_system,
                (character_lifecycle_system, boss_lifecycle_system, status_system).chain(),
                (character_animation_system, boss_animation_system, enemy_animation_system)
                    .chain()
                    .run_if(animation_due),
                stage_system,
            )
                .chain(),
        );
        schedule
    }

    /// Per-level resources, (re)inserted on creation and restart.
    fn reset_resources(world: &mut World) {
        let cadences = Cadences::new(world.resource::<GameConfig>());
        world.insert_resource(cadences);
        world.insert_resource(GameClock::default());
        world.insert_resource(InputState::default());
        world.insert_resource(Camera::default());
        world.insert_resource(StatusBars::default());
        world.insert_resource(ActiveProjectile::default());
        world.insert_resource(Timers::default());
        world.insert_resource(GameStage::default());
        world.resource_mut::<GameSession>().reset();
    }

    /// Advances the game by one movement tick and returns the resulting stage.
    ///
    /// Nothing happens while paused or after [`Game::stop`]. Events written during the tick
    /// stay readable until the next one.
    pub fn tick(&mut self) -> GameStage {
        let stage = self.stage();
        if self.world.resource::<GameSession>().stopped || stage == GameStage::Paused {
            return stage;
        }

        formatter::increment_tick();
        self.world.resource_mut::<Events<CollisionEvent>>().update();
        self.world.resource_mut::<Events<GameEvent>>().update();
        self.world.resource_mut::<Events<AudioEvent>>().update();

        self.schedule.run(&mut self.world);
        self.stage()
    }

    /// Replaces the held-controls snapshot used by the next tick.
    pub fn set_input(&mut self, controls: Controls) {
        self.world.resource_mut::<InputState>().0 = controls;
    }

    pub fn command(&mut self, command: GameCommand) -> GameResult<()> {
        info!(%command, "Host command");
        match command {
            GameCommand::ToggleSound => {
                let mut session = self.world.resource_mut::<GameSession>();
                session.sound_on = !session.sound_on;
            }
            GameCommand::TogglePause => {
                let mut stage = self.world.resource_mut::<GameStage>();
                *stage = match *stage {
                    GameStage::Playing => GameStage::Paused,
                    GameStage::Paused => GameStage::Playing,
                    finished => {
                        warn!(stage = %finished, "Cannot pause a finished level");
                        finished
                    }
                };
            }
            GameCommand::Restart => self.restart()?,
        }
        Ok(())
    }

    /// Tears the level down and spawns it again from its description.
    ///
    /// All pending timers are dropped, so nothing scheduled before the restart can fire after it.
    pub fn restart(&mut self) -> GameResult<()> {
        if self.world.resource::<GameSession>().stopped {
            warn!("Restart requested after teardown");
            return Err(GameError::InvalidState("cannot restart a stopped game".to_string()));
        }
        self.world.resource_mut::<Timers>().clear();

        let mut level_entities = self.world.query_filtered::<Entity, With<LevelEntity>>();
        let stale: Vec<Entity> = level_entities.iter(&self.world).collect();
        for entity in &stale {
            self.world.despawn(*entity);
        }

        Self::reset_resources(&mut self.world);
        let character = self.level.spawn(&mut self.world)?;
        debug!(despawned = stale.len(), ?character, "Level restarted");
        Ok(())
    }

    /// Teardown: stops the session and drops every pending timer. Later ticks do nothing.
    pub fn stop(&mut self) {
        self.world.resource_mut::<GameSession>().stopped = true;
        self.world.resource_mut::<Timers>().clear();
        debug!("Game stopped");
    }

    pub fn stage(&self) -> GameStage {
        *self.world.resource::<GameStage>()
    }

    pub fn status(&self) -> StatusBars {
        *self.world.resource::<StatusBars>()
    }

    pub fn camera(&self) -> Camera {
        *self.world.resource::<Camera>()
    }

    pub fn session(&self) -> &GameSession {
        self.world.resource::<GameSession>()
    }

    pub fn clock(&self) -> GameClock {
        *self.world.resource::<GameClock>()
    }

    /// The character entity of the current level.
    pub fn character(&self) -> Entity {
        self.world.resource::<Level>().character
    }

    /// Gameplay events written during the last tick.
    pub fn events(&self) -> Vec<GameEvent> {
        Self::current::<GameEvent>(&self.world)
    }

    /// Audio cues written during the last tick.
    pub fn audio(&self) -> Vec<AudioEvent> {
        Self::current::<AudioEvent>(&self.world)
    }

    fn current<E: Event + Copy>(world: &World) -> Vec<E> {
        world.resource::<Events<E>>().iter_current_update_events().copied().collect()
    }
}
