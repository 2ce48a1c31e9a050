#![allow(dead_code)]

use bevy_ecs::{entity::Entity, event::EventRegistry, event::Events, world::World};
use glam::Vec2;
use sharkie::{
    config::GameConfig,
    events::{AudioEvent, GameEvent},
    game::Game,
    level::{Level, LevelBounds, LevelData},
    systems::{
        ActiveProjectile, Attack, Axis, BarrierBundle, Boss, BossBundle, BossPhase, Cadences, Camera, Character,
        CharacterBundle, Collider, CollisionEvent, EnemyBundle, EnemyKind, GameClock, GameRng, GameSession, GameStage,
        Health, InputState, LevelEntity, Mirrored, Patrol, PickupBundle, PickupKind, Position, Projectile,
        ProjectileKind, StatusBars, TimeToLive, Timers,
    },
};

pub const SEED: u64 = 0x5EA;

/// A world with every resource the systems expect, but no entities.
pub fn create_test_world() -> World {
    let mut world = World::new();
    EventRegistry::register_event::<CollisionEvent>(&mut world);
    EventRegistry::register_event::<GameEvent>(&mut world);
    EventRegistry::register_event::<AudioEvent>(&mut world);

    let config = GameConfig::default().with_seed(SEED);
    world.insert_resource(Cadences::new(&config));
    world.insert_resource(config);
    world.insert_resource(GameClock::default());
    world.insert_resource(InputState::default());
    world.insert_resource(Camera::default());
    world.insert_resource(StatusBars::default());
    world.insert_resource(GameSession::default());
    world.insert_resource(ActiveProjectile::default());
    world.insert_resource(Timers::default());
    world.insert_resource(GameStage::default());
    world.insert_resource(GameRng::seeded(SEED));
    world
}

/// Wide open bounds so movement tests only meet the barriers they place.
pub fn open_bounds() -> LevelBounds {
    LevelBounds {
        min_x: -10_000.0,
        level_end_x: 10_000.0,
        min_y: -10_000.0,
        max_y: 10_000.0,
    }
}

pub fn insert_level(world: &mut World, character: Entity, bounds: LevelBounds) {
    world.insert_resource(Level {
        bounds,
        coin_capacity: 4,
        poison_capacity: 4,
        character,
    });
}

pub fn set_now(world: &mut World, now_ms: u64) {
    world.resource_mut::<GameClock>().now_ms = now_ms;
}

pub fn spawn_test_character(world: &mut World, position: Vec2) -> Entity {
    spawn_test_character_with(world, position, Character::default(), Health::new(100))
}

pub fn spawn_test_character_with(world: &mut World, position: Vec2, character: Character, health: Health) -> Entity {
    world.spawn(CharacterBundle::new(position, character, health)).id()
}

/// A patrolling enemy with a wide horizontal patrol around `position`.
pub fn spawn_test_enemy(world: &mut World, kind: EnemyKind, position: Vec2, energy: u32) -> Entity {
    let patrol = Patrol::new(Axis::Horizontal, position.x - 100.0, position.x + 100.0);
    world
        .spawn(EnemyBundle::new(kind, position, patrol, 1.0, Some(energy)))
        .id()
}

pub fn spawn_test_boss(world: &mut World, anchor: Vec2, phase: BossPhase, energy: u32) -> Entity {
    let mut boss = Boss::new(anchor, 300.0, 500.0);
    boss.phase = phase;
    boss.already_triggered = phase != BossPhase::Dormant;
    world.spawn(BossBundle::new(boss, 3.0, energy)).id()
}

pub fn spawn_test_pickup(world: &mut World, kind: PickupKind, position: Vec2) -> Entity {
    world.spawn(PickupBundle::new(kind, position)).id()
}

pub fn spawn_test_barrier(world: &mut World, position: Vec2, size: Vec2) -> Entity {
    world.spawn(BarrierBundle::new(position, Collider::solid(size))).id()
}

/// A projectile placed directly into the active slot.
pub fn spawn_test_projectile(world: &mut World, kind: ProjectileKind, position: Vec2) -> Entity {
    let entity = world
        .spawn((
            Projectile {
                kind,
                velocity: Vec2::new(6.0, -1.5),
            },
            Position(position),
            Collider::solid(Vec2::new(40.0, 40.0)),
            Attack(kind.attack()),
            Mirrored(false),
            TimeToLive::new(2000),
            LevelEntity,
        ))
        .id();
    world.resource_mut::<ActiveProjectile>().0 = Some(entity);
    entity
}

pub fn send_collision_event(world: &mut World, first: Entity, second: Entity) {
    world.send_event(CollisionEvent(first, second));
}

/// Drops every pending event; each `run_system_once` starts reading from the oldest one.
pub fn clear_events(world: &mut World) {
    world.resource_mut::<Events<CollisionEvent>>().clear();
    world.resource_mut::<Events<GameEvent>>().clear();
    world.resource_mut::<Events<AudioEvent>>().clear();
}

pub fn collision_events(world: &World) -> Vec<CollisionEvent> {
    current_events(world)
}

pub fn game_events(world: &World) -> Vec<GameEvent> {
    current_events(world)
}

pub fn audio_events(world: &World) -> Vec<AudioEvent> {
    current_events(world)
}

fn current_events<E: bevy_ecs::event::Event + Copy>(world: &World) -> Vec<E> {
    world
        .resource::<Events<E>>()
        .iter_current_update_events()
        .copied()
        .collect()
}

pub fn count<C: bevy_ecs::component::Component>(world: &mut World) -> usize {
    world.query::<&C>().iter(world).count()
}

/// An empty level with only the character at its default spot.
pub fn empty_level() -> LevelData {
    LevelData::default()
}

pub fn create_test_game(level: LevelData) -> Game {
    Game::new(GameConfig::default().with_seed(SEED), level).expect("test level should be valid")
}
