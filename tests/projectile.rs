use bevy_ecs::system::{Commands, RunSystemOnce, ResMut};
use glam::Vec2;
use sharkie::{
    events::AudioEvent,
    systems::{
        attack_input_system, bubble_velocity, projectile_movement_system, spawn_projectile, time_to_live_system,
        timer_system, ActiveProjectile, Character, Controls, Health, InputState, Position, Projectile, ProjectileKind,
        TimeToLive, TimerAction, Timers,
    },
};
use speculoos::prelude::*;

mod common;

#[test]
fn test_bubble_velocity_follows_facing() {
    assert_that(&bubble_velocity(false)).is_equal_to(Vec2::new(6.0, -1.5));
    assert_that(&bubble_velocity(true)).is_equal_to(Vec2::new(-6.0, -1.5));
}

#[test]
fn test_only_one_projectile_is_live() {
    let mut world = common::create_test_world();

    world
        .run_system_once(|mut commands: Commands, mut slot: ResMut<ActiveProjectile>| {
            spawn_projectile(&mut commands, &mut slot, ProjectileKind::Bubble, Vec2::ZERO, false);
            spawn_projectile(&mut commands, &mut slot, ProjectileKind::PoisonBubble, Vec2::ZERO, true);
        })
        .expect("System should run successfully");

    let mut projectiles = world.query::<(bevy_ecs::entity::Entity, &Projectile)>();
    let live: Vec<_> = projectiles.iter(&world).map(|(entity, p)| (entity, p.kind)).collect();
    assert_that(&live).has_length(1);
    assert_that(&live[0].1).is_equal_to(ProjectileKind::PoisonBubble);
    assert_that(&world.resource::<ActiveProjectile>().0).is_equal_to(Some(live[0].0));
}

#[test]
fn test_new_projectile_replaces_one_in_flight() {
    let mut world = common::create_test_world();
    let old = common::spawn_test_projectile(&mut world, ProjectileKind::Bubble, Vec2::new(500.0, 0.0));

    world
        .run_system_once(|mut commands: Commands, mut slot: ResMut<ActiveProjectile>| {
            spawn_projectile(&mut commands, &mut slot, ProjectileKind::Bubble, Vec2::ZERO, false);
        })
        .expect("System should run successfully");

    assert_that(&world.get_entity(old).is_err()).is_true();
    assert_that(&common::count::<Projectile>(&mut world)).is_equal_to(1);
}

#[test]
fn test_poison_bubble_needs_poison() {
    let mut world = common::create_test_world();
    let character = common::spawn_test_character(&mut world, Vec2::ZERO);
    world.resource_mut::<InputState>().0 = Controls::POISON_BUBBLE;

    world
        .run_system_once(attack_input_system)
        .expect("System should run successfully");

    let state = world.get::<Character>(character).unwrap();
    assert_that(&state.bubble_trapping).is_none();
    assert_that(&state.poison).is_equal_to(0);
    assert_that(&world.resource::<Timers>().is_empty()).is_true();
}

#[test]
fn test_poison_bubble_spends_one_poison() {
    let mut world = common::create_test_world();
    let character = common::spawn_test_character_with(
        &mut world,
        Vec2::ZERO,
        Character::with_supplies(2, 0),
        Health::new(100),
    );
    world.resource_mut::<InputState>().0 = Controls::POISON_BUBBLE;

    world
        .run_system_once(attack_input_system)
        .expect("System should run successfully");
    // Held input does not restart the wind-up.
    world
        .run_system_once(attack_input_system)
        .expect("System should run successfully");

    let state = world.get::<Character>(character).unwrap();
    assert_that(&state.poison).is_equal_to(1);
    assert_that(&state.bubble_trapping).is_equal_to(Some(ProjectileKind::PoisonBubble));
    let pending: Vec<_> = world.resource::<Timers>().pending_for(character).map(|t| t.action).collect();
    assert_that(&pending).is_equal_to(vec![TimerAction::ReleaseBubble(ProjectileKind::PoisonBubble)]);
    assert_that(&common::audio_events(&world)).contains(AudioEvent::Bubble(ProjectileKind::PoisonBubble));
}

#[test]
fn test_fin_slap_wins_over_bubbles() {
    let mut world = common::create_test_world();
    let character = common::spawn_test_character_with(
        &mut world,
        Vec2::ZERO,
        Character::with_supplies(3, 0),
        Health::new(100),
    );
    common::set_now(&mut world, 1000);
    world.resource_mut::<InputState>().0 = Controls::FIN_SLAP | Controls::BUBBLE | Controls::POISON_BUBBLE;

    world
        .run_system_once(attack_input_system)
        .expect("System should run successfully");

    let state = world.get::<Character>(character).unwrap();
    assert_that(&state.fin_slapping).is_true();
    assert_that(&state.bubble_trapping).is_none();
    assert_that(&state.poison).is_equal_to(3);
    assert_that(&state.invulnerable_until).is_equal_to(1300);
}

#[test]
fn test_bubble_released_after_wind_up() {
    let mut world = common::create_test_world();
    let character = common::spawn_test_character(&mut world, Vec2::new(10.0, 20.0));
    world.resource_mut::<InputState>().0 = Controls::BUBBLE;
    world
        .run_system_once(attack_input_system)
        .expect("System should run successfully");

    common::set_now(&mut world, 599);
    world.run_system_once(timer_system).expect("System should run successfully");
    assert_that(&common::count::<Projectile>(&mut world)).is_equal_to(0);

    common::set_now(&mut world, 600);
    world.run_system_once(timer_system).expect("System should run successfully");

    assert_that(&world.get::<Character>(character).unwrap().bubble_trapping).is_none();
    let slot = world.resource::<ActiveProjectile>().0.expect("a projectile should be in flight");
    assert_that(&world.get::<Position>(slot).unwrap().0).is_equal_to(Vec2::new(170.0, 120.0));
    assert_that(&world.get::<Projectile>(slot).unwrap().velocity).is_equal_to(Vec2::new(6.0, -1.5));
}

#[test]
fn test_projectile_moves_and_expires() {
    let mut world = common::create_test_world();
    let bubble = common::spawn_test_projectile(&mut world, ProjectileKind::Bubble, Vec2::ZERO);
    world.get_mut::<TimeToLive>(bubble).unwrap().remaining_ms = 32;

    world
        .run_system_once(projectile_movement_system)
        .expect("System should run successfully");
    assert_that(&world.get::<Position>(bubble).unwrap().0).is_equal_to(Vec2::new(6.0, -1.5));

    world
        .run_system_once(time_to_live_system)
        .expect("System should run successfully");
    assert_that(&world.get_entity(bubble).is_ok()).is_true();

    world
        .run_system_once(time_to_live_system)
        .expect("System should run successfully");
    assert_that(&world.get_entity(bubble).is_err()).is_true();
    assert_that(&world.resource::<ActiveProjectile>().0).is_none();
}
