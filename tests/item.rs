use bevy_ecs::system::RunSystemOnce;
use glam::Vec2;
use sharkie::{
    events::AudioEvent,
    systems::{pickup_system, Character, Collectible, Health, Pickup, PickupKind},
};
use speculoos::prelude::*;

mod common;

#[test]
fn test_collectibles_apply_to_character() {
    let mut character = Character::default();
    let mut health = Health::with_energy(50, 100);

    assert_that(&PickupKind::Coin.collect(&mut character, &mut health)).is_true();
    assert_that(&PickupKind::Poison.collect(&mut character, &mut health)).is_true();
    assert_that(&PickupKind::Life.collect(&mut character, &mut health)).is_true();

    assert_that(&character.coins).is_equal_to(1);
    assert_that(&character.poison).is_equal_to(1);
    assert_that(&health.energy).is_equal_to(70);
}

#[test]
fn test_dead_character_collects_nothing() {
    let mut character = Character::default();
    let mut health = Health::with_energy(0, 100);

    assert_that(&PickupKind::Life.collect(&mut character, &mut health)).is_false();
    assert_that(&PickupKind::Coin.collect(&mut character, &mut health)).is_false();
    assert_that(&health.energy).is_equal_to(0);
    assert_that(&character.coins).is_equal_to(0);
}

#[test]
fn test_pickup_system_coin_collection() {
    let mut world = common::create_test_world();
    let character = common::spawn_test_character(&mut world, Vec2::ZERO);
    let coin = common::spawn_test_pickup(&mut world, PickupKind::Coin, Vec2::new(100.0, 120.0));

    common::send_collision_event(&mut world, character, coin);

    world
        .run_system_once(pickup_system)
        .expect("System should run successfully");

    assert_that(&world.get::<Character>(character).unwrap().coins).is_equal_to(1);
    assert_that(&world.get_entity(coin).is_err()).is_true();
    assert_that(&common::audio_events(&world)).contains(AudioEvent::Collect(PickupKind::Coin));
}

#[test]
fn test_pickup_counted_once() {
    let mut world = common::create_test_world();
    let character = common::spawn_test_character(&mut world, Vec2::ZERO);
    let coin = common::spawn_test_pickup(&mut world, PickupKind::Coin, Vec2::new(100.0, 120.0));

    // Reported twice in the same pass, then again in a later pass.
    common::send_collision_event(&mut world, character, coin);
    common::send_collision_event(&mut world, character, coin);
    world
        .run_system_once(pickup_system)
        .expect("System should run successfully");

    common::send_collision_event(&mut world, character, coin);
    world
        .run_system_once(pickup_system)
        .expect("System should run successfully");

    assert_that(&world.get::<Character>(character).unwrap().coins).is_equal_to(1);
    assert_that(&common::count::<Pickup>(&mut world)).is_equal_to(0);
}

#[test]
fn test_life_pickup_clamps_energy() {
    let mut world = common::create_test_world();
    let character = common::spawn_test_character_with(
        &mut world,
        Vec2::ZERO,
        Character::default(),
        Health::with_energy(90, 100),
    );
    let life = common::spawn_test_pickup(&mut world, PickupKind::Life, Vec2::new(100.0, 120.0));

    common::send_collision_event(&mut world, character, life);
    world
        .run_system_once(pickup_system)
        .expect("System should run successfully");

    assert_that(&world.get::<Health>(character).unwrap().energy).is_equal_to(100);
    assert_that(&world.get_entity(life).is_err()).is_true();
}

#[test]
fn test_dead_character_leaves_pickup_in_place() {
    let mut world = common::create_test_world();
    let character = common::spawn_test_character_with(
        &mut world,
        Vec2::ZERO,
        Character::default(),
        Health::with_energy(0, 100),
    );
    let life = common::spawn_test_pickup(&mut world, PickupKind::Life, Vec2::new(100.0, 120.0));

    common::send_collision_event(&mut world, character, life);
    world
        .run_system_once(pickup_system)
        .expect("System should run successfully");

    assert_that(&world.get_entity(life).is_ok()).is_true();
    assert_that(&world.get::<Health>(character).unwrap().energy).is_equal_to(0);
}
