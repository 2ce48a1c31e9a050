use glam::Vec2;
use sharkie::{
    error::GameError,
    events::{AudioEvent, GameCommand, GameEvent},
    game::Game,
    level::{BossSpec, CharacterSpec, EnemySpec, LevelData},
    systems::{Controls, Enemy, EnemyKind, GameStage, Health, LevelEntity, PickupKind, Position, Timers},
};
use speculoos::prelude::*;

mod common;

fn character_position(game: &Game) -> Vec2 {
    game.world.get::<Position>(game.character()).unwrap().0
}

#[test]
fn test_tick_advances_game_time() {
    let mut game = common::create_test_game(common::empty_level());

    assert_that(&game.tick()).is_equal_to(GameStage::Playing);
    assert_that(&game.clock().tick).is_equal_to(1);
    assert_that(&game.clock().now_ms).is_equal_to(16);
}

#[test]
fn test_input_moves_character_and_camera() {
    let mut game = common::create_test_game(common::empty_level());
    game.set_input(Controls::RIGHT);

    for _ in 0..10 {
        game.tick();
    }

    assert_that(&character_position(&game)).is_equal_to(Vec2::new(150.0, 100.0));
    assert_that(&game.camera().offset_x).is_equal_to(-150.0);
}

#[test]
fn test_pause_freezes_game_time() {
    let mut game = common::create_test_game(common::empty_level());
    game.tick();

    game.command(GameCommand::TogglePause).expect("pause should succeed");
    assert_that(&game.tick()).is_equal_to(GameStage::Paused);
    assert_that(&game.clock().tick).is_equal_to(1);

    game.command(GameCommand::TogglePause).expect("resume should succeed");
    assert_that(&game.tick()).is_equal_to(GameStage::Playing);
    assert_that(&game.clock().tick).is_equal_to(2);
}

#[test]
fn test_toggle_sound_survives_restart() {
    let mut game = common::create_test_game(common::empty_level());

    game.command(GameCommand::ToggleSound).expect("toggle should succeed");
    assert_that(&game.session().sound_on).is_false();

    game.command(GameCommand::Restart).expect("restart should succeed");
    assert_that(&game.session().sound_on).is_false();
}

#[test]
fn test_stopped_game_does_nothing() {
    let mut game = common::create_test_game(common::empty_level());
    game.set_input(Controls::FIN_SLAP);
    game.tick();
    assert_that(&game.world.resource::<Timers>().len()).is_equal_to(1);

    game.stop();
    game.tick();

    assert_that(&game.clock().tick).is_equal_to(1);
    assert_that(&game.world.resource::<Timers>().is_empty()).is_true();
    assert!(matches!(game.restart(), Err(GameError::InvalidState(_))));
}

#[test]
fn test_restart_rebuilds_the_level() {
    let mut level = common::empty_level();
    level.coins = vec![Vec2::new(1000.0, 0.0), Vec2::new(1200.0, 0.0)];
    let mut game = common::create_test_game(level);
    let spawned = common::count::<LevelEntity>(&mut game.world);

    game.set_input(Controls::RIGHT | Controls::FIN_SLAP);
    for _ in 0..5 {
        game.tick();
    }
    assert_that(&game.world.resource::<Timers>().is_empty()).is_false();

    game.restart().expect("restart should succeed");

    assert_that(&character_position(&game)).is_equal_to(Vec2::new(100.0, 100.0));
    assert_that(&game.clock().tick).is_equal_to(0);
    assert_that(&game.stage()).is_equal_to(GameStage::Playing);
    assert_that(&game.world.resource::<Timers>().is_empty()).is_true();
    assert_that(&common::count::<LevelEntity>(&mut game.world)).is_equal_to(spawned);
}

#[test]
fn test_collecting_a_coin_fills_the_coin_bar() {
    let mut level = common::empty_level();
    // One coin inside the character's collision box, one far away.
    level.coins = vec![Vec2::new(150.0, 200.0), Vec2::new(2000.0, 0.0)];
    let mut game = common::create_test_game(level);

    game.tick();

    assert_that(&game.status().coins).is_equal_to(50);
    assert_that(&game.audio()).contains(AudioEvent::Collect(PickupKind::Coin));
}

#[test]
fn test_custom_start_energy_keeps_full_life_capacity() {
    let mut level = LevelData {
        character: CharacterSpec {
            energy: 60,
            ..CharacterSpec::default()
        },
        ..LevelData::default()
    };
    // Inside the character's collision box.
    level.lives = vec![Vec2::new(150.0, 200.0)];
    let mut game = common::create_test_game(level);

    game.tick();

    assert_that(&game.world.get::<Health>(game.character()).unwrap().max).is_equal_to(100);
    assert_that(&game.world.get::<Health>(game.character()).unwrap().energy).is_equal_to(80);
    assert_that(&game.status().life).is_equal_to(80);
}

#[test]
fn test_one_fin_slap_strikes_an_overlapping_enemy_once() {
    let level = LevelData {
        enemies: vec![EnemySpec::horizontal(EnemyKind::PufferFish, 150.0, 150.0, 400.0, 0.5).with_energy(50)],
        ..LevelData::default()
    };
    let mut game = common::create_test_game(level);

    game.set_input(Controls::FIN_SLAP);
    game.tick();
    game.set_input(Controls::empty());
    // The whole slap spans several combat passes.
    for _ in 0..40 {
        game.tick();
    }

    let mut enemies = game.world.query::<(&Enemy, &Health)>();
    let (enemy, health) = enemies.single(&game.world).expect("one enemy should be spawned");
    assert_that(&enemy.kind).is_equal_to(EnemyKind::PufferFish);
    assert_that(&health.energy).is_equal_to(40);
}

#[test]
fn test_dangerous_jellyfish_sting_is_fatal() {
    let level = LevelData {
        character: CharacterSpec {
            energy: 20,
            ..CharacterSpec::default()
        },
        enemies: vec![EnemySpec::vertical(EnemyKind::DangerousJellyfish, 150.0, 100.0, 200.0, 1.0)],
        ..LevelData::default()
    };
    let mut game = common::create_test_game(level);

    assert_that(&game.tick()).is_equal_to(GameStage::Defeat);

    let events = game.events();
    assert_that(&events).contains(GameEvent::CharacterHurt {
        by: EnemyKind::DangerousJellyfish,
    });
    assert_that(&events).contains(GameEvent::CharacterDied {
        by: Some(EnemyKind::DangerousJellyfish),
    });
    assert_that(&events).contains(GameEvent::StageChanged {
        from: GameStage::Playing,
        to: GameStage::Defeat,
    });
    assert_that(&game.audio()).contains(AudioEvent::Defeat);
    assert_that(&game.status().life).is_equal_to(0);
    assert_that(&game.session().character_dead).is_true();
}

#[test]
fn test_poison_bubble_defeats_the_boss() {
    let mut boss = BossSpec::at(Vec2::new(300.0, 0.0));
    boss.wander_distance = 0.0;
    boss.energy = 20;
    let level = LevelData {
        character: CharacterSpec {
            poison: 1,
            ..CharacterSpec::default()
        },
        boss: Some(boss),
        ..LevelData::default()
    };
    let mut game = common::create_test_game(level);

    game.tick();
    assert_that(&game.audio()).contains(AudioEvent::BossTheme);

    let mut stage = GameStage::Playing;
    for tick in 1..600 {
        // Fire once the intro is over.
        game.set_input(if tick == 80 {
            Controls::POISON_BUBBLE
        } else {
            Controls::empty()
        });
        stage = game.tick();
        if stage.is_finished() {
            break;
        }
    }

    assert_that(&stage).is_equal_to(GameStage::Victory);
    assert_that(&game.session().boss_defeated).is_true();
    assert_that(&game.status().boss_life).is_equal_to(0);
    assert_that(&game.status().poison).is_equal_to(0);
    assert_that(&game.events()).contains(GameEvent::StageChanged {
        from: GameStage::Playing,
        to: GameStage::Victory,
    });
}
