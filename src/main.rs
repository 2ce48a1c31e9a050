#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(coverage_nightly, coverage(off))]

//! Headless demo: plays the built-in level with a scripted pilot and logs what happens.

use std::env;

use anyhow::{Context, Result};
use sharkie::config::GameConfig;
use sharkie::constants::LOOP_TIME;
use sharkie::formatter::CustomFormatter;
use sharkie::game::Game;
use sharkie::level::level_one;
use sharkie::systems::{Character, Controls};
use tracing::{debug, info};
use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_TICKS: u64 = 60 * 90;

/// Swims right, weaving up and down, and keeps attacking on a fixed rhythm.
fn pilot(tick: u64, poison: u32) -> Controls {
    let mut controls = Controls::RIGHT;
    controls |= if (tick / 120) % 2 == 0 { Controls::UP } else { Controls::DOWN };

    if tick % 45 == 0 {
        controls |= Controls::FIN_SLAP;
    } else if poison > 0 && tick % 50 == 0 {
        controls |= Controls::POISON_BUBBLE;
    } else if tick % 70 == 0 {
        controls |= Controls::BUBBLE;
    }
    controls
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sharkie=debug"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .event_format(CustomFormatter)
        .finish()
        .with(ErrorLayer::default());
    tracing::subscriber::set_global_default(subscriber).context("could not install the tracing subscriber")?;

    let ticks = match env::var("SHARKIE_TICKS") {
        Ok(raw) => raw.parse::<u64>().with_context(|| format!("SHARKIE_TICKS is not a number: {raw:?}"))?,
        Err(_) => DEFAULT_TICKS,
    };
    let realtime = env::var_os("SHARKIE_REALTIME").is_some();
    let config = GameConfig::from_env()?;

    let mut game = Game::new(config, level_one())?;
    info!(ticks, realtime, "Starting headless run");

    let mut stage = game.stage();
    for tick in 0..ticks {
        let character = game.character();
        let poison = game
            .world
            .get::<Character>(character)
            .map_or(0, |character| character.poison);
        game.set_input(pilot(tick, poison));

        stage = game.tick();
        for event in game.events() {
            debug!(?event, "Game event");
        }
        if stage.is_finished() {
            break;
        }
        if realtime {
            spin_sleep::sleep(LOOP_TIME);
        }
    }

    let status = game.status();
    info!(
        %stage,
        game_ms = game.clock().now_ms,
        life = status.life,
        boss_life = status.boss_life,
        coins = status.coins,
        poison = status.poison,
        "Run finished"
    );
    game.stop();
    Ok(())
}
