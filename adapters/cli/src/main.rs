#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that drives the Simple Arcade games headlessly.

mod config;
mod simulation;
mod snake;

use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use simple_arcade_core::Command as WorldCommand;
use simple_arcade_system_bootstrap::{AppInput, Bootstrap, DEFAULT_SPLASH};
use simple_arcade_world::{self as world, query, World};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::{config::Config, simulation::Simulation};

#[derive(Parser)]
#[command(name = "simple-arcade")]
#[command(about = "Headless driver for the Simple Arcade tower defence and snake games")]
struct Cli {
    /// TOML file overriding rules, waves, towers, and snake settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a tower defence level without rendering
    Td {
        /// Level file with ASCII terrain rows
        level: PathBuf,
        /// Simulated seconds before stopping
        #[arg(long, default_value_t = 60.0)]
        seconds: f32,
        /// Length of one frame in milliseconds
        #[arg(long, default_value_t = 50)]
        frame_ms: u64,
    },
    /// Print the planned enemy path of a level
    Path {
        /// Level file with ASCII terrain rows
        level: PathBuf,
    },
    /// Let the autopilot play snake
    Snake {
        /// Moves to play before stopping
        #[arg(long, default_value_t = 200)]
        steps: u32,
        /// Fruit placement seed, overriding the configuration
        #[arg(long)]
        seed: Option<u64>,
    },
}

/// Entry point for the Simple Arcade command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Td {
            level,
            seconds,
            frame_ms,
        } => run_td(&config, level, seconds, frame_ms),
        Commands::Path { level } => print_path(level),
        Commands::Snake { steps, seed } => run_snake(config, steps, seed),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn run_td(config: &Config, level: PathBuf, seconds: f32, frame_ms: u64) -> Result<()> {
    let duration = Duration::try_from_secs_f32(seconds)
        .with_context(|| format!("invalid simulation length {seconds}"))?;
    let map = config::load_level(&level)?;
    let mut simulation = Simulation::new(config, map)?;

    let mut transitions = Vec::new();
    let mut bootstrap = Bootstrap::new(DEFAULT_SPLASH, &mut transitions);
    bootstrap.advance(AppInput::Elapsed(DEFAULT_SPLASH), &mut transitions);
    bootstrap.advance(AppInput::StartPressed, &mut transitions);
    println!("{}", bootstrap.welcome_banner(simulation.world()));

    let summary = simulation.run(duration, Duration::from_millis(frame_ms));
    bootstrap.advance(AppInput::EscapePressed, &mut transitions);
    for transition in &transitions {
        debug!(state = ?transition.state, phase = ?transition.phase, "state transition");
    }

    println!(
        "ticks {} | spawned {} | killed {} | breached {} | shots {}",
        summary.ticks, summary.spawned, summary.killed, summary.breached, summary.shots
    );
    println!(
        "towers {} | gold {} | lives {}{}",
        summary.towers,
        summary.gold.get(),
        summary.lives,
        if summary.game_over { " | game over" } else { "" }
    );
    Ok(())
}

fn print_path(level: PathBuf) -> Result<()> {
    let map = config::load_level(&level)?;
    let mut world = World::new();
    let mut events = Vec::new();
    world::apply(&mut world, WorldCommand::LoadLevel { map }, &mut events);

    let rendered = query::ascii_map(&world)
        .with_context(|| format!("level {} was rejected", level.display()))?;
    println!("{rendered}");
    match query::path(&world) {
        Some(path) => println!("path length {}", path.cells().len()),
        None => println!("goal unreachable"),
    }
    Ok(())
}

fn run_snake(mut config: Config, steps: u32, seed: Option<u64>) -> Result<()> {
    if let Some(seed) = seed {
        config.snake.seed = seed;
    }
    let summary = snake::play(&config.snake, steps)?;
    info!(steps = summary.steps, status = ?summary.status, "snake session finished");
    println!(
        "steps {} | fruit {} | length {} | {:?}",
        summary.steps, summary.fruit_eaten, summary.length, summary.status
    );
    Ok(())
}
