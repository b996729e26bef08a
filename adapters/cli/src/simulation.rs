//! Headless tower defence loop wiring the world to its systems.

use std::time::Duration;

use anyhow::{bail, Result};
use simple_arcade_core::{Command, Event, Gold, TileMap, TowerTarget};
use simple_arcade_system_builder::{Builder, UiAction};
use simple_arcade_system_economy::Economy;
use simple_arcade_system_spawning::Waves;
use simple_arcade_system_tower_combat::TowerCombat;
use simple_arcade_system_tower_targeting::TowerTargeting;
use simple_arcade_world::{self as world, query, World};
use tracing::{debug, info, warn};

use crate::config::{Config, TowerOrder};

/// Totals gathered while a level runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Summary {
    pub(crate) ticks: u64,
    pub(crate) spawned: u32,
    pub(crate) killed: u32,
    pub(crate) breached: u32,
    pub(crate) shots: u32,
    pub(crate) towers: usize,
    pub(crate) gold: Gold,
    pub(crate) lives: u32,
    pub(crate) game_over: bool,
}

pub(crate) struct Simulation {
    world: World,
    waves: Waves,
    targeting: TowerTargeting,
    combat: TowerCombat,
    economy: Economy,
    builder: Builder,
    targets: Vec<TowerTarget>,
    events: Vec<Event>,
    commands: Vec<Command>,
    summary: Summary,
}

impl Simulation {
    /// Loads the level and buys the configured towers.
    pub(crate) fn new(config: &Config, map: TileMap) -> Result<Self> {
        let mut simulation = Self {
            world: World::new(),
            waves: Waves::new(config.waves.clone()),
            targeting: TowerTargeting::new(),
            combat: TowerCombat::new(),
            economy: Economy::new(),
            builder: Builder::new(),
            targets: Vec::new(),
            events: Vec::new(),
            commands: Vec::new(),
            summary: Summary::default(),
        };

        simulation.commands.push(Command::ConfigureRules {
            rules: config.rules.clone(),
        });
        simulation.commands.push(Command::LoadLevel { map });
        simulation.flush();

        for event in &simulation.events {
            match event {
                Event::LevelRejected { reason } => bail!("level rejected: {reason}"),
                Event::PathUnavailable { spawn, goal } => {
                    warn!(?spawn, ?goal, "goal unreachable, waves will not start");
                }
                _ => {}
            }
        }

        simulation.build(&config.towers);
        Ok(simulation)
    }

    pub(crate) fn world(&self) -> &World {
        &self.world
    }

    fn build(&mut self, orders: &[TowerOrder]) {
        for order in orders {
            let cell = order.cell();
            let mut actions = vec![
                UiAction::EnterBuildMode,
                UiAction::Confirm { cell },
                UiAction::Select { cell },
            ];
            actions.extend(order.upgrades.iter().copied().map(UiAction::Upgrade));

            for action in actions {
                let world = &self.world;
                self.builder.handle(
                    &self.events,
                    Some(action),
                    |cell| query::tower_at(world, cell),
                    &mut self.commands,
                );
                self.events.clear();
                self.flush();

                for event in &self.events {
                    match event {
                        Event::TowerPlacementRejected { cell, reason, .. } => {
                            warn!(?cell, ?reason, "tower order rejected");
                        }
                        Event::TowerUpgradeRejected {
                            tower,
                            upgrade,
                            reason,
                        } => {
                            warn!(tower = tower.get(), ?upgrade, ?reason, "upgrade rejected");
                        }
                        _ => {}
                    }
                }
            }
        }
    }

    fn flush(&mut self) {
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.events);
        }
    }

    /// Advances the level by one frame.
    pub(crate) fn frame(&mut self, dt: Duration) {
        self.events.clear();
        world::apply(&mut self.world, Command::Tick { dt }, &mut self.events);

        self.waves
            .handle(&self.events, query::has_path(&self.world), &mut self.commands);

        let towers = query::tower_view(&self.world);
        let enemies = query::enemy_view(&self.world);
        self.targeting.handle(&towers, &enemies, &mut self.targets);
        self.combat.handle(
            &query::tower_cooldowns(&self.world),
            &self.targets,
            &mut self.commands,
        );
        self.flush();

        self.economy.handle(&self.events, &mut self.commands);
        self.flush();

        self.record();
    }

    fn record(&mut self) {
        for event in &self.events {
            match event {
                Event::EnemySpawned { enemy, .. } => {
                    self.summary.spawned += 1;
                    debug!(enemy = enemy.get(), "enemy spawned");
                }
                Event::EnemyDied { gain_gold: true, .. } => self.summary.killed += 1,
                Event::EnemyDied {
                    gain_gold: false, ..
                } => self.summary.breached += 1,
                Event::ProjectileFired { .. } => self.summary.shots += 1,
                _ => {}
            }
        }
    }

    /// Runs frames of length `frame` until `duration` elapsed or the game ends.
    pub(crate) fn run(&mut self, duration: Duration, frame: Duration) -> Summary {
        let mut elapsed = Duration::ZERO;
        while elapsed < duration && !query::is_game_over(&self.world) && !frame.is_zero() {
            self.frame(frame);
            elapsed += frame;
        }

        let summary = Summary {
            ticks: query::tick_index(&self.world),
            towers: query::tower_view(&self.world).iter().count(),
            gold: query::gold(&self.world),
            lives: query::lives(&self.world),
            game_over: query::is_game_over(&self.world),
            ..self.summary
        };
        info!(
            ticks = summary.ticks,
            killed = summary.killed,
            breached = summary.breached,
            "simulation finished"
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simple_arcade_core::{GameRules, UpgradeKind};
    use simple_arcade_system_spawning::Config as WaveConfig;
    use simple_arcade_world::tile_map_from_ascii;

    const FRAME: Duration = Duration::from_millis(50);

    fn map(rows: &[&str]) -> TileMap {
        tile_map_from_ascii(rows, 32).expect("valid rows")
    }

    #[test]
    fn undefended_level_ends_in_game_over() {
        let config = Config {
            rules: GameRules {
                starting_lives: 3,
                ..GameRules::default()
            },
            waves: WaveConfig {
                enemies_per_wave: 3,
                spawn_interval_ms: 100,
                wave_delay_ms: 5_000,
                ..WaveConfig::default()
            },
            ..Config::default()
        };
        let mut simulation = Simulation::new(&config, map(&["S...G"])).expect("level loads");

        let summary = simulation.run(Duration::from_secs(10), FRAME);

        assert!(summary.game_over);
        assert_eq!(summary.spawned, 3);
        assert_eq!(summary.breached, 3);
        assert_eq!(summary.killed, 0);
        assert_eq!(summary.lives, 0);
        assert!(summary.ticks < 200, "the loop stops at game over");
    }

    #[test]
    fn ordered_tower_defends_the_goal() {
        let config = Config {
            waves: WaveConfig {
                enemies_per_wave: 1,
                spawn_interval_ms: 500,
                wave_delay_ms: 60_000,
                base_health: 1,
                speed: 1.0,
                ..WaveConfig::default()
            },
            towers: vec![TowerOrder {
                column: 4,
                row: 1,
                upgrades: vec![UpgradeKind::Damage],
            }],
            ..Config::default()
        };
        let mut simulation =
            Simulation::new(&config, map(&["S........G", "##########"])).expect("level loads");
        assert_eq!(query::gold(simulation.world()), Gold::new(40));

        let summary = simulation.run(Duration::from_secs(20), FRAME);

        assert_eq!(summary.towers, 1);
        assert_eq!(summary.killed, 1);
        assert_eq!(summary.breached, 0);
        assert!(summary.shots >= 1);
        assert_eq!(summary.gold, Gold::new(45), "40 left after buying, 5 reward");
        assert!(!summary.game_over);
    }

    #[test]
    fn unreachable_level_still_loads() {
        let mut simulation =
            Simulation::new(&Config::default(), map(&["S#G"])).expect("level loads");

        let summary = simulation.run(Duration::from_secs(5), FRAME);

        assert_eq!(summary.spawned, 0);
        assert!(!query::has_path(simulation.world()));
    }

    #[test]
    fn malformed_level_is_an_error() {
        assert!(Simulation::new(&Config::default(), map(&["...", "..."])).is_err());
    }
}
