#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic wave system responsible for emitting enemy spawn commands.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use simple_arcade_core::{Command, Event, Gold, Health};

/// Configuration parameters required to construct the wave system.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Enemies spawned by the first wave.
    pub enemies_per_wave: u32,
    /// Additional enemies spawned by every later wave.
    pub wave_growth: u32,
    /// Milliseconds between two spawns of the same wave.
    pub spawn_interval_ms: u64,
    /// Milliseconds between the last spawn of a wave and the next wave.
    pub wave_delay_ms: u64,
    /// Health of first-wave enemies.
    pub base_health: u32,
    /// Health gained by enemies of every later wave.
    pub health_growth: u32,
    /// Waypoints travelled per second.
    pub speed: f32,
    /// Gold credited for destroying one enemy.
    pub reward: Gold,
}

impl Config {
    /// Delay between two spawns of the same wave.
    #[must_use]
    pub const fn spawn_interval(&self) -> Duration {
        Duration::from_millis(self.spawn_interval_ms)
    }

    /// Pause between two waves.
    #[must_use]
    pub const fn wave_delay(&self) -> Duration {
        Duration::from_millis(self.wave_delay_ms)
    }

    /// Number of enemies in the provided one-based wave.
    #[must_use]
    pub fn wave_size(&self, wave: u32) -> u32 {
        self.enemies_per_wave
            .saturating_add(self.wave_growth.saturating_mul(wave.saturating_sub(1)))
    }

    /// Health of enemies in the provided one-based wave.
    #[must_use]
    pub fn wave_health(&self, wave: u32) -> Health {
        Health::new(
            self.base_health
                .saturating_add(self.health_growth.saturating_mul(wave.saturating_sub(1))),
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enemies_per_wave: 5,
            wave_growth: 2,
            spawn_interval_ms: 1_000,
            wave_delay_ms: 5_000,
            base_health: 3,
            health_growth: 1,
            speed: 4.0,
            reward: Gold::new(5),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Spawning { remaining: u32 },
    Resting,
}

/// Pure system that deterministically emits spawn commands wave after wave.
#[derive(Debug)]
pub struct Waves {
    config: Config,
    wave: u32,
    phase: Phase,
    accumulator: Duration,
}

impl Waves {
    /// Creates a new wave system that starts with wave one.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let remaining = config.wave_size(1);
        Self {
            config,
            wave: 1,
            phase: Phase::Spawning { remaining },
            accumulator: Duration::ZERO,
        }
    }

    /// One-based index of the wave in progress.
    #[must_use]
    pub const fn wave(&self) -> u32 {
        self.wave
    }

    /// Consumes events to emit spawn commands.
    ///
    /// Time only counts while `has_path` is true, so waves pause on levels
    /// whose goal cannot be reached.
    pub fn handle(&mut self, events: &[Event], has_path: bool, out: &mut Vec<Command>) {
        if !has_path || self.config.spawn_interval().is_zero() {
            return;
        }

        let mut accumulated = Duration::ZERO;
        for event in events {
            if let Event::TimeAdvanced { dt } = event {
                accumulated = accumulated.saturating_add(*dt);
            }
        }

        if accumulated.is_zero() {
            return;
        }

        self.accumulator = self.accumulator.saturating_add(accumulated);
        while self.resolve_step(out) {}
    }

    fn resolve_step(&mut self, out: &mut Vec<Command>) -> bool {
        match self.phase {
            Phase::Spawning { remaining: 0 } => {
                self.phase = Phase::Resting;
                true
            }
            Phase::Spawning { remaining } => {
                let interval = self.config.spawn_interval();
                if self.accumulator < interval {
                    return false;
                }
                self.accumulator -= interval;
                out.push(Command::SpawnEnemy {
                    health: self.config.wave_health(self.wave),
                    speed: self.config.speed,
                    reward: self.config.reward,
                });
                self.phase = Phase::Spawning {
                    remaining: remaining - 1,
                };
                true
            }
            Phase::Resting => {
                let delay = self.config.wave_delay();
                if self.accumulator < delay {
                    return false;
                }
                self.accumulator -= delay;
                self.wave = self.wave.saturating_add(1);
                self.phase = Phase::Spawning {
                    remaining: self.config.wave_size(self.wave),
                };
                true
            }
        }
    }
}
