//! TOML configuration and level files.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;
use simple_arcade_core::{CellCoord, GameRules, TileMap, UpgradeKind};
use simple_arcade_snake::SnakeConfig;
use simple_arcade_system_spawning::Config as WaveConfig;
use simple_arcade_world::tile_map_from_ascii;

const DEFAULT_TILE_SIZE: u32 = 32;

/// Settings shared by every subcommand; absent sections keep their defaults.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct Config {
    /// Economy, tower, and projectile rules.
    pub(crate) rules: GameRules,
    /// Enemy wave schedule.
    pub(crate) waves: WaveConfig,
    /// Towers bought before the first tick.
    pub(crate) towers: Vec<TowerOrder>,
    /// Snake board and pacing.
    pub(crate) snake: SnakeConfig,
}

/// Tower purchase performed while setting up a level.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub(crate) struct TowerOrder {
    /// Column of the tower cell.
    pub(crate) column: u32,
    /// Row of the tower cell, counted from the top.
    pub(crate) row: u32,
    /// Upgrades bought right after placement, in order.
    #[serde(default)]
    pub(crate) upgrades: Vec<UpgradeKind>,
}

impl TowerOrder {
    pub(crate) const fn cell(&self) -> CellCoord {
        CellCoord::new(self.column, self.row)
    }
}

impl Config {
    /// Reads the configuration file, falling back to defaults without one.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("failed to parse config {}", path.display()))
    }
}

/// Level stored as ASCII terrain rows.
///
/// `.` is floor, `#` is wall, `S` and `G` mark spawn and goal floor cells,
/// and `T` is a wall holding a free tower.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
struct LevelFile {
    #[serde(default = "default_tile_size")]
    tile_size: u32,
    rows: Vec<String>,
}

const fn default_tile_size() -> u32 {
    DEFAULT_TILE_SIZE
}

/// Reads a level file and converts it into a tile map.
pub(crate) fn load_level(path: &Path) -> Result<TileMap> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read level {}", path.display()))?;
    parse_level(&text).with_context(|| format!("invalid level {}", path.display()))
}

fn parse_level(text: &str) -> Result<TileMap> {
    let level: LevelFile = toml::from_str(text)?;
    Ok(tile_map_from_ascii(&level.rows, level.tile_size)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use simple_arcade_core::{Gold, MapLayer};

    #[test]
    fn partial_config_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [rules]
            starting_gold = 250

            [waves]
            enemies_per_wave = 8

            [[towers]]
            column = 3
            row = 1
            upgrades = ["range", "fire_rate"]
            "#,
        )
        .expect("valid config");

        assert_eq!(config.rules.starting_gold, Gold::new(250));
        assert_eq!(config.rules.tower_cost, GameRules::default().tower_cost);
        assert_eq!(config.waves.enemies_per_wave, 8);
        assert_eq!(config.waves.reward, WaveConfig::default().reward);
        assert_eq!(
            config.towers,
            vec![TowerOrder {
                column: 3,
                row: 1,
                upgrades: vec![UpgradeKind::Range, UpgradeKind::FireRate],
            }]
        );
        assert_eq!(config.snake, SnakeConfig::default());
    }

    #[test]
    fn missing_config_file_means_defaults() {
        assert_eq!(Config::load(None).expect("defaults"), Config::default());
    }

    #[test]
    fn level_rows_become_a_tile_map() {
        let map = parse_level(
            r##"
            rows = [
                "S..#",
                "#..G",
            ]
            "##,
        )
        .expect("valid level");

        assert_eq!((map.width, map.height), (4, 2));
        assert_eq!(map.tile_width, DEFAULT_TILE_SIZE);
        assert!(map
            .layers
            .iter()
            .any(|layer| matches!(layer, MapLayer::Objects(objects) if objects.objects.len() == 2)));
    }

    #[test]
    fn bad_glyph_is_reported() {
        assert!(parse_level(r#"rows = ["S?G"]"#).is_err());
    }
}
