#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Simple Arcade tower defence simulation.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Simple Arcade.";

/// Name of the tile layer whose tiles define walkable terrain.
pub const TERRAIN_LAYER: &str = "Terrain";

/// Name of the object layer that carries spawn, goal, and tower markers.
pub const EVENTS_LAYER: &str = "Events";

/// Object name marking the cell enemies spawn from.
pub const SPAWN_OBJECT: &str = "SpawnPoint";

/// Object name marking the cell enemies try to reach.
pub const GOAL_OBJECT: &str = "Goal";

/// Object name marking a tower placed when the level loads.
pub const TOWER_OBJECT: &str = "Tower";

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Replaces the rule set used for economy, towers, and projectiles.
    ConfigureRules {
        /// Rules applied from this point on.
        rules: GameRules,
    },
    /// Loads a level from a layered tile map, resetting all entities.
    LoadLevel {
        /// Tile map describing terrain and event markers.
        map: TileMap,
    },
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests that an enemy spawns at the level's spawn point.
    SpawnEnemy {
        /// Starting health of the enemy.
        health: Health,
        /// Waypoints travelled per second.
        speed: f32,
        /// Gold credited when the enemy is destroyed by towers.
        reward: Gold,
    },
    /// Requests purchase and placement of a tower on a single cell.
    PlaceTower {
        /// Type of tower to construct.
        kind: TowerKind,
        /// Cell the tower should occupy.
        cell: CellCoord,
    },
    /// Requests purchase of one upgrade level for an existing tower.
    UpgradeTower {
        /// Identifier of the tower to upgrade.
        tower: TowerId,
        /// Attribute that should be improved.
        upgrade: UpgradeKind,
    },
    /// Requests that an existing tower is sold and its cell freed.
    SellTower {
        /// Identifier of the tower to sell.
        tower: TowerId,
    },
    /// Requests that a tower launches a projectile at an enemy.
    FireProjectile {
        /// Tower that fires.
        tower: TowerId,
        /// Enemy the projectile should chase.
        target: EnemyId,
    },
    /// Credits the player's gold balance.
    CreditGold {
        /// Amount of gold to add.
        amount: Gold,
    },
    /// Removes one life after an enemy breached the goal.
    LoseLife,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Confirms that a level was loaded and its path planned.
    LevelLoaded {
        /// Cell enemies spawn from.
        spawn: CellCoord,
        /// Cell enemies try to reach.
        goal: CellCoord,
        /// Number of waypoints on the planned path, zero when none exists.
        waypoints: usize,
    },
    /// Reports that the loaded level has no path from spawn to goal.
    PathUnavailable {
        /// Cell enemies spawn from.
        spawn: CellCoord,
        /// Cell enemies try to reach.
        goal: CellCoord,
    },
    /// Reports that a level could not be built from the supplied tile map.
    LevelRejected {
        /// Human readable reason.
        reason: String,
    },
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that an enemy entered the level.
    EnemySpawned {
        /// Identifier assigned to the enemy.
        enemy: EnemyId,
        /// World position the enemy starts from.
        position: Vec2,
    },
    /// Announces that an enemy left play.
    EnemyDied {
        /// Identifier of the enemy that died.
        enemy: EnemyId,
        /// `true` when destroyed by towers, `false` when it breached the goal.
        gain_gold: bool,
        /// Gold the enemy is worth when destroyed.
        reward: Gold,
    },
    /// Confirms that a tower was placed into the world.
    TowerPlaced {
        /// Identifier assigned to the tower by the world.
        tower: TowerId,
        /// Type of tower that was placed.
        kind: TowerKind,
        /// Cell occupied by the tower.
        cell: CellCoord,
    },
    /// Reports that a tower placement request was rejected.
    TowerPlacementRejected {
        /// Type of tower requested for placement.
        kind: TowerKind,
        /// Cell provided in the placement request.
        cell: CellCoord,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Confirms that a tower attribute was upgraded.
    TowerUpgraded {
        /// Tower that was upgraded.
        tower: TowerId,
        /// Attribute that improved.
        upgrade: UpgradeKind,
        /// Level the attribute reached.
        level: u32,
        /// Price of the next upgrade of the same attribute.
        next_cost: Gold,
    },
    /// Reports that an upgrade request was rejected.
    TowerUpgradeRejected {
        /// Tower targeted by the request.
        tower: TowerId,
        /// Attribute requested.
        upgrade: UpgradeKind,
        /// Specific reason the upgrade failed.
        reason: UpgradeError,
    },
    /// Confirms that a tower was sold and removed.
    TowerSold {
        /// Identifier of the sold tower.
        tower: TowerId,
        /// Cell that became free.
        cell: CellCoord,
        /// Gold returned to the player.
        refund: Gold,
    },
    /// Reports that a sale request was rejected.
    TowerSaleRejected {
        /// Tower targeted by the request.
        tower: TowerId,
        /// Specific reason the sale failed.
        reason: SaleError,
    },
    /// Confirms that a tower launched a projectile.
    ProjectileFired {
        /// Identifier of the new projectile.
        projectile: ProjectileId,
        /// Tower that fired.
        tower: TowerId,
        /// Enemy being chased.
        target: EnemyId,
    },
    /// Confirms that a projectile reached and damaged its target.
    ProjectileHit {
        /// Projectile that hit.
        projectile: ProjectileId,
        /// Enemy that was damaged.
        target: EnemyId,
        /// Damage dealt.
        damage: Damage,
    },
    /// Reports that a projectile vanished without hitting.
    ProjectileExpired {
        /// Projectile that expired.
        projectile: ProjectileId,
    },
    /// Announces the player's new gold balance.
    GoldChanged {
        /// Balance after the change.
        balance: Gold,
    },
    /// Announces the player's remaining lives.
    LivesChanged {
        /// Lives left after the change.
        remaining: u32,
    },
    /// Announces that the player ran out of lives.
    GameOver,
}

/// Unique identifier assigned to an enemy.
///
/// Identifiers are never reused within a world, so holding an id and asking
/// the world whether it is still live acts as a weak reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a tower.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TowerId(u32);

impl TowerId {
    /// Creates a new tower identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the tower identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectileId(u32);

impl ProjectileId {
    /// Creates a new projectile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
///
/// Row zero is the top row of the tile map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column().abs_diff(other.column()) + self.row().abs_diff(other.row())
    }

    /// Reports whether the two cells share an edge.
    #[must_use]
    pub fn is_orthogonally_adjacent(self, other: CellCoord) -> bool {
        self.manhattan_distance(other) == 1
    }
}

/// Amount of in-game currency.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Gold(u32);

impl Gold {
    /// Zero gold.
    pub const ZERO: Self = Self(0);

    /// Creates a new gold amount.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric amount.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Adds two amounts, saturating at the numeric bound.
    #[must_use]
    pub const fn saturating_add(self, other: Gold) -> Gold {
        Gold(self.0.saturating_add(other.0))
    }

    /// Subtracts `other`, returning `None` when the balance cannot cover it.
    #[must_use]
    pub const fn checked_sub(self, other: Gold) -> Option<Gold> {
        match self.0.checked_sub(other.0) {
            Some(value) => Some(Gold(value)),
            None => None,
        }
    }

    /// Grows the amount by half, rounding halves up.
    ///
    /// Upgrade prices compound with this factor after every purchase.
    #[must_use]
    pub const fn compounded(self) -> Gold {
        let scaled = (self.0 as u64 * 3 + 1) / 2;
        if scaled > u32::MAX as u64 {
            Gold(u32::MAX)
        } else {
            Gold(scaled as u32)
        }
    }
}

/// Remaining hit points of an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Health(u32);

impl Health {
    /// Creates a new health value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric health value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Reports whether no hit points remain.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Applies damage, saturating at zero.
    #[must_use]
    pub const fn damaged(self, damage: Damage) -> Health {
        Health(self.0.saturating_sub(damage.get()))
    }
}

/// Damage dealt by a single projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Damage(u32);

impl Damage {
    /// Creates a new damage value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric damage value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Types of towers that can be constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TowerKind {
    /// Basic single-target tower.
    Basic,
}

/// Tower attributes that can be upgraded independently.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeKind {
    /// Increases the targeting radius.
    Range,
    /// Increases projectile damage.
    Damage,
    /// Increases shots per second.
    FireRate,
}

/// Per-attribute upgrade levels of a tower. Levels start at one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UpgradeLevels {
    /// Range level.
    pub range: u32,
    /// Damage level.
    pub damage: u32,
    /// Fire-rate level.
    pub fire_rate: u32,
}

impl Default for UpgradeLevels {
    fn default() -> Self {
        Self {
            range: 1,
            damage: 1,
            fire_rate: 1,
        }
    }
}

/// Reasons a tower placement request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementError {
    /// No level is loaded.
    NoLevel,
    /// The requested cell lies outside the grid.
    OutOfBounds,
    /// The requested cell lies on the enemy path.
    OnPath,
    /// Another tower already occupies the cell.
    Occupied,
    /// The player cannot afford the tower.
    InsufficientGold,
}

/// Reasons an upgrade request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeError {
    /// No tower with the provided identifier exists.
    MissingTower,
    /// The player cannot afford the upgrade.
    InsufficientGold,
}

/// Reasons a sale request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SaleError {
    /// No tower with the provided identifier exists.
    MissingTower,
}

/// Economy, tower, and projectile rules applied by the world.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameRules {
    /// Gold available when a level loads.
    pub starting_gold: Gold,
    /// Lives available when a level loads.
    pub starting_lives: u32,
    /// Purchase price of a basic tower.
    pub tower_cost: Gold,
    /// Price of the first upgrade of every attribute.
    pub upgrade_base_cost: Gold,
    /// Side length of one tile in world units.
    pub tile_length: f32,
    /// Tower statistics and upgrade steps.
    pub tower: TowerRules,
    /// Projectile behaviour.
    pub projectile: ProjectileRules,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            starting_gold: Gold::new(100),
            starting_lives: 10,
            tower_cost: Gold::new(50),
            upgrade_base_cost: Gold::new(10),
            tile_length: 1.0,
            tower: TowerRules::default(),
            projectile: ProjectileRules::default(),
        }
    }
}

/// Statistics of a freshly built tower and the gain of each upgrade level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TowerRules {
    /// Targeting radius in tiles.
    pub range_tiles: f32,
    /// Range gained per purchased range level, in tiles.
    pub range_step_tiles: f32,
    /// Shots per second.
    pub fire_rate: f32,
    /// Shots per second gained per purchased fire-rate level.
    pub fire_rate_step: f32,
    /// Damage dealt by each projectile.
    pub damage: Damage,
    /// Damage gained per purchased damage level.
    pub damage_step: u32,
}

impl Default for TowerRules {
    fn default() -> Self {
        Self {
            range_tiles: 1.875,
            range_step_tiles: 0.3125,
            fire_rate: 0.8,
            fire_rate_step: 0.5,
            damage: Damage::new(1),
            damage_step: 1,
        }
    }
}

/// Projectile flight parameters, expressed in tiles and seconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileRules {
    /// Tiles travelled per second.
    pub speed_tiles: f32,
    /// Seconds before an unresolved projectile vanishes.
    pub lifetime_secs: f32,
    /// Distance in tiles at which the projectile counts as a hit.
    pub hit_radius_tiles: f32,
}

impl Default for ProjectileRules {
    fn default() -> Self {
        Self {
            speed_tiles: 3.125,
            lifetime_secs: 1.3,
            hit_radius_tiles: 0.156_25,
        }
    }
}

/// Layered tile map supplied when loading a level.
///
/// Tile layers are stored row-major starting at the top row. Object positions
/// are pixel coordinates measured from the bottom-left corner of the map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileMap {
    /// Number of tile columns.
    pub width: u32,
    /// Number of tile rows.
    pub height: u32,
    /// Width of a tile in pixels.
    pub tile_width: u32,
    /// Height of a tile in pixels.
    pub tile_height: u32,
    /// Layers in draw order.
    pub layers: Vec<MapLayer>,
}

impl TileMap {
    /// Total height of the map in pixels.
    #[must_use]
    pub fn pixel_height(&self) -> f32 {
        self.height as f32 * self.tile_height as f32
    }

    /// Finds a layer by name.
    #[must_use]
    pub fn layer(&self, name: &str) -> Option<&MapLayer> {
        self.layers.iter().find(|layer| layer.name() == name)
    }
}

/// Single layer of a [`TileMap`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MapLayer {
    /// Grid of tiles.
    Tiles(TileLayer),
    /// Free-standing named objects.
    Objects(ObjectLayer),
}

impl MapLayer {
    /// Name of the layer.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Tiles(layer) => &layer.name,
            Self::Objects(layer) => &layer.name,
        }
    }
}

/// Tile layer holding an optional tile id per cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileLayer {
    /// Layer name.
    pub name: String,
    /// Number of columns.
    pub width: u32,
    /// Number of rows.
    pub height: u32,
    /// Tile ids in row-major order; `None` marks an empty cell.
    pub tiles: Vec<Option<u32>>,
}

impl TileLayer {
    /// Tile id stored at the provided cell, if any.
    #[must_use]
    pub fn tile(&self, cell: CellCoord) -> Option<u32> {
        if cell.column() >= self.width || cell.row() >= self.height {
            return None;
        }
        let width = usize::try_from(self.width).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let row = usize::try_from(cell.row()).ok()?;
        self.tiles.get(row * width + column).copied().flatten()
    }
}

/// Object layer holding named markers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectLayer {
    /// Layer name.
    pub name: String,
    /// Objects in authoring order.
    pub objects: Vec<MapObject>,
}

/// Named rectangle placed on an object layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapObject {
    /// Marker name such as `SpawnPoint`.
    pub name: String,
    /// Left edge in pixels.
    pub x: f32,
    /// Bottom edge in pixels, measured upwards from the bottom of the map.
    pub y: f32,
    /// Width in pixels.
    #[serde(default)]
    pub width: f32,
    /// Height in pixels.
    #[serde(default)]
    pub height: f32,
}

/// Immutable representation of a single enemy's state used for queries.
#[derive(Clone, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Current world position.
    pub position: Vec2,
    /// Remaining hit points.
    pub health: Health,
}

/// Read-only snapshot describing all live enemies.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Number of captured enemies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether no enemies were captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

/// Immutable representation of a single tower's state used for queries.
#[derive(Clone, Debug, PartialEq)]
pub struct TowerSnapshot {
    /// Identifier allocated to the tower by the world.
    pub id: TowerId,
    /// Kind of tower that was constructed.
    pub kind: TowerKind,
    /// Cell occupied by the tower.
    pub cell: CellCoord,
    /// World position of the tower.
    pub position: Vec2,
    /// Targeting radius in world units.
    pub range: f32,
    /// Shots per second.
    pub fire_rate: f32,
    /// Damage per projectile.
    pub damage: Damage,
    /// Current upgrade levels.
    pub levels: UpgradeLevels,
    /// Gold spent on the tower and its upgrades.
    pub invested: Gold,
}

/// Read-only snapshot describing all towers.
#[derive(Clone, Debug, Default)]
pub struct TowerView {
    snapshots: Vec<TowerSnapshot>,
}

impl TowerView {
    /// Creates a new tower view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<TowerSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured tower snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &TowerSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<TowerSnapshot> {
        self.snapshots
    }
}

/// Remaining cooldown of a single tower.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TowerCooldownSnapshot {
    /// Tower the cooldown belongs to.
    pub tower: TowerId,
    /// Time until the tower may fire again.
    pub ready_in: Duration,
}

/// Read-only cooldown snapshot of all towers sorted by identifier.
#[derive(Clone, Debug, Default)]
pub struct TowerCooldownView {
    snapshots: Vec<TowerCooldownSnapshot>,
}

impl TowerCooldownView {
    /// Creates a new cooldown view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<TowerCooldownSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.tower);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots.
    pub fn iter(&self) -> impl Iterator<Item = &TowerCooldownSnapshot> {
        self.snapshots.iter()
    }
}

/// Immutable representation of an in-flight projectile.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectileSnapshot {
    /// Identifier of the projectile.
    pub id: ProjectileId,
    /// Enemy being chased.
    pub target: EnemyId,
    /// Current world position.
    pub position: Vec2,
}

/// Target assignment computed for a tower.
#[derive(Clone, Debug, PartialEq)]
pub struct TowerTarget {
    /// Tower that acquired the target.
    pub tower: TowerId,
    /// Enemy selected as the target.
    pub enemy: EnemyId,
    /// World position of the tower.
    pub tower_position: Vec2,
    /// World position of the enemy at selection time.
    pub enemy_position: Vec2,
}
