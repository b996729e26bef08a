#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Simple Arcade.
//!
//! The world owns the loaded level, its planned path, every enemy, tower and
//! projectile, and the player's gold and lives. It mutates only inside
//! [`apply`] and exposes read-only state through [`query`].

mod enemies;
mod grid;
mod level;
mod navigation;
mod projectiles;
mod towers;

use std::{sync::Arc, time::Duration};

use glam::Vec2;
use simple_arcade_core::{
    CellCoord, Command, EnemyId, Event, GameRules, Gold, Health, PlacementError, ProjectileId,
    SaleError, TileMap, TowerId, TowerKind, UpgradeError, UpgradeKind, WELCOME_BANNER,
};
use tracing::{debug, info, warn};

pub use grid::Grid;
pub use level::{tile_map_from_ascii, LevelError, LevelLayout};
pub use navigation::{breadth_first_search, render_ascii, Path, PathError, TileLayout};

use enemies::{Enemy, FollowStep, PathFollower};
use projectiles::{Flight, Projectile};
use towers::TowerRegistry;

/// Level currently in play together with its planned route.
#[derive(Debug)]
struct ActiveLevel {
    layout: LevelLayout,
    tiles: TileLayout,
    path: Option<Path>,
}

impl ActiveLevel {
    fn spawn_position(&self) -> Vec2 {
        self.tiles.cell_to_world(self.layout.spawn())
    }

    fn waypoints(&self) -> Option<Arc<[Vec2]>> {
        self.path.as_ref().map(|path| path.waypoints().clone())
    }
}

/// Represents the authoritative Simple Arcade world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    rules: GameRules,
    level: Option<ActiveLevel>,
    enemies: Vec<Enemy>,
    towers: TowerRegistry,
    projectiles: Vec<Projectile>,
    gold: Gold,
    lives: u32,
    game_over: bool,
    next_enemy_id: u32,
    next_projectile_id: u32,
    tick_index: u64,
}

impl World {
    /// Creates a new world with default rules and no level loaded.
    #[must_use]
    pub fn new() -> Self {
        let rules = GameRules::default();
        Self {
            banner: WELCOME_BANNER,
            gold: rules.starting_gold,
            lives: rules.starting_lives,
            rules,
            level: None,
            enemies: Vec::new(),
            towers: TowerRegistry::new(),
            projectiles: Vec::new(),
            game_over: false,
            next_enemy_id: 0,
            next_projectile_id: 0,
            tick_index: 0,
        }
    }

    fn reset_entities(&mut self) {
        self.enemies.clear();
        self.projectiles.clear();
        self.towers = TowerRegistry::new();
        self.gold = self.rules.starting_gold;
        self.lives = self.rules.starting_lives;
        self.game_over = false;
    }

    fn allocate_enemy_id(&mut self) -> EnemyId {
        let id = EnemyId::new(self.next_enemy_id);
        self.next_enemy_id = self.next_enemy_id.saturating_add(1);
        id
    }

    fn allocate_projectile_id(&mut self) -> ProjectileId {
        let id = ProjectileId::new(self.next_projectile_id);
        self.next_projectile_id = self.next_projectile_id.saturating_add(1);
        id
    }

    /// Tile edge of the loaded level; rule changes take effect on the next load.
    fn tile_length(&self) -> f32 {
        self.level
            .as_ref()
            .map_or(self.rules.tile_length, |level| level.tiles.tile_length())
    }

    fn live_enemy(&self, enemy: EnemyId) -> Option<&Enemy> {
        self.enemies
            .iter()
            .find(|candidate| candidate.id == enemy && candidate.is_alive())
    }

    fn load_level(&mut self, map: &TileMap, out_events: &mut Vec<Event>) {
        self.reset_entities();
        self.level = None;

        let layout = match LevelLayout::from_tile_map(map) {
            Ok(layout) => layout,
            Err(error) => {
                warn!(%error, "level rejected");
                out_events.push(Event::LevelRejected {
                    reason: error.to_string(),
                });
                return;
            }
        };

        let tiles = TileLayout::new(self.rules.tile_length, Vec2::ZERO, layout.grid().height());
        let spawn = layout.spawn();
        let goal = layout.goal();
        let path = match Path::plan(layout.grid(), &tiles, spawn, goal) {
            Ok(path) => Some(path),
            Err(error) => {
                warn!(%error, "level has no path");
                out_events.push(Event::PathUnavailable { spawn, goal });
                None
            }
        };

        let waypoints = path.as_ref().map_or(0, |path| path.cells().len());
        info!(?spawn, ?goal, waypoints, "level loaded");
        out_events.push(Event::LevelLoaded {
            spawn,
            goal,
            waypoints,
        });

        for &cell in layout.towers() {
            let on_path = path.as_ref().is_some_and(|path| path.contains(cell));
            if !layout.grid().in_bounds(cell) || on_path || self.towers.tower_at(cell).is_some() {
                debug!(?cell, on_path, "pre-placed tower skipped");
                continue;
            }
            let tower = self.towers.insert(
                TowerKind::Basic,
                cell,
                tiles.cell_to_world(cell),
                Gold::ZERO,
                &self.rules,
            );
            out_events.push(Event::TowerPlaced {
                tower,
                kind: TowerKind::Basic,
                cell,
            });
        }

        self.level = Some(ActiveLevel {
            layout,
            tiles,
            path,
        });
        out_events.push(Event::GoldChanged { balance: self.gold });
        out_events.push(Event::LivesChanged {
            remaining: self.lives,
        });
    }

    fn tick(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        self.tick_index = self.tick_index.saturating_add(1);
        out_events.push(Event::TimeAdvanced { dt });
        let dt_secs = dt.as_secs_f32();

        for enemy in self.enemies.iter_mut().filter(|enemy| enemy.is_alive()) {
            if enemy.follower.advance(dt_secs, enemy.speed) == FollowStep::ReachedGoal {
                enemy.mark_dying();
                debug!(enemy = enemy.id.get(), "enemy breached the goal");
                out_events.push(Event::EnemyDied {
                    enemy: enemy.id,
                    gain_gold: false,
                    reward: enemy.reward,
                });
            }
        }

        let tile_length = self.tile_length();
        let speed = self.rules.projectile.speed_tiles * tile_length;
        let hit_radius = self.rules.projectile.hit_radius_tiles * tile_length;
        let enemies = &mut self.enemies;
        self.projectiles.retain_mut(|projectile| {
            let target = enemies
                .iter_mut()
                .find(|enemy| enemy.id == projectile.target && enemy.is_alive());
            let target_position = target.as_ref().map(|enemy| enemy.follower.position());

            match projectile.advance(dt, target_position, speed, hit_radius) {
                Flight::InFlight => true,
                Flight::Hit => {
                    out_events.push(Event::ProjectileHit {
                        projectile: projectile.id,
                        target: projectile.target,
                        damage: projectile.damage,
                    });
                    if let Some(enemy) = target {
                        if enemy.hurt(projectile.damage) {
                            debug!(enemy = enemy.id.get(), "enemy destroyed");
                            out_events.push(Event::EnemyDied {
                                enemy: enemy.id,
                                gain_gold: true,
                                reward: enemy.reward,
                            });
                        }
                    }
                    false
                }
                Flight::Expired => {
                    out_events.push(Event::ProjectileExpired {
                        projectile: projectile.id,
                    });
                    false
                }
            }
        });

        for tower in self.towers.iter_mut() {
            tower.tick_cooldown(dt);
        }

        self.enemies.retain(Enemy::is_alive);
    }

    fn spawn_enemy(
        &mut self,
        health: Health,
        speed: f32,
        reward: Gold,
        out_events: &mut Vec<Event>,
    ) {
        let Some(level) = self.level.as_ref() else {
            warn!("enemy spawn requested without a level");
            return;
        };
        let follower = PathFollower::new(level.waypoints(), level.spawn_position());
        let position = follower.position();
        let enemy = self.allocate_enemy_id();
        self.enemies.push(Enemy::new(enemy, health, speed, reward, follower));
        out_events.push(Event::EnemySpawned { enemy, position });
    }

    fn placement_check(&self, cell: CellCoord) -> Result<Vec2, PlacementError> {
        let level = self.level.as_ref().ok_or(PlacementError::NoLevel)?;
        if !level.layout.grid().in_bounds(cell) {
            return Err(PlacementError::OutOfBounds);
        }
        if level.path.as_ref().is_some_and(|path| path.contains(cell)) {
            return Err(PlacementError::OnPath);
        }
        if self.towers.tower_at(cell).is_some() {
            return Err(PlacementError::Occupied);
        }
        if self.gold < self.rules.tower_cost {
            return Err(PlacementError::InsufficientGold);
        }
        Ok(level.tiles.cell_to_world(cell))
    }

    fn place_tower(&mut self, kind: TowerKind, cell: CellCoord, out_events: &mut Vec<Event>) {
        let position = match self.placement_check(cell) {
            Ok(position) => position,
            Err(reason) => {
                debug!(?cell, ?reason, "tower placement rejected");
                out_events.push(Event::TowerPlacementRejected { kind, cell, reason });
                return;
            }
        };

        let price = self.rules.tower_cost;
        self.gold = self.gold.checked_sub(price).unwrap_or(Gold::ZERO);
        let tower = self
            .towers
            .insert(kind, cell, position, price, &self.rules);
        out_events.push(Event::TowerPlaced { tower, kind, cell });
        out_events.push(Event::GoldChanged { balance: self.gold });
    }

    fn upgrade_tower(
        &mut self,
        tower: TowerId,
        upgrade: UpgradeKind,
        out_events: &mut Vec<Event>,
    ) {
        let reject = |reason| Event::TowerUpgradeRejected {
            tower,
            upgrade,
            reason,
        };
        let Some(state) = self.towers.get_mut(tower) else {
            out_events.push(reject(UpgradeError::MissingTower));
            return;
        };
        let cost = state.next_cost(upgrade);
        let Some(balance) = self.gold.checked_sub(cost) else {
            out_events.push(reject(UpgradeError::InsufficientGold));
            return;
        };

        self.gold = balance;
        let level = state.apply_upgrade(upgrade, cost);
        out_events.push(Event::TowerUpgraded {
            tower,
            upgrade,
            level,
            next_cost: state.next_cost(upgrade),
        });
        out_events.push(Event::GoldChanged { balance: self.gold });
    }

    fn sell_tower(&mut self, tower: TowerId, out_events: &mut Vec<Event>) {
        let Some(state) = self.towers.remove(tower) else {
            out_events.push(Event::TowerSaleRejected {
                tower,
                reason: SaleError::MissingTower,
            });
            return;
        };

        let refund = state.refund();
        self.gold = self.gold.saturating_add(refund);
        out_events.push(Event::TowerSold {
            tower,
            cell: state.cell,
            refund,
        });
        out_events.push(Event::GoldChanged { balance: self.gold });
    }

    fn fire_projectile(&mut self, tower: TowerId, target: EnemyId, out_events: &mut Vec<Event>) {
        let Some(state) = self.towers.get(tower) else {
            debug!(tower = tower.get(), "fire request for missing tower");
            return;
        };
        if !state.is_ready() || self.live_enemy(target).is_none() {
            debug!(tower = tower.get(), target = target.get(), "fire request ignored");
            return;
        }

        let (position, damage) = (state.position, state.damage());
        let projectile = self.allocate_projectile_id();
        self.projectiles.push(Projectile::new(
            projectile,
            target,
            damage,
            position,
            &self.rules.projectile,
        ));
        if let Some(state) = self.towers.get_mut(tower) {
            state.reset_cooldown();
        }
        out_events.push(Event::ProjectileFired {
            projectile,
            tower,
            target,
        });
    }

    fn lose_life(&mut self, out_events: &mut Vec<Event>) {
        self.lives = self.lives.saturating_sub(1);
        out_events.push(Event::LivesChanged {
            remaining: self.lives,
        });
        if self.lives == 0 {
            self.game_over = true;
            info!(tick = self.tick_index, "game over");
            out_events.push(Event::GameOver);
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Once the game is over only rule and level changes are accepted.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    if world.game_over
        && !matches!(
            command,
            Command::ConfigureRules { .. } | Command::LoadLevel { .. }
        )
    {
        return;
    }

    match command {
        Command::ConfigureRules { rules } => {
            world.rules = rules;
        }
        Command::LoadLevel { map } => world.load_level(&map, out_events),
        Command::Tick { dt } => world.tick(dt, out_events),
        Command::SpawnEnemy {
            health,
            speed,
            reward,
        } => world.spawn_enemy(health, speed, reward, out_events),
        Command::PlaceTower { kind, cell } => world.place_tower(kind, cell, out_events),
        Command::UpgradeTower { tower, upgrade } => world.upgrade_tower(tower, upgrade, out_events),
        Command::SellTower { tower } => world.sell_tower(tower, out_events),
        Command::FireProjectile { tower, target } => {
            world.fire_projectile(tower, target, out_events);
        }
        Command::CreditGold { amount } => {
            world.gold = world.gold.saturating_add(amount);
            out_events.push(Event::GoldChanged {
                balance: world.gold,
            });
        }
        Command::LoseLife => world.lose_life(out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use simple_arcade_core::{
        CellCoord, EnemyId, EnemyView, Gold, ProjectileSnapshot, TowerCooldownView, TowerId,
        TowerView,
    };

    use super::{render_ascii, LevelLayout, Path, World};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Layout of the loaded level, if any.
    #[must_use]
    pub fn level(world: &World) -> Option<&LevelLayout> {
        world.level.as_ref().map(|level| &level.layout)
    }

    /// Planned path of the loaded level, absent when none exists.
    #[must_use]
    pub fn path(world: &World) -> Option<&Path> {
        world.level.as_ref().and_then(|level| level.path.as_ref())
    }

    /// Reports whether enemies spawned now would follow a path.
    #[must_use]
    pub fn has_path(world: &World) -> bool {
        path(world).is_some()
    }

    /// Captures a read-only view of the live enemies.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        EnemyView::from_snapshots(
            world
                .enemies
                .iter()
                .filter(|enemy| enemy.is_alive())
                .map(|enemy| enemy.snapshot())
                .collect(),
        )
    }

    /// Reports whether the enemy is still in play.
    #[must_use]
    pub fn is_enemy_alive(world: &World, enemy: EnemyId) -> bool {
        world.live_enemy(enemy).is_some()
    }

    /// Captures a read-only view of all towers.
    #[must_use]
    pub fn tower_view(world: &World) -> TowerView {
        let tile_length = world.tile_length();
        TowerView::from_snapshots(
            world
                .towers
                .iter()
                .map(|tower| tower.snapshot(tile_length))
                .collect(),
        )
    }

    /// Captures the remaining cooldown of every tower.
    #[must_use]
    pub fn tower_cooldowns(world: &World) -> TowerCooldownView {
        TowerCooldownView::from_snapshots(
            world
                .towers
                .iter()
                .map(|tower| tower.cooldown_snapshot())
                .collect(),
        )
    }

    /// Tower occupying the provided cell, if any.
    #[must_use]
    pub fn tower_at(world: &World, cell: CellCoord) -> Option<TowerId> {
        world.towers.tower_at(cell)
    }

    /// Snapshots of every projectile in flight, in launch order.
    #[must_use]
    pub fn projectiles(world: &World) -> Vec<ProjectileSnapshot> {
        world
            .projectiles
            .iter()
            .map(|projectile| projectile.snapshot())
            .collect()
    }

    /// Player's current gold balance.
    #[must_use]
    pub fn gold(world: &World) -> Gold {
        world.gold
    }

    /// Player's remaining lives.
    #[must_use]
    pub fn lives(world: &World) -> u32 {
        world.lives
    }

    /// Reports whether the player ran out of lives.
    #[must_use]
    pub fn is_game_over(world: &World) -> bool {
        world.game_over
    }

    /// Number of ticks processed so far.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Text rendering of the loaded level and its path.
    #[must_use]
    pub fn ascii_map(world: &World) -> Option<String> {
        let level = world.level.as_ref()?;
        let path = level.path.as_ref().map(Path::cells);
        Some(render_ascii(
            level.layout.grid(),
            path,
            level.layout.spawn(),
            level.layout.goal(),
        ))
    }
}
