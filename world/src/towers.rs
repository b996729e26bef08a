//! Authoritative tower state management utilities.

use std::{
    collections::{BTreeMap, HashMap},
    time::Duration,
};

use glam::Vec2;
use simple_arcade_core::{
    CellCoord, Damage, GameRules, Gold, TowerCooldownSnapshot, TowerId, TowerKind, TowerRules,
    TowerSnapshot, UpgradeKind, UpgradeLevels,
};

/// Next purchase price of each upgradable attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct UpgradeCosts {
    range: Gold,
    damage: Gold,
    fire_rate: Gold,
}

impl UpgradeCosts {
    fn uniform(cost: Gold) -> Self {
        Self {
            range: cost,
            damage: cost,
            fire_rate: cost,
        }
    }

    fn slot(&mut self, upgrade: UpgradeKind) -> &mut Gold {
        match upgrade {
            UpgradeKind::Range => &mut self.range,
            UpgradeKind::Damage => &mut self.damage,
            UpgradeKind::FireRate => &mut self.fire_rate,
        }
    }
}

/// Gain of one purchased level, captured when the tower is built.
#[derive(Clone, Copy, Debug, PartialEq)]
struct UpgradeSteps {
    range_tiles: f32,
    fire_rate: f32,
    damage: u32,
}

/// Tower stored inside the world.
#[derive(Clone, Debug)]
pub(crate) struct TowerState {
    /// Identifier allocated by the world for the tower.
    pub(crate) id: TowerId,
    /// Kind of tower that was constructed.
    pub(crate) kind: TowerKind,
    /// Cell occupied by the tower.
    pub(crate) cell: CellCoord,
    /// World position of the occupied cell.
    pub(crate) position: Vec2,
    range_in_tiles: f32,
    fire_rate: f32,
    damage: Damage,
    steps: UpgradeSteps,
    levels: UpgradeLevels,
    costs: UpgradeCosts,
    invested: Gold,
    cooldown: Duration,
}

impl TowerState {
    fn new(
        id: TowerId,
        kind: TowerKind,
        cell: CellCoord,
        position: Vec2,
        price: Gold,
        stats: &TowerRules,
        upgrade_base_cost: Gold,
    ) -> Self {
        Self {
            id,
            kind,
            cell,
            position,
            range_in_tiles: stats.range_tiles,
            fire_rate: stats.fire_rate,
            damage: stats.damage,
            steps: UpgradeSteps {
                range_tiles: stats.range_step_tiles,
                fire_rate: stats.fire_rate_step,
                damage: stats.damage_step,
            },
            levels: UpgradeLevels::default(),
            costs: UpgradeCosts::uniform(upgrade_base_cost),
            invested: price,
            cooldown: reload_time(stats.fire_rate),
        }
    }

    pub(crate) fn damage(&self) -> Damage {
        self.damage
    }

    /// Targeting radius converted to world units.
    pub(crate) fn range(&self, tile_length: f32) -> f32 {
        self.range_in_tiles * tile_length
    }

    /// Price of the next level of the provided attribute.
    pub(crate) fn next_cost(&self, upgrade: UpgradeKind) -> Gold {
        match upgrade {
            UpgradeKind::Range => self.costs.range,
            UpgradeKind::Damage => self.costs.damage,
            UpgradeKind::FireRate => self.costs.fire_rate,
        }
    }

    /// Records a purchased upgrade and returns the attribute's new level.
    pub(crate) fn apply_upgrade(&mut self, upgrade: UpgradeKind, paid: Gold) -> u32 {
        let level = match upgrade {
            UpgradeKind::Range => {
                self.range_in_tiles += self.steps.range_tiles;
                &mut self.levels.range
            }
            UpgradeKind::Damage => {
                self.damage = Damage::new(self.damage.get().saturating_add(self.steps.damage));
                &mut self.levels.damage
            }
            UpgradeKind::FireRate => {
                self.fire_rate += self.steps.fire_rate;
                &mut self.levels.fire_rate
            }
        };
        *level = level.saturating_add(1);
        let level = *level;

        let cost = self.costs.slot(upgrade);
        *cost = cost.compounded();
        self.invested = self.invested.saturating_add(paid);
        level
    }

    /// Gold returned when the tower is sold: half the investment, rounded down.
    pub(crate) fn refund(&self) -> Gold {
        Gold::new(self.invested.get() / 2)
    }

    pub(crate) fn is_ready(&self) -> bool {
        self.cooldown.is_zero()
    }

    pub(crate) fn tick_cooldown(&mut self, dt: Duration) {
        self.cooldown = self.cooldown.saturating_sub(dt);
    }

    pub(crate) fn reset_cooldown(&mut self) {
        self.cooldown = reload_time(self.fire_rate);
    }

    pub(crate) fn snapshot(&self, tile_length: f32) -> TowerSnapshot {
        TowerSnapshot {
            id: self.id,
            kind: self.kind,
            cell: self.cell,
            position: self.position,
            range: self.range(tile_length),
            fire_rate: self.fire_rate,
            damage: self.damage,
            levels: self.levels,
            invested: self.invested,
        }
    }

    pub(crate) fn cooldown_snapshot(&self) -> TowerCooldownSnapshot {
        TowerCooldownSnapshot {
            tower: self.id,
            ready_in: self.cooldown,
        }
    }
}

/// Registry that stores towers and manages identifier allocation.
#[derive(Debug)]
pub(crate) struct TowerRegistry {
    entries: BTreeMap<TowerId, TowerState>,
    occupancy: HashMap<CellCoord, TowerId>,
    next_tower_id: TowerId,
}

impl TowerRegistry {
    /// Creates an empty tower registry with a reset identifier counter.
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            occupancy: HashMap::new(),
            next_tower_id: TowerId::new(0),
        }
    }

    /// Tower occupying the provided cell, if any.
    pub(crate) fn tower_at(&self, cell: CellCoord) -> Option<TowerId> {
        self.occupancy.get(&cell).copied()
    }

    /// Stores a new tower on a free cell. Callers validate the cell first.
    pub(crate) fn insert(
        &mut self,
        kind: TowerKind,
        cell: CellCoord,
        position: Vec2,
        price: Gold,
        rules: &GameRules,
    ) -> TowerId {
        let id = self.next_tower_id;
        self.next_tower_id = TowerId::new(id.get().saturating_add(1));

        let state = TowerState::new(
            id,
            kind,
            cell,
            position,
            price,
            &rules.tower,
            rules.upgrade_base_cost,
        );
        let _ = self.occupancy.insert(cell, id);
        let _ = self.entries.insert(id, state);
        id
    }

    pub(crate) fn remove(&mut self, tower: TowerId) -> Option<TowerState> {
        let state = self.entries.remove(&tower)?;
        let _ = self.occupancy.remove(&state.cell);
        Some(state)
    }

    pub(crate) fn get(&self, tower: TowerId) -> Option<&TowerState> {
        self.entries.get(&tower)
    }

    pub(crate) fn get_mut(&mut self, tower: TowerId) -> Option<&mut TowerState> {
        self.entries.get_mut(&tower)
    }

    /// Towers in identifier order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &TowerState> {
        self.entries.values()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut TowerState> {
        self.entries.values_mut()
    }
}

fn reload_time(fire_rate: f32) -> Duration {
    if fire_rate <= 0.0 {
        return Duration::MAX;
    }
    Duration::try_from_secs_f32(fire_rate.recip()).unwrap_or(Duration::MAX)
}
