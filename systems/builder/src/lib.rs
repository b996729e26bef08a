#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure builder system responsible for emitting tower purchase, upgrade, and sale commands.

use simple_arcade_core::{CellCoord, Command, Event, TowerId, TowerKind, UpgradeKind};

/// Interaction mode of the build interface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BuilderMode {
    /// Nothing selected; clicks select towers.
    #[default]
    Idle,
    /// A tower purchase is pending; the next confirmed cell receives it.
    Placing,
    /// An existing tower is selected for upgrades or sale.
    Selected(TowerId),
}

/// Player intent distilled by an adapter from raw input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiAction {
    /// Starts placing a new tower.
    EnterBuildMode,
    /// Confirms the cell under the cursor.
    Confirm {
        /// Cell resolved from the cursor position.
        cell: CellCoord,
    },
    /// Leaves the current mode.
    Cancel,
    /// Selects whatever tower occupies the cell.
    Select {
        /// Cell resolved from the cursor position.
        cell: CellCoord,
    },
    /// Buys one level of the attribute for the selected tower.
    Upgrade(UpgradeKind),
    /// Sells the selected tower.
    Sell,
}

/// Builder system that translates UI actions into world commands.
#[derive(Debug, Clone, Default)]
pub struct Builder {
    mode: BuilderMode,
}

impl Builder {
    /// Creates a new builder system instance.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mode: BuilderMode::Idle,
        }
    }

    /// Current interaction mode.
    #[must_use]
    pub const fn mode(&self) -> BuilderMode {
        self.mode
    }

    /// Consumes world events and an optional UI action to emit builder commands.
    ///
    /// The `tower_at` closure should mirror the semantics of the world's
    /// `query::tower_at` helper so the system can identify the clicked tower.
    pub fn handle<F>(
        &mut self,
        events: &[Event],
        action: Option<UiAction>,
        mut tower_at: F,
        out: &mut Vec<Command>,
    ) where
        F: FnMut(CellCoord) -> Option<TowerId>,
    {
        for event in events {
            match event {
                Event::LevelLoaded { .. } | Event::LevelRejected { .. } | Event::GameOver => {
                    self.mode = BuilderMode::Idle;
                }
                Event::TowerSold { tower, .. } if self.mode == BuilderMode::Selected(*tower) => {
                    self.mode = BuilderMode::Idle;
                }
                _ => {}
            }
        }

        let Some(action) = action else {
            return;
        };

        match (self.mode, action) {
            (_, UiAction::EnterBuildMode) => self.mode = BuilderMode::Placing,
            (_, UiAction::Cancel) => self.mode = BuilderMode::Idle,
            (BuilderMode::Placing, UiAction::Confirm { cell }) => {
                out.push(Command::PlaceTower {
                    kind: TowerKind::Basic,
                    cell,
                });
                self.mode = BuilderMode::Idle;
            }
            (_, UiAction::Select { cell }) => {
                self.mode = tower_at(cell).map_or(BuilderMode::Idle, BuilderMode::Selected);
            }
            (BuilderMode::Selected(tower), UiAction::Upgrade(upgrade)) => {
                out.push(Command::UpgradeTower { tower, upgrade });
            }
            (BuilderMode::Selected(tower), UiAction::Sell) => {
                out.push(Command::SellTower { tower });
            }
            (_, UiAction::Confirm { .. } | UiAction::Upgrade(_) | UiAction::Sell) => {}
        }
    }
}
