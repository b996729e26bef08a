#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that turns tower target assignments into fire commands.

use simple_arcade_core::{Command, TowerCooldownView, TowerId, TowerTarget};

/// Pairs towers whose reload finished with the enemy they are aimed at.
#[derive(Debug, Default)]
pub struct TowerCombat {
    ready: Vec<TowerId>,
}

impl TowerCombat {
    /// Creates a combat system with an empty ready list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits one `Command::FireProjectile` per ready tower that has a target.
    ///
    /// Commands follow the order of `tower_targets`. Towers still reloading,
    /// or missing from the cooldown view, stay silent.
    pub fn handle(
        &mut self,
        tower_cooldowns: &TowerCooldownView,
        tower_targets: &[TowerTarget],
        out: &mut Vec<Command>,
    ) {
        if tower_targets.is_empty() {
            return;
        }

        // The view is sorted by tower id, so the ready list is too.
        self.ready.clear();
        self.ready.extend(
            tower_cooldowns
                .iter()
                .filter(|snapshot| snapshot.ready_in.is_zero())
                .map(|snapshot| snapshot.tower),
        );
        if self.ready.is_empty() {
            return;
        }

        out.extend(
            tower_targets
                .iter()
                .filter(|target| self.ready.binary_search(&target.tower).is_ok())
                .map(|target| Command::FireProjectile {
                    tower: target.tower,
                    target: target.enemy,
                }),
        );
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use glam::Vec2;
    use simple_arcade_core::{EnemyId, TowerCooldownSnapshot};

    use super::*;

    fn cooldowns(entries: &[(u32, u64)]) -> TowerCooldownView {
        TowerCooldownView::from_snapshots(
            entries
                .iter()
                .map(|&(tower, millis)| TowerCooldownSnapshot {
                    tower: TowerId::new(tower),
                    ready_in: Duration::from_millis(millis),
                })
                .collect(),
        )
    }

    fn aim(tower: u32, enemy: u32) -> TowerTarget {
        TowerTarget {
            tower: TowerId::new(tower),
            enemy: EnemyId::new(enemy),
            tower_position: Vec2::ZERO,
            enemy_position: Vec2::ONE,
        }
    }

    fn fire(tower: u32, enemy: u32) -> Command {
        Command::FireProjectile {
            tower: TowerId::new(tower),
            target: EnemyId::new(enemy),
        }
    }

    #[test]
    fn idle_towers_without_targets_do_not_fire() {
        let mut combat = TowerCombat::new();
        let mut out = Vec::new();

        combat.handle(&cooldowns(&[(0, 0), (1, 0)]), &[], &mut out);

        assert!(out.is_empty());
    }

    #[test]
    fn only_reloaded_towers_fire() {
        let mut combat = TowerCombat::new();
        let mut out = Vec::new();

        combat.handle(
            &cooldowns(&[(3, 0), (1, 400), (2, 0)]),
            &[aim(1, 10), aim(2, 11), aim(3, 12)],
            &mut out,
        );

        assert_eq!(out, vec![fire(2, 11), fire(3, 12)]);
    }

    #[test]
    fn unknown_tower_is_ignored() {
        let mut combat = TowerCombat::new();
        let mut out = Vec::new();

        combat.handle(&cooldowns(&[(0, 0)]), &[aim(5, 1)], &mut out);

        assert!(out.is_empty());
    }

    #[test]
    fn commands_are_appended_to_existing_output() {
        let mut combat = TowerCombat::new();
        let mut out = vec![Command::LoseLife];

        combat.handle(&cooldowns(&[(0, 0)]), &[aim(0, 4)], &mut out);
        combat.handle(&cooldowns(&[(0, 250)]), &[aim(0, 4)], &mut out);

        assert_eq!(out, vec![Command::LoseLife, fire(0, 4)]);
    }
}
