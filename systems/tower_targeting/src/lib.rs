#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that computes deterministic tower targets from world snapshots.

use glam::Vec2;
use simple_arcade_core::{EnemyId, EnemyView, TowerId, TowerTarget, TowerView};

/// Tower targeting system that reuses scratch buffers to avoid repeated allocations.
#[derive(Debug, Default)]
pub struct TowerTargeting {
    tower_workspace: Vec<TowerWorkspace>,
    enemy_workspace: Vec<EnemyCandidate>,
}

impl TowerTargeting {
    /// Creates a new tower targeting system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes tower targets for the provided world snapshot.
    ///
    /// Each tower picks the nearest enemy within its range; equal distances
    /// resolve to the lower enemy identifier. The output buffer is cleared
    /// before populating it with the latest assignments.
    pub fn handle(&mut self, towers: &TowerView, enemies: &EnemyView, out: &mut Vec<TowerTarget>) {
        out.clear();

        if towers.iter().next().is_none() || enemies.is_empty() {
            return;
        }

        self.prepare_tower_workspace(towers);
        if self.tower_workspace.is_empty() {
            return;
        }

        self.prepare_enemy_workspace(enemies);

        for tower in &self.tower_workspace {
            let max_distance = tower.range * tower.range;
            let mut best: Option<BestCandidate> = None;

            for candidate in &self.enemy_workspace {
                let distance_sq = tower.position.distance_squared(candidate.position);
                if distance_sq > max_distance {
                    continue;
                }

                let current = BestCandidate {
                    distance_sq,
                    enemy: candidate.id,
                    position: candidate.position,
                };

                match &mut best {
                    Some(existing) => {
                        if current.precedes(existing) {
                            *existing = current;
                        }
                    }
                    None => best = Some(current),
                }
            }

            if let Some(best_candidate) = best {
                out.push(TowerTarget {
                    tower: tower.id,
                    enemy: best_candidate.enemy,
                    tower_position: tower.position,
                    enemy_position: best_candidate.position,
                });
            }
        }
    }

    fn prepare_tower_workspace(&mut self, towers: &TowerView) {
        self.tower_workspace.clear();
        let (lower, _) = towers.iter().size_hint();
        self.tower_workspace.reserve(lower);

        for snapshot in towers.iter() {
            if !(snapshot.range > 0.0) {
                continue;
            }

            self.tower_workspace.push(TowerWorkspace {
                id: snapshot.id,
                position: snapshot.position,
                range: snapshot.range,
            });
        }
    }

    fn prepare_enemy_workspace(&mut self, enemies: &EnemyView) {
        self.enemy_workspace.clear();
        self.enemy_workspace.reserve(enemies.len());

        for snapshot in enemies.iter() {
            self.enemy_workspace.push(EnemyCandidate {
                id: snapshot.id,
                position: snapshot.position,
            });
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct TowerWorkspace {
    id: TowerId,
    position: Vec2,
    range: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct EnemyCandidate {
    id: EnemyId,
    position: Vec2,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct BestCandidate {
    distance_sq: f32,
    enemy: EnemyId,
    position: Vec2,
}

impl BestCandidate {
    fn precedes(&self, other: &Self) -> bool {
        if self.distance_sq != other.distance_sq {
            return self.distance_sq < other.distance_sq;
        }

        self.enemy < other.enemy
    }
}

#[cfg(test)]
mod tests {
    use super::{TowerTarget, TowerTargeting};
    use glam::Vec2;
    use simple_arcade_core::{
        CellCoord, Damage, EnemyId, EnemySnapshot, EnemyView, Gold, Health, TowerId, TowerKind,
        TowerSnapshot, TowerView, UpgradeLevels,
    };

    fn tower_view(snapshots: Vec<TowerSnapshot>) -> TowerView {
        TowerView::from_snapshots(snapshots)
    }

    fn enemy_view(snapshots: Vec<EnemySnapshot>) -> EnemyView {
        EnemyView::from_snapshots(snapshots)
    }

    fn tower_snapshot(id: u32, position: (f32, f32), range: f32) -> TowerSnapshot {
        TowerSnapshot {
            id: TowerId::new(id),
            kind: TowerKind::Basic,
            cell: CellCoord::new(0, 0),
            position: Vec2::new(position.0, position.1),
            range,
            fire_rate: 1.0,
            damage: Damage::new(1),
            levels: UpgradeLevels::default(),
            invested: Gold::new(50),
        }
    }

    fn enemy_snapshot(id: u32, position: (f32, f32)) -> EnemySnapshot {
        EnemySnapshot {
            id: EnemyId::new(id),
            position: Vec2::new(position.0, position.1),
            health: Health::new(3),
        }
    }

    #[test]
    fn targets_enemy_within_range() {
        let mut system = TowerTargeting::new();
        let towers = tower_view(vec![tower_snapshot(1, (4.0, 4.0), 2.0)]);
        let enemies = enemy_view(vec![enemy_snapshot(2, (5.5, 5.0))]);

        let mut out = Vec::new();
        system.handle(&towers, &enemies, &mut out);

        assert_eq!(
            out,
            vec![TowerTarget {
                tower: TowerId::new(1),
                enemy: EnemyId::new(2),
                tower_position: Vec2::new(4.0, 4.0),
                enemy_position: Vec2::new(5.5, 5.0),
            }]
        );
    }

    #[test]
    fn enemy_outside_range_is_ignored() {
        let mut system = TowerTargeting::new();
        let towers = tower_view(vec![tower_snapshot(1, (0.0, 0.0), 1.875)]);
        let enemies = enemy_view(vec![enemy_snapshot(2, (2.0, 0.0))]);

        let mut out = Vec::new();
        system.handle(&towers, &enemies, &mut out);

        assert!(out.is_empty());
    }

    #[test]
    fn enemy_on_the_range_boundary_is_targeted() {
        let mut system = TowerTargeting::new();
        let towers = tower_view(vec![tower_snapshot(1, (0.0, 0.0), 2.0)]);
        let enemies = enemy_view(vec![enemy_snapshot(2, (0.0, 2.0))]);

        let mut out = Vec::new();
        system.handle(&towers, &enemies, &mut out);

        assert_eq!(out.len(), 1);
    }

    #[test]
    fn nearest_enemy_is_preferred() {
        let mut system = TowerTargeting::new();
        let towers = tower_view(vec![tower_snapshot(1, (0.0, 0.0), 5.0)]);
        let enemies = enemy_view(vec![
            enemy_snapshot(1, (3.0, 0.0)),
            enemy_snapshot(2, (0.0, 1.0)),
            enemy_snapshot(3, (2.0, 2.0)),
        ]);

        let mut out = Vec::new();
        system.handle(&towers, &enemies, &mut out);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].enemy, EnemyId::new(2));
    }

    #[test]
    fn smaller_enemy_id_is_preferred_when_distances_match() {
        let mut system = TowerTargeting::new();
        let towers = tower_view(vec![tower_snapshot(1, (2.0, 2.0), 3.0)]);
        let enemies = enemy_view(vec![
            enemy_snapshot(20, (3.0, 2.0)),
            enemy_snapshot(10, (1.0, 2.0)),
        ]);

        let mut out = Vec::new();
        system.handle(&towers, &enemies, &mut out);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].enemy, EnemyId::new(10));
    }

    #[test]
    fn every_tower_gets_its_own_assignment() {
        let mut system = TowerTargeting::new();
        let towers = tower_view(vec![
            tower_snapshot(2, (10.0, 0.0), 2.0),
            tower_snapshot(1, (0.0, 0.0), 2.0),
        ]);
        let enemies = enemy_view(vec![
            enemy_snapshot(5, (9.0, 0.0)),
            enemy_snapshot(6, (1.0, 0.0)),
        ]);

        let mut out = Vec::new();
        system.handle(&towers, &enemies, &mut out);

        let pairs: Vec<_> = out.iter().map(|target| (target.tower, target.enemy)).collect();
        assert_eq!(
            pairs,
            vec![
                (TowerId::new(1), EnemyId::new(6)),
                (TowerId::new(2), EnemyId::new(5)),
            ]
        );
    }

    #[test]
    fn zero_range_tower_produces_no_target() {
        let mut system = TowerTargeting::new();
        let towers = tower_view(vec![tower_snapshot(1, (2.0, 2.0), 0.0)]);
        let enemies = enemy_view(vec![enemy_snapshot(1, (2.0, 2.0))]);

        let mut out = Vec::new();
        system.handle(&towers, &enemies, &mut out);

        assert!(out.is_empty());
    }

    #[test]
    fn empty_collections_produce_no_targets() {
        let mut system = TowerTargeting::new();
        let towers = tower_view(Vec::new());
        let enemies = enemy_view(vec![enemy_snapshot(1, (1.0, 1.0))]);

        let mut out = vec![TowerTarget {
            tower: TowerId::new(99),
            enemy: EnemyId::new(99),
            tower_position: Vec2::ZERO,
            enemy_position: Vec2::ZERO,
        }];
        system.handle(&towers, &enemies, &mut out);
        assert!(out.is_empty());

        let towers = tower_view(vec![tower_snapshot(1, (0.0, 0.0), 2.0)]);
        let enemies = enemy_view(Vec::new());
        system.handle(&towers, &enemies, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn removing_enemies_does_not_select_out_of_range_candidates() {
        let mut system = TowerTargeting::new();
        let towers = tower_view(vec![tower_snapshot(1, (0.0, 0.0), 2.0)]);
        let enemies = enemy_view(vec![
            enemy_snapshot(1, (1.0, 0.0)),
            enemy_snapshot(2, (20.0, 0.0)),
        ]);
        let mut out = Vec::new();
        system.handle(&towers, &enemies, &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].enemy, EnemyId::new(1));

        let enemies = enemy_view(vec![enemy_snapshot(2, (20.0, 0.0))]);
        system.handle(&towers, &enemies, &mut out);
        assert!(out.is_empty(), "far enemy should not be targeted when alone");
    }
}
