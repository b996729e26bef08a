use std::time::Duration;

use simple_arcade_core::{
    CellCoord, Command, Event, GameRules, Gold, Health, TowerKind, TowerTarget, UpgradeKind,
};
use simple_arcade_system_tower_combat::TowerCombat;
use simple_arcade_system_tower_targeting::TowerTargeting;
use simple_arcade_world::{self as world, query, tile_map_from_ascii, World};

const FRAME: Duration = Duration::from_millis(100);

struct Harness {
    world: World,
    targeting: TowerTargeting,
    combat: TowerCombat,
    targets: Vec<TowerTarget>,
    commands: Vec<Command>,
}

impl Harness {
    fn new(rules: GameRules) -> Self {
        let mut world = World::new();
        let mut events = Vec::new();
        world::apply(&mut world, Command::ConfigureRules { rules }, &mut events);
        let map = tile_map_from_ascii(&["S.....G", "#######"], 32).expect("valid rows");
        world::apply(&mut world, Command::LoadLevel { map }, &mut events);
        world::apply(
            &mut world,
            Command::PlaceTower {
                kind: TowerKind::Basic,
                cell: CellCoord::new(0, 1),
            },
            &mut events,
        );
        world::apply(
            &mut world,
            Command::SpawnEnemy {
                health: Health::new(1_000),
                speed: 0.0,
                reward: Gold::new(1),
            },
            &mut events,
        );

        Self {
            world,
            targeting: TowerTargeting::new(),
            combat: TowerCombat::new(),
            targets: Vec::new(),
            commands: Vec::new(),
        }
    }

    fn frame(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        world::apply(&mut self.world, Command::Tick { dt: FRAME }, &mut events);

        let towers = query::tower_view(&self.world);
        let enemies = query::enemy_view(&self.world);
        self.targeting.handle(&towers, &enemies, &mut self.targets);
        self.combat.handle(
            &query::tower_cooldowns(&self.world),
            &self.targets,
            &mut self.commands,
        );

        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut events);
        }
        events
    }

    fn shots_over(&mut self, frames: usize) -> Vec<usize> {
        let mut fired_at = Vec::new();
        for index in 1..=frames {
            let events = self.frame();
            fired_at.extend(
                events
                    .iter()
                    .filter(|event| matches!(event, Event::ProjectileFired { .. }))
                    .map(|_| index),
            );
        }
        fired_at
    }
}

#[test]
fn fire_rate_of_one_fires_once_per_second() {
    let mut rules = GameRules::default();
    rules.tower.fire_rate = 1.0;
    let mut harness = Harness::new(rules);

    let fired_at = harness.shots_over(50);

    assert_eq!(fired_at, vec![10, 20, 30, 40, 50]);
}

#[test]
fn base_tower_fires_once_per_reload() {
    let mut harness = Harness::new(GameRules::default());

    let fired_at = harness.shots_over(50);

    assert_eq!(fired_at, vec![13, 26, 39], "0.8 shots per second");
}

#[test]
fn fire_rate_upgrade_shortens_reload() {
    let mut harness = Harness::new(GameRules::default());
    let tower = query::tower_at(&harness.world, CellCoord::new(0, 1)).expect("tower placed");
    let mut events = Vec::new();
    world::apply(
        &mut harness.world,
        Command::UpgradeTower {
            tower,
            upgrade: UpgradeKind::FireRate,
        },
        &mut events,
    );

    let _ = harness.shots_over(13);
    let fired_at = harness.shots_over(40);

    assert_eq!(fired_at, vec![8, 16, 24, 32, 40], "1.3 shots per second");
}
