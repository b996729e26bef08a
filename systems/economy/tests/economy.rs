use std::time::Duration;

use simple_arcade_core::{Command, EnemyId, Event, GameRules, Gold, Health};
use simple_arcade_system_economy::Economy;
use simple_arcade_world::{self as world, query, tile_map_from_ascii, World};

fn settle(world: &mut World, economy: &mut Economy, events: &[Event]) -> Vec<Event> {
    let mut commands = Vec::new();
    economy.handle(events, &mut commands);

    let mut generated = Vec::new();
    for command in commands {
        world::apply(world, command, &mut generated);
    }
    generated
}

#[test]
fn breaching_enemies_drain_lives_until_game_over() {
    let mut world = World::new();
    let mut economy = Economy::new();
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::ConfigureRules {
            rules: GameRules {
                starting_lives: 2,
                ..GameRules::default()
            },
        },
        &mut events,
    );
    let map = tile_map_from_ascii(&["S.G"], 32).expect("valid rows");
    world::apply(&mut world, Command::LoadLevel { map }, &mut events);

    for _ in 0..3 {
        world::apply(
            &mut world,
            Command::SpawnEnemy {
                health: Health::new(1),
                speed: 4.0,
                reward: Gold::new(3),
            },
            &mut events,
        );
    }

    let mut settled = Vec::new();
    for _ in 0..4 {
        let mut events = Vec::new();
        world::apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_millis(250),
            },
            &mut events,
        );
        settled.extend(settle(&mut world, &mut economy, &events));
    }

    assert_eq!(query::lives(&world), 0);
    assert!(query::is_game_over(&world));
    assert_eq!(
        settled
            .iter()
            .filter(|event| matches!(event, Event::GameOver))
            .count(),
        1
    );
    assert_eq!(query::gold(&world), GameRules::default().starting_gold);
}

#[test]
fn kill_rewards_reach_the_balance() {
    let mut world = World::new();
    let mut economy = Economy::new();
    let map = tile_map_from_ascii(&["S.G"], 32).expect("valid rows");
    let mut events = Vec::new();
    world::apply(&mut world, Command::LoadLevel { map }, &mut events);
    let before = query::gold(&world);

    let died = [Event::EnemyDied {
        enemy: EnemyId::new(9),
        gain_gold: true,
        reward: Gold::new(12),
    }];
    let generated = settle(&mut world, &mut economy, &died);

    assert_eq!(
        generated,
        vec![Event::GoldChanged {
            balance: before.saturating_add(Gold::new(12)),
        }]
    );
}
