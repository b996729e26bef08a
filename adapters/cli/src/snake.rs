//! Autopilot session for the snake game.

use anyhow::Result;
use simple_arcade_snake::{Cell, Direction, SnakeConfig, SnakeEvent, SnakeGame, SnakeStatus};
use tracing::debug;

/// Outcome of an autopilot session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct SnakeSummary {
    pub(crate) steps: u32,
    pub(crate) fruit_eaten: u32,
    pub(crate) length: usize,
    pub(crate) status: SnakeStatus,
}

/// Plays up to `steps` moves, steering greedily towards the fruit.
pub(crate) fn play(config: &SnakeConfig, steps: u32) -> Result<SnakeSummary> {
    let mut game = SnakeGame::new(config)?;
    let mut events = Vec::new();
    let mut summary = SnakeSummary {
        steps: 0,
        fruit_eaten: 0,
        length: game.len(),
        status: game.status(),
    };

    while summary.steps < steps && game.status() == SnakeStatus::Playing {
        if let Some(direction) = game.fruit().and_then(|fruit| towards(&game, fruit)) {
            game.steer(direction);
        }
        events.clear();
        game.step(&mut events);
        summary.steps += 1;

        for event in &events {
            match event {
                SnakeEvent::Ate { fruit, length } => {
                    summary.fruit_eaten += 1;
                    debug!(?fruit, length, "fruit eaten");
                }
                SnakeEvent::Collided { cell } => debug!(?cell, "snake collided"),
                _ => {}
            }
        }
    }

    summary.length = game.len();
    summary.status = game.status();
    Ok(summary)
}

/// Shortest heading towards `target` on the wrapping board, horizontal first.
fn towards(game: &SnakeGame, target: Cell) -> Option<Direction> {
    let (width, height) = game.dimensions();
    let head = game.head();
    axis(head.x, target.x, width, Direction::Right, Direction::Left)
        .or_else(|| axis(head.y, target.y, height, Direction::Up, Direction::Down))
}

fn axis(from: u32, to: u32, extent: u32, forward: Direction, back: Direction) -> Option<Direction> {
    if from == to {
        return None;
    }
    let ahead = (to + extent - from) % extent;
    if ahead <= extent - ahead {
        Some(forward)
    } else {
        Some(back)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapping_distance_picks_the_short_way() {
        assert_eq!(axis(0, 3, 4, Direction::Right, Direction::Left), Some(Direction::Left));
        assert_eq!(axis(1, 2, 4, Direction::Right, Direction::Left), Some(Direction::Right));
        assert_eq!(axis(2, 2, 4, Direction::Up, Direction::Down), None);
    }

    #[test]
    fn autopilot_eats_on_an_open_board() {
        let summary = play(&SnakeConfig::default(), 300).expect("default config is valid");

        assert!(summary.fruit_eaten > 0);
        assert_eq!(summary.length, 3 + summary.fruit_eaten as usize);
    }

    #[test]
    fn invalid_board_is_an_error() {
        let config = SnakeConfig {
            width: 0,
            ..SnakeConfig::default()
        };
        assert!(play(&config, 10).is_err());
    }
}
