#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that settles enemy deaths into gold and lives.

use simple_arcade_core::{Command, Event};

/// Translates `EnemyDied` events into economy commands.
///
/// Enemies destroyed by towers credit their reward; enemies that breached
/// the goal cost the player one life.
#[derive(Debug, Default)]
pub struct Economy;

impl Economy {
    /// Creates a new economy system.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Consumes world events and appends the resulting commands to `out`.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            if let Event::EnemyDied {
                gain_gold, reward, ..
            } = event
            {
                if *gain_gold {
                    out.push(Command::CreditGold { amount: *reward });
                } else {
                    out.push(Command::LoseLife);
                }
            }
        }
    }
}
