#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Discrete movement and collision model for the Snake game.
//!
//! The board is a toroidal `width × height` grid with `y` growing upwards.
//! The snake advances one cell per timer expiration, its segments follow the
//! leader, and eating fruit grows it by one segment at the cell its tail just
//! vacated.

mod timer;

use std::{collections::VecDeque, time::Duration};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

pub use timer::ExpirationTimer;

/// Cell on the snake board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    /// Column, growing rightwards.
    pub x: u32,
    /// Row, growing upwards.
    pub y: u32,
}

impl Cell {
    /// Creates a new cell.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Heading of the snake.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Towards larger `y`.
    Up,
    /// Towards smaller `y`.
    Down,
    /// Towards smaller `x`.
    Left,
    /// Towards larger `x`.
    Right,
}

impl Direction {
    const fn offset(self) -> (i64, i64) {
        match self {
            Self::Up => (0, 1),
            Self::Down => (0, -1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Direction pointing the other way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Parameters of a snake game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnakeConfig {
    /// Columns on the board.
    pub width: u32,
    /// Rows on the board.
    pub height: u32,
    /// Initial head cell.
    pub start: Cell,
    /// Initial heading.
    pub direction: Direction,
    /// Segments, head included, at the start of the game.
    pub initial_length: u32,
    /// Milliseconds between two moves.
    pub step_interval_ms: u64,
    /// Seed of the fruit placement generator.
    pub seed: u64,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            width: 16,
            height: 16,
            start: Cell::new(8, 8),
            direction: Direction::Right,
            initial_length: 3,
            step_interval_ms: 150,
            seed: 42,
        }
    }
}

/// Reasons a snake game cannot be created.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnakeError {
    /// The board has no cells.
    #[error("board must have at least one cell, got {width}x{height}")]
    EmptyBoard {
        /// Requested columns.
        width: u32,
        /// Requested rows.
        height: u32,
    },
    /// The start cell lies outside the board.
    #[error("start cell ({x}, {y}) lies outside the board")]
    StartOutOfBounds {
        /// Requested column.
        x: u32,
        /// Requested row.
        y: u32,
    },
    /// The initial body cannot be laid out without overlapping itself.
    #[error("initial length {length} does not fit a board line of {available} cells")]
    InvalidLength {
        /// Requested segment count.
        length: u32,
        /// Cells available along the initial heading.
        available: u32,
    },
}

/// Outcome reported by a game step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SnakeEvent {
    /// The head moved into a new cell.
    Moved {
        /// New head cell.
        head: Cell,
    },
    /// The head reached the fruit.
    Ate {
        /// Cell the fruit occupied.
        fruit: Cell,
        /// Segment count after growing.
        length: usize,
    },
    /// Fruit appeared on a free cell.
    FruitPlaced {
        /// Cell holding the fruit.
        cell: Cell,
    },
    /// The head would have entered its own body.
    Collided {
        /// Body cell the head ran into.
        cell: Cell,
    },
    /// The snake covers the whole board.
    Won,
}

/// Progress of a snake game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SnakeStatus {
    /// The snake keeps moving.
    Playing,
    /// The snake ran into itself.
    Lost,
    /// No free cell is left for fruit.
    Won,
}

/// Snake game state driven by elapsed time and buffered direction requests.
#[derive(Debug)]
pub struct SnakeGame {
    width: u32,
    height: u32,
    body: VecDeque<Cell>,
    direction: Direction,
    requested: Option<Direction>,
    fruit: Option<Cell>,
    timer: ExpirationTimer,
    rng: ChaCha8Rng,
    status: SnakeStatus,
}

impl SnakeGame {
    /// Creates a game laid out according to `config`.
    ///
    /// The body trails the head opposite to the initial heading, wrapping
    /// around the board edges.
    pub fn new(config: &SnakeConfig) -> Result<Self, SnakeError> {
        let SnakeConfig {
            width,
            height,
            start,
            direction,
            initial_length,
            step_interval_ms,
            seed,
        } = *config;

        if width == 0 || height == 0 {
            return Err(SnakeError::EmptyBoard { width, height });
        }
        if start.x >= width || start.y >= height {
            return Err(SnakeError::StartOutOfBounds {
                x: start.x,
                y: start.y,
            });
        }
        let available = match direction {
            Direction::Left | Direction::Right => width,
            Direction::Up | Direction::Down => height,
        };
        if initial_length == 0 || initial_length > available {
            return Err(SnakeError::InvalidLength {
                length: initial_length,
                available,
            });
        }

        let mut game = Self {
            width,
            height,
            body: VecDeque::with_capacity(initial_length as usize),
            direction,
            requested: None,
            fruit: None,
            timer: ExpirationTimer::new(Duration::from_millis(step_interval_ms)),
            rng: ChaCha8Rng::seed_from_u64(seed),
            status: SnakeStatus::Playing,
        };

        let mut segment = start;
        for _ in 0..initial_length {
            game.body.push_back(segment);
            segment = game.neighbour(segment, direction.opposite());
        }

        let mut ignored = Vec::new();
        game.place_fruit(&mut ignored);
        Ok(game)
    }

    /// Board dimensions as `(width, height)`.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Head cell.
    #[must_use]
    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// Segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    /// Number of segments, head included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Reports whether the snake has no segments; never true for a live game.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Reports whether any segment occupies `cell`.
    #[must_use]
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Current fruit cell, absent once the board is full.
    #[must_use]
    pub const fn fruit(&self) -> Option<Cell> {
        self.fruit
    }

    /// Heading used by the last move.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Progress of the game.
    #[must_use]
    pub const fn status(&self) -> SnakeStatus {
        self.status
    }

    /// Buffers a heading change applied at the next move.
    ///
    /// Later requests replace earlier ones.
    pub fn steer(&mut self, direction: Direction) {
        self.requested = Some(direction);
    }

    /// Advances the game clock, moving once per expired step interval.
    pub fn tick(&mut self, dt: Duration, out: &mut Vec<SnakeEvent>) {
        let steps = self.timer.advance(dt);
        for _ in 0..steps {
            if self.status != SnakeStatus::Playing {
                break;
            }
            self.step(out);
        }
    }

    /// Moves the snake by one cell.
    pub fn step(&mut self, out: &mut Vec<SnakeEvent>) {
        if self.status != SnakeStatus::Playing {
            return;
        }

        if let Some(requested) = self.requested.take() {
            let turned = self.neighbour(self.head(), requested);
            if self.body.get(1) == Some(&turned) {
                debug!(?requested, "reversal into the body rejected");
            } else {
                self.direction = requested;
            }
        }

        let head = self.neighbour(self.head(), self.direction);
        let trailing = self.body.len() - 1;
        if self.body.iter().take(trailing).any(|segment| *segment == head) {
            info!(?head, length = self.body.len(), "snake collided with itself");
            self.status = SnakeStatus::Lost;
            out.push(SnakeEvent::Collided { cell: head });
            return;
        }

        self.body.push_front(head);
        let vacated = self.body.pop_back();
        out.push(SnakeEvent::Moved { head });

        if self.fruit == Some(head) {
            if let Some(vacated) = vacated {
                self.body.push_back(vacated);
            }
            out.push(SnakeEvent::Ate {
                fruit: head,
                length: self.body.len(),
            });
            self.place_fruit(out);
        }
    }

    fn place_fruit(&mut self, out: &mut Vec<SnakeEvent>) {
        let cells = u64::from(self.width) * u64::from(self.height);
        if self.body.len() as u64 >= cells {
            info!(length = self.body.len(), "snake fills the board");
            self.fruit = None;
            self.status = SnakeStatus::Won;
            out.push(SnakeEvent::Won);
            return;
        }

        loop {
            let cell = Cell::new(
                self.rng.gen_range(0..self.width),
                self.rng.gen_range(0..self.height),
            );
            if !self.occupies(cell) {
                self.fruit = Some(cell);
                out.push(SnakeEvent::FruitPlaced { cell });
                return;
            }
        }
    }

    fn neighbour(&self, cell: Cell, direction: Direction) -> Cell {
        let (dx, dy) = direction.offset();
        let wrap = |value: u32, delta: i64, extent: u32| {
            (i64::from(value) + delta).rem_euclid(i64::from(extent)) as u32
        };
        Cell::new(
            wrap(cell.x, dx, self.width),
            wrap(cell.y, dy, self.height),
        )
    }
}
