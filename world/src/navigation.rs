//! Breadth-first path planning across the walkability grid.

use std::{collections::VecDeque, fmt::Write as _, sync::Arc};

use glam::Vec2;
use simple_arcade_core::CellCoord;
use thiserror::Error;

use crate::grid::Grid;

/// Reasons the planner could not produce a path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum PathError {
    /// An endpoint lies outside the grid.
    #[error("cell {0:?} lies outside the grid")]
    OutOfBounds(CellCoord),
    /// The start cell is a wall.
    #[error("start cell {0:?} is not walkable")]
    StartBlocked(CellCoord),
    /// The goal cell is a wall.
    #[error("goal cell {0:?} is not walkable")]
    GoalBlocked(CellCoord),
    /// No sequence of walkable cells connects start and goal.
    #[error("goal {goal:?} cannot be reached from {start:?}")]
    Unreachable {
        /// Cell the search started from.
        start: CellCoord,
        /// Cell the search tried to reach.
        goal: CellCoord,
    },
}

/// Finds the fewest-step orthogonal path from `start` to `goal`.
///
/// The returned cells run from `start` to `goal` inclusive. Neighbours are
/// explored north, east, south, west, so ties between equally short paths
/// resolve the same way on every run.
pub fn breadth_first_search(
    grid: &Grid,
    start: CellCoord,
    goal: CellCoord,
) -> Result<Vec<CellCoord>, PathError> {
    for endpoint in [start, goal] {
        if !grid.in_bounds(endpoint) {
            return Err(PathError::OutOfBounds(endpoint));
        }
    }
    if !grid.is_walkable(start) {
        return Err(PathError::StartBlocked(start));
    }
    if !grid.is_walkable(goal) {
        return Err(PathError::GoalBlocked(goal));
    }

    let unreachable = PathError::Unreachable { start, goal };
    let mut parents: Vec<Option<CellCoord>> = vec![None; grid.cell_count()];
    let mut visited = vec![false; grid.cell_count()];
    let mut queue = VecDeque::new();

    let start_index = grid.index(start).ok_or(unreachable)?;
    visited[start_index] = true;
    queue.push_back(start);

    while let Some(cell) = queue.pop_front() {
        if cell == goal {
            return reconstruct(grid, &parents, start, goal).ok_or(unreachable);
        }

        for neighbor in grid.walkable_neighbors(cell) {
            let Some(index) = grid.index(neighbor) else {
                continue;
            };
            if visited[index] {
                continue;
            }
            visited[index] = true;
            parents[index] = Some(cell);
            queue.push_back(neighbor);
        }
    }

    Err(unreachable)
}

fn reconstruct(
    grid: &Grid,
    parents: &[Option<CellCoord>],
    start: CellCoord,
    goal: CellCoord,
) -> Option<Vec<CellCoord>> {
    let mut cells = vec![goal];
    let mut current = goal;
    while current != start {
        let parent = parents.get(grid.index(current)?).copied().flatten()?;
        cells.push(parent);
        current = parent;
    }
    cells.reverse();
    Some(cells)
}

/// Maps grid cells to world-space positions.
///
/// Row zero is the top row of the map while world Y grows upwards, so rows
/// are flipped against the grid height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileLayout {
    tile_length: f32,
    origin: Vec2,
    rows: u32,
}

impl TileLayout {
    /// Creates a layout for a grid with `rows` rows.
    #[must_use]
    pub const fn new(tile_length: f32, origin: Vec2, rows: u32) -> Self {
        Self {
            tile_length,
            origin,
            rows,
        }
    }

    /// Side length of a tile in world units.
    #[must_use]
    pub const fn tile_length(&self) -> f32 {
        self.tile_length
    }

    /// World position of the provided cell.
    #[must_use]
    pub fn cell_to_world(&self, cell: CellCoord) -> Vec2 {
        let flipped_row = self.rows.saturating_sub(1).saturating_sub(cell.row());
        self.origin
            + Vec2::new(
                cell.column() as f32 * self.tile_length,
                flipped_row as f32 * self.tile_length,
            )
    }
}

/// Planned route from spawn to goal in both grid and world space.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    cells: Vec<CellCoord>,
    waypoints: Arc<[Vec2]>,
}

impl Path {
    /// Plans a path and converts it into world-space waypoints.
    pub fn plan(
        grid: &Grid,
        layout: &TileLayout,
        start: CellCoord,
        goal: CellCoord,
    ) -> Result<Self, PathError> {
        let cells = breadth_first_search(grid, start, goal)?;
        let waypoints: Arc<[Vec2]> = cells
            .iter()
            .map(|cell| layout.cell_to_world(*cell))
            .collect();
        Ok(Self { cells, waypoints })
    }

    /// Cells along the path, spawn first.
    #[must_use]
    pub fn cells(&self) -> &[CellCoord] {
        &self.cells
    }

    /// Shared world-space waypoints, spawn first.
    #[must_use]
    pub fn waypoints(&self) -> &Arc<[Vec2]> {
        &self.waypoints
    }

    /// Reports whether the path crosses the provided cell.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        self.cells.contains(&cell)
    }
}

/// Draws the grid as text: `#` wall, `.` floor, `*` path, `S` start, `G` goal.
#[must_use]
pub fn render_ascii(
    grid: &Grid,
    path: Option<&[CellCoord]>,
    start: CellCoord,
    goal: CellCoord,
) -> String {
    let mut out = String::new();
    for row in 0..grid.height() {
        for column in 0..grid.width() {
            let cell = CellCoord::new(column, row);
            let glyph = if cell == start {
                'S'
            } else if cell == goal {
                'G'
            } else if path.is_some_and(|cells| cells.contains(&cell)) {
                '*'
            } else if grid.is_walkable(cell) {
                '.'
            } else {
                '#'
            };
            out.push(glyph);
        }
        let _ = writeln!(out);
    }
    out
}
