//! Walkability grid built from a level's terrain layer.

use simple_arcade_core::{CellCoord, TileLayer};

/// Dense walkability grid. Cells without terrain are walls.
///
/// The grid is immutable once built; a new level builds a new grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    walls: Vec<bool>,
}

impl Grid {
    /// Builds a grid by asking `is_walkable` about every cell.
    pub fn from_walkability<F>(width: u32, height: u32, mut is_walkable: F) -> Self
    where
        F: FnMut(CellCoord) -> bool,
    {
        let capacity = usize::try_from(u64::from(width) * u64::from(height)).unwrap_or(0);
        let mut walls = Vec::with_capacity(capacity);
        for row in 0..height {
            for column in 0..width {
                walls.push(!is_walkable(CellCoord::new(column, row)));
            }
        }

        Self {
            width,
            height,
            walls,
        }
    }

    /// Builds a grid where every cell holding a tile is walkable.
    #[must_use]
    pub fn from_tile_layer(layer: &TileLayer) -> Self {
        Self::from_walkability(layer.width, layer.height, |cell| layer.tile(cell).is_some())
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Reports whether the cell lies inside the grid.
    #[must_use]
    pub const fn in_bounds(&self, cell: CellCoord) -> bool {
        cell.column() < self.width && cell.row() < self.height
    }

    /// Reports whether the cell lies inside the grid and is not a wall.
    #[must_use]
    pub fn is_walkable(&self, cell: CellCoord) -> bool {
        self.index(cell)
            .and_then(|index| self.walls.get(index))
            .map_or(false, |wall| !*wall)
    }

    /// In-bounds orthogonal neighbours in north, east, south, west order.
    pub fn neighbors(&self, cell: CellCoord) -> impl Iterator<Item = CellCoord> {
        neighbors(cell, self.width, self.height)
    }

    /// Walkable orthogonal neighbours in north, east, south, west order.
    pub fn walkable_neighbors(&self, cell: CellCoord) -> impl Iterator<Item = CellCoord> + '_ {
        self.neighbors(cell)
            .filter(move |neighbor| self.is_walkable(*neighbor))
    }

    /// Iterator over every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellCoord> {
        let width = self.width;
        (0..self.height).flat_map(move |row| (0..width).map(move |column| CellCoord::new(column, row)))
    }

    pub(crate) fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.in_bounds(cell) {
            return None;
        }
        let width = usize::try_from(self.width).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let row = usize::try_from(cell.row()).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }

    pub(crate) fn cell_count(&self) -> usize {
        self.walls.len()
    }
}

fn neighbors(cell: CellCoord, width: u32, height: u32) -> impl Iterator<Item = CellCoord> {
    let mut candidates = [None; 4];
    let mut count = 0;

    if cell.column() < width && cell.row() < height {
        if let Some(row) = cell.row().checked_sub(1) {
            candidates[count] = Some(CellCoord::new(cell.column(), row));
            count += 1;
        }

        if let Some(column) = cell.column().checked_add(1) {
            if column < width {
                candidates[count] = Some(CellCoord::new(column, cell.row()));
                count += 1;
            }
        }

        if let Some(row) = cell.row().checked_add(1) {
            if row < height {
                candidates[count] = Some(CellCoord::new(cell.column(), row));
                count += 1;
            }
        }

        if let Some(column) = cell.column().checked_sub(1) {
            candidates[count] = Some(CellCoord::new(column, cell.row()));
            count += 1;
        }
    }

    candidates.into_iter().take(count).flatten()
}

#[cfg(test)]
mod tests {
    use super::*;
    use simple_arcade_core::TERRAIN_LAYER;

    #[test]
    fn corner_cells_have_two_neighbors() {
        let grid = Grid::from_walkability(3, 3, |_| true);
        let corner: Vec<_> = grid.neighbors(CellCoord::new(0, 0)).collect();
        assert_eq!(corner, vec![CellCoord::new(1, 0), CellCoord::new(0, 1)]);

        let far: Vec<_> = grid.neighbors(CellCoord::new(2, 2)).collect();
        assert_eq!(far, vec![CellCoord::new(2, 1), CellCoord::new(1, 2)]);
    }

    #[test]
    fn neighbor_order_is_north_east_south_west() {
        let grid = Grid::from_walkability(3, 3, |_| true);
        let center: Vec<_> = grid.neighbors(CellCoord::new(1, 1)).collect();
        assert_eq!(
            center,
            vec![
                CellCoord::new(1, 0),
                CellCoord::new(2, 1),
                CellCoord::new(1, 2),
                CellCoord::new(0, 1),
            ]
        );
    }

    #[test]
    fn out_of_bounds_cells_are_not_walkable() {
        let grid = Grid::from_walkability(2, 2, |_| true);
        assert!(grid.is_walkable(CellCoord::new(1, 1)));
        assert!(!grid.is_walkable(CellCoord::new(2, 0)));
        assert!(!grid.in_bounds(CellCoord::new(0, 2)));
        assert_eq!(grid.neighbors(CellCoord::new(5, 5)).count(), 0);
    }

    #[test]
    fn empty_tiles_become_walls() {
        let layer = TileLayer {
            name: TERRAIN_LAYER.to_owned(),
            width: 3,
            height: 1,
            tiles: vec![Some(7), None, Some(7)],
        };
        let grid = Grid::from_tile_layer(&layer);

        assert!(grid.is_walkable(CellCoord::new(0, 0)));
        assert!(!grid.is_walkable(CellCoord::new(1, 0)));
        assert!(grid.is_walkable(CellCoord::new(2, 0)));
        assert_eq!(
            grid.walkable_neighbors(CellCoord::new(0, 0)).count(),
            0,
            "the only neighbour is a wall"
        );
    }
}
