//! Level construction from layered tile maps.

use simple_arcade_core::{
    CellCoord, MapLayer, MapObject, ObjectLayer, TileLayer, TileMap, EVENTS_LAYER, GOAL_OBJECT,
    SPAWN_OBJECT, TERRAIN_LAYER, TOWER_OBJECT,
};
use thiserror::Error;

use crate::grid::Grid;

const FLOOR_TILE: u32 = 1;

/// Reasons a tile map cannot be turned into a playable level.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum LevelError {
    /// Tiles must have a positive size to convert object positions.
    #[error("tile size {width}x{height} must be positive")]
    InvalidTileSize {
        /// Tile width in pixels.
        width: u32,
        /// Tile height in pixels.
        height: u32,
    },
    /// The named tile layer is missing.
    #[error("tile map has no `{0}` tile layer")]
    MissingTileLayer(&'static str),
    /// The named object layer is missing.
    #[error("tile map has no `{0}` object layer")]
    MissingObjectLayer(&'static str),
    /// The tile layer does not match the map dimensions.
    #[error("terrain layer holds {actual} tiles, expected {expected}")]
    TerrainSizeMismatch {
        /// Number of tiles required by the map dimensions.
        expected: usize,
        /// Number of tiles stored in the layer.
        actual: usize,
    },
    /// A required marker object is missing.
    #[error("events layer has no `{0}` object")]
    MissingObject(&'static str),
    /// A marker object lies outside the map.
    #[error("object `{name}` at ({x}, {y}) lies outside the map")]
    ObjectOutOfBounds {
        /// Name of the offending object.
        name: String,
        /// Left edge in pixels.
        x: f32,
        /// Bottom edge in pixels.
        y: f32,
    },
    /// An ASCII row differs in length from the first row.
    #[error("row {row} has {actual} cells, expected {expected}")]
    RaggedRow {
        /// Zero-based row index.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        actual: usize,
    },
    /// An ASCII glyph has no meaning.
    #[error("unknown glyph `{glyph}` at column {column}, row {row}")]
    UnknownGlyph {
        /// Offending character.
        glyph: char,
        /// Zero-based column index.
        column: usize,
        /// Zero-based row index.
        row: usize,
    },
}

/// Static description of a level: terrain grid and marker cells.
#[derive(Clone, Debug, PartialEq)]
pub struct LevelLayout {
    grid: Grid,
    spawn: CellCoord,
    goal: CellCoord,
    towers: Vec<CellCoord>,
}

impl LevelLayout {
    /// Builds a level from the `Terrain` and `Events` layers of a tile map.
    pub fn from_tile_map(map: &TileMap) -> Result<Self, LevelError> {
        if map.tile_width == 0 || map.tile_height == 0 {
            return Err(LevelError::InvalidTileSize {
                width: map.tile_width,
                height: map.tile_height,
            });
        }

        let terrain = terrain_layer(map)?;
        let events = events_layer(map)?;

        let expected = usize::try_from(u64::from(map.width) * u64::from(map.height)).unwrap_or(0);
        if terrain.width != map.width || terrain.height != map.height || terrain.tiles.len() != expected
        {
            return Err(LevelError::TerrainSizeMismatch {
                expected,
                actual: terrain.tiles.len(),
            });
        }

        let grid = Grid::from_tile_layer(terrain);
        let spawn = marker_cell(map, events, SPAWN_OBJECT)?;
        let goal = marker_cell(map, events, GOAL_OBJECT)?;
        let towers = events
            .objects
            .iter()
            .filter(|object| object.name == TOWER_OBJECT)
            .map(|object| object_cell(map, object))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            grid,
            spawn,
            goal,
            towers,
        })
    }

    /// Walkability grid of the level.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Cell enemies spawn from.
    #[must_use]
    pub const fn spawn(&self) -> CellCoord {
        self.spawn
    }

    /// Cell enemies try to reach.
    #[must_use]
    pub const fn goal(&self) -> CellCoord {
        self.goal
    }

    /// Cells of towers placed with the level.
    #[must_use]
    pub fn towers(&self) -> &[CellCoord] {
        &self.towers
    }
}

/// Builds a tile map from text rows, top row first.
///
/// `.` is floor, `#` is a wall, `S` and `G` are floor cells carrying the
/// spawn and goal markers, and `T` is a wall carrying a pre-placed tower.
pub fn tile_map_from_ascii<S: AsRef<str>>(
    rows: &[S],
    tile_size: u32,
) -> Result<TileMap, LevelError> {
    if tile_size == 0 {
        return Err(LevelError::InvalidTileSize {
            width: tile_size,
            height: tile_size,
        });
    }

    let expected = rows.first().map_or(0, |row| row.as_ref().chars().count());
    let height = rows.len();
    let mut tiles = Vec::with_capacity(expected * height);
    let mut objects = Vec::new();
    let pixels = tile_size as f32;

    for (row, text) in rows.iter().enumerate() {
        let actual = text.as_ref().chars().count();
        if actual != expected {
            return Err(LevelError::RaggedRow {
                row,
                expected,
                actual,
            });
        }

        for (column, glyph) in text.as_ref().chars().enumerate() {
            let (tile, marker) = match glyph {
                '.' => (Some(FLOOR_TILE), None),
                '#' => (None, None),
                'S' => (Some(FLOOR_TILE), Some(SPAWN_OBJECT)),
                'G' => (Some(FLOOR_TILE), Some(GOAL_OBJECT)),
                'T' => (None, Some(TOWER_OBJECT)),
                glyph => return Err(LevelError::UnknownGlyph { glyph, column, row }),
            };
            tiles.push(tile);
            if let Some(name) = marker {
                objects.push(MapObject {
                    name: name.to_owned(),
                    x: column as f32 * pixels,
                    y: (height - 1 - row) as f32 * pixels,
                    width: pixels,
                    height: pixels,
                });
            }
        }
    }

    let width = u32::try_from(expected).unwrap_or(u32::MAX);
    let height = u32::try_from(height).unwrap_or(u32::MAX);
    Ok(TileMap {
        width,
        height,
        tile_width: tile_size,
        tile_height: tile_size,
        layers: vec![
            MapLayer::Tiles(TileLayer {
                name: TERRAIN_LAYER.to_owned(),
                width,
                height,
                tiles,
            }),
            MapLayer::Objects(ObjectLayer {
                name: EVENTS_LAYER.to_owned(),
                objects,
            }),
        ],
    })
}

fn terrain_layer(map: &TileMap) -> Result<&TileLayer, LevelError> {
    match map.layer(TERRAIN_LAYER) {
        Some(MapLayer::Tiles(layer)) => Ok(layer),
        _ => Err(LevelError::MissingTileLayer(TERRAIN_LAYER)),
    }
}

fn events_layer(map: &TileMap) -> Result<&ObjectLayer, LevelError> {
    match map.layer(EVENTS_LAYER) {
        Some(MapLayer::Objects(layer)) => Ok(layer),
        _ => Err(LevelError::MissingObjectLayer(EVENTS_LAYER)),
    }
}

fn marker_cell(
    map: &TileMap,
    events: &ObjectLayer,
    name: &'static str,
) -> Result<CellCoord, LevelError> {
    let object = events
        .objects
        .iter()
        .find(|object| object.name == name)
        .ok_or(LevelError::MissingObject(name))?;
    object_cell(map, object)
}

/// Converts a bottom-up pixel position into a top-down grid cell.
fn object_cell(map: &TileMap, object: &MapObject) -> Result<CellCoord, LevelError> {
    let out_of_bounds = || LevelError::ObjectOutOfBounds {
        name: object.name.clone(),
        x: object.x,
        y: object.y,
    };

    let top_down_y = map.pixel_height() - object.y - object.height;
    let column = (object.x / map.tile_width as f32).floor();
    let row = (top_down_y / map.tile_height as f32).floor();

    if !(column >= 0.0 && row >= 0.0) {
        return Err(out_of_bounds());
    }
    let (column, row) = (column as u32, row as u32);
    if column >= map.width || row >= map.height {
        return Err(out_of_bounds());
    }

    Ok(CellCoord::new(column, row))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(name: &str, column: u32, row: u32, map_rows: u32) -> MapObject {
        MapObject {
            name: name.to_owned(),
            x: column as f32 * 32.0,
            y: (map_rows - 1 - row) as f32 * 32.0,
            width: 32.0,
            height: 32.0,
        }
    }

    #[rustfmt::skip]
    fn map(objects: Vec<MapObject>) -> TileMap {
        TileMap {
            width: 4,
            height: 3,
            tile_width: 32,
            tile_height: 32,
            layers: vec![
                MapLayer::Tiles(TileLayer {
                    name: TERRAIN_LAYER.to_owned(),
                    width: 4,
                    height: 3,
                    tiles: vec![
                        Some(1), Some(1), None, Some(1),
                        None, Some(1), None, Some(1),
                        None, Some(1), Some(1), Some(1),
                    ],
                }),
                MapLayer::Objects(ObjectLayer {
                    name: EVENTS_LAYER.to_owned(),
                    objects,
                }),
            ],
        }
    }

    #[test]
    fn markers_convert_to_top_down_cells() {
        let level = LevelLayout::from_tile_map(&map(vec![
            object(SPAWN_OBJECT, 0, 0, 3),
            object(GOAL_OBJECT, 3, 0, 3),
            object(TOWER_OBJECT, 2, 1, 3),
        ]))
        .expect("level builds");

        assert_eq!(level.spawn(), CellCoord::new(0, 0));
        assert_eq!(level.goal(), CellCoord::new(3, 0));
        assert_eq!(level.towers(), &[CellCoord::new(2, 1)]);
        assert!(!level.grid().is_walkable(CellCoord::new(2, 0)));
        assert!(level.grid().is_walkable(CellCoord::new(1, 2)));
    }

    #[test]
    fn point_objects_resolve_to_containing_cell() {
        let mut spawn = object(SPAWN_OBJECT, 1, 2, 3);
        spawn.x += 16.0;
        spawn.y += 16.0;
        spawn.width = 0.0;
        spawn.height = 0.0;
        let level = LevelLayout::from_tile_map(&map(vec![spawn, object(GOAL_OBJECT, 3, 2, 3)]))
            .expect("level builds");
        assert_eq!(level.spawn(), CellCoord::new(1, 2));
    }

    #[test]
    fn missing_goal_is_rejected() {
        let error = LevelLayout::from_tile_map(&map(vec![object(SPAWN_OBJECT, 0, 0, 3)]))
            .expect_err("goal missing");
        assert_eq!(error, LevelError::MissingObject(GOAL_OBJECT));
    }

    #[test]
    fn missing_layers_are_rejected() {
        let mut without_events = map(Vec::new());
        let _ = without_events.layers.pop();
        assert_eq!(
            LevelLayout::from_tile_map(&without_events),
            Err(LevelError::MissingObjectLayer(EVENTS_LAYER))
        );

        let mut without_terrain = map(Vec::new());
        let _ = without_terrain.layers.remove(0);
        assert_eq!(
            LevelLayout::from_tile_map(&without_terrain),
            Err(LevelError::MissingTileLayer(TERRAIN_LAYER))
        );
    }

    #[test]
    fn ascii_rows_build_a_loadable_map() {
        let map = tile_map_from_ascii(&["S.#", "#T.", "..G"], 32).expect("valid rows");
        let level = LevelLayout::from_tile_map(&map).expect("level builds");

        assert_eq!(level.spawn(), CellCoord::new(0, 0));
        assert_eq!(level.goal(), CellCoord::new(2, 2));
        assert_eq!(level.towers(), &[CellCoord::new(1, 1)]);
        assert!(!level.grid().is_walkable(CellCoord::new(1, 1)));
        assert!(level.grid().is_walkable(CellCoord::new(0, 2)));
    }

    #[test]
    fn ascii_rows_reject_bad_input() {
        assert_eq!(
            tile_map_from_ascii(&["S..", ".G"], 32),
            Err(LevelError::RaggedRow {
                row: 1,
                expected: 3,
                actual: 2,
            })
        );
        assert_eq!(
            tile_map_from_ascii(&["S?G"], 32),
            Err(LevelError::UnknownGlyph {
                glyph: '?',
                column: 1,
                row: 0,
            })
        );
    }

    #[test]
    fn objects_outside_the_map_are_rejected() {
        let mut goal = object(GOAL_OBJECT, 0, 0, 3);
        goal.y = 200.0;
        let error = LevelLayout::from_tile_map(&map(vec![object(SPAWN_OBJECT, 0, 0, 3), goal]))
            .expect_err("goal above the map");
        assert!(matches!(error, LevelError::ObjectOutOfBounds { .. }));
    }
}
