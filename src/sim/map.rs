//! Tile map and derived obstacle set
//!
//! Layouts are rows of tile symbols. They are validated once at load time:
//! an unknown symbol, a ragged row, or an unwalkable player spawn is rejected
//! here instead of surfacing as a missing tile later.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::collision::{Rect, collides_any};
use crate::consts::*;
use crate::tile_to_world;

/// Built-in arena
pub const DEFAULT_LAYOUT: &[&str] = &[
    "##########################",
    "#........................#",
    "#........................#",
    "#........*...............#",
    "#....##..........##......#",
    "#....##..........##......#",
    "#..........*.............#",
    "#........................#",
    "#.........####...........#",
    "#.........####.......*...#",
    "#........................#",
    "#...*....................#",
    "#....##..........##......#",
    "#....##..........##......#",
    "#........................#",
    "#........................#",
    "##########################",
];

/// Kind of a single map cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    /// Open floor; enemies may spawn here
    Floor,
    /// Solid wall, contributes an obstacle rectangle
    Wall,
    /// Floor with a prop on it; walkable, never a spawn tile
    Decoration,
}

impl TileKind {
    pub fn from_symbol(symbol: char) -> Option<TileKind> {
        match symbol {
            '.' => Some(TileKind::Floor),
            '#' => Some(TileKind::Wall),
            '*' => Some(TileKind::Decoration),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            TileKind::Floor => '.',
            TileKind::Wall => '#',
            TileKind::Decoration => '*',
        }
    }

    pub fn is_solid(&self) -> bool {
        *self == TileKind::Wall
    }
}

/// Layout validation failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    #[error("map layout is empty")]
    Empty,
    #[error("row {row} has width {actual}, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("unknown tile symbol {symbol:?} at row {row}, column {col}")]
    UnknownSymbol { symbol: char, row: usize, col: usize },
    #[error("map has no floor tile to spawn enemies on")]
    NoFloor,
    #[error("player spawn tile ({col}, {row}) is not walkable")]
    BlockedSpawn { col: usize, row: usize },
}

/// Immutable per-session map
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileMap {
    width: usize,
    height: usize,
    /// Row-major tiles
    tiles: Vec<TileKind>,
    /// One rectangle per wall tile
    walls: Vec<Rect>,
}

impl TileMap {
    /// Parse and validate a layout
    pub fn parse<S: AsRef<str>>(rows: &[S]) -> Result<Self, MapError> {
        let width = rows
            .first()
            .map(|r| r.as_ref().chars().count())
            .ok_or(MapError::Empty)?;
        if width == 0 {
            return Err(MapError::Empty);
        }

        let mut tiles = Vec::with_capacity(width * rows.len());
        let mut walls = Vec::new();

        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let actual = line.chars().count();
            if actual != width {
                return Err(MapError::RaggedRow {
                    row,
                    expected: width,
                    actual,
                });
            }

            for (col, symbol) in line.chars().enumerate() {
                let kind = TileKind::from_symbol(symbol)
                    .ok_or(MapError::UnknownSymbol { symbol, row, col })?;
                if kind.is_solid() {
                    let pos = tile_to_world(col, row);
                    walls.push(Rect::new(pos.x, pos.y, TILE_SIZE, TILE_SIZE));
                }
                tiles.push(kind);
            }
        }

        let map = Self {
            width,
            height: rows.len(),
            tiles,
            walls,
        };

        if !map.tiles.contains(&TileKind::Floor) {
            return Err(MapError::NoFloor);
        }

        let (col, row) = PLAYER_SPAWN_TILE;
        let spawn_ok = map.tile_at(col, row).is_some_and(|t| !t.is_solid())
            && !collides_any(&map.tile_rect(col, row), &map.walls);
        if !spawn_ok {
            return Err(MapError::BlockedSpawn { col, row });
        }

        log::debug!(
            "Parsed {}x{} map with {} wall tiles",
            map.width,
            map.height,
            map.walls.len()
        );
        Ok(map)
    }

    /// The built-in arena
    pub fn default_arena() -> Result<Self, MapError> {
        Self::parse(DEFAULT_LAYOUT)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Static obstacle rectangles
    pub fn walls(&self) -> &[Rect] {
        &self.walls
    }

    /// Tile at a grid coordinate, `None` outside the grid
    pub fn tile_at(&self, col: usize, row: usize) -> Option<TileKind> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.tiles.get(row * self.width + col).copied()
    }

    /// World-space rectangle covering the whole grid
    pub fn bounds(&self) -> Rect {
        Rect::new(
            0.0,
            0.0,
            self.width as f32 * TILE_SIZE,
            self.height as f32 * TILE_SIZE,
        )
    }

    /// Full tile-sized rectangle of a cell
    pub fn tile_rect(&self, col: usize, row: usize) -> Rect {
        Rect::at(tile_to_world(col, row), Vec2::splat(TILE_SIZE))
    }

    /// Whether an enemy may be placed on this tile
    ///
    /// Out-of-range coordinates are rejected before any collision test.
    pub fn is_spawnable(&self, col: usize, row: usize) -> bool {
        match self.tile_at(col, row) {
            Some(TileKind::Floor) => !collides_any(&self.tile_rect(col, row), &self.walls),
            _ => false,
        }
    }

    /// World position where the player starts
    pub fn player_spawn(&self) -> Vec2 {
        let (col, row) = PLAYER_SPAWN_TILE;
        tile_to_world(col, row)
    }

    /// Render the grid back to symbol rows
    pub fn rows(&self) -> Vec<String> {
        self.tiles
            .chunks(self.width)
            .map(|row| row.iter().map(TileKind::symbol).collect())
            .collect()
    }
}
