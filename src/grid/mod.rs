//! # Grid Module
//!
//! The dense tile buffer a dungeon is carved into, and the coordinate type
//! used to address it.
//!
//! A [`Grid`] never changes size. Writes go through two operations with very
//! different contracts: [`Grid::fill_rect`] stamps unconditionally (rooms),
//! while [`Grid::carve`] only ever converts walls (corridors). Corridors are
//! written through `carve` alone, so floors and doors are never overwritten.

pub mod tile;

pub use tile::*;

use crate::config::MIN_GRID_SIZE;
use crate::{DungeonError, DungeonResult};
use serde::{Deserialize, Serialize};

/// Represents a 2D coordinate on the grid.
///
/// Coordinates are signed so that paths can be described before they are
/// clipped to the grid.
///
/// # Examples
///
/// ```
/// use delve::Position;
///
/// let pos = Position::new(10, 5);
/// assert_eq!(pos.x, 10);
/// assert_eq!(pos.y, 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Fixed-size, row-major tile buffer.
///
/// # Examples
///
/// ```
/// use delve::{Grid, Tile};
///
/// let mut grid = Grid::new(8, 6).unwrap();
/// assert_eq!(grid.get(0, 0), Some(Tile::Wall));
///
/// grid.fill_rect(2, 2, 3, 2, Tile::Floor);
/// assert!(!grid.carve(3, 3, Tile::Corridor)); // floor is never carved
/// assert!(grid.carve(1, 1, Tile::Corridor));
/// assert_eq!(grid.get(1, 1), Some(Tile::Corridor));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: u32,
    height: u32,
    /// Row-major tile data: tiles[y * width + x]
    tiles: Vec<Tile>,
}

impl Grid {
    /// Creates a grid of the given size filled entirely with walls.
    ///
    /// Fails when either side cannot hold the border margin plus a single
    /// 1x1 room.
    pub fn new(width: u32, height: u32) -> DungeonResult<Self> {
        if width < MIN_GRID_SIZE || height < MIN_GRID_SIZE {
            return Err(DungeonError::Configuration(format!(
                "grid {}x{} is smaller than the minimum {}x{}",
                width, height, MIN_GRID_SIZE, MIN_GRID_SIZE
            )));
        }

        Ok(Self::walls(width, height))
    }

    /// Creates an all-wall grid without checking the minimum size.
    ///
    /// Callers must have validated the dimensions already.
    pub(crate) fn walls(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            tiles: vec![Tile::Wall; width as usize * height as usize],
        }
    }

    /// Builds a grid from already decoded row-major tiles.
    ///
    /// Only the text parser uses this; it has checked the shape itself, so
    /// no minimum size is enforced here.
    pub(crate) fn from_tiles(width: u32, height: u32, tiles: Vec<Tile>) -> Self {
        debug_assert_eq!(tiles.len(), width as usize * height as usize);
        Self {
            width,
            height,
            tiles,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of tiles (`width * height`).
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Dense row-major view of every tile.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Iterates over the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> + '_ {
        self.tiles.chunks(self.width as usize)
    }

    /// Checks whether a position lies on the grid.
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_bounds(x, y) {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Returns the tile at a position, or `None` outside the grid.
    pub fn get(&self, x: i32, y: i32) -> Option<Tile> {
        self.index(x, y).map(|i| self.tiles[i])
    }

    /// Returns the tile at a [`Position`], or `None` outside the grid.
    pub fn get_at(&self, pos: Position) -> Option<Tile> {
        self.get(pos.x, pos.y)
    }

    /// Writes `tile` into every position of the rectangle, clipped to the grid.
    pub fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, tile: Tile) {
        let x0 = i64::from(x).max(0);
        let y0 = i64::from(y).max(0);
        let x1 = (i64::from(x) + i64::from(width)).min(i64::from(self.width));
        let y1 = (i64::from(y) + i64::from(height)).min(i64::from(self.height));

        for row in y0..y1 {
            let start = row as usize * self.width as usize;
            for col in x0..x1 {
                self.tiles[start + col as usize] = tile;
            }
        }
    }

    /// Writes `tile` at a single position if, and only if, it currently holds
    /// a wall. Returns whether the tile changed.
    pub fn carve(&mut self, x: i32, y: i32, tile: Tile) -> bool {
        match self.index(x, y) {
            Some(i) if self.tiles[i] == Tile::Wall => {
                self.tiles[i] = tile;
                true
            }
            _ => false,
        }
    }

    /// Counts the tiles of a given kind.
    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|&&t| t == tile).count()
    }
}
