//! # Tiles
//!
//! The closed set of cell states a dungeon grid can hold, together with the
//! integer codes used by the text format and external renderers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// State of a single grid cell.
///
/// The numeric codes are fixed: renderers and the text format rely on them.
///
/// # Examples
///
/// ```
/// use delve::Tile;
///
/// assert_eq!(Tile::Corridor.code(), 3);
/// assert_eq!(Tile::from_code(2), Some(Tile::Floor));
/// assert_eq!(Tile::from_code(9), None);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Tile {
    /// Nothing at all; only produced by collaborators, never by generation
    Empty = 0,
    /// Solid rock, the initial state of every cell
    #[default]
    Wall = 1,
    /// Room interior
    Floor = 2,
    /// Carved passage between rooms
    Corridor = 3,
    /// Reserved; the generator never emits doors
    Door = 4,
}

impl Tile {
    /// Every tile, ordered by code.
    pub const ALL: [Tile; 5] = [
        Tile::Empty,
        Tile::Wall,
        Tile::Floor,
        Tile::Corridor,
        Tile::Door,
    ];

    /// Integer code of this tile.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Looks up a tile by its integer code.
    pub fn from_code(code: u8) -> Option<Tile> {
        Tile::ALL.get(code as usize).copied()
    }

    /// Whether this tile is final: once written, nothing may overwrite it.
    pub fn is_final(self) -> bool {
        matches!(self, Tile::Floor | Tile::Door)
    }
}

impl TryFrom<u8> for Tile {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Tile::from_code(code).ok_or(code)
    }
}

impl From<Tile> for u8 {
    fn from(tile: Tile) -> Self {
        tile.code()
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
