//! # Room Placement
//!
//! Rejection-sampled placement of rectangular rooms.
//!
//! The placer makes a fixed number of attempts. Each attempt draws a size and
//! a position; a candidate that would come within the margin of an accepted
//! room is dropped for good. The accepted list can therefore be shorter than
//! the number of attempts, or empty.

use crate::config::ROOM_MARGIN;
use crate::{DungeonResult, GenerationConfig, Grid, OverlapBackend, Position, Tile};
use log::{debug, trace};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// An axis-aligned rectangular room.
///
/// `x` and `y` are the top-left floor tile; the room covers
/// `x..x + width` by `y..y + height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Room {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Room {
    /// Creates a new room with the given parameters.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{Position, Room};
    ///
    /// let room = Room::new(5, 5, 10, 8);
    /// assert_eq!(room.center(), Position::new(10, 9));
    /// assert_eq!(room.area(), 80);
    /// ```
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Gets the center position of the room, rounded towards the top-left.
    pub fn center(&self) -> Position {
        Position::new(
            (self.x + self.width / 2) as i32,
            (self.y + self.height / 2) as i32,
        )
    }

    /// Gets the area of the room in tiles.
    pub fn area(&self) -> u32 {
        self.width * self.height
    }

    /// Checks if a position is inside this room.
    pub fn contains(&self, pos: Position) -> bool {
        let (x, y) = (i64::from(pos.x), i64::from(pos.y));
        x >= i64::from(self.x)
            && y >= i64::from(self.y)
            && x < i64::from(self.x) + i64::from(self.width)
            && y < i64::from(self.y) + i64::from(self.height)
    }

    /// Iterates over every tile of the room, row by row.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (self.y..self.y + self.height).flat_map(move |y| {
            (self.x..self.x + self.width).map(move |x| Position::new(x as i32, y as i32))
        })
    }

    /// Inclusive bounds `(x0, y0, x1, y1)` of the room grown by the margin on
    /// every side.
    pub fn margin_bounds(&self) -> (i64, i64, i64, i64) {
        let margin = i64::from(ROOM_MARGIN);
        (
            i64::from(self.x) - margin,
            i64::from(self.y) - margin,
            i64::from(self.x) + i64::from(self.width) - 1 + margin,
            i64::from(self.y) + i64::from(self.height) - 1 + margin,
        )
    }

    /// Checks whether the margin-grown boxes of two rooms share any tile.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::Room;
    ///
    /// let a = Room::new(1, 1, 3, 3);
    /// // Margins would share column 4
    /// assert!(a.overlaps_with_margin(&Room::new(5, 1, 3, 3)));
    /// assert!(!a.overlaps_with_margin(&Room::new(6, 1, 3, 3)));
    /// ```
    pub fn overlaps_with_margin(&self, other: &Room) -> bool {
        let (ax0, ay0, ax1, ay1) = self.margin_bounds();
        let (bx0, by0, bx1, by1) = other.margin_bounds();
        ax0 <= bx1 && bx0 <= ax1 && ay0 <= by1 && by0 <= ay1
    }

    /// Checks that the room keeps the border margin on a grid of the given
    /// size.
    pub fn fits_within(&self, grid_width: u32, grid_height: u32) -> bool {
        let (x0, y0, x1, y1) = self.margin_bounds();
        self.width > 0
            && self.height > 0
            && x0 >= 0
            && y0 >= 0
            && x1 < i64::from(grid_width)
            && y1 < i64::from(grid_height)
    }
}

/// Places rooms on a grid by rejection sampling.
///
/// Only built from a validated configuration, so the ranges it draws from
/// are never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomPlacer {
    room_count: RangeInclusive<u32>,
    room_size: RangeInclusive<u32>,
    backend: OverlapBackend,
}

impl RoomPlacer {
    /// Creates a placer from a configuration, failing with a configuration
    /// error if any of its ranges is invalid.
    pub fn new(config: &GenerationConfig) -> DungeonResult<Self> {
        config.validate()?;

        Ok(Self {
            room_count: config.min_rooms..=config.max_rooms,
            room_size: config.min_room_size..=config.max_room_size,
            backend: config.backend,
        })
    }

    /// Places rooms on the grid and returns them in placement order.
    ///
    /// Draws the attempt count from the room range, then for each attempt a
    /// width, a height and a top-left corner. Accepted rooms are stamped as
    /// floor.
    pub fn place<R: Rng + ?Sized>(&self, grid: &mut Grid, rng: &mut R) -> Vec<Room> {
        let attempts = rng.gen_range(self.room_count.clone());
        let mut index = self.backend.build();
        let mut rooms = Vec::new();

        for attempt in 0..attempts {
            let width = rng.gen_range(self.room_size.clone());
            let height = rng.gen_range(self.room_size.clone());

            let Some(room) = Self::draw_position(grid, width, height, rng) else {
                trace!("Attempt {}: {}x{} room cannot fit", attempt, width, height);
                continue;
            };

            if index.overlaps_any(&room) {
                trace!("Attempt {}: rejected {:?}", attempt, room);
                continue;
            }

            grid.fill_rect(room.x as i32, room.y as i32, width, height, Tile::Floor);
            index.insert(room);
            rooms.push(room);
            trace!("Attempt {}: accepted {:?}", attempt, room);
        }

        debug!(
            "Placed {} of {} rooms using the {} index",
            rooms.len(),
            attempts,
            index.name()
        );

        rooms
    }

    /// Draws a top-left corner so that the room and its margin stay on the
    /// grid. Returns `None` without drawing when the size cannot fit.
    fn draw_position<R: Rng + ?Sized>(
        grid: &Grid,
        width: u32,
        height: u32,
        rng: &mut R,
    ) -> Option<Room> {
        let max_x = grid.width().checked_sub(width)?.checked_sub(ROOM_MARGIN)?;
        let max_y = grid.height().checked_sub(height)?.checked_sub(ROOM_MARGIN)?;
        if max_x < ROOM_MARGIN || max_y < ROOM_MARGIN {
            return None;
        }

        let x = rng.gen_range(ROOM_MARGIN..=max_x);
        let y = rng.gen_range(ROOM_MARGIN..=max_y);
        Some(Room::new(x, y, width, height))
    }
}
