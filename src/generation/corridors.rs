//! # Corridor Carving
//!
//! L-shaped corridors between rooms that are consecutive in placement order.
//!
//! Corridors are carved tile by tile with [`Grid::carve`], so they pass
//! through floors and earlier corridors without changing them. Rooms that are
//! not neighbours in placement order are never joined directly.

use crate::{Grid, Position, Room, Tile};
use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Which leg of an L-shaped corridor is carved first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CorridorShape {
    /// Along the start row, then down the end column
    HorizontalFirst,
    /// Along the start column, then across the end row
    VerticalFirst,
}

/// A carved corridor between two room centers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corridor {
    pub start: Position,
    pub end: Position,
    pub shape: CorridorShape,
}

impl Corridor {
    pub fn new(start: Position, end: Position, shape: CorridorShape) -> Self {
        Self { start, end, shape }
    }

    /// Gets the point where the corridor bends.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{Corridor, CorridorShape, Position};
    ///
    /// let start = Position::new(2, 3);
    /// let end = Position::new(9, 7);
    /// let corridor = Corridor::new(start, end, CorridorShape::HorizontalFirst);
    /// assert_eq!(corridor.corner(), Position::new(9, 3));
    /// ```
    pub fn corner(&self) -> Position {
        match self.shape {
            CorridorShape::HorizontalFirst => Position::new(self.end.x, self.start.y),
            CorridorShape::VerticalFirst => Position::new(self.start.x, self.end.y),
        }
    }

    /// Every position on the corridor in carve order. The corner appears in
    /// both legs.
    pub fn path(&self) -> Vec<Position> {
        let corner = self.corner();
        let mut path = segment(self.start, corner);
        path.extend(segment(corner, self.end));
        path
    }
}

/// Positions on a straight horizontal or vertical line, from the lower
/// coordinate to the higher one, endpoints included.
fn segment(a: Position, b: Position) -> Vec<Position> {
    if a.y == b.y {
        (a.x.min(b.x)..=a.x.max(b.x))
            .map(|x| Position::new(x, a.y))
            .collect()
    } else {
        (a.y.min(b.y)..=a.y.max(b.y))
            .map(|y| Position::new(a.x, y))
            .collect()
    }
}

/// Joins consecutive rooms with L-shaped corridors.
#[derive(Debug, Clone, Copy, Default)]
pub struct CorridorConnector;

impl CorridorConnector {
    pub fn new() -> Self {
        Self
    }

    /// Connects each room to the next one in the list.
    ///
    /// Draws one boolean per pair to pick the corridor shape. With fewer than
    /// two rooms nothing is drawn or carved.
    pub fn connect<R: Rng + ?Sized>(
        &self,
        grid: &mut Grid,
        rooms: &[Room],
        rng: &mut R,
    ) -> Vec<Corridor> {
        let mut corridors = Vec::with_capacity(rooms.len().saturating_sub(1));

        for pair in rooms.windows(2) {
            let shape = if rng.gen_bool(0.5) {
                CorridorShape::HorizontalFirst
            } else {
                CorridorShape::VerticalFirst
            };

            let corridor = Corridor::new(pair[0].center(), pair[1].center(), shape);
            self.carve(grid, &corridor);
            corridors.push(corridor);
        }

        debug!("Carved {} corridors", corridors.len());
        corridors
    }

    /// Carves one corridor into the grid, converting walls only. Returns the
    /// number of tiles that changed.
    pub fn carve(&self, grid: &mut Grid, corridor: &Corridor) -> usize {
        let mut carved = 0;
        for pos in corridor.path() {
            if grid.carve(pos.x, pos.y, Tile::Corridor) {
                carved += 1;
            }
        }
        carved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn stamp(grid: &mut Grid, room: &Room) {
        grid.fill_rect(
            room.x as i32,
            room.y as i32,
            room.width,
            room.height,
            Tile::Floor,
        );
    }

    #[test]
    fn test_corner_for_both_shapes() {
        let start = Position::new(3, 3);
        let end = Position::new(10, 8);

        let horizontal = Corridor::new(start, end, CorridorShape::HorizontalFirst);
        let vertical = Corridor::new(start, end, CorridorShape::VerticalFirst);

        assert_eq!(horizontal.corner(), Position::new(10, 3));
        assert_eq!(vertical.corner(), Position::new(3, 8));
    }

    #[test]
    fn test_path_covers_both_legs() {
        let corridor = Corridor::new(
            Position::new(8, 2),
            Position::new(4, 5),
            CorridorShape::HorizontalFirst,
        );
        let path = corridor.path();

        // 5 tiles across row 2, 4 tiles down column 4, corner counted twice
        assert_eq!(path.len(), 9);
        assert!(path.contains(&Position::new(8, 2)));
        assert!(path.contains(&Position::new(4, 2)));
        assert!(path.contains(&Position::new(4, 5)));
        assert!(path.iter().all(|p| p.y == 2 || p.x == 4));
    }

    #[test]
    fn test_straight_path_when_sharing_a_row() {
        let corridor = Corridor::new(
            Position::new(2, 4),
            Position::new(7, 4),
            CorridorShape::VerticalFirst,
        );
        let path = corridor.path();

        assert!(path.iter().all(|p| p.y == 4));
        assert!((2..=7).all(|x| path.contains(&Position::new(x, 4))));
    }

    #[test]
    fn test_carving_never_touches_floor() {
        let mut grid = Grid::new(20, 10).unwrap();
        let room = Room::new(5, 2, 4, 4);
        stamp(&mut grid, &room);

        let connector = CorridorConnector::new();
        let corridor = Corridor::new(
            Position::new(1, 3),
            Position::new(15, 3),
            CorridorShape::HorizontalFirst,
        );
        let carved = connector.carve(&mut grid, &corridor);

        // 15 tiles on the row, 4 of them are floor
        assert_eq!(carved, 11);
        assert_eq!(grid.count(Tile::Floor), 16);
        assert_eq!(grid.get(6, 3), Some(Tile::Floor));
        assert_eq!(grid.get(1, 3), Some(Tile::Corridor));

        // Re-carving the same path changes nothing
        assert_eq!(connector.carve(&mut grid, &corridor), 0);
    }

    #[test]
    fn test_connect_two_rooms() {
        let mut grid = Grid::new(30, 10).unwrap();
        let rooms = [Room::new(1, 1, 5, 5), Room::new(20, 4, 5, 5)];
        for room in &rooms {
            stamp(&mut grid, room);
        }
        let before = grid.clone();
        let mut rng = StdRng::seed_from_u64(11);

        let corridors = CorridorConnector::new().connect(&mut grid, &rooms, &mut rng);

        assert_eq!(corridors.len(), 1);
        let corridor = corridors[0];
        assert_eq!(corridor.start, Position::new(3, 3));
        assert_eq!(corridor.end, Position::new(22, 6));

        let path = corridor.path();
        for y in 0..10 {
            for x in 0..30 {
                let now = grid.get(x, y).unwrap();
                let was = before.get(x, y).unwrap();
                if now == Tile::Corridor {
                    assert_eq!(was, Tile::Wall);
                    assert!(path.contains(&Position::new(x, y)));
                } else {
                    assert_eq!(now, was);
                }
            }
        }
        // The corridor leaves the first room and enters the second.
        assert!(grid.count(Tile::Corridor) > 0);
        assert!(grid.count(Tile::Corridor) < path.len());
    }

    #[test]
    fn test_fewer_than_two_rooms_is_a_noop() {
        let mut grid = Grid::new(10, 10).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let connector = CorridorConnector::new();

        assert!(connector.connect(&mut grid, &[], &mut rng).is_empty());
        assert!(connector
            .connect(&mut grid, &[Room::new(2, 2, 3, 3)], &mut rng)
            .is_empty());
        assert_eq!(grid.count(Tile::Corridor), 0);

        // No draws were consumed
        let mut fresh = StdRng::seed_from_u64(5);
        assert_eq!(rng.gen::<u64>(), fresh.gen::<u64>());
    }

    #[test]
    fn test_only_consecutive_rooms_are_joined() {
        let mut grid = Grid::new(40, 40).unwrap();
        let rooms = [
            Room::new(2, 2, 3, 3),
            Room::new(30, 30, 3, 3),
            Room::new(2, 30, 3, 3),
        ];
        let mut rng = StdRng::seed_from_u64(8);

        let corridors = CorridorConnector::new().connect(&mut grid, &rooms, &mut rng);

        assert_eq!(corridors.len(), 2);
        assert_eq!(corridors[0].start, rooms[0].center());
        assert_eq!(corridors[0].end, rooms[1].center());
        assert_eq!(corridors[1].start, rooms[1].center());
        assert_eq!(corridors[1].end, rooms[2].center());
    }
}
