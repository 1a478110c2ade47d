//! # Overlap Backends
//!
//! Indexes of accepted rooms that answer "would this candidate come within
//! the margin of any accepted room?".
//!
//! Two implementations exist and must always agree: a linear scan that is
//! obviously correct, and a spatial hash that only tests rooms sharing a
//! cell with the candidate. The placer picks one once, through
//! [`OverlapBackend`], and never branches on it afterwards.

use crate::config::SPATIAL_HASH_CELL_SIZE;
use crate::Room;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Index of accepted rooms used for overlap rejection.
pub trait OverlapIndex {
    /// Records an accepted room.
    fn insert(&mut self, room: Room);

    /// Checks whether the candidate's margin intersects any recorded room's
    /// margin.
    fn overlaps_any(&self, candidate: &Room) -> bool;

    /// Number of recorded rooms.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Gets the index name for logging and debugging.
    fn name(&self) -> &'static str;
}

/// Available overlap index implementations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverlapBackend {
    /// Reference implementation: test every accepted room
    Linear,
    /// Bucket rooms into fixed-size cells and test only nearby ones
    #[default]
    SpatialHash,
}

impl OverlapBackend {
    /// Builds an empty index of this kind.
    pub fn build(self) -> Box<dyn OverlapIndex> {
        match self {
            OverlapBackend::Linear => Box::new(LinearOverlapIndex::new()),
            OverlapBackend::SpatialHash => {
                Box::new(SpatialHashIndex::new(SPATIAL_HASH_CELL_SIZE))
            }
        }
    }
}

impl fmt::Display for OverlapBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverlapBackend::Linear => write!(f, "linear"),
            OverlapBackend::SpatialHash => write!(f, "spatial-hash"),
        }
    }
}

impl FromStr for OverlapBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "linear" => Ok(OverlapBackend::Linear),
            "spatial-hash" | "spatial_hash" | "spatial" => Ok(OverlapBackend::SpatialHash),
            other => Err(format!(
                "unknown backend '{}', expected 'linear' or 'spatial-hash'",
                other
            )),
        }
    }
}

/// Tests a candidate against every accepted room.
#[derive(Debug, Clone, Default)]
pub struct LinearOverlapIndex {
    rooms: Vec<Room>,
}

impl LinearOverlapIndex {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OverlapIndex for LinearOverlapIndex {
    fn insert(&mut self, room: Room) {
        self.rooms.push(room);
    }

    fn overlaps_any(&self, candidate: &Room) -> bool {
        self.rooms
            .iter()
            .any(|room| candidate.overlaps_with_margin(room))
    }

    fn len(&self) -> usize {
        self.rooms.len()
    }

    fn name(&self) -> &'static str {
        "linear"
    }
}

/// Buckets accepted rooms by the grid cells their margin-grown boxes touch.
///
/// Two margin boxes can only intersect if they share a tile, and a shared
/// tile lies in a shared cell, so checking the candidate's cells is exact.
#[derive(Debug, Clone)]
pub struct SpatialHashIndex {
    cell_size: i64,
    rooms: Vec<Room>,
    cells: HashMap<(i64, i64), Vec<usize>>,
}

impl SpatialHashIndex {
    /// Creates an empty index. A zero cell size is treated as 1.
    pub fn new(cell_size: u32) -> Self {
        Self {
            cell_size: i64::from(cell_size.max(1)),
            rooms: Vec::new(),
            cells: HashMap::new(),
        }
    }

    /// Cells covered by a room's margin-grown box.
    fn cells_for(&self, room: &Room) -> impl Iterator<Item = (i64, i64)> {
        let (x0, y0, x1, y1) = room.margin_bounds();
        let size = self.cell_size;
        let (cx0, cx1) = (x0.div_euclid(size), x1.div_euclid(size));
        let (cy0, cy1) = (y0.div_euclid(size), y1.div_euclid(size));
        (cy0..=cy1).flat_map(move |cy| (cx0..=cx1).map(move |cx| (cx, cy)))
    }
}

impl OverlapIndex for SpatialHashIndex {
    fn insert(&mut self, room: Room) {
        let index = self.rooms.len();
        let cells: Vec<_> = self.cells_for(&room).collect();
        for cell in cells {
            self.cells.entry(cell).or_default().push(index);
        }
        self.rooms.push(room);
    }

    fn overlaps_any(&self, candidate: &Room) -> bool {
        self.cells_for(candidate).any(|cell| {
            self.cells.get(&cell).is_some_and(|bucket| {
                bucket
                    .iter()
                    .any(|&i| candidate.overlaps_with_margin(&self.rooms[i]))
            })
        })
    }

    fn len(&self) -> usize {
        self.rooms.len()
    }

    fn name(&self) -> &'static str {
        "spatial-hash"
    }
}
