//! # Dungeon Generation
//!
//! The generator that validates a configuration and runs the room-and-corridor
//! pipeline, and the finished [`Dungeon`] it hands back.
//!
//! Each call to [`DungeonGenerator::generate`] builds a fresh grid:
//! 1. Fill the grid with walls
//! 2. Place rooms with overlap rejection
//! 3. Carve corridors between consecutive rooms
//!
//! The generator only holds configuration. RNG state lives with the caller,
//! so one generator can be shared across threads as long as each thread
//! brings its own RNG.

use crate::{
    utils, Corridor, CorridorConnector, DungeonResult, GenerationConfig, Grid, Room, RoomPlacer,
};
use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Stages of a single generation call, in the only order they can occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GenerationStage {
    /// Grid allocated, nothing drawn yet
    Init,
    /// Rooms stamped onto the grid
    RoomsPlaced,
    /// Corridors carved between consecutive rooms
    CorridorsCarved,
    /// Dungeon handed to the caller
    Done,
}

impl GenerationStage {
    /// Gets the stage that follows this one, or `None` after `Done`.
    pub fn next(self) -> Option<Self> {
        match self {
            GenerationStage::Init => Some(GenerationStage::RoomsPlaced),
            GenerationStage::RoomsPlaced => Some(GenerationStage::CorridorsCarved),
            GenerationStage::CorridorsCarved => Some(GenerationStage::Done),
            GenerationStage::Done => None,
        }
    }

    fn advance(&mut self) {
        if let Some(next) = self.next() {
            debug!("Generation stage {:?} -> {:?}", self, next);
            *self = next;
        }
    }
}

/// A finished dungeon: the grid plus the rooms in placement order.
///
/// Read-only once built; regenerate to get a different layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dungeon {
    grid: Grid,
    rooms: Vec<Room>,
    corridors: Vec<Corridor>,
}

impl Dungeon {
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Accepted rooms in the order they were placed.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Corridors in carve order; corridor `i` joins rooms `i` and `i + 1`.
    pub fn corridors(&self) -> &[Corridor] {
        &self.corridors
    }

    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    /// Consumes the dungeon, returning its grid and rooms.
    pub fn into_parts(self) -> (Grid, Vec<Room>) {
        (self.grid, self.rooms)
    }
}

/// Room-and-corridor dungeon generator.
///
/// # Examples
///
/// ```
/// use delve::{DungeonGenerator, GenerationConfig};
///
/// let config = GenerationConfig::for_testing(12345);
/// let generator = DungeonGenerator::new(config).unwrap();
///
/// let first = generator.generate();
/// let second = generator.generate();
/// assert_eq!(first, second); // same seed, same dungeon
/// ```
#[derive(Debug, Clone)]
pub struct DungeonGenerator {
    config: GenerationConfig,
    placer: RoomPlacer,
    connector: CorridorConnector,
}

impl DungeonGenerator {
    /// Creates a generator, rejecting invalid configurations before any
    /// random draw happens.
    pub fn new(config: GenerationConfig) -> DungeonResult<Self> {
        Ok(Self {
            placer: RoomPlacer::new(&config)?,
            connector: CorridorConnector::new(),
            config,
        })
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Generates a dungeon with an RNG built from the configured seed, or
    /// from OS entropy when no seed is set.
    pub fn generate(&self) -> Dungeon {
        let mut rng = utils::create_rng(&self.config);
        self.generate_with_rng(&mut rng)
    }

    /// Generates a dungeon drawing from the given RNG.
    ///
    /// The same RNG state and configuration always produce the same dungeon.
    pub fn generate_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Dungeon {
        let mut stage = GenerationStage::Init;
        let mut grid = Grid::walls(self.config.width, self.config.height);

        let rooms = self.placer.place(&mut grid, rng);
        stage.advance();

        let corridors = self.connector.connect(&mut grid, &rooms, rng);
        stage.advance();

        let dungeon = Dungeon {
            grid,
            rooms,
            corridors,
        };
        stage.advance();
        debug_assert_eq!(stage, GenerationStage::Done);

        info!(
            "Generated {}x{} dungeon with {} rooms and {} corridors",
            dungeon.width(),
            dungeon.height(),
            dungeon.rooms.len(),
            dungeon.corridors.len()
        );

        dungeon
    }

    /// Validates that a dungeon meets the layout invariants for this
    /// generator's configuration.
    pub fn validate(&self, dungeon: &Dungeon) -> DungeonResult<()> {
        utils::validate_dungeon(dungeon, &self.config)
    }
}
