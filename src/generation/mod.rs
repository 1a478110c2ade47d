//! # Generation Module
//!
//! Procedural dungeon generation: room placement, corridor carving and the
//! generator that runs them in order.
//!
//! Every random draw goes through an RNG passed in by the caller (or built
//! from [`GenerationConfig::seed`]), so a configuration plus a seed always
//! reproduces the same dungeon.

pub mod corridors;
pub mod dungeon;
pub mod overlap;
pub mod rooms;

pub use corridors::*;
pub use dungeon::*;
pub use overlap::*;
pub use rooms::*;

use crate::config::{self, ROOM_MARGIN};
use crate::{DungeonError, DungeonResult};
use serde::{Deserialize, Serialize};

/// Configuration for dungeon generation.
///
/// All ranges are inclusive. Nothing is checked until [`validate`] runs,
/// which [`DungeonGenerator::new`] does before any random draw.
///
/// [`validate`]: GenerationConfig::validate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Grid width in tiles
    pub width: u32,
    /// Grid height in tiles
    pub height: u32,
    /// Minimum number of room placement attempts
    pub min_rooms: u32,
    /// Maximum number of room placement attempts
    pub max_rooms: u32,
    /// Minimum room side length
    pub min_room_size: u32,
    /// Maximum room side length
    pub max_room_size: u32,
    /// Random seed; `None` draws from OS entropy on every generation
    pub seed: Option<u64>,
    /// Overlap test implementation used during room placement
    pub backend: OverlapBackend,
}

impl GenerationConfig {
    /// Creates a configuration for a grid of the given size with default
    /// room parameters and no seed.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(80, 40);
    /// assert_eq!(config.width, 80);
    /// assert!(config.min_room_size <= config.max_room_size);
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            min_rooms: config::DEFAULT_MIN_ROOMS,
            max_rooms: config::DEFAULT_MAX_ROOMS,
            min_room_size: config::DEFAULT_MIN_ROOM_SIZE,
            max_room_size: config::DEFAULT_MAX_ROOM_SIZE,
            seed: None,
            backend: OverlapBackend::default(),
        }
    }

    /// Creates a small, seeded configuration for tests.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            width: 40,
            height: 30,
            min_rooms: 4,
            max_rooms: 10,
            min_room_size: 3,
            max_room_size: 7,
            seed: Some(seed),
            backend: OverlapBackend::default(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the inclusive range of placement attempts.
    pub fn with_rooms(mut self, min_rooms: u32, max_rooms: u32) -> Self {
        self.min_rooms = min_rooms;
        self.max_rooms = max_rooms;
        self
    }

    /// Sets the inclusive range of room side lengths.
    pub fn with_room_size(mut self, min_room_size: u32, max_room_size: u32) -> Self {
        self.min_room_size = min_room_size;
        self.max_room_size = max_room_size;
        self
    }

    pub fn with_backend(mut self, backend: OverlapBackend) -> Self {
        self.backend = backend;
        self
    }

    /// Checks that every range is ordered and that the grid can hold the
    /// smallest room plus its margins.
    pub fn validate(&self) -> DungeonResult<()> {
        if self.width < config::MIN_GRID_SIZE || self.height < config::MIN_GRID_SIZE {
            return Err(DungeonError::Configuration(format!(
                "grid {}x{} is smaller than the minimum {}x{}",
                self.width,
                self.height,
                config::MIN_GRID_SIZE,
                config::MIN_GRID_SIZE
            )));
        }

        if self.min_rooms > self.max_rooms {
            return Err(DungeonError::Configuration(format!(
                "min_rooms ({}) exceeds max_rooms ({})",
                self.min_rooms, self.max_rooms
            )));
        }

        if self.min_room_size == 0 {
            return Err(DungeonError::Configuration(
                "min_room_size must be at least 1".to_string(),
            ));
        }

        if self.min_room_size > self.max_room_size {
            return Err(DungeonError::Configuration(format!(
                "min_room_size ({}) exceeds max_room_size ({})",
                self.min_room_size, self.max_room_size
            )));
        }

        let usable_width = self.width - 2 * ROOM_MARGIN;
        let usable_height = self.height - 2 * ROOM_MARGIN;
        if self.min_room_size > usable_width || self.min_room_size > usable_height {
            return Err(DungeonError::Configuration(format!(
                "min_room_size ({}) does not fit a {}x{} grid with its margin",
                self.min_room_size, self.width, self.height
            )));
        }

        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(config::DEFAULT_DUNGEON_WIDTH, config::DEFAULT_DUNGEON_HEIGHT)
    }
}

/// Utility functions for generation algorithms.
pub mod utils {
    use super::*;
    use crate::Tile;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Creates the RNG a configuration asks for: seeded when a seed is set,
    /// entropy-backed otherwise.
    pub fn create_rng(config: &GenerationConfig) -> StdRng {
        match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Validates that a dungeon satisfies the layout invariants for the
    /// configuration it was generated with.
    ///
    /// Checks grid size, room containment within the border margin, room
    /// interiors being floor, and that no two rooms' margins intersect.
    pub fn validate_dungeon(dungeon: &Dungeon, config: &GenerationConfig) -> DungeonResult<()> {
        let grid = dungeon.grid();

        if grid.width() != config.width || grid.height() != config.height {
            return Err(DungeonError::GenerationFailed(format!(
                "grid is {}x{}, expected {}x{}",
                grid.width(),
                grid.height(),
                config.width,
                config.height
            )));
        }

        for (index, room) in dungeon.rooms().iter().enumerate() {
            if !room.fits_within(grid.width(), grid.height()) {
                return Err(DungeonError::GenerationFailed(format!(
                    "room {} at ({}, {}) breaks the border margin",
                    index, room.x, room.y
                )));
            }

            if room.positions().any(|pos| grid.get_at(pos) != Some(Tile::Floor)) {
                return Err(DungeonError::GenerationFailed(format!(
                    "room {} is not entirely floor",
                    index
                )));
            }

            for (other_index, other) in dungeon.rooms().iter().enumerate().skip(index + 1) {
                if room.overlaps_with_margin(other) {
                    return Err(DungeonError::GenerationFailed(format!(
                        "rooms {} and {} are too close",
                        index, other_index
                    )));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GenerationConfig::default();
        assert_eq!(config.width, 50);
        assert_eq!(config.height, 50);
        assert_eq!((config.min_rooms, config.max_rooms), (5, 15));
        assert_eq!((config.min_room_size, config.max_room_size), (5, 15));
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_testing_config_is_valid() {
        let config = GenerationConfig::for_testing(12345);
        assert_eq!(config.seed, Some(12345));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_inverted_ranges_are_rejected() {
        let rooms = GenerationConfig::new(30, 30).with_rooms(6, 2);
        assert!(matches!(
            rooms.validate(),
            Err(DungeonError::Configuration(_))
        ));

        let sizes = GenerationConfig::new(30, 30).with_room_size(8, 4);
        assert!(matches!(
            sizes.validate(),
            Err(DungeonError::Configuration(_))
        ));
    }

    #[test]
    fn test_zero_room_size_is_rejected() {
        let config = GenerationConfig::new(30, 30).with_room_size(0, 4);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_rooms_is_allowed() {
        let config = GenerationConfig::new(30, 30).with_rooms(0, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_minimum_room_must_fit_with_margin() {
        // 10 - 2 margin tiles leaves 8
        let fits = GenerationConfig::new(10, 10).with_room_size(8, 8);
        assert!(fits.validate().is_ok());

        let too_big = GenerationConfig::new(10, 10).with_room_size(9, 9);
        assert!(matches!(
            too_big.validate(),
            Err(DungeonError::Configuration(_))
        ));

        let too_short = GenerationConfig::new(40, 6).with_room_size(5, 5);
        assert!(too_short.validate().is_err());
    }

    #[test]
    fn test_larger_max_room_size_is_allowed() {
        // Only the minimum has to fit; oversized draws are discarded.
        let config = GenerationConfig::new(10, 10).with_room_size(3, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_tiny_grid_is_rejected() {
        let config = GenerationConfig::new(2, 40).with_room_size(1, 1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_json_roundtrip_with_defaults() {
        let config: GenerationConfig =
            serde_json::from_str(r#"{"width": 64, "seed": 9, "backend": "linear"}"#).unwrap();
        assert_eq!(config.width, 64);
        assert_eq!(config.height, 50);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.backend, OverlapBackend::Linear);

        let json = serde_json::to_string(&config).unwrap();
        let back: GenerationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        use rand::Rng;

        let config = GenerationConfig::for_testing(77);
        let mut a = utils::create_rng(&config);
        let mut b = utils::create_rng(&config);
        let draws_a: Vec<u32> = (0..8).map(|_| a.gen()).collect();
        let draws_b: Vec<u32> = (0..8).map(|_| b.gen()).collect();
        assert_eq!(draws_a, draws_b);
    }
}
