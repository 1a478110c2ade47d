//! # Delve
//!
//! Seeded room-and-corridor dungeon generation.
//!
//! ## Architecture Overview
//!
//! A dungeon is built by a short, strictly linear pipeline:
//!
//! - **Grid**: dense row-major tile buffer, filled with walls on creation
//! - **Room placement**: rejection-sampled rectangles that never touch
//! - **Corridors**: L-shaped paths between consecutive rooms, carved only through walls
//! - **Generator**: validates configuration up front and runs the pipeline
//!
//! All randomness flows through an explicit RNG handed to the pipeline, so a
//! seed plus a configuration always reproduces the same dungeon.
//!
//! ```
//! use delve::{DungeonGenerator, GenerationConfig, Tile};
//!
//! let config = GenerationConfig::new(40, 30).with_seed(7);
//! let generator = DungeonGenerator::new(config).unwrap();
//! let dungeon = generator.generate();
//!
//! assert_eq!(dungeon.grid().len(), 40 * 30);
//! for room in dungeon.rooms() {
//!     assert_eq!(dungeon.grid().get(room.x as i32, room.y as i32), Some(Tile::Floor));
//! }
//! ```

pub mod format;
pub mod generation;
pub mod grid;

pub use generation::*;
pub use grid::*;

/// Core error type for dungeon generation and its text format.
#[derive(thiserror::Error, Debug)]
pub enum DungeonError {
    /// Generation parameters are invalid or inconsistent
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// A generated dungeon failed validation
    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    /// A serialized grid could not be parsed
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
}

/// Result type used throughout the Delve codebase.
pub type DungeonResult<T> = Result<T, DungeonError>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Generation defaults and fixed layout constants.
pub mod config {
    /// Default dungeon width in tiles
    pub const DEFAULT_DUNGEON_WIDTH: u32 = 50;

    /// Default dungeon height in tiles
    pub const DEFAULT_DUNGEON_HEIGHT: u32 = 50;

    /// Default minimum number of placement attempts
    pub const DEFAULT_MIN_ROOMS: u32 = 5;

    /// Default maximum number of placement attempts
    pub const DEFAULT_MAX_ROOMS: u32 = 15;

    /// Default minimum room side length
    pub const DEFAULT_MIN_ROOM_SIZE: u32 = 5;

    /// Default maximum room side length
    pub const DEFAULT_MAX_ROOM_SIZE: u32 = 15;

    /// Wall margin kept between rooms and around the grid border
    pub const ROOM_MARGIN: u32 = 1;

    /// Smallest grid side that can hold a 1x1 room plus its margin
    pub const MIN_GRID_SIZE: u32 = 1 + 2 * ROOM_MARGIN;

    /// Cell side length used by the spatial hash overlap backend
    pub const SPATIAL_HASH_CELL_SIZE: u32 = 8;
}
