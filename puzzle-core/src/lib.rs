//! Rules of a square drag-and-drop image puzzle.
//!
//! Tiles start shuffled in a tray and are dragged onto a board of empty
//! slots. A tile dropped on its own board slot locks in place; the puzzle is
//! solved once every board slot holds its locked tile.

mod completion;
pub mod config;
mod controller;
pub mod error;
pub mod ids;
pub mod model;
mod rotation;
mod transfer;

pub use completion::CompletionMonitor;
pub use config::{DEFAULT_TILE_COUNT, MAX_TILE_COUNT, PuzzleConfig, grid_side};
pub use controller::PuzzleController;
pub use error::{ConfigError, ErrorKind, IdError, InvariantViolation, SetupError};
pub use ids::{SlotId, TileId, Zone};
pub use model::{PuzzleSnapshot, Rotation, Slot, Tile};
pub use rotation::RotationResult;
pub use transfer::{Transfer, TransferResult};
