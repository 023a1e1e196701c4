use thiserror::Error;

use crate::ids::{SlotId, TileId};

/// Reasons a transfer or rotation is refused. A refused operation never
/// changes the puzzle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum ErrorKind {
    #[error("source slot is empty or does not exist")]
    EmptySource,
    #[error("destination slot does not exist")]
    UnknownSlot,
    #[error("destination slot is already occupied")]
    OccupiedDestination,
    #[error("tile in the source slot is locked in place")]
    SourceLocked,
    #[error("tile is locked in place and can no longer rotate")]
    TileLocked,
    #[error("no such tile")]
    UnknownTile,
}

impl ErrorKind {
    /// Stable name used when the error crosses into JS.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::EmptySource => "EmptySource",
            ErrorKind::UnknownSlot => "UnknownSlot",
            ErrorKind::OccupiedDestination => "OccupiedDestination",
            ErrorKind::SourceLocked => "SourceLocked",
            ErrorKind::TileLocked => "TileLocked",
            ErrorKind::UnknownTile => "UnknownTile",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum IdError {
    #[error("`{0}` does not start with a known id prefix")]
    UnknownPrefix(String),
    #[error("`{0}` does not end in a 1-based index")]
    InvalidIndex(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("tile count {count} must be a non-zero square of at most {max}")]
    InvalidTileCount { count: usize, max: usize },
    #[error("tray order must list every tile number from 1 to {count} exactly once")]
    InvalidOrder { count: usize },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid puzzle config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Setup(#[from] SetupError),
}

/// Broken bookkeeping inside the controller. Never caused by player input.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("{tile} is held by both {first} and {second}")]
    Duplicated {
        tile: TileId,
        first: SlotId,
        second: SlotId,
    },
    #[error("{tile} is not held by any slot")]
    Missing { tile: TileId },
    #[error("{slot} holds {tile}, which is not part of this puzzle")]
    Foreign { slot: SlotId, tile: TileId },
    #[error("{tile} is locked but not seated on its board slot")]
    MisplacedLock { tile: TileId },
}
