//! Engine error type
//!
//! Every variant is an invariant violation. Game over is not an error; it is
//! reported through [`crate::Resolution::GameOver`].

/// Invariant violations detected by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GameError {
    /// A session was created with zero tiles.
    EmptySequence,
    /// The active index does not name a tile.
    ActiveIndexOutOfRange {
        /// Offending index.
        index: usize,
        /// Number of tiles.
        len: usize,
    },
    /// A tile operation was given an index past the end of the sequence.
    TileIndexOutOfRange {
        /// Offending index.
        index: usize,
        /// Number of tiles.
        len: usize,
    },
    /// The fall cadence dropped below its floor.
    TempoBelowFloor {
        /// Current cadence.
        tempo_ms: u32,
        /// Configured floor.
        floor_ms: u32,
    },
    /// A tile is not strictly above the tile before it in fall order.
    QueueOrder {
        /// Index of the out-of-order tile.
        index: usize,
        /// Its position.
        position: i32,
    },
    /// A [`crate::GameConfig`] field is unusable.
    InvalidConfig(&'static str),
}

#[cfg(feature = "std")]
impl std::error::Error for GameError {}

impl core::fmt::Display for GameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::EmptySequence => write!(f, "tile sequence is empty"),
            Self::ActiveIndexOutOfRange { index, len } => {
                write!(f, "active index {index} out of range for {len} tiles")
            }
            Self::TileIndexOutOfRange { index, len } => {
                write!(f, "tile index {index} out of range for {len} tiles")
            }
            Self::TempoBelowFloor { tempo_ms, floor_ms } => {
                write!(f, "tempo {tempo_ms} ms below floor {floor_ms} ms")
            }
            Self::QueueOrder { index, position } => {
                write!(f, "tile {index} at row {position} is out of fall order")
            }
            Self::InvalidConfig(reason) => write!(f, "invalid game configuration: {reason}"),
        }
    }
}
