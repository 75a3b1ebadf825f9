//! Fall cadence and its linear difficulty ramp.

use crate::error::GameError;

/// Milliseconds between falls. Never below the floor it was built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tempo {
    ms: u32,
    floor_ms: u32,
}

impl Tempo {
    /// Create a tempo, clamping `ms` up to `floor_ms`.
    pub fn new(ms: u32, floor_ms: u32) -> Self {
        Self {
            ms: ms.max(floor_ms),
            floor_ms,
        }
    }

    /// Create a tempo, rejecting values below the floor.
    pub fn try_new(ms: u32, floor_ms: u32) -> Result<Self, GameError> {
        if ms < floor_ms {
            Err(GameError::TempoBelowFloor {
                tempo_ms: ms,
                floor_ms,
            })
        } else {
            Ok(Self { ms, floor_ms })
        }
    }

    /// Current cadence in milliseconds.
    pub fn get(self) -> u32 {
        self.ms
    }

    /// The floor this tempo is clamped at.
    pub fn floor(self) -> u32 {
        self.floor_ms
    }

    /// Whether the ramp has bottomed out.
    pub fn at_floor(self) -> bool {
        self.ms <= self.floor_ms
    }

    /// The cadence after one more fall.
    #[must_use]
    pub fn ramped(self, decrement_ms: u32) -> Self {
        Self::new(self.ms.saturating_sub(decrement_ms), self.floor_ms)
    }
}
