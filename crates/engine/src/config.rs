//! Game tuning constants
//!
//! Defaults reproduce the reference board. Tests shrink the tempo to run a
//! whole game in milliseconds.

use crate::error::GameError;

pub use platform::{LANE_COUNT, MATRIX_ROWS};

/// Notes in the song, and therefore tiles in the sequence.
pub const SONG_LENGTH: usize = 50;

/// Fall cadence at session start.
pub const INITIAL_TEMPO_MS: u32 = 200;

/// Cadence reduction applied after every fall.
pub const TEMPO_DECREMENT_MS: u32 = 1;

/// Fastest cadence the ramp may reach.
pub const MIN_TEMPO_MS: u32 = 20;

/// First row above the matrix; tiles at or above it are not drawn.
pub const OFF_SCREEN_ROW: i32 = 9;

/// Starting position of tile 0.
pub const FIRST_TILE_ROW: i32 = 7;

/// Vertical gap between consecutive tiles at session start.
pub const TILE_ROW_STEP: i32 = 2;

/// Session tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GameConfig {
    /// Fall cadence at session start.
    pub initial_tempo_ms: u32,
    /// Cadence reduction per fall.
    pub tempo_decrement_ms: u32,
    /// Cadence floor.
    pub min_tempo_ms: u32,
    /// First non-drawn row.
    pub off_screen_row: i32,
    /// Starting position of tile 0.
    pub first_tile_row: i32,
    /// Gap between consecutive starting positions.
    pub tile_row_step: i32,
}

impl GameConfig {
    /// The reference board's tuning.
    pub const DEFAULT: Self = Self {
        initial_tempo_ms: INITIAL_TEMPO_MS,
        tempo_decrement_ms: TEMPO_DECREMENT_MS,
        min_tempo_ms: MIN_TEMPO_MS,
        off_screen_row: OFF_SCREEN_ROW,
        first_tile_row: FIRST_TILE_ROW,
        tile_row_step: TILE_ROW_STEP,
    };

    /// Check that the values can drive a game.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.min_tempo_ms == 0 {
            return Err(GameError::InvalidConfig("min_tempo_ms must be positive"));
        }
        if self.initial_tempo_ms < self.min_tempo_ms {
            return Err(GameError::InvalidConfig(
                "initial_tempo_ms must not be below min_tempo_ms",
            ));
        }
        if self.tile_row_step < 1 {
            return Err(GameError::InvalidConfig("tile_row_step must be at least 1"));
        }
        if self.first_tile_row < 0 {
            return Err(GameError::InvalidConfig("first_tile_row must not be negative"));
        }
        if self.off_screen_row < 1 {
            return Err(GameError::InvalidConfig("off_screen_row must be positive"));
        }
        Ok(())
    }

    /// Position of the last tile at session start, the top of the queue.
    pub fn initial_top_row(&self, tile_count: usize) -> i32 {
        let last = i32::try_from(tile_count.saturating_sub(1)).unwrap_or(i32::MAX);
        self.first_tile_row
            .saturating_add(last.saturating_mul(self.tile_row_step))
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_default_top_row_matches_board() {
        assert_eq!(GameConfig::DEFAULT.initial_top_row(SONG_LENGTH), 105);
        assert_eq!(GameConfig::DEFAULT.initial_top_row(1), FIRST_TILE_ROW);
    }

    #[test]
    fn test_zero_floor_rejected() {
        let cfg = GameConfig {
            min_tempo_ms: 0,
            ..GameConfig::DEFAULT
        };
        assert!(matches!(cfg.validate(), Err(GameError::InvalidConfig(_))));
    }

    #[test]
    fn test_initial_below_floor_rejected() {
        let cfg = GameConfig {
            initial_tempo_ms: 10,
            ..GameConfig::DEFAULT
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_flat_queue_rejected() {
        let cfg = GameConfig {
            tile_row_step: 0,
            ..GameConfig::DEFAULT
        };
        assert!(cfg.validate().is_err());
    }
}
