//! Lane button abstraction
//!
//! The board has one momentary push button per lane. The game only ever asks
//! for the raw electrical level of a lane; edge/hold classification lives in
//! the engine so that it can be tested without hardware.

use embedded_hal::digital::InputPin;

/// Number of parallel lanes (and buttons) on the board.
pub const LANE_COUNT: usize = 4;

// ── Error type ───────────────────────────────────────────────────────────────

/// Error returned when a value is out of the valid range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutOfRangeError {
    /// The value that was out of range.
    pub value: u32,
    /// The inclusive minimum allowed value.
    pub min: u32,
    /// The inclusive maximum allowed value.
    pub max: u32,
}

impl core::fmt::Display for OutOfRangeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "value {} outside {}..={}",
            self.value, self.min, self.max
        )
    }
}

// ── Lane ─────────────────────────────────────────────────────────────────────

/// One of the parallel tracks a tile falls in.
///
/// Wraps a `u8` with the invariant `value < LANE_COUNT`, so a `Lane` can be
/// used to address per-lane arrays without a bounds failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct Lane(u8);

impl Lane {
    /// Every lane, lowest index first.
    pub const ALL: [Lane; LANE_COUNT] = [Lane(0), Lane(1), Lane(2), Lane(3)];

    /// Create a `Lane`, returning an error if `value >= LANE_COUNT`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] if `value` does not name a lane.
    pub fn try_new(value: u8) -> Result<Self, OutOfRangeError> {
        if usize::from(value) < LANE_COUNT {
            Ok(Self(value))
        } else {
            Err(OutOfRangeError {
                value: u32::from(value),
                min: 0,
                #[allow(clippy::cast_possible_truncation)] // LANE_COUNT is 4
                max: (LANE_COUNT as u32).saturating_sub(1),
            })
        }
    }

    /// Look up a lane by array index.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Return the lane number (0-based).
    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }

    /// Return the lane number as an array index.
    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.0)
    }
}

impl core::fmt::Display for Lane {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "lane {}", self.0)
    }
}

// ── LaneInput ────────────────────────────────────────────────────────────────

/// Raw lane button sampling.
///
/// This is the only inbound boundary of the game. Implementations report the
/// instantaneous electrical level; `true` means the button is held down.
pub trait LaneInput {
    /// Error type for a failed read.
    type Error: core::fmt::Debug;

    /// Read the raw level of `lane`'s button.
    fn read_raw(&mut self, lane: Lane) -> Result<bool, Self::Error>;
}

impl<T: LaneInput + ?Sized> LaneInput for &mut T {
    type Error = T::Error;

    fn read_raw(&mut self, lane: Lane) -> Result<bool, Self::Error> {
        T::read_raw(self, lane)
    }
}

// ── GpioLanes ────────────────────────────────────────────────────────────────

/// [`LaneInput`] over four `embedded-hal` input pins.
///
/// Buttons are wired active-high (pressed drives the line high), matching
/// a board with external pull-downs.
pub struct GpioLanes<P> {
    pins: [P; LANE_COUNT],
}

impl<P: InputPin> GpioLanes<P> {
    /// Wrap one pin per lane, lane 0 first.
    pub fn new(pins: [P; LANE_COUNT]) -> Self {
        Self { pins }
    }

    /// Give the pins back (used by tests to verify mock expectations).
    pub fn release(self) -> [P; LANE_COUNT] {
        self.pins
    }
}

impl<P: InputPin> LaneInput for GpioLanes<P> {
    type Error = P::Error;

    fn read_raw(&mut self, lane: Lane) -> Result<bool, Self::Error> {
        match self.pins.get_mut(lane.index()) {
            Some(pin) => pin.is_high(),
            // Lane < LANE_COUNT by construction.
            None => Ok(false),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_lane_try_new_accepts_every_lane() {
        for value in 0..4u8 {
            assert_eq!(Lane::try_new(value).map(Lane::get), Ok(value));
        }
    }

    #[test]
    fn test_lane_try_new_rejects_out_of_range() {
        let err = Lane::try_new(4).unwrap_err();
        assert_eq!(err.value, 4);
        assert_eq!(err.max, 3);
    }

    #[test]
    fn test_lane_from_index_matches_all() {
        for (i, lane) in Lane::ALL.iter().enumerate() {
            assert_eq!(Lane::from_index(i), Some(*lane));
            assert_eq!(lane.index(), i);
        }
        assert_eq!(Lane::from_index(LANE_COUNT), None);
    }
}
