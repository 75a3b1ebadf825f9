//! LED matrix abstraction
//!
//! The playfield is an 8×8 matrix. Each lane is two matrix lines wide and a
//! tile is two rows tall: a tile whose top edge sits at fall position `p`
//! lights rows `p - 1` and `p` (clipped to the visible area).

use crate::input::Lane;

/// Number of visible rows per lane.
pub const MATRIX_ROWS: u8 = 8;

/// Set of lit rows in one lane, bit `r` = row `r` (row 0 is the hit line).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct RowMask(u8);

impl RowMask {
    /// No rows lit.
    pub const EMPTY: RowMask = RowMask(0);

    /// Wrap a raw bit pattern.
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Return the raw bit pattern.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Rows lit by a tile whose top edge is at `position`.
    ///
    /// Returns `None` when the tile is entirely off the matrix (above row 8
    /// or already past the hit line).
    pub fn for_position(position: i32) -> Option<Self> {
        let mut bits = 0u8;
        for row in [position.saturating_sub(1), position] {
            if let Ok(row) = u8::try_from(row) {
                if row < MATRIX_ROWS {
                    bits |= 1u8.wrapping_shl(u32::from(row));
                }
            }
        }
        if bits == 0 {
            None
        } else {
            Some(Self(bits))
        }
    }

    /// Whether `row` is lit.
    pub fn contains(self, row: u8) -> bool {
        row < MATRIX_ROWS && self.0 & 1u8.wrapping_shl(u32::from(row)) != 0
    }

    /// Union of two masks.
    #[must_use]
    pub const fn union(self, other: RowMask) -> Self {
        Self(self.0 | other.0)
    }

    /// Whether no row is lit.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// The two physical matrix lines that make up `lane`.
pub fn lane_lines(lane: Lane) -> [u8; 2] {
    let first = lane.get().saturating_mul(2);
    [first, first.saturating_add(1)]
}

/// Playfield output.
///
/// The render task clears the matrix, then draws every visible tile once per
/// frame. Implementations on real hardware scan the lines themselves.
pub trait TileMatrix {
    /// Error type for display operations
    type Error: core::fmt::Debug;

    /// Light `rows` in `lane` (added to whatever is already lit).
    fn render(&mut self, lane: Lane, rows: RowMask) -> Result<(), Self::Error>;

    /// Turn every LED off.
    fn clear(&mut self) -> Result<(), Self::Error>;
}

impl<T: TileMatrix + ?Sized> TileMatrix for &mut T {
    type Error = T::Error;

    fn render(&mut self, lane: Lane, rows: RowMask) -> Result<(), Self::Error> {
        T::render(self, lane, rows)
    }

    fn clear(&mut self) -> Result<(), Self::Error> {
        T::clear(self)
    }
}
