//! Four-digit 7-segment score readout

/// Number of digits on the readout.
pub const DIGIT_COUNT: usize = 4;

/// Largest score the readout can show; higher scores wrap.
pub const MAX_DISPLAY_SCORE: u16 = 9_999;

/// Segment patterns for 0-9, bit 0 = segment a … bit 6 = segment g.
pub const SEGMENT_PATTERNS: [u8; 10] = [
    0x3F, // 0
    0x06, // 1
    0x5B, // 2
    0x4F, // 3
    0x66, // 4
    0x6D, // 5
    0x7D, // 6
    0x07, // 7
    0x7F, // 8
    0x67, // 9
];

/// A score reduced to what fits on the readout (the 4 low decimal digits).
///
/// ```
/// use platform::DisplayScore;
///
/// let shown = DisplayScore::from_score(12_345);
/// assert_eq!(shown.get(), 2_345);
/// assert_eq!(shown.digits(), [5, 4, 3, 2]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct DisplayScore(u16);

impl DisplayScore {
    /// Truncate `score` to its 4 least significant decimal digits.
    pub fn from_score(score: u32) -> Self {
        let low = score.wrapping_rem(u32::from(MAX_DISPLAY_SCORE).wrapping_add(1));
        Self(u16::try_from(low).unwrap_or(MAX_DISPLAY_SCORE))
    }

    /// Return the displayed value.
    pub fn get(self) -> u16 {
        self.0
    }

    /// Decimal digits, least significant first.
    pub fn digits(self) -> [u8; DIGIT_COUNT] {
        let mut out = [0u8; DIGIT_COUNT];
        let mut rest = self.0;
        for digit in &mut out {
            *digit = u8::try_from(rest.wrapping_rem(10)).unwrap_or(0);
            rest = rest.wrapping_div(10);
        }
        out
    }

    /// Segment pattern per digit, least significant first.
    pub fn segments(self) -> [u8; DIGIT_COUNT] {
        self.digits()
            .map(|d| SEGMENT_PATTERNS.get(usize::from(d)).copied().unwrap_or(0))
    }
}

/// Score output.
pub trait ScoreDisplay {
    /// Error type for display operations
    type Error: core::fmt::Debug;

    /// Show `score` until the next call.
    fn show(&mut self, score: DisplayScore) -> Result<(), Self::Error>;
}

impl<T: ScoreDisplay + ?Sized> ScoreDisplay for &mut T {
    type Error = T::Error;

    fn show(&mut self, score: DisplayScore) -> Result<(), Self::Error> {
        T::show(self, score)
    }
}
