//! Speaker abstraction
//!
//! The speaker is a square wave produced by a hardware timer toggling its
//! output on compare match (CTC mode). The game only decides *which* tone;
//! the timer arithmetic is exposed here so adapters and tests agree on it.

/// Timer input clock on the reference board: 16 MHz core / 8 prescaler.
pub const DEFAULT_TIMER_HZ: u32 = 2_000_000;

/// What the speaker should play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tone {
    /// Silence.
    #[default]
    Rest,
    /// Square wave at the given frequency in Hz.
    Hz(u16),
}

impl Tone {
    /// Compare value that makes a toggle-on-match timer clocked at
    /// `timer_hz` produce this tone.
    ///
    /// A toggle halves the output rate, so the value is
    /// `timer_hz / (2 * f) - 1`. Returns 0 for [`Tone::Rest`], for a zero
    /// frequency, and when the tone is too high for the timer.
    ///
    /// ```
    /// use platform::Tone;
    /// use platform::audio::DEFAULT_TIMER_HZ;
    ///
    /// // Middle C on the reference board.
    /// assert_eq!(Tone::Hz(261).ctc_compare(DEFAULT_TIMER_HZ), 3830);
    /// ```
    pub fn ctc_compare(self, timer_hz: u32) -> u16 {
        match self {
            Self::Rest | Self::Hz(0) => 0,
            Self::Hz(freq) => {
                let half_periods = u32::from(freq).saturating_mul(2);
                let ticks = timer_hz
                    .checked_div(half_periods)
                    .unwrap_or(0)
                    .saturating_sub(1);
                u16::try_from(ticks).unwrap_or(u16::MAX)
            }
        }
    }

    /// Whether this tone is audible.
    pub fn is_audible(self) -> bool {
        matches!(self, Self::Hz(f) if f > 0)
    }
}

/// Speaker output.
pub trait ToneOutput {
    /// Error type
    type Error: core::fmt::Debug;

    /// Switch the output to `tone` (replacing whatever was playing).
    fn play(&mut self, tone: Tone) -> Result<(), Self::Error>;
}

impl<T: ToneOutput + ?Sized> ToneOutput for &mut T {
    type Error = T::Error;

    fn play(&mut self, tone: Tone) -> Result<(), Self::Error> {
        T::play(self, tone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_has_zero_compare() {
        assert_eq!(Tone::Rest.ctc_compare(DEFAULT_TIMER_HZ), 0);
        assert_eq!(Tone::Hz(0).ctc_compare(DEFAULT_TIMER_HZ), 0);
        assert!(!Tone::Rest.is_audible());
    }

    #[test]
    fn test_compare_values_follow_toggle_formula() {
        // timer_hz / (2 * f) - 1, truncated. The reference board's hand-made
        // table lists 5100 for G3; this is the computed value.
        assert_eq!(Tone::Hz(196).ctc_compare(DEFAULT_TIMER_HZ), 5101);
        assert_eq!(Tone::Hz(220).ctc_compare(DEFAULT_TIMER_HZ), 4544);
        assert_eq!(Tone::Hz(392).ctc_compare(DEFAULT_TIMER_HZ), 2550);
    }

    #[test]
    fn test_tone_above_timer_rate_saturates_low() {
        assert_eq!(Tone::Hz(u16::MAX).ctc_compare(1_000), 0);
    }
}
