//! The song the tiles are tied to.

use platform::Tone;

use crate::config::SONG_LENGTH;

/// A pitch of the C-major scale between G3 and G4.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Note {
    /// 196 Hz
    G3,
    /// 220 Hz
    A3,
    /// 247 Hz
    B3,
    /// 261 Hz
    C4,
    /// 294 Hz
    D4,
    /// 329 Hz
    E4,
    /// 349 Hz
    F4,
    /// 392 Hz
    G4,
}

impl Note {
    /// Frequency in Hz, rounded down.
    pub const fn frequency_hz(self) -> u16 {
        match self {
            Self::G3 => 196,
            Self::A3 => 220,
            Self::B3 => 247,
            Self::C4 => 261,
            Self::D4 => 294,
            Self::E4 => 329,
            Self::F4 => 349,
            Self::G4 => 392,
        }
    }

    /// Speaker tone for this note.
    pub const fn tone(self) -> Tone {
        Tone::Hz(self.frequency_hz())
    }
}

use Note::{A3, B3, C4, D4, E4, G3, G4};

/// "Never Gonna Give You Up", one note per tile.
pub const SONG: [Note; SONG_LENGTH] = [
    G3, A3, C4, A3, E4, E4, D4, G3, A3, C4, //
    A3, D4, D4, C4, G3, A3, C4, A3, C4, D4, //
    B3, A3, G3, D4, C4, G3, A3, C4, A3, E4, //
    E4, D4, G3, A3, C4, A3, G4, B3, C4, G3, //
    A3, C4, A3, C4, D4, B3, A3, G3, D4, C4, //
];

/// Note for `index`, wrapping past the end of the song.
pub fn note_at(index: usize) -> Note {
    let wrapped = index.checked_rem(SONG_LENGTH).unwrap_or(0);
    SONG.get(wrapped).copied().unwrap_or(Note::G3)
}
