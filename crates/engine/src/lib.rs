//! Game-state engine for the falling-tiles rhythm game.
//!
//! Tiles (one per note of the song) fall down four lanes of an 8×8 matrix.
//! The player has to press the lane of the lowest tile before it crosses the
//! hit line. A hit scores, plays the next note and sends the tile back to
//! the top; a miss or a wrong lane ends the game. Tiles fall a little faster
//! after every row.
//!
//! ```text
//! fall clock ──advance──▶ ┌─────────────┐ ◀──resolve── resolver
//!                         │ SharedGame  │
//! render / score / audio ◀─snapshot──── └─────────────┘
//! ```
//!
//! Everything here is synchronous and `no_std`; the periodic tasks that drive
//! it live in the firmware crate.
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod config;
pub mod error;
pub mod input;
pub mod resolver;
pub mod session;
pub mod shared;
pub mod song;
pub mod tempo;
pub mod tile;

pub use config::{GameConfig, SONG_LENGTH};
pub use error::GameError;
pub use input::{InputClassifier, LaneStates, PressState};
pub use resolver::{GameOverCause, Resolution};
pub use session::{FallStep, GameSession, Snapshot};
pub use shared::SharedGame;
pub use song::{Note, SONG};
pub use tempo::Tempo;
pub use tile::{Tile, TileSequence, TileSprite};

/// A session sized for the built-in song.
pub type SongSession<R> = GameSession<SONG_LENGTH, R>;

/// A shared session sized for the built-in song.
pub type SharedSongGame<M, R> = SharedGame<M, SONG_LENGTH, R>;

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::arithmetic_side_effects,
    clippy::cast_possible_truncation
)]
mod tests {
    /// Full-length game driven through the public API.
    mod song_game_tests {
        use crate::{
            GameConfig, InputClassifier, Resolution, SongSession, SONG_LENGTH,
        };
        use platform::LANE_COUNT;
        use rand::rngs::SmallRng;
        use rand::SeedableRng;

        fn press(lane_index: usize) -> [bool; LANE_COUNT] {
            let mut raw = [false; LANE_COUNT];
            if let Some(level) = raw.get_mut(lane_index) {
                *level = true;
            }
            raw
        }

        #[test]
        fn test_perfect_player_wraps_the_song() {
            let mut game =
                SongSession::new(GameConfig::DEFAULT, SmallRng::seed_from_u64(42)).unwrap();
            let mut classifier = InputClassifier::new();

            for expected in 1..=(SONG_LENGTH as u32 + 5) {
                let active = game.active_index();
                let target = game.tiles().get(active).unwrap().lane();
                // Release first so every hit is a fresh edge.
                classifier.update([false; LANE_COUNT]);
                let states = classifier.update(press(target.index()));
                let r = game.resolve(&states).unwrap();
                assert_eq!(r, Resolution::Hit { index: active, score: expected });
                game.advance();
                game.check_invariants().unwrap();
            }
            assert_eq!(game.active_index(), 5);
            assert_eq!(game.note_index(), 5);
        }

        #[test]
        fn test_idle_player_eventually_misses() {
            let mut game =
                SongSession::new(GameConfig::DEFAULT, SmallRng::seed_from_u64(5)).unwrap();
            let mut classifier = InputClassifier::new();
            let mut ticks = 0;
            loop {
                let states = classifier.update([false; LANE_COUNT]);
                if game.resolve(&states).unwrap().is_terminal() {
                    break;
                }
                game.advance();
                ticks += 1;
                assert!(ticks < 100, "game should have ended");
            }
            // Tile 0 starts at row 7 and is missed at row -1.
            assert_eq!(ticks, 8);
            assert_eq!(game.score(), 0);
        }
    }
}
