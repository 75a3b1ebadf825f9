//! Hardware Abstraction Layer (HAL) for the falling-tiles game board
//!
//! This crate provides trait-based abstractions for every device the game
//! talks to, enabling development and testing without physical hardware.
//!
//! # Architecture Layers
//!
//! ```text
//! Application Layer (firmware crate: periodic tasks)
//!         ↓
//! Game engine (engine crate: tiles, resolver, session)
//!         ↓
//! Platform HAL (this crate - trait abstractions)
//!         ↓
//! Hardware Layer (GPIO ports, timer compare registers)
//! ```
//!
//! # Collaborators
//!
//! - [`TileMatrix`] - 8×8 LED matrix showing the falling tiles
//! - [`ScoreDisplay`] - 4-digit 7-segment score readout
//! - [`ToneOutput`] - square-wave speaker driven by a timer in CTC mode
//! - [`LaneInput`] - the four lane buttons
//!
//! # Features
//!
//! - `std`: Enable the [`mocks`] module (for testing)
//! - `defmt`: Enable defmt logging derives
//!
//! # Example
//!
//! ```no_run
//! use platform::{DisplayScore, ScoreDisplay};
//!
//! fn example<D: ScoreDisplay>(display: &mut D, score: u32) {
//!     display.show(DisplayScore::from_score(score)).ok();
//! }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![allow(clippy::must_use_candidate)] // accessors; callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod audio;
pub mod config;
pub mod display;
pub mod input;
pub mod segment;

#[cfg(any(test, feature = "std"))]
pub mod mocks;

// Re-export main high-level traits
pub use audio::{Tone, ToneOutput};
pub use display::{RowMask, TileMatrix, MATRIX_ROWS};
pub use input::{GpioLanes, Lane, LaneInput, OutOfRangeError, LANE_COUNT};
pub use segment::{DisplayScore, ScoreDisplay};
