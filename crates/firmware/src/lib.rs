//! Falling Tiles firmware
//!
//! Periodic tasks that drive the game engine against the board's
//! peripherals: lane buttons, the 8×8 tile matrix, the four-digit score
//! readout, the speaker and a heartbeat LED.
//!
//! # Architecture
//!
//! ```text
//! Tasks (fall clock, resolver, render, score, speaker, heartbeat)
//!         ↓
//! engine::SharedGame (one session behind a blocking mutex)
//!         ↓
//! platform traits (LaneInput, TileMatrix, ScoreDisplay, ToneOutput, OutputPin)
//! ```
//!
//! # Features
//!
//! - `emulator` - Build for desktop (tokio, tracing, terminal peripherals)
//! - `defmt` - Log through defmt on hardware
//! - `std` - Enable standard library
//!
//! # Emulator
//!
//! ```bash
//! RUST_LOG=info cargo run -p firmware --example terminal_emulator --features emulator
//! ```

#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
// Upgrade relevant warns to deny; keep pedantic as warn (too noisy for firmware)
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Critical correctness: deny these
#![deny(clippy::await_holding_lock)] // holding a blocking Mutex across .await is a bug
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
// Logging discipline
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![warn(clippy::dbg_macro)] // dbg! should not be left in committed code
// Intentional allows for this codebase:
#![allow(clippy::module_name_repetitions)] // common in Rust crates; not a real issue
#![allow(clippy::missing_errors_doc)] // most errors are self-explanatory
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]

// Must come first so the logging macros are visible to every module below.
mod fmt;

pub mod game;
pub mod tasks;

#[cfg(feature = "emulator")]
pub mod emulator;

pub use game::{run_game, GameReport, Peripherals};
pub use tasks::{FallBarrier, HeartbeatTiming, TaskExit, TaskTiming};
