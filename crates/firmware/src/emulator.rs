//! Desktop stand-ins for the board's peripherals.
//!
//! The matrix is drawn as text, the score and speaker are logged through
//! `tracing`, and an [`AutoPlayer`] presses the buttons.

use std::io::Write;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal::digital::{ErrorType, OutputPin};
use engine::SharedGame;
use platform::display::lane_lines;
use platform::{
    DisplayScore, Lane, LaneInput, RowMask, ScoreDisplay, TileMatrix, Tone, ToneOutput,
    LANE_COUNT, MATRIX_ROWS,
};
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};

/// Errors from the text outputs.
#[derive(Debug)]
pub enum EmulatorError {
    /// Writing a frame to the sink failed.
    Io(std::io::Error),
}

impl core::fmt::Display for EmulatorError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "frame write failed: {e}"),
        }
    }
}

impl std::error::Error for EmulatorError {}

/// 8×8 matrix printed as text.
///
/// A frame is complete when the render task starts the next one, so
/// `clear()` writes the previous frame to the sink if it differs from the
/// last one written.
pub struct TerminalMatrix<W: Write> {
    sink: W,
    lanes: [RowMask; LANE_COUNT],
    last_written: Option<[RowMask; LANE_COUNT]>,
    frames_written: usize,
}

impl<W: Write> TerminalMatrix<W> {
    /// Print frames to `sink`.
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            lanes: [RowMask::EMPTY; LANE_COUNT],
            last_written: None,
            frames_written: 0,
        }
    }

    /// Frames written so far.
    pub fn frames_written(&self) -> usize {
        self.frames_written
    }

    /// Give back the sink.
    pub fn into_sink(self) -> W {
        self.sink
    }

    /// Current frame as text, top row first, one column per matrix line,
    /// `#` for lit.
    pub fn frame_text(&self) -> String {
        let mut text = String::new();
        for row in (0..MATRIX_ROWS).rev() {
            for (lane, mask) in Lane::ALL.iter().zip(&self.lanes) {
                let cell = if mask.contains(row) { '#' } else { '.' };
                for _line in lane_lines(*lane) {
                    text.push(cell);
                }
            }
            text.push('\n');
        }
        text
    }

    fn flush_frame(&mut self) -> Result<(), EmulatorError> {
        if self.last_written == Some(self.lanes) {
            return Ok(());
        }
        let text = self.frame_text();
        writeln!(self.sink, "{text}").map_err(EmulatorError::Io)?;
        self.sink.flush().map_err(EmulatorError::Io)?;
        self.last_written = Some(self.lanes);
        self.frames_written = self.frames_written.saturating_add(1);
        Ok(())
    }
}

impl<W: Write> TileMatrix for TerminalMatrix<W> {
    type Error = EmulatorError;

    fn render(&mut self, lane: Lane, rows: RowMask) -> Result<(), Self::Error> {
        if let Some(slot) = self.lanes.get_mut(lane.index()) {
            *slot = slot.union(rows);
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.flush_frame()?;
        self.lanes = [RowMask::EMPTY; LANE_COUNT];
        Ok(())
    }
}

/// Score readout that logs each new value.
#[derive(Debug, Default)]
pub struct LoggedScore {
    current: Option<DisplayScore>,
}

impl LoggedScore {
    /// Create a blank readout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Value on the readout.
    pub fn current(&self) -> Option<DisplayScore> {
        self.current
    }
}

impl ScoreDisplay for LoggedScore {
    type Error = core::convert::Infallible;

    fn show(&mut self, score: DisplayScore) -> Result<(), Self::Error> {
        tracing::info!(score = score.get(), segments = ?score.segments(), "score");
        self.current = Some(score);
        Ok(())
    }
}

/// Speaker that logs the tone and the timer compare value it would load.
#[derive(Debug)]
pub struct LoggedSpeaker {
    timer_hz: u32,
    current: Tone,
}

impl LoggedSpeaker {
    /// Log compare values for a timer clocked at `timer_hz`.
    pub fn new(timer_hz: u32) -> Self {
        Self {
            timer_hz,
            current: Tone::Rest,
        }
    }

    /// Tone playing now.
    pub fn current(&self) -> Tone {
        self.current
    }
}

impl ToneOutput for LoggedSpeaker {
    type Error = core::convert::Infallible;

    fn play(&mut self, tone: Tone) -> Result<(), Self::Error> {
        tracing::debug!(?tone, compare = tone.ctc_compare(self.timer_hz), "speaker");
        self.current = tone;
        Ok(())
    }
}

/// Heartbeat LED that logs its level.
#[derive(Debug, Default)]
pub struct LoggedLed {
    lit: bool,
}

impl LoggedLed {
    /// Whether the LED is on.
    pub fn is_lit(&self) -> bool {
        self.lit
    }
}

impl ErrorType for LoggedLed {
    type Error = core::convert::Infallible;
}

impl OutputPin for LoggedLed {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.lit = false;
        tracing::trace!("heartbeat off");
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.lit = true;
        tracing::trace!("heartbeat on");
        Ok(())
    }
}

/// Simulated player that watches the active tile and presses its lane.
///
/// It waits until the tile reaches `reaction_row`, presses for one sample,
/// then releases. With probability `1 - accuracy` it presses a wrong lane
/// instead, which ends the game.
pub struct AutoPlayer<'a, M: RawMutex, const N: usize, R> {
    game: &'a SharedGame<M, N, R>,
    rng: SmallRng,
    accuracy: f32,
    reaction_row: i32,
    frame: [bool; LANE_COUNT],
    released: bool,
}

impl<'a, M: RawMutex, const N: usize, R> AutoPlayer<'a, M, N, R> {
    /// Play `game` with the given hit probability.
    pub fn new(game: &'a SharedGame<M, N, R>, seed: u64, accuracy: f32) -> Self {
        Self {
            game,
            rng: SmallRng::seed_from_u64(seed),
            accuracy: accuracy.clamp(0.0, 1.0),
            reaction_row: 2,
            frame: [false; LANE_COUNT],
            released: true,
        }
    }

    /// Press when the active tile is at or below `row`.
    #[must_use]
    pub fn reaction_row(mut self, row: i32) -> Self {
        self.reaction_row = row;
        self
    }

    fn next_frame(&mut self) -> [bool; LANE_COUNT] {
        // Always release between presses so every press is an edge.
        if !self.released {
            self.released = true;
            return [false; LANE_COUNT];
        }
        let target = self.game.with(|s| {
            s.tiles()
                .get(s.active_index())
                .filter(|t| t.position() <= self.reaction_row)
                .map(|t| t.lane())
        });
        let Some(target) = target else {
            return [false; LANE_COUNT];
        };
        let lane = if self.rng.gen::<f32>() < self.accuracy {
            target
        } else {
            let offset = self.rng.gen_range(1..LANE_COUNT);
            Lane::from_index(target.index().wrapping_add(offset).wrapping_rem(LANE_COUNT))
                .unwrap_or(target)
        };
        let mut frame = [false; LANE_COUNT];
        if let Some(level) = frame.get_mut(lane.index()) {
            *level = true;
        }
        self.released = false;
        frame
    }
}

impl<M: RawMutex, const N: usize, R: RngCore> LaneInput for AutoPlayer<'_, M, N, R> {
    type Error = core::convert::Infallible;

    fn read_raw(&mut self, lane: Lane) -> Result<bool, Self::Error> {
        if lane.index() == 0 {
            self.frame = self.next_frame();
        }
        Ok(self.frame.get(lane.index()).copied().unwrap_or(false))
    }
}
