//! One complete game: all periodic tasks joined on one future.

use embassy_futures::join::join5;
use embassy_sync::blocking_mutex::raw::RawMutex;
use engine::SharedGame;
use platform::{LaneInput, ScoreDisplay, TileMatrix, ToneOutput};
use rand::RngCore;

use crate::tasks::{
    fall_clock, render, resolver, score_display, speaker, FallBarrier, TaskExit, TaskTiming,
};

/// The collaborators a game drives.
pub struct Peripherals<I, D, S, T> {
    /// Lane buttons.
    pub lanes: I,
    /// Tile matrix.
    pub matrix: D,
    /// Score readout.
    pub score: S,
    /// Speaker.
    pub speaker: T,
}

/// How each task ended, plus the final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GameReport {
    /// Score when the game ended.
    pub final_score: u32,
    /// Fall clock exit.
    pub fall_clock: TaskExit,
    /// Resolver exit.
    pub resolver: TaskExit,
    /// Render exit.
    pub render: TaskExit,
    /// Score readout exit.
    pub score: TaskExit,
    /// Speaker exit.
    pub speaker: TaskExit,
}

impl GameReport {
    /// Whether every task ended without a fault.
    pub fn is_clean(&self) -> bool {
        [
            self.fall_clock,
            self.resolver,
            self.render,
            self.score,
            self.speaker,
        ]
        .iter()
        .all(|e| *e == TaskExit::GameOver)
    }
}

/// Run the fall clock, resolver, render, score and speaker tasks until the
/// game ends. The heartbeat is not included; it outlives the game.
pub async fn run_game<M, const N: usize, R, I, D, S, T>(
    game: &SharedGame<M, N, R>,
    barrier: &FallBarrier<M>,
    peripherals: &mut Peripherals<I, D, S, T>,
    timing: TaskTiming,
) -> GameReport
where
    M: RawMutex,
    R: RngCore,
    I: LaneInput,
    D: TileMatrix,
    S: ScoreDisplay,
    T: ToneOutput,
{
    let Peripherals {
        lanes,
        matrix,
        score,
        speaker: tone_output,
    } = peripherals;

    info!("game started");
    let (fall, resolve, draw, digits, sound) = join5(
        fall_clock(game, barrier),
        resolver(game, barrier, lanes, timing.resolver_poll),
        render(game, matrix, timing.render_frame),
        score_display(game, score, timing.score_refresh),
        speaker(game, tone_output, timing.speaker_poll),
    )
    .await;

    let report = GameReport {
        final_score: game.score(),
        fall_clock: fall,
        resolver: resolve,
        render: draw,
        score: digits,
        speaker: sound,
    };
    info!("game finished, score {}", report.final_score);
    report
}
