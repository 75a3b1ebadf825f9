//! Single-task integration tests: each task against mock or failing drivers.
// Integration test file: expect/unwrap/panic are intentional test mechanisms.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing
)]
//!
//! Run with: cargo test -p firmware --test integration_tasks

use std::time::Duration as StdDuration;

use embassy_futures::join::join;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::{Duration, Timer};
use embedded_hal_mock::eh1::digital::{Mock as PinMock, State as PinState, Transaction as PinTransaction};
use embedded_hal_mock::eh1::MockError;
use engine::{GameConfig, Note, SharedSongGame, SongSession, TileSprite};
use firmware::tasks::{
    draw_frame, fall_clock, heartbeat, render, score_display, speaker, HeartbeatTiming,
};
use firmware::{FallBarrier, TaskExit};
use platform::mocks::{MockMatrix, MockScoreDisplay, MockSpeaker};
use platform::{DisplayScore, Lane, RowMask, ScoreDisplay, TileMatrix, Tone};
use rand::rngs::SmallRng;
use rand::SeedableRng;

type TestGame = SharedSongGame<CriticalSectionRawMutex, SmallRng>;

const TICK: Duration = Duration::from_millis(1);

fn new_game() -> TestGame {
    SharedSongGame::new(
        SongSession::new(GameConfig::DEFAULT, SmallRng::seed_from_u64(21)).unwrap(),
    )
}

fn lane(n: u8) -> Lane {
    Lane::try_new(n).unwrap()
}

async fn within<F: core::future::Future>(f: F) -> F::Output {
    tokio::time::timeout(StdDuration::from_secs(5), f)
        .await
        .expect("task should finish")
}

/// Matrix whose driver rejects every command.
struct DeadMatrix;

impl TileMatrix for DeadMatrix {
    type Error = ();

    fn render(&mut self, _lane: Lane, _rows: RowMask) -> Result<(), Self::Error> {
        Err(())
    }

    fn clear(&mut self) -> Result<(), Self::Error> {
        Err(())
    }
}

/// Readout whose driver rejects every command.
struct DeadReadout;

impl ScoreDisplay for DeadReadout {
    type Error = ();

    fn show(&mut self, _score: DisplayScore) -> Result<(), Self::Error> {
        Err(())
    }
}

#[test]
fn draw_frame_replaces_previous_frame() {
    let mut matrix = MockMatrix::new();
    draw_frame(
        &mut matrix,
        &[TileSprite {
            lane: lane(3),
            rows: RowMask::from_bits(0b1000_0000),
        }],
    )
    .unwrap();

    let sprites = [
        TileSprite {
            lane: lane(0),
            rows: RowMask::from_bits(0b0000_0011),
        },
        TileSprite {
            lane: lane(2),
            rows: RowMask::from_bits(0b0001_1000),
        },
    ];
    draw_frame(&mut matrix, &sprites).unwrap();

    assert_eq!(matrix.clear_count(), 2);
    assert_eq!(matrix.lane(lane(0)), RowMask::from_bits(0b0000_0011));
    assert_eq!(matrix.lane(lane(2)), RowMask::from_bits(0b0001_1000));
    assert!(matrix.lane(lane(3)).is_empty());
}

#[tokio::test]
async fn render_draws_the_opening_frame_then_blanks_on_game_over() {
    let game = new_game();
    let mut matrix = MockMatrix::new();

    let (exit, ()) = within(join(render(&game, &mut matrix, TICK), async {
        Timer::after_millis(5).await;
        game.end();
    }))
    .await;

    assert_eq!(exit, TaskExit::GameOver);
    // At least one frame plus the final blanking.
    assert!(matrix.clear_count() >= 2);
    assert!(matrix.is_blank());
}

#[tokio::test]
async fn failing_matrix_ends_the_game() {
    let game = new_game();
    let exit = within(render(&game, &mut DeadMatrix, TICK)).await;

    assert_eq!(exit, TaskExit::Fault);
    assert!(!game.is_running());
}

#[tokio::test]
async fn failing_readout_ends_the_game() {
    let game = new_game();
    let exit = within(score_display(&game, &mut DeadReadout, TICK)).await;

    assert_eq!(exit, TaskExit::Fault);
    assert!(!game.is_running());
}

#[tokio::test]
async fn score_readout_keeps_final_score() {
    let game = new_game();
    let mut readout = MockScoreDisplay::new();

    let (exit, ()) = within(join(score_display(&game, &mut readout, TICK), async {
        Timer::after_millis(5).await;
        game.end();
    }))
    .await;

    assert_eq!(exit, TaskExit::GameOver);
    // Unchanged score is shown once, not every refresh.
    assert_eq!(readout.history(), &[DisplayScore::from_score(0)]);
}

#[tokio::test]
async fn speaker_plays_first_note_then_rests() {
    let game = new_game();
    let mut output = MockSpeaker::new();

    let (exit, ()) = within(join(speaker(&game, &mut output, TICK), async {
        Timer::after_millis(5).await;
        game.end();
    }))
    .await;

    assert_eq!(exit, TaskExit::GameOver);
    assert_eq!(output.history(), &[Tone::Hz(196), Tone::Rest]);
    assert_eq!(Note::G3.tone(), Tone::Hz(196));
}

#[tokio::test]
async fn fall_clock_on_ended_game_wakes_resolver_and_exits() {
    let game = new_game();
    let barrier: FallBarrier<CriticalSectionRawMutex> = FallBarrier::new();
    game.end();

    let exit = within(fall_clock(&game, &barrier)).await;

    assert_eq!(exit, TaskExit::GameOver);
    assert!(barrier.signaled());
    assert_eq!(game.with(|s| s.fall_tick()), 0);
}

#[tokio::test]
async fn fall_clock_publishes_each_tick() {
    let config = GameConfig {
        initial_tempo_ms: 2,
        tempo_decrement_ms: 0,
        min_tempo_ms: 1,
        ..GameConfig::DEFAULT
    };
    let game: TestGame = SharedSongGame::new(
        SongSession::new(config, SmallRng::seed_from_u64(4)).unwrap(),
    );
    let barrier: FallBarrier<CriticalSectionRawMutex> = FallBarrier::new();

    let (exit, ticks) = within(join(fall_clock(&game, &barrier), async {
        let mut seen = Vec::new();
        while seen.len() < 3 {
            seen.push(barrier.wait().await);
        }
        game.end();
        seen
    }))
    .await;

    assert_eq!(exit, TaskExit::GameOver);
    assert_eq!(ticks, vec![1, 2, 3]);
}

#[tokio::test]
async fn heartbeat_blinks_until_the_pin_fails() {
    let err = MockError::Io(std::io::ErrorKind::NotConnected);
    let mut led = PinMock::new(&[
        PinTransaction::set(PinState::High),
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::High),
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::High).with_error(err.clone()),
    ]);
    let timing = HeartbeatTiming { on: TICK, off: TICK };

    let returned = within(heartbeat(&mut led, timing)).await;

    assert_eq!(returned, err);
    led.done();
}

#[test]
fn heartbeat_default_is_100_on_200_off() {
    let timing = HeartbeatTiming::default();
    assert_eq!(timing.on, Duration::from_millis(100));
    assert_eq!(timing.off, Duration::from_millis(200));
}
