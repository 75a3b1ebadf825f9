//! Falling Tiles Terminal Emulator
//!
//! Plays one game on the desktop with an automatic player. The matrix is
//! drawn to stdout; score and speaker changes are logged.
//!
//! Run with: RUST_LOG=info cargo run -p firmware --example terminal_emulator --features emulator
//!
//! Optional arguments: `<seed> <accuracy>` (defaults 7 and 0.97).

use anyhow::Context;
use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use engine::{GameConfig, SharedSongGame, SongSession};
use firmware::emulator::{AutoPlayer, LoggedLed, LoggedScore, LoggedSpeaker, TerminalMatrix};
use firmware::tasks::heartbeat;
use firmware::{run_game, FallBarrier, HeartbeatTiming, Peripherals, TaskTiming};
use platform::audio::DEFAULT_TIMER_HZ;
use platform::config;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = match args.next() {
        Some(s) => s.parse().context("seed must be an unsigned integer")?,
        None => 7,
    };
    let accuracy: f32 = match args.next() {
        Some(s) => s.parse().context("accuracy must be a number between 0 and 1")?,
        None => 0.97,
    };

    println!("{} v{}", config::EMULATOR_BANNER, config::APP_VERSION);
    tracing::info!("{} starting", config::APP_NAME);
    println!("seed {seed}, player accuracy {accuracy}\n");

    let session = SongSession::new(GameConfig::DEFAULT, SmallRng::seed_from_u64(seed))
        .context("failed to start session")?;
    let game: SharedSongGame<CriticalSectionRawMutex, SmallRng> = SharedSongGame::new(session);
    let barrier: FallBarrier<CriticalSectionRawMutex> = FallBarrier::new();

    let mut peripherals = Peripherals {
        lanes: AutoPlayer::new(&game, seed.wrapping_add(1), accuracy),
        matrix: TerminalMatrix::new(std::io::stdout()),
        score: LoggedScore::new(),
        speaker: LoggedSpeaker::new(DEFAULT_TIMER_HZ),
    };
    let mut led = LoggedLed::default();

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("failed to build runtime")?;

    let report = rt.block_on(async {
        match select(
            run_game(&game, &barrier, &mut peripherals, TaskTiming::DEFAULT),
            heartbeat(&mut led, HeartbeatTiming::DEFAULT),
        )
        .await
        {
            Either::First(report) => report,
            // LoggedLed is infallible, so the heartbeat never finishes.
            Either::Second(never) => match never {},
        }
    });

    println!("\nGame over. Final score: {}", report.final_score);
    println!("Frames drawn: {}", peripherals.matrix.frames_written());
    if !report.is_clean() {
        anyhow::bail!("a task faulted: {report:?}");
    }
    Ok(())
}
