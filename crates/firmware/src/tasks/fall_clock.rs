//! Fall clock: moves every tile down one row per tick, a little faster each time.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::Timer;
use engine::{FallStep, SharedGame};
use rand::RngCore;

use super::{FallBarrier, TaskExit};

/// Run the fall clock until the game ends.
///
/// Each tick advances the tiles (which also ramps the tempo), publishes the
/// tick on `barrier`, then sleeps the new tempo. The first advance happens
/// immediately.
pub async fn fall_clock<M, const N: usize, R>(
    game: &SharedGame<M, N, R>,
    barrier: &FallBarrier<M>,
) -> TaskExit
where
    M: RawMutex,
    R: RngCore,
{
    info!("fall clock started");
    loop {
        match game.advance() {
            FallStep::Advanced { tick, delay_ms } => {
                barrier.signal(tick);
                trace!("fall {} next in {} ms", tick, delay_ms);
                Timer::after_millis(u64::from(delay_ms)).await;
            }
            FallStep::Stopped => {
                // Wake the resolver so it sees the stop promptly.
                barrier.signal(game.with(engine::GameSession::fall_tick));
                info!("fall clock stopped");
                return TaskExit::GameOver;
            }
            FallStep::Fault(e) => {
                error!("fall clock stopped: {}", e);
                barrier.signal(game.with(engine::GameSession::fall_tick));
                return TaskExit::Fault;
            }
        }
    }
}
