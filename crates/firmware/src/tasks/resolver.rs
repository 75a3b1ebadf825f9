//! Resolver: samples the buttons and judges them against the active tile.

use embassy_futures::select::select;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::{Duration, Timer};
use engine::{InputClassifier, Resolution, SharedGame};
use platform::LaneInput;
use rand::RngCore;

use super::{FallBarrier, TaskExit};

/// Run the resolver until the game ends.
///
/// Wakes on every fall (so a tile crossing the hit line is judged at its new
/// position) and otherwise every `poll` to catch presses between falls.
pub async fn resolver<M, const N: usize, R, I>(
    game: &SharedGame<M, N, R>,
    barrier: &FallBarrier<M>,
    input: &mut I,
    poll: Duration,
) -> TaskExit
where
    M: RawMutex,
    R: RngCore,
    I: LaneInput,
{
    let mut classifier = InputClassifier::new();
    info!("resolver started");
    loop {
        select(barrier.wait(), Timer::after(poll)).await;

        let states = classifier.sample(input, |lane, _err| {
            warn!("button read failed on {}", lane);
        });

        match game.resolve(&states) {
            Ok(Resolution::Pending) => {}
            Ok(Resolution::Hit { index, score }) => {
                debug!("hit tile {}, score {}", index, score);
            }
            Ok(Resolution::GameOver { cause, score }) => {
                info!("game over: {}, final score {}", cause.as_str(), score);
                return TaskExit::GameOver;
            }
            Ok(Resolution::Ended) => return TaskExit::GameOver,
            Err(e) => {
                error!("resolver stopped: {}", e);
                game.end();
                return TaskExit::Fault;
            }
        }
    }
}
