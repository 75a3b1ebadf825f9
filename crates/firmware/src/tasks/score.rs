//! Score readout task.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::{Duration, Timer};
use engine::SharedGame;
use platform::{DisplayScore, ScoreDisplay};
use rand::RngCore;

use super::TaskExit;

/// Keep the readout in step with the score; leave the final score showing
/// when the game ends.
pub async fn score_display<M, const N: usize, R, D>(
    game: &SharedGame<M, N, R>,
    display: &mut D,
    refresh: Duration,
) -> TaskExit
where
    M: RawMutex,
    R: RngCore,
    D: ScoreDisplay,
{
    let mut shown: Option<u32> = None;
    loop {
        let (score, running) = game.with(|s| (s.score(), s.is_running()));
        if shown != Some(score) {
            if display.show(DisplayScore::from_score(score)).is_err() {
                error!("score display failed, ending game");
                game.end();
                return TaskExit::Fault;
            }
            shown = Some(score);
        }
        if !running {
            info!("final score {}", score);
            return TaskExit::GameOver;
        }
        Timer::after(refresh).await;
    }
}
