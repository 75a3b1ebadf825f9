//! Render task: redraws the matrix from a snapshot every frame.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::{Duration, Timer};
use engine::{SharedGame, TileSprite};
use platform::TileMatrix;
use rand::RngCore;

use super::TaskExit;

/// Clear `matrix` and draw `sprites`.
pub fn draw_frame<D: TileMatrix>(matrix: &mut D, sprites: &[TileSprite]) -> Result<(), D::Error> {
    matrix.clear()?;
    for sprite in sprites {
        matrix.render(sprite.lane, sprite.rows)?;
    }
    Ok(())
}

/// Run the render task until the game ends, then blank the matrix.
pub async fn render<M, const N: usize, R, D>(
    game: &SharedGame<M, N, R>,
    matrix: &mut D,
    frame: Duration,
) -> TaskExit
where
    M: RawMutex,
    R: RngCore,
    D: TileMatrix,
{
    loop {
        let snapshot = game.snapshot();
        if !snapshot.running {
            return match matrix.clear() {
                Ok(()) => {
                    debug!("matrix cleared");
                    TaskExit::GameOver
                }
                Err(_) => {
                    error!("matrix clear failed");
                    TaskExit::Fault
                }
            };
        }
        if draw_frame(matrix, &snapshot.sprites).is_err() {
            error!("matrix driver failed, ending game");
            game.end();
            // Best effort; the driver is already failing.
            let _ = matrix.clear();
            return TaskExit::Fault;
        }
        Timer::after(frame).await;
    }
}
