//! Speaker task: plays the note for the current position in the song.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::{Duration, Timer};
use engine::song::note_at;
use engine::SharedGame;
use platform::{Tone, ToneOutput};
use rand::RngCore;

use super::TaskExit;

/// Switch the speaker whenever the note index moves; silence it when the
/// game ends.
pub async fn speaker<M, const N: usize, R, S>(
    game: &SharedGame<M, N, R>,
    output: &mut S,
    poll: Duration,
) -> TaskExit
where
    M: RawMutex,
    R: RngCore,
    S: ToneOutput,
{
    let mut playing: Option<usize> = None;
    loop {
        let (note_index, running) = game.with(|s| (s.note_index(), s.is_running()));
        if !running {
            return match output.play(Tone::Rest) {
                Ok(()) => {
                    debug!("speaker silenced");
                    TaskExit::GameOver
                }
                Err(_) => {
                    error!("speaker rest failed");
                    TaskExit::Fault
                }
            };
        }
        if playing != Some(note_index) {
            let tone = note_at(note_index).tone();
            if output.play(tone).is_err() {
                error!("speaker failed, ending game");
                game.end();
                return TaskExit::Fault;
            }
            playing = Some(note_index);
        }
        Timer::after(poll).await;
    }
}
