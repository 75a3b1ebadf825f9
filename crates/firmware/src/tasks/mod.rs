//! Periodic game tasks.
//!
//! Each task is a plain `async fn` over `embassy-time` timers, so the same
//! code runs under an Embassy executor on the board and under tokio on the
//! desktop. All of them share one [`engine::SharedGame`] and return once the
//! game is over.
//!
//! | Task        | Period                   | Touches                  |
//! |-------------|--------------------------|--------------------------|
//! | fall clock  | session tempo (ramping)  | tiles (write)            |
//! | resolver    | fall barrier / poll      | tiles, score (write)     |
//! | render      | frame period             | snapshot (read), matrix  |
//! | score       | refresh period           | snapshot (read), digits  |
//! | speaker     | poll period              | snapshot (read), speaker |
//! | heartbeat   | 100 ms on / 200 ms off   | LED only                 |

pub mod fall_clock;
pub mod heartbeat;
pub mod render;
pub mod resolver;
pub mod score;
pub mod speaker;

use embassy_sync::signal::Signal;
use embassy_time::Duration;

pub use fall_clock::fall_clock;
pub use heartbeat::{heartbeat, HeartbeatTiming};
pub use render::{draw_frame, render};
pub use resolver::resolver;
pub use score::score_display;
pub use speaker::speaker;

/// Published by the fall clock after every advance, carrying the fall tick.
///
/// The resolver waits on it so that every decrement is followed by a
/// boundary check against the new positions.
pub type FallBarrier<M> = Signal<M, u32>;

/// How a task ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TaskExit {
    /// The game ended normally.
    GameOver,
    /// An invariant violation or a driver error; the task ended the game.
    Fault,
}

/// Periods of the polling tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskTiming {
    /// Longest the resolver sleeps between samples when no fall happens.
    pub resolver_poll: Duration,
    /// Matrix refresh period.
    pub render_frame: Duration,
    /// Score readout refresh period.
    pub score_refresh: Duration,
    /// Speaker poll period.
    pub speaker_poll: Duration,
}

impl TaskTiming {
    /// Periods used on the board.
    pub const DEFAULT: Self = Self {
        resolver_poll: Duration::from_millis(5),
        render_frame: Duration::from_millis(10),
        score_refresh: Duration::from_millis(50),
        speaker_poll: Duration::from_millis(10),
    };

    /// Every period set to `period` (tests).
    pub const fn uniform(period: Duration) -> Self {
        Self {
            resolver_poll: period,
            render_frame: period,
            score_refresh: period,
            speaker_poll: period,
        }
    }
}

impl Default for TaskTiming {
    fn default() -> Self {
        Self::DEFAULT
    }
}
