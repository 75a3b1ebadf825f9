//! Status LED blink, independent of the game.

use embassy_time::{Duration, Timer};
use embedded_hal::digital::OutputPin;

/// On/off durations of one blink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeartbeatTiming {
    /// Time lit.
    pub on: Duration,
    /// Time dark.
    pub off: Duration,
}

impl HeartbeatTiming {
    /// 100 ms on, 200 ms off.
    pub const DEFAULT: Self = Self {
        on: Duration::from_millis(100),
        off: Duration::from_millis(200),
    };
}

impl Default for HeartbeatTiming {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Blink `led` forever. Only returns if the pin fails.
pub async fn heartbeat<P: OutputPin>(led: &mut P, timing: HeartbeatTiming) -> P::Error {
    loop {
        if let Err(e) = led.set_high() {
            return e;
        }
        Timer::after(timing.on).await;
        if let Err(e) = led.set_low() {
            return e;
        }
        Timer::after(timing.off).await;
    }
}
