//! The session as shared by concurrently scheduled tasks.
//!
//! Every access runs inside one `lock` closure. Closures are synchronous,
//! so no task can hold the lock across a timer wait.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use rand::RngCore;

use crate::error::GameError;
use crate::input::LaneStates;
use crate::resolver::Resolution;
use crate::session::{FallStep, GameSession, Snapshot};

/// A [`GameSession`] behind a blocking mutex.
///
/// `M` picks the lock: `CriticalSectionRawMutex` when tasks run at
/// different priorities (or on several threads in host tests),
/// `NoopRawMutex` when every task shares one executor.
pub struct SharedGame<M: RawMutex, const N: usize, R> {
    inner: Mutex<M, RefCell<GameSession<N, R>>>,
}

impl<M: RawMutex, const N: usize, R: RngCore> SharedGame<M, N, R> {
    /// Wrap a freshly created session.
    pub fn new(session: GameSession<N, R>) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(session)),
        }
    }

    /// Fall-clock tick (see [`GameSession::advance`]).
    pub fn advance(&self) -> FallStep {
        self.inner.lock(|s| s.borrow_mut().advance())
    }

    /// Resolver cycle (see [`GameSession::resolve`]).
    pub fn resolve(&self, inputs: &LaneStates) -> Result<Resolution, GameError> {
        self.inner.lock(|s| s.borrow_mut().resolve(inputs))
    }

    /// Stop the game. Returns whether this call did the stopping.
    pub fn end(&self) -> bool {
        self.inner.lock(|s| s.borrow_mut().end())
    }

    /// Consistent copy for the output tasks.
    pub fn snapshot(&self) -> Snapshot {
        self.inner.lock(|s| s.borrow().snapshot())
    }

    /// See [`GameSession::check_invariants`].
    pub fn check_invariants(&self) -> Result<(), GameError> {
        self.inner.lock(|s| s.borrow().check_invariants())
    }
}

impl<M: RawMutex, const N: usize, R> SharedGame<M, N, R> {
    /// Whether the game is still going.
    pub fn is_running(&self) -> bool {
        self.inner.lock(|s| s.borrow().is_running())
    }

    /// Current score.
    pub fn score(&self) -> u32 {
        self.inner.lock(|s| s.borrow().score())
    }

    /// Run `f` against the session under the lock.
    pub fn with<T>(&self, f: impl FnOnce(&GameSession<N, R>) -> T) -> T {
        self.inner.lock(|s| f(&s.borrow()))
    }

    /// Take the session back out.
    pub fn into_inner(self) -> GameSession<N, R> {
        self.inner.into_inner().into_inner()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::input::PressState;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use platform::Lane;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn shared() -> SharedGame<NoopRawMutex, 4, SmallRng> {
        let lanes = [0u8, 1, 2, 3].map(|n| Lane::try_new(n).unwrap());
        let session =
            GameSession::with_lanes(GameConfig::DEFAULT, lanes, SmallRng::seed_from_u64(9)).unwrap();
        SharedGame::new(session)
    }

    #[test]
    fn test_shared_hit_updates_score() {
        let game = shared();
        let hit = LaneStates::single(Lane::try_new(0).unwrap(), PressState::Edge);
        assert!(matches!(game.resolve(&hit), Ok(Resolution::Hit { score: 1, .. })));
        assert_eq!(game.score(), 1);
        assert_eq!(game.with(|s| s.active_index()), 1);
    }

    #[test]
    fn test_shared_end_stops_clock() {
        let game = shared();
        assert!(game.end());
        assert!(!game.is_running());
        assert_eq!(game.advance(), FallStep::Stopped);
        assert!(!game.snapshot().running);
    }

    #[test]
    fn test_into_inner_returns_session() {
        let game = shared();
        game.advance();
        assert_eq!(game.into_inner().fall_tick(), 1);
    }
}
