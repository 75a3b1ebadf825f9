//! Game session: tiles, score, tempo, and the running flag in one aggregate.
//!
//! Both writers (the fall clock and the resolver) go through this type, so
//! every invariant can be checked in one place. The session is plain data;
//! [`crate::SharedGame`] is what makes it safe to share between tasks.

use platform::Lane;
use rand::RngCore;

use crate::config::GameConfig;
use crate::error::GameError;
use crate::input::LaneStates;
use crate::resolver::{judge, Resolution, Verdict};
use crate::song::{note_at, Note};
use crate::tempo::Tempo;
use crate::tile::{Sprites, TileSequence};

/// Result of one fall-clock tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FallStep {
    /// Tiles moved down one row.
    Advanced {
        /// Fall counter after this tick.
        tick: u32,
        /// How long to wait before the next tick.
        delay_ms: u32,
    },
    /// The game is over; nothing moved.
    Stopped,
    /// The fall broke an invariant. The session has stopped.
    Fault(GameError),
}

/// Read-only copy of what the output tasks need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Current score.
    pub score: u32,
    /// Whether the game is still going.
    pub running: bool,
    /// Current fall cadence.
    pub tempo_ms: u32,
    /// Index of the tile the player must hit next.
    pub active_index: usize,
    /// Index of the note the speaker should play.
    pub note_index: usize,
    /// Fall counter.
    pub fall_tick: u32,
    /// Tiles to draw this frame.
    pub sprites: Sprites,
}

impl Snapshot {
    /// Note the speaker should play.
    pub fn note(&self) -> Note {
        note_at(self.note_index)
    }
}

/// One game, from the first tile to game over.
#[derive(Debug, Clone)]
pub struct GameSession<const N: usize, R> {
    config: GameConfig,
    tiles: TileSequence<N>,
    active: usize,
    note: usize,
    score: u32,
    running: bool,
    tempo: Tempo,
    fall_tick: u32,
    rng: R,
}

impl<const N: usize, R: RngCore> GameSession<N, R> {
    /// Start a game with random lanes.
    pub fn new(config: GameConfig, mut rng: R) -> Result<Self, GameError> {
        config.validate()?;
        let tiles = TileSequence::initialize(&config, &mut rng)?;
        Self::from_parts(config, tiles, rng)
    }

    /// Start a game with the given lanes. Recycled tiles still draw from `rng`.
    pub fn with_lanes(config: GameConfig, lanes: [Lane; N], rng: R) -> Result<Self, GameError> {
        config.validate()?;
        let tiles = TileSequence::with_lanes(&config, lanes)?;
        Self::from_parts(config, tiles, rng)
    }

    fn from_parts(config: GameConfig, tiles: TileSequence<N>, rng: R) -> Result<Self, GameError> {
        let tempo = Tempo::try_new(config.initial_tempo_ms, config.min_tempo_ms)?;
        Ok(Self {
            config,
            tiles,
            active: 0,
            note: 0,
            score: 0,
            running: true,
            tempo,
            fall_tick: 0,
            rng,
        })
    }

    /// One fall-clock tick: move every tile down, then speed up.
    ///
    /// The invariants are checked after the move; a violation stops the
    /// session and is returned as [`FallStep::Fault`].
    pub fn advance(&mut self) -> FallStep {
        if !self.running {
            return FallStep::Stopped;
        }
        self.tiles.advance_all();
        self.fall_tick = self.fall_tick.wrapping_add(1);
        self.tempo = self.tempo.ramped(self.config.tempo_decrement_ms);
        if let Err(e) = self.check_invariants() {
            self.running = false;
            return FallStep::Fault(e);
        }
        FallStep::Advanced {
            tick: self.fall_tick,
            delay_ms: self.tempo.get(),
        }
    }

    /// One resolver cycle against the active tile.
    ///
    /// Any error stops the session; the state after a hit is checked
    /// before the hit is reported.
    pub fn resolve(&mut self, inputs: &LaneStates) -> Result<Resolution, GameError> {
        if !self.running {
            return Ok(Resolution::Ended);
        }
        let resolution = self.judge_active(inputs).and_then(|r| match r {
            Resolution::Hit { .. } => self.check_invariants().map(|()| r),
            _ => Ok(r),
        });
        if resolution.is_err() {
            self.running = false;
        }
        resolution
    }

    fn judge_active(&mut self, inputs: &LaneStates) -> Result<Resolution, GameError> {
        let index = self.active;
        let tile = self.tiles.get(index).ok_or(GameError::ActiveIndexOutOfRange {
            index,
            len: N,
        })?;

        match judge(tile, inputs) {
            Verdict::Wait => Ok(Resolution::Pending),
            Verdict::GameOver(cause) => {
                self.running = false;
                Ok(Resolution::GameOver {
                    cause,
                    score: self.score,
                })
            }
            Verdict::Hit => {
                self.tiles.mark_resolved(index)?;
                self.tiles.recycle(index, &mut self.rng)?;
                self.score = self.score.saturating_add(1);
                self.active = index.wrapping_add(1).checked_rem(N).unwrap_or(0);
                self.note = self.note.wrapping_add(1).checked_rem(N).unwrap_or(0);
                Ok(Resolution::Hit {
                    index,
                    score: self.score,
                })
            }
        }
    }

    /// Stop the game without a verdict (e.g. an output driver failed).
    /// Returns whether this call did the stopping.
    pub fn end(&mut self) -> bool {
        core::mem::replace(&mut self.running, false)
    }

    /// Copy of the state the output tasks read.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            score: self.score,
            running: self.running,
            tempo_ms: self.tempo.get(),
            active_index: self.active,
            note_index: self.note,
            fall_tick: self.fall_tick,
            sprites: self
                .tiles
                .visible_sprites(self.active, self.config.off_screen_row),
        }
    }

    /// Verify active index, tempo floor, and queue order.
    pub fn check_invariants(&self) -> Result<(), GameError> {
        if self.tempo.get() < self.config.min_tempo_ms {
            return Err(GameError::TempoBelowFloor {
                tempo_ms: self.tempo.get(),
                floor_ms: self.config.min_tempo_ms,
            });
        }
        self.tiles.check_order(self.active)
    }
}

impl<const N: usize, R> GameSession<N, R> {
    /// Current score.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Whether the game is still going.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Current fall cadence.
    pub fn tempo(&self) -> Tempo {
        self.tempo
    }

    /// Index of the tile the player must hit next.
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Index of the note the speaker should play.
    pub fn note_index(&self) -> usize {
        self.note
    }

    /// Fall counter.
    pub fn fall_tick(&self) -> u32 {
        self.fall_tick
    }

    /// The tile queue.
    pub fn tiles(&self) -> &TileSequence<N> {
        &self.tiles
    }

    /// Tuning this session was built with.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects
)]
mod tests {
    use super::*;
    use crate::input::PressState;
    use crate::resolver::GameOverCause;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn lane(n: u8) -> Lane {
        Lane::try_new(n).unwrap()
    }

    fn session(lanes: [u8; 4]) -> GameSession<4, SmallRng> {
        GameSession::with_lanes(
            GameConfig::DEFAULT,
            lanes.map(lane),
            SmallRng::seed_from_u64(3),
        )
        .unwrap()
    }

    #[test]
    fn test_new_session_state() {
        let s = GameSession::<50, _>::new(GameConfig::DEFAULT, SmallRng::seed_from_u64(1)).unwrap();
        assert_eq!(s.score(), 0);
        assert!(s.is_running());
        assert_eq!(s.tempo().get(), 200);
        assert_eq!(s.active_index(), 0);
        assert_eq!(s.check_invariants(), Ok(()));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let cfg = GameConfig {
            min_tempo_ms: 0,
            ..GameConfig::DEFAULT
        };
        assert!(GameSession::<4, _>::new(cfg, SmallRng::seed_from_u64(1)).is_err());
    }

    #[test]
    fn test_advance_moves_tiles_and_ramps_tempo() {
        let mut s = session([0, 1, 2, 3]);
        assert_eq!(
            s.advance(),
            FallStep::Advanced {
                tick: 1,
                delay_ms: 199
            }
        );
        assert_eq!(s.tiles().get(0).unwrap().position(), 6);
    }

    #[test]
    fn test_hit_scores_and_recycles() {
        let mut s = session([2, 0, 1, 3]);
        let r = s
            .resolve(&LaneStates::single(lane(2), PressState::Edge))
            .unwrap();
        assert_eq!(r, Resolution::Hit { index: 0, score: 1 });
        assert_eq!(s.active_index(), 1);
        assert_eq!(s.note_index(), 1);
        assert_eq!(s.tiles().get(0).unwrap().position(), s.tiles().top_of_queue() - 2);
        assert_eq!(s.check_invariants(), Ok(()));
    }

    #[test]
    fn test_out_of_order_queue_stops_on_next_fall() {
        let mut s = session([0, 1, 2, 3]);
        // Tile 0 left in place below the new active tile.
        s.active = 1;
        let step = s.advance();
        assert!(
            matches!(step, FallStep::Fault(GameError::QueueOrder { index: 0, position: 6 })),
            "{step:?}"
        );
        assert!(!s.is_running());
        assert_eq!(s.advance(), FallStep::Stopped);
    }

    #[test]
    fn test_hit_that_breaks_order_stops_session() {
        let mut s = session([2, 0, 1, 3]);
        s.active = 1;
        let r = s.resolve(&LaneStates::single(lane(0), PressState::Edge));
        assert!(matches!(r, Err(GameError::QueueOrder { .. })), "{r:?}");
        assert!(!s.is_running());
        assert_eq!(
            s.resolve(&LaneStates::single(lane(0), PressState::Edge)),
            Ok(Resolution::Ended)
        );
    }

    #[test]
    fn test_saturated_queue_faults_on_first_fall() {
        let cfg = GameConfig {
            first_tile_row: i32::MAX - 1,
            tile_row_step: 1,
            ..GameConfig::DEFAULT
        };
        let mut s = GameSession::<4, _>::new(cfg, SmallRng::seed_from_u64(8)).unwrap();
        assert!(matches!(s.advance(), FallStep::Fault(GameError::QueueOrder { .. })));
        assert!(!s.is_running());
    }

    #[test]
    fn test_held_press_scores_once() {
        let mut s = session([2, 2, 2, 2]);
        s.resolve(&LaneStates::single(lane(2), PressState::Edge))
            .unwrap();
        let again = s
            .resolve(&LaneStates::single(lane(2), PressState::Held))
            .unwrap();
        assert_eq!(again, Resolution::Pending);
        assert_eq!(s.score(), 1);
    }

    #[test]
    fn test_game_over_is_idempotent() {
        let mut s = session([1, 1, 1, 1]);
        let r = s
            .resolve(&LaneStates::single(lane(3), PressState::Edge))
            .unwrap();
        assert_eq!(
            r,
            Resolution::GameOver {
                cause: GameOverCause::WrongLanePress,
                score: 0
            }
        );
        let before = s.snapshot();
        for _ in 0..3 {
            assert_eq!(
                s.resolve(&LaneStates::single(lane(1), PressState::Edge))
                    .unwrap(),
                Resolution::Ended
            );
            assert_eq!(s.advance(), FallStep::Stopped);
        }
        assert_eq!(s.snapshot(), before);
    }

    #[test]
    fn test_miss_when_active_tile_crosses_hit_line() {
        let mut s = session([0, 1, 2, 3]);
        for _ in 0..7 {
            s.advance();
        }
        // Row 0: still hittable.
        assert_eq!(s.resolve(&LaneStates::IDLE).unwrap(), Resolution::Pending);
        s.advance();
        assert_eq!(
            s.resolve(&LaneStates::IDLE).unwrap(),
            Resolution::GameOver {
                cause: GameOverCause::MissedWindow,
                score: 0
            }
        );
    }

    #[test]
    fn test_end_reports_first_stop_only() {
        let mut s = session([0, 0, 0, 0]);
        assert!(s.end());
        assert!(!s.end());
        assert!(!s.is_running());
    }

    #[test]
    fn test_snapshot_carries_visible_sprites() {
        let mut s = session([3, 0, 0, 0]);
        s.advance();
        let snap = s.snapshot();
        assert_eq!(snap.sprites.len(), 2);
        assert_eq!(snap.sprites[0].lane, lane(3));
        assert_eq!(snap.note(), Note::G3);
    }
}
