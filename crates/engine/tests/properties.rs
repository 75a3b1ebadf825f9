//! Property-based tests for the session invariants.
//! Random button scripts interleaved with falls must never break the queue.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects,
    clippy::cast_possible_truncation
)]

use engine::{
    FallStep, GameConfig, GameError, InputClassifier, Resolution, SongSession, Tempo,
};
use platform::LANE_COUNT;
use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[derive(Debug, Clone)]
enum Step {
    Fall,
    Sample([bool; LANE_COUNT]),
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        1 => Just(Step::Fall),
        3 => proptest::array::uniform4(proptest::bool::weighted(0.2)).prop_map(Step::Sample),
    ]
}

proptest! {
    /// While running: one active tile, queue strictly ordered, tempo above floor.
    #[test]
    fn invariants_hold_while_running(seed in any::<u64>(), script in proptest::collection::vec(step(), 1..400)) {
        let mut game = SongSession::new(GameConfig::DEFAULT, SmallRng::seed_from_u64(seed)).unwrap();
        let mut classifier = InputClassifier::new();
        let mut last_score = 0;

        for s in script {
            match s {
                Step::Fall => {
                    game.advance();
                }
                Step::Sample(raw) => {
                    let states = classifier.update(raw);
                    game.resolve(&states).unwrap();
                }
            }
            prop_assert!(game.score() >= last_score);
            last_score = game.score();
            if game.is_running() {
                prop_assert_eq!(game.check_invariants(), Ok(()));
            }
        }
    }

    /// Once the game ends, nothing changes any more.
    #[test]
    fn game_over_freezes_everything(seed in any::<u64>(), script in proptest::collection::vec(step(), 1..400)) {
        let mut game = SongSession::new(GameConfig::DEFAULT, SmallRng::seed_from_u64(seed)).unwrap();
        let mut classifier = InputClassifier::new();
        let mut frozen = None;

        for s in script {
            let before = game.snapshot();
            match s {
                Step::Fall => {
                    let step = game.advance();
                    if !before.running {
                        prop_assert_eq!(step, FallStep::Stopped);
                    }
                }
                Step::Sample(raw) => {
                    let r = game.resolve(&classifier.update(raw)).unwrap();
                    if !before.running {
                        prop_assert_eq!(r, Resolution::Ended);
                    }
                }
            }
            if !game.is_running() {
                let snap = game.snapshot();
                match &frozen {
                    None => frozen = Some(snap),
                    Some(f) => prop_assert_eq!(f, &snap),
                }
            }
        }
    }

    /// Each hit adds exactly one and moves the active index by one.
    #[test]
    fn hits_advance_by_one(seed in any::<u64>(), presses in 1usize..120) {
        let mut game = SongSession::new(GameConfig::DEFAULT, SmallRng::seed_from_u64(seed)).unwrap();
        let mut classifier = InputClassifier::new();
        for n in 0..presses {
            let active = game.active_index();
            let target = game.tiles().get(active).unwrap().lane();
            let mut raw = [false; LANE_COUNT];
            raw[target.index()] = true;
            classifier.update([false; LANE_COUNT]);
            let r = game.resolve(&classifier.update(raw)).unwrap();
            prop_assert_eq!(r, Resolution::Hit { index: active, score: n as u32 + 1 });
            prop_assert_eq!(game.active_index(), (active + 1) % engine::SONG_LENGTH);
            let top = game.tiles().top_of_queue();
            let recycled = game.tiles().get(active).unwrap().position();
            prop_assert!(recycled < top && recycled >= top - 2 * GameConfig::DEFAULT.tile_row_step);
        }
    }

    /// The ramp never goes below its floor.
    #[test]
    fn tempo_never_below_floor(start in 20u32..1_000, dec in 0u32..50, steps in 0usize..2_000) {
        let mut t = Tempo::try_new(start, 20).unwrap();
        for _ in 0..steps {
            t = t.ramped(dec);
        }
        prop_assert!(t.get() >= 20);
        prop_assert_eq!(Tempo::try_new(t.get(), 20).map(Tempo::get), Ok::<u32, GameError>(t.get()));
    }
}
