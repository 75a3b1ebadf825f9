//! Hit / miss / wrong-lane decisions.
//!
//! [`judge`] is the pure decision for one cycle; the session applies it.

use crate::input::LaneStates;
use crate::tile::Tile;

/// Why a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GameOverCause {
    /// The active tile crossed the hit line with no button down.
    MissedWindow,
    /// The active tile crossed the hit line while a different lane was down.
    WrongLaneAtExpiry,
    /// A lane other than the active tile's was freshly pressed.
    WrongLanePress,
}

impl GameOverCause {
    /// Short label for logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissedWindow => "missed window",
            Self::WrongLaneAtExpiry => "wrong lane at expiry",
            Self::WrongLanePress => "wrong lane press",
        }
    }
}

/// Decision for one cycle, before it is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Verdict {
    /// Nothing to do yet.
    Wait,
    /// The active tile was hit.
    Hit,
    /// The game is over.
    GameOver(GameOverCause),
}

/// Outcome of one resolver cycle, after it is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Resolution {
    /// No hit and no mistake.
    Pending,
    /// Tile `index` was hit; `score` is the new total.
    Hit {
        /// Index of the tile that was hit (now recycled).
        index: usize,
        /// Score after the hit.
        score: u32,
    },
    /// This cycle ended the game.
    GameOver {
        /// What the player did wrong.
        cause: GameOverCause,
        /// Final score.
        score: u32,
    },
    /// The game had already ended; nothing changed.
    Ended,
}

impl Resolution {
    /// Whether the session is stopped after this cycle.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::GameOver { .. } | Self::Ended)
    }
}

/// Decide what happens to `active` given this cycle's input.
///
/// Mistakes are checked before hits, so a press on the right lane in the
/// same sample as a fresh press on a wrong lane still ends the game.
pub fn judge(active: &Tile, inputs: &LaneStates) -> Verdict {
    if active.is_resolved() {
        return Verdict::Wait;
    }
    let target = active.lane();
    let pressed = inputs.pressed_lane();

    if active.has_expired() {
        return match pressed {
            None => Verdict::GameOver(GameOverCause::MissedWindow),
            Some(lane) if lane != target => Verdict::GameOver(GameOverCause::WrongLaneAtExpiry),
            Some(_) if inputs.edge_outside(target) => {
                Verdict::GameOver(GameOverCause::WrongLanePress)
            }
            Some(_) if inputs.state(target).is_edge() => Verdict::Hit,
            // Held through the hit line without a fresh press.
            Some(_) => Verdict::Wait,
        };
    }
    if inputs.edge_outside(target) {
        return Verdict::GameOver(GameOverCause::WrongLanePress);
    }
    if pressed == Some(target) && inputs.state(target).is_edge() {
        Verdict::Hit
    } else {
        Verdict::Wait
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::input::PressState;
    use platform::Lane;

    fn lane(n: u8) -> Lane {
        Lane::try_new(n).unwrap()
    }

    #[test]
    fn test_edge_on_target_lane_is_hit() {
        let tile = Tile::new(lane(2), 4);
        let inputs = LaneStates::single(lane(2), PressState::Edge);
        assert_eq!(judge(&tile, &inputs), Verdict::Hit);
    }

    #[test]
    fn test_hold_on_target_lane_waits() {
        let tile = Tile::new(lane(2), 4);
        let inputs = LaneStates::single(lane(2), PressState::Held);
        assert_eq!(judge(&tile, &inputs), Verdict::Wait);
    }

    #[test]
    fn test_hit_at_hit_line_row_zero() {
        let tile = Tile::new(lane(0), 0);
        let inputs = LaneStates::single(lane(0), PressState::Edge);
        assert_eq!(judge(&tile, &inputs), Verdict::Hit);
    }

    #[test]
    fn test_expired_without_press_is_miss() {
        let tile = Tile::new(lane(1), -1);
        assert_eq!(
            judge(&tile, &LaneStates::IDLE),
            Verdict::GameOver(GameOverCause::MissedWindow)
        );
    }

    #[test]
    fn test_expired_with_other_lane_held() {
        let tile = Tile::new(lane(1), -1);
        let inputs = LaneStates::single(lane(3), PressState::Held);
        assert_eq!(
            judge(&tile, &inputs),
            Verdict::GameOver(GameOverCause::WrongLaneAtExpiry)
        );
    }

    #[test]
    fn test_expired_with_own_lane_held_waits() {
        let tile = Tile::new(lane(1), -1);
        let inputs = LaneStates::single(lane(1), PressState::Held);
        assert_eq!(judge(&tile, &inputs), Verdict::Wait);
    }

    #[test]
    fn test_expired_hit_by_fresh_press_on_own_lane() {
        let tile = Tile::new(lane(2), -1);
        let inputs = LaneStates::single(lane(2), PressState::Edge);
        assert_eq!(judge(&tile, &inputs), Verdict::Hit);
    }

    #[test]
    fn test_wrong_edge_before_expiry_ends_game() {
        let tile = Tile::new(lane(1), 6);
        let inputs = LaneStates::single(lane(0), PressState::Edge);
        assert_eq!(
            judge(&tile, &inputs),
            Verdict::GameOver(GameOverCause::WrongLanePress)
        );
    }

    #[test]
    fn test_wrong_hold_before_expiry_is_ignored() {
        let tile = Tile::new(lane(1), 6);
        let inputs = LaneStates::single(lane(0), PressState::Held);
        assert_eq!(judge(&tile, &inputs), Verdict::Wait);
    }

    #[test]
    fn test_simultaneous_right_and_wrong_edge_ends_game() {
        let tile = Tile::new(lane(0), 3);
        let inputs = LaneStates::from_states([
            PressState::Edge,
            PressState::Idle,
            PressState::Edge,
            PressState::Idle,
        ]);
        assert_eq!(
            judge(&tile, &inputs),
            Verdict::GameOver(GameOverCause::WrongLanePress)
        );
    }

    #[test]
    fn test_resolution_terminal_flags() {
        assert!(!Resolution::Pending.is_terminal());
        assert!(!Resolution::Hit { index: 0, score: 1 }.is_terminal());
        assert!(Resolution::Ended.is_terminal());
        assert!(Resolution::GameOver {
            cause: GameOverCause::MissedWindow,
            score: 0
        }
        .is_terminal());
    }
}
