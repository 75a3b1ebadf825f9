//! Per-lane press classification.
//!
//! A hit needs a fresh press, so the resolver has to tell the first sample
//! of a press apart from a button that is still held from before.

use platform::{Lane, LaneInput, LANE_COUNT};

/// Classified state of one lane button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressState {
    /// Released.
    #[default]
    Idle,
    /// Pressed on this sample, released on the one before.
    Edge,
    /// Pressed on this sample and the one before.
    Held,
}

impl PressState {
    /// Next state from the raw level and the previous state.
    pub fn classify(raw: bool, previous: PressState) -> Self {
        match (raw, previous) {
            (false, _) => Self::Idle,
            (true, Self::Idle) => Self::Edge,
            (true, Self::Edge | Self::Held) => Self::Held,
        }
    }

    /// Edge or held.
    pub fn is_pressed(self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// First sample of a press.
    pub fn is_edge(self) -> bool {
        matches!(self, Self::Edge)
    }
}

/// One classified sample of every lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LaneStates([PressState; LANE_COUNT]);

impl LaneStates {
    /// Every lane released.
    pub const IDLE: Self = Self([PressState::Idle; LANE_COUNT]);

    /// Build from explicit per-lane states, lane 0 first.
    pub const fn from_states(states: [PressState; LANE_COUNT]) -> Self {
        Self(states)
    }

    /// Only `lane` in `state`, all others idle.
    pub fn single(lane: Lane, state: PressState) -> Self {
        let mut states = [PressState::Idle; LANE_COUNT];
        if let Some(slot) = states.get_mut(lane.index()) {
            *slot = state;
        }
        Self(states)
    }

    /// State of `lane`.
    pub fn state(&self, lane: Lane) -> PressState {
        self.0.get(lane.index()).copied().unwrap_or_default()
    }

    /// The lane the player is pressing.
    ///
    /// When several lanes are down at once the highest-indexed one wins.
    pub fn pressed_lane(&self) -> Option<Lane> {
        Lane::ALL
            .iter()
            .rev()
            .copied()
            .find(|lane| self.state(*lane).is_pressed())
    }

    /// Whether any lane other than `lane` saw a fresh press.
    pub fn edge_outside(&self, lane: Lane) -> bool {
        Lane::ALL
            .iter()
            .any(|other| *other != lane && self.state(*other).is_edge())
    }
}

/// Turns raw lane levels into [`LaneStates`], one sample at a time.
#[derive(Debug, Clone, Default)]
pub struct InputClassifier {
    states: LaneStates,
}

impl InputClassifier {
    /// Start with every lane idle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one raw sample (lane 0 first).
    pub fn update(&mut self, raw: [bool; LANE_COUNT]) -> LaneStates {
        let mut next = [PressState::Idle; LANE_COUNT];
        for ((slot, level), previous) in next.iter_mut().zip(raw).zip(self.states.0) {
            *slot = PressState::classify(level, previous);
        }
        self.states = LaneStates(next);
        self.states
    }

    /// Read every lane once from `input` and classify.
    ///
    /// A lane whose read fails counts as released; `on_error` is told which
    /// lane failed so the caller can log it.
    pub fn sample<I, F>(&mut self, input: &mut I, mut on_error: F) -> LaneStates
    where
        I: LaneInput,
        F: FnMut(Lane, I::Error),
    {
        let raw = Lane::ALL.map(|lane| {
            input.read_raw(lane).unwrap_or_else(|e| {
                on_error(lane, e);
                false
            })
        });
        self.update(raw)
    }

    /// Last classified sample.
    pub fn states(&self) -> LaneStates {
        self.states
    }
}
