//! Mock implementations for testing
//!
//! This module provides mock implementations of all platform traits
//! for use in unit and integration tests. Every mock records what it was
//! asked to do so tests can assert on the history.

#![cfg(any(test, feature = "std"))]

use crate::*;
use core::convert::Infallible;
use std::collections::VecDeque;

/// Mock LED matrix that keeps the current frame and a frame counter.
#[derive(Debug, Default)]
pub struct MockMatrix {
    lanes: [RowMask; LANE_COUNT],
    clear_count: usize,
}

impl MockMatrix {
    /// Create a blank matrix
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows currently lit in `lane`
    pub fn lane(&self, lane: Lane) -> RowMask {
        self.lanes.get(lane.index()).copied().unwrap_or_default()
    }

    /// Whether no LED is lit
    pub fn is_blank(&self) -> bool {
        self.lanes.iter().all(|m| m.is_empty())
    }

    /// Number of `clear()` calls so far
    pub fn clear_count(&self) -> usize {
        self.clear_count
    }
}

impl TileMatrix for MockMatrix {
    type Error = Infallible;

    fn render(&mut self, lane: Lane, rows: RowMask) -> Result<(), Self::Error> {
        if let Some(slot) = self.lanes.get_mut(lane.index()) {
            *slot = slot.union(rows);
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.lanes = [RowMask::EMPTY; LANE_COUNT];
        self.clear_count = self.clear_count.saturating_add(1);
        Ok(())
    }
}

/// Mock score readout
#[derive(Debug, Default)]
pub struct MockScoreDisplay {
    shown: Vec<DisplayScore>,
}

impl MockScoreDisplay {
    /// Create a blank readout
    pub fn new() -> Self {
        Self::default()
    }

    /// Last value shown
    pub fn current(&self) -> Option<DisplayScore> {
        self.shown.last().copied()
    }

    /// Every value shown, oldest first
    pub fn history(&self) -> &[DisplayScore] {
        &self.shown
    }
}

impl ScoreDisplay for MockScoreDisplay {
    type Error = Infallible;

    fn show(&mut self, score: DisplayScore) -> Result<(), Self::Error> {
        self.shown.push(score);
        Ok(())
    }
}

/// Mock speaker
#[derive(Debug, Default)]
pub struct MockSpeaker {
    played: Vec<Tone>,
}

impl MockSpeaker {
    /// Create a silent speaker
    pub fn new() -> Self {
        Self::default()
    }

    /// Tone currently playing (`Rest` before the first call)
    pub fn current(&self) -> Tone {
        self.played.last().copied().unwrap_or_default()
    }

    /// Every tone played, oldest first
    pub fn history(&self) -> &[Tone] {
        &self.played
    }
}

impl ToneOutput for MockSpeaker {
    type Error = Infallible;

    fn play(&mut self, tone: Tone) -> Result<(), Self::Error> {
        self.played.push(tone);
        Ok(())
    }
}

/// Scripted lane buttons.
///
/// Each queued frame gives the raw level of all four lanes; a frame is
/// consumed when lane 0 is read. Once the script runs out every lane reads
/// released.
#[derive(Debug, Default)]
pub struct MockLanes {
    frames: VecDeque<[bool; LANE_COUNT]>,
    current: [bool; LANE_COUNT],
    reads: usize,
}

impl MockLanes {
    /// Create buttons with an empty script
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a frame of raw levels, lane 0 first
    pub fn push_frame(&mut self, frame: [bool; LANE_COUNT]) {
        self.frames.push_back(frame);
    }

    /// Queue a frame where only `lane` is held
    pub fn push_press(&mut self, lane: Lane) {
        let mut frame = [false; LANE_COUNT];
        if let Some(level) = frame.get_mut(lane.index()) {
            *level = true;
        }
        self.push_frame(frame);
    }

    /// Queue a frame with every button released
    pub fn push_idle(&mut self) {
        self.push_frame([false; LANE_COUNT]);
    }

    /// Frames not yet consumed
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }

    /// Total raw reads served
    pub fn reads(&self) -> usize {
        self.reads
    }
}

impl LaneInput for MockLanes {
    type Error = Infallible;

    fn read_raw(&mut self, lane: Lane) -> Result<bool, Self::Error> {
        if lane.index() == 0 {
            self.current = self.frames.pop_front().unwrap_or([false; LANE_COUNT]);
        }
        self.reads = self.reads.saturating_add(1);
        Ok(self.current.get(lane.index()).copied().unwrap_or(false))
    }
}
