//! Common test utilities for integration tests
//!
//! This module provides:
//! - `DisplayFrame`, one pass worth of segment snapshots built digit by digit
//! - `ScriptedDisplay`, a segment bus replaying frames with optional faults
//! - `EdgeTrain`, an edge source with a fixed number of pending edges

#![allow(dead_code)]

use core::convert::Infallible;

use oximeter_core::{
    constants::SAMPLES_PER_CYCLE,
    decode_segments, encode_digit, BusFault, DisplayLayout, EdgeSource, SampleCycle, SegmentBus,
    SegmentLine, SegmentState,
};

pub mod scenarios;

/// What the segment lines show at each position of one pass
#[derive(Clone)]
pub struct DisplayFrame {
    states: [SegmentState; SAMPLES_PER_CYCLE],
}

impl DisplayFrame {
    /// Every position dark
    pub fn dark() -> Self {
        Self {
            states: [SegmentState::DARK; SAMPLES_PER_CYCLE],
        }
    }

    /// Show `value` (0-9) at `position`
    pub fn digit(mut self, position: usize, value: u8) -> Self {
        self.states[position] = encode_digit(value).expect("digit out of range");
        self
    }

    /// Show an arbitrary segment pattern at `position`
    pub fn raw(mut self, position: usize, state: SegmentState) -> Self {
        self.states[position] = state;
        self
    }

    /// Write `value` into the heart-rate positions of `layout`, zero padded
    pub fn heart_rate(self, layout: &DisplayLayout, value: u32) -> Self {
        self.number(&layout.heart_rate, value)
    }

    /// Write `value` into the SpO2 positions of `layout`, zero padded
    pub fn spo2(self, layout: &DisplayLayout, value: u32) -> Self {
        self.number(&layout.spo2, value)
    }

    fn number<const K: usize>(mut self, positions: &[usize; K], value: u32) -> Self {
        let mut rest = value;
        for &position in positions.iter().rev() {
            self = self.digit(position, (rest % 10) as u8);
            rest /= 10;
        }
        assert_eq!(rest, 0, "{value} does not fit in {K} digits");
        self
    }

    pub fn state(&self, position: usize) -> SegmentState {
        self.states[position]
    }

    /// What a scanner would decode from this frame
    pub fn to_cycle(&self) -> SampleCycle {
        let mut cycle = SampleCycle::unreadable();
        for (position, state) in self.states.iter().enumerate() {
            cycle.set(position, decode_segments(*state));
        }
        cycle
    }
}

/// Segment bus replaying one frame per pass
///
/// After the last frame the bus keeps replaying it.
pub struct ScriptedDisplay {
    frames: Vec<DisplayFrame>,
    frame: usize,
    position: usize,
    fault: Option<(usize, usize)>,
    pub reads: usize,
}

impl ScriptedDisplay {
    pub fn new(frames: Vec<DisplayFrame>) -> Self {
        assert!(!frames.is_empty(), "need at least one frame");
        Self {
            frames,
            frame: 0,
            position: 0,
            fault: None,
            reads: 0,
        }
    }

    pub fn showing(frame: DisplayFrame) -> Self {
        Self::new(vec![frame])
    }

    /// Fail the read at `position` of pass `frame`
    pub fn failing_at(mut self, frame: usize, position: usize) -> Self {
        self.fault = Some((frame, position));
        self
    }

    /// Index of the frame the next read comes from
    pub fn current_frame(&self) -> usize {
        self.frame.min(self.frames.len() - 1)
    }
}

impl SegmentBus for ScriptedDisplay {
    fn read_segments(&mut self) -> Result<SegmentState, BusFault> {
        self.reads += 1;

        if self.fault == Some((self.frame, self.position)) {
            // A failed pass restarts at position 0 on the next frame
            self.fault = None;
            self.frame += 1;
            self.position = 0;
            return Err(BusFault::Line(SegmentLine::G));
        }

        let state = self.frames[self.current_frame()].state(self.position);
        self.position += 1;
        if self.position == SAMPLES_PER_CYCLE {
            self.position = 0;
            self.frame += 1;
        }
        Ok(state)
    }
}

/// Edge source with `remaining` edges queued
pub struct EdgeTrain {
    pub remaining: u32,
}

impl EdgeTrain {
    pub fn new(edges: u32) -> Self {
        Self { remaining: edges }
    }
}

impl EdgeSource for EdgeTrain {
    fn poll_edge(&mut self) -> nb::Result<(), Infallible> {
        if self.remaining == 0 {
            return Err(nb::Error::WouldBlock);
        }
        self.remaining -= 1;
        Ok(())
    }
}
