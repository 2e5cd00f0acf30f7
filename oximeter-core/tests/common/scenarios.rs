//! Display scenarios, one per known physical layout
//!
//! Each scenario is a frame a real unit of that variant would show, with
//! the heart rate and saturation written where that variant puts them and
//! the probe position lit. Positions claimed by earlier probes are left
//! alone, so each frame selects exactly its own layout.

use oximeter_core::constants::{CANDIDATE_LAYOUTS, FALLBACK_LAYOUT};
use oximeter_core::DisplayLayout;

use super::DisplayFrame;

pub struct DisplayScenario {
    pub frame: DisplayFrame,
    pub layout: DisplayLayout,
    pub used_fallback: bool,
    pub heart_rate: u32,
    pub spo2: u32,
}

/// Frame for candidate `index` of the built-in table
pub fn candidate(index: usize, heart_rate: u32, spo2: u32) -> DisplayScenario {
    let candidate = CANDIDATE_LAYOUTS[index];
    let mut frame = DisplayFrame::dark()
        .heart_rate(&candidate.layout, heart_rate)
        .spo2(&candidate.layout, spo2);

    // Light the probe position unless a field digit already sits there
    if !frame.to_cycle().is_readable(candidate.probe.readable) {
        frame = frame.digit(candidate.probe.readable, 8);
    }

    DisplayScenario {
        frame,
        layout: candidate.layout,
        used_fallback: false,
        heart_rate,
        spo2,
    }
}

/// Frame no probe recognizes
pub fn fallback(heart_rate: u32, spo2: u32) -> DisplayScenario {
    DisplayScenario {
        frame: DisplayFrame::dark()
            .heart_rate(&FALLBACK_LAYOUT, heart_rate)
            .spo2(&FALLBACK_LAYOUT, spo2),
        layout: FALLBACK_LAYOUT,
        used_fallback: true,
        heart_rate,
        spo2,
    }
}

/// One scenario per layout, candidates first
pub fn standard_scenarios() -> Vec<DisplayScenario> {
    let readings = [(72, 98), (130, 95), (58, 99), (101, 93), (45, 97)];

    let mut scenarios: Vec<_> = readings
        .iter()
        .enumerate()
        .map(|(index, &(heart_rate, spo2))| candidate(index, heart_rate, spo2))
        .collect();
    scenarios.push(fallback(88, 96));
    scenarios
}
