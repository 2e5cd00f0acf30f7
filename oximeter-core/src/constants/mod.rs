//! Constants for the Display Decoder
//!
//! All tuning values live here instead of as magic numbers in the decoding
//! code. None of them is runtime-configurable; components take them through
//! their `Default` impls and accept overrides through constructors for tests
//! and other boards.
//!
//! ## Organization
//!
//! - **Display**: sampling cycle length, settle delay, refresh threshold
//! - **Hardware**: reference board pin numbers and line polarity
//! - **Layouts**: the ordered candidate layout table

/// Sampling cycle sizing and timing.
pub mod display;

/// Reference board wiring.
pub mod hardware;

/// Candidate layout table and the fallback layout.
pub mod layouts;

pub use display::{
    SAMPLES_PER_CYCLE, SETTLE_DELAY_US, REFRESH_THRESHOLD,
    HEART_RATE_DIGITS, SPO2_DIGITS, MAX_CANDIDATE_LAYOUTS, MAX_LAYOUT_ID,
};

pub use hardware::{EDGE_INTERRUPT_LINE, SEGMENT_LINE_PINS, SEGMENT_LINES_ACTIVE_LOW};

pub use layouts::{CANDIDATE_LAYOUTS, FALLBACK_LAYOUT};

// The built-in table must fit the resolver and the sampling cycle.
const _: () = assert!(
    CANDIDATE_LAYOUTS.len() <= MAX_CANDIDATE_LAYOUTS,
    "Built-in layout table exceeds resolver capacity"
);

const _: () = assert!(
    crate::layout::table_fits_cycle(&CANDIDATE_LAYOUTS, &FALLBACK_LAYOUT, SAMPLES_PER_CYCLE),
    "Built-in layout table references a position outside the sampling cycle"
);
