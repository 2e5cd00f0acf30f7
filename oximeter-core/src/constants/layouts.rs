//! Built-in Display Layout Table
//!
//! The digit slots of the display do not land on the same sample positions
//! across units and firmware revisions. Each candidate below pairs a probe
//! with the positions it implies. Candidates are tried in order and the first
//! satisfied probe wins; [`FALLBACK_LAYOUT`] applies when none is.
//!
//! ```text
//! #  probe readable / unreadable   heart rate (MSB..LSB)   SpO2 (MSB..LSB)
//! 0        142 / 181                 137, 10, 2            142,  59
//! 1        136 /  62                 127, 10, 2            179, 136
//! 2        145 /  62                  50, 10, 2            181, 142
//! 3         53 /  62                  41, 10, 2            179,  53
//! 4        174 / 181                  50, 10, 2            179,  59
//! -        default                    50, 10, 2            179,  59
//! ```
//!
//! The order is significant. Several probes can hold at once and the table
//! is only correct when evaluated top to bottom.

use crate::layout::{CandidateLayout, DisplayLayout, Probe};

/// Candidate layouts in priority order.
pub const CANDIDATE_LAYOUTS: [CandidateLayout; 5] = [
    CandidateLayout::new(Probe::new(142, 181), DisplayLayout::new(0, [137, 10, 2], [142, 59])),
    CandidateLayout::new(Probe::new(136, 62), DisplayLayout::new(1, [127, 10, 2], [179, 136])),
    CandidateLayout::new(Probe::new(145, 62), DisplayLayout::new(2, [50, 10, 2], [181, 142])),
    CandidateLayout::new(Probe::new(53, 62), DisplayLayout::new(3, [41, 10, 2], [179, 53])),
    CandidateLayout::new(Probe::new(174, 181), DisplayLayout::new(4, [50, 10, 2], [179, 59])),
];

/// Layout used when no candidate probe is satisfied.
pub const FALLBACK_LAYOUT: DisplayLayout = DisplayLayout::new(5, [50, 10, 2], [179, 59]);
