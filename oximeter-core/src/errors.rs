//! Error Types for Display Decoding Infrastructure
//!
//! ## Design Philosophy
//!
//! A garbled digit is *not* an error here. An unreadable segment pattern is an
//! expected, everyday outcome and travels as data
//! ([`DecodedDigit::UNREADABLE`](crate::DecodedDigit::UNREADABLE), an invalid
//! composed value). Nothing in the decoding path returns `Err` because the
//! display showed something odd.
//!
//! What *can* fail is the plumbing around the decoder:
//!
//! 1. **Bus faults** ([`ScanError`]): a segment line could not be read. The
//!    pass is abandoned and the cached reading keeps its previous value.
//!
//! 2. **Configuration faults** ([`LayoutError`]): a custom layout table points
//!    at a sample position that a pass never visits, uses an id that does not
//!    fit the cached reading, or holds more candidates than the resolver has
//!    room for.
//!
//! Both enums follow the same rules as the rest of the crate's embedded code:
//! `Copy`, inline data only, `&'static str` for messages, no heap.
//!
//! ## Error Handling Strategy
//!
//! ```rust
//! use oximeter_core::{ScanError, SegmentLine};
//!
//! fn on_scan_failure(err: ScanError) {
//!     match err {
//!         ScanError::LineUnreadable { line: SegmentLine::A, .. } => {
//!             // Check the top-bar wire
//!         }
//!         ScanError::LineUnreadable { .. } => {
//!             // Transient GPIO fault, the next pass will retry
//!         }
//!         ScanError::BusUnavailable { .. } => {
//!             // Peripheral not powered or not initialized
//!         }
//!     }
//! }
//! ```

use thiserror_no_std::Error;

use crate::traits::BusFault;
use crate::segment::SegmentLine;

/// Result type for scan operations
pub type ScanResult<T> = Result<T, ScanError>;

/// Result type for layout table construction
pub type LayoutResult<T> = Result<T, LayoutError>;

/// Failures while reading the segment bus during a pass
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanError {
    /// One segment line could not be sampled
    #[error("Segment line {} unreadable at sample position {position}", .line.name())]
    LineUnreadable {
        /// Line that failed
        line: SegmentLine,
        /// Sample position the pass had reached
        position: u16,
    },

    /// The bus as a whole could not be accessed
    #[error("Segment bus unavailable at sample position {position}: {reason}")]
    BusUnavailable {
        /// Why the adapter gave up
        reason: &'static str,
        /// Sample position the pass had reached
        position: u16,
    },
}

impl ScanError {
    /// Attach the sample position to a fault reported by the bus adapter
    pub fn from_fault(fault: BusFault, position: usize) -> Self {
        let position = u16::try_from(position).unwrap_or(u16::MAX);
        match fault {
            BusFault::Line(line) => ScanError::LineUnreadable { line, position },
            BusFault::Unavailable(reason) => ScanError::BusUnavailable { reason, position },
        }
    }

    /// Sample position at which the pass stopped
    pub fn position(&self) -> u16 {
        match self {
            ScanError::LineUnreadable { position, .. }
            | ScanError::BusUnavailable { position, .. } => *position,
        }
    }
}

/// Invalid custom layout tables
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutError {
    /// A probe or field position lies outside the sampling cycle
    #[error("Layout {layout} uses position {position}, cycle has {cycle_len}")]
    PositionOutOfRange {
        /// Id of the offending layout
        layout: u8,
        /// Position that does not exist
        position: usize,
        /// Number of positions in a pass
        cycle_len: usize,
    },

    /// Layout id too large to be reported with readings
    #[error("Layout id {id} exceeds maximum {max}")]
    InvalidId {
        /// Offending id
        id: u8,
        /// Largest id allowed
        max: u8,
    },

    /// More candidates than the resolver can store
    #[error("Too many candidate layouts: capacity is {capacity}")]
    TooManyCandidates {
        /// Maximum number of candidates
        capacity: usize,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for ScanError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::LineUnreadable { line, position } =>
                defmt::write!(fmt, "Line {} unreadable at {}", line.name(), position),
            Self::BusUnavailable { reason, position } =>
                defmt::write!(fmt, "Bus unavailable at {}: {}", position, reason),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for LayoutError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::PositionOutOfRange { layout, position, cycle_len } =>
                defmt::write!(fmt, "Layout {} position {} outside {}", layout, position, cycle_len),
            Self::InvalidId { id, max } =>
                defmt::write!(fmt, "Layout id {} above {}", id, max),
            Self::TooManyCandidates { capacity } =>
                defmt::write!(fmt, "Candidate capacity {} exceeded", capacity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fault_carries_position() {
        let err = ScanError::from_fault(BusFault::Line(SegmentLine::D), 42);
        assert_eq!(err, ScanError::LineUnreadable { line: SegmentLine::D, position: 42 });
        assert_eq!(err.position(), 42);

        let err = ScanError::from_fault(BusFault::Unavailable("powered down"), 70_000);
        assert_eq!(err.position(), u16::MAX);
    }

    #[cfg(feature = "std")]
    #[test]
    fn messages_name_the_line() {
        let err = ScanError::LineUnreadable { line: SegmentLine::G, position: 7 };
        assert_eq!(err.to_string(), "Segment line G unreadable at sample position 7");
    }
}
