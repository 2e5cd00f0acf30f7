//! Hardware-facing traits
//!
//! The decoder never touches a pin or a timer directly. Whatever drives it
//! supplies three things: a way to snapshot the segment lines, a way to wait
//! out the settle interval between snapshots, and a source of edge events.
//! Keep implementations dumb; all interpretation happens in the decoder.

use crate::segment::{SegmentLine, SegmentState};

/// Why a segment bus read failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusFault {
    /// One line could not be sampled
    Line(SegmentLine),
    /// The bus as a whole is not accessible
    Unavailable(&'static str),
}

/// Instantaneous access to the seven segment driver lines
///
/// Implementations must normalize polarity: a lit segment reads as `true`
/// regardless of how the line is driven electrically.
pub trait SegmentBus {
    /// Snapshot all seven lines
    fn read_segments(&mut self) -> Result<SegmentState, BusFault>;
}

/// Blocking wait between two consecutive segment snapshots
pub trait SettleDelay {
    /// Wait for the fixed settle interval
    fn settle(&mut self);
}

/// Source of rising-edge notifications from the display
///
/// Pull-based, in the style of a non-blocking stream: `Ok(())` for each edge
/// that occurred, `WouldBlock` once no edge is pending. Edge sources cannot
/// fail.
pub trait EdgeSource {
    /// Take one pending edge
    fn poll_edge(&mut self) -> nb::Result<(), core::convert::Infallible>;
}

impl<T: SegmentBus + ?Sized> SegmentBus for &mut T {
    fn read_segments(&mut self) -> Result<SegmentState, BusFault> {
        (**self).read_segments()
    }
}

impl<T: SettleDelay + ?Sized> SettleDelay for &mut T {
    fn settle(&mut self) {
        (**self).settle()
    }
}

/// Settle delay that returns immediately
///
/// For replaying recorded passes and for hosts where the bus adapter already
/// paces its reads.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl SettleDelay for NoDelay {
    fn settle(&mut self) {}
}
