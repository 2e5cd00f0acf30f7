//! Sampling Cycle Scanner
//!
//! ## Overview
//!
//! The display multiplexes its digits over one set of segment lines: at any
//! instant only one digit slot is driven. Reading the lines repeatedly, with
//! a fixed settle interval between reads, walks through every slot of the
//! display. One such walk is an interrogation pass.
//!
//! ```text
//! position:  0     1     2     3    ...   198
//!            │     │     │     │           │
//!            read  read  read  read  ...   read
//!               ╲43µs╱╲43µs╱╲43µs╱
//! ```
//!
//! Each snapshot is decoded on the spot and stored at its position index.
//! The scanner does not interpret the result; which positions mean what is
//! the layout resolver's business.
//!
//! ## Blocking and Exclusivity
//!
//! A pass is synchronous and runs to its fixed length. The lines are shared
//! in time with the display itself, so nothing else may read them while a
//! pass is in progress; `scan` takes `&mut self` and owns the bus for its
//! whole duration.
//!
//! A bus fault aborts the pass. No partial cycle is returned.

use crate::constants::SAMPLES_PER_CYCLE;
use crate::cycle::SampleCycle;
use crate::errors::{ScanError, ScanResult};
use crate::segment::decode_segments;
use crate::traits::{SegmentBus, SettleDelay};

/// Runs interrogation passes over a segment bus
#[derive(Debug)]
pub struct SamplingCycleScanner<B, D, const N: usize = SAMPLES_PER_CYCLE> {
    bus: B,
    delay: D,
}

impl<B, D, const N: usize> SamplingCycleScanner<B, D, N>
where
    B: SegmentBus,
    D: SettleDelay,
{
    /// Scanner reading `bus` and waiting on `delay` between positions
    pub fn new(bus: B, delay: D) -> Self {
        Self { bus, delay }
    }

    /// Perform one full pass of `N` positions
    ///
    /// The settle delay runs between consecutive reads, `N - 1` times in
    /// total.
    pub fn scan(&mut self) -> ScanResult<SampleCycle<N>> {
        let mut cycle = SampleCycle::unreadable();

        for position in 0..N {
            if position > 0 {
                self.delay.settle();
            }

            let state = self
                .bus
                .read_segments()
                .map_err(|fault| ScanError::from_fault(fault, position))?;

            cycle.set(position, decode_segments(state));
        }

        Ok(cycle)
    }

    /// Access the bus between passes
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Give back the bus and delay
    pub fn into_parts(self) -> (B, D) {
        (self.bus, self.delay)
    }
}
