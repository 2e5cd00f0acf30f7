//! Display decoder: gate, pass, layout, slot
//!
//! ## Overview
//!
//! [`DisplayDecoder`] owns everything the interrupt side needs and wires the
//! pieces together:
//!
//! ```text
//! rising edge ──► PeriodicRefreshGate ──(every 50th)──► SamplingCycleScanner
//!                                                            │ SampleCycle
//!                                                            ▼
//!  polling loop ◄── ReadingSlot ◄── Reading ◄── LayoutResolver
//! ```
//!
//! The slot is borrowed, not owned, so it can sit in a `static` that the
//! polling side reads without ever touching the decoder. Nothing but a
//! completed pass writes to it.
//!
//! ## Usage
//!
//! ```rust
//! use oximeter_core::{DisplayDecoder, NoDelay, ReadingSlot, SegmentBus, SegmentState, BusFault};
//!
//! struct DarkDisplay;
//!
//! impl SegmentBus for DarkDisplay {
//!     fn read_segments(&mut self) -> Result<SegmentState, BusFault> {
//!         Ok(SegmentState::DARK)
//!     }
//! }
//!
//! static LATEST: ReadingSlot = ReadingSlot::new();
//!
//! let mut decoder = DisplayDecoder::new(DarkDisplay, NoDelay, &LATEST);
//!
//! // Interrupt handler body
//! for _ in 0..50 {
//!     decoder.on_edge_event()?;
//! }
//!
//! // Polling side
//! let reading = LATEST.load();
//! assert!(reading.is_scanned());
//! assert_eq!(reading.heart_rate(), None);
//! # Ok::<(), oximeter_core::ScanError>(())
//! ```

use crate::constants::SAMPLES_PER_CYCLE;
use crate::errors::ScanResult;
use crate::gate::PeriodicRefreshGate;
use crate::layout::LayoutResolver;
use crate::reading::{Reading, ReadingSlot};
use crate::scanner::SamplingCycleScanner;
use crate::traits::{EdgeSource, SegmentBus, SettleDelay};

/// Edge-driven display decoder publishing into a [`ReadingSlot`]
pub struct DisplayDecoder<'a, B, D, const N: usize = SAMPLES_PER_CYCLE> {
    gate: PeriodicRefreshGate,
    scanner: SamplingCycleScanner<B, D, N>,
    resolver: LayoutResolver<N>,
    slot: &'a ReadingSlot,
}

impl<'a, B, D> DisplayDecoder<'a, B, D>
where
    B: SegmentBus,
    D: SettleDelay,
{
    /// Decoder with the built-in layout table and refresh threshold
    pub fn new(bus: B, delay: D, slot: &'a ReadingSlot) -> Self {
        Self::from_parts(
            PeriodicRefreshGate::default(),
            SamplingCycleScanner::new(bus, delay),
            LayoutResolver::default(),
            slot,
        )
    }
}

impl<'a, B, D, const N: usize> DisplayDecoder<'a, B, D, N>
where
    B: SegmentBus,
    D: SettleDelay,
{
    /// Decoder from individually configured components
    pub fn from_parts(
        gate: PeriodicRefreshGate,
        scanner: SamplingCycleScanner<B, D, N>,
        resolver: LayoutResolver<N>,
        slot: &'a ReadingSlot,
    ) -> Self {
        Self {
            gate,
            scanner,
            resolver,
            slot,
        }
    }

    /// Handle one rising edge
    ///
    /// Runs a pass when the gate fires and returns the new reading. On a bus
    /// fault the slot keeps its previous reading and the error is returned;
    /// the gate has already been reset, so the next attempt comes after
    /// another full threshold of edges.
    pub fn on_edge_event(&mut self) -> ScanResult<Option<Reading>> {
        if !self.gate.on_edge() {
            return Ok(None);
        }

        log_trace!("refresh gate fired after {} edges", self.gate.threshold());
        self.refresh().map(Some)
    }

    /// Consume every pending edge from `edges`
    ///
    /// Returns the number of passes that ran. Stops at the first bus fault.
    pub fn pump_edges<E: EdgeSource>(&mut self, edges: &mut E) -> ScanResult<usize> {
        let mut passes = 0;
        while edges.poll_edge().is_ok() {
            if self.on_edge_event()?.is_some() {
                passes += 1;
            }
        }
        Ok(passes)
    }

    /// Run a pass now, bypassing the gate, and publish the result
    pub fn refresh(&mut self) -> ScanResult<Reading> {
        let cycle = self.scanner.scan().map_err(|err| {
            log_warn!("display pass aborted at sample position {}", err.position());
            err
        })?;

        let resolved = self.resolver.resolve(&cycle);
        let reading = Reading::from_resolved(&resolved);
        self.slot.store(&reading);

        log_debug!(
            "display pass complete: layout {}, heart rate digits {}{}{}",
            resolved.layout_id,
            resolved.heart_rate[0],
            resolved.heart_rate[1],
            resolved.heart_rate[2]
        );

        Ok(reading)
    }

    /// Most recently published reading. Never blocks, never starts a pass.
    pub fn current_reading(&self) -> Reading {
        self.slot.load()
    }

    /// The edge-counting gate
    pub fn gate(&self) -> &PeriodicRefreshGate {
        &self.gate
    }

    /// The layout table in use
    pub fn resolver(&self) -> &LayoutResolver<N> {
        &self.resolver
    }

    /// Access the scanner, e.g. to reach the bus between passes
    pub fn scanner_mut(&mut self) -> &mut SamplingCycleScanner<B, D, N> {
        &mut self.scanner
    }
}
