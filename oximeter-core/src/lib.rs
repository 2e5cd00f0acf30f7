//! Decoding engine for pulse-oximeter seven-segment displays
//!
//! Reads the heart rate off a commercial pulse oximeter by sampling the
//! segment lines that drive its multiplexed display. No vendor protocol,
//! no camera: seven GPIO inputs, an edge interrupt, and a table of known
//! display layouts.
//!
//! Key constraints:
//! - `no_std`, no heap; everything fits in a few hundred bytes of RAM
//! - Runs from an interrupt handler; the consumer side never blocks
//! - An unreadable digit is never mistaken for a zero
//!
//! ```no_run
//! use oximeter_core::{DisplayDecoder, NoDelay, ReadingSlot, SegmentBus, SegmentState, BusFault};
//!
//! # struct Lines;
//! # impl SegmentBus for Lines {
//! #     fn read_segments(&mut self) -> Result<SegmentState, BusFault> { Ok(SegmentState::DARK) }
//! # }
//! static LATEST: ReadingSlot = ReadingSlot::new();
//!
//! let mut decoder = DisplayDecoder::new(Lines, NoDelay, &LATEST);
//!
//! // From the edge interrupt
//! let _ = decoder.on_edge_event();
//!
//! // From anywhere else
//! match LATEST.load().heart_rate() {
//!     Some(_bpm) => {}, // Displayed value
//!     None => {},      // Display blank or mid-transition
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod macros;

pub mod constants;
pub mod cycle;
pub mod decoder;
pub mod digit;
pub mod errors;
pub mod gate;
pub mod layout;
pub mod reading;
pub mod scanner;
pub mod segment;
pub mod traits;

#[cfg(feature = "hal")]
pub mod hal;

// Public API
pub use cycle::SampleCycle;
pub use decoder::DisplayDecoder;
pub use digit::{compose_digits, DecodedDigit};
pub use errors::{LayoutError, LayoutResult, ScanError, ScanResult};
pub use gate::PeriodicRefreshGate;
pub use layout::{CandidateLayout, DisplayLayout, LayoutResolver, Probe, ResolvedDisplay};
pub use reading::{Reading, ReadingSlot};
pub use scanner::SamplingCycleScanner;
pub use segment::{decode_segments, encode_digit, SegmentLine, SegmentState};
pub use traits::{BusFault, EdgeSource, NoDelay, SegmentBus, SettleDelay};

#[cfg(feature = "hal")]
pub use hal::{GpioSegmentBus, HalSettleDelay, Polarity};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
