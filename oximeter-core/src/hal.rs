//! `embedded-hal` adapters
//!
//! Plug seven GPIO inputs and a HAL delay into the decoder. Polarity is
//! handled here so that everything above sees `true` as "segment lit".
//!
//! ```rust,ignore
//! let bus = GpioSegmentBus::new([a, b, c, d, e, f, g], Polarity::ActiveLow);
//! let delay = HalSettleDelay::new(timer);
//! let mut decoder = DisplayDecoder::new(bus, delay, &LATEST);
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;

use crate::constants::{SEGMENT_LINES_ACTIVE_LOW, SETTLE_DELAY_US};
use crate::segment::{SegmentLine, SegmentState};
use crate::traits::{BusFault, SegmentBus, SettleDelay};

/// Electrical level of a lit segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Line reads high when the segment is lit
    ActiveHigh,
    /// Line reads low when the segment is lit
    ActiveLow,
}

impl Default for Polarity {
    /// Polarity of the reference board
    fn default() -> Self {
        if SEGMENT_LINES_ACTIVE_LOW {
            Polarity::ActiveLow
        } else {
            Polarity::ActiveHigh
        }
    }
}

/// Segment bus over seven input pins, in line order A through G
pub struct GpioSegmentBus<P> {
    lines: [P; 7],
    polarity: Polarity,
}

impl<P: InputPin> GpioSegmentBus<P> {
    /// Bus over `lines` in order A through G
    pub fn new(lines: [P; 7], polarity: Polarity) -> Self {
        Self { lines, polarity }
    }

    /// Give back the pins
    pub fn release(self) -> [P; 7] {
        self.lines
    }
}

impl<P: InputPin> SegmentBus for GpioSegmentBus<P> {
    fn read_segments(&mut self) -> Result<SegmentState, BusFault> {
        let mut bits = 0u8;
        for (line, pin) in SegmentLine::ALL.iter().zip(self.lines.iter_mut()) {
            let lit = match self.polarity {
                Polarity::ActiveHigh => pin.is_high(),
                Polarity::ActiveLow => pin.is_low(),
            }
            .map_err(|_| BusFault::Line(*line))?;

            if lit {
                bits |= line.mask();
            }
        }
        Ok(SegmentState::from_bits(bits))
    }
}

/// Settle delay backed by a HAL timer
pub struct HalSettleDelay<T> {
    timer: T,
    micros: u32,
}

impl<T: DelayNs> HalSettleDelay<T> {
    /// Delay of [`SETTLE_DELAY_US`]
    pub fn new(timer: T) -> Self {
        Self::with_micros(timer, SETTLE_DELAY_US)
    }

    /// Delay of `micros` microseconds
    pub fn with_micros(timer: T, micros: u32) -> Self {
        Self { timer, micros }
    }

    /// Give back the timer
    pub fn release(self) -> T {
        self.timer
    }
}

impl<T: DelayNs> SettleDelay for HalSettleDelay<T> {
    fn settle(&mut self) {
        self.timer.delay_us(self.micros);
    }
}
