//! Cached Display Reading
//!
//! ## Overview
//!
//! The decoder runs from the edge interrupt; the code that wants the value
//! (a polling loop that also samples other channels) runs whenever it likes.
//! They meet at a single [`ReadingSlot`]: a completed pass stores a whole
//! [`Reading`], and readers always get the most recently stored one. Between
//! passes the last value stays put (stale but valid).
//!
//! ## No Torn Reads
//!
//! A reader must never see the heart-rate digits of one pass next to the
//! saturation digits of another. The slot therefore packs the complete
//! reading into one 32-bit word and replaces it with a single atomic
//! compare-exchange. No lock is needed: loads of an aligned word are
//! indivisible, and concurrent stores retry until their generation bump
//! lands on top of the latest word.
//!
//! ```text
//! bit  31      24 23   20 19  16 15  12 11   8 7    4 3    0
//!     ┌──────────┬───────┬──────┬──────┬──────┬──────┬──────┐
//!     │generation│layout │SpO2 1│SpO2 0│ HR 2 │ HR 1 │ HR 0 │
//!     └──────────┴───────┴──────┴──────┴──────┴──────┴──────┘
//!      HR 0 / SpO2 0 are the most significant digits; 0xF = unreadable
//!      or, for the layout, "no pass yet"
//! ```
//!
//! The composed heart rate is not stored; it is recomputed from the digits
//! on load, so it can never disagree with them.
//!
//! ## Freshness
//!
//! The generation counter in the top byte increments with every store.
//! [`ReadingSlot::poll_newer`] uses it to report `WouldBlock` until a pass
//! newer than the last one seen has completed. The counter wraps after 256
//! stores; a reader that sleeps through exactly a multiple of 256 passes
//! will not notice them, which is harmless for a value that is read at
//! human rates.

use core::convert::Infallible;
use core::fmt;
use core::sync::atomic::{AtomicU32, Ordering};

use crate::constants::{HEART_RATE_DIGITS, MAX_LAYOUT_ID, SPO2_DIGITS};
use crate::digit::{compose_digits, DecodedDigit};
use crate::errors::{LayoutError, LayoutResult};
use crate::layout::ResolvedDisplay;

/// Nibble marking "no layout" in the packed word
const NO_LAYOUT: u8 = 0x0F;

const _: () = assert!(MAX_LAYOUT_ID < NO_LAYOUT, "Layout ids must fit below the no-layout nibble");

/// Result of one completed pass as seen by consumers
///
/// Keeps the individual heart-rate digits next to the composed value, so a
/// consumer can tell *which* digit failed when the composed value is
/// invalid.
///
/// Deserialization goes through [`Reading::new`]: the composed heart rate is
/// recomputed from the digits and out-of-range layout ids are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawReading"))]
pub struct Reading {
    heart_rate_digits: [DecodedDigit; HEART_RATE_DIGITS],
    heart_rate: Option<u32>,
    spo2_digits: [DecodedDigit; SPO2_DIGITS],
    layout_id: Option<u8>,
}

impl Reading {
    /// Value held before the first completed pass. Nothing is readable and
    /// the heart rate is invalid, never 0.
    pub const UNREAD: Reading = Reading {
        heart_rate_digits: [DecodedDigit::UNREADABLE; HEART_RATE_DIGITS],
        heart_rate: None,
        spo2_digits: [DecodedDigit::UNREADABLE; SPO2_DIGITS],
        layout_id: None,
    };

    /// Build a reading; the composed heart rate is derived from the digits.
    ///
    /// Fails with [`LayoutError::InvalidId`] for layout ids above
    /// [`MAX_LAYOUT_ID`], which the slot could not carry.
    pub fn new(
        heart_rate_digits: [DecodedDigit; HEART_RATE_DIGITS],
        spo2_digits: [DecodedDigit; SPO2_DIGITS],
        layout_id: Option<u8>,
    ) -> LayoutResult<Self> {
        match layout_id {
            Some(id) if id > MAX_LAYOUT_ID => Err(LayoutError::InvalidId { id, max: MAX_LAYOUT_ID }),
            _ => Ok(Self::assemble(heart_rate_digits, spo2_digits, layout_id)),
        }
    }

    /// Reading for the groups a resolver extracted from one pass
    ///
    /// Resolvers only hold layouts with valid ids, so this cannot fail.
    pub fn from_resolved(resolved: &ResolvedDisplay) -> Self {
        Self::assemble(resolved.heart_rate, resolved.spo2, Some(resolved.layout_id))
    }

    /// Callers guarantee `layout_id <= MAX_LAYOUT_ID`
    fn assemble(
        heart_rate_digits: [DecodedDigit; HEART_RATE_DIGITS],
        spo2_digits: [DecodedDigit; SPO2_DIGITS],
        layout_id: Option<u8>,
    ) -> Self {
        Self {
            heart_rate_digits,
            heart_rate: compose_digits(&heart_rate_digits),
            spo2_digits,
            layout_id,
        }
    }

    /// Heart rate in beats per minute, `None` if any digit was unreadable
    pub fn heart_rate(&self) -> Option<u32> {
        self.heart_rate
    }

    /// Heart-rate digits, most significant first
    pub fn heart_rate_digits(&self) -> [DecodedDigit; HEART_RATE_DIGITS] {
        self.heart_rate_digits
    }

    /// Oxygen-saturation digits, most significant first, uncomposed
    pub fn spo2_digits(&self) -> [DecodedDigit; SPO2_DIGITS] {
        self.spo2_digits
    }

    /// Layout applied to the pass, `None` before the first pass
    pub fn layout_id(&self) -> Option<u8> {
        self.layout_id
    }

    /// Whether a pass has completed since start-up
    pub fn is_scanned(&self) -> bool {
        self.layout_id.is_some()
    }

    const fn pack(&self, generation: u8) -> u32 {
        let mut word = 0u32;
        let mut i = 0;
        while i < HEART_RATE_DIGITS {
            word |= (self.heart_rate_digits[i].to_nibble() as u32) << (4 * i);
            i += 1;
        }
        let mut i = 0;
        while i < SPO2_DIGITS {
            word |= (self.spo2_digits[i].to_nibble() as u32) << (4 * (HEART_RATE_DIGITS + i));
            i += 1;
        }
        let layout = match self.layout_id {
            Some(id) => id,
            None => NO_LAYOUT,
        };
        word |= (layout as u32 & 0x0F) << 20;
        word | (generation as u32) << 24
    }

    fn unpack(word: u32) -> Self {
        let nibble = |shift: usize| ((word >> shift) & 0x0F) as u8;

        let heart_rate_digits: [DecodedDigit; HEART_RATE_DIGITS] =
            core::array::from_fn(|i| DecodedDigit::from_nibble(nibble(4 * i)));
        let spo2_digits: [DecodedDigit; SPO2_DIGITS] = core::array::from_fn(|i| {
            DecodedDigit::from_nibble(nibble(4 * (HEART_RATE_DIGITS + i)))
        });
        // Every nibble below NO_LAYOUT is a valid id
        let layout = nibble(20);
        let layout_id = if layout == NO_LAYOUT { None } else { Some(layout) };

        Self::assemble(heart_rate_digits, spo2_digits, layout_id)
    }
}

/// Wire form of [`Reading`]; any serialized `heart_rate` is ignored
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawReading {
    heart_rate_digits: [DecodedDigit; HEART_RATE_DIGITS],
    spo2_digits: [DecodedDigit; SPO2_DIGITS],
    layout_id: Option<u8>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawReading> for Reading {
    type Error = LayoutError;

    fn try_from(raw: RawReading) -> LayoutResult<Self> {
        Reading::new(raw.heart_rate_digits, raw.spo2_digits, raw.layout_id)
    }
}

impl Default for Reading {
    fn default() -> Self {
        Self::UNREAD
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [h2, h1, h0] = self.heart_rate_digits;
        let [s1, s0] = self.spo2_digits;
        write!(f, "heart rate {}{}{}", h2, h1, h0)?;
        match self.heart_rate {
            Some(bpm) => write!(f, " ({} bpm)", bpm)?,
            None => f.write_str(" (invalid)")?,
        }
        write!(f, ", SpO2 {}{}", s1, s0)?;
        match self.layout_id {
            Some(id) => write!(f, ", layout {}", id),
            None => f.write_str(", no scan yet"),
        }
    }
}

/// Process-wide home of the latest reading
///
/// Meant to live in a `static` so the interrupt side and the polling side
/// can both reach it:
///
/// ```rust
/// use oximeter_core::{Reading, ReadingSlot};
///
/// static LATEST: ReadingSlot = ReadingSlot::new();
///
/// // Polling side: never blocks, never triggers a pass
/// let reading = LATEST.load();
/// assert_eq!(reading, Reading::UNREAD);
/// assert_eq!(reading.heart_rate(), None);
/// ```
///
/// Several writers may share a slot; every store bumps the generation.
pub struct ReadingSlot {
    word: AtomicU32,
}

impl ReadingSlot {
    /// Slot holding [`Reading::UNREAD`] at generation 0
    pub const fn new() -> Self {
        Self {
            word: AtomicU32::new(Reading::UNREAD.pack(0)),
        }
    }

    /// Replace the stored reading as a whole and bump the generation
    pub fn store(&self, reading: &Reading) {
        let mut current = self.word.load(Ordering::Relaxed);
        loop {
            let generation = ((current >> 24) as u8).wrapping_add(1);
            match self.word.compare_exchange_weak(
                current,
                reading.pack(generation),
                Ordering::Release,
                Ordering::Relaxed,
            ) {
                Ok(_) => break,
                Err(actual) => current = actual,
            }
        }
    }

    /// Latest stored reading
    pub fn load(&self) -> Reading {
        Reading::unpack(self.word.load(Ordering::Acquire))
    }

    /// Number of stores so far, modulo 256
    pub fn generation(&self) -> u8 {
        (self.word.load(Ordering::Acquire) >> 24) as u8
    }

    /// Latest reading if it is newer than `seen`, updating `seen`
    ///
    /// Start with `seen = 0` to wait for the first completed pass.
    pub fn poll_newer(&self, seen: &mut u8) -> nb::Result<Reading, Infallible> {
        let word = self.word.load(Ordering::Acquire);
        let generation = (word >> 24) as u8;
        if generation == *seen {
            return Err(nb::Error::WouldBlock);
        }
        *seen = generation;
        Ok(Reading::unpack(word))
    }
}

impl Default for ReadingSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ReadingSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadingSlot")
            .field("generation", &self.generation())
            .field("reading", &self.load())
            .finish()
    }
}
