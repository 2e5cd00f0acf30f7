//! Decoded digits and multi-digit composition
//!
//! A digit slot either shows one of 0–9 or it could not be read. These two
//! outcomes are kept apart all the way up: an unreadable slot is never
//! treated as zero, and a number with any unreadable slot is no number at all.

use core::fmt;

/// Sentinel stored for an unreadable slot. Fits in a nibble for packing.
const UNREADABLE_RAW: u8 = 0x0F;

/// Outcome of decoding one digit slot: a value in 0–9 or unreadable
///
/// Stored in one byte. The unreadable sentinel is outside 0–9, so it can
/// never be confused with a real digit.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "Option<u8>", from = "Option<u8>"))]
pub struct DecodedDigit(u8);

impl DecodedDigit {
    /// The slot did not show any digit glyph
    pub const UNREADABLE: DecodedDigit = DecodedDigit(UNREADABLE_RAW);

    /// Wrap a digit value. Returns `None` for anything above 9.
    pub const fn new(value: u8) -> Option<Self> {
        if value <= 9 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Digit value, or unreadable for anything above 9
    pub const fn from_index(value: u8) -> Self {
        match Self::new(value) {
            Some(digit) => digit,
            None => Self::UNREADABLE,
        }
    }

    /// The digit value, `None` when unreadable
    pub const fn value(self) -> Option<u8> {
        if self.0 <= 9 {
            Some(self.0)
        } else {
            None
        }
    }

    /// Whether the slot showed a real digit
    pub const fn is_readable(self) -> bool {
        self.0 <= 9
    }

    /// 4-bit encoding used by the reading slot
    pub(crate) const fn to_nibble(self) -> u8 {
        self.0
    }

    /// Inverse of [`to_nibble`](Self::to_nibble). Out-of-range nibbles are unreadable.
    pub(crate) const fn from_nibble(nibble: u8) -> Self {
        Self::from_index(nibble & 0x0F)
    }
}

impl Default for DecodedDigit {
    fn default() -> Self {
        Self::UNREADABLE
    }
}

impl fmt::Debug for DecodedDigit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            Some(v) => write!(f, "Digit({})", v),
            None => f.write_str("Unreadable"),
        }
    }
}

impl fmt::Display for DecodedDigit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            Some(v) => write!(f, "{}", v),
            None => f.write_str("?"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DecodedDigit {
    fn format(&self, fmt: defmt::Formatter) {
        match self.value() {
            Some(v) => defmt::write!(fmt, "{}", v),
            None => defmt::write!(fmt, "?"),
        }
    }
}

impl From<DecodedDigit> for Option<u8> {
    fn from(digit: DecodedDigit) -> Self {
        digit.value()
    }
}

impl From<Option<u8>> for DecodedDigit {
    fn from(value: Option<u8>) -> Self {
        match value {
            Some(v) => Self::from_index(v),
            None => Self::UNREADABLE,
        }
    }
}

/// Combine digits (most significant first) into one number
///
/// Returns `None` if any digit is unreadable, whatever the others show. A
/// partially garbled number is not a degraded reading, it is no reading.
/// Also returns `None` if the value would not fit in a `u32`, which takes
/// more than nine digits.
pub fn compose_digits(digits: &[DecodedDigit]) -> Option<u32> {
    digits.iter().try_fold(0u32, |acc, digit| {
        let value = digit.value()?;
        acc.checked_mul(10)?.checked_add(u32::from(value))
    })
}
