//! Seven-Segment Pattern Decoding
//!
//! ## Overview
//!
//! The pulse-oximeter never reports its value over a data bus. The only way to
//! get at it is to watch the seven lines that drive its LED digits and work out
//! which glyph is being lit. This module turns one snapshot of those lines into
//! a digit, or into [`DecodedDigit::UNREADABLE`] when the snapshot is not one of
//! the ten digit glyphs.
//!
//! ## Line Naming
//!
//! Lines are named after the peripheral's driver outputs, which do not follow
//! the usual a–g clockwise convention:
//!
//! ```text
//!      ─A─
//!     │   │
//!     C   B
//!     │   │
//!      ─D─
//!     │   │
//!     F   E
//!     │   │
//!      ─G─
//! ```
//!
//! ## Exact Matching Only
//!
//! A snapshot taken while the display is switching digit slots often shows a
//! glyph with a segment missing or an extra one lit. Those are not "close to"
//! any digit; they are garbage. There is no nearest-neighbour matching: all
//! off, all on minus one, and every other non-glyph pattern decode as
//! unreadable.

use crate::digit::DecodedDigit;

/// One of the seven segment driver lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum SegmentLine {
    /// Top bar
    A = 0,
    /// Upper right
    B = 1,
    /// Upper left
    C = 2,
    /// Middle bar
    D = 3,
    /// Lower right
    E = 4,
    /// Lower left
    F = 5,
    /// Bottom bar
    G = 6,
}

impl SegmentLine {
    /// All lines in wiring order
    pub const ALL: [SegmentLine; 7] = [
        SegmentLine::A,
        SegmentLine::B,
        SegmentLine::C,
        SegmentLine::D,
        SegmentLine::E,
        SegmentLine::F,
        SegmentLine::G,
    ];

    /// Bit of this line in [`SegmentState::bits`]
    pub const fn mask(self) -> u8 {
        1 << self as u8
    }

    /// Single-letter name of the line
    pub const fn name(self) -> &'static str {
        match self {
            SegmentLine::A => "A",
            SegmentLine::B => "B",
            SegmentLine::C => "C",
            SegmentLine::D => "D",
            SegmentLine::E => "E",
            SegmentLine::F => "F",
            SegmentLine::G => "G",
        }
    }
}

/// Lit-line masks of the digit glyphs, indexed by digit
///
/// Bit N is line N of [`SegmentLine::ALL`], i.e. `0bGFEDCBA`.
const GLYPHS: [u8; 10] = [
    0b111_0111, // 0: A B C E F G
    0b001_0010, // 1: B E
    0b110_1011, // 2: A B D F G
    0b101_1011, // 3: A B D E G
    0b001_1110, // 4: B C D E
    0b101_1101, // 5: A C D E G
    0b111_1101, // 6: A C D E F G
    0b001_0011, // 7: A B E
    0b111_1111, // 8: all lines
    0b101_1111, // 9: A B C D E G
];

/// Mask covering all seven lines
const ALL_LINES: u8 = 0b111_1111;

/// Instantaneous state of the seven segment lines for one digit slot
///
/// `true` means the segment is lit. Polarity of the physical line has
/// already been normalized by the bus adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SegmentState {
    /// Line A, top bar
    pub a: bool,
    /// Line B, upper right
    pub b: bool,
    /// Line C, upper left
    pub c: bool,
    /// Line D, middle bar
    pub d: bool,
    /// Line E, lower right
    pub e: bool,
    /// Line F, lower left
    pub f: bool,
    /// Line G, bottom bar
    pub g: bool,
}

impl SegmentState {
    /// All segments dark
    pub const DARK: SegmentState = SegmentState::from_bits(0);

    /// Build a state from a `0bGFEDCBA` mask. Bit 7 is ignored.
    pub const fn from_bits(bits: u8) -> Self {
        Self {
            a: bits & SegmentLine::A.mask() != 0,
            b: bits & SegmentLine::B.mask() != 0,
            c: bits & SegmentLine::C.mask() != 0,
            d: bits & SegmentLine::D.mask() != 0,
            e: bits & SegmentLine::E.mask() != 0,
            f: bits & SegmentLine::F.mask() != 0,
            g: bits & SegmentLine::G.mask() != 0,
        }
    }

    /// Pack the state into a `0bGFEDCBA` mask
    pub const fn bits(&self) -> u8 {
        (self.a as u8)
            | (self.b as u8) << 1
            | (self.c as u8) << 2
            | (self.d as u8) << 3
            | (self.e as u8) << 4
            | (self.f as u8) << 5
            | (self.g as u8) << 6
    }

    /// Whether the given line is lit
    pub const fn is_lit(&self, line: SegmentLine) -> bool {
        self.bits() & line.mask() != 0
    }

    /// Copy of this state with one line set
    pub const fn with_line(self, line: SegmentLine, lit: bool) -> Self {
        let bits = if lit {
            self.bits() | line.mask()
        } else {
            self.bits() & !line.mask()
        };
        Self::from_bits(bits)
    }
}

/// Decode one segment snapshot into a digit
///
/// Returns the digit whose glyph matches `state` exactly, or
/// [`DecodedDigit::UNREADABLE`] when no glyph does.
pub const fn decode_segments(state: SegmentState) -> DecodedDigit {
    let bits = state.bits();
    let mut digit = 0;
    while digit < GLYPHS.len() {
        if GLYPHS[digit] == bits {
            return DecodedDigit::from_index(digit as u8);
        }
        digit += 1;
    }
    DecodedDigit::UNREADABLE
}

/// Canonical segment state lighting `digit`
///
/// Inverse of [`decode_segments`] for digits 0–9. Returns `None` for any
/// larger value. Used to build display fixtures and simulators.
pub const fn encode_digit(digit: u8) -> Option<SegmentState> {
    if digit as usize >= GLYPHS.len() {
        return None;
    }
    Some(SegmentState::from_bits(GLYPHS[digit as usize] & ALL_LINES))
}

/// Canonical segment state for a decoded digit
///
/// Unreadable digits map to a dark slot, which decodes back to unreadable.
pub const fn encode_decoded(digit: DecodedDigit) -> SegmentState {
    match digit.value() {
        Some(value) => match encode_digit(value) {
            Some(state) => state,
            None => SegmentState::DARK,
        },
        None => SegmentState::DARK,
    }
}
