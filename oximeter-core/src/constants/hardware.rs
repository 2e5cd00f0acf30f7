//! Reference Board Wiring
//!
//! Pin numbers of the eHealth shield as seen from the host board. The decoder
//! never touches pins itself; these are for adapter setup code.

/// Interrupt line carrying the display's rising edges.
pub const EDGE_INTERRUPT_LINE: u8 = 6;

/// GPIO numbers of the segment driver lines, in line order A through G.
///
/// A=13, B=12, C=11, D=10, E=9, F=8, G=7.
pub const SEGMENT_LINE_PINS: [u8; 7] = [13, 12, 11, 10, 9, 8, 7];

/// Whether the segment lines on the reference board are active-low.
///
/// A lit segment pulls its line low, so the raw level must be inverted
/// before decoding.
pub const SEGMENT_LINES_ACTIVE_LOW: bool = true;
