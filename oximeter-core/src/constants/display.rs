//! Display Interrogation Constants
//!
//! Timing and sizing of one interrogation pass over the pulse-oximeter's
//! multiplexed seven-segment display.

// ===== SAMPLING CYCLE =====

/// Number of sample positions visited in one interrogation pass.
///
/// The display multiplexes its digits over the same seven driver lines. One
/// pass of this many reads, spaced by [`SETTLE_DELAY_US`], covers a full
/// refresh of every digit slot.
///
/// Source: eHealth pulsioximeter reference routine (199 reads per pass)
pub const SAMPLES_PER_CYCLE: usize = 199;

/// Settling delay between two consecutive position reads (microseconds).
///
/// Matches the multiplexing rate of the display driver. Shorter delays read
/// the same digit slot twice, longer ones skip slots.
///
/// Source: eHealth pulsioximeter reference routine
pub const SETTLE_DELAY_US: u32 = 43;

/// Number of digit positions in the heart-rate field.
pub const HEART_RATE_DIGITS: usize = 3;

/// Number of digit positions in the oxygen-saturation field.
pub const SPO2_DIGITS: usize = 2;

// ===== REFRESH RATE =====

/// Rising edges counted between two full interrogation passes.
///
/// A full pass blocks for roughly `SAMPLES_PER_CYCLE * SETTLE_DELAY_US`
/// (~8.6 ms). Scanning once per 50 edges is still far faster than a human
/// vital-sign display changes.
///
/// Source: eHealth examples (read once per 50 interrupt calls)
pub const REFRESH_THRESHOLD: u32 = 50;

/// Upper bound on the number of candidate layouts a resolver can hold.
///
/// The built-in table uses five; the spare slots are for custom tables.
pub const MAX_CANDIDATE_LAYOUTS: usize = 8;

/// Highest id a layout may carry.
///
/// Readings pack the layout id into four bits, with the top value reserved
/// for "no pass yet".
pub const MAX_LAYOUT_ID: u8 = 14;
