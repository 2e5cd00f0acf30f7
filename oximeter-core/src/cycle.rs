//! One interrogation pass worth of decoded digit slots

use crate::constants::SAMPLES_PER_CYCLE;
use crate::digit::DecodedDigit;

/// Decoded digits for every sample position of one pass
///
/// Position `i` holds what the segment lines showed at the `i`-th read of
/// the pass. Most positions land between digit slots and are unreadable;
/// only a handful carry the displayed fields.
#[derive(Clone, PartialEq, Eq)]
pub struct SampleCycle<const N: usize = SAMPLES_PER_CYCLE> {
    digits: [DecodedDigit; N],
}

impl<const N: usize> SampleCycle<N> {
    /// A cycle in which nothing was readable
    pub const fn unreadable() -> Self {
        Self {
            digits: [DecodedDigit::UNREADABLE; N],
        }
    }

    /// Wrap an already decoded pass
    pub const fn from_digits(digits: [DecodedDigit; N]) -> Self {
        Self { digits }
    }

    /// Number of sample positions
    pub const fn len(&self) -> usize {
        N
    }

    /// Whether the cycle has no positions at all
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Digit at `position`. Positions past the end read as unreadable.
    pub fn get(&self, position: usize) -> DecodedDigit {
        self.digits
            .get(position)
            .copied()
            .unwrap_or(DecodedDigit::UNREADABLE)
    }

    /// Whether `position` holds a real digit
    pub fn is_readable(&self, position: usize) -> bool {
        self.get(position).is_readable()
    }

    /// Store a digit. Writes past the end are ignored.
    pub fn set(&mut self, position: usize, digit: DecodedDigit) {
        if let Some(slot) = self.digits.get_mut(position) {
            *slot = digit;
        }
    }

    /// Look up several positions at once, in the given order
    pub fn pick<const K: usize>(&self, positions: &[usize; K]) -> [DecodedDigit; K] {
        positions.map(|p| self.get(p))
    }

    /// Number of positions holding a real digit
    pub fn readable_count(&self) -> usize {
        self.digits.iter().filter(|d| d.is_readable()).count()
    }

    /// All decoded positions in order
    pub fn as_slice(&self) -> &[DecodedDigit] {
        &self.digits
    }
}

impl<const N: usize> Default for SampleCycle<N> {
    fn default() -> Self {
        Self::unreadable()
    }
}

impl<const N: usize> core::fmt::Debug for SampleCycle<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        // Only readable positions are interesting
        let mut map = f.debug_map();
        for (position, digit) in self.digits.iter().enumerate() {
            if digit.is_readable() {
                map.entry(&position, digit);
            }
        }
        map.finish()
    }
}
