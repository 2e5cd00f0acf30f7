//! Edge-count refresh gate
//!
//! The display raises a rising edge far more often than its value can
//! change, and a full interrogation pass blocks for several milliseconds.
//! The gate counts edges and lets one pass through every `threshold` edges.
//!
//! Missed edges are not made up for. If the interrupt drops one, the next
//! pass simply happens one edge later.

use crate::constants::REFRESH_THRESHOLD;

/// Counts edge events and fires once per `threshold` of them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PeriodicRefreshGate {
    threshold: u32,
    count: u32,
}

impl PeriodicRefreshGate {
    /// Gate firing every `threshold` edges. A threshold of 0 is treated as 1.
    pub const fn new(threshold: u32) -> Self {
        Self {
            threshold: if threshold == 0 { 1 } else { threshold },
            count: 0,
        }
    }

    /// Register one edge. Returns `true` when a pass is due; the count is
    /// reset at that point.
    pub fn on_edge(&mut self) -> bool {
        self.count += 1;
        if self.count >= self.threshold {
            self.count = 0;
            true
        } else {
            false
        }
    }

    /// Edges counted since the last firing
    pub const fn pending(&self) -> u32 {
        self.count
    }

    /// Edges needed per firing, at least 1
    pub const fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Drop the edges counted so far
    pub fn reset(&mut self) {
        self.count = 0;
    }
}

impl Default for PeriodicRefreshGate {
    fn default() -> Self {
        Self::new(REFRESH_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_on_fiftieth_edge() {
        let mut gate = PeriodicRefreshGate::new(50);

        let early = (0..49).filter(|_| gate.on_edge()).count();
        assert_eq!(early, 0);
        assert_eq!(gate.pending(), 49);

        assert!(gate.on_edge());
        assert_eq!(gate.pending(), 0);
    }

    #[test]
    fn counter_resets_after_firing() {
        let mut gate = PeriodicRefreshGate::default();
        assert_eq!(gate.threshold(), REFRESH_THRESHOLD);

        let fired = (0..REFRESH_THRESHOLD * 3 + 10).filter(|_| gate.on_edge()).count();
        assert_eq!(fired, 3);
        assert_eq!(gate.pending(), 10);
    }

    #[test]
    fn zero_threshold_fires_every_edge() {
        let mut gate = PeriodicRefreshGate::new(0);
        assert!(gate.on_edge());
        assert!(gate.on_edge());
    }

    #[test]
    fn manual_reset() {
        let mut gate = PeriodicRefreshGate::new(3);
        gate.on_edge();
        gate.on_edge();
        gate.reset();
        assert!(!gate.on_edge());
        assert!(!gate.on_edge());
        assert!(gate.on_edge());
    }
}
