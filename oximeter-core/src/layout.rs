//! Display Layout Resolution
//!
//! ## Overview
//!
//! A pass over the segment lines produces one decoded digit per sample
//! position, but nothing on the bus says which positions belong to which
//! field. Worse, the mapping moves between units and firmware revisions.
//! This module decides which layout a pass came from and pulls the
//! heart-rate triple and oxygen-saturation pair out of it.
//!
//! ## Probes
//!
//! Each candidate layout carries a [`Probe`]: one position that must hold a
//! real digit and one that must be unreadable. The pattern of lit and dark
//! slots at those two positions is characteristic of the layout.
//!
//! ```text
//! pass:      0 . . 2 . . . . . . 10 . . . ... 142 . . . ... 181 . .
//!                                             [7]           [ ? ]
//!                                              │              │
//! probe:                              readable─┘   unreadable─┘
//! ```
//!
//! ## Priority
//!
//! Candidates are evaluated strictly in table order and the first satisfied
//! probe wins, even when a later one would hold as well. The order encodes
//! which layout is more specific; reordering the table changes results.
//! When no probe holds, the fallback layout is used without comment.
//!
//! ## Picking the Wrong Layout
//!
//! A wrong layout does not fail loudly; it yields plausible numbers read
//! from the wrong slots. The resolver therefore never guesses beyond the
//! table, and validity of the extracted groups is left entirely to the
//! caller (see [`compose_digits`](crate::compose_digits)).

use crate::constants::{
    CANDIDATE_LAYOUTS, FALLBACK_LAYOUT, HEART_RATE_DIGITS, MAX_CANDIDATE_LAYOUTS,
    MAX_LAYOUT_ID, SAMPLES_PER_CYCLE, SPO2_DIGITS,
};
use crate::cycle::SampleCycle;
use crate::digit::DecodedDigit;
use crate::errors::{LayoutError, LayoutResult};

/// Readability condition that identifies a layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Probe {
    /// Position that must hold a real digit
    pub readable: usize,
    /// Position that must be unreadable
    pub unreadable: usize,
}

impl Probe {
    /// Probe expecting a digit at `readable` and nothing at `unreadable`
    pub const fn new(readable: usize, unreadable: usize) -> Self {
        Self { readable, unreadable }
    }

    /// Whether this probe holds for `cycle`
    pub fn holds<const N: usize>(&self, cycle: &SampleCycle<N>) -> bool {
        cycle.is_readable(self.readable) && !cycle.is_readable(self.unreadable)
    }
}

/// Sample positions of the displayed fields for one physical variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplayLayout {
    /// Identifier reported with readings
    pub id: u8,
    /// Heart-rate digit positions, most significant first
    pub heart_rate: [usize; HEART_RATE_DIGITS],
    /// Oxygen-saturation digit positions, most significant first
    pub spo2: [usize; SPO2_DIGITS],
}

impl DisplayLayout {
    /// Layout `id` with its heart-rate and SpO2 positions
    pub const fn new(
        id: u8,
        heart_rate: [usize; HEART_RATE_DIGITS],
        spo2: [usize; SPO2_DIGITS],
    ) -> Self {
        Self { id, heart_rate, spo2 }
    }

    /// Check the id and every position against a cycle of `len` positions
    fn validate(&self, len: usize) -> LayoutResult<()> {
        if self.id > MAX_LAYOUT_ID {
            return Err(LayoutError::InvalidId { id: self.id, max: MAX_LAYOUT_ID });
        }
        match self.position_outside(len) {
            Some(position) => Err(LayoutError::PositionOutOfRange {
                layout: self.id,
                position,
                cycle_len: len,
            }),
            None => Ok(()),
        }
    }

    /// First position of this layout not inside a cycle of `len` positions
    const fn position_outside(&self, len: usize) -> Option<usize> {
        let mut i = 0;
        while i < HEART_RATE_DIGITS {
            if self.heart_rate[i] >= len {
                return Some(self.heart_rate[i]);
            }
            i += 1;
        }
        let mut i = 0;
        while i < SPO2_DIGITS {
            if self.spo2[i] >= len {
                return Some(self.spo2[i]);
            }
            i += 1;
        }
        None
    }
}

/// A layout together with the probe that selects it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CandidateLayout {
    /// Test that must hold for this layout to be chosen
    pub probe: Probe,
    /// Layout used when the probe holds
    pub layout: DisplayLayout,
}

impl CandidateLayout {
    /// Pair `layout` with the `probe` that selects it
    pub const fn new(probe: Probe, layout: DisplayLayout) -> Self {
        Self { probe, layout }
    }

    const fn position_outside(&self, len: usize) -> Option<usize> {
        if self.probe.readable >= len {
            return Some(self.probe.readable);
        }
        if self.probe.unreadable >= len {
            return Some(self.probe.unreadable);
        }
        self.layout.position_outside(len)
    }
}

/// Whether every position in a table lies inside a cycle of `len` positions
/// and every id can be reported with a reading
pub const fn table_fits_cycle(
    candidates: &[CandidateLayout],
    fallback: &DisplayLayout,
    len: usize,
) -> bool {
    let mut i = 0;
    while i < candidates.len() {
        if candidates[i].position_outside(len).is_some() || candidates[i].layout.id > MAX_LAYOUT_ID {
            return false;
        }
        i += 1;
    }
    fallback.position_outside(len).is_none() && fallback.id <= MAX_LAYOUT_ID
}

/// Field digits extracted from one pass
///
/// Only a [`LayoutResolver`] produces these, so `layout_id` is always valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[non_exhaustive]
pub struct ResolvedDisplay {
    /// Id of the layout that was applied
    pub layout_id: u8,
    /// Whether no probe held and the fallback layout was applied
    pub used_fallback: bool,
    /// Heart-rate digits, most significant first
    pub heart_rate: [DecodedDigit; HEART_RATE_DIGITS],
    /// Oxygen-saturation digits, most significant first
    pub spo2: [DecodedDigit; SPO2_DIGITS],
}

/// Ordered candidate table plus fallback, checked against the cycle length
///
/// ```rust
/// use oximeter_core::{LayoutResolver, SampleCycle};
///
/// let resolver: LayoutResolver = LayoutResolver::default();
/// let resolved = resolver.resolve(&SampleCycle::unreadable());
/// assert!(resolved.used_fallback);
/// ```
#[derive(Debug, Clone)]
pub struct LayoutResolver<const N: usize = SAMPLES_PER_CYCLE> {
    candidates: heapless::Vec<CandidateLayout, MAX_CANDIDATE_LAYOUTS>,
    fallback: DisplayLayout,
}

impl<const N: usize> LayoutResolver<N> {
    /// Resolver with no candidates, always applying `fallback`
    pub fn new(fallback: DisplayLayout) -> LayoutResult<Self> {
        fallback.validate(N)?;
        Ok(Self {
            candidates: heapless::Vec::new(),
            fallback,
        })
    }

    /// Append a candidate with lower priority than all existing ones
    pub fn with_candidate(mut self, candidate: CandidateLayout) -> LayoutResult<Self> {
        if let Some(position) = candidate.position_outside(N) {
            return Err(LayoutError::PositionOutOfRange {
                layout: candidate.layout.id,
                position,
                cycle_len: N,
            });
        }
        candidate.layout.validate(N)?;
        self.candidates
            .push(candidate)
            .map_err(|_| LayoutError::TooManyCandidates {
                capacity: MAX_CANDIDATE_LAYOUTS,
            })?;
        Ok(self)
    }

    /// Candidates in priority order
    pub fn candidates(&self) -> &[CandidateLayout] {
        &self.candidates
    }

    /// Layout applied when no probe holds
    pub fn fallback(&self) -> &DisplayLayout {
        &self.fallback
    }

    /// Pick the layout for `cycle`: the first candidate whose probe holds,
    /// otherwise the fallback. The flag is `true` for the fallback.
    pub fn select(&self, cycle: &SampleCycle<N>) -> (&DisplayLayout, bool) {
        self.candidates
            .iter()
            .find(|candidate| candidate.probe.holds(cycle))
            .map(|candidate| (&candidate.layout, false))
            .unwrap_or((&self.fallback, true))
    }

    /// Select the layout and extract both digit groups
    pub fn resolve(&self, cycle: &SampleCycle<N>) -> ResolvedDisplay {
        let (layout, used_fallback) = self.select(cycle);
        ResolvedDisplay {
            layout_id: layout.id,
            used_fallback,
            heart_rate: cycle.pick(&layout.heart_rate),
            spo2: cycle.pick(&layout.spo2),
        }
    }
}

impl Default for LayoutResolver<SAMPLES_PER_CYCLE> {
    /// The built-in table. Capacity and positions are checked at compile time.
    fn default() -> Self {
        let mut candidates = heapless::Vec::new();
        for candidate in CANDIDATE_LAYOUTS {
            if candidates.push(candidate).is_err() {
                break;
            }
        }
        Self {
            candidates,
            fallback: FALLBACK_LAYOUT,
        }
    }
}
