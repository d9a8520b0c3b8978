//! Per-agent space-time usage footprints.

use std::fmt;

use accel_core::{LinkId, TimeBin};

// ── ResourceCell ──────────────────────────────────────────────────────────────

/// A (network link, time bin) pair — the atomic key of all usage fields.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceCell {
    pub link: LinkId,
    pub bin: TimeBin,
}

impl ResourceCell {
    #[inline]
    pub fn new(link: LinkId, bin: TimeBin) -> Self {
        Self { link, bin }
    }
}

impl fmt::Display for ResourceCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.link, self.bin)
    }
}

// ── SpaceTimeIndicators ───────────────────────────────────────────────────────

/// One visited cell with its usage weight.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpaceTimeEntry {
    pub cell: ResourceCell,
    pub weight: f64,
}

/// One agent's sparse usage footprint over resource cells for one simulated
/// plan variant (executed or candidate).
///
/// Entries are recorded in visit order and may repeat a cell (an agent can
/// traverse the same link twice in one bin); consumers sum duplicates.
/// Typical footprints are a few dozen entries, so a plain `Vec` beats any
/// map here — construction is append-only and all consumers iterate.
#[derive(Clone, Default, Debug)]
pub struct SpaceTimeIndicators {
    entries: Vec<SpaceTimeEntry>,
}

impl SpaceTimeIndicators {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            entries: Vec::with_capacity(n),
        }
    }

    /// Record one visit of `link` during `bin` with the given usage weight.
    ///
    /// Weights are expected to be non-negative; indicator producers encode
    /// "how much of this cell the agent used" (e.g. 1.0 per traversal, or a
    /// fractional occupancy share).
    pub fn visit(&mut self, link: LinkId, bin: TimeBin, weight: f64) {
        debug_assert!(weight >= 0.0, "indicator weights are non-negative");
        self.entries.push(SpaceTimeEntry {
            cell: ResourceCell::new(link, bin),
            weight,
        });
    }

    /// All recorded entries, in visit order.
    #[inline]
    pub fn entries(&self) -> &[SpaceTimeEntry] {
        &self.entries
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<SpaceTimeEntry> for SpaceTimeIndicators {
    fn from_iter<I: IntoIterator<Item = SpaceTimeEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
