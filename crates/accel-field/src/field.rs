//! `UsageField` — sparse aggregate usage keyed by resource cell.

use rustc_hash::FxHashMap;

use crate::ResourceCell;

/// A sparse mapping from [`ResourceCell`] to an accumulated weighted count.
///
/// Missing cells read as 0.0.  Writes that produce exactly 0.0 remove the
/// entry, so the nonzero-entry iteration stays proportional to actual usage.
///
/// FxHash rather than SipHash: keys are small integer pairs, lookups sit on
/// the hot path of every per-agent score evaluation, and the keys are not
/// attacker-controlled.
#[derive(Clone, Default, Debug)]
pub struct UsageField {
    cells: FxHashMap<ResourceCell, f64>,
}

impl UsageField {
    pub fn new() -> Self {
        Self::default()
    }

    /// The value at `cell`; 0.0 if the cell has no entry.
    #[inline]
    pub fn get(&self, cell: ResourceCell) -> f64 {
        self.cells.get(&cell).copied().unwrap_or(0.0)
    }

    /// Overwrite the value at `cell`.  Setting exactly 0.0 removes the entry.
    #[inline]
    pub fn set(&mut self, cell: ResourceCell, value: f64) {
        if value == 0.0 {
            self.cells.remove(&cell);
        } else {
            self.cells.insert(cell, value);
        }
    }

    /// Add `delta` to the value at `cell` and return the new value.
    #[inline]
    pub fn add(&mut self, cell: ResourceCell, delta: f64) -> f64 {
        let new = self.get(cell) + delta;
        self.set(cell, new);
        new
    }

    /// Iterate over all nonzero `(cell, value)` entries, in no defined order.
    #[inline]
    pub fn entries(&self) -> impl Iterator<Item = (ResourceCell, f64)> + '_ {
        self.cells.iter().map(|(&c, &v)| (c, v))
    }

    #[inline]
    pub fn contains(&self, cell: ResourceCell) -> bool {
        self.cells.contains_key(&cell)
    }

    /// Number of nonzero cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Sum of squared entries, by full scan.
    ///
    /// O(nonzero cells) — callers that mutate incrementally should maintain
    /// their own running sum and use this only for seeding and verification.
    pub fn sum_of_squares(&self) -> f64 {
        self.cells.values().map(|v| v * v).sum()
    }
}
