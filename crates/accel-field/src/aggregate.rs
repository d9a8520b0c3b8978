//! Weighted-count aggregation: fold per-agent indicators into one field.

use crate::{SpaceTimeIndicators, UsageField, Weighting};

/// Sum all agents' indicator entries of one plan variant into a single
/// aggregate field, applying `weighting` to every entry.
///
/// The output's nonzero cell set is the union of all input nonzero cells
/// (up to exact cancellation, which cannot occur for non-negative weights).
/// Cost: O(total indicator entries).
pub fn aggregate_counts<'a, I>(indicators: I, weighting: &Weighting) -> UsageField
where
    I: IntoIterator<Item = &'a SpaceTimeIndicators>,
{
    let mut field = UsageField::new();
    for indicator in indicators {
        for entry in indicator.entries() {
            field.add(entry.cell, weighting.apply(entry.cell.bin, entry.weight));
        }
    }
    field
}
