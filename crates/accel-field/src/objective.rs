//! Objective evaluation over pairs of aggregate fields.

use crate::UsageField;

/// Sum over the union of nonzero cells of `(a - b)^2`, with missing cells
/// reading as zero.  This scalar is the population-level "cost of
/// disagreement" between two usage patterns.
pub fn sum_of_squared_differences(a: &UsageField, b: &UsageField) -> f64 {
    let mut sum = 0.0;
    for (cell, va) in a.entries() {
        let d = va - b.get(cell);
        sum += d * d;
    }
    // Cells present only in b.
    for (cell, vb) in b.entries() {
        if !a.contains(cell) {
            sum += vb * vb;
        }
    }
    sum
}

/// The sparse field `scale * (a - b)`, restricted to the union of nonzero
/// cells.  Seeds the interaction residual of a selection pass.
pub fn weighted_difference(a: &UsageField, b: &UsageField, scale: f64) -> UsageField {
    let mut out = UsageField::new();
    for (cell, va) in a.entries() {
        out.set(cell, scale * (va - b.get(cell)));
    }
    for (cell, vb) in b.entries() {
        if !a.contains(cell) {
            out.set(cell, scale * -vb);
        }
    }
    out
}
