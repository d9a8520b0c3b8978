//! Read-only diagnostics published by a completed selection pass.

/// Summary numbers of one pass, for the owning iteration loop's reporting.
///
/// All fields are plain values; nothing here aliases pass-internal state.
#[derive(Clone, Debug)]
pub struct SelectionDiagnostics {
    /// λ used by this pass.
    pub mean_replanning_rate: f64,

    /// δ used by this pass.
    pub regularization_weight: f64,

    /// D² — squared-difference sum between the two aggregate fields.
    pub sum_of_count_differences2: f64,

    /// The uniform-replanning baseline (2 − λ)·λ·(D² + δ), the pass's
    /// starting objective value.
    pub uniform_objective: f64,

    /// Objective value after all decisions were committed.
    pub final_objective: f64,

    /// Fraction of agents whose better branch would lower the objective.
    pub share_of_score_improving: f64,

    /// Greedy-marginal total under the decisions actually taken.
    pub realized_greedy_score_change: f64,

    /// Greedy-marginal total a uniform-λ policy would produce in expectation.
    pub uniform_greedy_score_change: f64,

    /// Per-agent uniform-replanning marginals, sorted ascending at pass end.
    pub(crate) deltas_for_uniform: Vec<f64>,
}

impl SelectionDiagnostics {
    /// The `percentile`-th percentile (0–100) of the per-agent uniform
    /// marginals: the sorted value at index `percentile·n/100`, clamped to
    /// `n − 1`.  `None` for an empty population.
    pub fn delta_for_uniform_percentile(&self, percentile: usize) -> Option<f64> {
        let n = self.deltas_for_uniform.len();
        if n == 0 {
            return None;
        }
        let index = (percentile * n / 100).min(n - 1);
        Some(self.deltas_for_uniform[index])
    }

    /// All per-agent uniform marginals, sorted ascending.
    pub fn deltas_for_uniform(&self) -> &[f64] {
        &self.deltas_for_uniform
    }
}
