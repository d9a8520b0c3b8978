//! Per-agent marginal scoring and the sparse residual commit.
//!
//! # The acceleration technique
//!
//! The global objective contains a sum of squares over a field with millions
//! of cells.  Evaluating "what happens if this one agent replans" from
//! scratch would cost O(field size) per agent.  Instead, every undecided
//! agent is carried in the residuals at the mean rate λ, and flipping agent
//! n's indicator from λ to z ∈ {0, 1} changes the objective by a local
//! quadratic expansion around the current interaction residual R:
//!
//!   Δ(z) = Σ_c [ 2(z−λ)·dₙ(c)·R(c) + (z−λ)²·dₙ(c)² ]
//!        + β·(λ−z)·ΔUₙ + γ·(z−λ)·ΔUₙ
//!
//! where dₙ = weighted(candidate) − weighted(executed) is the agent's sparse
//! footprint difference.  Both sums touch only the cells the agent uses, so
//! the marginal cost per decision is O(footprint size).

use accel_field::{ResourceCell, SpaceTimeIndicators, Weighting};
use rustc_hash::FxHashMap;

use crate::ResidualState;

/// Below this magnitude the population's total utility change counts as
/// degenerate and the utility coupling is switched off entirely, instead of
/// letting a division produce non-finite scores.
const MIN_TOTAL_UTILITY_CHANGE: f64 = 1e-12;

// ── CouplingWeights ───────────────────────────────────────────────────────────

/// Per-pass scalar weights tying the utility terms into the objective.
#[derive(Copy, Clone, Debug)]
pub struct CouplingWeights {
    /// Mean replanning rate λ for this iteration.
    pub lambda: f64,
    /// Inertia coupling β = 2λD²/ΣΔU (0 when ΣΔU is degenerate).
    pub beta: f64,
    /// Regularization coupling γ = 2λδ/ΣΔU (0 when ΣΔU is degenerate).
    pub gamma: f64,
    /// Regularization constant δ.
    pub delta: f64,
}

impl CouplingWeights {
    /// Derive the couplings from the pass-level scalars.
    ///
    /// `sum_of_count_differences2` is D², the squared-difference sum of the
    /// two aggregate fields.  A (near-)zero `total_utility_change` is the
    /// guarded degenerate case: both couplings become exactly 0.
    pub fn derive(
        lambda: f64,
        delta: f64,
        sum_of_count_differences2: f64,
        total_utility_change: f64,
    ) -> Self {
        let (beta, gamma) = if total_utility_change.abs() <= MIN_TOTAL_UTILITY_CHANGE {
            (0.0, 0.0)
        } else {
            (
                2.0 * lambda * sum_of_count_differences2 / total_utility_change,
                2.0 * lambda * delta / total_utility_change,
            )
        };
        Self {
            lambda,
            beta,
            gamma,
            delta,
        }
    }
}

// ── ScoreUpdater ──────────────────────────────────────────────────────────────

/// One agent's marginal effect on the objective, plus the deferred commit.
///
/// Construction does all the sparse arithmetic against a read-only borrow of
/// the [`ResidualState`]; the getters are then free.  Once the recipe has
/// decided, [`update_residuals`][Self::update_residuals] consumes the updater
/// and commits the decision — exactly once per agent per pass.
pub struct ScoreUpdater {
    /// Sparse footprint difference dₙ, merged and weighted.
    footprint_delta: Vec<(ResourceCell, f64)>,
    lambda: f64,
    utility_change: f64,

    score_if_one: f64,
    score_if_zero: f64,
    greedy_if_one: f64,
    greedy_if_zero: f64,
    delta_for_uniform: f64,
}

impl ScoreUpdater {
    /// Evaluate one agent against the current residual state.
    ///
    /// `None` indicators mean the agent produced no usage in that variant
    /// (e.g. it stayed home); they contribute an empty footprint, not an
    /// error.
    pub fn new(
        executed: Option<&SpaceTimeIndicators>,
        candidate: Option<&SpaceTimeIndicators>,
        weighting: &Weighting,
        coupling: &CouplingWeights,
        utility_change: f64,
        state: &ResidualState,
    ) -> Self {
        let footprint_delta = footprint_difference(executed, candidate, weighting);
        let lambda = coupling.lambda;

        // Sparse reductions over the agent's footprint only:
        // a = Σ dₙ(c)·R(c), b = Σ dₙ(c)².
        let mut dot_residual = 0.0;
        let mut norm2 = 0.0;
        for &(cell, d) in &footprint_delta {
            dot_residual += d * state.interaction().get(cell);
            norm2 += d * d;
        }

        let utility_term = (coupling.beta - coupling.gamma) * utility_change;

        let step_up = 1.0 - lambda; // z = 1 moves the indicator by 1 − λ
        let score_if_one =
            2.0 * step_up * dot_residual + step_up * step_up * norm2 - step_up * utility_term;
        let score_if_zero = -2.0 * lambda * dot_residual + lambda * lambda * norm2
            + lambda * utility_term;

        // Greedy diagnostics: the same marginals without the λ-smoothing —
        // a full 0→1 step expanded around the self-free residual R − λ·dₙ.
        let greedy_if_one = 2.0 * dot_residual + (1.0 - 2.0 * lambda) * norm2 - utility_term;
        let greedy_if_zero = 0.0;

        // Expected marginal under a non-adaptive uniform-λ policy; kept for
        // percentile reporting.
        let delta_for_uniform = lambda * score_if_one + step_up * score_if_zero;

        Self {
            footprint_delta,
            lambda,
            utility_change,
            score_if_one,
            score_if_zero,
            greedy_if_one,
            greedy_if_zero,
            delta_for_uniform,
        }
    }

    /// Objective change if this agent's selection indicator is set to 1.
    #[inline]
    pub fn score_change_if_one(&self) -> f64 {
        self.score_if_one
    }

    /// Objective change if this agent's selection indicator is set to 0.
    #[inline]
    pub fn score_change_if_zero(&self) -> f64 {
        self.score_if_zero
    }

    /// Diagnostic-only marginal for selection, ignoring λ-smoothing.
    #[inline]
    pub fn greedy_score_change_if_one(&self) -> f64 {
        self.greedy_if_one
    }

    /// Diagnostic-only marginal for non-selection, ignoring λ-smoothing.
    #[inline]
    pub fn greedy_score_change_if_zero(&self) -> f64 {
        self.greedy_if_zero
    }

    /// This agent's expected marginal under uniform-λ replanning.
    #[inline]
    pub fn delta_for_uniform_replanning(&self) -> f64 {
        self.delta_for_uniform
    }

    /// Number of cells this agent's decision actually touches.
    #[inline]
    pub fn footprint_len(&self) -> usize {
        self.footprint_delta.len()
    }

    /// Commit the decision: replace this agent's λ-share in the residuals
    /// with the actual 0/1 indicator.
    ///
    /// Touches exactly the agent's footprint cells; the cached sum of
    /// squares and the two scalars are updated by their closed-form deltas.
    /// Consuming `self` makes a double commit unrepresentable.
    pub fn update_residuals(self, selected: bool, state: &mut ResidualState) {
        let z = if selected { 1.0 } else { 0.0 };
        let step = z - self.lambda;
        for (cell, d) in self.footprint_delta {
            state.bump_interaction(cell, step * d);
        }
        state.add_inertia(-step * self.utility_change);
        state.add_regularization(step * self.utility_change);
    }
}

// ── Footprint difference ──────────────────────────────────────────────────────

/// Merge one agent's two indicator variants into a sparse weighted
/// difference `candidate − executed`, dropping exactly-cancelled cells.
fn footprint_difference(
    executed: Option<&SpaceTimeIndicators>,
    candidate: Option<&SpaceTimeIndicators>,
    weighting: &Weighting,
) -> Vec<(ResourceCell, f64)> {
    let cap = executed.map_or(0, |i| i.len()) + candidate.map_or(0, |i| i.len());
    let mut merged: FxHashMap<ResourceCell, f64> = FxHashMap::default();
    merged.reserve(cap);

    if let Some(candidate) = candidate {
        for entry in candidate.entries() {
            *merged.entry(entry.cell).or_insert(0.0) +=
                weighting.apply(entry.cell.bin, entry.weight);
        }
    }
    if let Some(executed) = executed {
        for entry in executed.entries() {
            *merged.entry(entry.cell).or_insert(0.0) -=
                weighting.apply(entry.cell.bin, entry.weight);
        }
    }

    merged.into_iter().filter(|&(_, d)| d != 0.0).collect()
}
