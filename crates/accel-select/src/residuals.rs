//! `ResidualState` — the live decomposition of the selection objective.
//!
//! # Ownership
//!
//! The original formulation of this algorithm mutates shared aggregate state
//! in place during the sweep.  Here the decomposition is an explicit value:
//! the engine owns one `ResidualState` per pass and lends `&mut` access to
//! each [`ScoreUpdater`][crate::ScoreUpdater] commit, so there is no hidden
//! aliasing and the recipes never see the state at all.
//!
//! # Cached sum of squares
//!
//! The interaction field's sum of squares is the expensive part of the
//! objective.  It is maintained incrementally: every per-cell bump adjusts
//! the cache by `new² − old²` instead of rescanning the field.  Invariant:
//! the cache equals [`ResidualState::recompute_sum_of_squares`] within
//! floating-point tolerance, for any sequence of commits.

use accel_field::{ResourceCell, UsageField};

/// Mutable numeric state of one selection pass.
///
/// Scoped to exactly one pass: seeded from the two aggregate fields at pass
/// start, mutated agent-by-agent in a single sweep, discarded with the pass.
#[derive(Clone, Debug)]
pub struct ResidualState {
    /// Sparse running correction field, seeded λ·(upcoming − current).
    interaction: UsageField,
    /// Objective share of the non-selected population's utility change,
    /// seeded (1 − λ)·ΣΔU.
    inertia: f64,
    /// Utility-weighted deviation of committed decisions from λ, seeded 0.
    regularization: f64,
    /// Cached Σ interaction², maintained by closed-form deltas.
    sum_of_squares: f64,
}

impl ResidualState {
    /// Seed the state at pass start.  The cached sum of squares is computed
    /// by one full scan here and never rescanned again.
    pub fn new(interaction: UsageField, inertia: f64) -> Self {
        let sum_of_squares = interaction.sum_of_squares();
        Self {
            interaction,
            inertia,
            regularization: 0.0,
            sum_of_squares,
        }
    }

    #[inline]
    pub fn interaction(&self) -> &UsageField {
        &self.interaction
    }

    #[inline]
    pub fn inertia(&self) -> f64 {
        self.inertia
    }

    #[inline]
    pub fn regularization(&self) -> f64 {
        self.regularization
    }

    /// The incrementally maintained Σ interaction².
    #[inline]
    pub fn sum_of_squares(&self) -> f64 {
        self.sum_of_squares
    }

    /// Σ interaction² by full rescan — O(nonzero cells).  For seeding checks
    /// and tests; the pass itself only reads the cached value.
    pub fn recompute_sum_of_squares(&self) -> f64 {
        self.interaction.sum_of_squares()
    }

    // ── Commit-side mutators (crate-private: only ScoreUpdater commits) ───

    /// Add `delta` to the interaction residual at `cell`, keeping the cached
    /// sum of squares consistent.
    #[inline]
    pub(crate) fn bump_interaction(&mut self, cell: ResourceCell, delta: f64) {
        let old = self.interaction.get(cell);
        let new = self.interaction.add(cell, delta);
        self.sum_of_squares += new * new - old * old;
    }

    #[inline]
    pub(crate) fn add_inertia(&mut self, delta: f64) {
        self.inertia += delta;
    }

    #[inline]
    pub(crate) fn add_regularization(&mut self, delta: f64) {
        self.regularization += delta;
    }
}
