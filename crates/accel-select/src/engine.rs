//! The selection pass: one randomized sweep over the population.

use accel_core::{AgentId, PassRng};
use accel_field::{UsageField, aggregate_counts, sum_of_squared_differences, weighted_difference};
use accel_field::{SpaceTimeIndicators, Weighting};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::observer::AgentDecision;
use crate::{
    AccelerationConfig, CouplingWeights, NoopObserver, ReplanningPolicy, ReplanningRecipe,
    ResidualState, ScoreUpdater, SelectResult, SelectionDiagnostics, SelectionObserver,
};

// ── Inputs ────────────────────────────────────────────────────────────────────

/// Everything the external iteration loop supplies for one pass.
///
/// All collections are borrowed read-only for the pass duration.  An agent
/// present in `population` but absent from an indicator map simply has an
/// empty footprint in that variant; an agent absent from `utility_changes`
/// has a utility delta of 0.
#[derive(Copy, Clone)]
pub struct SelectionInputs<'a> {
    /// The full agent population (no duplicates expected).
    pub population: &'a [AgentId],

    /// Executed-plan usage from the physical simulation.
    pub executed_usage: &'a FxHashMap<AgentId, SpaceTimeIndicators>,

    /// Candidate-plan usage from the pseudo-simulation.
    pub candidate_usage: &'a FxHashMap<AgentId, SpaceTimeIndicators>,

    /// Estimated per-agent utility change of adopting the candidate plan.
    pub utility_changes: &'a FxHashMap<AgentId, f64>,

    /// Σ of utility changes over the whole population.
    pub total_utility_change: f64,
}

// ── Output ────────────────────────────────────────────────────────────────────

/// The result of one pass: the selected subset plus read-only diagnostics.
pub struct Selection {
    /// Agents permitted to adopt their candidate plan.  No ordering
    /// guarantee; duplicates impossible.
    pub replanners: FxHashSet<AgentId>,

    pub diagnostics: SelectionDiagnostics,
}

// ── Engine ────────────────────────────────────────────────────────────────────

/// One configured, seeded selection pass.
///
/// Construction aggregates the two usage fields and derives the pass scalars;
/// [`draw_replanners`][Self::draw_replanners] then runs the single sweep and
/// consumes the pass.  The pass owns its [`ResidualState`] exclusively and
/// lends mutable access only to the per-agent commit — recipes never see it.
pub struct ReplannerSelection<'a> {
    inputs: SelectionInputs<'a>,
    policy: ReplanningPolicy,
    weighting: Weighting,
    lambda: f64,
    coupling: CouplingWeights,
    current_counts: UsageField,
    upcoming_counts: UsageField,
    sum_of_count_differences2: f64,
}

impl<'a> ReplannerSelection<'a> {
    /// Validate the configuration and precompute the pass-level aggregates.
    ///
    /// Configuration errors are fatal here, before any mutable state exists.
    pub fn new(
        config: &AccelerationConfig,
        iteration: u64,
        inputs: SelectionInputs<'a>,
    ) -> SelectResult<Self> {
        config.validate()?;

        let current_counts = aggregate_counts(inputs.executed_usage.values(), &config.weighting);
        let upcoming_counts = aggregate_counts(inputs.candidate_usage.values(), &config.weighting);
        let sum_of_count_differences2 =
            sum_of_squared_differences(&current_counts, &upcoming_counts);

        let lambda = config.mean_replanning_rate(iteration);
        let coupling = CouplingWeights::derive(
            lambda,
            config.regularization_weight,
            sum_of_count_differences2,
            inputs.total_utility_change,
        );

        Ok(Self {
            inputs,
            policy: config.policy,
            weighting: config.weighting.clone(),
            lambda,
            coupling,
            current_counts,
            upcoming_counts,
            sum_of_count_differences2,
        })
    }

    /// λ for this pass, as derived from the configured schedule.
    #[inline]
    pub fn mean_replanning_rate(&self) -> f64 {
        self.lambda
    }

    /// D² — the squared-difference sum between the two aggregate fields.
    #[inline]
    pub fn sum_of_count_differences2(&self) -> f64 {
        self.sum_of_count_differences2
    }

    /// The closed-form objective of uniform-λ replanning:
    /// (2 − λ)·λ·(D² + δ).  The sweep's running objective starts here.
    pub fn uniform_replanning_objective(&self) -> f64 {
        (2.0 - self.lambda) * self.lambda * (self.sum_of_count_differences2 + self.coupling.delta)
    }

    /// Run the pass without observation.
    pub fn draw_replanners(self, rng: &mut PassRng) -> Selection {
        self.draw_replanners_observed(rng, &mut NoopObserver)
    }

    /// Run the single randomized sweep and return the selected subset.
    ///
    /// Strictly sequential: each agent's marginal scores depend on the
    /// residual state left by all previously processed agents.  The sweep
    /// order is a one-time shuffle from `rng`; given identical inputs and
    /// seed the pass is fully deterministic.
    pub fn draw_replanners_observed<O: SelectionObserver>(
        self,
        rng: &mut PassRng,
        observer: &mut O,
    ) -> Selection {
        // Seed the residuals: every agent initially carried at rate λ.
        let mut state = ResidualState::new(
            weighted_difference(&self.upcoming_counts, &self.current_counts, self.lambda),
            (1.0 - self.lambda) * self.inputs.total_utility_change,
        );

        let recipe =
            ReplanningRecipe::from_policy(self.policy, self.lambda, self.utility_scale());

        let mut order: Vec<AgentId> = self.inputs.population.to_vec();
        rng.shuffle(&mut order);

        let uniform_objective = self.uniform_replanning_objective();
        let mut objective = uniform_objective;
        let mut realized_greedy = 0.0;
        let mut uniform_greedy = 0.0;
        let mut score_improving: usize = 0;
        let mut deltas_for_uniform: Vec<f64> = Vec::with_capacity(order.len());
        let mut replanners: FxHashSet<AgentId> = FxHashSet::default();

        observer.on_pass_start(self.lambda, uniform_objective);

        for agent in order.iter().copied() {
            let updater = ScoreUpdater::new(
                self.inputs.executed_usage.get(&agent),
                self.inputs.candidate_usage.get(&agent),
                &self.weighting,
                &self.coupling,
                self.utility_change(agent),
                &state,
            );

            let score_if_one = updater.score_change_if_one();
            let score_if_zero = updater.score_change_if_zero();
            let selected = recipe.is_replanner(agent, score_if_one, score_if_zero, rng);

            if selected {
                replanners.insert(agent);
                objective += score_if_one;
                realized_greedy += updater.greedy_score_change_if_one();
            } else {
                objective += score_if_zero;
                realized_greedy += updater.greedy_score_change_if_zero();
            }
            uniform_greedy += self.lambda * updater.greedy_score_change_if_one()
                + (1.0 - self.lambda) * updater.greedy_score_change_if_zero();

            if score_if_one.min(score_if_zero) < 0.0 {
                score_improving += 1;
            }
            deltas_for_uniform.push(updater.delta_for_uniform_replanning());

            observer.on_decision(&AgentDecision {
                agent,
                score_if_one,
                score_if_zero,
                greedy_if_one: updater.greedy_score_change_if_one(),
                greedy_if_zero: updater.greedy_score_change_if_zero(),
                selected,
            });

            updater.update_residuals(selected, &mut state);
        }

        deltas_for_uniform.sort_by(f64::total_cmp);
        let share_of_score_improving = if order.is_empty() {
            0.0
        } else {
            score_improving as f64 / order.len() as f64
        };

        let diagnostics = SelectionDiagnostics {
            mean_replanning_rate: self.lambda,
            regularization_weight: self.coupling.delta,
            sum_of_count_differences2: self.sum_of_count_differences2,
            uniform_objective,
            final_objective: objective,
            share_of_score_improving,
            realized_greedy_score_change: realized_greedy,
            uniform_greedy_score_change: uniform_greedy,
            deltas_for_uniform,
        };

        observer.on_pass_end(&state, &diagnostics);

        Selection {
            replanners,
            diagnostics,
        }
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    #[inline]
    fn utility_change(&self, agent: AgentId) -> f64 {
        self.inputs.utility_changes.get(&agent).copied().unwrap_or(0.0)
    }

    /// Population mean |ΔU|, normalizing score gaps in the probabilistic
    /// recipes.  1.0 when the population is empty or all deltas are zero.
    fn utility_scale(&self) -> f64 {
        if self.inputs.population.is_empty() {
            return 1.0;
        }
        let sum: f64 = self
            .inputs
            .population
            .iter()
            .map(|&agent| self.utility_change(agent).abs())
            .sum();
        let mean = sum / self.inputs.population.len() as f64;
        if mean > 0.0 { mean } else { 1.0 }
    }
}
