//! Unit tests for accel-select.
//!
//! The engine tests all drive full passes through the public API and observe
//! internals only through `SelectionObserver`, the same way an application
//! would.

#[cfg(test)]
mod helpers {
    use accel_core::{AgentId, LinkId, TimeBin};
    use accel_field::SpaceTimeIndicators;
    use rustc_hash::FxHashMap;

    use crate::observer::AgentDecision;
    use crate::{ResidualState, SelectionDiagnostics, SelectionObserver};

    /// Footprint visiting `(link, bin, weight)` triples in order.
    pub fn footprint(visits: &[(u32, u32, f64)]) -> SpaceTimeIndicators {
        let mut ind = SpaceTimeIndicators::with_capacity(visits.len());
        for &(link, bin, w) in visits {
            ind.visit(LinkId(link), TimeBin(bin), w);
        }
        ind
    }

    /// Borrowable per-pass input collections, built agent by agent.
    #[derive(Default)]
    pub struct Population {
        pub ids: Vec<AgentId>,
        pub executed: FxHashMap<AgentId, SpaceTimeIndicators>,
        pub candidate: FxHashMap<AgentId, SpaceTimeIndicators>,
        pub utilities: FxHashMap<AgentId, f64>,
    }

    impl Population {
        pub fn add(
            &mut self,
            executed: &[(u32, u32, f64)],
            candidate: &[(u32, u32, f64)],
            utility_change: f64,
        ) -> AgentId {
            let agent = AgentId(self.ids.len() as u32);
            self.ids.push(agent);
            self.executed.insert(agent, footprint(executed));
            self.candidate.insert(agent, footprint(candidate));
            self.utilities.insert(agent, utility_change);
            agent
        }

        pub fn total_utility_change(&self) -> f64 {
            self.utilities.values().sum()
        }

        pub fn inputs(&self) -> crate::SelectionInputs<'_> {
            crate::SelectionInputs {
                population: &self.ids,
                executed_usage: &self.executed,
                candidate_usage: &self.candidate,
                utility_changes: &self.utilities,
                total_utility_change: self.total_utility_change(),
            }
        }

        /// A deterministic synthetic population: `n` agents with varied
        /// overlapping footprints and mixed-sign utility deltas.
        pub fn synthetic(n: u32) -> Population {
            let mut pop = Population::default();
            for i in 0..n {
                let l = i % 17;
                let b = i % 5;
                let executed = [(l, b, 1.0), ((l + 3) % 17, b, 0.5)];
                let candidate = [((l + 1) % 17, b, 1.0), ((l + 3) % 17, (b + 1) % 5, 0.5)];
                let utility = ((i % 7) as f64 - 3.0) * 0.25;
                pop.add(&executed, &candidate, utility);
            }
            pop
        }
    }

    /// Observer capturing every decision and the end-of-pass residual check.
    #[derive(Default)]
    pub struct Capture {
        pub decisions: Vec<AgentDecision>,
        pub cached_sum_of_squares: f64,
        pub recomputed_sum_of_squares: f64,
    }

    impl SelectionObserver for Capture {
        fn on_decision(&mut self, decision: &AgentDecision) {
            self.decisions.push(*decision);
        }

        fn on_pass_end(&mut self, state: &ResidualState, _diagnostics: &SelectionDiagnostics) {
            self.cached_sum_of_squares = state.sum_of_squares();
            self.recomputed_sum_of_squares = state.recompute_sum_of_squares();
        }
    }

    /// Relative floating-point closeness for accumulated sums.
    pub fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * (1.0 + a.abs().max(b.abs()))
    }
}

// ── Configuration ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod config {
    use std::str::FromStr;

    use accel_field::Weighting;

    use crate::{AccelerationConfig, ReplanningPolicy};

    #[test]
    fn rate_schedule_constant_and_decaying() {
        let mut cfg = AccelerationConfig {
            initial_replanning_rate: 0.4,
            replanning_rate_exponent: 0.0,
            ..AccelerationConfig::default()
        };
        assert_eq!(cfg.mean_replanning_rate(0), 0.4);
        assert_eq!(cfg.mean_replanning_rate(100), 0.4);

        cfg.replanning_rate_exponent = 1.0;
        assert_eq!(cfg.mean_replanning_rate(0), 0.4);
        assert!((cfg.mean_replanning_rate(1) - 0.2).abs() < 1e-12);
        assert!((cfg.mean_replanning_rate(3) - 0.1).abs() < 1e-12);
        // Strictly decreasing, never reaching zero.
        assert!(cfg.mean_replanning_rate(1000) > 0.0);
        assert!(cfg.mean_replanning_rate(1000) < cfg.mean_replanning_rate(999));
    }

    #[test]
    fn validation_rejects_malformed_configs() {
        let ok = AccelerationConfig::default();
        assert!(ok.validate().is_ok());

        let mut bad = ok.clone();
        bad.initial_replanning_rate = 0.0;
        assert!(bad.validate().is_err());

        let mut bad = ok.clone();
        bad.initial_replanning_rate = 1.5;
        assert!(bad.validate().is_err());

        let mut bad = ok.clone();
        bad.replanning_rate_exponent = -0.1;
        assert!(bad.validate().is_err());

        let mut bad = ok.clone();
        bad.regularization_weight = f64::NAN;
        assert!(bad.validate().is_err());

        let mut bad = ok.clone();
        bad.weighting = Weighting::TimeDecay { rate_per_bin: -1.0 };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn policy_parsing() {
        assert_eq!(ReplanningPolicy::from_str("off").unwrap(), ReplanningPolicy::Off);
        assert_eq!(
            ReplanningPolicy::from_str("accelerate").unwrap(),
            ReplanningPolicy::Accelerate
        );
        assert_eq!(
            ReplanningPolicy::from_str("mah2007").unwrap(),
            ReplanningPolicy::Mah2007
        );
        assert_eq!(
            ReplanningPolicy::from_str("mah2009").unwrap(),
            ReplanningPolicy::Mah2009
        );
        assert!(ReplanningPolicy::from_str("greedy").is_err());

        // Display/FromStr roundtrip.
        for policy in [
            ReplanningPolicy::Off,
            ReplanningPolicy::Accelerate,
            ReplanningPolicy::Mah2007,
            ReplanningPolicy::Mah2009,
        ] {
            assert_eq!(ReplanningPolicy::from_str(&policy.to_string()).unwrap(), policy);
        }
    }
}

// ── Residual state ────────────────────────────────────────────────────────────

#[cfg(test)]
mod residuals {
    use accel_core::{LinkId, TimeBin};
    use accel_field::{ResourceCell, UsageField};

    use super::helpers::close;
    use crate::ResidualState;

    fn cell(link: u32, bin: u32) -> ResourceCell {
        ResourceCell::new(LinkId(link), TimeBin(bin))
    }

    #[test]
    fn seeding() {
        let mut field = UsageField::new();
        field.set(cell(1, 0), 0.5);
        field.set(cell(2, 1), -1.5);
        let state = ResidualState::new(field, 3.25);

        assert_eq!(state.inertia(), 3.25);
        assert_eq!(state.regularization(), 0.0);
        assert!(close(state.sum_of_squares(), 0.25 + 2.25));
    }

    #[test]
    fn cached_sum_of_squares_tracks_bumps() {
        let mut field = UsageField::new();
        field.set(cell(0, 0), 1.0);
        let mut state = ResidualState::new(field, 0.0);

        // A fixed pseudo-random bump sequence over a handful of cells,
        // including ones absent from the seed field.
        let mut x: f64 = 0.37;
        for i in 0..500u32 {
            x = (x * 997.0 + 0.123).fract() - 0.5;
            state.bump_interaction(cell(i % 7, i % 3), x);
        }
        assert!(
            close(state.sum_of_squares(), state.recompute_sum_of_squares()),
            "cached {} vs recomputed {}",
            state.sum_of_squares(),
            state.recompute_sum_of_squares()
        );
    }
}

// ── Score updater ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod score {
    use accel_core::{LinkId, TimeBin};
    use accel_field::{ResourceCell, UsageField, Weighting};

    use super::helpers::{close, footprint};
    use crate::{CouplingWeights, ResidualState, ScoreUpdater};

    fn cell(link: u32, bin: u32) -> ResourceCell {
        ResourceCell::new(LinkId(link), TimeBin(bin))
    }

    #[test]
    fn degenerate_total_utility_disables_coupling() {
        let c = CouplingWeights::derive(0.3, 0.5, 4.0, 0.0);
        assert_eq!(c.beta, 0.0);
        assert_eq!(c.gamma, 0.0);

        let c = CouplingWeights::derive(0.3, 0.5, 4.0, 1e-15);
        assert_eq!(c.beta, 0.0);
        assert_eq!(c.gamma, 0.0);

        let c = CouplingWeights::derive(0.3, 0.5, 4.0, 2.0);
        assert!(close(c.beta, 1.2));
        assert!(close(c.gamma, 0.15));
    }

    #[test]
    fn identical_variants_make_selection_indifferent() {
        let ind = footprint(&[(1, 0, 1.0), (2, 3, 0.5)]);
        let coupling = CouplingWeights::derive(0.3, 0.0, 0.0, 0.0);
        let state = ResidualState::new(UsageField::new(), 0.0);

        let updater = ScoreUpdater::new(
            Some(&ind),
            Some(&ind),
            &Weighting::Identity,
            &coupling,
            0.0,
            &state,
        );
        assert_eq!(updater.footprint_len(), 0, "identical variants cancel exactly");
        assert_eq!(updater.score_change_if_one(), updater.score_change_if_zero());
        assert_eq!(updater.score_change_if_one(), 0.0);
    }

    #[test]
    fn missing_indicators_mean_empty_footprints() {
        let coupling = CouplingWeights::derive(0.3, 0.0, 0.0, 0.0);
        let state = ResidualState::new(UsageField::new(), 0.0);
        let updater =
            ScoreUpdater::new(None, None, &Weighting::Identity, &coupling, 0.0, &state);
        assert_eq!(updater.footprint_len(), 0);
        assert_eq!(updater.score_change_if_one(), 0.0);
        assert_eq!(updater.score_change_if_zero(), 0.0);
    }

    /// The central consistency property: the reported marginal must equal
    /// the actual objective change produced by committing that branch, where
    /// the objective is Σ interaction² + β·inertia + γ·regularization.
    #[test]
    fn marginal_equals_committed_objective_change() {
        let lambda = 0.3;
        let coupling = CouplingWeights::derive(lambda, 0.5, 4.0, 2.0);

        for &selected in &[true, false] {
            let mut seed = UsageField::new();
            seed.set(cell(1, 0), 0.6);
            seed.set(cell(2, 0), -0.3);
            let mut state = ResidualState::new(seed, (1.0 - lambda) * 2.0);

            let executed = footprint(&[(1, 0, 1.0)]);
            let candidate = footprint(&[(2, 0, 1.0)]);
            let updater = ScoreUpdater::new(
                Some(&executed),
                Some(&candidate),
                &Weighting::Identity,
                &coupling,
                0.5,
                &state,
            );
            let reported = if selected {
                updater.score_change_if_one()
            } else {
                updater.score_change_if_zero()
            };

            let objective = |s: &ResidualState| {
                s.sum_of_squares() + coupling.beta * s.inertia()
                    + coupling.gamma * s.regularization()
            };
            let before = objective(&state);
            updater.update_residuals(selected, &mut state);
            let after = objective(&state);

            assert!(
                close(after - before, reported),
                "selected={selected}: committed change {} vs reported {}",
                after - before,
                reported
            );
            assert!(close(state.sum_of_squares(), state.recompute_sum_of_squares()));
        }
    }

    #[test]
    fn duplicate_visits_accumulate_in_the_footprint() {
        let coupling = CouplingWeights::derive(0.5, 0.0, 0.0, 0.0);
        let state = ResidualState::new(UsageField::new(), 0.0);

        let candidate = footprint(&[(1, 0, 1.0), (1, 0, 1.0)]);
        let updater = ScoreUpdater::new(
            None,
            Some(&candidate),
            &Weighting::Identity,
            &coupling,
            0.0,
            &state,
        );
        assert_eq!(updater.footprint_len(), 1);
        // b = 2² = 4, a = 0, λ = 0.5 → Δ(1) = (1−λ)²·b = 1.0.
        assert!(close(updater.score_change_if_one(), 1.0));
    }
}

// ── Recipes ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod recipes {
    use accel_core::{AgentId, PassRng};

    use crate::{ReplanningPolicy, ReplanningRecipe};

    #[test]
    fn accelerate_is_a_step_function() {
        let recipe = ReplanningRecipe::Accelerate;
        assert_eq!(recipe.selection_probability(-1.0, 1.0), 1.0);
        assert_eq!(recipe.selection_probability(1.0, -1.0), 0.0);
        // Exact tie: keep the executed plan.
        assert_eq!(recipe.selection_probability(0.5, 0.5), 0.0);

        let mut rng = PassRng::new(7);
        assert!(recipe.is_replanner(AgentId(0), -1.0, 1.0, &mut rng));
        assert!(!recipe.is_replanner(AgentId(0), 1.0, -1.0, &mut rng));
    }

    #[test]
    fn uniform_ignores_scores() {
        let recipe = ReplanningRecipe::Uniform { lambda: 0.25 };
        assert_eq!(recipe.selection_probability(-100.0, 100.0), 0.25);
        assert_eq!(recipe.selection_probability(100.0, -100.0), 0.25);
    }

    #[test]
    fn probabilistic_recipes_hit_lambda_at_zero_gap() {
        for policy in [ReplanningPolicy::Mah2007, ReplanningPolicy::Mah2009] {
            for lambda in [0.05, 0.3, 0.8] {
                let recipe = ReplanningRecipe::from_policy(policy, lambda, 1.0);
                let p = recipe.selection_probability(2.0, 2.0);
                assert!(
                    (p - lambda).abs() < 1e-12,
                    "{policy}: p(0) = {p}, expected {lambda}"
                );
            }
        }
    }

    #[test]
    fn probabilistic_recipes_are_monotone_and_bounded() {
        for policy in [ReplanningPolicy::Mah2007, ReplanningPolicy::Mah2009] {
            let recipe = ReplanningRecipe::from_policy(policy, 0.3, 2.0);
            let gaps = [-1e9, -50.0, -1.0, -0.1, 0.0, 0.1, 1.0, 50.0, 1e9];
            let mut last = -1.0;
            for gap in gaps {
                // score_if_zero − score_if_one = gap.
                let p = recipe.selection_probability(0.0, gap);
                assert!((0.0..=1.0).contains(&p), "{policy}: p({gap}) = {p}");
                assert!(p >= last, "{policy}: p must be non-decreasing in the gap");
                last = p;
            }
            // Improving agents are favored over the base rate.
            assert!(recipe.selection_probability(0.0, 10.0) > 0.3);
            assert!(recipe.selection_probability(10.0, 0.0) < 0.3);
        }
    }

    #[test]
    fn uniform_empirical_rate_converges_to_lambda() {
        let lambda = 0.3;
        let recipe = ReplanningRecipe::Uniform { lambda };
        let mut rng = PassRng::new(4242);
        let n = 20_000;
        let mut selected = 0;
        for i in 0..n {
            if recipe.is_replanner(AgentId(i), 0.0, 0.0, &mut rng) {
                selected += 1;
            }
        }
        let rate = selected as f64 / n as f64;
        // 3σ ≈ 0.0097 for n = 20k.
        assert!((rate - lambda).abs() < 0.012, "empirical rate {rate}");
    }
}

// ── Engine (end-to-end passes) ────────────────────────────────────────────────

#[cfg(test)]
mod engine {
    use accel_core::PassRng;
    use accel_field::Weighting;

    use super::helpers::{close, Capture, Population};
    use crate::{AccelerationConfig, ReplannerSelection, ReplanningPolicy, SelectionDiagnostics};

    fn config(policy: ReplanningPolicy, lambda: f64) -> AccelerationConfig {
        AccelerationConfig {
            policy,
            initial_replanning_rate: lambda,
            replanning_rate_exponent: 0.0,
            regularization_weight: 0.0,
            weighting: Weighting::Identity,
        }
    }

    /// The three-agent scenario: A's variants are identical, B's candidate
    /// adds one unit at cell (link 1, bin 0) and C's removes one unit there.
    fn three_agent_population() -> Population {
        let mut pop = Population::default();
        pop.add(&[(4, 0, 1.0)], &[(4, 0, 1.0)], 0.0); // A
        pop.add(&[(2, 0, 1.0)], &[(2, 0, 1.0), (1, 0, 1.0)], 0.0); // B
        pop.add(&[(3, 0, 1.0), (1, 0, 1.0)], &[(3, 0, 1.0)], 0.0); // C
        pop
    }

    #[test]
    fn three_agent_scenario() {
        let pop = three_agent_population();
        let cfg = config(ReplanningPolicy::Accelerate, 0.3);

        // B and C cancel at the contested cell, so the aggregate fields agree.
        let pass = ReplannerSelection::new(&cfg, 0, pop.inputs()).unwrap();
        assert_eq!(pass.sum_of_count_differences2(), 0.0);
        assert_eq!(pass.uniform_replanning_objective(), 0.0);

        let mut capture = Capture::default();
        let selection =
            pass.draw_replanners_observed(&mut PassRng::new(11), &mut capture);

        // Agent A (zero footprint delta, zero utility delta) is indifferent.
        let a = capture
            .decisions
            .iter()
            .find(|d| d.agent.0 == 0)
            .unwrap();
        assert_eq!(a.score_if_one, a.score_if_zero);

        // Conservation after processing B and C in whatever order the
        // shuffle produced.
        assert!(close(
            capture.cached_sum_of_squares,
            capture.recomputed_sum_of_squares
        ));
        assert!(selection.diagnostics.final_objective.is_finite());
    }

    #[test]
    fn three_agent_objective_is_order_insensitive() {
        // The scenario is symmetric in B and C, so the final objective must
        // not depend on which of them the shuffle processes first.
        let pop = three_agent_population();
        let cfg = config(ReplanningPolicy::Accelerate, 0.3);

        let mut objectives = Vec::new();
        for seed in 0..8 {
            let pass = ReplannerSelection::new(&cfg, 0, pop.inputs()).unwrap();
            let selection = pass.draw_replanners(&mut PassRng::new(seed));
            objectives.push(selection.diagnostics.final_objective);
        }
        for pair in objectives.windows(2) {
            assert!(close(pair[0], pair[1]), "objectives {objectives:?}");
        }
    }

    #[test]
    fn greedy_never_picks_the_worse_branch() {
        let pop = Population::synthetic(200);
        let cfg = config(ReplanningPolicy::Accelerate, 0.2);
        let pass = ReplannerSelection::new(&cfg, 3, pop.inputs()).unwrap();

        let mut capture = Capture::default();
        let selection =
            pass.draw_replanners_observed(&mut PassRng::new(5), &mut capture);

        assert_eq!(capture.decisions.len(), 200);
        for d in &capture.decisions {
            if d.selected {
                assert!(d.score_if_one <= d.score_if_zero, "{d:?}");
                assert!(selection.replanners.contains(&d.agent));
            } else {
                assert!(d.score_if_zero <= d.score_if_one, "{d:?}");
                assert!(!selection.replanners.contains(&d.agent));
            }
        }
    }

    #[test]
    fn conservation_holds_for_every_policy() {
        let pop = Population::synthetic(150);
        for policy in [
            ReplanningPolicy::Off,
            ReplanningPolicy::Accelerate,
            ReplanningPolicy::Mah2007,
            ReplanningPolicy::Mah2009,
        ] {
            let cfg = AccelerationConfig {
                policy,
                regularization_weight: 0.7,
                ..config(policy, 0.25)
            };
            let pass = ReplannerSelection::new(&cfg, 1, pop.inputs()).unwrap();
            let mut capture = Capture::default();
            let selection =
                pass.draw_replanners_observed(&mut PassRng::new(99), &mut capture);

            assert!(
                close(capture.cached_sum_of_squares, capture.recomputed_sum_of_squares),
                "{policy}: cached {} vs recomputed {}",
                capture.cached_sum_of_squares,
                capture.recomputed_sum_of_squares
            );
            assert!(selection.diagnostics.final_objective.is_finite());
        }
    }

    #[test]
    fn uniform_policy_selection_rate_converges_to_lambda() {
        let pop = Population::synthetic(5_000);
        let lambda = 0.3;
        let cfg = config(ReplanningPolicy::Off, lambda);
        let pass = ReplannerSelection::new(&cfg, 0, pop.inputs()).unwrap();
        let selection = pass.draw_replanners(&mut PassRng::new(2024));

        let rate = selection.replanners.len() as f64 / 5_000.0;
        // 3σ ≈ 0.019 for n = 5000.
        assert!((rate - lambda).abs() < 0.025, "empirical rate {rate}");
    }

    #[test]
    fn all_zero_utility_deltas_complete_with_finite_objective() {
        let mut pop = Population::synthetic(50);
        for utility in pop.utilities.values_mut() {
            *utility = 0.0;
        }
        for policy in [
            ReplanningPolicy::Off,
            ReplanningPolicy::Accelerate,
            ReplanningPolicy::Mah2007,
            ReplanningPolicy::Mah2009,
        ] {
            let cfg = AccelerationConfig {
                regularization_weight: 1.0,
                ..config(policy, 0.2)
            };
            let pass = ReplannerSelection::new(&cfg, 0, pop.inputs()).unwrap();
            let selection = pass.draw_replanners(&mut PassRng::new(1));
            assert!(
                selection.diagnostics.final_objective.is_finite(),
                "{policy}: objective must stay finite with zero total utility"
            );
        }
    }

    #[test]
    fn uniform_baseline_matches_closed_form() {
        // One agent whose candidate adds a single unit of weight: D² = 1.
        let mut pop = Population::default();
        pop.add(&[], &[(1, 0, 1.0)], 0.0);

        let cfg = AccelerationConfig {
            regularization_weight: 0.5,
            ..config(ReplanningPolicy::Off, 0.2)
        };
        let pass = ReplannerSelection::new(&cfg, 0, pop.inputs()).unwrap();
        assert!(close(pass.sum_of_count_differences2(), 1.0));
        // (2 − 0.2) · 0.2 · (1 + 0.5) = 0.54
        assert!(close(pass.uniform_replanning_objective(), 0.54));

        let selection = pass.draw_replanners(&mut PassRng::new(0));
        assert!(close(selection.diagnostics.uniform_objective, 0.54));
    }

    #[test]
    fn agents_missing_from_all_maps_contribute_zero() {
        let mut pop = Population::synthetic(10);
        // An agent in the population with no indicators and no utility entry.
        pop.ids.push(accel_core::AgentId(10));

        let cfg = config(ReplanningPolicy::Accelerate, 0.2);
        let pass = ReplannerSelection::new(&cfg, 0, pop.inputs()).unwrap();
        let mut capture = Capture::default();
        let selection =
            pass.draw_replanners_observed(&mut PassRng::new(3), &mut capture);

        let ghost = capture
            .decisions
            .iter()
            .find(|d| d.agent.0 == 10)
            .unwrap();
        assert_eq!(ghost.score_if_one, 0.0);
        assert_eq!(ghost.score_if_zero, 0.0);
        assert!(!ghost.selected, "accelerate keeps the executed plan on a tie");
        assert!(selection.diagnostics.final_objective.is_finite());
    }

    #[test]
    fn pass_is_deterministic_for_a_fixed_seed() {
        let pop = Population::synthetic(300);
        let cfg = AccelerationConfig {
            regularization_weight: 0.3,
            ..config(ReplanningPolicy::Mah2009, 0.25)
        };

        let run = |seed: u64| {
            let pass = ReplannerSelection::new(&cfg, 2, pop.inputs()).unwrap();
            let selection = pass.draw_replanners(&mut PassRng::new(seed));
            let mut ids: Vec<u32> = selection.replanners.iter().map(|a| a.0).collect();
            ids.sort_unstable();
            (ids, selection.diagnostics.final_objective)
        };

        let (set_a, obj_a) = run(77);
        let (set_b, obj_b) = run(77);
        assert_eq!(set_a, set_b);
        assert_eq!(obj_a, obj_b);
    }

    #[test]
    fn realized_greedy_change_sums_the_taken_branches() {
        let pop = Population::synthetic(80);
        let cfg = config(ReplanningPolicy::Mah2007, 0.3);
        let pass = ReplannerSelection::new(&cfg, 0, pop.inputs()).unwrap();

        let mut capture = Capture::default();
        let selection =
            pass.draw_replanners_observed(&mut PassRng::new(12), &mut capture);

        let expected: f64 = capture
            .decisions
            .iter()
            .map(|d| if d.selected { d.greedy_if_one } else { d.greedy_if_zero })
            .sum();
        assert!(close(
            selection.diagnostics.realized_greedy_score_change,
            expected
        ));
    }

    #[test]
    fn percentile_accessor_indexing() {
        let diag = SelectionDiagnostics {
            mean_replanning_rate: 0.2,
            regularization_weight: 0.0,
            sum_of_count_differences2: 0.0,
            uniform_objective: 0.0,
            final_objective: 0.0,
            share_of_score_improving: 0.0,
            realized_greedy_score_change: 0.0,
            uniform_greedy_score_change: 0.0,
            deltas_for_uniform: vec![10.0, 20.0, 30.0, 40.0, 50.0],
        };
        // floor(0.5 · 5) = 2 → third value.
        assert_eq!(diag.delta_for_uniform_percentile(50), Some(30.0));
        assert_eq!(diag.delta_for_uniform_percentile(0), Some(10.0));
        // Index 100·5/100 = 5 clamps to n − 1.
        assert_eq!(diag.delta_for_uniform_percentile(100), Some(50.0));

        let empty = SelectionDiagnostics {
            deltas_for_uniform: vec![],
            ..diag
        };
        assert_eq!(empty.delta_for_uniform_percentile(50), None);
    }

    #[test]
    fn empty_population_returns_the_baseline() {
        let pop = Population::default();
        let cfg = config(ReplanningPolicy::Accelerate, 0.5);
        let pass = ReplannerSelection::new(&cfg, 0, pop.inputs()).unwrap();
        let selection = pass.draw_replanners(&mut PassRng::new(1));

        assert!(selection.replanners.is_empty());
        assert_eq!(
            selection.diagnostics.final_objective,
            selection.diagnostics.uniform_objective
        );
        assert_eq!(selection.diagnostics.share_of_score_improving, 0.0);
        assert_eq!(selection.diagnostics.delta_for_uniform_percentile(50), None);
    }
}
