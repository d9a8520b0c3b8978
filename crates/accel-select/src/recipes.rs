//! The four interchangeable selection recipes.
//!
//! A recipe turns one agent's pair of marginal scores into a binary
//! replanning decision.  The set is closed and configuration-selected, so it
//! is a tagged enum rather than a trait object.  Recipes see only the two
//! scores and the pass RNG — never the residual state.
//!
//! The two probabilistic variants follow the published calibration idea of
//! Mahmassani & Sbayti: the selection probability is a monotone transform of
//! the score gap `score_if_zero − score_if_one`, equals λ when the gap is
//! zero, and biases selection toward score-improving agents while keeping
//! the expected replanning rate near λ over the population.

use accel_core::{AgentId, PassRng};

use crate::ReplanningPolicy;

/// A decision policy instantiated for one pass.
#[derive(Clone, Debug)]
pub enum ReplanningRecipe {
    /// Fixed probability λ, independent per agent; scores ignored.
    Uniform { lambda: f64 },

    /// Deterministic: select iff selecting is the locally better branch.
    Accelerate,

    /// Logistic transform of the scaled score gap.
    Mah2007 { lambda: f64, utility_scale: f64 },

    /// Piecewise tanh transform of the scaled score gap.
    Mah2009 { lambda: f64, utility_scale: f64 },
}

impl ReplanningRecipe {
    /// Instantiate the configured policy.
    ///
    /// `utility_scale` normalizes score gaps for the probabilistic variants;
    /// the engine passes the population mean |ΔU| (1.0 when degenerate).
    pub fn from_policy(policy: ReplanningPolicy, lambda: f64, utility_scale: f64) -> Self {
        match policy {
            ReplanningPolicy::Off => ReplanningRecipe::Uniform { lambda },
            ReplanningPolicy::Accelerate => ReplanningRecipe::Accelerate,
            ReplanningPolicy::Mah2007 => ReplanningRecipe::Mah2007 {
                lambda,
                utility_scale,
            },
            ReplanningPolicy::Mah2009 => ReplanningRecipe::Mah2009 {
                lambda,
                utility_scale,
            },
        }
    }

    /// The probability of selecting an agent with the given score pair.
    ///
    /// Non-decreasing in `score_if_zero − score_if_one`, and equal to λ when
    /// the gap is zero (for `Accelerate`, the degenerate 0/1 step).
    pub fn selection_probability(&self, score_if_one: f64, score_if_zero: f64) -> f64 {
        let gap = score_if_zero - score_if_one;
        match *self {
            ReplanningRecipe::Uniform { lambda } => lambda,

            ReplanningRecipe::Accelerate => {
                if score_if_one < score_if_zero {
                    1.0
                } else {
                    0.0
                }
            }

            ReplanningRecipe::Mah2007 {
                lambda,
                utility_scale,
            } => {
                if lambda <= 0.0 {
                    return 0.0;
                }
                if lambda >= 1.0 {
                    return 1.0;
                }
                // p = 1 / (1 + ((1−λ)/λ)·e^(−g));  p(0) = λ.
                // e^(−g) overflowing to +inf correctly drives p to 0.
                let odds = (1.0 - lambda) / lambda * (-gap / utility_scale).exp();
                1.0 / (1.0 + odds)
            }

            ReplanningRecipe::Mah2009 {
                lambda,
                utility_scale,
            } => {
                let t = (gap / utility_scale).tanh();
                if t >= 0.0 {
                    lambda + (1.0 - lambda) * t
                } else {
                    lambda * (1.0 + t)
                }
            }
        }
    }

    /// Decide whether `agent` replans, drawing through the pass RNG.
    ///
    /// `Accelerate` is deterministic and consumes no randomness; the other
    /// variants draw exactly one Bernoulli sample per agent.
    pub fn is_replanner(
        &self,
        _agent: AgentId,
        score_if_one: f64,
        score_if_zero: f64,
        rng: &mut PassRng,
    ) -> bool {
        match self {
            ReplanningRecipe::Accelerate => score_if_one < score_if_zero,
            _ => rng.gen_bool(self.selection_probability(score_if_one, score_if_zero)),
        }
    }
}
