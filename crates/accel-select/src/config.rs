//! Selection-pass configuration and the replanning-rate schedule.

use std::fmt;
use std::str::FromStr;

use accel_field::Weighting;

use crate::{SelectError, SelectResult};

// ── ReplanningPolicy ──────────────────────────────────────────────────────────

/// Which decision recipe the pass uses.
///
/// A closed, configuration-selected set — a tagged enum rather than dynamic
/// dispatch.  Unknown textual selectors fail in [`FromStr`] before any pass
/// is constructed.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ReplanningPolicy {
    /// No acceleration: every agent replans with probability λ, scores ignored.
    Off,
    /// Greedy local minimization of the marginal objective.
    #[default]
    Accelerate,
    /// Probabilistic selection, Mahmassani-2007-style logistic transform.
    Mah2007,
    /// Probabilistic selection, Mahmassani-2009-style tanh transform.
    Mah2009,
}

impl FromStr for ReplanningPolicy {
    type Err = SelectError;

    fn from_str(s: &str) -> SelectResult<Self> {
        match s {
            "off" => Ok(ReplanningPolicy::Off),
            "accelerate" => Ok(ReplanningPolicy::Accelerate),
            "mah2007" => Ok(ReplanningPolicy::Mah2007),
            "mah2009" => Ok(ReplanningPolicy::Mah2009),
            other => Err(SelectError::Config(format!(
                "unknown replanning policy `{other}` \
                 (expected off | accelerate | mah2007 | mah2009)"
            ))),
        }
    }
}

impl fmt::Display for ReplanningPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReplanningPolicy::Off => "off",
            ReplanningPolicy::Accelerate => "accelerate",
            ReplanningPolicy::Mah2007 => "mah2007",
            ReplanningPolicy::Mah2009 => "mah2009",
        };
        f.write_str(s)
    }
}

// ── AccelerationConfig ────────────────────────────────────────────────────────

/// Parameters of the selection pass.
///
/// Typically loaded from a TOML/JSON file by the application crate (with the
/// `serde` feature) and validated once before the iteration loop starts.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccelerationConfig {
    /// The decision recipe.
    pub policy: ReplanningPolicy,

    /// Mean replanning rate λ₀ at iteration 0.  Must be in (0, 1].
    pub initial_replanning_rate: f64,

    /// Decay exponent η of the rate schedule; 0 keeps λ constant.
    pub replanning_rate_exponent: f64,

    /// Regularization constant δ added to the squared-difference sum in the
    /// objective.  Must be ≥ 0.
    pub regularization_weight: f64,

    /// Transform applied to indicator weights during aggregation.
    pub weighting: Weighting,
}

impl Default for AccelerationConfig {
    fn default() -> Self {
        Self {
            policy: ReplanningPolicy::Accelerate,
            initial_replanning_rate: 0.2,
            replanning_rate_exponent: 0.0,
            regularization_weight: 0.0,
            weighting: Weighting::Identity,
        }
    }
}

impl AccelerationConfig {
    /// The mean replanning rate for `iteration`:
    ///
    ///   λ(k) = λ₀ · (k + 1)^(−η)
    ///
    /// MSA-style decay: η = 0 keeps λ constant, η = 1 gives the classical
    /// 1/k schedule.  With a valid config the result is always in (0, λ₀].
    pub fn mean_replanning_rate(&self, iteration: u64) -> f64 {
        self.initial_replanning_rate * ((iteration + 1) as f64).powf(-self.replanning_rate_exponent)
    }

    /// Reject malformed configurations.  Fatal at pass construction, before
    /// any state is touched.
    pub fn validate(&self) -> SelectResult<()> {
        if !self.initial_replanning_rate.is_finite()
            || self.initial_replanning_rate <= 0.0
            || self.initial_replanning_rate > 1.0
        {
            return Err(SelectError::Config(format!(
                "initial replanning rate must be in (0, 1], got {}",
                self.initial_replanning_rate
            )));
        }
        if !self.replanning_rate_exponent.is_finite() || self.replanning_rate_exponent < 0.0 {
            return Err(SelectError::Config(format!(
                "replanning rate exponent must be finite and >= 0, got {}",
                self.replanning_rate_exponent
            )));
        }
        if !self.regularization_weight.is_finite() || self.regularization_weight < 0.0 {
            return Err(SelectError::Config(format!(
                "regularization weight must be finite and >= 0, got {}",
                self.regularization_weight
            )));
        }
        self.weighting.validate()?;
        Ok(())
    }
}
