//! Configurable transform applied to indicator weights during aggregation.

use crate::{FieldError, FieldResult};
use accel_core::TimeBin;

/// How raw indicator weights are transformed before entering a field.
///
/// Selected by configuration and fixed for the duration of a pass.  The same
/// weighting must be used for both plan variants of a pass, otherwise the
/// two aggregate fields are not comparable.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case", tag = "kind"))]
pub enum Weighting {
    /// Counts enter the field unchanged.
    #[default]
    Identity,

    /// Exponential time-of-day decay: a count in bin `b` is scaled by
    /// `exp(-rate_per_bin * b)`, de-emphasizing disagreement late in the
    /// analysis window.
    TimeDecay { rate_per_bin: f64 },
}

impl Weighting {
    /// Reject malformed configurations before a pass starts.
    pub fn validate(&self) -> FieldResult<()> {
        match *self {
            Weighting::Identity => Ok(()),
            Weighting::TimeDecay { rate_per_bin } => {
                if !rate_per_bin.is_finite() || rate_per_bin < 0.0 {
                    Err(FieldError::Weighting(format!(
                        "time-decay rate must be finite and >= 0, got {rate_per_bin}"
                    )))
                } else {
                    Ok(())
                }
            }
        }
    }

    /// The transformed weight for a raw indicator `weight` in `bin`.
    #[inline]
    pub fn apply(&self, bin: TimeBin, weight: f64) -> f64 {
        match *self {
            Weighting::Identity => weight,
            Weighting::TimeDecay { rate_per_bin } => {
                weight * (-rate_per_bin * bin.0 as f64).exp()
            }
        }
    }
}
