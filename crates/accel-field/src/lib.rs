//! `accel-field` — sparse space-time usage fields for the `rust_accel`
//! replanner-selection engine.
//!
//! # Crate layout
//!
//! | Module        | Contents                                               |
//! |---------------|--------------------------------------------------------|
//! | [`indicator`] | `ResourceCell`, `SpaceTimeIndicators` (per-agent)      |
//! | [`field`]     | `UsageField` — sparse cell → weighted-count map        |
//! | [`weighting`] | `Weighting` — configurable count transform             |
//! | [`aggregate`] | `aggregate_counts` — fold indicators into a field      |
//! | [`objective`] | `sum_of_squared_differences`, `weighted_difference`    |
//!
//! # Sparsity contract
//!
//! A population-wide field has millions of potential cells, but each agent
//! touches only a few dozen.  Everything here is therefore keyed sparsely:
//! a missing cell reads as 0.0, writes that produce exactly 0.0 remove the
//! entry, and all iteration is over nonzero entries only.

pub mod aggregate;
pub mod error;
pub mod field;
pub mod indicator;
pub mod objective;
pub mod weighting;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use aggregate::aggregate_counts;
pub use error::{FieldError, FieldResult};
pub use field::UsageField;
pub use indicator::{ResourceCell, SpaceTimeEntry, SpaceTimeIndicators};
pub use objective::{sum_of_squared_differences, weighted_difference};
pub use weighting::Weighting;
