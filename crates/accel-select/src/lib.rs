//! `accel-select` — the replanner-selection engine of `rust_accel`.
//!
//! Once per optimization iteration, an external loop hands this crate the
//! population's executed and candidate space-time usage indicators plus
//! per-agent utility deltas; one selection pass decides which agents may
//! adopt their candidate plan.  The pass approximates a population-wide
//! sum-of-squares consistency objective with per-agent sparse updates, so
//! its cost is proportional to the agents' footprint sizes rather than to
//! (field size × population size).
//!
//! # Crate layout
//!
//! | Module          | Contents                                            |
//! |-----------------|-----------------------------------------------------|
//! | [`config`]      | `AccelerationConfig`, `ReplanningPolicy`, λ schedule|
//! | [`residuals`]   | `ResidualState` — live objective decomposition      |
//! | [`score`]       | `ScoreUpdater`, `CouplingWeights`                   |
//! | [`recipes`]     | `ReplanningRecipe` — the four decision policies     |
//! | [`engine`]      | `ReplannerSelection`, `SelectionInputs`, `Selection`|
//! | [`diagnostics`] | `SelectionDiagnostics`                              |
//! | [`observer`]    | `SelectionObserver`, `AgentDecision`, `NoopObserver`|
//! | [`error`]       | `SelectError`, `SelectResult`                       |
//!
//! # Example
//!
//! ```rust,ignore
//! let config = AccelerationConfig {
//!     policy: ReplanningPolicy::Accelerate,
//!     initial_replanning_rate: 0.2,
//!     ..AccelerationConfig::default()
//! };
//! let pass = ReplannerSelection::new(&config, iteration, inputs)?;
//! let mut rng = PassRng::new(config_seed).child(iteration);
//! let selection = pass.draw_replanners(&mut rng);
//! for agent in &selection.replanners { /* switch to candidate plan */ }
//! println!("objective: {}", selection.diagnostics.final_objective);
//! ```

pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod observer;
pub mod recipes;
pub mod residuals;
pub mod score;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{AccelerationConfig, ReplanningPolicy};
pub use diagnostics::SelectionDiagnostics;
pub use engine::{ReplannerSelection, Selection, SelectionInputs};
pub use error::{SelectError, SelectResult};
pub use observer::{AgentDecision, NoopObserver, SelectionObserver};
pub use recipes::ReplanningRecipe;
pub use residuals::ResidualState;
pub use score::{CouplingWeights, ScoreUpdater};
