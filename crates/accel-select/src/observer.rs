//! Selection-pass observer for progress reporting and verification.

use accel_core::AgentId;

use crate::{ResidualState, SelectionDiagnostics};

/// The per-agent record handed to [`SelectionObserver::on_decision`].
#[derive(Copy, Clone, Debug)]
pub struct AgentDecision {
    pub agent: AgentId,
    /// Marginal objective change if the agent is selected.
    pub score_if_one: f64,
    /// Marginal objective change if the agent keeps its executed plan.
    pub score_if_zero: f64,
    /// Greedy (smoothing-free) marginal if selected.
    pub greedy_if_one: f64,
    /// Greedy (smoothing-free) marginal if not selected.
    pub greedy_if_zero: f64,
    /// The recipe's committed decision.
    pub selected: bool,
}

/// Callbacks invoked by
/// [`ReplannerSelection::draw_replanners_observed`][crate::ReplannerSelection::draw_replanners_observed]
/// at key points of a pass.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  Hooks are called strictly in pass
/// order: one `on_pass_start`, one `on_decision` per agent in sweep order,
/// one `on_pass_end`.
///
/// # Example — decision logger
///
/// ```rust,ignore
/// struct DecisionPrinter;
///
/// impl SelectionObserver for DecisionPrinter {
///     fn on_decision(&mut self, d: &AgentDecision) {
///         println!("{}: {} ({:+.3} vs {:+.3})",
///             d.agent, d.selected, d.score_if_one, d.score_if_zero);
///     }
/// }
/// ```
pub trait SelectionObserver {
    /// Called once before the sweep, after the residuals are seeded.
    fn on_pass_start(&mut self, _lambda: f64, _uniform_objective: f64) {}

    /// Called after each agent's decision is committed.
    fn on_decision(&mut self, _decision: &AgentDecision) {}

    /// Called once after the sweep, with read-only access to the final
    /// residual state and the finished diagnostics.
    fn on_pass_end(&mut self, _state: &ResidualState, _diagnostics: &SelectionDiagnostics) {}
}

/// A [`SelectionObserver`] that does nothing.  Use when you need to run a
/// pass but don't want callbacks.
pub struct NoopObserver;

impl SelectionObserver for NoopObserver {}
