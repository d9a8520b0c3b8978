//! `accel-core` — foundational types for the `rust_accel` replanner-selection
//! engine.
//!
//! This crate is a dependency of every other `accel-*` crate.  It intentionally
//! has no `accel-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                          |
//! |-----------|---------------------------------------------------|
//! | [`ids`]   | `AgentId`, `LinkId`                               |
//! | [`time`]  | `TimeBin`, `TimeDiscretization`                   |
//! | [`rng`]   | `PassRng` (explicitly seeded selection-pass RNG)  |
//! | [`error`] | `CoreError`, `CoreResult`                         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::{AgentId, LinkId};
pub use rng::PassRng;
pub use time::{TimeBin, TimeDiscretization};
