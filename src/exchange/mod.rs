//! Gift exchange subsystem.
//!
//! # Data Flow
//! ```text
//! GroupConfig (participants, exclusions, history)
//!     → service.rs (validate, build ExclusionSet)
//!     → solver.rs (legal edges → EdgeRegistry → shuffle → HopcroftKarp)
//!     → Assignment<String> or IncompleteMatching
//!     → store (atomic per-group replace)
//!     → notify (spawned, best-effort)
//! ```
//!
//! # Design Decisions
//! - Exclusion policy lives here, never in the matching engine
//! - Incomplete matchings are never persisted, even partially
//! - Notification failures are logged and never roll back the store

pub mod service;
pub mod solver;
pub mod types;

pub use service::{exclusions_for, AssignmentRun, AssignmentService};
pub use solver::{build_registry, Solver};
pub use types::{Assignment, ExchangeError, ExchangeResult, ExclusionSet, Pairing};
