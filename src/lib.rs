//! Gift exchange assignment library.
//!
//! Assigns every participant exactly one other participant to give to,
//! respecting exclusions, via Hopcroft-Karp bipartite matching.

pub mod config;
pub mod exchange;
pub mod matching;
pub mod notify;
pub mod observability;
pub mod store;

pub use config::schema::ExchangeConfig;
pub use exchange::{Assignment, AssignmentService, ExchangeError, ExclusionSet, Solver};
pub use matching::{EdgeRegistry, HopcroftKarp, MatchError};
