//! Matching error definitions.

use std::fmt;
use thiserror::Error;

/// Which side of the bipartite graph an index belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Giver,
    Receiver,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Giver => write!(f, "giver"),
            Side::Receiver => write!(f, "receiver"),
        }
    }
}

/// Errors that can occur while building or solving a matching.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    /// An edge referenced a vertex outside the registry.
    #[error("{side} index {index} out of range (expected < {bound})")]
    InvalidIndex { side: Side, index: usize, bound: usize },

    /// The exclusion graph admits no perfect matching.
    #[error("incomplete matching: {matched} of {total} participants assigned")]
    IncompleteMatching { matched: usize, total: usize },
}

/// Result type for matching operations.
pub type MatchResult<T> = Result<T, MatchError>;
