//! Edge registry: the permitted (giver, receiver) edges of one solve.
//!
//! # Responsibilities
//! - Hold each giver's ordered list of receiver vertices
//! - Reject out-of-range indices
//! - Shuffle every adjacency list in place before solving

use rand::Rng;

use crate::matching::error::{MatchError, MatchResult, Side};
use crate::matching::vertex::VertexId;

/// Adjacency lists keyed by giver index.
///
/// Receivers are stored in vertex space (`G + receiver`). Duplicate, self and
/// excluded edges are never filtered here; callers must not register them.
#[derive(Debug, Clone)]
pub struct EdgeRegistry {
    givers: usize,
    receivers: usize,
    adjacency: Vec<Vec<VertexId>>,
}

impl EdgeRegistry {
    /// Create a registry with no edges.
    pub fn new(givers: usize, receivers: usize) -> Self {
        Self {
            givers,
            receivers,
            adjacency: vec![Vec::new(); givers],
        }
    }

    /// Permit `giver` to be paired with `receiver` (both local indices).
    pub fn register_edge(&mut self, giver: usize, receiver: usize) -> MatchResult<()> {
        if giver >= self.givers {
            return Err(MatchError::InvalidIndex {
                side: Side::Giver,
                index: giver,
                bound: self.givers,
            });
        }
        if receiver >= self.receivers {
            return Err(MatchError::InvalidIndex {
                side: Side::Receiver,
                index: receiver,
                bound: self.receivers,
            });
        }

        self.adjacency[giver].push(self.givers + receiver);
        Ok(())
    }

    /// Fisher-Yates shuffle of every giver's adjacency list.
    pub fn shuffle_adjacency<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for edges in &mut self.adjacency {
            for i in (1..edges.len()).rev() {
                let j = rng.gen_range(0..=i);
                edges.swap(i, j);
            }
        }
    }

    /// Receiver vertices adjacent to `giver`.
    pub fn neighbors(&self, giver: VertexId) -> &[VertexId] {
        &self.adjacency[giver]
    }

    pub fn giver_count(&self) -> usize {
        self.givers
    }

    pub fn receiver_count(&self) -> usize {
        self.receivers
    }

    pub fn vertex_count(&self) -> usize {
        self.givers + self.receivers
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }
}
