//! Turns participants and exclusions into an assignment.
//!
//! # Responsibilities
//! - Offer the registry every legal edge (no self pairs, no exclusions)
//! - Shuffle once with the configured or injected random source
//! - Run the matching engine and reject incomplete results

use std::hash::Hash;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::SolverConfig;
use crate::exchange::types::{Assignment, ExclusionSet};
use crate::matching::{extract, EdgeRegistry, HopcroftKarp, MatchResult};
use crate::observability::metrics;

/// Stateless assignment solver; every call builds a fresh engine.
#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Closed exchange: the same participants give and receive.
    pub fn solve<T>(&self, participants: &[T], exclusions: &ExclusionSet<T>) -> MatchResult<Assignment<T>>
    where
        T: Clone + Eq + Hash,
    {
        self.solve_bipartite(participants, participants, exclusions)
    }

    /// Solve with distinct giver and receiver lists.
    ///
    /// Uses `StdRng` seeded from `solver.seed` when configured, otherwise the
    /// thread-local generator.
    pub fn solve_bipartite<T>(
        &self,
        givers: &[T],
        receivers: &[T],
        exclusions: &ExclusionSet<T>,
    ) -> MatchResult<Assignment<T>>
    where
        T: Clone + Eq + Hash,
    {
        match self.config.seed {
            Some(seed) => {
                let mut rng = StdRng::seed_from_u64(seed);
                self.solve_bipartite_with_rng(givers, receivers, exclusions, &mut rng)
            }
            None => self.solve_bipartite_with_rng(givers, receivers, exclusions, &mut rand::thread_rng()),
        }
    }

    pub fn solve_with_rng<T, R>(
        &self,
        participants: &[T],
        exclusions: &ExclusionSet<T>,
        rng: &mut R,
    ) -> MatchResult<Assignment<T>>
    where
        T: Clone + Eq + Hash,
        R: Rng + ?Sized,
    {
        self.solve_bipartite_with_rng(participants, participants, exclusions, rng)
    }

    pub fn solve_bipartite_with_rng<T, R>(
        &self,
        givers: &[T],
        receivers: &[T],
        exclusions: &ExclusionSet<T>,
        rng: &mut R,
    ) -> MatchResult<Assignment<T>>
    where
        T: Clone + Eq + Hash,
        R: Rng + ?Sized,
    {
        let start = Instant::now();

        let mut registry = build_registry(givers, receivers, exclusions)?;
        registry.shuffle_adjacency(rng);

        let mut engine = HopcroftKarp::new(&registry);
        if let Some(limit) = self.config.phase_limit {
            engine = engine.with_phase_limit(limit);
        }
        let matching = engine.run();

        let extraction = extract(&matching.state, givers, receivers);
        let (matched, total) = (extraction.matched(), extraction.total());

        match extraction.into_complete() {
            Ok(pairs) => {
                metrics::record_solve("complete", matching.phases, total);
                tracing::info!(
                    participants = total,
                    edges = registry.edge_count(),
                    phases = matching.phases,
                    elapsed_us = start.elapsed().as_micros() as u64,
                    "Assignment solved"
                );
                Ok(Assignment::from(pairs))
            }
            Err(e) => {
                metrics::record_solve("incomplete", matching.phases, total);
                tracing::warn!(
                    matched,
                    participants = total,
                    edges = registry.edge_count(),
                    phase_limit_hit = matching.phase_limit_hit,
                    "No perfect matching; exclusions too strict"
                );
                Err(e)
            }
        }
    }
}

/// Register every (giver, receiver) pair that is neither a self pair nor
/// excluded.
pub fn build_registry<T>(givers: &[T], receivers: &[T], exclusions: &ExclusionSet<T>) -> MatchResult<EdgeRegistry>
where
    T: Clone + Eq + Hash,
{
    let mut registry = EdgeRegistry::new(givers.len(), receivers.len());
    for (g, giver) in givers.iter().enumerate() {
        for (r, receiver) in receivers.iter().enumerate() {
            if giver == receiver || exclusions.contains(giver, receiver) {
                continue;
            }
            registry.register_edge(g, r)?;
        }
    }
    Ok(registry)
}
