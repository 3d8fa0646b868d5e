//! Hopcroft-Karp maximum bipartite matching.
//!
//! # Phases
//! ```text
//! Phase-Start
//!     → Layering   (BFS from every free giver; terminal layer finite?)
//!         no  → Done (matching is maximum)
//!         yes → Augmenting (DFS along layer d → d+1 edges only)
//!     → Phase-Start
//! ```
//!
//! The DFS keeps an explicit stack of givers and a per-giver edge cursor, so
//! path length is bounded by the heap rather than the call stack and each
//! edge is scanned at most once per phase.

use std::collections::VecDeque;

use crate::matching::registry::EdgeRegistry;
use crate::matching::vertex::{Layer, Layering, MatchState, Partner, Target, VertexId};

/// Result of running the engine to completion.
#[derive(Debug, Clone)]
pub struct Matching {
    /// Final partner state (maximum unless the phase cap was hit).
    pub state: MatchState,
    /// Number of layering phases that found an augmenting path.
    pub phases: usize,
    /// Set when the loop stopped on the phase cap instead of converging.
    pub phase_limit_hit: bool,
}

/// One Hopcroft-Karp solve over a borrowed registry.
#[derive(Debug)]
pub struct HopcroftKarp<'g> {
    graph: &'g EdgeRegistry,
    state: MatchState,
    layers: Layering,
    cursors: Vec<usize>,
    phase_limit: usize,
}

impl<'g> HopcroftKarp<'g> {
    /// Create an engine with an empty matching.
    ///
    /// Every augmenting phase grows the matching by at least one, so
    /// `giver_count + 1` phases is a hard upper bound.
    pub fn new(graph: &'g EdgeRegistry) -> Self {
        let givers = graph.giver_count();
        Self {
            graph,
            state: MatchState::new(givers, graph.receiver_count()),
            layers: Layering::new(givers),
            cursors: vec![0; givers],
            phase_limit: givers + 1,
        }
    }

    /// Override the phase cap.
    pub fn with_phase_limit(mut self, limit: usize) -> Self {
        self.phase_limit = limit;
        self
    }

    /// Alternate layering and augmentation until no augmenting path remains.
    pub fn run(mut self) -> Matching {
        let mut phases = 0;

        loop {
            if !self.build_layers() {
                break;
            }
            if phases == self.phase_limit {
                tracing::error!(
                    phase_limit = self.phase_limit,
                    matched = self.state.size(),
                    givers = self.graph.giver_count(),
                    "Phase limit reached before matching converged"
                );
                return Matching {
                    state: self.state,
                    phases,
                    phase_limit_hit: true,
                };
            }
            phases += 1;

            self.cursors.fill(0);
            let mut augmented = 0;
            for g in 0..self.graph.giver_count() {
                if !self.state.is_matched(g) && self.augment_from(g) {
                    augmented += 1;
                }
            }

            tracing::debug!(
                phase = phases,
                augmented,
                matched = self.state.size(),
                "Augmenting phase complete"
            );
        }

        Matching {
            state: self.state,
            phases,
            phase_limit_hit: false,
        }
    }

    /// BFS from all free givers. Returns true if the terminal was reached.
    fn build_layers(&mut self) -> bool {
        let graph = self.graph;
        self.layers.reset();
        let mut queue = VecDeque::new();

        for g in 0..graph.giver_count() {
            if !self.state.is_matched(g) {
                self.layers.set(Target::Giver(g), Layer::At(0));
                queue.push_back(g);
            }
        }

        while let Some(u) = queue.pop_front() {
            let Layer::At(d) = self.layers.giver(u) else {
                continue;
            };
            for &v in graph.neighbors(u) {
                let w = self.state.target(v);
                if self.layers.get(w) == Layer::Unreached {
                    self.layers.set(w, Layer::At(d + 1));
                    if let Target::Giver(next) = w {
                        queue.push_back(next);
                    }
                }
            }
        }

        self.layers.terminal() != Layer::Unreached
    }

    /// Search for a shortest augmenting path rooted at free giver `root` and
    /// flip it if found. Givers that dead-end are dropped from the layering
    /// for the rest of the phase.
    fn augment_from(&mut self, root: VertexId) -> bool {
        let graph = self.graph;
        let mut path = vec![root];

        while let Some(&u) = path.last() {
            let neighbors = graph.neighbors(u);
            let cursor = self.cursors[u];

            let next_layer = match self.layers.giver(u) {
                Layer::At(d) if cursor < neighbors.len() => Layer::At(d + 1),
                _ => {
                    // Dead end: retire u and move the parent past its edge.
                    self.layers.set(Target::Giver(u), Layer::Unreached);
                    path.pop();
                    if let Some(&parent) = path.last() {
                        self.cursors[parent] += 1;
                    }
                    continue;
                }
            };

            let v = neighbors[cursor];
            let w = self.state.target(v);
            if self.layers.get(w) != next_layer {
                self.cursors[u] += 1;
                continue;
            }

            match w {
                Target::Terminal => {
                    self.flip(&path);
                    return true;
                }
                Target::Giver(next) => path.push(next),
            }
        }

        false
    }

    /// Re-pair every giver on `path` with the receiver under its cursor.
    /// Walking from the tail keeps the state symmetric at each step.
    fn flip(&mut self, path: &[VertexId]) {
        for &g in path.iter().rev() {
            let v = self.graph.neighbors(g)[self.cursors[g]];
            self.state.pair(g, v);
        }
    }
}

impl Matching {
    /// Receiver vertex matched to giver `g`, if any.
    pub fn receiver_of(&self, g: VertexId) -> Option<VertexId> {
        match self.state.partner(g) {
            Partner::Matched(r) => Some(r),
            Partner::Unmatched => None,
        }
    }
}
