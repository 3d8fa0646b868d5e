//! Vertex-indexed state for a single solve.
//!
//! # Responsibilities
//! - Track each vertex's partner (symmetric giver ⇄ receiver pairs)
//! - Track per-phase BFS layers for givers plus the terminal sentinel

/// Index into the vertex space (`0..G` givers, `G..G+R` receivers).
pub type VertexId = usize;

/// Current partner of a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Partner {
    #[default]
    Unmatched,
    Matched(VertexId),
}

/// BFS layer of a vertex in the current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layer {
    #[default]
    Unreached,
    At(u32),
}

/// What lies behind a receiver while walking the layered graph: the giver it
/// is matched to, or the terminal sentinel when it is free.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Target {
    Giver(VertexId),
    Terminal,
}

/// Partner of every vertex, giver and receiver alike.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchState {
    givers: usize,
    partners: Vec<Partner>,
}

impl MatchState {
    /// Create an empty matching over `givers + receivers` vertices.
    pub fn new(givers: usize, receivers: usize) -> Self {
        Self {
            givers,
            partners: vec![Partner::Unmatched; givers + receivers],
        }
    }

    /// Number of giver vertices.
    pub fn giver_count(&self) -> usize {
        self.givers
    }

    /// Partner of vertex `v`.
    pub fn partner(&self, v: VertexId) -> Partner {
        self.partners[v]
    }

    pub fn is_matched(&self, v: VertexId) -> bool {
        matches!(self.partners[v], Partner::Matched(_))
    }

    /// Pair giver `g` with receiver vertex `r`, overwriting both sides.
    pub(crate) fn pair(&mut self, g: VertexId, r: VertexId) {
        self.partners[g] = Partner::Matched(r);
        self.partners[r] = Partner::Matched(g);
    }

    /// Where walking through receiver `r` leads.
    pub(crate) fn target(&self, r: VertexId) -> Target {
        match self.partners[r] {
            Partner::Matched(g) => Target::Giver(g),
            Partner::Unmatched => Target::Terminal,
        }
    }

    /// Number of matched givers.
    pub fn size(&self) -> usize {
        self.partners[..self.givers]
            .iter()
            .filter(|p| matches!(p, Partner::Matched(_)))
            .count()
    }

    /// True when every pair points back at its partner and no giver is
    /// paired with a giver (or a receiver with a receiver).
    pub fn is_consistent(&self) -> bool {
        self.partners.iter().enumerate().all(|(v, p)| match *p {
            Partner::Unmatched => true,
            Partner::Matched(w) => {
                (v < self.givers) != (w < self.givers)
                    && self.partners.get(w) == Some(&Partner::Matched(v))
            }
        })
    }
}

/// Per-phase layers: one entry per giver and one for the terminal sentinel.
#[derive(Debug, Clone)]
pub(crate) struct Layering {
    givers: Vec<Layer>,
    terminal: Layer,
}

impl Layering {
    pub(crate) fn new(givers: usize) -> Self {
        Self {
            givers: vec![Layer::Unreached; givers],
            terminal: Layer::Unreached,
        }
    }

    pub(crate) fn reset(&mut self) {
        self.givers.fill(Layer::Unreached);
        self.terminal = Layer::Unreached;
    }

    pub(crate) fn get(&self, target: Target) -> Layer {
        match target {
            Target::Giver(g) => self.givers[g],
            Target::Terminal => self.terminal,
        }
    }

    pub(crate) fn set(&mut self, target: Target, layer: Layer) {
        match target {
            Target::Giver(g) => self.givers[g] = layer,
            Target::Terminal => self.terminal = layer,
        }
    }

    pub(crate) fn giver(&self, g: VertexId) -> Layer {
        self.givers[g]
    }

    pub(crate) fn terminal(&self) -> Layer {
        self.terminal
    }
}
