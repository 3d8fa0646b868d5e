//! Bipartite matching engine.
//!
//! # Data Flow
//! ```text
//! caller offers legal (giver, receiver) edges
//!     → registry.rs (EdgeRegistry, per-giver adjacency)
//!     → registry.rs (shuffle_adjacency, once, injected Rng)
//!     → hopcroft_karp.rs (BFS layering ⇄ DFS augmentation until no path)
//!     → extract.rs (vertex indices → domain identifiers)
//!     → Extraction: complete mapping or IncompleteMatching
//! ```
//!
//! # Vertex Space
//! Givers occupy `0..G`, receivers occupy `G..G+R`. The `G` offset is the only
//! translation between the two sides.
//!
//! # Design Decisions
//! - All state is owned by one solve and dropped afterwards
//! - Match and layer state are flat vectors indexed by vertex
//! - "Unmatched" and "unreached" are enum variants, never magic numbers
//! - The registry performs no exclusion logic; the caller omits illegal edges

pub mod error;
pub mod extract;
pub mod hopcroft_karp;
pub mod registry;
pub mod vertex;

pub use error::{MatchError, MatchResult, Side};
pub use extract::{extract, Extraction};
pub use hopcroft_karp::{HopcroftKarp, Matching};
pub use registry::EdgeRegistry;
pub use vertex::{Layer, MatchState, Partner, VertexId};
