//! Assignment persistence.
//!
//! # Responsibilities
//! - Replace a group's stored assignment as a single step
//! - Keep records unique per (group, giver)
//! - Answer "who does this giver give to?" lookups
//!
//! # Design Decisions
//! - Sync trait: stores are in-process maps, optionally snapshotted to disk
//! - Each replace gets a fresh run ID shared by all of its records

pub mod file;
pub mod memory;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::exchange::Assignment;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// One persisted giver → receiver row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    pub group: String,
    pub giver: String,
    pub receiver: String,
    pub run_id: Uuid,
}

/// Errors that can occur while persisting assignments.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The mapping lists the same giver twice.
    #[error("duplicate giver '{giver}' in group '{group}'")]
    DuplicateGiver { group: String, giver: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence collaborator for complete assignments.
pub trait AssignmentStore: Send + Sync + 'static {
    /// Delete the group's existing records and insert `assignment` in their
    /// place. Either the whole new set is visible afterwards or the old one is.
    fn replace_group(&self, group: &str, assignment: &Assignment<String>) -> StoreResult<Uuid>;

    /// All records currently stored for `group`, in giver order.
    fn group_assignments(&self, group: &str) -> Vec<AssignmentRecord>;

    fn receiver_for(&self, group: &str, giver: &str) -> Option<String> {
        self.group_assignments(group)
            .into_iter()
            .find(|r| r.giver == giver)
            .map(|r| r.receiver)
    }
}
