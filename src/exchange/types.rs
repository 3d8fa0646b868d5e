//! Gift exchange domain types and error definitions.

use std::collections::HashSet;
use std::hash::Hash;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::validation::{join_errors, ValidationError};
use crate::matching::MatchError;
use crate::store::StoreError;

/// One giver → receiver assignment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pairing<T> {
    pub giver: T,
    pub receiver: T,
}

/// A complete set of pairings, in giver order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Assignment<T> {
    pairs: Vec<Pairing<T>>,
}

impl<T> Assignment<T> {
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pairing<T>> {
        self.pairs.iter()
    }

    /// Givers in assignment order.
    pub fn givers(&self) -> impl Iterator<Item = &T> {
        self.pairs.iter().map(|p| &p.giver)
    }
}

impl<T: PartialEq> Assignment<T> {
    /// Who `giver` gives to.
    pub fn receiver_of(&self, giver: &T) -> Option<&T> {
        self.pairs
            .iter()
            .find(|p| &p.giver == giver)
            .map(|p| &p.receiver)
    }
}

impl<T> From<Vec<(T, T)>> for Assignment<T> {
    fn from(pairs: Vec<(T, T)>) -> Self {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(giver, receiver)| Pairing { giver, receiver })
                .collect(),
        }
    }
}

impl<T> IntoIterator for Assignment<T> {
    type Item = Pairing<T>;
    type IntoIter = std::vec::IntoIter<Pairing<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}

/// Forbidden (giver, receiver) pairs.
#[derive(Debug, Clone)]
pub struct ExclusionSet<T> {
    pairs: HashSet<(T, T)>,
}

impl<T> Default for ExclusionSet<T> {
    fn default() -> Self {
        Self {
            pairs: HashSet::new(),
        }
    }
}

impl<T: Clone + Eq + Hash> ExclusionSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forbid `a` and `b` from drawing each other, in both directions.
    pub fn forbid(&mut self, a: T, b: T) {
        self.pairs.insert((b.clone(), a.clone()));
        self.pairs.insert((a, b));
    }

    /// Forbid only `giver` → `receiver` (e.g. last year's draw).
    pub fn forbid_one_way(&mut self, giver: T, receiver: T) {
        self.pairs.insert((giver, receiver));
    }

    pub fn contains(&self, giver: &T, receiver: &T) -> bool {
        // HashSet<(T, T)> cannot be queried with borrowed halves.
        self.pairs.contains(&(giver.clone(), receiver.clone()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Errors surfaced by the assignment service.
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// Engine failure: bad index or no perfect matching.
    #[error(transparent)]
    Match(#[from] MatchError),

    /// Persisting the assignment failed; nothing was replaced.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// No group with this name is configured.
    #[error("Unknown group: {0}")]
    UnknownGroup(String),

    /// The group definition failed validation.
    #[error("Invalid group: {}", join_errors(.0))]
    InvalidGroup(Vec<ValidationError>),
}

impl ExchangeError {
    /// True when the failure is a data condition the group owner can fix by
    /// relaxing exclusions.
    pub fn is_incomplete(&self) -> bool {
        matches!(self, ExchangeError::Match(MatchError::IncompleteMatching { .. }))
    }
}

/// Result type for exchange operations.
pub type ExchangeResult<T> = Result<T, ExchangeError>;
