//! Translate a finished matching back into domain identifiers.

use crate::matching::error::{MatchError, MatchResult};
use crate::matching::vertex::{MatchState, Partner};

/// Giver → receiver pairs recovered from a matching, in giver order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction<T> {
    pairs: Vec<(T, T)>,
    total: usize,
}

impl<T> Extraction<T> {
    /// Matched pairs; unmatched givers are omitted.
    pub fn pairs(&self) -> &[(T, T)] {
        &self.pairs
    }

    pub fn matched(&self) -> usize {
        self.pairs.len()
    }

    /// Number of givers the matching was asked to cover.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_complete(&self) -> bool {
        self.pairs.len() == self.total
    }

    /// Return the pairs only if every giver was matched.
    pub fn into_complete(self) -> MatchResult<Vec<(T, T)>> {
        if self.is_complete() {
            Ok(self.pairs)
        } else {
            Err(MatchError::IncompleteMatching {
                matched: self.pairs.len(),
                total: self.total,
            })
        }
    }
}

/// Map every matched giver to its receiver's domain identifier.
///
/// `givers` and `receivers` must be the same lists, in the same order, that
/// were used to build the registry.
pub fn extract<T: Clone>(state: &MatchState, givers: &[T], receivers: &[T]) -> Extraction<T> {
    let offset = state.giver_count();
    let pairs = givers
        .iter()
        .enumerate()
        .filter_map(|(g, giver)| match state.partner(g) {
            Partner::Matched(r) => receivers
                .get(r - offset)
                .map(|receiver| (giver.clone(), receiver.clone())),
            Partner::Unmatched => None,
        })
        .collect();

    Extraction {
        pairs,
        total: givers.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_extraction() {
        let mut state = MatchState::new(3, 3);
        state.pair(0, 4);
        state.pair(1, 5);
        state.pair(2, 3);

        let ids = [10u32, 20, 30];
        let extraction = extract(&state, &ids, &ids);
        assert!(extraction.is_complete());
        assert_eq!(
            extraction.into_complete().unwrap(),
            vec![(10, 20), (20, 30), (30, 10)]
        );
    }

    #[test]
    fn test_unmatched_givers_omitted() {
        let mut state = MatchState::new(3, 3);
        state.pair(1, 3);

        let ids = ["a", "b", "c"];
        let extraction = extract(&state, &ids, &ids);
        assert_eq!(extraction.pairs(), &[("b", "a")]);
        assert_eq!(extraction.matched(), 1);
        assert_eq!(extraction.total(), 3);
        assert_eq!(
            extraction.into_complete(),
            Err(MatchError::IncompleteMatching { matched: 1, total: 3 })
        );
    }

    #[test]
    fn test_empty_extraction_is_complete() {
        let state = MatchState::new(0, 0);
        let ids: [u8; 0] = [];
        assert!(extract(&state, &ids, &ids).is_complete());
    }
}
