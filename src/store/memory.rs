//! In-memory assignment store.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use dashmap::DashMap;
use uuid::Uuid;

use crate::exchange::Assignment;
use crate::store::{AssignmentRecord, AssignmentStore, StoreError, StoreResult};

/// A thread-safe map of group name → stored records.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<DashMap<String, Vec<AssignmentRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of groups with a stored assignment.
    pub fn group_count(&self) -> usize {
        self.inner.len()
    }

    /// Copy of every group's records.
    pub fn snapshot(&self) -> HashMap<String, Vec<AssignmentRecord>> {
        self.inner
            .iter()
            .map(|r| (r.key().clone(), r.value().clone()))
            .collect()
    }

    /// Load records previously produced by `snapshot`.
    pub fn restore(&self, groups: HashMap<String, Vec<AssignmentRecord>>) {
        for (group, records) in groups {
            self.inner.insert(group, records);
        }
    }

    /// Swap in `records` for `group`, returning whatever was there before.
    pub(crate) fn swap(&self, group: &str, records: Vec<AssignmentRecord>) -> Option<Vec<AssignmentRecord>> {
        self.inner.insert(group.to_string(), records)
    }

    /// Put back the records returned by `swap`.
    pub(crate) fn rollback(&self, group: &str, previous: Option<Vec<AssignmentRecord>>) {
        match previous {
            Some(records) => {
                self.inner.insert(group.to_string(), records);
            }
            None => {
                self.inner.remove(group);
            }
        }
    }
}

/// Convert an assignment into records, rejecting duplicate givers.
pub(crate) fn to_records(group: &str, assignment: &Assignment<String>, run_id: Uuid) -> StoreResult<Vec<AssignmentRecord>> {
    let mut seen = HashSet::new();
    assignment
        .iter()
        .map(|pair| {
            if !seen.insert(pair.giver.as_str()) {
                return Err(StoreError::DuplicateGiver {
                    group: group.to_string(),
                    giver: pair.giver.clone(),
                });
            }
            Ok(AssignmentRecord {
                group: group.to_string(),
                giver: pair.giver.clone(),
                receiver: pair.receiver.clone(),
                run_id,
            })
        })
        .collect()
}

impl AssignmentStore for MemoryStore {
    fn replace_group(&self, group: &str, assignment: &Assignment<String>) -> StoreResult<Uuid> {
        let run_id = Uuid::new_v4();
        let records = to_records(group, assignment, run_id)?;
        let previous = self.swap(group, records);
        tracing::debug!(
            group = %group,
            run_id = %run_id,
            replaced = previous.as_ref().map_or(0, Vec::len),
            "Replaced stored assignment"
        );
        Ok(run_id)
    }

    fn group_assignments(&self, group: &str) -> Vec<AssignmentRecord> {
        self.inner
            .get(group)
            .map(|r| r.value().clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment(pairs: &[(&str, &str)]) -> Assignment<String> {
        Assignment::from(
            pairs
                .iter()
                .map(|(g, r)| (g.to_string(), r.to_string()))
                .collect::<Vec<_>>(),
        )
    }

    #[test]
    fn test_replace_and_lookup() {
        let store = MemoryStore::new();
        let run_id = store
            .replace_group("family", &assignment(&[("a", "b"), ("b", "a")]))
            .unwrap();

        let records = store.group_assignments("family");
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.run_id == run_id));
        assert_eq!(store.receiver_for("family", "a"), Some("b".to_string()));
        assert_eq!(store.receiver_for("family", "z"), None);
        assert!(store.group_assignments("work").is_empty());
    }

    #[test]
    fn test_replace_discards_previous_run() {
        let store = MemoryStore::new();
        store
            .replace_group("g", &assignment(&[("a", "b"), ("b", "c"), ("c", "a")]))
            .unwrap();
        let second = store
            .replace_group("g", &assignment(&[("a", "c"), ("c", "b"), ("b", "a")]))
            .unwrap();

        let records = store.group_assignments("g");
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.run_id == second));
        assert_eq!(store.receiver_for("g", "a"), Some("c".to_string()));
        assert_eq!(store.group_count(), 1);
    }

    #[test]
    fn test_duplicate_giver_rejected_without_change() {
        let store = MemoryStore::new();
        store.replace_group("g", &assignment(&[("a", "b"), ("b", "a")])).unwrap();

        let err = store
            .replace_group("g", &assignment(&[("a", "b"), ("a", "c")]))
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateGiver { ref giver, .. } if giver == "a"));
        assert_eq!(store.receiver_for("g", "b"), Some("a".to_string()));
    }

    #[test]
    fn test_groups_are_independent() {
        let store = MemoryStore::new();
        store.replace_group("one", &assignment(&[("a", "b"), ("b", "a")])).unwrap();
        store.replace_group("two", &assignment(&[("a", "c"), ("c", "a")])).unwrap();

        assert_eq!(store.receiver_for("one", "a"), Some("b".to_string()));
        assert_eq!(store.receiver_for("two", "a"), Some("c".to_string()));
    }

    #[test]
    fn test_rollback_restores_previous() {
        let store = MemoryStore::new();
        store.replace_group("g", &assignment(&[("a", "b"), ("b", "a")])).unwrap();
        let before = store.group_assignments("g");

        let previous = store.swap("g", Vec::new());
        store.rollback("g", previous);
        assert_eq!(store.group_assignments("g"), before);

        let previous = store.swap("fresh", Vec::new());
        store.rollback("fresh", previous);
        assert_eq!(store.group_count(), 1);
    }
}
