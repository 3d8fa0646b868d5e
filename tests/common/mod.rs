//! Shared fixtures for integration tests.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use gift_exchange::config::{ExclusionConfig, GroupConfig};
use gift_exchange::exchange::Assignment;
use gift_exchange::notify::{Notifier, NotifyError};

/// Build a group with symmetric exclusions.
#[allow(dead_code)]
pub fn group(name: &str, participants: &[&str], exclusions: &[(&str, &str)]) -> GroupConfig {
    GroupConfig {
        name: name.to_string(),
        owner: None,
        participants: participants.iter().map(|p| p.to_string()).collect(),
        exclusions: exclusions
            .iter()
            .map(|(g, r)| ExclusionConfig {
                giver: g.to_string(),
                receiver: r.to_string(),
            })
            .collect(),
        history: Vec::new(),
    }
}

/// Check the bijection and no-self-pairing properties of a complete draw.
#[allow(dead_code)]
pub fn assert_derangement<T>(assignment: &Assignment<T>, participants: &[T])
where
    T: Clone + Eq + std::hash::Hash + std::fmt::Debug,
{
    assert_eq!(assignment.len(), participants.len());

    let givers: HashSet<_> = assignment.iter().map(|p| p.giver.clone()).collect();
    let receivers: HashSet<_> = assignment.iter().map(|p| p.receiver.clone()).collect();
    let expected: HashSet<_> = participants.iter().cloned().collect();
    assert_eq!(givers, expected, "every participant gives once");
    assert_eq!(receivers, expected, "every participant receives once");

    for pair in assignment.iter() {
        assert_ne!(pair.giver, pair.receiver, "self pairing");
    }
}

/// Notifier that remembers every call.
#[allow(dead_code)]
#[derive(Default)]
pub struct RecordingNotifier {
    pub calls: Mutex<Vec<(String, Vec<String>)>>,
}

impl Notifier for RecordingNotifier {
    async fn notify(&self, group: &str, recipients: Vec<String>) -> Result<(), NotifyError> {
        self.calls.lock().unwrap().push((group.to_string(), recipients));
        Ok(())
    }
}

/// Notifier that always fails.
#[allow(dead_code)]
#[derive(Default)]
pub struct FailingNotifier {
    pub attempts: AtomicUsize,
}

impl Notifier for FailingNotifier {
    async fn notify(&self, _group: &str, _recipients: Vec<String>) -> Result<(), NotifyError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(NotifyError::Unavailable("push gateway down".into()))
    }
}
