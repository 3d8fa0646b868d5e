//! Assignment service: solve, persist, notify.
//!
//! # Responsibilities
//! - Validate a group and translate its exclusions into an ExclusionSet
//! - Run the solver and refuse to persist incomplete results
//! - Replace the group's stored assignment in one step
//! - Fire best-effort notifications that never affect the stored result

use std::sync::Arc;

use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::config::schema::{ExchangeConfig, GroupConfig};
use crate::config::validation::validate_group;
use crate::exchange::solver::Solver;
use crate::exchange::types::{Assignment, ExchangeError, ExchangeResult, ExclusionSet};
use crate::notify::{dispatch, Notifier};
use crate::store::AssignmentStore;

/// Outcome of a successful assignment request.
#[derive(Debug)]
pub struct AssignmentRun {
    pub group: String,
    /// ID shared by every stored record of this run.
    pub run_id: Uuid,
    pub assignment: Assignment<String>,
    /// Handle of the notification task, when notifications are enabled.
    pub notification: Option<JoinHandle<()>>,
}

/// Coordinates the solver with the persistence and notification collaborators.
pub struct AssignmentService<S, N> {
    solver: Solver,
    store: Arc<S>,
    notifier: Arc<N>,
    notifications_enabled: bool,
}

impl<S: AssignmentStore, N: Notifier> AssignmentService<S, N> {
    pub fn new(solver: Solver, store: Arc<S>, notifier: Arc<N>) -> Self {
        Self {
            solver,
            store,
            notifier,
            notifications_enabled: true,
        }
    }

    /// Build a service from the solver and notification sections of a config.
    pub fn from_config(config: &ExchangeConfig, store: Arc<S>, notifier: Arc<N>) -> Self {
        Self::new(Solver::new(config.solver.clone()), store, notifier)
            .with_notifications(config.notifications.enabled)
    }

    pub fn with_notifications(mut self, enabled: bool) -> Self {
        self.notifications_enabled = enabled;
        self
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Draw, store and announce a new assignment for `group`.
    ///
    /// Must be called from within a Tokio runtime; notifications run on a
    /// spawned task.
    pub async fn assign(&self, group: &GroupConfig) -> ExchangeResult<AssignmentRun> {
        validate_group(group).map_err(ExchangeError::InvalidGroup)?;

        let exclusions = exclusions_for(group);
        tracing::debug!(
            group = %group.name,
            participants = group.participants.len(),
            exclusions = exclusions.len(),
            "Solving assignment"
        );

        let assignment = match self.solver.solve(&group.participants, &exclusions) {
            Ok(assignment) => assignment,
            Err(e) => {
                tracing::warn!(group = %group.name, error = %e, "Assignment rejected");
                return Err(e.into());
            }
        };

        let run_id = self.store.replace_group(&group.name, &assignment)?;
        tracing::info!(
            group = %group.name,
            run_id = %run_id,
            pairs = assignment.len(),
            "Assignment stored"
        );

        let notification = self.notifications_enabled.then(|| {
            let recipients = assignment.givers().cloned().collect();
            dispatch(self.notifier.clone(), group.name.clone(), recipients)
        });

        Ok(AssignmentRun {
            group: group.name.clone(),
            run_id,
            assignment,
            notification,
        })
    }

    /// Look up a group by name in `config` and assign it.
    pub async fn assign_named(&self, config: &ExchangeConfig, name: &str) -> ExchangeResult<AssignmentRun> {
        let group = config
            .group(name)
            .ok_or_else(|| ExchangeError::UnknownGroup(name.to_string()))?;
        self.assign(group).await
    }
}

/// Symmetric exclusions plus one-way history entries for a group.
pub fn exclusions_for(group: &GroupConfig) -> ExclusionSet<String> {
    let mut exclusions = ExclusionSet::new();
    for pair in &group.exclusions {
        exclusions.forbid(pair.giver.clone(), pair.receiver.clone());
    }
    for pair in &group.history {
        exclusions.forbid_one_way(pair.giver.clone(), pair.receiver.clone());
    }
    exclusions
}
