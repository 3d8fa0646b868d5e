//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (exclusions reference group participants)
//! - Enforce exclusion policy (no self exclusions, owner never excluded)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ExchangeConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::{ExchangeConfig, ExclusionConfig, GroupConfig};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("unknown log level '{0}'")]
    UnknownLogLevel(String),

    #[error("solver.phase_limit must be greater than zero")]
    ZeroPhaseLimit,

    #[error("duplicate group name '{0}'")]
    DuplicateGroup(String),

    #[error("group '{group}' needs at least two participants, found {count}")]
    TooFewParticipants { group: String, count: usize },

    #[error("group '{group}' lists participant '{participant}' more than once")]
    DuplicateParticipant { group: String, participant: String },

    #[error("group '{group}' exclusion references unknown participant '{participant}'")]
    UnknownParticipant { group: String, participant: String },

    #[error("group '{group}' excludes '{participant}' from drawing themselves")]
    SelfExclusion { group: String, participant: String },

    #[error("group '{group}' may not exclude its owner '{owner}'")]
    OwnerExcluded { group: String, owner: String },
}

/// Validate the whole configuration.
pub fn validate_config(config: &ExchangeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.observability.log_level.to_lowercase().as_str()) {
        errors.push(ValidationError::UnknownLogLevel(config.observability.log_level.clone()));
    }

    if config.solver.phase_limit == Some(0) {
        errors.push(ValidationError::ZeroPhaseLimit);
    }

    let mut names = HashSet::new();
    for group in &config.groups {
        if !names.insert(group.name.as_str()) {
            errors.push(ValidationError::DuplicateGroup(group.name.clone()));
        }
        collect_group_errors(group, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a single group definition.
pub fn validate_group(group: &GroupConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    collect_group_errors(group, &mut errors);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Render a list of validation errors on one line.
pub(crate) fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn collect_group_errors(group: &GroupConfig, errors: &mut Vec<ValidationError>) {
    if group.participants.len() < 2 {
        errors.push(ValidationError::TooFewParticipants {
            group: group.name.clone(),
            count: group.participants.len(),
        });
    }

    let mut members = HashSet::new();
    for participant in &group.participants {
        if !members.insert(participant.as_str()) {
            errors.push(ValidationError::DuplicateParticipant {
                group: group.name.clone(),
                participant: participant.clone(),
            });
        }
    }

    // Symmetric exclusions target both ends; history only targets the receiver.
    for pair in &group.exclusions {
        check_pair(group, &members, pair, errors);
        check_owner(group, &pair.giver, errors);
        check_owner(group, &pair.receiver, errors);
    }
    for pair in &group.history {
        check_pair(group, &members, pair, errors);
        check_owner(group, &pair.receiver, errors);
    }
}

fn check_pair(group: &GroupConfig, members: &HashSet<&str>, pair: &ExclusionConfig, errors: &mut Vec<ValidationError>) {
    for participant in [&pair.giver, &pair.receiver] {
        if !members.contains(participant.as_str()) {
            errors.push(ValidationError::UnknownParticipant {
                group: group.name.clone(),
                participant: participant.clone(),
            });
        }
    }
    if pair.giver == pair.receiver {
        errors.push(ValidationError::SelfExclusion {
            group: group.name.clone(),
            participant: pair.giver.clone(),
        });
    }
}

fn check_owner(group: &GroupConfig, target: &str, errors: &mut Vec<ValidationError>) {
    if group.owner.as_deref() == Some(target) {
        errors.push(ValidationError::OwnerExcluded {
            group: group.name.clone(),
            owner: target.to_string(),
        });
    }
}
