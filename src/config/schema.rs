//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the exchange.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ExchangeConfig {
    /// Matching engine settings.
    pub solver: SolverConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Notification settings.
    pub notifications: NotificationConfig,

    /// Where assignments are persisted.
    pub store: StoreConfig,

    /// Exchange groups.
    pub groups: Vec<GroupConfig>,
}

impl ExchangeConfig {
    /// Find a group by name.
    pub fn group(&self, name: &str) -> Option<&GroupConfig> {
        self.groups.iter().find(|g| g.name == name)
    }
}

/// Solver configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SolverConfig {
    /// Override the default phase cap (participant count + 1).
    pub phase_limit: Option<usize>,

    /// Fixed RNG seed for reproducible draws. Unset in production.
    pub seed: Option<u64>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Notification configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Send notifications after a successful draw.
    pub enabled: bool,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Store configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct StoreConfig {
    /// JSON file for persisted assignments. In-memory only when unset.
    pub path: Option<String>,
}

/// A single exchange group.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GroupConfig {
    /// Unique group name.
    pub name: String,

    /// Group owner; may never be the target of an exclusion.
    #[serde(default)]
    pub owner: Option<String>,

    /// Participants, each of whom gives and receives exactly once.
    pub participants: Vec<String>,

    /// Pairs that may not draw each other (applied in both directions).
    #[serde(default)]
    pub exclusions: Vec<ExclusionConfig>,

    /// Previous draws to avoid repeating (applied one way only).
    #[serde(default)]
    pub history: Vec<ExclusionConfig>,
}

/// A forbidden giver → receiver pair.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExclusionConfig {
    pub giver: String,
    pub receiver: String,
}
