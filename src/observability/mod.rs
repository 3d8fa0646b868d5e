//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, histograms via the metrics facade)
//!
//! Consumers:
//!     → stderr (fmt layer)
//!     → any metrics recorder the embedding application installs
//! ```
//!
//! # Design Decisions
//! - Structured logging with fields, not formatted strings
//! - RUST_LOG overrides the configured level
//! - Metrics are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
