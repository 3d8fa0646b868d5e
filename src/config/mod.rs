//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ExchangeConfig (validated, immutable)
//!     → solver / service / store / observability
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All sections have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::ExchangeConfig;
pub use schema::ExclusionConfig;
pub use schema::GroupConfig;
pub use schema::NotificationConfig;
pub use schema::ObservabilityConfig;
pub use schema::SolverConfig;
pub use schema::StoreConfig;
