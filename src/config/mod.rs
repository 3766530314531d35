//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RouterConfig (validated, immutable)
//!     → App::with_config (compiler options, dispatch policy)
//! ```
//!
//! # Design Decisions
//! - Config is read once when an app is built
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{DispatchConfig, MatchingConfig, ObservabilityConfig, ParamMismatch, RouterConfig};
pub use validation::ValidationError;
