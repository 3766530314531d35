//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! routing / dispatch produce:
//!     → tracing events (debug: registration, resolution; trace: cursor steps)
//!
//! Consumers:
//!     → logging.rs fmt subscriber, or whatever subscriber the host installs
//! ```

pub mod logging;

pub use logging::init_logging;
