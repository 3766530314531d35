//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration:
//!     pattern string
//!     → pattern.rs (tokenize, compile to regex)
//!     → router.rs (store matcher + handler chain under the pattern key)
//!
//! Lookup:
//!     path
//!     → router.rs (scan routes in registration order)
//!     → matcher.rs (test path, extract captures)
//!     → Return: matched Route + captures, or no match
//! ```
//!
//! # Design Decisions
//! - Deterministic: same path always resolves to the same route
//! - First match wins (registration order)
//! - Pattern syntax lives behind the `PatternCompiler` trait

pub mod matcher;
pub mod pattern;
pub mod router;

pub use matcher::{Captures, Matcher, PatternCompiler};
pub use pattern::{PathCompiler, PathPattern, PatternError};
pub use router::{Resolved, Route, RouteTable};
