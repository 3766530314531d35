//! Path matching seam.
//!
//! # Responsibilities
//! - Define what the route table needs from a compiled pattern
//! - Define how patterns are turned into matchers
//!
//! # Design Decisions
//! - The route table never inspects pattern syntax; it only asks a matcher
//!   whether a path matches and what it captured
//! - Captures are positional, one slot per capture group, `None` for a group
//!   that took no part in the match (e.g. an omitted optional parameter)
//! - Compilers are pluggable so a different pattern dialect can be swapped in

use std::fmt;

use crate::routing::pattern::PatternError;

/// Positional values captured by a successful match.
pub type Captures<'p> = Vec<Option<&'p str>>;

/// A compiled route pattern.
pub trait Matcher: Send + Sync + fmt::Debug {
    /// Parameter names in declaration order.
    fn keys(&self) -> &[String];

    /// Returns the captured values if `path` matches, `None` otherwise.
    fn captures<'p>(&self, path: &'p str) -> Option<Captures<'p>>;

    /// Returns true if `path` matches this pattern.
    fn matches(&self, path: &str) -> bool {
        self.captures(path).is_some()
    }
}

/// Turns a pattern string into a [`Matcher`].
pub trait PatternCompiler: Send + Sync {
    fn compile(&self, pattern: &str) -> Result<Box<dyn Matcher>, PatternError>;
}
