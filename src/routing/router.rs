//! Route lookup.
//!
//! # Responsibilities
//! - Store compiled routes keyed by their pattern string
//! - Look up the first route matching a path
//! - Return the matched route together with its captures, or explicit no-match
//!
//! # Design Decisions
//! - Registration order decides between overlapping patterns (first wins)
//! - Re-registering a pattern replaces the entry in its original slot
//! - O(n) scan over routes, matching each compiled pattern in turn

use std::collections::HashMap;

use crate::routing::matcher::{Captures, Matcher, PatternCompiler};
use crate::routing::pattern::PatternError;

/// A registered pattern with its matcher and handler chain.
#[derive(Debug)]
pub struct Route<H> {
    pattern: String,
    keys: Vec<String>,
    matcher: Box<dyn Matcher>,
    handlers: Vec<H>,
}

impl<H> Route<H> {
    /// The pattern string this route was registered under.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Parameter names in declaration order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// The route's own handler chain.
    pub fn handlers(&self) -> &[H] {
        &self.handlers
    }
}

/// Result of a successful lookup.
#[derive(Debug)]
pub struct Resolved<'t, 'p, H> {
    pub route: &'t Route<H>,
    pub captures: Captures<'p>,
}

/// Ordered collection of routes.
#[derive(Debug)]
pub struct RouteTable<H> {
    routes: Vec<Route<H>>,
    by_pattern: HashMap<String, usize>,
}

impl<H> Default for RouteTable<H> {
    fn default() -> Self {
        Self {
            routes: Vec::new(),
            by_pattern: HashMap::new(),
        }
    }
}

impl<H> RouteTable<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile `pattern` and store it with `handlers`.
    ///
    /// Returns `true` if an existing route with the same pattern was replaced.
    /// Compilation errors are returned as produced by the compiler.
    pub fn register(
        &mut self,
        compiler: &dyn PatternCompiler,
        pattern: &str,
        handlers: Vec<H>,
    ) -> Result<bool, PatternError> {
        let matcher = compiler.compile(pattern)?;
        let route = Route {
            pattern: pattern.to_string(),
            keys: matcher.keys().to_vec(),
            matcher,
            handlers,
        };

        tracing::debug!(
            pattern,
            keys = ?route.keys,
            handlers = route.handlers.len(),
            "Route registered"
        );

        match self.by_pattern.get(pattern) {
            Some(&slot) => {
                self.routes[slot] = route;
                Ok(true)
            }
            None => {
                self.by_pattern.insert(pattern.to_string(), self.routes.len());
                self.routes.push(route);
                Ok(false)
            }
        }
    }

    /// Find the first route whose matcher accepts `path`.
    pub fn resolve<'p>(&self, path: &'p str) -> Option<Resolved<'_, 'p, H>> {
        self.routes.iter().find_map(|route| {
            route
                .matcher
                .captures(path)
                .map(|captures| Resolved { route, captures })
        })
    }

    /// Look up a route by its exact pattern string.
    pub fn get(&self, pattern: &str) -> Option<&Route<H>> {
        self.by_pattern.get(pattern).map(|&slot| &self.routes[slot])
    }

    /// Registered patterns in registration order.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(|route| route.pattern.as_str())
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
