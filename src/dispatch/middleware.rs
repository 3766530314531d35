//! Global middleware chain.
//!
//! Append-only; dispatch order is registration order across all calls.

/// Ordered handlers run before any route handler.
#[derive(Debug)]
pub struct MiddlewareChain<H> {
    handlers: Vec<H>,
}

impl<H> Default for MiddlewareChain<H> {
    fn default() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }
}

impl<H> MiddlewareChain<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `handlers`, returning how many were added.
    pub fn register<I>(&mut self, handlers: I) -> usize
    where
        I: IntoIterator<Item = H>,
    {
        let before = self.handlers.len();
        self.handlers.extend(handlers);
        let added = self.handlers.len() - before;

        tracing::debug!(added, total = self.handlers.len(), "Middleware registered");
        added
    }

    pub fn handlers(&self) -> &[H] {
        &self.handlers
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
