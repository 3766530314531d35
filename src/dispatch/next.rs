//! Continuation protocol.
//!
//! # States
//! - Middleware: advancing through the shared middleware chain
//! - Handlers: advancing through the matched route's handler chain
//!
//! # State Transitions
//! ```text
//! Middleware → Middleware: continue, another middleware remains
//! Middleware → Handlers:   continue past the last middleware, or skip
//! Handlers → Handlers:     continue, another route handler remains
//! Handlers → error:        continue past the last route handler (HandlersExhausted)
//! ```
//!
//! # Design Decisions
//! - One `Next` per dispatch; both cursors are plain fields, not captured state
//! - A handler that does not call the continuation ends the dispatch
//! - Each call advances the shared cursors; calling twice from one handler
//!   skips an entry unless the re-entry guard is enabled

use crate::dispatch::error::DispatchError;
use crate::dispatch::handler::{BoxedHandler, HandlerResult};
use crate::dispatch::request::Request;
use crate::dispatch::response::Response;

/// Argument to the continuation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Signal {
    /// Run the next middleware, or the next route handler once middleware is done.
    #[default]
    Continue,
    /// Skip every remaining middleware and continue with the route handlers.
    SkipToHandlers,
}

/// Which chain the continuation is currently advancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Middleware,
    Handlers,
}

/// Position in both chains. `None` is "before first".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Cursor {
    middleware: Option<usize>,
    handler: Option<usize>,
}

fn step(index: Option<usize>) -> usize {
    index.map_or(0, |i| i + 1)
}

/// The continuation passed to every handler of one dispatch.
pub struct Next<'a, T> {
    path: &'a str,
    middleware: &'a [BoxedHandler<T>],
    handlers: &'a [BoxedHandler<T>],
    cursor: Cursor,
    guard_reentry: bool,
    // One flag per active handler frame: has it called the continuation yet?
    frames: Vec<bool>,
}

impl<'a, T> Next<'a, T> {
    pub fn new(
        path: &'a str,
        middleware: &'a [BoxedHandler<T>],
        handlers: &'a [BoxedHandler<T>],
        guard_reentry: bool,
    ) -> Self {
        Self {
            path,
            middleware,
            handlers,
            cursor: Cursor::default(),
            guard_reentry,
            frames: Vec::new(),
        }
    }

    /// The chain the next plain call will advance.
    pub fn phase(&self) -> Phase {
        match self.cursor.middleware {
            Some(i) if i >= self.middleware.len() => Phase::Handlers,
            None if self.middleware.is_empty() => Phase::Handlers,
            _ => Phase::Middleware,
        }
    }

    /// Continue with the next middleware or route handler.
    pub fn run(&mut self, req: &Request, res: &mut Response<T>) -> HandlerResult {
        self.call(req, res, Signal::Continue)
    }

    /// Skip the remaining middleware and continue with the route handlers.
    pub fn skip(&mut self, req: &Request, res: &mut Response<T>) -> HandlerResult {
        self.call(req, res, Signal::SkipToHandlers)
    }

    /// Advance the cursors according to `signal` and invoke the handler found there.
    pub fn call(&mut self, req: &Request, res: &mut Response<T>, signal: Signal) -> HandlerResult {
        self.check_reentry()?;

        match signal {
            Signal::SkipToHandlers => {
                tracing::trace!(path = self.path, "Skipping remaining middleware");
                self.cursor.middleware = Some(self.middleware.len());
            }
            Signal::Continue => {
                if self.phase() == Phase::Middleware {
                    self.cursor.middleware = Some(step(self.cursor.middleware));
                }
            }
        }

        let middleware = self.middleware;
        if let Some(index) = self.cursor.middleware.filter(|&i| i < middleware.len()) {
            tracing::trace!(path = self.path, index, "Invoking middleware");
            return self.invoke(&middleware[index], req, res);
        }

        let index = step(self.cursor.handler);
        self.cursor.handler = Some(index);

        let handlers = self.handlers;
        match handlers.get(index) {
            Some(handler) => {
                tracing::trace!(path = self.path, index, "Invoking route handler");
                self.invoke(handler, req, res)
            }
            None => Err(DispatchError::HandlersExhausted {
                path: self.path.to_string(),
            }),
        }
    }

    fn invoke(
        &mut self,
        handler: &BoxedHandler<T>,
        req: &Request,
        res: &mut Response<T>,
    ) -> HandlerResult {
        self.frames.push(false);
        let result = handler(req, res, &mut *self);
        self.frames.pop();
        result
    }

    fn check_reentry(&mut self) -> HandlerResult {
        if !self.guard_reentry {
            return Ok(());
        }
        match self.frames.last_mut() {
            Some(called) if *called => Err(DispatchError::ContinuationReused {
                path: self.path.to_string(),
            }),
            Some(called) => {
                *called = true;
                Ok(())
            }
            None => Ok(()),
        }
    }
}
