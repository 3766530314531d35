//! In-process path routing with a cooperative middleware chain.
//!
//! # Architecture Overview
//!
//! ```text
//!   register_route(pattern, handlers)      register_middleware(handlers)
//!            │                                        │
//!            ▼                                        ▼
//!   ┌──────────────────┐                    ┌──────────────────┐
//!   │     routing      │                    │    middleware    │
//!   │ pattern → regex  │                    │  chain (global)  │
//!   │ route table      │                    └────────┬─────────┘
//!   └────────┬─────────┘                             │
//!            │ first match + captures                │
//!            ▼                                       ▼
//!   dispatch(path) ──▶ Request{path, params} ──▶ Next: middleware… ──▶ route handlers…
//!                      Response{send, redirect}        │
//!                                                      └──▶ send / redirect callbacks
//! ```
//!
//! Handlers have the shape `(request, response, next)` and decide whether the
//! dispatch continues by calling `next.run`, `next.skip` (jump past the
//! remaining middleware) or nothing at all.
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use route_dispatch::{handler, App};
//!
//! let log = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&log);
//! let mut app = App::new(move |content: String| sink.lock().unwrap().push(content), |_: &str| {});
//!
//! app.register_middleware([handler(|req, res, next| {
//!     res.wrap_send(|content: String, send| send(format!("{content}!")));
//!     next.run(req, res)
//! })]);
//! app.register_route("hello/:name", [handler(|req, res, _next| {
//!     res.send(format!("Hello {}", req.param("name").unwrap_or_default()));
//!     Ok(())
//! })])?;
//!
//! app.dispatch("hello/world")?;
//! assert_eq!(*log.lock().unwrap(), ["Hello world!"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Core subsystems
pub mod dispatch;
pub mod routing;

// Cross-cutting concerns
pub mod config;
pub mod observability;

pub use config::RouterConfig;
pub use dispatch::{
    handler, App, BoxedHandler, DispatchError, HandlerResult, Next, Params, Request, Response,
    Signal,
};
pub use routing::{Matcher, PathCompiler, PatternCompiler, PatternError};
