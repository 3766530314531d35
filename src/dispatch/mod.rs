//! Dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! App::dispatch(path)
//!     → routing (first matching route + captures, or RouteNotFound)
//!     → request.rs (path + params in declaration order)
//!     → response.rs (app-level send/redirect, replaceable per dispatch)
//!     → next.rs (middleware chain, then the route's handler chain)
//!     → handlers deliver through Response; errors return to the caller
//! ```
//!
//! # Design Decisions
//! - Synchronous and directly recursive: each continuation call runs the next
//!   handler on the same stack
//! - Handlers signal continuation explicitly; there is no implicit success
//!   after the last route handler

pub mod app;
pub mod error;
pub mod handler;
pub mod middleware;
pub mod next;
pub mod request;
pub mod response;

pub use app::App;
pub use error::{BoxError, DispatchError, DispatchResult};
pub use handler::{handler, BoxedHandler, HandlerResult};
pub use middleware::MiddlewareChain;
pub use next::{Next, Phase, Signal};
pub use request::{Params, Request};
pub use response::{RedirectFn, Response, SendFn};
