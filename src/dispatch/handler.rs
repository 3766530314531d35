//! Handler types shared by middleware and route chains.

use crate::dispatch::error::DispatchError;
use crate::dispatch::next::Next;
use crate::dispatch::request::Request;
use crate::dispatch::response::Response;

/// What a handler returns. Errors from the continuation are propagated with `?`.
pub type HandlerResult = Result<(), DispatchError>;

/// A type-erased handler, usable as middleware or as a route handler.
pub type BoxedHandler<T> =
    Box<dyn Fn(&Request, &mut Response<T>, &mut Next<'_, T>) -> HandlerResult + Send + Sync>;

/// Box a closure or function as a handler.
///
/// ```rust
/// use route_dispatch::{handler, App};
///
/// let mut app = App::new(|content: String| println!("{content}"), |_: &str| {});
/// app.register_route(
///     "hello/:name",
///     [handler(|req, res, _next| {
///         res.send(format!("Hello {}", req.param("name").unwrap_or("stranger")));
///         Ok(())
///     })],
/// )
/// .unwrap();
///
/// app.dispatch("hello/world").unwrap();
/// ```
pub fn handler<T, F>(f: F) -> BoxedHandler<T>
where
    F: Fn(&Request, &mut Response<T>, &mut Next<'_, T>) -> HandlerResult + Send + Sync + 'static,
{
    Box::new(f)
}
