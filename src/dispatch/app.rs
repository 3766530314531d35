//! Application front door: registration and dispatch.
//!
//! # Responsibilities
//! - Own the route table, the middleware chain and the app-level callbacks
//! - Resolve a path, build the request/response context, start the chain
//!
//! # Design Decisions
//! - Registration takes `&mut self`, dispatch takes `&self`: an `App` shared
//!   across threads can be dispatched concurrently but not mutated meanwhile
//! - Every dispatch owns its own `Request`, `Response` and `Next`
//! - Errors are returned to the caller, never handled here

use std::sync::Arc;

use crate::config::{DispatchConfig, ParamMismatch, RouterConfig};
use crate::dispatch::error::{DispatchError, DispatchResult};
use crate::dispatch::handler::BoxedHandler;
use crate::dispatch::middleware::MiddlewareChain;
use crate::dispatch::next::Next;
use crate::dispatch::request::{Params, Request};
use crate::dispatch::response::{RedirectFn, Response, SendFn};
use crate::routing::{Captures, PathCompiler, PatternCompiler, PatternError, Resolved, Route, RouteTable};

/// A router instance: routes, middleware and the callbacks handlers deliver through.
pub struct App<T> {
    routes: RouteTable<BoxedHandler<T>>,
    middleware: MiddlewareChain<BoxedHandler<T>>,
    compiler: Box<dyn PatternCompiler>,
    send: SendFn<T>,
    redirect: RedirectFn,
    options: DispatchConfig,
}

impl<T: 'static> App<T> {
    /// Create an app with default configuration.
    pub fn new<S, R>(send: S, redirect: R) -> Self
    where
        S: Fn(T) + Send + Sync + 'static,
        R: Fn(&str) + Send + Sync + 'static,
    {
        Self::with_config(send, redirect, &RouterConfig::default())
    }

    /// Create an app whose compiler and dispatch policy follow `config`.
    pub fn with_config<S, R>(send: S, redirect: R, config: &RouterConfig) -> Self
    where
        S: Fn(T) + Send + Sync + 'static,
        R: Fn(&str) + Send + Sync + 'static,
    {
        Self {
            routes: RouteTable::new(),
            middleware: MiddlewareChain::new(),
            compiler: Box::new(PathCompiler::new(config.matching)),
            send: Arc::new(send),
            redirect: Arc::new(redirect),
            options: config.dispatch,
        }
    }

    /// Use `compiler` for routes registered from now on.
    pub fn with_compiler<C>(mut self, compiler: C) -> Self
    where
        C: PatternCompiler + 'static,
    {
        self.compiler = Box::new(compiler);
        self
    }

    /// Register `handlers` for `pattern`, replacing any route registered
    /// under the same pattern string.
    pub fn register_route<I>(&mut self, pattern: &str, handlers: I) -> Result<&mut Self, PatternError>
    where
        I: IntoIterator<Item = BoxedHandler<T>>,
    {
        let replaced = self
            .routes
            .register(self.compiler.as_ref(), pattern, handlers.into_iter().collect())?;

        if replaced {
            tracing::debug!(pattern, "Replaced existing route");
        }
        Ok(self)
    }

    /// Append `handlers` to the global middleware chain.
    pub fn register_middleware<I>(&mut self, handlers: I) -> &mut Self
    where
        I: IntoIterator<Item = BoxedHandler<T>>,
    {
        self.middleware.register(handlers);
        self
    }

    /// Resolve `path` without running any handler.
    pub fn resolve<'p>(&self, path: &'p str) -> Option<Resolved<'_, 'p, BoxedHandler<T>>> {
        self.routes.resolve(path)
    }

    /// Registered patterns in registration order.
    pub fn routes(&self) -> impl Iterator<Item = &str> {
        self.routes.patterns()
    }

    pub fn middleware_len(&self) -> usize {
        self.middleware.len()
    }

    /// Run the middleware chain and then the handlers of the route matching `path`.
    pub fn dispatch(&self, path: &str) -> DispatchResult<()> {
        let Resolved { route, captures } =
            self.routes
                .resolve(path)
                .ok_or_else(|| DispatchError::RouteNotFound {
                    path: path.to_string(),
                })?;

        tracing::debug!(path, pattern = route.pattern(), "Route matched");

        let params = self.extract_params(route, captures)?;
        let request = Request::new(path, params);
        let mut response = Response::new(Arc::clone(&self.send), Arc::clone(&self.redirect));

        let mut next = Next::new(
            path,
            self.middleware.handlers(),
            route.handlers(),
            self.options.guard_reentry,
        );
        next.run(&request, &mut response)
    }

    fn extract_params(
        &self,
        route: &Route<BoxedHandler<T>>,
        captures: Captures<'_>,
    ) -> DispatchResult<Params> {
        let keys = route.keys();

        if self.options.param_mismatch == ParamMismatch::Reject && keys.len() != captures.len() {
            return Err(DispatchError::ParamMismatch {
                pattern: route.pattern().to_string(),
                expected: keys.len(),
                found: captures.len(),
            });
        }

        Ok(keys
            .iter()
            .zip(captures)
            .filter_map(|(key, value)| value.map(|value| (key.clone(), value.to_string())))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::handler::handler;
    use crate::routing::{Matcher, PathPattern};

    fn app() -> App<String> {
        App::new(|_: String| {}, |_: &str| {})
    }

    fn noop() -> BoxedHandler<String> {
        handler(|_req, _res, _next| Ok(()))
    }

    #[test]
    fn test_app_is_shareable() {
        fn assert_send_sync<A: Send + Sync>() {}
        assert_send_sync::<App<String>>();
    }

    #[test]
    fn test_registration_introspection() {
        let mut app = app();
        app.register_route("/a", [noop()])
            .unwrap()
            .register_route("/b/:id", [noop(), noop()])
            .unwrap()
            .register_middleware([noop()])
            .register_middleware([noop(), noop()]);

        assert_eq!(app.routes().collect::<Vec<_>>(), ["/a", "/b/:id"]);
        assert_eq!(app.middleware_len(), 3);

        let resolved = app.resolve("/b/7").unwrap();
        assert_eq!(resolved.route.pattern(), "/b/:id");
        assert_eq!(resolved.route.handlers().len(), 2);
        assert_eq!(resolved.captures, vec![Some("7")]);
    }

    #[test]
    fn test_compile_error_is_returned_unchanged() {
        let mut app = app();
        let err = app.register_route("/a/:id(", [noop()]).err().unwrap();
        assert!(matches!(err, PatternError::UnbalancedGroup { position: 6 }));
        assert_eq!(app.routes().count(), 0);
    }

    /// Declares two keys but only ever captures one value.
    #[derive(Debug)]
    struct ShortMatcher {
        keys: Vec<String>,
        inner: PathPattern,
    }

    impl Matcher for ShortMatcher {
        fn keys(&self) -> &[String] {
            &self.keys
        }

        fn captures<'p>(&self, path: &'p str) -> Option<Captures<'p>> {
            self.inner.captures(path)
        }
    }

    struct ShortCompiler;

    impl PatternCompiler for ShortCompiler {
        fn compile(&self, pattern: &str) -> Result<Box<dyn Matcher>, PatternError> {
            Ok(Box::new(ShortMatcher {
                keys: vec!["first".to_string(), "second".to_string()],
                inner: PathPattern::new(pattern, &Default::default())?,
            }))
        }
    }

    #[test]
    fn test_param_mismatch_align() {
        let seen = Arc::new(std::sync::Mutex::new(None));
        let sink = Arc::clone(&seen);

        let mut app = app().with_compiler(ShortCompiler);
        app.register_route(
            "/items/:id",
            [handler(move |req, _res, _next| {
                *sink.lock().unwrap() = Some(req.params().clone());
                Ok(())
            })],
        )
        .unwrap();

        app.dispatch("/items/9").unwrap();
        let params = seen.lock().unwrap().clone().unwrap();
        assert_eq!(params.get("first"), Some("9"));
        assert_eq!(params.get("second"), None);
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_param_mismatch_reject() {
        let mut config = RouterConfig::default();
        config.dispatch.param_mismatch = ParamMismatch::Reject;

        let mut app = App::with_config(|_: String| {}, |_: &str| {}, &config).with_compiler(ShortCompiler);
        app.register_route("/items/:id", [noop()]).unwrap();

        let err = app.dispatch("/items/9").unwrap_err();
        assert!(matches!(
            err,
            DispatchError::ParamMismatch {
                expected: 2,
                found: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_optional_param_absent() {
        let seen = Arc::new(std::sync::Mutex::new(None));
        let sink = Arc::clone(&seen);

        let mut config = RouterConfig::default();
        config.dispatch.param_mismatch = ParamMismatch::Reject;

        let mut app = App::with_config(|_: String| {}, |_: &str| {}, &config);
        app.register_route(
            "/post/:slug?",
            [handler(move |req, _res, _next| {
                *sink.lock().unwrap() = Some(req.params().is_empty());
                Ok(())
            })],
        )
        .unwrap();

        app.dispatch("/post").unwrap();
        assert_eq!(*seen.lock().unwrap(), Some(true));
    }
}
