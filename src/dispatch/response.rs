//! Response context.
//!
//! # Responsibilities
//! - Expose the content-delivery and navigation callbacks to handlers
//! - Let middleware swap either callback for the rest of the dispatch
//!
//! # Design Decisions
//! - Callbacks are `Arc` slots; replacing one never affects the app-level
//!   callbacks or other dispatches
//! - `wrap_send` hands the wrapper the previous callback so wrappers compose

use std::fmt;
use std::sync::Arc;

/// Content-delivery callback.
pub type SendFn<T> = Arc<dyn Fn(T) + Send + Sync>;

/// Navigation callback.
pub type RedirectFn = Arc<dyn Fn(&str) + Send + Sync>;

/// The response handle seen by every handler of one dispatch.
pub struct Response<T> {
    send: SendFn<T>,
    redirect: RedirectFn,
}

impl<T> Clone for Response<T> {
    fn clone(&self) -> Self {
        Self {
            send: Arc::clone(&self.send),
            redirect: Arc::clone(&self.redirect),
        }
    }
}

impl<T> fmt::Debug for Response<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response").finish_non_exhaustive()
    }
}

impl<T: 'static> Response<T> {
    pub fn new(send: SendFn<T>, redirect: RedirectFn) -> Self {
        Self { send, redirect }
    }

    /// Deliver content through the current callback.
    pub fn send(&self, content: T) {
        (self.send)(content)
    }

    /// Navigate through the current callback.
    pub fn redirect(&self, path: &str) {
        (self.redirect)(path)
    }

    /// The current content-delivery callback.
    pub fn sender(&self) -> SendFn<T> {
        Arc::clone(&self.send)
    }

    /// Replace the content-delivery callback.
    pub fn set_send<F>(&mut self, send: F)
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        self.send = Arc::new(send);
    }

    /// Replace the content-delivery callback with `wrapper`, which receives
    /// the content and the callback it replaced.
    pub fn wrap_send<F>(&mut self, wrapper: F)
    where
        F: Fn(T, &dyn Fn(T)) + Send + Sync + 'static,
    {
        let inner = Arc::clone(&self.send);
        self.send = Arc::new(move |content| wrapper(content, &*inner));
    }

    /// Replace the navigation callback.
    pub fn set_redirect<F>(&mut self, redirect: F)
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.redirect = Arc::new(redirect);
    }
}
