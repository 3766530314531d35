//! Shared utilities for integration tests.

use std::sync::{Arc, Mutex};

use route_dispatch::{handler, App, BoxedHandler, RouterConfig};

/// Ordered record of everything handlers and callbacks observed.
pub type Log = Arc<Mutex<Vec<String>>>;

pub fn entries(log: &Log) -> Vec<String> {
    log.lock().unwrap().clone()
}

/// An app whose `send` and `redirect` callbacks append to `log`.
#[allow(dead_code)]
pub fn recording_app(log: &Log) -> App<String> {
    recording_app_with(log, &RouterConfig::default())
}

pub fn recording_app_with(log: &Log, config: &RouterConfig) -> App<String> {
    let sent = Arc::clone(log);
    let redirected = Arc::clone(log);
    App::with_config(
        move |content: String| sent.lock().unwrap().push(content),
        move |path: &str| redirected.lock().unwrap().push(format!("redirect:{path}")),
        config,
    )
}

/// Middleware that records `tag` and continues.
#[allow(dead_code)]
pub fn passthrough(log: &Log, tag: &'static str) -> BoxedHandler<String> {
    let log = Arc::clone(log);
    handler(move |req, res, next| {
        log.lock().unwrap().push(tag.to_string());
        next.run(req, res)
    })
}

/// Handler that sends `content` and stops.
#[allow(dead_code)]
pub fn sends(content: &'static str) -> BoxedHandler<String> {
    handler(move |_req, res, _next| {
        res.send(content.to_string());
        Ok(())
    })
}
