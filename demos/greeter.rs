//! Registers a few routes and middleware, then dispatches sample paths.
//!
//! Run with `RUST_LOG=route_dispatch=trace` to watch the cursor advance.

use std::time::Instant;

use route_dispatch::observability::init_logging;
use route_dispatch::{handler, App, RouterConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = RouterConfig::default();
    init_logging(&config.observability);

    let mut app = App::with_config(
        |content: String| println!("send: {content}"),
        |path: &str| println!("redirect: {path}"),
        &config,
    );

    app.register_middleware([handler(|req, res, next| {
        let started = Instant::now();
        let result = next.run(req, res);
        tracing::info!(path = req.path(), elapsed = ?started.elapsed(), "Dispatched");
        result
    })]);
    app.register_middleware([handler(|req, res, next| {
        if req.path().starts_with("/admin") {
            res.redirect("/login");
            return Ok(());
        }
        res.wrap_send(|content: String, send| send(format!("{content}\n-- greeter")));
        next.run(req, res)
    })]);

    app.register_route(
        "/hello/:name",
        [handler(|req, res, _next| {
            res.send(format!("Hello {}", req.param("name").unwrap_or("stranger")));
            Ok(())
        })],
    )?;
    app.register_route("/admin/*", [handler(|_req, _res, _next| Ok(()))])?;

    for path in ["/hello/world", "/admin/users", "/nowhere"] {
        if let Err(err) = app.dispatch(path) {
            eprintln!("{path}: {err}");
        }
    }

    Ok(())
}
