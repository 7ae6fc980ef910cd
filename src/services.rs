//! Built-in demo services the binary can mount by name.

use axum::{
    extract::Path,
    http::StatusCode,
    routing::{any, get},
    BoxError, Json,
};
use serde::Serialize;

use crate::routing::{Scope, ServiceCatalog};

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
}

/// `hello`: a greeting at `/` and `/hi`.
pub fn hello(scope: &mut Scope<'_>) {
    scope
        .route("/", get(|| async { "Hello" }))
        .route("/hi", get(|| async { "Hi" }));
}

/// `status`: service health at `/health`.
pub fn status(scope: &mut Scope<'_>) {
    scope.route(
        "/health",
        get(|| async {
            Json(SystemStatus {
                version: env!("CARGO_PKG_VERSION"),
                status: "operational",
            })
        }),
    );
}

/// `echo`: returns the path below the mount point.
pub fn echo(scope: &mut Scope<'_>) {
    scope.route(
        "/echo/{*rest}",
        any(|Path(rest): Path<String>| async move { rest }),
    );
}

/// Catalog with every built-in service.
pub fn catalog() -> ServiceCatalog {
    ServiceCatalog::new()
        .register("hello", hello)
        .register("status", status)
        .register("echo", echo)
}

/// Mount hook answering unmatched paths with a plain-text 404.
pub fn plain_not_found(_host: &str, scope: &mut Scope<'_>) -> Result<(), BoxError> {
    scope.fallback(|| async { (StatusCode::NOT_FOUND, "No known route") });
    Ok(())
}
