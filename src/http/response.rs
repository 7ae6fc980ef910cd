//! Terminal responses produced by the dispatch layer itself.
//!
//! # Design Decisions
//! - Unknown host and unmatched route are both 404 but carry different
//!   bodies so clients and tests can tell them apart

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// Body of the unknown-host rejection.
pub const UNKNOWN_HOST_BODY: &str = "Unknown host";

/// Response for a request whose host is not recognized.
pub fn unknown_host() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, UNKNOWN_HOST_BODY)
}

/// Default response for an admitted request that matched no route.
pub async fn route_not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "message": "Not Found" })))
}
