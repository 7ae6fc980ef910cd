//! Request inspection.
//!
//! # Responsibilities
//! - Extract the declared host used for admission and dispatch
//!
//! # Design Decisions
//! - The request-target authority wins (absolute-form request lines, HTTP/2
//!   `:authority`); the `Host` header is used when the target has none
//! - The value is returned verbatim: case and port are preserved

use axum::http::{header, Request};

/// The host a request declares, exactly as sent.
pub fn declared_host<B>(request: &Request<B>) -> Option<&str> {
    request
        .uri()
        .authority()
        .map(|a| a.as_str().rsplit_once('@').map_or(a.as_str(), |(_, host)| host))
        .or_else(|| request.headers().get(header::HOST).and_then(|h| h.to_str().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn test_host_header() {
        let req = Request::builder()
            .uri("/path")
            .header("Host", "Example.com:8080")
            .body(Body::empty())
            .unwrap();
        assert_eq!(declared_host(&req), Some("Example.com:8080"));
    }

    #[test]
    fn test_authority_fallback() {
        let req = Request::builder()
            .uri("http://host1.com/hi")
            .body(Body::empty())
            .unwrap();
        assert_eq!(declared_host(&req), Some("host1.com"));

        let req = Request::builder()
            .uri("http://user@host1.com:8080/hi")
            .body(Body::empty())
            .unwrap();
        assert_eq!(declared_host(&req), Some("host1.com:8080"));
    }

    #[test]
    fn test_authority_preferred_over_header() {
        let req = Request::builder()
            .uri("http://evil.com/hi")
            .header("Host", "host1.com")
            .body(Body::empty())
            .unwrap();
        assert_eq!(declared_host(&req), Some("evil.com"));
    }

    #[test]
    fn test_missing_host() {
        let req = Request::builder().uri("/").body(Body::empty()).unwrap();
        assert_eq!(declared_host(&req), None);
    }
}
