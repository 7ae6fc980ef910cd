//! End-to-end host routing over a real listener.

use axum::{http::StatusCode, routing::get, BoxError};
use vhost_router::config::{HostConfig, ServerConfig};
use vhost_router::lifecycle::build_server;
use vhost_router::routing::ServiceCatalog;
use vhost_router::{HostEntry, HostRouterBuilder, HttpServer, Scope};

mod common;

fn host1_routes(scope: &mut Scope<'_>) {
    scope
        .route("", get(|| async { "Hello from host1" }))
        .route("/hi", get(|| async { "Hi from host1" }));
}

fn host2_routes(scope: &mut Scope<'_>) {
    scope
        .route("", get(|| async { "Hello from host2" }))
        .route("/hi", get(|| async { "Hi from host2" }));
}

fn no_route(_host: &str, scope: &mut Scope<'_>) -> Result<(), BoxError> {
    scope.fallback(|| async { (StatusCode::NOT_FOUND, "No known route") });
    Ok(())
}

fn server(reject_unknown_hosts: bool) -> HttpServer {
    let routes = HostRouterBuilder::new()
        .host(HostEntry::new("host1.com", host1_routes).with_prefix("1"))
        .host(HostEntry::new("host2.com", host2_routes).with_prefix("2"))
        .generic_hosts(["host3.com", "host4.com"])
        .reject_unknown_hosts(reject_unknown_hosts)
        .mount_hook(no_route)
        .build()
        .unwrap();
    HttpServer::new(ServerConfig::default(), routes)
}

const SHARED_CASES: &[(&str, &str, u16, &str)] = &[
    ("host1.com", "/", 200, "Hello from host1"),
    ("host1.com", "/hi", 200, "Hi from host1"),
    ("host1.com", "/unknown", 404, "No known route"),
    ("host2.com", "/", 200, "Hello from host2"),
    ("host2.com", "/hi", 200, "Hi from host2"),
    ("host2.com", "/unknown", 404, "No known route"),
    ("host3.com", "/1", 200, "Hello from host1"),
    ("host3.com", "/1/", 200, "Hello from host1"),
    ("host3.com", "/1/hi", 200, "Hi from host1"),
    ("host3.com", "/2", 200, "Hello from host2"),
    ("host3.com", "/2/hi", 200, "Hi from host2"),
    ("host3.com", "/unknown", 404, "No known route"),
    ("host4.com", "/1", 200, "Hello from host1"),
    ("host4.com", "/1/hi", 200, "Hi from host1"),
    ("host4.com", "/2", 200, "Hello from host2"),
    ("host4.com", "/2/hi", 200, "Hi from host2"),
    ("host4.com", "/unknown", 404, "No known route"),
];

#[tokio::test]
async fn test_host_based_routing() {
    let (addr, shutdown) = common::spawn_server(server(true)).await;

    for &(host, path, status, body) in SHARED_CASES {
        assert_eq!(
            common::get(addr, host, path).await,
            (status, body.to_string()),
            "Host: {host}, Path: {path}"
        );
    }
    assert_eq!(
        common::get(addr, "unknown.com", "/").await,
        (404, "Unknown host".to_string())
    );
    assert_eq!(
        common::get(addr, "unknown.com", "/hi").await,
        (404, "Unknown host".to_string())
    );
    // The port is part of the host string.
    assert_eq!(
        common::get(addr, "host1.com:80", "/").await,
        (404, "Unknown host".to_string())
    );

    shutdown.trigger();
}

#[tokio::test]
async fn test_absolute_form_target_decides_the_host() {
    let (addr, shutdown) = common::spawn_server(server(true)).await;

    // The request-target authority overrides the Host header.
    assert_eq!(
        common::raw_get(addr, "http://evil.com/", "host1.com").await,
        (404, "Unknown host".to_string())
    );
    assert_eq!(
        common::raw_get(addr, "http://host2.com/hi", "host1.com").await,
        (200, "Hi from host2".to_string())
    );
    assert_eq!(
        common::raw_get(addr, "/hi", "host1.com").await,
        (200, "Hi from host1".to_string())
    );

    shutdown.trigger();
}

#[tokio::test]
async fn test_host_based_routing_without_rejection() {
    let (addr, shutdown) = common::spawn_server(server(false)).await;

    for &(host, path, status, body) in SHARED_CASES {
        assert_eq!(
            common::get(addr, host, path).await,
            (status, body.to_string()),
            "Host: {host}, Path: {path}"
        );
    }
    assert_eq!(
        common::get(addr, "unknown.com", "/").await,
        (404, r#"{"message":"Not Found"}"#.to_string())
    );

    shutdown.trigger();
}

#[tokio::test]
async fn test_config_driven_startup() {
    let mut config = ServerConfig::default();
    config.routing.generic_hosts = vec!["multi.local".into()];
    config.routing.hosts = vec![
        HostConfig {
            host: "one.local".into(),
            prefix: "one".into(),
            service: "host1".into(),
        },
        HostConfig {
            host: "internal.local".into(),
            prefix: String::new(),
            service: "host2".into(),
        },
    ];
    let catalog = ServiceCatalog::new()
        .register("host1", host1_routes)
        .register("host2", host2_routes);

    let server = build_server(config, &catalog, |b| b).unwrap();
    let (addr, shutdown) = common::spawn_server(server).await;

    assert_eq!(
        common::get(addr, "multi.local", "/one/hi").await,
        (200, "Hi from host1".to_string())
    );
    assert_eq!(
        common::get(addr, "internal.local", "/hi").await,
        (200, "Hi from host2".to_string())
    );
    // Empty prefix: never reachable through the generic host.
    assert_eq!(
        common::get(addr, "multi.local", "/hi").await,
        (404, r#"{"message":"Not Found"}"#.to_string())
    );
    assert_eq!(
        common::get(addr, "elsewhere.local", "/one/hi").await,
        (404, "Unknown host".to_string())
    );

    shutdown.trigger();
}
