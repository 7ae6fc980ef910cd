//! Shared utilities for integration testing.

use std::net::SocketAddr;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use vhost_router::{HttpServer, Shutdown};

/// Serve `server` on an ephemeral local port.
///
/// The returned `Shutdown` stops the server when triggered.
pub async fn spawn_server(server: HttpServer) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// GET `path` on `addr`, declaring `host` in the Host header.
pub async fn get(addr: SocketAddr, host: &str, path: &str) -> (u16, String) {
    let client = reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap();

    let res = client
        .get(format!("http://{}{}", addr, path))
        .header(reqwest::header::HOST, host)
        .send()
        .await
        .expect("server unreachable");

    let status = res.status().as_u16();
    let body = res.text().await.unwrap();
    (status, body)
}

/// Send a raw HTTP/1.1 GET with an arbitrary request target and Host header.
///
/// Returns the status code and body of the response.
pub async fn raw_get(addr: SocketAddr, target: &str, host: &str) -> (u16, String) {
    let mut socket = TcpStream::connect(addr).await.unwrap();
    let request = format!(
        "GET {} HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n\r\n",
        target, host
    );
    socket.write_all(request.as_bytes()).await.unwrap();

    let mut raw = Vec::new();
    socket.read_to_end(&mut raw).await.unwrap();
    let raw = String::from_utf8(raw).unwrap();

    let (head, body) = raw.split_once("\r\n\r\n").expect("malformed response");
    let status = head
        .split_whitespace()
        .nth(1)
        .and_then(|code| code.parse().ok())
        .expect("missing status code");
    (status, body.to_string())
}
