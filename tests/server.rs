use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::task::LocalSet;

use launchpad::config::{AppState, Config};
use launchpad::inquiry::SUCCESS_MESSAGE;
use launchpad::server::{create_reusable_listener, serve, Shutdown};

async fn raw_request(addr: SocketAddr, method: &str, path: &str, body: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let request = format!(
        "{method} {path} HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();
    String::from_utf8_lossy(&response).into_owned()
}

#[tokio::test]
async fn serves_page_and_inquiry_over_tcp_then_shuts_down() {
    let listener = create_reusable_listener("127.0.0.1:0".parse().unwrap()).unwrap();
    let addr = listener.local_addr().unwrap();
    let state = Arc::new(AppState::new(Config::defaults().unwrap()).unwrap());
    let shutdown = Shutdown::new();

    LocalSet::new()
        .run_until(async move {
            let server = tokio::task::spawn_local(serve(
                listener,
                Arc::clone(&state),
                shutdown.subscribe(),
            ));

            let page = raw_request(addr, "GET", "/", "").await;
            assert!(page.starts_with("HTTP/1.1 200 OK"), "{page}");
            assert!(page.contains("inquiryForm"));

            let body = r#"{"name":"Jo","email":"jo@x.com","phone":"0811234567","businessName":"Jo's Shop","requirements":"need a site"}"#;
            let reply = raw_request(addr, "POST", "/api/submit-inquiry", body).await;
            assert!(reply.starts_with("HTTP/1.1 200 OK"), "{reply}");
            assert!(reply.contains(SUCCESS_MESSAGE));

            let reply = raw_request(addr, "POST", "/api/submit-inquiry", r#"{"name":""}"#).await;
            assert!(reply.starts_with("HTTP/1.1 400 Bad Request"), "{reply}");
            assert!(reply.contains("name is required"));

            shutdown.trigger();
            tokio::time::timeout(Duration::from_secs(5), server)
                .await
                .expect("server did not stop")
                .unwrap();
            assert_eq!(state.connection_count(), 0);
        })
        .await;
}

#[tokio::test]
async fn connections_over_the_limit_are_dropped() {
    let listener = create_reusable_listener("127.0.0.1:0".parse().unwrap()).unwrap();
    let addr = listener.local_addr().unwrap();
    let mut cfg = Config::defaults().unwrap();
    cfg.performance.max_connections = Some(0);
    let state = Arc::new(AppState::new(cfg).unwrap());
    let shutdown = Shutdown::new();

    LocalSet::new()
        .run_until(async move {
            let server = tokio::task::spawn_local(serve(listener, state, shutdown.subscribe()));

            let mut stream = TcpStream::connect(addr).await.unwrap();
            let mut buf = Vec::new();
            let read = stream.read_to_end(&mut buf).await.unwrap_or(0);
            assert_eq!(read, 0);

            shutdown.trigger();
            tokio::time::timeout(Duration::from_secs(5), server)
                .await
                .expect("server did not stop")
                .unwrap();
        })
        .await;
}

#[tokio::test]
async fn keep_alive_off_closes_after_one_response() {
    let listener = create_reusable_listener("127.0.0.1:0".parse().unwrap()).unwrap();
    let addr = listener.local_addr().unwrap();
    let mut cfg = Config::defaults().unwrap();
    cfg.performance.keep_alive = false;
    let state = Arc::new(AppState::new(cfg).unwrap());
    let shutdown = Shutdown::new();

    LocalSet::new()
        .run_until(async move {
            let server = tokio::task::spawn_local(serve(listener, state, shutdown.subscribe()));

            // No `Connection: close` from the client; the server must end the connection itself
            let mut stream = TcpStream::connect(addr).await.unwrap();
            stream
                .write_all(b"GET /healthz HTTP/1.1\r\nHost: localhost\r\n\r\n")
                .await
                .unwrap();
            let mut response = Vec::new();
            tokio::time::timeout(Duration::from_secs(5), stream.read_to_end(&mut response))
                .await
                .expect("connection was kept open")
                .unwrap();
            assert!(String::from_utf8_lossy(&response).starts_with("HTTP/1.1 200 OK"));

            shutdown.trigger();
            tokio::time::timeout(Duration::from_secs(5), server)
                .await
                .expect("server did not stop")
                .unwrap();
        })
        .await;
}
