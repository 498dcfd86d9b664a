//! Integration tests for graceful serving over a real socket.

mod helpers;

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use axum::Router;
use axum::routing::get;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

use postboard_core::error::ErrorKind;
use postboard_worker::TaskSupervisor;

async fn bind() -> (TcpListener, SocketAddr) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    (listener, addr)
}

/// Send a GET and return the raw response text once the server closes.
async fn get_raw(addr: SocketAddr, path: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let request = format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut buf = Vec::new();
    stream.read_to_end(&mut buf).await.unwrap();
    String::from_utf8_lossy(&buf).into_owned()
}

fn sleepy_router(delay: Duration) -> Router {
    Router::new().route(
        "/slow",
        get(move || async move {
            tokio::time::sleep(delay).await;
            "done"
        }),
    )
}

fn spawn_flagged_task(supervisor: &TaskSupervisor, delay: Duration) -> Arc<AtomicBool> {
    let finished = Arc::new(AtomicBool::new(false));
    let flag = finished.clone();
    supervisor.spawn("test_background", async move {
        tokio::time::sleep(delay).await;
        flag.store(true, Ordering::SeqCst);
        Ok(())
    });
    finished
}

#[tokio::test]
async fn test_in_flight_request_completes_within_grace() {
    let (listener, addr) = bind().await;
    let supervisor = TaskSupervisor::new();
    let (stop_tx, stop_rx) = oneshot::channel::<()>();

    let server = tokio::spawn(postboard_api::serve(
        listener,
        sleepy_router(Duration::from_millis(200)),
        supervisor.clone(),
        Duration::from_secs(5),
        async move {
            let _ = stop_rx.await;
        },
    ));

    let client = tokio::spawn(get_raw(addr, "/slow"));
    tokio::time::sleep(Duration::from_millis(50)).await;
    stop_tx.send(()).unwrap();

    let response = client.await.unwrap();
    assert!(response.starts_with("HTTP/1.1 200"), "{response}");
    assert!(response.ends_with("done"));

    server.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_expired_grace_is_an_error_but_background_work_finishes() {
    let (listener, addr) = bind().await;
    let supervisor = TaskSupervisor::new();
    let (stop_tx, stop_rx) = oneshot::channel::<()>();

    let server = tokio::spawn(postboard_api::serve(
        listener,
        sleepy_router(Duration::from_secs(30)),
        supervisor.clone(),
        Duration::from_millis(100),
        async move {
            let _ = stop_rx.await;
        },
    ));

    let _client = tokio::spawn(get_raw(addr, "/slow"));
    tokio::time::sleep(Duration::from_millis(50)).await;

    let finished = spawn_flagged_task(&supervisor, Duration::from_millis(400));
    stop_tx.send(()).unwrap();

    let result = tokio::time::timeout(Duration::from_secs(5), server)
        .await
        .expect("serve returned after grace and drain")
        .unwrap();

    let err = result.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Internal);
    assert!(finished.load(Ordering::SeqCst));
    assert_eq!(supervisor.outstanding(), 0);
}

#[tokio::test]
async fn test_clean_shutdown_still_drains_background_work() {
    let (listener, _addr) = bind().await;
    let supervisor = TaskSupervisor::new();
    let finished = spawn_flagged_task(&supervisor, Duration::from_millis(200));

    postboard_api::serve(
        listener,
        sleepy_router(Duration::ZERO),
        supervisor.clone(),
        Duration::from_secs(1),
        async {},
    )
    .await
    .unwrap();

    assert!(finished.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_served_app_keys_limiter_by_peer_address() {
    let (listener, addr) = bind().await;
    let app = helpers::TestApp::new();
    let (stop_tx, stop_rx) = oneshot::channel::<()>();

    let server = tokio::spawn(postboard_api::serve(
        listener,
        app.router.clone(),
        app.supervisor.clone(),
        Duration::from_secs(1),
        async move {
            let _ = stop_rx.await;
        },
    ));

    let mut statuses = Vec::new();
    for _ in 0..5 {
        let response = get_raw(addr, "/v1/healthcheck").await;
        statuses.push(response.lines().next().unwrap_or_default().to_string());
    }

    assert!(statuses[..4].iter().all(|s| s.starts_with("HTTP/1.1 200")));
    assert!(statuses[4].starts_with("HTTP/1.1 429"), "{statuses:?}");

    stop_tx.send(()).unwrap();
    server.await.unwrap().unwrap();
}
