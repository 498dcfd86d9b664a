//! Application builder and graceful serving.

use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinError;
use tracing::{info, warn};

use postboard_core::error::AppError;
use postboard_core::result::AppResult;
use postboard_worker::TaskSupervisor;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Serve `app` on `listener` until `shutdown` resolves, then shut down
/// gracefully.
///
/// Once `shutdown` fires, no new connections are accepted and in-flight
/// requests get `grace` to finish. Whether or not they make it, every task
/// tracked by `supervisor` is awaited before returning. An expired grace
/// period is returned as an error after that wait.
pub async fn serve<F>(
    listener: TcpListener,
    app: Router,
    supervisor: TaskSupervisor,
    grace: Duration,
    shutdown: F,
) -> AppResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let server = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move {
        let _ = stop_rx.await;
    });
    let mut handle = tokio::spawn(async move { server.await });

    tokio::select! {
        joined = &mut handle => {
            warn!("Server stopped without a shutdown signal");
            supervisor.drain().await;
            return server_outcome(joined);
        }
        () = shutdown => {}
    }

    info!(grace_secs = grace.as_secs_f64(), "Shutting down server");
    let _ = stop_tx.send(());

    let result = match tokio::time::timeout(grace, &mut handle).await {
        Ok(joined) => server_outcome(joined),
        Err(_) => {
            handle.abort();
            Err(AppError::internal(format!(
                "graceful shutdown did not finish within {}ms; in-flight requests were dropped",
                grace.as_millis()
            )))
        }
    };

    info!(
        outstanding = supervisor.outstanding(),
        "Completing background tasks"
    );
    supervisor.drain().await;

    if result.is_ok() {
        info!("Server stopped");
    }
    result
}

fn server_outcome(joined: Result<std::io::Result<()>, JoinError>) -> AppResult<()> {
    match joined {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(AppError::from(e)),
        Err(e) => Err(AppError::internal(format!("Server task failed: {e}"))),
    }
}
