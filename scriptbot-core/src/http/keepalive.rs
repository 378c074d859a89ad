use std::net::SocketAddr;

use axum::{routing::get, Router};
use axum_server::Handle;
use tokio::sync::oneshot;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::Error;

pub const KEEPALIVE_BODY: &str = "Bot activo!";

/// Liveness endpoint polled by the host to keep the process awake.
pub fn keepalive_router() -> Router {
    Router::new()
        .route("/", get(handle_root))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

async fn handle_root() -> &'static str {
    KEEPALIVE_BODY
}

/// Serves the liveness endpoint in the background. Sending on (or dropping)
/// the returned sender shuts it down gracefully.
///
/// Binding happens up front so an occupied port is reported to the caller.
pub async fn start_keepalive_server(addr: SocketAddr) -> Result<oneshot::Sender<()>, Error> {
    let listener = std::net::TcpListener::bind(addr)?;
    listener.set_nonblocking(true)?;
    let bound = listener.local_addr()?;

    let (shutdown_send, shutdown_recv) = oneshot::channel::<()>();

    let handle = Handle::new();
    let handle_clone = handle.clone();

    tokio::spawn(async move {
        let _ = shutdown_recv.await;
        handle_clone.graceful_shutdown(None);
    });

    let server = axum_server::from_tcp(listener)
        .handle(handle)
        .serve(keepalive_router().into_make_service());

    info!("Keep-alive server listening on http://{}", bound);
    tokio::spawn(async move {
        if let Err(e) = server.await {
            error!("Keep-alive server error: {}", e);
        }
        info!("Keep-alive server shut down.");
    });

    Ok(shutdown_send)
}
