//! Server lifecycle
//!
//! Runs the router until a shutdown signal arrives, then gives in-flight
//! connections a bounded amount of time to finish.

use std::{
    future::{Future, IntoFuture},
    time::Duration,
};

use axum::Router;
use tokio::{net::TcpListener, sync::oneshot};
use tracing::{info, warn};

/// How the server stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownOutcome {
    /// Every connection finished before the drain timeout
    Drained,
    /// Connections were still open when the drain timeout elapsed
    TimedOut,
}

/// Serve `app` until `signal` resolves, then drain for at most `drain_timeout`
///
/// Connections still open after the timeout are dropped with the server.
pub async fn serve_until<F>(
    listener: TcpListener,
    app: Router,
    signal: F,
    drain_timeout: Duration,
) -> std::io::Result<ShutdownOutcome>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (draining_tx, draining_rx) = oneshot::channel::<()>();

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            signal.await;
            let _ = draining_tx.send(());
        })
        .into_future();

    let deadline = async move {
        if draining_rx.await.is_ok() {
            info!("Waiting up to {:?} for connections to close...", drain_timeout);
            tokio::time::sleep(drain_timeout).await;
        } else {
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        result = server => result.map(|()| ShutdownOutcome::Drained),
        () = deadline => {
            warn!(?drain_timeout, "Drain timeout elapsed, dropping open connections");
            Ok(ShutdownOutcome::TimedOut)
        }
    }
}
