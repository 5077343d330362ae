//! Router assembly and the serve loop.

use std::future::Future;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::application::student::StudentRecords;
use crate::error::Result;

use super::handler::{self, AppState};

/// Build the application router.
pub fn router(records: StudentRecords) -> Router {
    Router::new()
        .route("/", get(handler::home))
        .route("/Students", get(handler::list))
        .route("/Students/Index", get(handler::list))
        .route("/Students/Details", get(handler::details))
        .route("/Students/Details/:id", get(handler::details))
        .route(
            "/Students/Create",
            get(handler::create_form).post(handler::create),
        )
        .route(
            "/Students/Edit",
            get(handler::edit_form).post(handler::edit),
        )
        .route(
            "/Students/Edit/:id",
            get(handler::edit_form).post(handler::edit),
        )
        .route(
            "/Students/Delete",
            get(handler::delete_confirmation).post(handler::delete),
        )
        .route(
            "/Students/Delete/:id",
            get(handler::delete_confirmation).post(handler::delete),
        )
        .fallback(handler::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { records })
}

/// Serve `router` on `listener` until `shutdown` resolves.
///
/// # Errors
/// Returns [`Error::Io`](crate::error::Error::Io) if the server fails.
pub async fn serve<F>(listener: TcpListener, router: Router, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "Listening");
    }
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
