//! HTTP service: `POST /update-text` runs the patch engine, `GET /` answers liveness.
//!
//! Per-file failures are ordinary `200` results with `success: false`; only
//! malformed bodies get `400`. The handler does its blocking read-modify-write
//! without yielding, so on the current-thread runtime `serve` runs there is
//! exactly one patch in flight at a time.

use std::future::Future;
use std::path::Path;

use axum::extract::rejection::JsonRejection;
use axum::http::{Method, StatusCode, header};
use axum::routing::{get, post};
use axum::{Json, Router};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use crate::client::UPDATE_PATH;
use crate::error::Error;
use crate::patcher::{self, preview};
use crate::types::{PatchRequest, PatchResult};

/// Fixed body of the liveness endpoint.
pub const HEALTH_ACK: &str = "LiveText server is running!";

/// Build the service router, CORS-open for pages served from any local origin.
pub fn router() -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    return Router::new()
        .route("/", get(handle_health))
        .route(UPDATE_PATH, post(handle_update_text))
        .layer(cors);
}

/// `GET /`: fixed acknowledgment for liveness checks.
async fn handle_health() -> &'static str {
    return HEALTH_ACK;
}

/// `POST /update-text`: validate the body, then run the patch engine once.
async fn handle_update_text(
    payload: Result<Json<PatchRequest>, JsonRejection>,
) -> (StatusCode, Json<PatchResult>) {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "rejected malformed request");
            let error = Error::invalid(rejection.body_text());
            return (StatusCode::BAD_REQUEST, Json(PatchResult::failed(&error)));
        },
    };

    if let Err(error) = request.validate() {
        tracing::warn!(%error, "rejected request");
        return (StatusCode::BAD_REQUEST, Json(PatchResult::failed(&error)));
    }

    tracing::info!(
        file = %request.file_path,
        old = %preview(&request.old_text, 50),
        new = %preview(&request.new_text, 50),
        "received text change request"
    );

    let outcome = patcher::patch(Path::new(&request.file_path), &request.old_text, &request.new_text);
    if let Err(error) = &outcome {
        tracing::info!(%error, "patch failed");
    }
    return (StatusCode::OK, Json(PatchResult::from(&outcome)));
}

/// Serve on an already-bound listener until `shutdown` resolves.
///
/// # Errors
///
/// Returns `Error::Io` if the server loop fails.
pub async fn serve_until<F>(listener: TcpListener, shutdown: F) -> Result<(), Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router())
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|source| {
            return Error::Io {
                name: "listener".to_string(),
                source,
            };
        })?;
    return Ok(());
}

/// Bind `bind_addr` and serve until Ctrl+C.
///
/// # Errors
///
/// Returns `Error::Bind` if the address cannot be bound, or `Error::Io` if
/// the server loop fails.
pub async fn run(bind_addr: &str) -> Result<(), Error> {
    let listener = TcpListener::bind(bind_addr).await.map_err(|source| {
        return Error::Bind {
            addr: bind_addr.to_string(),
            source,
        };
    })?;
    let local = listener.local_addr().map_or_else(|_| return bind_addr.to_string(), |a| return a.to_string());
    tracing::info!("LiveText server listening on http://{local} (Ctrl+C to stop)");

    serve_until(listener, shutdown_signal()).await?;
    tracing::info!("LiveText server stopped");
    return Ok(());
}

/// Resolves on Ctrl+C, or never if the signal cannot be installed.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "cannot listen for Ctrl+C, serving until killed");
        std::future::pending::<()>().await;
    }
}
