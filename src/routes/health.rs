use crate::{notification::MembershipNotifier, state::AppState};
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use std::sync::Arc;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Create a router to serve health checks.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(is_alive))
        .route("/info", get(build_info))
        .route("/status", get(status))
}

/// Simple `is_alive` endpoint that will always return a 200 OK.
/// Used to indicate when the webserver is up and running.
#[tracing::instrument]
async fn is_alive() -> StatusCode {
    tracing::debug!("Service is alive");
    StatusCode::OK
}

#[derive(Debug, serde::Serialize)]
pub struct Status {
    mail_configured: bool,
}

/// Status endpoint reporting whether the dependencies needed to deliver
/// emails are in place. Doesn't contact the mail relay.
#[tracing::instrument(skip(notifier))]
async fn status(State(notifier): State<Arc<MembershipNotifier>>) -> Json<Status> {
    let status = Status {
        mail_configured: notifier.is_configured(),
    };
    tracing::info!("Status: {:?}", status);
    Json(status)
}

#[derive(serde::Serialize)]
pub struct BuildInfo {
    name: &'static str,
    version: &'static str,
}

/// Endpoint to get current information about the server's version.
#[tracing::instrument]
async fn build_info() -> Json<BuildInfo> {
    Json(BuildInfo {
        name: env!("CARGO_PKG_NAME"),
        version: VERSION,
    })
}
