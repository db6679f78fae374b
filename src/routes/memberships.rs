use crate::{
    domain::{SignupForm, SignupRecord},
    notification::{DeliveryOutcome, MembershipNotifier, RenderError},
    state::AppState,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use std::sync::Arc;

/// Create a router to serve endpoints.
pub fn create_router() -> Router<AppState> {
    Router::new().route("/notifications", post(notify_signup))
}

#[derive(thiserror::Error)]
pub enum NotifyError {
    #[error("{0}")]
    ValidationError(String),
    #[error("Failed to prepare the membership emails")]
    RenderError(#[from] RenderError),
}

impl IntoResponse for NotifyError {
    fn into_response(self) -> Response {
        match self {
            NotifyError::ValidationError(message) => {
                (StatusCode::UNPROCESSABLE_ENTITY, message).into_response()
            }
            NotifyError::RenderError(_) => {
                tracing::error!(error.cause_chain = ?self, "Membership emails could not be rendered");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
            }
        }
    }
}

/// Send the emails of a completed membership signup.
///
/// Delivery problems don't fail the request: the outcome is returned with a
/// `200 OK` either way so the signup itself goes through.
#[tracing::instrument(
    name = "Received a membership signup",
    skip(form, notifier),
    fields(application_id = %form.application_id)
)]
async fn notify_signup(
    State(notifier): State<Arc<MembershipNotifier>>,
    Json(form): Json<SignupForm>,
) -> Result<Json<DeliveryOutcome>, NotifyError> {
    let signup: SignupRecord = form.try_into().map_err(NotifyError::ValidationError)?;
    let outcome = notifier.notify(&signup).await?;

    Ok(Json(outcome))
}
