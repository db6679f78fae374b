use crate::state::AppState;
use axum::Router;

pub mod health;
pub mod memberships;

pub fn build_router(app_state: &AppState) -> Router {
    Router::new()
        .nest("/health", health::create_router().with_state(app_state.clone()))
        .nest(
            "/memberships",
            memberships::create_router().with_state(app_state.clone()),
        )
}
