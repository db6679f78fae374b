use crate::notification::MembershipNotifier;
use axum::extract::FromRef;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    notifier: Arc<MembershipNotifier>,
}

impl AppState {
    pub fn create(notifier: MembershipNotifier) -> Self {
        Self {
            notifier: Arc::new(notifier),
        }
    }
}

impl FromRef<AppState> for Arc<MembershipNotifier> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.notifier.clone()
    }
}
