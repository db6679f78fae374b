use crate::helpers::{spawn_app, spawn_app_with, RecordingTransport};
use axum::http::StatusCode;
use pretty_assertions::assert_eq;

#[tokio::test]
async fn health_check_works() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app.get("/health/health").await;

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(Some(0), response.content_length());
}

#[tokio::test]
async fn status_reports_missing_mail_configuration() {
    // Arrange
    let app = spawn_app_with(RecordingTransport::unconfigured()).await;

    // Act
    let response = app.get("/health/status").await;

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    let status: serde_json::Value = response.json().await.unwrap();
    assert_eq!(status["mail_configured"], false);
}
