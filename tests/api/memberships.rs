use crate::helpers::{
    family_signup, spawn_app, spawn_app_with, RecordingTransport, DENTIST_INBOX, PRACTICE_INBOX,
};
use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use rstest::*;

#[tokio::test]
async fn signup_notifies_patient_and_practice() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app.post_signup(&family_signup()).await;

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    let outcome: serde_json::Value = response.json().await.unwrap();
    assert_eq!(outcome["success"], true);
    assert_eq!(outcome["recipientsSucceeded"], 2);
    assert_eq!(outcome["recipientsFailed"], 0);
    assert_eq!(
        outcome["recipients"],
        serde_json::json!([PRACTICE_INBOX, DENTIST_INBOX])
    );

    let patient_emails = app.transport.delivered_to("jane@example.com");
    assert_eq!(patient_emails.len(), 1);
    assert!(patient_emails[0].html_body.contains("APP-123"));

    let internal = app.transport.delivered_to(DENTIST_INBOX);
    assert_eq!(internal.len(), 1);
    assert!(internal[0].html_body.contains("Sam Doe (Child)"));
    assert!(internal[0].html_body.contains("Assign a dentist"));
}

#[tokio::test]
async fn rejected_recipient_is_reported_but_signup_succeeds() {
    // Arrange
    let app = spawn_app_with(RecordingTransport::rejecting(PRACTICE_INBOX)).await;

    // Act
    let response = app.post_signup(&family_signup()).await;

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    let outcome: serde_json::Value = response.json().await.unwrap();
    assert_eq!(outcome["success"], true);
    assert_eq!(outcome["recipientsSucceeded"], 1);
    assert_eq!(outcome["recipientsFailed"], 1);
    assert_eq!(outcome["recipientResults"][0]["recipient"], PRACTICE_INBOX);
    assert_eq!(outcome["recipientResults"][0]["status"], "failed");
    assert_eq!(outcome["recipientResults"][1]["status"], "sent");
}

#[tokio::test]
async fn unconfigured_mail_returns_a_failed_outcome_without_sending() {
    // Arrange
    let app = spawn_app_with(RecordingTransport::unconfigured()).await;

    // Act
    let response = app.post_signup(&family_signup()).await;

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    let outcome: serde_json::Value = response.json().await.unwrap();
    assert_eq!(outcome["success"], false);
    assert!(outcome["error"].is_string());
    assert_eq!(app.transport.delivered_count(), 0);
}

#[rstest]
#[case("email", "not-an-email")]
#[case("firstName", "")]
#[case("lastName", "<b>Doe</b>")]
#[case("applicationId", " ")]
#[tokio::test]
async fn invalid_signup_is_rejected(#[case] field: &str, #[case] value: &str) {
    // Arrange
    let app = spawn_app().await;
    let mut body = family_signup();
    body[field] = serde_json::Value::String(value.to_string());

    // Act
    let response = app.post_signup(&body).await;

    // Assert
    assert_eq!(
        response.status(),
        StatusCode::UNPROCESSABLE_ENTITY,
        "The API did not reject an invalid {field}"
    );
    assert_eq!(app.transport.delivered_count(), 0);
}
