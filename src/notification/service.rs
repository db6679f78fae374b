use super::{
    DeliveryOutcome, RecipientResult, RecipientStatus, RenderError, TemplateRenderer, PRACTICE,
};
use crate::{
    domain::SignupRecord,
    email_client::{DeliveryError, EmailMessage, MailTransport},
    error::error_chain_message,
};
use chrono::{DateTime, Utc};
use futures::future::join_all;
use std::{sync::Arc, time::Duration};

/// The emails a patient can receive as confirmation, in the order they are
/// tried. A later tier is only attempted when the previous one failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PatientTier {
    /// Short plain confirmation.
    Quick,
    /// Full welcome email with plan details.
    Full,
}

const PATIENT_TIERS: [PatientTier; 2] = [PatientTier::Quick, PatientTier::Full];

/// Sends the emails for a completed membership signup.
pub struct MembershipNotifier {
    transport: Arc<dyn MailTransport>,
    renderer: TemplateRenderer,
    internal_recipients: Vec<String>,
    send_timeout: Duration,
}

impl MembershipNotifier {
    pub fn new(
        transport: Arc<dyn MailTransport>,
        renderer: TemplateRenderer,
        internal_recipients: Vec<String>,
        send_timeout: Duration,
    ) -> Self {
        Self {
            transport,
            renderer,
            internal_recipients,
            send_timeout,
        }
    }

    /// Whether the underlying transport has everything it needs to send.
    pub fn is_configured(&self) -> bool {
        self.transport.check_configuration().is_ok()
    }

    /// Deliver the confirmation to the patient and the notification to the
    /// practice staff.
    ///
    /// Delivery failures are logged and reported in the returned outcome. Only
    /// a template that fails to render is returned as an error.
    #[tracing::instrument(
        name = "Notify about a membership signup",
        skip(self, signup),
        fields(
            application_id = %signup.application_id,
            plan_name = %signup.plan_name,
        )
    )]
    pub async fn notify(&self, signup: &SignupRecord) -> Result<DeliveryOutcome, RenderError> {
        if let Err(e) = self.transport.check_configuration() {
            tracing::error!(
                error.cause_chain = ?e,
                error.message = %e,
                "Membership emails are not configured. Skipping delivery"
            );
            return Ok(DeliveryOutcome::not_configured(
                e.to_string(),
                self.internal_recipients.clone(),
            ));
        }

        let now = Utc::now();
        let patient_emails = self.patient_emails(signup, now)?;
        let internal_body = self.renderer.internal_notification(signup, now)?;

        let patient = self.deliver_to_patient(&patient_emails).await;
        let recipient_results = self.deliver_to_practice(signup, &internal_body).await;

        let outcome =
            DeliveryOutcome::new(patient, recipient_results, self.internal_recipients.clone());
        tracing::info!(
            success = outcome.success,
            recipients_succeeded = outcome.recipients_succeeded,
            recipients_failed = outcome.recipients_failed,
            "Membership notification finished"
        );

        Ok(outcome)
    }

    fn patient_emails(
        &self,
        signup: &SignupRecord,
        now: DateTime<Utc>,
    ) -> Result<Vec<(PatientTier, EmailMessage)>, RenderError> {
        PATIENT_TIERS
            .into_iter()
            .map(|tier| -> Result<_, RenderError> {
                let (subject, html_body) = match tier {
                    PatientTier::Quick => (
                        format!(
                            "Your {} membership is confirmed ({})",
                            PRACTICE.name, signup.application_id
                        ),
                        self.renderer.quick_confirmation(signup, now)?,
                    ),
                    PatientTier::Full => (
                        format!(
                            "Welcome to {}: your {} is confirmed ({})",
                            PRACTICE.name, signup.plan_name, signup.application_id
                        ),
                        self.renderer.patient_confirmation(signup, now)?,
                    ),
                };

                let email = EmailMessage {
                    to: signup.email.to_string(),
                    reply_to: Some(PRACTICE.email.to_string()),
                    subject,
                    html_body,
                };
                Ok((tier, email))
            })
            .collect()
    }

    /// Try the patient tiers in order until one is delivered. Returns the
    /// message id of the delivered email, or the error of the last attempt.
    async fn deliver_to_patient(
        &self,
        emails: &[(PatientTier, EmailMessage)],
    ) -> Result<String, String> {
        let mut last_error = None;

        for (tier, email) in emails {
            if last_error.is_some() {
                tracing::info!(tier = ?tier, "Falling back to the next patient confirmation");
            }

            match self.send(email).await {
                Ok(message_id) => {
                    tracing::info!(
                        tier = ?tier,
                        message_id = %message_id,
                        "Patient confirmation delivered"
                    );
                    return Ok(message_id);
                }
                Err(e) => {
                    tracing::warn!(
                        tier = ?tier,
                        error.cause_chain = ?e,
                        error.message = %e,
                        "Failed to deliver patient confirmation"
                    );
                    last_error = Some(error_chain_message(&e));
                }
            }
        }

        tracing::error!("No patient confirmation could be delivered");
        Err(last_error.unwrap_or_else(|| "No patient confirmation was attempted".to_string()))
    }

    /// Send the internal notification to every practice recipient. Each
    /// recipient is independent of the others.
    async fn deliver_to_practice(
        &self,
        signup: &SignupRecord,
        html_body: &str,
    ) -> Vec<RecipientResult> {
        let subject = format!(
            "New membership signup: {} - {} ({})",
            signup.full_name(),
            signup.plan_name,
            signup.application_id
        );
        let subject = &subject;

        let deliveries = self.internal_recipients.iter().map(|recipient| async move {
            let email = EmailMessage {
                to: recipient.clone(),
                reply_to: Some(signup.email.to_string()),
                subject: subject.clone(),
                html_body: html_body.to_string(),
            };

            let status = match self.send(&email).await {
                Ok(message_id) => {
                    tracing::info!(
                        recipient = %recipient,
                        message_id = %message_id,
                        "Practice notification delivered"
                    );
                    RecipientStatus::Sent { message_id }
                }
                Err(e) => {
                    tracing::error!(
                        recipient = %recipient,
                        error.cause_chain = ?e,
                        error.message = %e,
                        "Failed to deliver practice notification. Skipping"
                    );
                    RecipientStatus::Failed {
                        error: error_chain_message(&e),
                    }
                }
            };

            RecipientResult {
                recipient: recipient.clone(),
                status,
            }
        });

        join_all(deliveries).await
    }

    async fn send(&self, email: &EmailMessage) -> Result<String, DeliveryError> {
        tokio::time::timeout(self.send_timeout, self.transport.send_email(email))
            .await
            .unwrap_or_else(|_| Err(DeliveryError::Timeout(self.send_timeout)))
    }
}
