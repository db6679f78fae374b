/// What happened when the emails of a signup were delivered.
///
/// Built fresh for every signup and handed back to the caller; nothing of it
/// is persisted.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryOutcome {
    /// The patient received a confirmation email.
    pub success: bool,
    pub patient_message_id: Option<String>,
    /// Why the last patient delivery attempt failed.
    pub patient_error: Option<String>,
    /// Set when nothing was sent because delivery isn't configured.
    pub error: Option<String>,
    pub recipient_results: Vec<RecipientResult>,
    pub recipients_succeeded: usize,
    pub recipients_failed: usize,
    /// The internal recipients the notification was meant for.
    pub recipients: Vec<String>,
}

impl DeliveryOutcome {
    pub fn new(
        patient: Result<String, String>,
        recipient_results: Vec<RecipientResult>,
        recipients: Vec<String>,
    ) -> Self {
        let recipients_succeeded = recipient_results.iter().filter(|r| r.is_sent()).count();
        let recipients_failed = recipient_results.len() - recipients_succeeded;
        let (patient_message_id, patient_error) = match patient {
            Ok(message_id) => (Some(message_id), None),
            Err(error) => (None, Some(error)),
        };

        Self {
            success: patient_message_id.is_some(),
            patient_message_id,
            patient_error,
            error: None,
            recipient_results,
            recipients_succeeded,
            recipients_failed,
            recipients,
        }
    }

    /// Outcome of a signup for which no email was attempted.
    pub fn not_configured(error: String, recipients: Vec<String>) -> Self {
        Self {
            success: false,
            patient_message_id: None,
            patient_error: None,
            error: Some(error),
            recipient_results: Vec::new(),
            recipients_succeeded: 0,
            recipients_failed: 0,
            recipients,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RecipientResult {
    pub recipient: String,
    #[serde(flatten)]
    pub status: RecipientStatus,
}

impl RecipientResult {
    pub fn is_sent(&self) -> bool {
        matches!(self.status, RecipientStatus::Sent { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum RecipientStatus {
    Sent {
        #[serde(rename = "messageId")]
        message_id: String,
    },
    Failed {
        error: String,
    },
}
