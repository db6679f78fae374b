use async_trait::async_trait;
use membership_mailer::{
    configuration::get_configuration,
    email_client::{ConfigurationError, DeliveryError, EmailMessage, MailTransport},
    telemetry::{get_subscriber, init_subscriber},
    App,
};
use once_cell::sync::Lazy;
use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

static TRACING: Lazy<()> = Lazy::new(|| {
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber("test".into(), std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber("test".into(), std::io::sink);
        init_subscriber(subscriber);
    };
});

pub const PRACTICE_INBOX: &str = "hello@practice.example";
pub const DENTIST_INBOX: &str = "dentist@practice.example";

/// Mail transport that keeps every delivered email in memory and rejects the
/// recipients it was told to.
#[derive(Default)]
pub struct RecordingTransport {
    unconfigured: bool,
    rejected_recipients: Vec<String>,
    delivered: Mutex<Vec<EmailMessage>>,
}

impl RecordingTransport {
    /// A transport whose configuration check fails.
    pub fn unconfigured() -> Self {
        Self {
            unconfigured: true,
            ..Default::default()
        }
    }

    pub fn rejecting(recipient: &str) -> Self {
        Self {
            rejected_recipients: vec![recipient.to_string()],
            ..Default::default()
        }
    }

    pub fn delivered_to(&self, recipient: &str) -> Vec<EmailMessage> {
        self.delivered
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.to == recipient)
            .cloned()
            .collect()
    }

    pub fn delivered_count(&self) -> usize {
        self.delivered.lock().unwrap().len()
    }
}

#[async_trait]
impl MailTransport for RecordingTransport {
    fn check_configuration(&self) -> Result<(), ConfigurationError> {
        if self.unconfigured {
            Err(ConfigurationError::MissingSender)
        } else {
            Ok(())
        }
    }

    async fn send_email(&self, email: &EmailMessage) -> Result<String, DeliveryError> {
        if self.rejected_recipients.contains(&email.to) {
            return Err(DeliveryError::Timeout(Duration::from_secs(1)));
        }

        let mut delivered = self.delivered.lock().unwrap();
        delivered.push(email.clone());
        Ok(format!("<{}@recording.example>", delivered.len()))
    }
}

pub struct TestApp {
    pub address: String,
    pub transport: Arc<RecordingTransport>,
    api_client: reqwest::Client,
}

impl TestApp {
    pub async fn post_signup(&self, body: &serde_json::Value) -> reqwest::Response {
        self.api_client
            .post(format!("{}/memberships/notifications", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.api_client
            .get(format!("{}{path}", self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }
}

/// Spawn an instance of the app on a random port with a working transport.
pub async fn spawn_app() -> TestApp {
    spawn_app_with(RecordingTransport::default()).await
}

pub async fn spawn_app_with(transport: RecordingTransport) -> TestApp {
    Lazy::force(&TRACING);

    let settings = {
        let mut c = get_configuration().expect("Failed to read configuration");
        // Make OS choose random port
        c.application.port = 0;
        c.membership.internal_recipients =
            vec![PRACTICE_INBOX.to_string(), DENTIST_INBOX.to_string()];
        c
    };

    let transport = Arc::new(transport);
    let app = App::build_with_transport(&settings, transport.clone())
        .expect("Failed to build application.");
    let address = format!("http://127.0.0.1:{}", app.port());
    let _ = tokio::spawn(app.run_until_stopped());

    TestApp {
        address,
        transport,
        api_client: reqwest::Client::new(),
    }
}

/// Signup used throughout the tests.
pub fn family_signup() -> serde_json::Value {
    serde_json::json!({
        "firstName": "Jane",
        "lastName": "Doe",
        "email": "jane@example.com",
        "planName": "FAMILY PLAN",
        "planPrice": "£19.99",
        "applicationId": "APP-123",
        "accountHolderName": "Jane Doe",
        "isFamily": true,
        "partnerFirstName": "John",
        "partnerLastName": "Doe",
        "familyMembers": [
            {"firstName": "Sam", "lastName": "Doe", "relationship": "Child"}
        ]
    })
}
