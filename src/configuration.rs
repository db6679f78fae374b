use config::{Config, Environment, File, FileFormat};
use derive_getters::Getters;
use secrecy::Secret;
use serde_aux::field_attributes::deserialize_number_from_string;
use std::time::Duration;

/// Retrieve the configuration for the application.
///
/// Values are read from `configuration.yaml` and can be overridden with
/// `APP_`-prefixed environment variables, e.g. `APP_APPLICATION__PORT=8080`.
/// The relay login can also be given as the plain `EMAIL_USER` and
/// `EMAIL_PASSWORD` variables, which take precedence over everything else.
const CONFIGURATION_FILE: &str = "configuration.yaml";

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    Config::builder()
        .add_source(File::new(CONFIGURATION_FILE, FileFormat::Yaml))
        .add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("membership.internal_recipients"),
        )
        .set_override_option("email_client.sender", std::env::var("EMAIL_USER").ok())?
        .set_override_option("email_client.password", std::env::var("EMAIL_PASSWORD").ok())?
        .build()?
        .try_deserialize()
}

#[derive(Debug, Clone, serde::Deserialize, Getters)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub email_client: EmailClientSettings,
    pub membership: MembershipSettings,
}

#[derive(Debug, Clone, serde::Deserialize, Getters)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Settings of the SMTP relay used to deliver emails.
///
/// `sender` and `password` are optional on purpose: a missing value is only
/// reported when an email is about to be sent, so the rest of the application
/// keeps working without mail credentials.
#[derive(Debug, Clone, serde::Deserialize, Getters)]
pub struct EmailClientSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    #[serde(default = "default_require_tls")]
    pub require_tls: bool,
    pub timeout_milliseconds: u64,
    /// Display name shown next to the sender address.
    #[serde(default)]
    pub sender_name: Option<String>,
    #[serde(default)]
    pub sender: Option<String>,
    #[serde(default)]
    pub password: Option<Secret<String>>,
}

fn default_require_tls() -> bool {
    true
}

impl EmailClientSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }
}

#[derive(Debug, Clone, serde::Deserialize, Getters)]
pub struct MembershipSettings {
    /// Practice staff receiving the internal notification for every signup.
    pub internal_recipients: Vec<String>,
    pub send_timeout_milliseconds: u64,
}

impl MembershipSettings {
    pub fn send_timeout(&self) -> Duration {
        Duration::from_millis(self.send_timeout_milliseconds)
    }
}
