use crate::{
    email_client::{ConfigurationError, DeliveryError},
    notification::RenderError,
    routes::memberships::NotifyError,
};
use duplicate::duplicate_item;

/// Write a formatted version of the error and its inner source.
pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{e}\n")?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{cause}")?;
        current = cause.source();
    }

    Ok(())
}

#[duplicate_item(
    error_type;
    [ ConfigurationError ];
    [ DeliveryError ];
    [ RenderError ];
    [ NotifyError ];
)]
impl std::fmt::Debug for error_type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        crate::error::error_chain_fmt(self, f)
    }
}

/// Single-line message of the error followed by all of its sources.
pub fn error_chain_message(e: &impl std::error::Error) -> String {
    let mut message = e.to_string();
    let mut current = e.source();
    while let Some(cause) = current {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        current = cause.source();
    }

    message
}
