//! Membership signup notifications.
//!
//! A completed signup produces a confirmation email for the patient and a
//! notification for the practice staff. Delivery is best effort: failures are
//! logged and reported in the returned [`DeliveryOutcome`], never raised.

mod outcome;
mod renderer;
mod service;

pub use outcome::{DeliveryOutcome, RecipientResult, RecipientStatus};
pub use renderer::{Practice, TemplateRenderer, PRACTICE};
pub use service::MembershipNotifier;

/// An email template could not be rendered.
#[derive(thiserror::Error)]
#[error("Failed to render the email template")]
pub struct RenderError(#[from] tera::Error);
