use super::RenderError;
use crate::domain::{plan_features, SignupRecord};
use chrono::{DateTime, Utc};
use chrono_tz::{Europe::London, Tz};
use tera::{Context, Tera};

/// Contact details of the practice printed in every email.
#[derive(Debug, serde::Serialize)]
pub struct Practice {
    #[serde(skip)]
    pub time_zone: Tz,
    pub name: &'static str,
    pub phone: &'static str,
    pub phone_link: &'static str,
    pub email: &'static str,
    pub address: &'static str,
    pub hours: &'static [&'static str],
}

pub const PRACTICE: Practice = Practice {
    time_zone: London,
    name: "Harbourside Dental",
    phone: "020 7946 0321",
    phone_link: "+442079460321",
    email: "hello@harbourside-dental.example",
    address: "14 Quay Street, Bristol BS1 4XE",
    hours: &[
        "Monday to Friday: 8:30am to 6:00pm",
        "Saturday: 9:00am to 1:00pm",
        "Sunday: Closed",
    ],
};

/// Renders the membership emails from a [`SignupRecord`].
///
/// Templates are compiled into the binary. Rendering is a pure function of
/// the record and the instant passed in.
pub struct TemplateRenderer {
    engine: Tera,
}

impl TemplateRenderer {
    pub fn new() -> Result<Self, RenderError> {
        let mut engine = Tera::default();
        engine.add_raw_templates(vec![
            (
                "practice_footer.html",
                include_str!("../../templates/membership/practice_footer.html"),
            ),
            (
                "quick_confirmation.html",
                include_str!("../../templates/membership/quick_confirmation.html"),
            ),
            (
                "patient_confirmation.html",
                include_str!("../../templates/membership/patient_confirmation.html"),
            ),
            (
                "internal_notification.html",
                include_str!("../../templates/membership/internal_notification.html"),
            ),
        ])?;

        Ok(Self { engine })
    }

    /// Short confirmation for the patient with just the essentials.
    pub fn quick_confirmation(
        &self,
        signup: &SignupRecord,
        now: DateTime<Utc>,
    ) -> Result<String, RenderError> {
        self.render("quick_confirmation.html", signup, now)
    }

    /// Full welcome email for the patient.
    pub fn patient_confirmation(
        &self,
        signup: &SignupRecord,
        now: DateTime<Utc>,
    ) -> Result<String, RenderError> {
        self.render("patient_confirmation.html", signup, now)
    }

    /// Notification for the practice staff.
    pub fn internal_notification(
        &self,
        signup: &SignupRecord,
        now: DateTime<Utc>,
    ) -> Result<String, RenderError> {
        self.render("internal_notification.html", signup, now)
    }

    fn render(
        &self,
        template: &str,
        signup: &SignupRecord,
        now: DateTime<Utc>,
    ) -> Result<String, RenderError> {
        let mut context = Context::new();
        context.insert("practice", &PRACTICE);
        context.insert("signup", &SignupView::new(signup, now));

        Ok(self.engine.render(template, &context)?)
    }
}

/// What the templates get to see of a signup.
#[derive(serde::Serialize)]
struct SignupView<'a> {
    first_name: &'a str,
    full_name: String,
    email: &'a str,
    plan_name: &'a str,
    plan_price: &'a str,
    application_id: &'a str,
    account_holder_name: &'a str,
    features: &'static [&'static str],
    is_family: bool,
    partner_name: Option<String>,
    family_members: Vec<String>,
    is_clinic_signup: bool,
    staff_member_name: Option<&'a str>,
    assisting_staff_member: Option<&'a str>,
    dentist_name: Option<&'a str>,
    partner_dentist_name: Option<&'a str>,
    signup_date: String,
    signup_timestamp: String,
}

impl<'a> SignupView<'a> {
    fn new(signup: &'a SignupRecord, now: DateTime<Utc>) -> Self {
        Self {
            first_name: signup.first_name.as_ref(),
            full_name: signup.full_name(),
            email: signup.email.as_ref(),
            plan_name: &signup.plan_name,
            plan_price: &signup.plan_price,
            application_id: &signup.application_id,
            account_holder_name: &signup.account_holder_name,
            features: plan_features(&signup.plan_name),
            is_family: signup.is_family,
            partner_name: signup.partner_name(),
            family_members: signup.family_members.iter().map(|m| m.describe()).collect(),
            is_clinic_signup: signup.is_clinic_signup,
            staff_member_name: signup.staff_member_name.as_deref(),
            assisting_staff_member: signup.assisting_staff_member(),
            dentist_name: signup.dentist_name.as_deref(),
            partner_dentist_name: signup.partner_dentist_name.as_deref(),
            signup_date: now
                .with_timezone(&PRACTICE.time_zone)
                .format("%A, %-d %B %Y")
                .to_string(),
            signup_timestamp: now.format("%A, %-d %B %Y at %H:%M:%S UTC").to_string(),
        }
    }
}
