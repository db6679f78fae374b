use super::{PatientEmail, PersonName};

/// A completed membership signup, as handed over by the signup form.
///
/// Only the patient identity is strongly typed; the remaining fields are
/// display values that are printed as-is in the notification emails.
#[derive(Debug, Clone)]
pub struct SignupRecord {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: PatientEmail,
    pub plan_name: String,
    pub plan_price: String,
    pub application_id: String,
    pub account_holder_name: String,
    pub is_family: bool,
    pub partner_first_name: Option<String>,
    pub partner_last_name: Option<String>,
    pub family_members: Vec<FamilyMember>,
    pub is_clinic_signup: bool,
    pub staff_member_name: Option<String>,
    pub dentist_name: Option<String>,
    pub partner_dentist_name: Option<String>,
}

impl SignupRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Name of the partner included in a family membership, if any part of it
    /// was given.
    pub fn partner_name(&self) -> Option<String> {
        let parts: Vec<&str> = [&self.partner_first_name, &self.partner_last_name]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }

    /// Name of the staff member who assisted, only for signups made in the
    /// practice.
    pub fn assisting_staff_member(&self) -> Option<&str> {
        if self.is_clinic_signup {
            self.staff_member_name.as_deref()
        } else {
            None
        }
    }
}

/// Additional member of a family membership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyMember {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub relationship: String,
}

impl FamilyMember {
    /// `First Last (Relationship)`
    pub fn describe(&self) -> String {
        format!("{} {} ({})", self.first_name, self.last_name, self.relationship)
    }
}

/// Raw signup data as posted by the signup form.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignupForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub plan_name: String,
    pub plan_price: String,
    pub application_id: String,
    pub account_holder_name: Option<String>,
    pub is_family: bool,
    pub partner_first_name: Option<String>,
    pub partner_last_name: Option<String>,
    pub family_members: Vec<FamilyMemberForm>,
    pub is_clinic_signup: bool,
    pub staff_member_name: Option<String>,
    pub dentist_name: Option<String>,
    pub partner_dentist_name: Option<String>,
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FamilyMemberForm {
    pub first_name: String,
    pub last_name: String,
    pub relationship: String,
}

impl TryFrom<FamilyMemberForm> for FamilyMember {
    type Error = String;

    fn try_from(value: FamilyMemberForm) -> Result<Self, Self::Error> {
        Ok(Self {
            first_name: PersonName::parse(value.first_name)?,
            last_name: PersonName::parse(value.last_name)?,
            relationship: value.relationship.trim().to_string(),
        })
    }
}

impl TryFrom<SignupForm> for SignupRecord {
    type Error = String;

    fn try_from(value: SignupForm) -> Result<Self, Self::Error> {
        let first_name = PersonName::parse(value.first_name)?;
        let last_name = PersonName::parse(value.last_name)?;
        let email = PatientEmail::parse(value.email)?;
        let plan_name = required("planName", value.plan_name)?;
        let plan_price = required("planPrice", value.plan_price)?;
        let application_id = required("applicationId", value.application_id)?;

        // The account holder defaults to the patient when nobody else pays.
        let account_holder_name = optional(value.account_holder_name)
            .unwrap_or_else(|| format!("{first_name} {last_name}"));

        let family_members = value
            .family_members
            .into_iter()
            .map(FamilyMember::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            first_name,
            last_name,
            email,
            plan_name,
            plan_price,
            application_id,
            account_holder_name,
            is_family: value.is_family,
            partner_first_name: optional(value.partner_first_name),
            partner_last_name: optional(value.partner_last_name),
            family_members,
            is_clinic_signup: value.is_clinic_signup,
            staff_member_name: optional(value.staff_member_name),
            dentist_name: optional(value.dentist_name),
            partner_dentist_name: optional(value.partner_dentist_name),
        })
    }
}

fn required(field: &str, value: String) -> Result<String, String> {
    let value = value.trim();
    if value.is_empty() {
        Err(format!("{field} is required."))
    } else {
        Ok(value.to_string())
    }
}

/// Blank optional values are treated as absent.
fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
