mod membership_plan;
mod patient_email;
mod person_name;
mod signup_record;

pub use membership_plan::{plan_features, MembershipPlan};
pub use patient_email::PatientEmail;
pub use person_name::PersonName;
pub use signup_record::{FamilyMember, FamilyMemberForm, SignupForm, SignupRecord};
