use std::fmt::Display;

use validator::validate_email;

/// A syntactically valid email address of the patient signing up.
/// The confirmation email is delivered to this address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientEmail(String);

impl PatientEmail {
    pub fn parse(s: String) -> Result<Self, String> {
        let s = s.trim().to_string();
        if validate_email(&s) {
            Ok(Self(s))
        } else {
            Err(format!("{s} is not a valid patient email."))
        }
    }
}

impl Display for PatientEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for PatientEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::PatientEmail;
    use claims::{assert_err, assert_ok};
    use fake::{faker::internet::en::SafeEmail, Fake};
    use proptest::prelude::*;
    use rstest::*;

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn empty_string_is_rejected(#[case] email: String) {
        assert_err!(PatientEmail::parse(email));
    }

    #[test]
    fn email_missing_at_symbol_is_rejected() {
        let email = "janedoe.example.com".to_string();
        assert_err!(PatientEmail::parse(email));
    }

    #[test]
    fn email_missing_subject_is_rejected() {
        let email = "@example.com".to_string();
        assert_err!(PatientEmail::parse(email));
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let email = assert_ok!(PatientEmail::parse(" jane@example.com\n".to_string()));
        assert_eq!(email.as_ref(), "jane@example.com");
    }

    #[derive(Debug, Clone)]
    struct ValidEmailFixture(pub String);

    fn email() -> impl Strategy<Value = ValidEmailFixture> {
        any::<u32>().prop_map(|_| ValidEmailFixture(SafeEmail().fake()))
    }

    proptest! {
        #[test]
        fn valid_emails_are_parsed_successfully(valid_email in email()) {
            claims::assert_ok!(PatientEmail::parse(valid_email.0));
        }
    }
}
