use std::fmt::Display;

use unicode_segmentation::UnicodeSegmentation;

/// A validated personal name (first or last) as it will be printed in
/// emails. The only way to create a `PersonName` is through [`PersonName::parse`],
/// so holders of this type can rely on it being non-empty and free of markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    /// Returns an instance of `PersonName` if the input satisfies all
    /// our validation constraints on names.
    pub fn parse(s: String) -> Result<Self, String> {
        let s = s.trim().to_string();
        let is_empty = s.is_empty();

        // Graphemes, as some characters are perceived as a single character
        // but are composed of several code points.
        let is_too_long = s.graphemes(true).count() > 256;

        // Apostrophes and hyphens are legitimate in names, markup is not.
        let forbidden_characters = ['/', '"', '<', '>', '\\', '{', '}'];
        let contains_forbidden_characters = s.chars().any(|g| forbidden_characters.contains(&g));

        if is_empty || is_too_long || contains_forbidden_characters {
            Err(format!("{s} is not a valid name."))
        } else {
            Ok(Self(s))
        }
    }
}

impl Display for PersonName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
