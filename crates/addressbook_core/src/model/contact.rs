//! Contact domain model.
//!
//! # Responsibility
//! - Define the address-book entry shape and its wire field names.
//! - Provide optional format checks for callers that want them.
//!
//! # Invariants
//! - Deserialization requires every field to be present.
//! - `validate()` never mutates the contact.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s.]+(\.[^@\s.]+)+$").expect("valid email regex"));
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9+\-(). ]*[0-9][0-9+\-(). ]*$").expect("valid phone regex"));

/// Caller-assigned contact identifier.
pub type ContactId = i64;

/// One address-book entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Intended to be unique; not enforced here.
    pub id: ContactId,
    /// Display name.
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Affiliated organization.
    pub company: String,
    /// Ordered labels. Order is caller-significant and duplicates are kept.
    pub tags: Vec<String>,
    /// Free-form text.
    pub notes: String,
}

/// Reasons a contact fails [`Contact::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactValidationError {
    EmptyName,
    InvalidEmail(String),
    InvalidPhone(String),
    BlankTag { index: usize },
}

impl Display for ContactValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "contact name cannot be empty"),
            Self::InvalidEmail(value) => write!(f, "contact email is invalid: {value}"),
            Self::InvalidPhone(value) => write!(f, "contact phone is invalid: {value}"),
            Self::BlankTag { index } => write!(f, "contact tag at index {index} is blank"),
        }
    }
}

impl Error for ContactValidationError {}

impl Contact {
    /// Checks field formats.
    ///
    /// # Contract
    /// - `name` must contain a non-whitespace character.
    /// - `email` and `phone` may be empty; when set they must look like an
    ///   address or a dialable number.
    /// - Every tag must contain a non-whitespace character.
    /// - Returns the first violation in field declaration order.
    pub fn validate(&self) -> Result<(), ContactValidationError> {
        if self.name.trim().is_empty() {
            return Err(ContactValidationError::EmptyName);
        }
        if !self.email.is_empty() && !EMAIL_RE.is_match(&self.email) {
            return Err(ContactValidationError::InvalidEmail(self.email.clone()));
        }
        if !self.phone.is_empty() && !PHONE_RE.is_match(&self.phone) {
            return Err(ContactValidationError::InvalidPhone(self.phone.clone()));
        }
        if let Some(index) = self.tags.iter().position(|tag| tag.trim().is_empty()) {
            return Err(ContactValidationError::BlankTag { index });
        }
        Ok(())
    }

    /// Returns whether `tag` is one of this contact's labels (exact match).
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|existing| existing == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::{Contact, ContactValidationError};

    fn sample() -> Contact {
        Contact {
            id: 7,
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "+44 (20) 7946-0018".to_string(),
            company: "Analytical Engines".to_string(),
            tags: vec!["math".to_string(), "vip".to_string()],
            notes: String::new(),
        }
    }

    #[test]
    fn validate_accepts_well_formed_contact() {
        assert_eq!(sample().validate(), Ok(()));
    }

    #[test]
    fn validate_allows_empty_email_and_phone() {
        let mut contact = sample();
        contact.email.clear();
        contact.phone.clear();
        assert_eq!(contact.validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_blank_name() {
        let mut contact = sample();
        contact.name = "   ".to_string();
        assert_eq!(contact.validate(), Err(ContactValidationError::EmptyName));
    }

    #[test]
    fn validate_rejects_malformed_email() {
        let mut contact = sample();
        contact.email = "ada@example".to_string();
        assert_eq!(
            contact.validate(),
            Err(ContactValidationError::InvalidEmail(
                "ada@example".to_string()
            ))
        );

        for malformed in ["a@.b.c", "a@b..c", "a@b.c.", "a@@b.c"] {
            contact.email = malformed.to_string();
            assert_eq!(
                contact.validate(),
                Err(ContactValidationError::InvalidEmail(malformed.to_string())),
                "`{malformed}` should be rejected"
            );
        }
    }

    #[test]
    fn validate_accepts_multi_label_email_domain() {
        let mut contact = sample();
        contact.email = "ada.lovelace@mail.example.co.uk".to_string();
        assert_eq!(contact.validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_phone_without_digits_or_with_letters() {
        let mut contact = sample();
        contact.phone = "+-()".to_string();
        assert!(matches!(
            contact.validate(),
            Err(ContactValidationError::InvalidPhone(_))
        ));

        contact.phone = "555-CALL".to_string();
        assert!(matches!(
            contact.validate(),
            Err(ContactValidationError::InvalidPhone(_))
        ));
    }

    #[test]
    fn validate_reports_index_of_blank_tag() {
        let mut contact = sample();
        contact.tags.push(" ".to_string());
        assert_eq!(
            contact.validate(),
            Err(ContactValidationError::BlankTag { index: 2 })
        );
    }

    #[test]
    fn has_tag_is_exact_and_case_sensitive() {
        let contact = sample();
        assert!(contact.has_tag("vip"));
        assert!(!contact.has_tag("VIP"));
        assert!(!contact.has_tag("vi"));
    }

    #[test]
    fn error_display_is_human_readable() {
        assert_eq!(
            ContactValidationError::BlankTag { index: 1 }.to_string(),
            "contact tag at index 1 is blank"
        );
    }
}
