use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::errors::{StoreError, StoreResult};
use crate::domain::value_objects::MAX_CHAR_LENGTH;

/// Email value object representing a customer's unique address
///
/// # Invariants
/// - At most 255 characters
/// - Contains an '@' with a non-empty local part and domain
/// - Contains no whitespace
/// - Is immutable after construction
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Creates a new Email value object
    ///
    /// # Example
    /// ```
    /// use retrogo_store::domain::customer::value_objects::Email;
    ///
    /// let email = Email::new("test@example.com").expect("valid email");
    /// assert_eq!(email.as_str(), "test@example.com");
    /// assert!(Email::new("@example.com").is_err());
    /// ```
    pub fn new(email: impl Into<String>) -> StoreResult<Self> {
        let email = email.into();
        Self::validate(&email)?;
        Ok(Email(email))
    }

    fn validate(email: &str) -> StoreResult<()> {
        let invalid = |reason: &str| StoreError::Validation(format!("invalid email {email:?}: {reason}"));

        if email.is_empty() {
            return Err(invalid("cannot be empty"));
        }
        if email.chars().count() > MAX_CHAR_LENGTH {
            return Err(invalid("longer than 255 characters"));
        }
        if email.chars().any(char::is_whitespace) {
            return Err(invalid("contains whitespace"));
        }

        let (local, domain) = email.rsplit_once('@').ok_or_else(|| invalid("missing '@'"))?;
        if local.is_empty() {
            return Err(invalid("empty local part"));
        }
        if domain.is_empty() {
            return Err(invalid("empty domain"));
        }
        Ok(())
    }

    /// Returns the email as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the part after the last '@'
    pub fn domain(&self) -> &str {
        self.0.rsplit_once('@').map_or("", |(_, domain)| domain)
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Email {
    type Error = StoreError;

    fn try_from(email: String) -> Result<Self, Self::Error> {
        Self::new(email)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl FromStr for Email {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Customer membership tier
///
/// Persisted as a single-character code in a `VARCHAR(1)` column
/// constrained to `'B'`, `'S'` or `'G'`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Membership {
    #[default]
    #[serde(rename = "B")]
    Bronze,
    #[serde(rename = "S")]
    Silver,
    #[serde(rename = "G")]
    Gold,
}

impl Membership {
    pub const ALL: [Membership; 3] = [Membership::Bronze, Membership::Silver, Membership::Gold];

    /// Returns the stored code
    pub fn code(&self) -> &'static str {
        match self {
            Membership::Bronze => "B",
            Membership::Silver => "S",
            Membership::Gold => "G",
        }
    }

    /// Returns the human readable label
    pub fn label(&self) -> &'static str {
        match self {
            Membership::Bronze => "Bronze",
            Membership::Silver => "Silver",
            Membership::Gold => "Gold",
        }
    }
}

impl FromStr for Membership {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "B" => Ok(Membership::Bronze),
            "S" => Ok(Membership::Silver),
            "G" => Ok(Membership::Gold),
            other => Err(StoreError::Validation(format!(
                "invalid membership code {other:?}: expected one of B, S, G"
            ))),
        }
    }
}

impl fmt::Display for Membership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_email() {
        assert!(Email::new("test@example.com").is_ok());
    }

    #[test]
    fn valid_email_with_subdomain_and_tag() {
        let email = Email::new("user+tag@mail.example.com").unwrap();
        assert_eq!(email.domain(), "mail.example.com");
    }

    #[test]
    fn invalid_email_no_at_symbol() {
        assert!(Email::new("invalid").is_err());
    }

    #[test]
    fn invalid_email_empty_parts() {
        assert!(Email::new("@example.com").is_err());
        assert!(Email::new("user@").is_err());
        assert!(Email::new("").is_err());
    }

    #[test]
    fn invalid_email_whitespace() {
        assert!(Email::new("first last@example.com").is_err());
    }

    #[test]
    fn invalid_email_too_long() {
        let local = "a".repeat(250);
        assert!(Email::new(format!("{local}@example.com")).is_err());
    }

    #[test]
    fn email_display() {
        let email = Email::new("test@example.com").unwrap();
        assert_eq!(format!("{}", email), "test@example.com");
    }

    #[test]
    fn membership_defaults_to_bronze() {
        assert_eq!(Membership::default(), Membership::Bronze);
    }

    #[test]
    fn membership_codes_round_trip() {
        for membership in Membership::ALL {
            assert_eq!(membership.code().parse::<Membership>().unwrap(), membership);
        }
    }

    #[test]
    fn membership_rejects_unknown_codes() {
        for code in ["", "b", "X", "Bronze", "BS"] {
            assert!(code.parse::<Membership>().is_err(), "{code:?} should be rejected");
        }
    }

    #[test]
    fn membership_display() {
        assert_eq!(Membership::Gold.to_string(), "Gold");
        assert_eq!(Membership::Silver.code(), "S");
    }

    #[test]
    fn email_deserializing_validates() {
        assert!(serde_json::from_str::<Email>("\"\"").is_err());
        assert!(serde_json::from_str::<Email>("\"no-at-sign\"").is_err());

        let email: Email = serde_json::from_str("\"ada@example.com\"").unwrap();
        assert_eq!(email.as_str(), "ada@example.com");
        assert_eq!(serde_json::to_string(&email).unwrap(), "\"ada@example.com\"");
    }
}
