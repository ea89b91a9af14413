use chrono::NaiveDate;

use super::value_objects::{Email, Membership};
use crate::domain::errors::StoreResult;
use crate::domain::ids::CustomerId;
use crate::domain::value_objects::{bounded_text, MAX_CHAR_LENGTH};

/// Customer record
///
/// # Invariants
/// - Names and phone are non-empty and at most 255 characters
/// - Email is valid; uniqueness is enforced by the repository
/// - Membership is one of the fixed tiers (Bronze by default)
///
/// # Example
/// ```
/// use retrogo_store::domain::customer::{Customer, Email, Membership};
///
/// let customer = Customer::new(
///     "Ada",
///     "Lovelace",
///     Email::new("ada@example.com").unwrap(),
///     "+44 20 7946 0000",
///     None,
/// ).expect("valid customer");
///
/// assert_eq!(customer.membership(), Membership::Bronze);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    id: CustomerId,
    first_name: String,
    last_name: String,
    email: Email,
    phone: String,
    birth_date: Option<NaiveDate>,
    membership: Membership,
}

impl Customer {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: Email,
        phone: impl Into<String>,
        birth_date: Option<NaiveDate>,
    ) -> StoreResult<Self> {
        Ok(Self {
            id: CustomerId::new(),
            first_name: bounded_text("first_name", first_name, MAX_CHAR_LENGTH)?,
            last_name: bounded_text("last_name", last_name, MAX_CHAR_LENGTH)?,
            email,
            phone: bounded_text("phone", phone, MAX_CHAR_LENGTH)?,
            birth_date,
            membership: Membership::default(),
        })
    }

    /// Builder-style membership override
    pub fn with_membership(mut self, membership: Membership) -> Self {
        self.membership = membership;
        self
    }

    pub fn set_membership(&mut self, membership: Membership) {
        self.membership = membership;
    }

    pub fn set_email(&mut self, email: Email) {
        self.email = email;
    }

    pub fn set_phone(&mut self, phone: impl Into<String>) -> StoreResult<()> {
        self.phone = bounded_text("phone", phone, MAX_CHAR_LENGTH)?;
        Ok(())
    }

    pub fn id(&self) -> CustomerId {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn birth_date(&self) -> Option<NaiveDate> {
        self.birth_date
    }

    pub fn membership(&self) -> Membership {
        self.membership
    }

    /// Reconstructs a Customer from stored data
    ///
    /// Only to be used by repository implementations.
    pub(crate) fn from_persistence(
        id: CustomerId,
        first_name: String,
        last_name: String,
        email: Email,
        phone: String,
        birth_date: Option<NaiveDate>,
        membership: Membership,
    ) -> Self {
        Self {
            id,
            first_name,
            last_name,
            email,
            phone,
            birth_date,
            membership,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email() -> Email {
        Email::new("grace@example.com").unwrap()
    }

    #[test]
    fn create_customer_defaults_to_bronze() {
        let customer = Customer::new("Grace", "Hopper", email(), "555-0100", None).unwrap();
        assert_eq!(customer.membership(), Membership::Bronze);
        assert_eq!(customer.full_name(), "Grace Hopper");
        assert!(customer.birth_date().is_none());
    }

    #[test]
    fn create_customer_with_birth_date() {
        let born = NaiveDate::from_ymd_opt(1906, 12, 9).unwrap();
        let customer = Customer::new("Grace", "Hopper", email(), "555-0100", Some(born)).unwrap();
        assert_eq!(customer.birth_date(), Some(born));
    }

    #[test]
    fn create_customer_with_empty_name_fails() {
        let result = Customer::new("", "Hopper", email(), "555-0100", None);
        assert!(result.unwrap_err().to_string().contains("first_name"));
    }

    #[test]
    fn create_customer_with_long_phone_fails() {
        let result = Customer::new("Grace", "Hopper", email(), "9".repeat(256), None);
        assert!(result.is_err());
    }

    #[test]
    fn membership_can_be_upgraded() {
        let mut customer = Customer::new("Grace", "Hopper", email(), "555-0100", None)
            .unwrap()
            .with_membership(Membership::Silver);
        assert_eq!(customer.membership(), Membership::Silver);

        customer.set_membership(Membership::Gold);
        assert_eq!(customer.membership(), Membership::Gold);
    }
}
