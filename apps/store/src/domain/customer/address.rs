use crate::domain::errors::StoreResult;
use crate::domain::ids::{AddressId, CustomerId};
use crate::domain::value_objects::{bounded_text, MAX_CHAR_LENGTH};

/// Postal address owned by a customer
///
/// Removed together with its customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    id: AddressId,
    customer_id: CustomerId,
    street: String,
    city: String,
}

impl Address {
    pub fn new(
        customer_id: CustomerId,
        street: impl Into<String>,
        city: impl Into<String>,
    ) -> StoreResult<Self> {
        Ok(Self {
            id: AddressId::new(),
            customer_id,
            street: bounded_text("street", street, MAX_CHAR_LENGTH)?,
            city: bounded_text("city", city, MAX_CHAR_LENGTH)?,
        })
    }

    pub fn id(&self) -> AddressId {
        self.id
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn street(&self) -> &str {
        &self.street
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub(crate) fn from_persistence(
        id: AddressId,
        customer_id: CustomerId,
        street: String,
        city: String,
    ) -> Self {
        Self {
            id,
            customer_id,
            street,
            city,
        }
    }
}
