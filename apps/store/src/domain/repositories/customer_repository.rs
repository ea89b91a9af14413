use async_trait::async_trait;

use crate::domain::customer::{Address, Customer, Email};
use crate::domain::errors::StoreResult;
use crate::domain::ids::{AddressId, CustomerId};

/// Repository for customers and their addresses
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Save a customer (insert or update)
    ///
    /// Fails with `Duplicate` when another customer already uses the email.
    async fn save_customer(&self, customer: &Customer) -> StoreResult<()>;

    async fn find_customer(&self, id: CustomerId) -> StoreResult<Option<Customer>>;

    async fn find_customer_by_email(&self, email: &Email) -> StoreResult<Option<Customer>>;

    /// Delete a customer together with their addresses
    ///
    /// Refused while the customer has orders.
    async fn delete_customer(&self, id: CustomerId) -> StoreResult<()>;

    /// Save an address (insert or update)
    async fn save_address(&self, address: &Address) -> StoreResult<()>;

    /// Addresses of a customer ordered by city, then street
    async fn find_addresses(&self, customer_id: CustomerId) -> StoreResult<Vec<Address>>;

    async fn delete_address(&self, id: AddressId) -> StoreResult<()>;
}
