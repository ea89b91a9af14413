use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use super::postgres_errors::{delete_error, write_error};
use super::PostgresStore;
use crate::domain::customer::{Address, Customer, Email, Membership};
use crate::domain::errors::{StoreError, StoreResult};
use crate::domain::ids::{AddressId, CustomerId};
use crate::domain::repositories::CustomerRepository;
use crate::domain::schema::EntityKind;

#[derive(sqlx::FromRow)]
struct CustomerRow {
    id: Uuid,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    birth_date: Option<NaiveDate>,
    membership: String,
}

impl TryFrom<CustomerRow> for Customer {
    type Error = StoreError;

    fn try_from(r: CustomerRow) -> Result<Self, Self::Error> {
        let corrupt = |e: StoreError| StoreError::DataCorruption(format!("customer {}: {e}", r.id));
        let email = Email::new(r.email.as_str()).map_err(corrupt)?;
        let membership = r.membership.parse::<Membership>().map_err(corrupt)?;

        Ok(Customer::from_persistence(
            r.id.into(),
            r.first_name,
            r.last_name,
            email,
            r.phone,
            r.birth_date,
            membership,
        ))
    }
}

#[derive(sqlx::FromRow)]
struct AddressRow {
    id: Uuid,
    customer_id: Uuid,
    street: String,
    city: String,
}

impl From<AddressRow> for Address {
    fn from(r: AddressRow) -> Self {
        Address::from_persistence(r.id.into(), r.customer_id.into(), r.street, r.city)
    }
}

const CUSTOMER_COLUMNS: &str = "id, first_name, last_name, email, phone, birth_date, membership";

#[async_trait]
impl CustomerRepository for PostgresStore {
    async fn save_customer(&self, customer: &Customer) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO store_customer (
                id, first_name, last_name, email, phone, birth_date, membership
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE SET
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                email = EXCLUDED.email,
                phone = EXCLUDED.phone,
                birth_date = EXCLUDED.birth_date,
                membership = EXCLUDED.membership
            "#,
        )
        .bind(customer.id().as_uuid())
        .bind(customer.first_name())
        .bind(customer.last_name())
        .bind(customer.email().as_str())
        .bind(customer.phone())
        .bind(customer.birth_date())
        .bind(customer.membership().code())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, EntityKind::Customer))?;

        Ok(())
    }

    async fn find_customer(&self, id: CustomerId) -> StoreResult<Option<Customer>> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM store_customer WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Customer::try_from).transpose()
    }

    async fn find_customer_by_email(&self, email: &Email) -> StoreResult<Option<Customer>> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM store_customer WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Customer::try_from).transpose()
    }

    async fn delete_customer(&self, id: CustomerId) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM store_customer WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| delete_error(e, EntityKind::Customer))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Customer", id));
        }
        tracing::debug!(customer_id = %id, "Customer deleted");
        Ok(())
    }

    async fn save_address(&self, address: &Address) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO store_address (id, customer_id, street, city)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE SET
                customer_id = EXCLUDED.customer_id,
                street = EXCLUDED.street,
                city = EXCLUDED.city
            "#,
        )
        .bind(address.id().as_uuid())
        .bind(address.customer_id().as_uuid())
        .bind(address.street())
        .bind(address.city())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, EntityKind::Address))?;

        Ok(())
    }

    async fn find_addresses(&self, customer_id: CustomerId) -> StoreResult<Vec<Address>> {
        let rows = sqlx::query_as::<_, AddressRow>(
            r#"
            SELECT id, customer_id, street, city
            FROM store_address
            WHERE customer_id = $1
            ORDER BY city, street, id
            "#,
        )
        .bind(customer_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Address::from).collect())
    }

    async fn delete_address(&self, id: AddressId) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM store_address WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| delete_error(e, EntityKind::Address))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Address", id));
        }
        Ok(())
    }
}
