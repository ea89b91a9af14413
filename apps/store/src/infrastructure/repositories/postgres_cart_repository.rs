use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::postgres_errors::{delete_error, write_error};
use super::PostgresStore;
use crate::domain::cart::{Cart, CartItem};
use crate::domain::errors::{StoreError, StoreResult};
use crate::domain::ids::{CartId, CartItemId};
use crate::domain::repositories::CartRepository;
use crate::domain::schema::EntityKind;
use crate::domain::value_objects::Quantity;

#[derive(sqlx::FromRow)]
struct CartRow {
    id: Uuid,
    created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct CartItemRow {
    id: Uuid,
    cart_id: Uuid,
    product_id: Uuid,
    quantity: i16,
}

impl TryFrom<CartItemRow> for CartItem {
    type Error = StoreError;

    fn try_from(r: CartItemRow) -> Result<Self, Self::Error> {
        let quantity = Quantity::new(r.quantity)
            .map_err(|e| StoreError::DataCorruption(format!("cart item {}: {e}", r.id)))?;
        Ok(CartItem::from_persistence(
            r.id.into(),
            r.cart_id.into(),
            r.product_id.into(),
            quantity,
        ))
    }
}

#[async_trait]
impl CartRepository for PostgresStore {
    async fn save_cart(&self, cart: &Cart) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO store_cart (id, created_at)
            VALUES ($1, $2)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(cart.id().as_uuid())
        .bind(cart.created_at())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, EntityKind::Cart))?;

        Ok(())
    }

    async fn find_cart(&self, id: CartId) -> StoreResult<Option<Cart>> {
        let row = sqlx::query_as::<_, CartRow>("SELECT id, created_at FROM store_cart WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| Cart::from_persistence(r.id.into(), r.created_at)))
    }

    async fn delete_cart(&self, id: CartId) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM store_cart WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| delete_error(e, EntityKind::Cart))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Cart", id));
        }
        tracing::debug!(cart_id = %id, "Cart deleted");
        Ok(())
    }

    async fn save_cart_item(&self, item: &CartItem) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO store_cartitem (id, cart_id, product_id, quantity)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE SET
                cart_id = EXCLUDED.cart_id,
                product_id = EXCLUDED.product_id,
                quantity = EXCLUDED.quantity
            "#,
        )
        .bind(item.id().as_uuid())
        .bind(item.cart_id().as_uuid())
        .bind(item.product_id().as_uuid())
        .bind(item.quantity().get())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, EntityKind::CartItem))?;

        Ok(())
    }

    async fn items_for_cart(&self, cart_id: CartId) -> StoreResult<Vec<CartItem>> {
        let rows = sqlx::query_as::<_, CartItemRow>(
            r#"
            SELECT id, cart_id, product_id, quantity
            FROM store_cartitem
            WHERE cart_id = $1
            ORDER BY id
            "#,
        )
        .bind(cart_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(CartItem::try_from).collect()
    }

    async fn delete_cart_item(&self, id: CartItemId) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM store_cartitem WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| delete_error(e, EntityKind::CartItem))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("CartItem", id));
        }
        Ok(())
    }
}
