use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::postgres_errors::{delete_error, write_error};
use super::PostgresStore;
use crate::domain::errors::{StoreError, StoreResult};
use crate::domain::ids::{CustomerId, OrderId, OrderItemId};
use crate::domain::order::{Order, OrderItem, PaymentStatus};
use crate::domain::repositories::OrderRepository;
use crate::domain::schema::EntityKind;
use crate::domain::value_objects::{Money, Quantity};

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    customer_id: Uuid,
    placed_at: DateTime<Utc>,
    payment_status: String,
}

impl TryFrom<OrderRow> for Order {
    type Error = StoreError;

    fn try_from(r: OrderRow) -> Result<Self, Self::Error> {
        let status = r
            .payment_status
            .parse::<PaymentStatus>()
            .map_err(|e| StoreError::DataCorruption(format!("order {}: {e}", r.id)))?;
        Ok(Order::from_persistence(
            r.id.into(),
            r.customer_id.into(),
            r.placed_at,
            status,
        ))
    }
}

#[derive(sqlx::FromRow)]
struct OrderItemRow {
    id: Uuid,
    order_id: Uuid,
    product_id: Uuid,
    quantity: i16,
    unit_price: Decimal,
}

impl TryFrom<OrderItemRow> for OrderItem {
    type Error = StoreError;

    fn try_from(r: OrderItemRow) -> Result<Self, Self::Error> {
        let corrupt = |e: StoreError| StoreError::DataCorruption(format!("order item {}: {e}", r.id));
        let quantity = Quantity::new(r.quantity).map_err(corrupt)?;
        let unit_price = Money::new(r.unit_price).map_err(corrupt)?;
        Ok(OrderItem::from_persistence(
            r.id.into(),
            r.order_id.into(),
            r.product_id.into(),
            quantity,
            unit_price,
        ))
    }
}

#[async_trait]
impl OrderRepository for PostgresStore {
    async fn save_order(&self, order: &Order) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO store_order (id, customer_id, placed_at, payment_status)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE SET
                customer_id = EXCLUDED.customer_id,
                payment_status = EXCLUDED.payment_status
            "#,
        )
        .bind(order.id().as_uuid())
        .bind(order.customer_id().as_uuid())
        .bind(order.placed_at())
        .bind(order.payment_status().code())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, EntityKind::Order))?;

        Ok(())
    }

    async fn find_order(&self, id: OrderId) -> StoreResult<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>(
            "SELECT id, customer_id, placed_at, payment_status FROM store_order WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Order::try_from).transpose()
    }

    async fn find_orders_by_customer(&self, customer_id: CustomerId) -> StoreResult<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, customer_id, placed_at, payment_status
            FROM store_order
            WHERE customer_id = $1
            ORDER BY placed_at DESC, id
            "#,
        )
        .bind(customer_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Order::try_from).collect()
    }

    async fn update_payment_status(&self, id: OrderId, status: PaymentStatus) -> StoreResult<()> {
        let result = sqlx::query("UPDATE store_order SET payment_status = $2 WHERE id = $1")
            .bind(id.as_uuid())
            .bind(status.code())
            .execute(&self.pool)
            .await
            .map_err(|e| write_error(e, EntityKind::Order))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Order", id));
        }
        tracing::debug!(order_id = %id, %status, "Payment status updated");
        Ok(())
    }

    async fn delete_order(&self, id: OrderId) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM store_order WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| delete_error(e, EntityKind::Order))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Order", id));
        }
        tracing::debug!(order_id = %id, "Order deleted");
        Ok(())
    }

    async fn save_order_item(&self, item: &OrderItem) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO store_orderitem (id, order_id, product_id, quantity, unit_price)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE SET
                order_id = EXCLUDED.order_id,
                product_id = EXCLUDED.product_id,
                quantity = EXCLUDED.quantity,
                unit_price = EXCLUDED.unit_price
            "#,
        )
        .bind(item.id().as_uuid())
        .bind(item.order_id().as_uuid())
        .bind(item.product_id().as_uuid())
        .bind(item.quantity().get())
        .bind(item.unit_price().amount())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, EntityKind::OrderItem))?;

        Ok(())
    }

    async fn items_for_order(&self, order_id: OrderId) -> StoreResult<Vec<OrderItem>> {
        let rows = sqlx::query_as::<_, OrderItemRow>(
            r#"
            SELECT id, order_id, product_id, quantity, unit_price
            FROM store_orderitem
            WHERE order_id = $1
            ORDER BY id
            "#,
        )
        .bind(order_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(OrderItem::try_from).collect()
    }

    async fn delete_order_item(&self, id: OrderItemId) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM store_orderitem WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| delete_error(e, EntityKind::OrderItem))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("OrderItem", id));
        }
        Ok(())
    }
}
