use async_trait::async_trait;

use crate::domain::errors::StoreResult;
use crate::domain::ids::{CustomerId, OrderId, OrderItemId};
use crate::domain::order::{Order, OrderItem, PaymentStatus};

/// Repository for orders and their line items
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Save an order (insert or update)
    ///
    /// `placed_at` is written on insert and never changed afterwards.
    async fn save_order(&self, order: &Order) -> StoreResult<()>;

    async fn find_order(&self, id: OrderId) -> StoreResult<Option<Order>>;

    /// Orders of a customer, newest first
    async fn find_orders_by_customer(&self, customer_id: CustomerId) -> StoreResult<Vec<Order>>;

    async fn update_payment_status(&self, id: OrderId, status: PaymentStatus) -> StoreResult<()>;

    /// Delete an order; refused while it has items
    async fn delete_order(&self, id: OrderId) -> StoreResult<()>;

    /// Save an order item (insert or update)
    async fn save_order_item(&self, item: &OrderItem) -> StoreResult<()>;

    async fn items_for_order(&self, order_id: OrderId) -> StoreResult<Vec<OrderItem>>;

    async fn delete_order_item(&self, id: OrderItemId) -> StoreResult<()>;
}
