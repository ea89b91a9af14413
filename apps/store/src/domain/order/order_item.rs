use rust_decimal::Decimal;

use crate::domain::errors::StoreResult;
use crate::domain::ids::{OrderId, OrderItemId, ProductId};
use crate::domain::value_objects::{Money, Quantity};

/// Line of an order
///
/// The unit price is captured at order time and does not follow later
/// product price changes. Both the order and the product are protected
/// from deletion while the line exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    id: OrderItemId,
    order_id: OrderId,
    product_id: ProductId,
    quantity: Quantity,
    unit_price: Money,
}

impl OrderItem {
    pub fn new(
        order_id: OrderId,
        product_id: ProductId,
        quantity: i16,
        unit_price: Decimal,
    ) -> StoreResult<Self> {
        Ok(Self {
            id: OrderItemId::new(),
            order_id,
            product_id,
            quantity: Quantity::new(quantity)?,
            unit_price: Money::new(unit_price)?,
        })
    }

    pub fn id(&self) -> OrderItemId {
        self.id
    }

    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// Quantity times unit price
    pub fn line_total(&self) -> Decimal {
        self.unit_price.amount() * Decimal::from(self.quantity.get())
    }

    pub(crate) fn from_persistence(
        id: OrderItemId,
        order_id: OrderId,
        product_id: ProductId,
        quantity: Quantity,
        unit_price: Money,
    ) -> Self {
        Self {
            id,
            order_id,
            product_id,
            quantity,
            unit_price,
        }
    }
}
