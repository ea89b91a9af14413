use chrono::{DateTime, Utc};

use super::value_objects::PaymentStatus;
use crate::domain::ids::{CustomerId, OrderId};
use crate::domain::value_objects::timestamp_now;

/// Order placed by a customer
///
/// `placed_at` is fixed at creation. The customer cannot be deleted while
/// any of their orders exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    id: OrderId,
    customer_id: CustomerId,
    placed_at: DateTime<Utc>,
    payment_status: PaymentStatus,
}

impl Order {
    /// Creates a pending order stamped with the current time
    pub fn new(customer_id: CustomerId) -> Self {
        Self {
            id: OrderId::new(),
            customer_id,
            placed_at: timestamp_now(),
            payment_status: PaymentStatus::default(),
        }
    }

    pub fn set_payment_status(&mut self, status: PaymentStatus) {
        self.payment_status = status;
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn placed_at(&self) -> DateTime<Utc> {
        self.placed_at
    }

    pub fn payment_status(&self) -> PaymentStatus {
        self.payment_status
    }

    pub(crate) fn from_persistence(
        id: OrderId,
        customer_id: CustomerId,
        placed_at: DateTime<Utc>,
        payment_status: PaymentStatus,
    ) -> Self {
        Self {
            id,
            customer_id,
            placed_at,
            payment_status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_order_is_pending() {
        let customer = CustomerId::new();
        let order = Order::new(customer);
        assert_eq!(order.customer_id(), customer);
        assert_eq!(order.payment_status(), PaymentStatus::Pending);
        assert!(order.placed_at() <= Utc::now());
    }

    #[test]
    fn payment_status_can_change() {
        let mut order = Order::new(CustomerId::new());
        order.set_payment_status(PaymentStatus::Failed);
        assert_eq!(order.payment_status(), PaymentStatus::Failed);
    }
}
