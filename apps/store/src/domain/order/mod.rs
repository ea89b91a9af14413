// Order domain module
// Contains placed orders, their line items, and the payment status

#![allow(clippy::module_inception)]

pub mod order;
pub mod order_item;
pub mod value_objects;

// Re-export main types for convenience
pub use order::Order;
pub use order_item::OrderItem;
pub use value_objects::PaymentStatus;
