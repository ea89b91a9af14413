// Customer domain module
// Contains the customer record, owned addresses, and value objects

#![allow(clippy::module_inception)]

pub mod address;
pub mod customer;
pub mod value_objects;

// Re-export main types for convenience
pub use address::Address;
pub use customer::Customer;
pub use value_objects::{Email, Membership};
