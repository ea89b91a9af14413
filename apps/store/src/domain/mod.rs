// Domain layer module exports
// Entities, value objects and repository ports for the storefront.
// Nothing here depends on a storage backend.

pub mod ids;
pub mod errors;
pub mod value_objects;
pub mod schema;
pub mod cascade;
pub mod catalog;
pub mod customer;
pub mod order;
pub mod cart;
pub mod repositories;
