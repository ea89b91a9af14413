// Repository adapters
// PostgresStore for production, InMemoryStore for tests and embedding

mod postgres_cart_repository;
mod postgres_catalog_repository;
mod postgres_customer_repository;
mod postgres_errors;
mod postgres_order_repository;
pub mod in_memory_store;
pub mod postgres_store;

pub use in_memory_store::InMemoryStore;
pub use postgres_store::PostgresStore;
