// Repository interfaces (ports)
// Implemented by the adapters in crate::infrastructure::repositories

pub mod cart_repository;
pub mod catalog_repository;
pub mod customer_repository;
pub mod order_repository;

pub use cart_repository::CartRepository;
pub use catalog_repository::CatalogRepository;
pub use customer_repository::CustomerRepository;
pub use order_repository::OrderRepository;
