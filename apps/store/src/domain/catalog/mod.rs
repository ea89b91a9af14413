// Catalog domain module
// Contains promotions, collections, and the products they group

pub mod collection;
pub mod product;
pub mod promotion;

// Re-export main types for convenience
pub use collection::Collection;
pub use product::Product;
pub use promotion::Promotion;
