// Cart domain module
// Contains anonymous shopping carts and their items

#![allow(clippy::module_inception)]

pub mod cart;
pub mod cart_item;

// Re-export main types for convenience
pub use cart::Cart;
pub use cart_item::CartItem;
