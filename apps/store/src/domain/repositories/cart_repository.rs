use async_trait::async_trait;

use crate::domain::cart::{Cart, CartItem};
use crate::domain::errors::StoreResult;
use crate::domain::ids::{CartId, CartItemId};

/// Repository for carts and cart items
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Insert a cart; saving an existing cart is a no-op
    async fn save_cart(&self, cart: &Cart) -> StoreResult<()>;

    async fn find_cart(&self, id: CartId) -> StoreResult<Option<Cart>>;

    /// Delete a cart together with its items
    async fn delete_cart(&self, id: CartId) -> StoreResult<()>;

    /// Save a cart item (insert or update)
    async fn save_cart_item(&self, item: &CartItem) -> StoreResult<()>;

    async fn items_for_cart(&self, cart_id: CartId) -> StoreResult<Vec<CartItem>>;

    async fn delete_cart_item(&self, id: CartItemId) -> StoreResult<()>;
}
