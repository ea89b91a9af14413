use crate::domain::errors::StoreResult;
use crate::domain::ids::{CartId, CartItemId, ProductId};
use crate::domain::value_objects::Quantity;

/// Product placed in a cart
///
/// Removed when either its cart or its product is deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    id: CartItemId,
    cart_id: CartId,
    product_id: ProductId,
    quantity: Quantity,
}

impl CartItem {
    pub fn new(cart_id: CartId, product_id: ProductId, quantity: i16) -> StoreResult<Self> {
        Ok(Self {
            id: CartItemId::new(),
            cart_id,
            product_id,
            quantity: Quantity::new(quantity)?,
        })
    }

    pub fn set_quantity(&mut self, quantity: i16) -> StoreResult<()> {
        self.quantity = Quantity::new(quantity)?;
        Ok(())
    }

    pub fn id(&self) -> CartItemId {
        self.id
    }

    pub fn cart_id(&self) -> CartId {
        self.cart_id
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub(crate) fn from_persistence(
        id: CartItemId,
        cart_id: CartId,
        product_id: ProductId,
        quantity: Quantity,
    ) -> Self {
        Self {
            id,
            cart_id,
            product_id,
            quantity,
        }
    }
}
