use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::errors::StoreResult;
use crate::domain::ids::{CollectionId, ProductId};
use crate::domain::value_objects::{bounded_text, timestamp_now, Money, MAX_CHAR_LENGTH};

/// Product listed in exactly one collection
///
/// # Invariants
/// - Title is non-empty and at most 255 characters
/// - Description may be empty and is unbounded
/// - Price fits `NUMERIC(6, 2)`
/// - Inventory starts at 0
/// - `last_update` is refreshed by the repository on every save
///
/// Promotions are a many-to-many link managed through
/// [`CatalogRepository`](crate::domain::repositories::CatalogRepository).
///
/// # Example
/// ```
/// use retrogo_store::domain::catalog::Product;
/// use retrogo_store::domain::ids::CollectionId;
/// use rust_decimal::Decimal;
///
/// let product = Product::new(
///     CollectionId::new(),
///     "Game Boy Color",
///     "",
///     Decimal::new(8999, 2),
/// ).expect("valid product");
///
/// assert_eq!(product.inventory(), 0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    id: ProductId,
    collection_id: CollectionId,
    title: String,
    description: String,
    price: Money,
    inventory: i32,
    last_update: DateTime<Utc>,
}

impl Product {
    pub fn new(
        collection_id: CollectionId,
        title: impl Into<String>,
        description: impl Into<String>,
        price: Decimal,
    ) -> StoreResult<Self> {
        Ok(Self {
            id: ProductId::new(),
            collection_id,
            title: bounded_text("title", title, MAX_CHAR_LENGTH)?,
            description: description.into(),
            price: Money::new(price)?,
            inventory: 0,
            last_update: timestamp_now(),
        })
    }

    /// Builder-style inventory override
    pub fn with_inventory(mut self, inventory: i32) -> Self {
        self.inventory = inventory;
        self
    }

    pub fn set_price(&mut self, price: Decimal) -> StoreResult<()> {
        self.price = Money::new(price)?;
        Ok(())
    }

    pub fn set_inventory(&mut self, inventory: i32) {
        self.inventory = inventory;
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Moves the product to another collection
    pub fn move_to(&mut self, collection_id: CollectionId) {
        self.collection_id = collection_id;
    }

    /// Records the save timestamp
    pub(crate) fn touch(&mut self, at: DateTime<Utc>) {
        self.last_update = at;
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn collection_id(&self) -> CollectionId {
        self.collection_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn inventory(&self) -> i32 {
        self.inventory
    }

    pub fn last_update(&self) -> DateTime<Utc> {
        self.last_update
    }

    /// Reconstructs a Product from stored data
    ///
    /// Only to be used by repository implementations.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_persistence(
        id: ProductId,
        collection_id: CollectionId,
        title: String,
        description: String,
        price: Money,
        inventory: i32,
        last_update: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            collection_id,
            title,
            description,
            price,
            inventory,
            last_update,
        }
    }
}
