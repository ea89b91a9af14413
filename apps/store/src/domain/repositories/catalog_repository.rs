use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::catalog::{Collection, Product, Promotion};
use crate::domain::errors::StoreResult;
use crate::domain::ids::{CollectionId, ProductId, PromotionId};

/// Repository for promotions, collections, and products
///
/// Writes fail with `MissingReference` when a referenced collection,
/// product, or promotion does not exist. Deletes follow the relation
/// catalog in [`crate::domain::schema`].
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Save a promotion (insert or update)
    async fn save_promotion(&self, promotion: &Promotion) -> StoreResult<()>;

    async fn find_promotion(&self, id: PromotionId) -> StoreResult<Option<Promotion>>;

    /// Delete a promotion, unlinking it from every product
    async fn delete_promotion(&self, id: PromotionId) -> StoreResult<()>;

    /// Save a collection (insert or update)
    async fn save_collection(&self, collection: &Collection) -> StoreResult<()>;

    async fn find_collection(&self, id: CollectionId) -> StoreResult<Option<Collection>>;

    /// List all collections ordered by title
    async fn list_collections(&self) -> StoreResult<Vec<Collection>>;

    /// Point a collection at a featured product, or clear it with `None`
    async fn set_featured_product(
        &self,
        collection_id: CollectionId,
        product_id: Option<ProductId>,
    ) -> StoreResult<()>;

    /// Delete a collection; refused while any product belongs to it
    async fn delete_collection(&self, id: CollectionId) -> StoreResult<()>;

    /// Save a product (insert or update)
    ///
    /// Returns the refreshed `last_update` timestamp.
    async fn save_product(&self, product: &Product) -> StoreResult<DateTime<Utc>>;

    async fn find_product(&self, id: ProductId) -> StoreResult<Option<Product>>;

    /// List the products of a collection ordered by title
    async fn find_products_by_collection(
        &self,
        collection_id: CollectionId,
    ) -> StoreResult<Vec<Product>>;

    /// Delete a product
    ///
    /// Refused while an order item references it. Otherwise its cart items
    /// and promotion links are removed and any collection featuring it is
    /// cleared.
    async fn delete_product(&self, id: ProductId) -> StoreResult<()>;

    /// Link a promotion to a product; linking twice is a no-op
    async fn add_promotion(&self, product_id: ProductId, promotion_id: PromotionId)
        -> StoreResult<()>;

    /// Remove a link; returns whether one existed
    async fn remove_promotion(
        &self,
        product_id: ProductId,
        promotion_id: PromotionId,
    ) -> StoreResult<bool>;

    /// Promotions linked to a product ordered by description
    async fn promotions_for_product(&self, product_id: ProductId) -> StoreResult<Vec<Promotion>>;
}
