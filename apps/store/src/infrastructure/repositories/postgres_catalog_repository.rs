use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::postgres_errors::{delete_error, write_error};
use super::PostgresStore;
use crate::domain::catalog::{Collection, Product, Promotion};
use crate::domain::errors::{StoreError, StoreResult};
use crate::domain::ids::{CollectionId, ProductId, PromotionId};
use crate::domain::repositories::CatalogRepository;
use crate::domain::schema::EntityKind;
use crate::domain::value_objects::Money;

#[derive(sqlx::FromRow)]
struct PromotionRow {
    id: Uuid,
    description: String,
    discount: f64,
}

impl From<PromotionRow> for Promotion {
    fn from(r: PromotionRow) -> Self {
        Promotion::from_persistence(r.id.into(), r.description, r.discount)
    }
}

#[derive(sqlx::FromRow)]
struct CollectionRow {
    id: Uuid,
    title: String,
    featured_product_id: Option<Uuid>,
}

impl From<CollectionRow> for Collection {
    fn from(r: CollectionRow) -> Self {
        Collection::from_persistence(r.id.into(), r.title, r.featured_product_id.map(Into::into))
    }
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    collection_id: Uuid,
    title: String,
    description: String,
    price: Decimal,
    inventory: i32,
    last_update: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = StoreError;

    fn try_from(r: ProductRow) -> Result<Self, Self::Error> {
        let price = Money::new(r.price)
            .map_err(|e| StoreError::DataCorruption(format!("product {}: {e}", r.id)))?;
        Ok(Product::from_persistence(
            r.id.into(),
            r.collection_id.into(),
            r.title,
            r.description,
            price,
            r.inventory,
            r.last_update,
        ))
    }
}

const PRODUCT_COLUMNS: &str =
    "id, collection_id, title, description, price, inventory, last_update";

#[async_trait]
impl CatalogRepository for PostgresStore {
    async fn save_promotion(&self, promotion: &Promotion) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO store_promotion (id, description, discount)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE SET
                description = EXCLUDED.description,
                discount = EXCLUDED.discount
            "#,
        )
        .bind(promotion.id().as_uuid())
        .bind(promotion.description())
        .bind(promotion.discount())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, EntityKind::Promotion))?;

        Ok(())
    }

    async fn find_promotion(&self, id: PromotionId) -> StoreResult<Option<Promotion>> {
        let row = sqlx::query_as::<_, PromotionRow>(
            "SELECT id, description, discount FROM store_promotion WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Promotion::from))
    }

    async fn delete_promotion(&self, id: PromotionId) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM store_promotion WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| delete_error(e, EntityKind::Promotion))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Promotion", id));
        }
        tracing::debug!(promotion_id = %id, "Promotion deleted");
        Ok(())
    }

    async fn save_collection(&self, collection: &Collection) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO store_collection (id, title, featured_product_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE SET
                title = EXCLUDED.title,
                featured_product_id = EXCLUDED.featured_product_id
            "#,
        )
        .bind(collection.id().as_uuid())
        .bind(collection.title())
        .bind(collection.featured_product_id().map(|p| p.as_uuid()))
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, EntityKind::Collection))?;

        Ok(())
    }

    async fn find_collection(&self, id: CollectionId) -> StoreResult<Option<Collection>> {
        let row = sqlx::query_as::<_, CollectionRow>(
            "SELECT id, title, featured_product_id FROM store_collection WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Collection::from))
    }

    async fn list_collections(&self) -> StoreResult<Vec<Collection>> {
        let rows = sqlx::query_as::<_, CollectionRow>(
            "SELECT id, title, featured_product_id FROM store_collection ORDER BY title, id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Collection::from).collect())
    }

    async fn set_featured_product(
        &self,
        collection_id: CollectionId,
        product_id: Option<ProductId>,
    ) -> StoreResult<()> {
        let result = sqlx::query(
            "UPDATE store_collection SET featured_product_id = $2 WHERE id = $1",
        )
        .bind(collection_id.as_uuid())
        .bind(product_id.map(|p| p.as_uuid()))
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, EntityKind::Collection))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Collection", collection_id));
        }
        Ok(())
    }

    async fn delete_collection(&self, id: CollectionId) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM store_collection WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| delete_error(e, EntityKind::Collection))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Collection", id));
        }
        tracing::debug!(collection_id = %id, "Collection deleted");
        Ok(())
    }

    async fn save_product(&self, product: &Product) -> StoreResult<DateTime<Utc>> {
        let last_update = sqlx::query_scalar::<_, DateTime<Utc>>(
            r#"
            INSERT INTO store_product (
                id, collection_id, title, description, price, inventory, last_update
            )
            VALUES ($1, $2, $3, $4, $5, $6, NOW())
            ON CONFLICT (id) DO UPDATE SET
                collection_id = EXCLUDED.collection_id,
                title = EXCLUDED.title,
                description = EXCLUDED.description,
                price = EXCLUDED.price,
                inventory = EXCLUDED.inventory,
                last_update = NOW()
            RETURNING last_update
            "#,
        )
        .bind(product.id().as_uuid())
        .bind(product.collection_id().as_uuid())
        .bind(product.title())
        .bind(product.description())
        .bind(product.price().amount())
        .bind(product.inventory())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(e, EntityKind::Product))?;

        Ok(last_update)
    }

    async fn find_product(&self, id: ProductId) -> StoreResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM store_product WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Product::try_from).transpose()
    }

    async fn find_products_by_collection(
        &self,
        collection_id: CollectionId,
    ) -> StoreResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM store_product WHERE collection_id = $1 ORDER BY title, id"
        ))
        .bind(collection_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Product::try_from).collect()
    }

    async fn delete_product(&self, id: ProductId) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM store_product WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| delete_error(e, EntityKind::Product))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Product", id));
        }
        tracing::debug!(product_id = %id, "Product deleted");
        Ok(())
    }

    async fn add_promotion(
        &self,
        product_id: ProductId,
        promotion_id: PromotionId,
    ) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO store_product_promotions (id, product_id, promotion_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (product_id, promotion_id) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(product_id.as_uuid())
        .bind(promotion_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, EntityKind::ProductPromotion))?;

        Ok(())
    }

    async fn remove_promotion(
        &self,
        product_id: ProductId,
        promotion_id: PromotionId,
    ) -> StoreResult<bool> {
        let result = sqlx::query(
            "DELETE FROM store_product_promotions WHERE product_id = $1 AND promotion_id = $2",
        )
        .bind(product_id.as_uuid())
        .bind(promotion_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| delete_error(e, EntityKind::ProductPromotion))?;

        Ok(result.rows_affected() > 0)
    }

    async fn promotions_for_product(&self, product_id: ProductId) -> StoreResult<Vec<Promotion>> {
        let rows = sqlx::query_as::<_, PromotionRow>(
            r#"
            SELECT p.id, p.description, p.discount
            FROM store_promotion p
            JOIN store_product_promotions pp ON pp.promotion_id = p.id
            WHERE pp.product_id = $1
            ORDER BY p.description, p.id
            "#,
        )
        .bind(product_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Promotion::from).collect())
    }
}
