use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use uuid::Uuid;

use crate::domain::cart::{Cart, CartItem};
use crate::domain::cascade::{plan_delete, DeletePlan, ReferenceIndex};
use crate::domain::catalog::{Collection, Product, Promotion};
use crate::domain::customer::{Address, Customer, Email};
use crate::domain::errors::{StoreError, StoreResult};
use crate::domain::ids::{
    AddressId, CartId, CartItemId, CollectionId, CustomerId, OrderId, OrderItemId, ProductId,
    PromotionId,
};
use crate::domain::order::{Order, OrderItem, PaymentStatus};
use crate::domain::repositories::{
    CartRepository, CatalogRepository, CustomerRepository, OrderRepository,
};
use crate::domain::schema::{relations_from, EntityKind, Relation};
use crate::domain::value_objects::timestamp_now;

#[derive(Default)]
struct Tables {
    promotions: HashMap<PromotionId, Promotion>,
    collections: HashMap<CollectionId, Collection>,
    products: HashMap<ProductId, Product>,
    product_promotions: HashMap<Uuid, (ProductId, PromotionId)>,
    customers: HashMap<CustomerId, Customer>,
    addresses: HashMap<AddressId, Address>,
    orders: HashMap<OrderId, Order>,
    order_items: HashMap<OrderItemId, OrderItem>,
    carts: HashMap<CartId, Cart>,
    cart_items: HashMap<CartItemId, CartItem>,
}

impl Tables {
    fn exists(&self, entity: EntityKind, id: Uuid) -> bool {
        match entity {
            EntityKind::Promotion => self.promotions.contains_key(&PromotionId::from(id)),
            EntityKind::Collection => self.collections.contains_key(&CollectionId::from(id)),
            EntityKind::Product => self.products.contains_key(&ProductId::from(id)),
            EntityKind::ProductPromotion => self.product_promotions.contains_key(&id),
            EntityKind::Customer => self.customers.contains_key(&CustomerId::from(id)),
            EntityKind::Order => self.orders.contains_key(&OrderId::from(id)),
            EntityKind::OrderItem => self.order_items.contains_key(&OrderItemId::from(id)),
            EntityKind::Address => self.addresses.contains_key(&AddressId::from(id)),
            EntityKind::Cart => self.carts.contains_key(&CartId::from(id)),
            EntityKind::CartItem => self.cart_items.contains_key(&CartItemId::from(id)),
        }
    }

    /// Checks every foreign key declared on `entity` against the target table
    ///
    /// `columns` maps column names to the value about to be written; `None`
    /// is a null and always passes.
    fn check_references(
        &self,
        entity: EntityKind,
        columns: &[(&str, Option<Uuid>)],
    ) -> StoreResult<()> {
        for relation in relations_from(entity) {
            let value = columns
                .iter()
                .find(|(column, _)| *column == relation.column)
                .and_then(|(_, value)| *value);

            if let Some(id) = value {
                if !self.exists(relation.parent, id) {
                    return Err(StoreError::MissingReference {
                        entity: entity.name(),
                        referenced: relation.parent.name(),
                    });
                }
            }
        }
        Ok(())
    }

    fn remove(&mut self, entity: EntityKind, id: Uuid) {
        match entity {
            EntityKind::Promotion => {
                self.promotions.remove(&PromotionId::from(id));
            }
            EntityKind::Collection => {
                self.collections.remove(&CollectionId::from(id));
            }
            EntityKind::Product => {
                self.products.remove(&ProductId::from(id));
            }
            EntityKind::ProductPromotion => {
                self.product_promotions.remove(&id);
            }
            EntityKind::Customer => {
                self.customers.remove(&CustomerId::from(id));
            }
            EntityKind::Order => {
                self.orders.remove(&OrderId::from(id));
            }
            EntityKind::OrderItem => {
                self.order_items.remove(&OrderItemId::from(id));
            }
            EntityKind::Address => {
                self.addresses.remove(&AddressId::from(id));
            }
            EntityKind::Cart => {
                self.carts.remove(&CartId::from(id));
            }
            EntityKind::CartItem => {
                self.cart_items.remove(&CartItemId::from(id));
            }
        }
    }

    fn clear_reference(&mut self, relation: &Relation, child: Uuid) {
        match (relation.child, relation.column) {
            (EntityKind::Collection, "featured_product_id") => {
                if let Some(collection) = self.collections.get_mut(&CollectionId::from(child)) {
                    collection.set_featured_product(None);
                }
            }
            _ => tracing::warn!(relation = relation.name, "No nullable column to clear"),
        }
    }

    /// Plans and applies a delete, or leaves every table untouched
    fn delete(&mut self, entity: EntityKind, id: Uuid) -> StoreResult<DeletePlan> {
        if !self.exists(entity, id) {
            return Err(StoreError::not_found(entity.name(), id));
        }

        let plan = plan_delete(&*self, entity, id).inspect_err(|e| {
            tracing::warn!(%entity, %id, error = %e, "Delete refused");
        })?;

        for (relation, child) in &plan.nullifications {
            self.clear_reference(relation, *child);
        }
        for (kind, row) in &plan.deletions {
            self.remove(*kind, *row);
        }

        tracing::debug!(
            %entity,
            %id,
            deleted = plan.deletions.len(),
            nullified = plan.nullifications.len(),
            "Delete applied"
        );
        Ok(plan)
    }
}

impl ReferenceIndex for Tables {
    fn referencing(&self, relation: &Relation, parent: Uuid) -> Vec<Uuid> {
        match (relation.child, relation.column) {
            (EntityKind::Collection, "featured_product_id") => self
                .collections
                .values()
                .filter(|c| c.featured_product_id().map(|p| p.as_uuid()) == Some(parent))
                .map(|c| c.id().as_uuid())
                .collect(),
            (EntityKind::Product, "collection_id") => self
                .products
                .values()
                .filter(|p| p.collection_id().as_uuid() == parent)
                .map(|p| p.id().as_uuid())
                .collect(),
            (EntityKind::ProductPromotion, "product_id") => self
                .product_promotions
                .iter()
                .filter(|(_, (product, _))| product.as_uuid() == parent)
                .map(|(link, _)| *link)
                .collect(),
            (EntityKind::ProductPromotion, "promotion_id") => self
                .product_promotions
                .iter()
                .filter(|(_, (_, promotion))| promotion.as_uuid() == parent)
                .map(|(link, _)| *link)
                .collect(),
            (EntityKind::Order, "customer_id") => self
                .orders
                .values()
                .filter(|o| o.customer_id().as_uuid() == parent)
                .map(|o| o.id().as_uuid())
                .collect(),
            (EntityKind::OrderItem, "order_id") => self
                .order_items
                .values()
                .filter(|i| i.order_id().as_uuid() == parent)
                .map(|i| i.id().as_uuid())
                .collect(),
            (EntityKind::OrderItem, "product_id") => self
                .order_items
                .values()
                .filter(|i| i.product_id().as_uuid() == parent)
                .map(|i| i.id().as_uuid())
                .collect(),
            (EntityKind::Address, "customer_id") => self
                .addresses
                .values()
                .filter(|a| a.customer_id().as_uuid() == parent)
                .map(|a| a.id().as_uuid())
                .collect(),
            (EntityKind::CartItem, "cart_id") => self
                .cart_items
                .values()
                .filter(|i| i.cart_id().as_uuid() == parent)
                .map(|i| i.id().as_uuid())
                .collect(),
            (EntityKind::CartItem, "product_id") => self
                .cart_items
                .values()
                .filter(|i| i.product_id().as_uuid() == parent)
                .map(|i| i.id().as_uuid())
                .collect(),
            _ => {
                tracing::warn!(relation = relation.name, "Relation has no in-memory index");
                Vec::new()
            }
        }
    }
}

/// In-memory implementation of every store repository
///
/// Enforces the same rules as the PostgreSQL schema: unique customer
/// email, existing parents on every write, and the delete rules of the
/// relation catalog. Each operation runs under a single write lock, so a
/// refused delete never leaves partial changes behind.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogRepository for InMemoryStore {
    async fn save_promotion(&self, promotion: &Promotion) -> StoreResult<()> {
        self.tables
            .write()
            .promotions
            .insert(promotion.id(), promotion.clone());
        Ok(())
    }

    async fn find_promotion(&self, id: PromotionId) -> StoreResult<Option<Promotion>> {
        Ok(self.tables.read().promotions.get(&id).cloned())
    }

    async fn delete_promotion(&self, id: PromotionId) -> StoreResult<()> {
        self.tables
            .write()
            .delete(EntityKind::Promotion, id.as_uuid())
            .map(|_| ())
    }

    async fn save_collection(&self, collection: &Collection) -> StoreResult<()> {
        let mut tables = self.tables.write();
        tables.check_references(
            EntityKind::Collection,
            &[(
                "featured_product_id",
                collection.featured_product_id().map(|p| p.as_uuid()),
            )],
        )?;
        tables.collections.insert(collection.id(), collection.clone());
        Ok(())
    }

    async fn find_collection(&self, id: CollectionId) -> StoreResult<Option<Collection>> {
        Ok(self.tables.read().collections.get(&id).cloned())
    }

    async fn list_collections(&self) -> StoreResult<Vec<Collection>> {
        let mut collections: Vec<_> = self.tables.read().collections.values().cloned().collect();
        collections.sort_by(|a, b| a.title().cmp(b.title()).then(a.id().cmp(&b.id())));
        Ok(collections)
    }

    async fn set_featured_product(
        &self,
        collection_id: CollectionId,
        product_id: Option<ProductId>,
    ) -> StoreResult<()> {
        let mut tables = self.tables.write();
        if !tables.collections.contains_key(&collection_id) {
            return Err(StoreError::not_found("Collection", collection_id));
        }
        tables.check_references(
            EntityKind::Collection,
            &[("featured_product_id", product_id.map(|p| p.as_uuid()))],
        )?;
        if let Some(collection) = tables.collections.get_mut(&collection_id) {
            collection.set_featured_product(product_id);
        }
        Ok(())
    }

    async fn delete_collection(&self, id: CollectionId) -> StoreResult<()> {
        self.tables
            .write()
            .delete(EntityKind::Collection, id.as_uuid())
            .map(|_| ())
    }

    async fn save_product(&self, product: &Product) -> StoreResult<DateTime<Utc>> {
        let mut tables = self.tables.write();
        tables.check_references(
            EntityKind::Product,
            &[("collection_id", Some(product.collection_id().as_uuid()))],
        )?;

        let saved_at = timestamp_now();
        let mut stored = product.clone();
        stored.touch(saved_at);
        tables.products.insert(stored.id(), stored);
        Ok(saved_at)
    }

    async fn find_product(&self, id: ProductId) -> StoreResult<Option<Product>> {
        Ok(self.tables.read().products.get(&id).cloned())
    }

    async fn find_products_by_collection(
        &self,
        collection_id: CollectionId,
    ) -> StoreResult<Vec<Product>> {
        let mut products: Vec<_> = self
            .tables
            .read()
            .products
            .values()
            .filter(|p| p.collection_id() == collection_id)
            .cloned()
            .collect();
        products.sort_by(|a, b| a.title().cmp(b.title()).then(a.id().cmp(&b.id())));
        Ok(products)
    }

    async fn delete_product(&self, id: ProductId) -> StoreResult<()> {
        self.tables
            .write()
            .delete(EntityKind::Product, id.as_uuid())
            .map(|_| ())
    }

    async fn add_promotion(
        &self,
        product_id: ProductId,
        promotion_id: PromotionId,
    ) -> StoreResult<()> {
        let mut tables = self.tables.write();
        tables.check_references(
            EntityKind::ProductPromotion,
            &[
                ("product_id", Some(product_id.as_uuid())),
                ("promotion_id", Some(promotion_id.as_uuid())),
            ],
        )?;

        let linked = tables
            .product_promotions
            .values()
            .any(|pair| *pair == (product_id, promotion_id));
        if !linked {
            tables
                .product_promotions
                .insert(Uuid::new_v4(), (product_id, promotion_id));
        }
        Ok(())
    }

    async fn remove_promotion(
        &self,
        product_id: ProductId,
        promotion_id: PromotionId,
    ) -> StoreResult<bool> {
        let mut tables = self.tables.write();
        let before = tables.product_promotions.len();
        tables
            .product_promotions
            .retain(|_, pair| *pair != (product_id, promotion_id));
        Ok(tables.product_promotions.len() < before)
    }

    async fn promotions_for_product(&self, product_id: ProductId) -> StoreResult<Vec<Promotion>> {
        let tables = self.tables.read();
        let mut promotions: Vec<_> = tables
            .product_promotions
            .values()
            .filter(|(product, _)| *product == product_id)
            .filter_map(|(_, promotion)| tables.promotions.get(promotion).cloned())
            .collect();
        promotions.sort_by(|a, b| {
            a.description()
                .cmp(b.description())
                .then(a.id().cmp(&b.id()))
        });
        Ok(promotions)
    }
}

#[async_trait]
impl CustomerRepository for InMemoryStore {
    async fn save_customer(&self, customer: &Customer) -> StoreResult<()> {
        let mut tables = self.tables.write();
        let taken = tables
            .customers
            .values()
            .any(|other| other.id() != customer.id() && other.email() == customer.email());
        if taken {
            return Err(StoreError::Duplicate {
                entity: "Customer",
                field: "email",
            });
        }
        tables.customers.insert(customer.id(), customer.clone());
        Ok(())
    }

    async fn find_customer(&self, id: CustomerId) -> StoreResult<Option<Customer>> {
        Ok(self.tables.read().customers.get(&id).cloned())
    }

    async fn find_customer_by_email(&self, email: &Email) -> StoreResult<Option<Customer>> {
        Ok(self
            .tables
            .read()
            .customers
            .values()
            .find(|c| c.email() == email)
            .cloned())
    }

    async fn delete_customer(&self, id: CustomerId) -> StoreResult<()> {
        self.tables
            .write()
            .delete(EntityKind::Customer, id.as_uuid())
            .map(|_| ())
    }

    async fn save_address(&self, address: &Address) -> StoreResult<()> {
        let mut tables = self.tables.write();
        tables.check_references(
            EntityKind::Address,
            &[("customer_id", Some(address.customer_id().as_uuid()))],
        )?;
        tables.addresses.insert(address.id(), address.clone());
        Ok(())
    }

    async fn find_addresses(&self, customer_id: CustomerId) -> StoreResult<Vec<Address>> {
        let mut addresses: Vec<_> = self
            .tables
            .read()
            .addresses
            .values()
            .filter(|a| a.customer_id() == customer_id)
            .cloned()
            .collect();
        addresses.sort_by(|a, b| {
            (a.city(), a.street(), a.id()).cmp(&(b.city(), b.street(), b.id()))
        });
        Ok(addresses)
    }

    async fn delete_address(&self, id: AddressId) -> StoreResult<()> {
        self.tables
            .write()
            .delete(EntityKind::Address, id.as_uuid())
            .map(|_| ())
    }
}

#[async_trait]
impl OrderRepository for InMemoryStore {
    async fn save_order(&self, order: &Order) -> StoreResult<()> {
        let mut tables = self.tables.write();
        tables.check_references(
            EntityKind::Order,
            &[("customer_id", Some(order.customer_id().as_uuid()))],
        )?;

        let placed_at = tables
            .orders
            .get(&order.id())
            .map_or(order.placed_at(), |existing| existing.placed_at());
        let stored = Order::from_persistence(
            order.id(),
            order.customer_id(),
            placed_at,
            order.payment_status(),
        );
        tables.orders.insert(stored.id(), stored);
        Ok(())
    }

    async fn find_order(&self, id: OrderId) -> StoreResult<Option<Order>> {
        Ok(self.tables.read().orders.get(&id).cloned())
    }

    async fn find_orders_by_customer(&self, customer_id: CustomerId) -> StoreResult<Vec<Order>> {
        let mut orders: Vec<_> = self
            .tables
            .read()
            .orders
            .values()
            .filter(|o| o.customer_id() == customer_id)
            .cloned()
            .collect();
        orders.sort_by(|a, b| {
            b.placed_at()
                .cmp(&a.placed_at())
                .then(a.id().cmp(&b.id()))
        });
        Ok(orders)
    }

    async fn update_payment_status(&self, id: OrderId, status: PaymentStatus) -> StoreResult<()> {
        let mut tables = self.tables.write();
        let order = tables
            .orders
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("Order", id))?;
        order.set_payment_status(status);
        tracing::debug!(order_id = %id, %status, "Payment status updated");
        Ok(())
    }

    async fn delete_order(&self, id: OrderId) -> StoreResult<()> {
        self.tables
            .write()
            .delete(EntityKind::Order, id.as_uuid())
            .map(|_| ())
    }

    async fn save_order_item(&self, item: &OrderItem) -> StoreResult<()> {
        let mut tables = self.tables.write();
        tables.check_references(
            EntityKind::OrderItem,
            &[
                ("order_id", Some(item.order_id().as_uuid())),
                ("product_id", Some(item.product_id().as_uuid())),
            ],
        )?;
        tables.order_items.insert(item.id(), item.clone());
        Ok(())
    }

    async fn items_for_order(&self, order_id: OrderId) -> StoreResult<Vec<OrderItem>> {
        let mut items: Vec<_> = self
            .tables
            .read()
            .order_items
            .values()
            .filter(|i| i.order_id() == order_id)
            .cloned()
            .collect();
        items.sort_by_key(|i| i.id());
        Ok(items)
    }

    async fn delete_order_item(&self, id: OrderItemId) -> StoreResult<()> {
        self.tables
            .write()
            .delete(EntityKind::OrderItem, id.as_uuid())
            .map(|_| ())
    }
}

#[async_trait]
impl CartRepository for InMemoryStore {
    async fn save_cart(&self, cart: &Cart) -> StoreResult<()> {
        self.tables
            .write()
            .carts
            .entry(cart.id())
            .or_insert_with(|| cart.clone());
        Ok(())
    }

    async fn find_cart(&self, id: CartId) -> StoreResult<Option<Cart>> {
        Ok(self.tables.read().carts.get(&id).cloned())
    }

    async fn delete_cart(&self, id: CartId) -> StoreResult<()> {
        self.tables
            .write()
            .delete(EntityKind::Cart, id.as_uuid())
            .map(|_| ())
    }

    async fn save_cart_item(&self, item: &CartItem) -> StoreResult<()> {
        let mut tables = self.tables.write();
        tables.check_references(
            EntityKind::CartItem,
            &[
                ("cart_id", Some(item.cart_id().as_uuid())),
                ("product_id", Some(item.product_id().as_uuid())),
            ],
        )?;
        tables.cart_items.insert(item.id(), item.clone());
        Ok(())
    }

    async fn items_for_cart(&self, cart_id: CartId) -> StoreResult<Vec<CartItem>> {
        let mut items: Vec<_> = self
            .tables
            .read()
            .cart_items
            .values()
            .filter(|i| i.cart_id() == cart_id)
            .cloned()
            .collect();
        items.sort_by_key(|i| i.id());
        Ok(items)
    }

    async fn delete_cart_item(&self, id: CartItemId) -> StoreResult<()> {
        self.tables
            .write()
            .delete(EntityKind::CartItem, id.as_uuid())
            .map(|_| ())
    }
}
