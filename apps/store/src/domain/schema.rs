//! Declarative relation catalog for the storefront schema.
//!
//! Each foreign key in `migrations/` has exactly one [`Relation`] entry here
//! carrying the same column, constraint name and delete rule. The in-memory
//! store walks this table to enforce deletes, and the PostgreSQL store uses
//! the constraint names to turn SQLSTATE errors into [`StoreError`]s.
//!
//! [`StoreError`]: crate::domain::errors::StoreError

use std::fmt;

/// Every record type with its own table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    Promotion,
    Collection,
    Product,
    /// Link row of the product/promotion many-to-many relation.
    ProductPromotion,
    Customer,
    Order,
    OrderItem,
    Address,
    Cart,
    CartItem,
}

impl EntityKind {
    pub const ALL: [EntityKind; 10] = [
        EntityKind::Promotion,
        EntityKind::Collection,
        EntityKind::Product,
        EntityKind::ProductPromotion,
        EntityKind::Customer,
        EntityKind::Order,
        EntityKind::OrderItem,
        EntityKind::Address,
        EntityKind::Cart,
        EntityKind::CartItem,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            EntityKind::Promotion => "Promotion",
            EntityKind::Collection => "Collection",
            EntityKind::Product => "Product",
            EntityKind::ProductPromotion => "ProductPromotion",
            EntityKind::Customer => "Customer",
            EntityKind::Order => "Order",
            EntityKind::OrderItem => "OrderItem",
            EntityKind::Address => "Address",
            EntityKind::Cart => "Cart",
            EntityKind::CartItem => "CartItem",
        }
    }

    pub const fn table(&self) -> &'static str {
        match self {
            EntityKind::Promotion => "store_promotion",
            EntityKind::Collection => "store_collection",
            EntityKind::Product => "store_product",
            EntityKind::ProductPromotion => "store_product_promotions",
            EntityKind::Customer => "store_customer",
            EntityKind::Order => "store_order",
            EntityKind::OrderItem => "store_orderitem",
            EntityKind::Address => "store_address",
            EntityKind::Cart => "store_cart",
            EntityKind::CartItem => "store_cartitem",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Shape of a relation as seen from the referencing side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// Foreign key column on the child row.
    ManyToOne,
    /// One side of a link table.
    ManyToMany,
}

/// What happens to referencing rows when the referenced row is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnDelete {
    /// Delete the referencing rows as well.
    Cascade,
    /// Refuse the delete while referencing rows exist.
    Protect,
    /// Clear the nullable foreign key column.
    SetNull,
}

impl OnDelete {
    /// `ON DELETE` clause used by the migration
    pub const fn sql(&self) -> &'static str {
        match self {
            OnDelete::Cascade => "CASCADE",
            OnDelete::Protect => "RESTRICT",
            OnDelete::SetNull => "SET NULL",
        }
    }
}

/// A foreign key from `child.column` to `parent.id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relation {
    pub name: &'static str,
    pub child: EntityKind,
    pub column: &'static str,
    pub parent: EntityKind,
    pub cardinality: Cardinality,
    pub on_delete: OnDelete,
    pub nullable: bool,
    /// Constraint name in the SQL schema.
    pub constraint: &'static str,
}

const fn fk(
    name: &'static str,
    child: EntityKind,
    column: &'static str,
    parent: EntityKind,
    on_delete: OnDelete,
    constraint: &'static str,
) -> Relation {
    Relation {
        name,
        child,
        column,
        parent,
        cardinality: Cardinality::ManyToOne,
        on_delete,
        nullable: matches!(on_delete, OnDelete::SetNull),
        constraint,
    }
}

const fn link(
    name: &'static str,
    column: &'static str,
    parent: EntityKind,
    constraint: &'static str,
) -> Relation {
    Relation {
        name,
        child: EntityKind::ProductPromotion,
        column,
        parent,
        cardinality: Cardinality::ManyToMany,
        on_delete: OnDelete::Cascade,
        nullable: false,
        constraint,
    }
}

/// Every foreign key in the schema.
pub static RELATIONS: [Relation; 10] = [
    fk(
        "collection_featured_product",
        EntityKind::Collection,
        "featured_product_id",
        EntityKind::Product,
        OnDelete::SetNull,
        "store_collection_featured_product_fk",
    ),
    fk(
        "product_collection",
        EntityKind::Product,
        "collection_id",
        EntityKind::Collection,
        OnDelete::Protect,
        "store_product_collection_fk",
    ),
    link(
        "product_promotions_product",
        "product_id",
        EntityKind::Product,
        "store_product_promotions_product_fk",
    ),
    link(
        "product_promotions_promotion",
        "promotion_id",
        EntityKind::Promotion,
        "store_product_promotions_promotion_fk",
    ),
    fk(
        "order_customer",
        EntityKind::Order,
        "customer_id",
        EntityKind::Customer,
        OnDelete::Protect,
        "store_order_customer_fk",
    ),
    fk(
        "orderitem_order",
        EntityKind::OrderItem,
        "order_id",
        EntityKind::Order,
        OnDelete::Protect,
        "store_orderitem_order_fk",
    ),
    fk(
        "orderitem_product",
        EntityKind::OrderItem,
        "product_id",
        EntityKind::Product,
        OnDelete::Protect,
        "store_orderitem_product_fk",
    ),
    fk(
        "address_customer",
        EntityKind::Address,
        "customer_id",
        EntityKind::Customer,
        OnDelete::Cascade,
        "store_address_customer_fk",
    ),
    fk(
        "cartitem_cart",
        EntityKind::CartItem,
        "cart_id",
        EntityKind::Cart,
        OnDelete::Cascade,
        "store_cartitem_cart_fk",
    ),
    fk(
        "cartitem_product",
        EntityKind::CartItem,
        "product_id",
        EntityKind::Product,
        OnDelete::Cascade,
        "store_cartitem_product_fk",
    ),
];

/// A uniqueness rule over one or more columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniqueConstraint {
    pub entity: EntityKind,
    pub column: &'static str,
    pub constraint: &'static str,
}

pub static UNIQUE_CONSTRAINTS: [UniqueConstraint; 2] = [
    UniqueConstraint {
        entity: EntityKind::Customer,
        column: "email",
        constraint: "store_customer_email_key",
    },
    UniqueConstraint {
        entity: EntityKind::ProductPromotion,
        column: "product_id, promotion_id",
        constraint: "store_product_promotions_pair_key",
    },
];

/// Relations whose parent is `entity`, i.e. the rules consulted when a
/// row of `entity` is deleted.
pub fn relations_referencing(entity: EntityKind) -> impl Iterator<Item = &'static Relation> {
    RELATIONS.iter().filter(move |r| r.parent == entity)
}

/// Relations declared on `entity`'s own columns.
pub fn relations_from(entity: EntityKind) -> impl Iterator<Item = &'static Relation> {
    RELATIONS.iter().filter(move |r| r.child == entity)
}

pub fn relation_by_constraint(constraint: &str) -> Option<&'static Relation> {
    RELATIONS.iter().find(|r| r.constraint == constraint)
}

pub fn unique_by_constraint(constraint: &str) -> Option<&'static UniqueConstraint> {
    UNIQUE_CONSTRAINTS.iter().find(|u| u.constraint == constraint)
}
