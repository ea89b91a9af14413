//! Fixtures and store-agnostic scenarios
//!
//! Every scenario runs against any type implementing the four repository
//! traits, so the in-memory and PostgreSQL suites assert the same rules.
//! Fixture emails carry a random suffix so scenarios can share a database.

#![allow(dead_code)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use retrogo_store::domain::cart::{Cart, CartItem};
use retrogo_store::domain::catalog::{Collection, Product, Promotion};
use retrogo_store::domain::customer::{Address, Customer, Email, Membership};
use retrogo_store::domain::errors::StoreError;
use retrogo_store::domain::ids::{CartItemId, CustomerId, ProductId};
use retrogo_store::domain::order::{Order, OrderItem, PaymentStatus};
use retrogo_store::domain::repositories::{
    CartRepository, CatalogRepository, CustomerRepository, OrderRepository,
};

pub trait Store: CatalogRepository + CustomerRepository + OrderRepository + CartRepository {}

impl<S> Store for S where S: CatalogRepository + CustomerRepository + OrderRepository + CartRepository
{}

pub fn unique_email(prefix: &str) -> Email {
    Email::new(format!("{prefix}+{}@retrogo.test", Uuid::new_v4().simple())).unwrap()
}

pub async fn create_collection<S: Store>(store: &S, title: &str) -> Collection {
    let collection = Collection::new(title).unwrap();
    store.save_collection(&collection).await.unwrap();
    collection
}

pub async fn create_product<S: Store>(store: &S, collection: &Collection, title: &str) -> Product {
    let product = Product::new(collection.id(), title, "Boxed, tested", Decimal::new(4999, 2))
        .unwrap()
        .with_inventory(3);
    store.save_product(&product).await.unwrap();
    product
}

pub async fn create_customer<S: Store>(store: &S, first_name: &str) -> Customer {
    let customer = Customer::new(
        first_name,
        "Okafor",
        unique_email(&first_name.to_lowercase()),
        "555-0100",
        NaiveDate::from_ymd_opt(1990, 4, 12),
    )
    .unwrap();
    store.save_customer(&customer).await.unwrap();
    customer
}

pub async fn create_order<S: Store>(store: &S, customer: &Customer, product: &Product) -> Order {
    let order = Order::new(customer.id());
    store.save_order(&order).await.unwrap();
    let item = OrderItem::new(order.id(), product.id(), 2, product.price().amount()).unwrap();
    store.save_order_item(&item).await.unwrap();
    order
}

pub async fn create_cart<S: Store>(store: &S, products: &[&Product]) -> (Cart, Vec<CartItemId>) {
    let cart = Cart::new();
    store.save_cart(&cart).await.unwrap();

    let mut items = Vec::new();
    for product in products {
        let item = CartItem::new(cart.id(), product.id(), 1).unwrap();
        store.save_cart_item(&item).await.unwrap();
        items.push(item.id());
    }
    (cart, items)
}

pub async fn customer_round_trip<S: Store>(store: &S) {
    let customer = create_customer(store, "Ada")
        .await
        .with_membership(Membership::Gold);
    store.save_customer(&customer).await.unwrap();

    let found = store.find_customer(customer.id()).await.unwrap().unwrap();
    assert_eq!(found, customer);
    assert_eq!(found.membership(), Membership::Gold);

    let by_email = store
        .find_customer_by_email(customer.email())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_email.id(), customer.id());

    assert!(store.find_customer(CustomerId::new()).await.unwrap().is_none());
}

pub async fn duplicate_email_is_rejected<S: Store>(store: &S) {
    let first = create_customer(store, "Grace").await;
    let second = Customer::new("Grace", "Hopper", first.email().clone(), "555-0101", None).unwrap();

    let err = store.save_customer(&second).await.unwrap_err();
    assert!(
        matches!(err, StoreError::Duplicate { entity: "Customer", field: "email" }),
        "unexpected error: {err:?}"
    );
    assert!(store.find_customer(second.id()).await.unwrap().is_none());

    // Re-saving the owner of the email is an update, not a duplicate
    store.save_customer(&first).await.unwrap();
}

pub async fn changing_email_to_a_taken_one_is_rejected<S: Store>(store: &S) {
    let first = create_customer(store, "Maya").await;
    let second = create_customer(store, "Ravi").await;
    let original_email = second.email().clone();

    let mut changed = second.clone();
    changed.set_email(first.email().clone());

    let err = store.save_customer(&changed).await.unwrap_err();
    assert!(
        matches!(err, StoreError::Duplicate { entity: "Customer", field: "email" }),
        "unexpected error: {err:?}"
    );

    let stored = store.find_customer(second.id()).await.unwrap().unwrap();
    assert_eq!(stored.email(), &original_email);
    assert_eq!(stored, second);
}

pub async fn collection_with_products_is_protected<S: Store>(store: &S) {
    let collection = create_collection(store, "Consoles").await;
    let product = create_product(store, &collection, "Super Famicom").await;

    let err = store.delete_collection(collection.id()).await.unwrap_err();
    assert!(
        matches!(err, StoreError::Protected { entity: "Collection", referenced_by: "Product" }),
        "unexpected error: {err:?}"
    );
    assert!(store.find_collection(collection.id()).await.unwrap().is_some());

    store.delete_product(product.id()).await.unwrap();
    store.delete_collection(collection.id()).await.unwrap();
    assert!(store.find_collection(collection.id()).await.unwrap().is_none());
}

pub async fn customer_delete_cascades_addresses<S: Store>(store: &S) {
    let customer = create_customer(store, "Lin").await;
    let home = Address::new(customer.id(), "12 Arcade Row", "Osaka").unwrap();
    let work = Address::new(customer.id(), "1 Cartridge Way", "Kyoto").unwrap();
    store.save_address(&home).await.unwrap();
    store.save_address(&work).await.unwrap();

    let addresses = store.find_addresses(customer.id()).await.unwrap();
    assert_eq!(addresses.len(), 2);
    assert_eq!(addresses[0].city(), "Kyoto");

    store.delete_customer(customer.id()).await.unwrap();
    assert!(store.find_customer(customer.id()).await.unwrap().is_none());
    assert!(store.find_addresses(customer.id()).await.unwrap().is_empty());
}

pub async fn customer_with_orders_is_protected<S: Store>(store: &S) {
    let collection = create_collection(store, "Handhelds").await;
    let product = create_product(store, &collection, "Game Boy Pocket").await;
    let customer = create_customer(store, "Noor").await;
    let address = Address::new(customer.id(), "7 Pixel Lane", "Lagos").unwrap();
    store.save_address(&address).await.unwrap();
    let order = create_order(store, &customer, &product).await;

    let err = store.delete_customer(customer.id()).await.unwrap_err();
    assert!(
        matches!(err, StoreError::Protected { entity: "Customer", referenced_by: "Order" }),
        "unexpected error: {err:?}"
    );
    // A refused delete removes nothing, not even cascading rows
    assert_eq!(store.find_addresses(customer.id()).await.unwrap().len(), 1);

    let err = store.delete_order(order.id()).await.unwrap_err();
    assert!(matches!(err, StoreError::Protected { entity: "Order", referenced_by: "OrderItem" }));

    for item in store.items_for_order(order.id()).await.unwrap() {
        store.delete_order_item(item.id()).await.unwrap();
    }
    store.delete_order(order.id()).await.unwrap();
    store.delete_customer(customer.id()).await.unwrap();
}

pub async fn cart_delete_cascades_items<S: Store>(store: &S) {
    let collection = create_collection(store, "Accessories").await;
    let pad = create_product(store, &collection, "Six-button pad").await;
    let cable = create_product(store, &collection, "Link cable").await;
    let (cart, items) = create_cart(store, &[&pad, &cable]).await;

    let stored = store.items_for_cart(cart.id()).await.unwrap();
    assert_eq!(stored.len(), 2);
    assert!(stored.iter().all(|item| items.contains(&item.id())));

    store.delete_cart(cart.id()).await.unwrap();
    assert!(store.find_cart(cart.id()).await.unwrap().is_none());
    assert!(store.items_for_cart(cart.id()).await.unwrap().is_empty());

    // Products outlive the carts they were in
    assert!(store.find_product(pad.id()).await.unwrap().is_some());
}

pub async fn product_delete_cascades_and_clears_feature<S: Store>(store: &S) {
    let collection = create_collection(store, "Arcade").await;
    let stick = create_product(store, &collection, "Arcade stick").await;
    let spare = create_product(store, &collection, "Spare buttons").await;
    store
        .set_featured_product(collection.id(), Some(stick.id()))
        .await
        .unwrap();

    let promotion = Promotion::new("Summer sale", 0.15).unwrap();
    store.save_promotion(&promotion).await.unwrap();
    store.add_promotion(stick.id(), promotion.id()).await.unwrap();
    store.add_promotion(stick.id(), promotion.id()).await.unwrap();
    store.add_promotion(spare.id(), promotion.id()).await.unwrap();
    assert_eq!(store.promotions_for_product(stick.id()).await.unwrap().len(), 1);

    let (cart, _) = create_cart(store, &[&stick, &spare]).await;

    store.delete_product(stick.id()).await.unwrap();

    assert!(store.find_product(stick.id()).await.unwrap().is_none());
    let collection = store.find_collection(collection.id()).await.unwrap().unwrap();
    assert_eq!(collection.featured_product_id(), None);

    let remaining = store.items_for_cart(cart.id()).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].product_id(), spare.id());

    // The promotion itself and its other links survive
    assert!(store.find_promotion(promotion.id()).await.unwrap().is_some());
    assert_eq!(store.promotions_for_product(spare.id()).await.unwrap().len(), 1);
    assert!(store.promotions_for_product(stick.id()).await.unwrap().is_empty());
}

pub async fn ordered_product_is_protected<S: Store>(store: &S) {
    let collection = create_collection(store, "Portables").await;
    let product = create_product(store, &collection, "Lynx").await;
    let customer = create_customer(store, "Mara").await;
    let order = create_order(store, &customer, &product).await;
    let (cart, _) = create_cart(store, &[&product]).await;

    let err = store.delete_product(product.id()).await.unwrap_err();
    assert!(
        matches!(err, StoreError::Protected { entity: "Product", referenced_by: "OrderItem" }),
        "unexpected error: {err:?}"
    );
    assert!(store.find_product(product.id()).await.unwrap().is_some());
    assert_eq!(store.items_for_cart(cart.id()).await.unwrap().len(), 1);

    let items = store.items_for_order(order.id()).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].unit_price(), product.price());
    assert_eq!(items[0].line_total(), Decimal::new(9998, 2));
}

pub async fn promotion_delete_removes_links<S: Store>(store: &S) {
    let collection = create_collection(store, "Imports").await;
    let product = create_product(store, &collection, "PC Engine").await;
    let promotion = Promotion::new("Clearance", 0.4).unwrap();
    store.save_promotion(&promotion).await.unwrap();
    store.add_promotion(product.id(), promotion.id()).await.unwrap();

    store.delete_promotion(promotion.id()).await.unwrap();

    assert!(store.promotions_for_product(product.id()).await.unwrap().is_empty());
    assert!(store.find_product(product.id()).await.unwrap().is_some());
    assert!(!store.remove_promotion(product.id(), promotion.id()).await.unwrap());
}

pub async fn saving_product_refreshes_last_update<S: Store>(store: &S) {
    let collection = create_collection(store, "Refurbished").await;
    let mut product = create_product(store, &collection, "Mega Drive").await;
    let first = store.find_product(product.id()).await.unwrap().unwrap().last_update();

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    product.set_price(Decimal::new(7900, 2)).unwrap();
    let saved_at = store.save_product(&product).await.unwrap();

    let found = store.find_product(product.id()).await.unwrap().unwrap();
    assert_eq!(found.last_update(), saved_at);
    assert!(saved_at > first);
    assert_eq!(found.price().amount(), Decimal::new(7900, 2));
    assert_eq!(found.inventory(), 3);
}

pub async fn missing_references_are_rejected<S: Store>(store: &S) {
    let orphan_collection = Collection::new("Ghost").unwrap();
    let product =
        Product::new(orphan_collection.id(), "Phantom", "", Decimal::new(100, 2)).unwrap();
    let err = store.save_product(&product).await.unwrap_err();
    assert!(
        matches!(err, StoreError::MissingReference { entity: "Product", referenced: "Collection" }),
        "unexpected error: {err:?}"
    );

    let err = store.save_order(&Order::new(CustomerId::new())).await.unwrap_err();
    assert!(matches!(err, StoreError::MissingReference { referenced: "Customer", .. }));

    let collection = create_collection(store, "Real").await;
    let err = store
        .set_featured_product(collection.id(), Some(ProductId::new()))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::MissingReference { referenced: "Product", .. }));

    let cart = Cart::new();
    store.save_cart(&cart).await.unwrap();
    let item = CartItem::new(cart.id(), ProductId::new(), 1).unwrap();
    let err = store.save_cart_item(&item).await.unwrap_err();
    assert!(matches!(err, StoreError::MissingReference { entity: "CartItem", .. }));
}

pub async fn deleting_missing_rows_is_not_found<S: Store>(store: &S) {
    let err = store.delete_customer(CustomerId::new()).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound { entity: "Customer", .. }));

    let err = store.delete_product(ProductId::new()).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound { entity: "Product", .. }));

    let err = store.delete_cart_item(CartItemId::new()).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound { entity: "CartItem", .. }));
}

pub async fn payment_status_updates<S: Store>(store: &S) {
    let collection = create_collection(store, "Limited").await;
    let product = create_product(store, &collection, "Neo Geo AES").await;
    let customer = create_customer(store, "Theo").await;
    let order = create_order(store, &customer, &product).await;
    assert_eq!(order.payment_status(), PaymentStatus::Pending);

    store
        .update_payment_status(order.id(), PaymentStatus::Complete)
        .await
        .unwrap();

    let orders = store.find_orders_by_customer(customer.id()).await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].payment_status(), PaymentStatus::Complete);
    assert_eq!(orders[0].placed_at(), order.placed_at());
}
