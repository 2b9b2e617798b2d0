//! On-disk persistence tests: data written by one store handle must be
//! visible to a fresh handle opened on the same file.

use tempfile::TempDir;
use trackease_core::{Cart, NewProduct, PaymentMethod};
use trackease_store::{Store, StoreConfig};

async fn open_at(dir: &TempDir) -> Store {
    let path = dir.path().join("trackease.db");
    Store::open(StoreConfig::new(path)).await.unwrap()
}

#[tokio::test]
async fn products_survive_reopen() {
    let dir = TempDir::new().unwrap();

    let store = open_at(&dir).await;
    let product = store
        .add_product(NewProduct {
            name: "Teh Tarik".to_string(),
            price_cents: 250,
            quantity: 12,
            category: "Drinks".to_string(),
            image: None,
        })
        .await
        .unwrap();
    store.kv().close().await;

    let reopened = open_at(&dir).await;
    let products = reopened.products().await;
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].id, product.id);
    assert_eq!(products[0].price_cents, 250);
}

#[tokio::test]
async fn sales_and_stock_survive_reopen() {
    let dir = TempDir::new().unwrap();

    let store = open_at(&dir).await;
    let product = store
        .add_product(NewProduct {
            name: "Nasi Lemak".to_string(),
            price_cents: 400,
            quantity: 30,
            category: "Food".to_string(),
            image: None,
        })
        .await
        .unwrap();

    let mut cart = Cart::new();
    cart.add_units(&product, 3).unwrap();
    let sale = store
        .add_sale(cart.checkout(PaymentMethod::PayLater).unwrap())
        .await
        .unwrap();
    store.kv().close().await;

    let reopened = open_at(&dir).await;
    assert_eq!(reopened.products().await[0].quantity, 27);

    let sales = reopened.sales().await;
    assert_eq!(sales.len(), 1);
    assert_eq!(sales[0].id, sale.id);
    assert_eq!(sales[0].total_cents, 1200);
    assert!(!sales[0].is_paid);
}
