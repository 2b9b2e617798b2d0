//! # Store Facade
//!
//! Typed collection accessors and compound operations over the kv layer.
//! This module is the system's `storage.js` counterpart: four collections,
//! an onboarding flag, and the handful of read-modify-write operations the
//! screens call.
//!
//! ## Mutation Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              Every mutation is a full-collection cycle                  │
//! │                                                                         │
//! │  add_product(new)                                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  read "products" blob ──► Vec<Product> ──► push ──► write blob back     │
//! │                                                                         │
//! │  add_sale(new)                                                          │
//! │       │                                                                 │
//! │       ├── read "sales", append, write back          (1 cycle)           │
//! │       └── per item: update_product(quantity)        (N more cycles)     │
//! │                                                                         │
//! │  No batching, no atomicity across the N+1 cycles. Two in-flight         │
//! │  mutations against the same collection would race (last write wins);    │
//! │  the single-user device serializes them in practice.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Error Boundary
//! The `try_*` internals propagate [`StoreError`] with `?`. The public API
//! catches at this boundary, logs, and returns safe defaults - callers
//! cannot distinguish "absent" from "read failed", by contract.

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{error, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::kv::{KvStore, StoreConfig};
use trackease_core::{
    BusinessInfo, NewProduct, NewSale, Product, ProductPatch, Sale, DEFAULT_CATEGORIES,
};

// =============================================================================
// Storage Keys
// =============================================================================

/// The persisted key layout, matching the on-device blob format.
pub mod keys {
    /// Merchant profile singleton.
    pub const BUSINESS_INFO: &str = "businessInfo";
    /// Array of products.
    pub const PRODUCTS: &str = "products";
    /// Array of sales.
    pub const SALES: &str = "sales";
    /// Flat array of category names.
    pub const CATEGORIES: &str = "categories";
    /// Onboarding-completed flag.
    pub const HAS_LAUNCHED: &str = "hasLaunched";
}

// =============================================================================
// Store
// =============================================================================

/// Typed access to the four collections plus the onboarding flag.
#[derive(Debug, Clone)]
pub struct Store {
    kv: KvStore,
}

impl Store {
    /// Opens the store (see [`KvStore::open`]).
    pub async fn open(config: StoreConfig) -> StoreResult<Self> {
        Ok(Store {
            kv: KvStore::open(config).await?,
        })
    }

    /// Raw kv access, for diagnostics.
    pub fn kv(&self) -> &KvStore {
        &self.kv
    }

    // =========================================================================
    // JSON helpers (fallible internals)
    // =========================================================================

    async fn read<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        match self.kv.get(key).await? {
            Some(raw) => {
                let value = serde_json::from_str(&raw).map_err(|e| StoreError::serde(key, e))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn write<T: Serialize>(&self, key: &str, value: &T) -> StoreResult<()> {
        let raw = serde_json::to_string(value).map_err(|e| StoreError::serde(key, e))?;
        self.kv.put(key, &raw).await
    }

    // =========================================================================
    // Business Info
    // =========================================================================

    /// Returns the merchant profile, or `None` if absent (or unreadable).
    pub async fn business_info(&self) -> Option<BusinessInfo> {
        match self.read(keys::BUSINESS_INFO).await {
            Ok(info) => info,
            Err(e) => {
                error!(error = %e, "Error getting business info");
                None
            }
        }
    }

    /// Overwrites the merchant profile.
    pub async fn save_business_info(&self, info: &BusinessInfo) {
        if let Err(e) = self.write(keys::BUSINESS_INFO, info).await {
            error!(error = %e, "Error saving business info");
        }
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Returns the full product collection; empty on miss or failure.
    pub async fn products(&self) -> Vec<Product> {
        match self.read(keys::PRODUCTS).await {
            Ok(products) => products.unwrap_or_default(),
            Err(e) => {
                error!(error = %e, "Error getting products");
                Vec::new()
            }
        }
    }

    /// Overwrites the full product collection.
    pub async fn save_products(&self, products: &[Product]) {
        if let Err(e) = self.write(keys::PRODUCTS, &products).await {
            error!(error = %e, "Error saving products");
        }
    }

    /// Adds a product: assigns id and creation time, appends, writes back.
    ///
    /// Always inserts a new record - a duplicate name never merges into an
    /// existing product.
    ///
    /// ## Returns
    /// The stored product, or `None` if the operation did not happen.
    pub async fn add_product(&self, new: NewProduct) -> Option<Product> {
        match self.try_add_product(new).await {
            Ok(product) => Some(product),
            Err(e) => {
                error!(error = %e, "Error adding product");
                None
            }
        }
    }

    async fn try_add_product(&self, new: NewProduct) -> StoreResult<Product> {
        let mut products: Vec<Product> =
            self.read(keys::PRODUCTS).await?.unwrap_or_default();

        let product = Product {
            id: timestamp_id(|candidate| products.iter().any(|p| p.id == candidate)),
            name: new.name,
            price_cents: new.price_cents,
            quantity: new.quantity,
            category: new.category,
            image: new.image,
            created_at: Utc::now(),
        };

        products.push(product.clone());
        self.write(keys::PRODUCTS, &products).await?;

        info!(id = %product.id, name = %product.name, "Product added");
        Ok(product)
    }

    /// Applies a field-wise patch to the product with the given id.
    ///
    /// ## Returns
    /// The updated product, or `None` if the id is absent or the operation
    /// did not happen.
    pub async fn update_product(&self, id: &str, patch: ProductPatch) -> Option<Product> {
        match self.try_update_product(id, patch).await {
            Ok(updated) => updated,
            Err(e) => {
                error!(error = %e, "Error updating product");
                None
            }
        }
    }

    async fn try_update_product(
        &self,
        id: &str,
        patch: ProductPatch,
    ) -> StoreResult<Option<Product>> {
        let mut products: Vec<Product> =
            self.read(keys::PRODUCTS).await?.unwrap_or_default();

        let Some(product) = products.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };

        patch.apply(product);
        let updated = product.clone();
        self.write(keys::PRODUCTS, &products).await?;
        Ok(Some(updated))
    }

    /// Deletes the product with the given id.
    /// Removes at most one entry; deleting an absent id is a no-op.
    pub async fn delete_product(&self, id: &str) {
        if let Err(e) = self.try_delete_product(id).await {
            error!(error = %e, "Error deleting product");
        }
    }

    async fn try_delete_product(&self, id: &str) -> StoreResult<()> {
        let mut products: Vec<Product> =
            self.read(keys::PRODUCTS).await?.unwrap_or_default();
        products.retain(|p| p.id != id);
        self.write(keys::PRODUCTS, &products).await
    }

    // =========================================================================
    // Sales
    // =========================================================================

    /// Returns the full sales collection; empty on miss or failure.
    pub async fn sales(&self) -> Vec<Sale> {
        match self.read(keys::SALES).await {
            Ok(sales) => sales.unwrap_or_default(),
            Err(e) => {
                error!(error = %e, "Error getting sales");
                Vec::new()
            }
        }
    }

    /// Overwrites the full sales collection.
    pub async fn save_sales(&self, sales: &[Sale]) {
        if let Err(e) = self.write(keys::SALES, &sales).await {
            error!(error = %e, "Error saving sales");
        }
    }

    /// Records a sale, then applies each item's stock decrement.
    ///
    /// This is one sales-collection cycle plus one product-collection
    /// cycle per item (no batching, no atomicity across items).
    ///
    /// ## Returns
    /// The stored sale, or `None` if recording the sale did not happen.
    /// A missing product during the decrement loop is logged and skipped;
    /// the sale itself is already recorded at that point.
    pub async fn add_sale(&self, new: NewSale) -> Option<Sale> {
        let sale = match self.try_add_sale(&new).await {
            Ok(sale) => sale,
            Err(e) => {
                error!(error = %e, "Error adding sale");
                return None;
            }
        };

        // Update inventory, one read-modify-write cycle per item.
        for item in &sale.items {
            let updated = self
                .update_product(&item.id, ProductPatch::quantity(item.new_quantity))
                .await;
            if updated.is_none() {
                warn!(product_id = %item.id, "Sold product missing during stock update");
            }
        }

        Some(sale)
    }

    async fn try_add_sale(&self, new: &NewSale) -> StoreResult<Sale> {
        let mut sales: Vec<Sale> = self.read(keys::SALES).await?.unwrap_or_default();

        let sale = Sale {
            id: timestamp_id(|candidate| sales.iter().any(|s| s.id == candidate)),
            items: new.items.clone(),
            total_cents: new.total_cents,
            payment_method: new.payment_method,
            is_paid: new.is_paid,
            paid_at: None,
            date: new.date,
            created_at: Utc::now(),
        };

        sales.push(sale.clone());
        self.write(keys::SALES, &sales).await?;

        info!(id = %sale.id, total = %sale.total(), "Sale recorded");
        Ok(sale)
    }

    /// Sets a sale's payment status.
    ///
    /// Marking paid stamps `paid_at` with the current time; marking unpaid
    /// clears it.
    ///
    /// ## Returns
    /// The updated sale, or `None` if the id is absent or the operation
    /// did not happen.
    pub async fn update_sale_payment_status(&self, id: &str, is_paid: bool) -> Option<Sale> {
        match self.try_update_sale_payment_status(id, is_paid).await {
            Ok(updated) => updated,
            Err(e) => {
                error!(error = %e, "Error updating sale payment status");
                None
            }
        }
    }

    async fn try_update_sale_payment_status(
        &self,
        id: &str,
        is_paid: bool,
    ) -> StoreResult<Option<Sale>> {
        let mut sales: Vec<Sale> = self.read(keys::SALES).await?.unwrap_or_default();

        let Some(sale) = sales.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };

        sale.is_paid = is_paid;
        sale.paid_at = if is_paid { Some(Utc::now()) } else { None };
        let updated = sale.clone();
        self.write(keys::SALES, &sales).await?;
        Ok(Some(updated))
    }

    // =========================================================================
    // Categories
    // =========================================================================

    /// Returns the category list, falling back to the default set when the
    /// key is absent (or unreadable) - a fresh install has categories.
    pub async fn categories(&self) -> Vec<String> {
        let default = || DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect();
        match self.read(keys::CATEGORIES).await {
            Ok(categories) => categories.unwrap_or_else(default),
            Err(e) => {
                error!(error = %e, "Error getting categories");
                default()
            }
        }
    }

    /// Overwrites the category list.
    pub async fn save_categories(&self, categories: &[String]) {
        if let Err(e) = self.write(keys::CATEGORIES, &categories).await {
            error!(error = %e, "Error saving categories");
        }
    }

    // =========================================================================
    // Onboarding Flag & Reset
    // =========================================================================

    /// Whether onboarding has completed on this device.
    pub async fn has_launched(&self) -> bool {
        match self.read::<String>(keys::HAS_LAUNCHED).await {
            Ok(flag) => flag.as_deref() == Some("true"),
            Err(e) => {
                error!(error = %e, "Error reading launch flag");
                false
            }
        }
    }

    /// Marks onboarding as completed.
    pub async fn mark_launched(&self) {
        if let Err(e) = self.write(keys::HAS_LAUNCHED, &"true").await {
            error!(error = %e, "Error writing launch flag");
        }
    }

    /// Full reset: clears every key, including the launch flag.
    /// The next start lands on onboarding again.
    pub async fn reset(&self) {
        if let Err(e) = self.kv.clear().await {
            error!(error = %e, "Error resetting store");
        }
    }
}

// =============================================================================
// Id Generation
// =============================================================================

/// Millisecond-timestamp id, the scheme existing on-device records use.
///
/// Two creations inside the same millisecond would collide, so the
/// candidate is bumped until it is unique within its collection.
fn timestamp_id(taken: impl Fn(&str) -> bool) -> String {
    let mut millis = Utc::now().timestamp_millis();
    let mut id = millis.to_string();
    while taken(&id) {
        millis += 1;
        id = millis.to_string();
    }
    id
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use trackease_core::{Cart, PaymentMethod};

    async fn test_store() -> Store {
        Store::open(StoreConfig::in_memory()).await.unwrap()
    }

    fn new_product(name: &str, price_cents: i64, quantity: i64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            price_cents,
            quantity,
            category: "Food".to_string(),
            image: None,
        }
    }

    #[tokio::test]
    async fn test_defaults_on_fresh_store() {
        let store = test_store().await;

        assert!(store.business_info().await.is_none());
        assert!(store.products().await.is_empty());
        assert!(store.sales().await.is_empty());
        assert!(!store.has_launched().await);
        assert_eq!(
            store.categories().await,
            vec!["Food", "Drinks", "Apparel", "Other"]
        );
    }

    #[tokio::test]
    async fn test_business_info_round_trip() {
        let store = test_store().await;

        let info = BusinessInfo {
            mobile_number: "+60123456789".to_string(),
            business_name: "Kedai Siti".to_string(),
            business_type: "Warung".to_string(),
            receipt_message: "Terima kasih!".to_string(),
            low_stock_threshold: 10,
            created_at: Utc::now(),
        };
        store.save_business_info(&info).await;

        let loaded = store.business_info().await.unwrap();
        assert_eq!(loaded, info);
    }

    #[tokio::test]
    async fn test_duplicate_names_do_not_merge() {
        let store = test_store().await;

        let first = store.add_product(new_product("Kuih", 100, 5)).await.unwrap();
        let second = store.add_product(new_product("Kuih", 100, 5)).await.unwrap();

        assert_ne!(first.id, second.id);

        let products = store.products().await;
        assert_eq!(products.len(), 2);
        assert!(products.iter().all(|p| p.name == "Kuih"));
    }

    #[tokio::test]
    async fn test_update_product_patches_fields() {
        let store = test_store().await;
        let product = store.add_product(new_product("Kuih", 100, 5)).await.unwrap();

        let updated = store
            .update_product(
                &product.id,
                ProductPatch {
                    price_cents: Some(120),
                    ..ProductPatch::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.price_cents, 120);
        assert_eq!(updated.quantity, 5);
        assert_eq!(updated.name, "Kuih");

        // Missing id updates nothing.
        assert!(store
            .update_product("no-such-id", ProductPatch::quantity(1))
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_delete_product_removes_exactly_one() {
        let store = test_store().await;
        let a = store.add_product(new_product("A", 100, 1)).await.unwrap();
        let _b = store.add_product(new_product("B", 100, 1)).await.unwrap();

        store.delete_product(&a.id).await;
        assert_eq!(store.products().await.len(), 1);

        // Repeated delete of the same id is a no-op.
        store.delete_product(&a.id).await;
        assert_eq!(store.products().await.len(), 1);
    }

    #[tokio::test]
    async fn test_add_sale_decrements_stock() {
        let store = test_store().await;

        // RM 4.00, stock 30, sell 3.
        let product = store
            .add_product(new_product("Nasi Lemak", 400, 30))
            .await
            .unwrap();

        let mut cart = Cart::new();
        cart.add_units(&product, 3).unwrap();
        let sale = store
            .add_sale(cart.checkout(PaymentMethod::Cash).unwrap())
            .await
            .unwrap();

        assert_eq!(sale.total_cents, 1200);
        assert_eq!(sale.total(), sale.computed_total());
        assert!(sale.is_paid);
        assert!(sale.paid_at.is_none());

        let restocked = store.products().await;
        assert_eq!(restocked[0].quantity, 27);

        let sales = store.sales().await;
        assert_eq!(sales.len(), 1);
        assert_eq!(sales[0].id, sale.id);
    }

    #[tokio::test]
    async fn test_add_sale_decrements_every_item() {
        let store = test_store().await;
        let a = store.add_product(new_product("A", 100, 10)).await.unwrap();
        let b = store.add_product(new_product("B", 250, 4)).await.unwrap();

        let mut cart = Cart::new();
        cart.add_units(&a, 2).unwrap();
        cart.add_units(&b, 4).unwrap();
        store
            .add_sale(cart.checkout(PaymentMethod::DuitNow).unwrap())
            .await
            .unwrap();

        let products = store.products().await;
        let qty = |id: &str| products.iter().find(|p| p.id == id).unwrap().quantity;
        assert_eq!(qty(&a.id), 8);
        assert_eq!(qty(&b.id), 0);
    }

    #[tokio::test]
    async fn test_add_sale_skips_product_deleted_after_checkout() {
        let store = test_store().await;
        let kept = store.add_product(new_product("A", 100, 10)).await.unwrap();
        let doomed = store.add_product(new_product("B", 250, 4)).await.unwrap();

        let mut cart = Cart::new();
        cart.add_units(&kept, 2).unwrap();
        cart.add_units(&doomed, 1).unwrap();
        let new_sale = cart.checkout(PaymentMethod::Cash).unwrap();

        // Product disappears between checkout and the stock write-back.
        store.delete_product(&doomed.id).await;

        let sale = store.add_sale(new_sale).await.unwrap();
        assert_eq!(sale.items.len(), 2);
        assert_eq!(store.sales().await.len(), 1);

        // The surviving item is still decremented; the missing one is skipped.
        let products = store.products().await;
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, kept.id);
        assert_eq!(products[0].quantity, 8);
    }

    #[tokio::test]
    async fn test_payment_status_stamps_and_clears_paid_at() {
        let store = test_store().await;
        let product = store.add_product(new_product("A", 500, 5)).await.unwrap();

        let mut cart = Cart::new();
        cart.add(&product).unwrap();
        let sale = store
            .add_sale(cart.checkout(PaymentMethod::PayLater).unwrap())
            .await
            .unwrap();
        assert!(!sale.is_paid);

        let paid = store
            .update_sale_payment_status(&sale.id, true)
            .await
            .unwrap();
        assert!(paid.is_paid);
        assert!(paid.paid_at.is_some());

        let unpaid = store
            .update_sale_payment_status(&sale.id, false)
            .await
            .unwrap();
        assert!(!unpaid.is_paid);
        assert!(unpaid.paid_at.is_none());

        // Unknown sale id.
        assert!(store
            .update_sale_payment_status("no-such-id", true)
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_reset_clears_everything() {
        let store = test_store().await;
        store.add_product(new_product("A", 100, 1)).await.unwrap();
        store.mark_launched().await;
        assert!(store.has_launched().await);

        store.reset().await;

        assert!(store.products().await.is_empty());
        assert!(!store.has_launched().await);
        assert!(store.business_info().await.is_none());
    }

    #[tokio::test]
    async fn test_categories_round_trip() {
        let store = test_store().await;
        let custom = vec!["Food".to_string(), "Petrol".to_string()];
        store.save_categories(&custom).await;
        assert_eq!(store.categories().await, custom);
    }
}
