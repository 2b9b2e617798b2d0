//! # Domain Types
//!
//! Core domain types used throughout TrackEase. These are the exact shapes
//! persisted as JSON blob values in the key-value store, so field naming is
//! camelCase to match the on-device format.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  BusinessInfo   │   │    Product      │   │      Sale       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  singleton      │   │  id (timestamp) │   │  id (timestamp) │       │
//! │  │  name, type     │   │  name           │   │  items[]        │       │
//! │  │  receipt msg    │   │  price_cents    │   │  total_cents    │       │
//! │  │  low-stock thr. │   │  quantity       │   │  payment_method │       │
//! │  └─────────────────┘   └─────────────────┘   │  is_paid/paid_at│       │
//! │                                              └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │    SaleItem     │   │  PaymentMethod  │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  snapshot of    │   │  Cash           │                             │
//! │  │  name + price   │   │  DuitNow        │                             │
//! │  │  at sale time   │   │  BankTransfer   │                             │
//! │  │  new_quantity   │   │  PayLater       │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A `SaleItem` freezes the product name and price at sale time. Later
//! product edits never rewrite recorded sales.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::money::Money;

// =============================================================================
// Business Info
// =============================================================================

/// The merchant profile/settings singleton.
///
/// Created at onboarding, mutated via settings, never deleted
/// (a full reset clears the whole store instead).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessInfo {
    /// Merchant contact number, captured during onboarding.
    pub mobile_number: String,

    /// Display name shown on the dashboard and receipts.
    pub business_name: String,

    /// Free-form business type ("Warung", "Cafe", ...).
    pub business_type: String,

    /// Message printed at the bottom of every receipt.
    pub receipt_message: String,

    /// Low-stock warning threshold (products at or below this count
    /// are flagged, unless they are fully out of stock).
    pub low_stock_threshold: i64,

    /// When onboarding completed.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier, assigned at creation (millisecond timestamp string).
    pub id: String,

    /// Display name shown on the sell screen and on receipts.
    pub name: String,

    /// Price in cents (smallest currency unit).
    pub price_cents: i64,

    /// Current stock level.
    pub quantity: i64,

    /// Category this product is listed under.
    pub category: String,

    /// Optional image reference (device URI in the mobile app).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// When the product was created.
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// A product is out of stock at exactly zero quantity.
    #[inline]
    pub fn is_out_of_stock(&self) -> bool {
        self.quantity == 0
    }

    /// Low stock means some stock left but at or below the threshold.
    /// Out-of-stock products are reported separately, not as low stock.
    #[inline]
    pub fn is_low_stock(&self, threshold: i64) -> bool {
        self.quantity > 0 && self.quantity <= threshold
    }
}

/// Input for creating a product. The store assigns `id` and `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub price_cents: i64,
    pub quantity: i64,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Field-wise patch applied by `update_product`.
///
/// `None` fields are left untouched, mirroring the partial-update objects
/// the screens send (edit form, stock adjustment, checkout decrement).
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price_cents: Option<i64>,
    pub quantity: Option<i64>,
    pub category: Option<String>,
    pub image: Option<String>,
}

impl ProductPatch {
    /// Patch that only sets the stock level (used by `add_sale` and
    /// the stock-adjustment flow).
    pub fn quantity(quantity: i64) -> Self {
        ProductPatch {
            quantity: Some(quantity),
            ..ProductPatch::default()
        }
    }

    /// Applies the patch to a product in place.
    pub fn apply(&self, product: &mut Product) {
        if let Some(name) = &self.name {
            product.name = name.clone();
        }
        if let Some(price_cents) = self.price_cents {
            product.price_cents = price_cents;
        }
        if let Some(quantity) = self.quantity {
            product.quantity = quantity;
        }
        if let Some(category) = &self.category {
            product.category = category.clone();
        }
        if let Some(image) = &self.image {
            product.image = Some(image.clone());
        }
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How a sale was (or will be) paid.
///
/// `PayLater` creates an outstanding sale (`is_paid = false`) that shows up
/// on the outstanding-payments screen until marked paid.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum PaymentMethod {
    Cash,
    DuitNow,
    BankTransfer,
    PayLater,
}

impl PaymentMethod {
    /// All methods, in the order the checkout screen offers them.
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Cash,
        PaymentMethod::DuitNow,
        PaymentMethod::BankTransfer,
        PaymentMethod::PayLater,
    ];

    /// Human-readable label, as shown on checkout and reports.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::DuitNow => "DuitNow QR",
            PaymentMethod::BankTransfer => "Bank Transfer",
            PaymentMethod::PayLater => "Pay Later",
        }
    }

    /// Whether a fresh sale with this method starts out paid.
    #[inline]
    pub fn is_immediate(&self) -> bool {
        !matches!(self, PaymentMethod::PayLater)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "duitnow" => Ok(PaymentMethod::DuitNow),
            "banktransfer" => Ok(PaymentMethod::BankTransfer),
            "paylater" => Ok(PaymentMethod::PayLater),
            other => Err(format!(
                "unknown payment method '{other}' (expected cash, duitnow, bank-transfer or pay-later)"
            )),
        }
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A line item in a sale.
/// Uses the snapshot pattern to freeze product data at time of sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    /// The product id this line refers to.
    pub id: String,

    /// Product name at time of sale (frozen).
    pub name: String,

    /// Unit price in cents at time of sale (frozen).
    pub price_cents: i64,

    /// Quantity sold.
    pub quantity: i64,

    /// The product's stock level after this sale; `add_sale` writes this
    /// value back to the product, one item at a time.
    pub new_quantity: i64,
}

impl SaleItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }
}

/// A recorded sale.
///
/// Sales are created atomically with their cart contents at checkout and
/// never deleted or edited afterwards, except for the payment status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    /// Unique identifier, assigned at creation (millisecond timestamp string).
    pub id: String,

    /// Snapshotted line items.
    pub items: Vec<SaleItem>,

    /// Sale total in cents. Always equals the sum of line totals.
    pub total_cents: i64,

    /// How the customer paid (or promised to pay).
    pub payment_method: PaymentMethod,

    /// False for Pay Later sales until settled.
    pub is_paid: bool,

    /// When the sale was settled; cleared again if payment is undone.
    #[serde(default)]
    pub paid_at: Option<DateTime<Utc>>,

    /// When the sale happened (checkout time).
    pub date: DateTime<Utc>,

    /// When the record was written.
    pub created_at: DateTime<Utc>,
}

impl Sale {
    /// Returns the total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Recomputes the total from line items. Equals `total()` for any
    /// sale produced by checkout; used to assert that invariant in tests.
    pub fn computed_total(&self) -> Money {
        self.items.iter().map(|item| item.line_total()).sum()
    }

    /// An outstanding sale is one awaiting payment.
    #[inline]
    pub fn is_outstanding(&self) -> bool {
        !self.is_paid
    }
}

/// Input for recording a sale. The store assigns `id` and `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSale {
    pub items: Vec<SaleItem>,
    pub total_cents: i64,
    pub payment_method: PaymentMethod,
    pub is_paid: bool,
    pub date: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(quantity: i64) -> Product {
        Product {
            id: "1700000000000".to_string(),
            name: "Teh Tarik".to_string(),
            price_cents: 250,
            quantity,
            category: "Drinks".to_string(),
            image: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_stock_flags() {
        assert!(product(0).is_out_of_stock());
        assert!(!product(0).is_low_stock(10));
        assert!(product(5).is_low_stock(10));
        assert!(product(10).is_low_stock(10));
        assert!(!product(11).is_low_stock(10));
    }

    #[test]
    fn test_payment_method_parsing() {
        assert_eq!("cash".parse::<PaymentMethod>().unwrap(), PaymentMethod::Cash);
        assert_eq!(
            "bank-transfer".parse::<PaymentMethod>().unwrap(),
            PaymentMethod::BankTransfer
        );
        assert_eq!(
            "Pay Later".parse::<PaymentMethod>().unwrap(),
            PaymentMethod::PayLater
        );
        assert!("cheque".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_payment_method_immediacy() {
        assert!(PaymentMethod::Cash.is_immediate());
        assert!(PaymentMethod::DuitNow.is_immediate());
        assert!(!PaymentMethod::PayLater.is_immediate());
    }

    #[test]
    fn test_patch_applies_only_set_fields() {
        let mut p = product(30);
        let patch = ProductPatch::quantity(27);
        patch.apply(&mut p);
        assert_eq!(p.quantity, 27);
        assert_eq!(p.name, "Teh Tarik");
        assert_eq!(p.price_cents, 250);
    }

    #[test]
    fn test_sale_json_field_names() {
        // The persisted blob format uses camelCase keys.
        let sale = Sale {
            id: "1".to_string(),
            items: vec![SaleItem {
                id: "2".to_string(),
                name: "Teh Tarik".to_string(),
                price_cents: 250,
                quantity: 2,
                new_quantity: 8,
            }],
            total_cents: 500,
            payment_method: PaymentMethod::PayLater,
            is_paid: false,
            paid_at: None,
            date: Utc::now(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&sale).unwrap();
        assert_eq!(json["paymentMethod"], "PayLater");
        assert_eq!(json["isPaid"], false);
        assert_eq!(json["items"][0]["newQuantity"], 8);
        assert_eq!(json["totalCents"], 500);
    }
}
