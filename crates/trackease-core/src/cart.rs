//! # Cart Module
//!
//! The in-memory cart used by the sell flow.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Cart Operations                                   │
//! │                                                                         │
//! │  Screen Action             Cart Method             Cart Change          │
//! │  ─────────────             ───────────             ───────────          │
//! │                                                                         │
//! │  Tap Product ────────────► add(product) ─────────► line qty + 1         │
//! │                               │                                         │
//! │                               ├── stock 0?        → OutOfStock          │
//! │                               └── qty == stock?   → InsufficientStock   │
//! │                                                                         │
//! │  Tap Remove ─────────────► remove(id) ───────────► line qty - 1         │
//! │                                                    (line gone at zero)  │
//! │                                                                         │
//! │  Checkout ───────────────► checkout(method) ─────► NewSale with item    │
//! │                                                    snapshots            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Stock Checks Are Best-Effort
//! The check compares against the stock level captured when the product was
//! first added. Nothing is reserved; the single-user model means stock
//! cannot change underneath an open cart.

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{NewSale, PaymentMethod, Product, SaleItem};
use chrono::Utc;

// =============================================================================
// Cart Item
// =============================================================================

/// A line in the cart.
///
/// ## Price Freezing
/// Name and price are captured when the product is added. If the product
/// is edited afterwards the cart (and the resulting sale) keep the values
/// the customer saw.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    /// Product id this line refers to.
    pub product_id: String,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Unit price in cents at time of adding (frozen).
    pub price_cents: i64,

    /// Quantity in cart.
    pub quantity: i64,

    /// Product stock level when the line was created; the ceiling for
    /// this line's quantity and the basis for `new_quantity` at checkout.
    pub stock_at_add: i64,
}

impl CartItem {
    /// Line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.price_cents).multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by `product_id` (adding the same product again
///   increases the quantity)
/// - Line quantity never exceeds `stock_at_add`
/// - Quantity is always > 0 (decrementing to zero removes the line)
#[derive(Debug, Clone, Default)]
pub struct Cart {
    /// Lines in the cart.
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Adds one unit of a product to the cart.
    pub fn add(&mut self, product: &Product) -> CoreResult<()> {
        self.add_units(product, 1)
    }

    /// Adds `quantity` units of a product to the cart.
    ///
    /// ## Errors
    /// - [`CoreError::OutOfStock`] if the product has zero stock
    /// - [`CoreError::InsufficientStock`] if the cart would hold more
    ///   units than were in stock when the line was created
    pub fn add_units(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        if product.quantity <= 0 {
            return Err(CoreError::OutOfStock {
                name: product.name.clone(),
            });
        }

        if let Some(item) = self
            .items
            .iter_mut()
            .find(|i| i.product_id == product.id)
        {
            let requested = item.quantity + quantity;
            if requested > item.stock_at_add {
                return Err(CoreError::InsufficientStock {
                    name: item.name.clone(),
                    available: item.stock_at_add,
                    requested,
                });
            }
            item.quantity = requested;
            return Ok(());
        }

        if quantity > product.quantity {
            return Err(CoreError::InsufficientStock {
                name: product.name.clone(),
                available: product.quantity,
                requested: quantity,
            });
        }

        self.items.push(CartItem {
            product_id: product.id.clone(),
            name: product.name.clone(),
            price_cents: product.price_cents,
            quantity,
            stock_at_add: product.quantity,
        });

        Ok(())
    }

    /// Removes one unit of a product; drops the line when it hits zero.
    /// Unknown ids are ignored.
    pub fn remove(&mut self, product_id: &str) {
        if let Some(pos) = self.items.iter().position(|i| i.product_id == product_id) {
            if self.items[pos].quantity <= 1 {
                self.items.remove(pos);
            } else {
                self.items[pos].quantity -= 1;
            }
        }
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// True when the cart has no lines.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Cart total across all lines.
    pub fn total(&self) -> Money {
        self.items.iter().map(|i| i.line_total()).sum()
    }

    /// Total unit count across all lines (the badge on the cart button).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Finalizes the cart into a [`NewSale`].
    ///
    /// Each line becomes a [`SaleItem`] snapshot with `new_quantity` set
    /// to the stock level the product should end up at. The sale starts
    /// unpaid only for Pay Later.
    ///
    /// ## Errors
    /// - [`CoreError::EmptyCart`] when there is nothing to sell
    pub fn checkout(&self, method: PaymentMethod) -> CoreResult<NewSale> {
        if self.items.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        let items: Vec<SaleItem> = self
            .items
            .iter()
            .map(|line| SaleItem {
                id: line.product_id.clone(),
                name: line.name.clone(),
                price_cents: line.price_cents,
                quantity: line.quantity,
                new_quantity: line.stock_at_add - line.quantity,
            })
            .collect();

        Ok(NewSale {
            total_cents: self.total().cents(),
            items,
            payment_method: method,
            is_paid: method.is_immediate(),
            date: Utc::now(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Product;

    fn product(id: &str, name: &str, price_cents: i64, quantity: i64) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            price_cents,
            quantity,
            category: "Food".to_string(),
            image: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_add_merges_lines_by_product() {
        let p = product("1", "Nasi Lemak", 400, 30);
        let mut cart = Cart::new();
        cart.add(&p).unwrap();
        cart.add(&p).unwrap();
        cart.add(&p).unwrap();

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 3);
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.total(), Money::from_cents(1200));
    }

    #[test]
    fn test_out_of_stock_rejected() {
        let p = product("1", "Kuih", 100, 0);
        let mut cart = Cart::new();
        assert!(matches!(cart.add(&p), Err(CoreError::OutOfStock { .. })));
    }

    #[test]
    fn test_cannot_exceed_stock() {
        let p = product("1", "Kuih", 100, 2);
        let mut cart = Cart::new();
        cart.add(&p).unwrap();
        cart.add(&p).unwrap();
        assert!(matches!(
            cart.add(&p),
            Err(CoreError::InsufficientStock {
                available: 2,
                requested: 3,
                ..
            })
        ));
    }

    #[test]
    fn test_remove_decrements_then_drops() {
        let p = product("1", "Kuih", 100, 5);
        let mut cart = Cart::new();
        cart.add_units(&p, 2).unwrap();

        cart.remove("1");
        assert_eq!(cart.items[0].quantity, 1);

        cart.remove("1");
        assert!(cart.is_empty());

        // Removing an unknown id is a no-op.
        cart.remove("1");
    }

    #[test]
    fn test_checkout_snapshot() {
        // Price RM 4.00, stock 30, sell 3.
        let p = product("1", "Nasi Lemak", 400, 30);
        let mut cart = Cart::new();
        cart.add_units(&p, 3).unwrap();

        let sale = cart.checkout(PaymentMethod::Cash).unwrap();
        assert_eq!(sale.total_cents, 1200);
        assert!(sale.is_paid);
        assert_eq!(sale.items.len(), 1);
        assert_eq!(sale.items[0].quantity, 3);
        assert_eq!(sale.items[0].new_quantity, 27);
        assert_eq!(sale.items[0].price_cents, 400);
    }

    #[test]
    fn test_checkout_pay_later_is_unpaid() {
        let p = product("1", "Nasi Lemak", 400, 30);
        let mut cart = Cart::new();
        cart.add(&p).unwrap();

        let sale = cart.checkout(PaymentMethod::PayLater).unwrap();
        assert!(!sale.is_paid);
        assert_eq!(sale.payment_method, PaymentMethod::PayLater);
    }

    #[test]
    fn test_checkout_empty_cart_rejected() {
        let cart = Cart::new();
        assert!(matches!(
            cart.checkout(PaymentMethod::Cash),
            Err(CoreError::EmptyCart)
        ));
    }

    #[test]
    fn test_price_frozen_at_add_time() {
        let mut p = product("1", "Kuih", 100, 10);
        let mut cart = Cart::new();
        cart.add(&p).unwrap();

        // Price edit after the customer saw the shelf tag.
        p.price_cents = 150;

        let sale = cart.checkout(PaymentMethod::Cash).unwrap();
        assert_eq!(sale.items[0].price_cents, 100);
        assert_eq!(sale.total_cents, 100);
    }
}
