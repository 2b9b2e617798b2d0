//! # Reports Module
//!
//! The aggregation logic every screen re-derives on focus.
//!
//! ## How Screens Use This
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Screen → Aggregation Map                             │
//! │                                                                         │
//! │  Dashboard ──────► day_summary(sales, today) + top_products(sales, 5)   │
//! │                                                                         │
//! │  Reports ────────► filter_sales(sales, range) → sales_summary(...)      │
//! │                    (daily / weekly / monthly range)                     │
//! │                                                                         │
//! │  Outstanding ────► outstanding_sales(sales) + outstanding_total(sales)  │
//! │                                                                         │
//! │  Inventory ──────► low_stock / out_of_stock / inventory_value           │
//! │                                                                         │
//! │  Every call is a full re-scan of the in-memory snapshot. No caching,    │
//! │  no incremental maintenance - collections are hundreds of records.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All functions here are pure: they take slices, return owned results,
//! and never touch the store.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use std::collections::{BTreeMap, HashMap};

use crate::money::Money;
use crate::types::{PaymentMethod, Product, Sale};

// =============================================================================
// Report Ranges
// =============================================================================

/// A reporting window, matching the daily/weekly/monthly toggle on the
/// reports screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportRange {
    /// A single calendar day.
    Daily(NaiveDate),
    /// The week containing the given day (weeks start on Sunday).
    Weekly(NaiveDate),
    /// A calendar month.
    Monthly { year: i32, month: u32 },
}

impl ReportRange {
    /// Whether a timestamp falls inside this range.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        let day = at.date_naive();
        match *self {
            ReportRange::Daily(date) => day == date,
            ReportRange::Weekly(date) => {
                let start =
                    date - Duration::days(date.weekday().num_days_from_sunday() as i64);
                let end = start + Duration::days(6);
                day >= start && day <= end
            }
            ReportRange::Monthly { year, month } => {
                day.year() == year && day.month() == month
            }
        }
    }
}

/// Filters sales to those recorded inside the range.
pub fn filter_sales(sales: &[Sale], range: ReportRange) -> Vec<Sale> {
    sales
        .iter()
        .filter(|sale| range.contains(sale.created_at))
        .cloned()
        .collect()
}

// =============================================================================
// Dashboard Summaries
// =============================================================================

/// Today's headline numbers on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DaySummary {
    /// Summed sale totals for the day.
    pub total: Money,
    /// Number of transactions.
    pub transactions: usize,
}

/// Filter by calendar day, reduce-sum the totals.
pub fn day_summary(sales: &[Sale], day: NaiveDate) -> DaySummary {
    let todays: Vec<&Sale> = sales
        .iter()
        .filter(|sale| sale.created_at.date_naive() == day)
        .collect();

    DaySummary {
        total: todays.iter().map(|s| s.total()).sum(),
        transactions: todays.len(),
    }
}

/// One row of the "Top Selling" list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopProduct {
    /// Product name as snapshotted on the sale items.
    pub name: String,
    /// Units sold across the given sales.
    pub units: i64,
}

/// Groups sale items by name, sums quantities, sorts descending, takes `n`.
///
/// Grouping is by the snapshotted name: a renamed product counts as a new
/// entry from the rename onwards.
pub fn top_products(sales: &[Sale], n: usize) -> Vec<TopProduct> {
    let mut units_by_name: HashMap<&str, i64> = HashMap::new();
    for sale in sales {
        for item in &sale.items {
            *units_by_name.entry(item.name.as_str()).or_insert(0) += item.quantity;
        }
    }

    let mut ranked: Vec<TopProduct> = units_by_name
        .into_iter()
        .map(|(name, units)| TopProduct {
            name: name.to_string(),
            units,
        })
        .collect();

    // Ties break alphabetically so the ranking is stable between re-scans.
    ranked.sort_by(|a, b| b.units.cmp(&a.units).then_with(|| a.name.cmp(&b.name)));
    ranked.truncate(n);
    ranked
}

// =============================================================================
// Sales Summary (Reports Screen)
// =============================================================================

/// Aggregates for a filtered set of sales.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SalesSummary {
    /// Summed totals, paid or not.
    pub total: Money,
    /// Number of sales.
    pub transactions: usize,
    /// Summed totals of paid sales.
    pub paid_total: Money,
    /// Summed totals of unpaid sales.
    pub unpaid_total: Money,
    /// Revenue grouped by payment method.
    pub by_payment_method: BTreeMap<PaymentMethod, Money>,
}

/// Group-by-method and paid/unpaid reductions over a sales snapshot.
pub fn sales_summary(sales: &[Sale]) -> SalesSummary {
    let mut summary = SalesSummary {
        transactions: sales.len(),
        ..SalesSummary::default()
    };

    for sale in sales {
        let total = sale.total();
        summary.total += total;
        if sale.is_paid {
            summary.paid_total += total;
        } else {
            summary.unpaid_total += total;
        }
        *summary
            .by_payment_method
            .entry(sale.payment_method)
            .or_insert_with(Money::zero) += total;
    }

    summary
}

// =============================================================================
// Outstanding Payments
// =============================================================================

/// Sales awaiting payment (Pay Later, not yet settled).
pub fn outstanding_sales(sales: &[Sale]) -> Vec<Sale> {
    sales
        .iter()
        .filter(|sale| sale.is_outstanding())
        .cloned()
        .collect()
}

/// Summed total of unpaid sales.
pub fn outstanding_total(sales: &[Sale]) -> Money {
    sales
        .iter()
        .filter(|sale| sale.is_outstanding())
        .map(|sale| sale.total())
        .sum()
}

// =============================================================================
// Inventory Views
// =============================================================================

/// Products with some stock left but at or below the threshold.
pub fn low_stock(products: &[Product], threshold: i64) -> Vec<Product> {
    products
        .iter()
        .filter(|p| p.is_low_stock(threshold))
        .cloned()
        .collect()
}

/// Products with exactly zero stock.
pub fn out_of_stock(products: &[Product]) -> Vec<Product> {
    products
        .iter()
        .filter(|p| p.is_out_of_stock())
        .cloned()
        .collect()
}

/// Total retail value of stock on hand: `sum(price × quantity)`.
pub fn inventory_value(products: &[Product]) -> Money {
    products
        .iter()
        .map(|p| p.price().multiply_quantity(p.quantity))
        .sum()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SaleItem;
    use chrono::TimeZone;

    fn sale_on(
        id: &str,
        day: NaiveDate,
        total_cents: i64,
        method: PaymentMethod,
        is_paid: bool,
    ) -> Sale {
        let at = Utc
            .from_utc_datetime(&day.and_hms_opt(12, 0, 0).unwrap());
        Sale {
            id: id.to_string(),
            items: vec![SaleItem {
                id: format!("p-{id}"),
                name: format!("Item {id}"),
                price_cents: total_cents,
                quantity: 1,
                new_quantity: 0,
            }],
            total_cents,
            payment_method: method,
            is_paid,
            paid_at: None,
            date: at,
            created_at: at,
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_day_summary() {
        let today = day(2024, 3, 15);
        let sales = vec![
            sale_on("1", today, 400, PaymentMethod::Cash, true),
            sale_on("2", today, 600, PaymentMethod::DuitNow, true),
            sale_on("3", day(2024, 3, 14), 9999, PaymentMethod::Cash, true),
        ];

        let summary = day_summary(&sales, today);
        assert_eq!(summary.total, Money::from_cents(1000));
        assert_eq!(summary.transactions, 2);

        let empty = day_summary(&sales, day(2024, 1, 1));
        assert_eq!(empty.transactions, 0);
        assert!(empty.total.is_zero());
    }

    #[test]
    fn test_top_products_groups_by_name() {
        let today = day(2024, 3, 15);
        let mut s1 = sale_on("1", today, 0, PaymentMethod::Cash, true);
        s1.items = vec![
            SaleItem {
                id: "a".into(),
                name: "Teh Tarik".into(),
                price_cents: 250,
                quantity: 3,
                new_quantity: 0,
            },
            SaleItem {
                id: "b".into(),
                name: "Nasi Lemak".into(),
                price_cents: 400,
                quantity: 1,
                new_quantity: 0,
            },
        ];
        let mut s2 = sale_on("2", today, 0, PaymentMethod::Cash, true);
        s2.items = vec![SaleItem {
            id: "a".into(),
            name: "Teh Tarik".into(),
            price_cents: 250,
            quantity: 2,
            new_quantity: 0,
        }];

        let top = top_products(&[s1, s2], 5);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].name, "Teh Tarik");
        assert_eq!(top[0].units, 5);
        assert_eq!(top[1].name, "Nasi Lemak");
        assert_eq!(top[1].units, 1);

        let top1 = top_products(&[], 5);
        assert!(top1.is_empty());
    }

    #[test]
    fn test_weekly_range_sunday_start() {
        // 2024-03-15 is a Friday; its week runs Sun 10th .. Sat 16th.
        let range = ReportRange::Weekly(day(2024, 3, 15));
        let in_week = sale_on("1", day(2024, 3, 10), 100, PaymentMethod::Cash, true);
        let saturday = sale_on("2", day(2024, 3, 16), 100, PaymentMethod::Cash, true);
        let next_sunday = sale_on("3", day(2024, 3, 17), 100, PaymentMethod::Cash, true);

        assert!(range.contains(in_week.created_at));
        assert!(range.contains(saturday.created_at));
        assert!(!range.contains(next_sunday.created_at));
    }

    #[test]
    fn test_monthly_range() {
        let range = ReportRange::Monthly { year: 2024, month: 3 };
        assert!(range.contains(
            Utc.from_utc_datetime(&day(2024, 3, 1).and_hms_opt(0, 0, 0).unwrap())
        ));
        assert!(!range.contains(
            Utc.from_utc_datetime(&day(2024, 4, 1).and_hms_opt(0, 0, 0).unwrap())
        ));
        assert!(!range.contains(
            Utc.from_utc_datetime(&day(2023, 3, 15).and_hms_opt(0, 0, 0).unwrap())
        ));
    }

    #[test]
    fn test_sales_summary_breakdown() {
        let today = day(2024, 3, 15);
        let sales = vec![
            sale_on("1", today, 400, PaymentMethod::Cash, true),
            sale_on("2", today, 600, PaymentMethod::Cash, true),
            sale_on("3", today, 1000, PaymentMethod::PayLater, false),
        ];

        let summary = sales_summary(&sales);
        assert_eq!(summary.transactions, 3);
        assert_eq!(summary.total, Money::from_cents(2000));
        assert_eq!(summary.paid_total, Money::from_cents(1000));
        assert_eq!(summary.unpaid_total, Money::from_cents(1000));
        assert_eq!(
            summary.by_payment_method[&PaymentMethod::Cash],
            Money::from_cents(1000)
        );
        assert_eq!(
            summary.by_payment_method[&PaymentMethod::PayLater],
            Money::from_cents(1000)
        );
    }

    #[test]
    fn test_outstanding() {
        let today = day(2024, 3, 15);
        let sales = vec![
            sale_on("1", today, 400, PaymentMethod::Cash, true),
            sale_on("2", today, 600, PaymentMethod::PayLater, false),
            sale_on("3", today, 900, PaymentMethod::PayLater, false),
        ];

        let open = outstanding_sales(&sales);
        assert_eq!(open.len(), 2);
        assert_eq!(outstanding_total(&sales), Money::from_cents(1500));
    }

    #[test]
    fn test_inventory_views() {
        let mk = |q: i64, price: i64| Product {
            id: q.to_string(),
            name: format!("P{q}"),
            price_cents: price,
            quantity: q,
            category: "Food".into(),
            image: None,
            created_at: Utc::now(),
        };
        let products = vec![mk(0, 100), mk(5, 200), mk(50, 300)];

        assert_eq!(out_of_stock(&products).len(), 1);
        assert_eq!(low_stock(&products, 10).len(), 1);
        assert_eq!(low_stock(&products, 10)[0].quantity, 5);
        // 0*100 + 5*200 + 50*300 = 16000
        assert_eq!(inventory_value(&products), Money::from_cents(16_000));
    }
}
