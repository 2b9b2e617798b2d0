//! Read-only views: dashboard, reports and inventory screens.

use chrono::{Datelike, Local, NaiveDate};
use clap::{Args, ValueEnum};

use trackease_core::{reports, reports::ReportRange, DEFAULT_LOW_STOCK_THRESHOLD};
use trackease_store::Store;

use super::{amount_cell, CliResult};

// =============================================================================
// Dashboard
// =============================================================================

#[derive(Debug, Args)]
pub struct DashboardArgs {
    /// How many top sellers to show
    #[arg(long, default_value_t = 5)]
    pub top: usize,
}

pub async fn dashboard(store: &Store, args: DashboardArgs) -> CliResult {
    let info = store.business_info().await;
    let sales = store.sales().await;
    let products = store.products().await;

    let business_name = info
        .as_ref()
        .map(|i| i.business_name.as_str())
        .unwrap_or("Your Business");
    let threshold = info
        .as_ref()
        .map(|i| i.low_stock_threshold)
        .unwrap_or(DEFAULT_LOW_STOCK_THRESHOLD);

    let today = Local::now().date_naive();
    let summary = reports::day_summary(&sales, today);

    println!("{business_name} - {today}");
    println!();
    println!("Today's sales:  {}", summary.total);
    println!("Transactions:   {}", summary.transactions);

    let todays = reports::filter_sales(&sales, ReportRange::Daily(today));
    let top = reports::top_products(&todays, args.top);
    if !top.is_empty() {
        println!("\nTop selling today:");
        for (rank, product) in top.iter().enumerate() {
            println!("  {}. {} - {} sold", rank + 1, product.name, product.units);
        }
    }

    let low = reports::low_stock(&products, threshold);
    let out = reports::out_of_stock(&products);
    if !low.is_empty() || !out.is_empty() {
        println!(
            "\nStock warnings: {} low, {} out of stock (see `trackease inventory`)",
            low.len(),
            out.len()
        );
    }

    let outstanding = reports::outstanding_total(&sales);
    if !outstanding.is_zero() {
        println!("Outstanding payments: {outstanding}");
    }
    Ok(())
}

// =============================================================================
// Reports
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    Daily,
    Weekly,
    Monthly,
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Reporting window
    #[arg(long, value_enum, default_value = "daily")]
    pub mode: Mode,

    /// Anchor date (YYYY-MM-DD); defaults to today. Weekly reports cover
    /// the week containing this date, monthly reports its month.
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

pub async fn report(store: &Store, args: ReportArgs) -> CliResult {
    let date = args.date.unwrap_or_else(|| Local::now().date_naive());
    let range = match args.mode {
        Mode::Daily => ReportRange::Daily(date),
        Mode::Weekly => ReportRange::Weekly(date),
        Mode::Monthly => ReportRange::Monthly {
            year: date.year(),
            month: date.month(),
        },
    };

    let sales = store.sales().await;
    let filtered = reports::filter_sales(&sales, range);
    let summary = reports::sales_summary(&filtered);

    match args.mode {
        Mode::Daily => println!("Sales report for {date}"),
        Mode::Weekly => println!("Weekly sales report (week of {date})"),
        Mode::Monthly => println!("Monthly sales report for {}-{:02}", date.year(), date.month()),
    }
    println!();
    println!("Total sales:    {}", summary.total);
    println!("Transactions:   {}", summary.transactions);
    println!("Paid:           {}", summary.paid_total);
    println!("Unpaid:         {}", summary.unpaid_total);

    if summary.by_payment_method.is_empty() {
        println!("\nNo sales in this period.");
    } else {
        println!("\nBy payment method:");
        for (method, amount) in &summary.by_payment_method {
            println!("  {:<14} {}", method.label(), amount);
        }
    }
    Ok(())
}

// =============================================================================
// Inventory
// =============================================================================

#[derive(Debug, Args)]
pub struct InventoryArgs {
    /// Filter by name substring (case-insensitive)
    #[arg(long)]
    pub search: Option<String>,

    /// Filter by category
    #[arg(long)]
    pub category: Option<String>,
}

pub async fn inventory(store: &Store, args: InventoryArgs) -> CliResult {
    let info = store.business_info().await;
    let threshold = info
        .as_ref()
        .map(|i| i.low_stock_threshold)
        .unwrap_or(DEFAULT_LOW_STOCK_THRESHOLD);

    let products = store.products().await;

    println!("Products:     {}", products.len());
    println!("Low stock:    {}", reports::low_stock(&products, threshold).len());
    println!("Out of stock: {}", reports::out_of_stock(&products).len());
    println!("Stock value:  {}", reports::inventory_value(&products));

    let mut filtered = products;
    if let Some(search) = &args.search {
        let needle = search.to_lowercase();
        filtered.retain(|p| p.name.to_lowercase().contains(&needle));
    }
    if let Some(category) = &args.category {
        filtered.retain(|p| p.category.eq_ignore_ascii_case(category));
    }

    if filtered.is_empty() {
        println!("\nNo matching products.");
        return Ok(());
    }

    println!();
    println!(
        "{:<15} {:<24} {:<10} {:>8} {:>7}  STATUS",
        "ID", "NAME", "CATEGORY", "PRICE", "STOCK"
    );
    for p in &filtered {
        let status = if p.is_out_of_stock() {
            "OUT OF STOCK"
        } else if p.is_low_stock(threshold) {
            "LOW"
        } else {
            ""
        };
        println!(
            "{:<15} {:<24} {:<10} {:>8} {:>7}  {}",
            p.id,
            p.name,
            p.category,
            amount_cell(p.price()),
            p.quantity,
            status
        );
    }
    Ok(())
}
