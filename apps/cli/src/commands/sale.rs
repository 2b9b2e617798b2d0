//! Selling and payment tracking (sales, checkout and outstanding-payments
//! screens).

use clap::{Args, Subcommand};

use trackease_core::{reports, Cart, CoreError, PaymentMethod, Product};
use trackease_store::Store;

use crate::receipt;

use super::CliResult;

#[derive(Debug, Args)]
pub struct SellArgs {
    /// Items to sell, as `PRODUCT:QTY` (product id or exact name; QTY
    /// defaults to 1), e.g. `trackease sell "Teh Tarik:2" 1700000000000`
    #[arg(required = true)]
    pub items: Vec<String>,

    /// Payment method: cash, duitnow, bank-transfer or pay-later
    #[arg(long, default_value = "cash")]
    pub method: PaymentMethod,
}

pub async fn sell(store: &Store, args: SellArgs) -> CliResult {
    let products = store.products().await;

    let mut cart = Cart::new();
    for entry in &args.items {
        let (product, quantity) = resolve_item(&products, entry)?;
        cart.add_units(product, quantity)?;
    }

    let new_sale = cart.checkout(args.method)?;
    let sale = store.add_sale(new_sale).await.ok_or("sale was not recorded")?;

    let info = store.business_info().await;
    println!("{}", receipt::render(&sale, info.as_ref()));

    if !sale.is_paid {
        println!("Recorded as outstanding - see `trackease payments`.");
    }
    Ok(())
}

/// Resolves an `PRODUCT:QTY` argument against the product collection.
/// The product part matches by id first, then by exact name
/// (case-insensitive).
fn resolve_item<'a>(
    products: &'a [Product],
    entry: &str,
) -> Result<(&'a Product, i64), Box<dyn std::error::Error>> {
    let (needle, quantity) = match entry.rsplit_once(':') {
        Some((name, qty)) => {
            let quantity: i64 = qty
                .trim()
                .parse()
                .map_err(|_| format!("invalid quantity in '{entry}'"))?;
            (name.trim(), quantity)
        }
        None => (entry.trim(), 1),
    };

    if quantity <= 0 {
        return Err(format!("quantity must be positive in '{entry}'").into());
    }

    if let Some(product) = products.iter().find(|p| p.id == needle) {
        return Ok((product, quantity));
    }

    let mut by_name = products
        .iter()
        .filter(|p| p.name.eq_ignore_ascii_case(needle));
    match (by_name.next(), by_name.next()) {
        (Some(product), None) => Ok((product, quantity)),
        (Some(_), Some(_)) => Err(format!(
            "'{needle}' matches more than one product; use the product id"
        )
        .into()),
        (None, _) => Err(CoreError::ProductNotFound(needle.to_string()).into()),
    }
}

// =============================================================================
// Outstanding Payments
// =============================================================================

#[derive(Debug, Args)]
pub struct PaymentsCommand {
    #[command(subcommand)]
    pub command: PaymentsSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum PaymentsSubcommand {
    /// List outstanding sales
    List,
    /// Mark a sale as paid
    Paid {
        /// Sale id
        id: String,
    },
    /// Mark a sale as unpaid again (undo a mistaken settle)
    Unpaid {
        /// Sale id
        id: String,
    },
}

pub async fn payments(store: &Store, cmd: PaymentsCommand) -> CliResult {
    match cmd.command {
        PaymentsSubcommand::List => list(store).await,
        PaymentsSubcommand::Paid { id } => set_status(store, &id, true).await,
        PaymentsSubcommand::Unpaid { id } => set_status(store, &id, false).await,
    }
}

async fn list(store: &Store) -> CliResult {
    let sales = store.sales().await;
    let outstanding = reports::outstanding_sales(&sales);

    if outstanding.is_empty() {
        println!("No outstanding payments.");
        return Ok(());
    }

    println!("{:<15} {:<12} {:>10}  ITEMS", "ID", "DATE", "TOTAL");
    for sale in &outstanding {
        let item_names: Vec<&str> = sale.items.iter().map(|i| i.name.as_str()).collect();
        println!(
            "{:<15} {:<12} {:>10}  {}",
            sale.id,
            sale.date.format("%Y-%m-%d"),
            sale.total().to_string(),
            item_names.join(", ")
        );
    }
    println!(
        "\nTotal outstanding: {}",
        reports::outstanding_total(&sales)
    );
    Ok(())
}

async fn set_status(store: &Store, id: &str, is_paid: bool) -> CliResult {
    let sale = store
        .update_sale_payment_status(id, is_paid)
        .await
        .ok_or_else(|| CoreError::SaleNotFound(id.to_string()))?;

    if is_paid {
        println!("Sale {} ({}) marked as paid.", sale.id, sale.total());
    } else {
        println!("Sale {} ({}) marked as unpaid.", sale.id, sale.total());
    }
    Ok(())
}
