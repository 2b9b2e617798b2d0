//! Product management (add-product and edit-product screens).

use clap::{Args, Subcommand};

use trackease_core::{validation, CoreError, NewProduct, Product, ProductPatch};
use trackease_store::Store;

use super::{amount_cell, parse_price, CliResult};

#[derive(Debug, Args)]
pub struct ProductCommand {
    #[command(subcommand)]
    pub command: ProductSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum ProductSubcommand {
    /// Add a new product
    Add {
        /// Product name
        #[arg(long)]
        name: String,
        /// Price in ringgit, e.g. 4.50
        #[arg(long, value_parser = parse_price)]
        price: i64,
        /// Initial stock level
        #[arg(long)]
        quantity: i64,
        /// Category (see `trackease settings categories`)
        #[arg(long, default_value = "Other")]
        category: String,
        /// Optional image reference
        #[arg(long)]
        image: Option<String>,
    },

    /// List products
    List {
        /// Only this category
        #[arg(long)]
        category: Option<String>,
    },

    /// Edit a product's fields
    Update {
        /// Product id
        id: String,
        #[arg(long)]
        name: Option<String>,
        /// Price in ringgit, e.g. 4.50
        #[arg(long, value_parser = parse_price)]
        price: Option<i64>,
        #[arg(long)]
        quantity: Option<i64>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        image: Option<String>,
    },

    /// Delete a product
    Delete {
        /// Product id
        id: String,
    },

    /// Adjust stock up or down (restock / shrinkage)
    Adjust {
        /// Product id
        id: String,
        /// Units to add to stock
        #[arg(long, conflicts_with = "remove")]
        add: Option<i64>,
        /// Units to remove from stock (floored at zero)
        #[arg(long)]
        remove: Option<i64>,
    },
}

pub async fn run(store: &Store, cmd: ProductCommand) -> CliResult {
    match cmd.command {
        ProductSubcommand::Add {
            name,
            price,
            quantity,
            category,
            image,
        } => add(store, name, price, quantity, category, image).await,
        ProductSubcommand::List { category } => list(store, category).await,
        ProductSubcommand::Update {
            id,
            name,
            price,
            quantity,
            category,
            image,
        } => {
            update(
                store,
                &id,
                ProductPatch {
                    name,
                    price_cents: price,
                    quantity,
                    category,
                    image,
                },
            )
            .await
        }
        ProductSubcommand::Delete { id } => delete(store, &id).await,
        ProductSubcommand::Adjust { id, add, remove } => adjust(store, &id, add, remove).await,
    }
}

async fn add(
    store: &Store,
    name: String,
    price_cents: i64,
    quantity: i64,
    category: String,
    image: Option<String>,
) -> CliResult {
    validation::validate_product_name(&name)?;
    validation::validate_price_cents(price_cents)?;
    validation::validate_stock_quantity(quantity)?;
    validation::validate_category(&category)?;

    let product = store
        .add_product(NewProduct {
            name: name.trim().to_string(),
            price_cents,
            quantity,
            category: category.trim().to_string(),
            image,
        })
        .await
        .ok_or("product was not saved")?;

    println!(
        "Added {} ({}) - {} - stock {}",
        product.name,
        product.id,
        product.price(),
        product.quantity
    );
    Ok(())
}

async fn list(store: &Store, category: Option<String>) -> CliResult {
    let mut products = store.products().await;
    if let Some(category) = &category {
        products.retain(|p| p.category.eq_ignore_ascii_case(category));
    }

    if products.is_empty() {
        println!("No products yet. Add one with `trackease product add`.");
        return Ok(());
    }

    print_table(&products);
    Ok(())
}

async fn update(store: &Store, id: &str, patch: ProductPatch) -> CliResult {
    if let Some(name) = &patch.name {
        validation::validate_product_name(name)?;
    }
    if let Some(price_cents) = patch.price_cents {
        validation::validate_price_cents(price_cents)?;
    }
    if let Some(quantity) = patch.quantity {
        validation::validate_stock_quantity(quantity)?;
    }
    if let Some(category) = &patch.category {
        validation::validate_category(category)?;
    }

    let product = store
        .update_product(id, patch)
        .await
        .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))?;

    println!(
        "Updated {} - {} - stock {}",
        product.name,
        product.price(),
        product.quantity
    );
    Ok(())
}

async fn delete(store: &Store, id: &str) -> CliResult {
    store.delete_product(id).await;
    println!("Deleted product {id} (if it existed).");
    Ok(())
}

async fn adjust(store: &Store, id: &str, add: Option<i64>, remove: Option<i64>) -> CliResult {
    let current = store
        .products()
        .await
        .into_iter()
        .find(|p| p.id == id)
        .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))?;

    let new_quantity = match (add, remove) {
        (Some(amount), None) => {
            validation::validate_adjustment(amount)?;
            current.quantity + amount
        }
        (None, Some(amount)) => {
            validation::validate_adjustment(amount)?;
            // Shrinkage never goes below zero, same as the edit screen.
            (current.quantity - amount).max(0)
        }
        _ => return Err("pass exactly one of --add or --remove".into()),
    };

    let product = store
        .update_product(id, ProductPatch::quantity(new_quantity))
        .await
        .ok_or("stock adjustment was not saved")?;

    println!(
        "{}: stock {} -> {}",
        product.name, current.quantity, product.quantity
    );
    Ok(())
}

fn print_table(products: &[Product]) {
    println!(
        "{:<15} {:<24} {:<10} {:>8} {:>7}",
        "ID", "NAME", "CATEGORY", "PRICE", "STOCK"
    );
    for p in products {
        println!(
            "{:<15} {:<24} {:<10} {:>8} {:>7}",
            p.id,
            p.name,
            p.category,
            amount_cell(p.price()),
            p.quantity
        );
    }
}
