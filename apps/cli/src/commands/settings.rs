//! Business settings and category management (settings screen).

use clap::{Args, Subcommand};

use trackease_core::validation;
use trackease_store::Store;

use super::CliResult;

#[derive(Debug, Args)]
pub struct SettingsCommand {
    #[command(subcommand)]
    pub command: SettingsSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum SettingsSubcommand {
    /// Show the current business settings
    Show,

    /// Edit business settings
    Set {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        business_type: Option<String>,
        #[arg(long)]
        mobile: Option<String>,
        #[arg(long)]
        receipt_message: Option<String>,
        #[arg(long)]
        low_stock_threshold: Option<i64>,
    },

    /// Manage the category list
    Categories {
        #[command(subcommand)]
        command: CategoriesSubcommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum CategoriesSubcommand {
    /// List categories
    List,
    /// Add a category
    Add { name: String },
    /// Remove a category
    Remove { name: String },
}

pub async fn run(store: &Store, cmd: SettingsCommand) -> CliResult {
    match cmd.command {
        SettingsSubcommand::Show => show(store).await,
        SettingsSubcommand::Set {
            name,
            business_type,
            mobile,
            receipt_message,
            low_stock_threshold,
        } => {
            set(
                store,
                name,
                business_type,
                mobile,
                receipt_message,
                low_stock_threshold,
            )
            .await
        }
        SettingsSubcommand::Categories { command } => categories(store, command).await,
    }
}

async fn show(store: &Store) -> CliResult {
    let info = store
        .business_info()
        .await
        .ok_or("no business info found")?;

    println!("Business name:       {}", info.business_name);
    println!("Business type:       {}", info.business_type);
    println!("Mobile number:       {}", info.mobile_number);
    println!("Receipt message:     {}", info.receipt_message);
    println!("Low stock threshold: {}", info.low_stock_threshold);
    println!("Created:             {}", info.created_at.format("%Y-%m-%d"));
    println!("\nCategories: {}", store.categories().await.join(", "));
    Ok(())
}

async fn set(
    store: &Store,
    name: Option<String>,
    business_type: Option<String>,
    mobile: Option<String>,
    receipt_message: Option<String>,
    low_stock_threshold: Option<i64>,
) -> CliResult {
    let mut info = store
        .business_info()
        .await
        .ok_or("no business info found")?;

    if let Some(name) = name {
        if name.trim().is_empty() {
            return Err("business name is required".into());
        }
        info.business_name = name.trim().to_string();
    }
    if let Some(business_type) = business_type {
        info.business_type = business_type.trim().to_string();
    }
    if let Some(mobile) = mobile {
        validation::validate_mobile_number(&mobile)?;
        info.mobile_number = mobile.trim().to_string();
    }
    if let Some(receipt_message) = receipt_message {
        info.receipt_message = receipt_message;
    }
    if let Some(threshold) = low_stock_threshold {
        validation::validate_low_stock_threshold(threshold)?;
        info.low_stock_threshold = threshold;
    }

    store.save_business_info(&info).await;
    println!("Settings saved.");
    Ok(())
}

async fn categories(store: &Store, cmd: CategoriesSubcommand) -> CliResult {
    match cmd {
        CategoriesSubcommand::List => {
            for category in store.categories().await {
                println!("{category}");
            }
        }
        CategoriesSubcommand::Add { name } => {
            validation::validate_category(&name)?;
            let name = name.trim().to_string();
            let mut categories = store.categories().await;
            if categories.iter().any(|c| c.eq_ignore_ascii_case(&name)) {
                return Err(format!("category already exists: {name}").into());
            }
            categories.push(name);
            store.save_categories(&categories).await;
            println!("Category added.");
        }
        CategoriesSubcommand::Remove { name } => {
            let mut categories = store.categories().await;
            let before = categories.len();
            categories.retain(|c| !c.eq_ignore_ascii_case(&name));
            if categories.len() == before {
                return Err(format!("category not found: {name}").into());
            }
            store.save_categories(&categories).await;
            println!("Category removed.");
        }
    }
    Ok(())
}
