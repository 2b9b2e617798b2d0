//! Onboarding and full reset (the onboarding screen and the settings
//! screen's danger zone).

use chrono::Utc;
use clap::Args;

use trackease_core::{
    validation, BusinessInfo, DEFAULT_LOW_STOCK_THRESHOLD, DEFAULT_RECEIPT_MESSAGE,
};
use trackease_store::Store;

use super::CliResult;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Merchant mobile number
    #[arg(long)]
    pub mobile: String,

    /// Business name
    #[arg(long)]
    pub name: String,

    /// Business type (e.g. "Warung", "Cafe")
    #[arg(long, default_value = "")]
    pub business_type: String,

    /// Message printed at the bottom of receipts
    #[arg(long, default_value = DEFAULT_RECEIPT_MESSAGE)]
    pub receipt_message: String,

    /// Low-stock warning threshold
    #[arg(long, default_value_t = DEFAULT_LOW_STOCK_THRESHOLD)]
    pub low_stock_threshold: i64,
}

pub async fn init(store: &Store, args: InitArgs) -> CliResult {
    if store.has_launched().await {
        return Err(
            "a business is already set up; use `trackease settings` to edit it, \
             or `trackease reset --yes` to start over"
                .into(),
        );
    }

    validation::validate_mobile_number(&args.mobile)?;
    if args.name.trim().is_empty() {
        return Err("business name is required".into());
    }
    validation::validate_low_stock_threshold(args.low_stock_threshold)?;

    let info = BusinessInfo {
        mobile_number: args.mobile.trim().to_string(),
        business_name: args.name.trim().to_string(),
        business_type: args.business_type.trim().to_string(),
        receipt_message: args.receipt_message,
        low_stock_threshold: args.low_stock_threshold,
        created_at: Utc::now(),
    };

    store.save_business_info(&info).await;
    store.mark_launched().await;

    println!("Welcome to TrackEase, {}!", info.business_name);
    println!("Add products with `trackease product add`, then record sales with `trackease sell`.");
    Ok(())
}

#[derive(Debug, Args)]
pub struct ResetArgs {
    /// Confirm erasing all products, sales and settings
    #[arg(long)]
    pub yes: bool,
}

pub async fn reset(store: &Store, args: ResetArgs) -> CliResult {
    if !args.yes {
        return Err(
            "this deletes all data including products, sales, and settings and cannot \
             be undone; pass --yes to confirm"
                .into(),
        );
    }

    store.reset().await;
    println!("All data erased. Run `trackease init` to set up again.");
    Ok(())
}
