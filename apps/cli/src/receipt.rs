//! Plain-text receipt rendering.
//!
//! Mirrors the shared receipt format:
//!
//! ```text
//! === RECEIPT ===
//!
//! Nasi Lemak
//! 3 x RM 4.00 = RM 12.00
//!
//! Total: RM 12.00
//! Payment: Cash
//! Date: 2024-03-15 12:30
//!
//! Thank you for your purchase!
//! ```

use std::fmt::Write;

use trackease_core::{BusinessInfo, Sale, DEFAULT_RECEIPT_MESSAGE};

/// Renders a sale as receipt text. The business info supplies the footer
/// message (and the header name, when present).
pub fn render(sale: &Sale, info: Option<&BusinessInfo>) -> String {
    let mut receipt = String::new();

    receipt.push_str("=== RECEIPT ===\n");
    if let Some(info) = info {
        let _ = writeln!(receipt, "{}", info.business_name);
    }
    receipt.push('\n');

    for item in &sale.items {
        let _ = writeln!(receipt, "{}", item.name);
        let _ = writeln!(
            receipt,
            "{} x {} = {}\n",
            item.quantity,
            item.unit_price(),
            item.line_total()
        );
    }

    let _ = writeln!(receipt, "Total: {}", sale.total());
    let _ = writeln!(receipt, "Payment: {}", sale.payment_method);
    let _ = writeln!(receipt, "Date: {}", sale.date.format("%Y-%m-%d %H:%M"));

    let message = info
        .map(|i| i.receipt_message.as_str())
        .unwrap_or(DEFAULT_RECEIPT_MESSAGE);
    let _ = write!(receipt, "\n{message}");

    receipt
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use trackease_core::{PaymentMethod, SaleItem};

    fn sample_sale() -> Sale {
        Sale {
            id: "1700000000000".to_string(),
            items: vec![SaleItem {
                id: "1699999999999".to_string(),
                name: "Nasi Lemak".to_string(),
                price_cents: 400,
                quantity: 3,
                new_quantity: 27,
            }],
            total_cents: 1200,
            payment_method: PaymentMethod::Cash,
            is_paid: true,
            paid_at: None,
            date: Utc::now(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_receipt_contents() {
        let text = render(&sample_sale(), None);
        assert!(text.contains("=== RECEIPT ==="));
        assert!(text.contains("Nasi Lemak"));
        assert!(text.contains("3 x RM 4.00 = RM 12.00"));
        assert!(text.contains("Total: RM 12.00"));
        assert!(text.contains("Payment: Cash"));
        assert!(text.ends_with(DEFAULT_RECEIPT_MESSAGE));
    }

    #[test]
    fn test_receipt_uses_business_message() {
        let info = BusinessInfo {
            mobile_number: "+60123456789".to_string(),
            business_name: "Kedai Siti".to_string(),
            business_type: "Warung".to_string(),
            receipt_message: "Jumpa lagi!".to_string(),
            low_stock_threshold: 10,
            created_at: Utc::now(),
        };
        let text = render(&sample_sale(), Some(&info));
        assert!(text.contains("Kedai Siti"));
        assert!(text.ends_with("Jumpa lagi!"));
    }
}
