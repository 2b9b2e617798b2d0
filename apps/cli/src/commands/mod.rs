//! Subcommand implementations, one module per screen group.

pub mod onboard;
pub mod product;
pub mod report;
pub mod sale;
pub mod settings;

use trackease_core::Money;

/// Result type for CLI command handlers.
pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Parses a ringgit amount like `4`, `4.5` or `4.50` into cents.
///
/// Prices are entered in major units on the command line but stored as
/// integer cents everywhere else.
pub fn parse_price(input: &str) -> Result<i64, String> {
    let input = input.trim();
    let bad = || format!("invalid price '{input}' (expected e.g. 4.50)");

    let (major_str, minor_str) = match input.split_once('.') {
        Some((major, minor)) => (major, minor),
        None => (input, ""),
    };

    if major_str.is_empty() || minor_str.len() > 2 {
        return Err(bad());
    }

    let major: i64 = major_str.parse().map_err(|_| bad())?;
    if major < 0 {
        return Err(format!("price cannot be negative: '{input}'"));
    }

    let minor: i64 = if minor_str.is_empty() {
        0
    } else {
        // Digits only; i64::parse alone would accept a sign ("4.-5").
        if !minor_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(bad());
        }
        // "5" means 50 cents, "05" means 5 cents
        let parsed: i64 = minor_str.parse().map_err(|_| bad())?;
        if minor_str.len() == 1 {
            parsed * 10
        } else {
            parsed
        }
    };

    Ok(major * 100 + minor)
}

/// Formats money for aligned table output (no currency prefix).
pub fn amount_cell(money: Money) -> String {
    format!("{}.{:02}", money.major(), money.minor())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("4").unwrap(), 400);
        assert_eq!(parse_price("4.5").unwrap(), 450);
        assert_eq!(parse_price("4.50").unwrap(), 450);
        assert_eq!(parse_price("4.05").unwrap(), 405);
        assert_eq!(parse_price("0.99").unwrap(), 99);
        assert!(parse_price("-1").is_err());
        assert!(parse_price("4.505").is_err());
        assert!(parse_price("abc").is_err());
        assert!(parse_price(".50").is_err());
        // A signed minor part is a typo, not RM 3.95.
        assert!(parse_price("4.-5").is_err());
        assert!(parse_price("4.+5").is_err());
    }

    #[test]
    fn test_amount_cell() {
        assert_eq!(amount_cell(Money::from_cents(1200)), "12.00");
        assert_eq!(amount_cell(Money::from_cents(5)), "0.05");
    }
}
