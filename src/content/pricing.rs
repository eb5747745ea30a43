//! Price projection from the reference currency into display currencies.
//!
//! Rates are NGN per one unit of the target currency, so conversion divides.
//! A result of 0 is the "unpriced" sentinel: callers must treat it as
//! "cannot display a price" and block checkout, never as a free item.

use std::collections::HashMap;

use super::model::ShopItem;

/// All base prices are stored in this currency.
pub const REFERENCE_CURRENCY: &str = "NGN";

/// Currencies the storefront offers for display.
pub const SHOP_CURRENCIES: [&str; 4] = ["NGN", "USD", "GBP", "EUR"];

/// Project an item's base price into `currency`.
///
/// The NGN path returns the base value without consulting the rate table.
/// A missing, zero, or unusable base or rate yields 0.
pub fn amount_in(item: &ShopItem, currency: &str, rates: &HashMap<String, f64>) -> f64 {
    let base = item.base_price();
    if !(base.is_finite() && base > 0.0) {
        return 0.0;
    }
    if currency == REFERENCE_CURRENCY {
        return base;
    }
    let rate = rates.get(currency).copied().unwrap_or(0.0);
    if !(rate.is_finite() && rate > 0.0) {
        return 0.0;
    }
    base / rate
}

pub fn currency_symbol(currency: &str) -> Option<&'static str> {
    match currency {
        "NGN" => Some("\u{20a6}"),
        "USD" => Some("$"),
        "GBP" => Some("\u{a3}"),
        "EUR" => Some("\u{20ac}"),
        _ => None,
    }
}

/// Format an amount the way the storefront displays it: currency symbol
/// (code prefix for unknown currencies), thousands grouping, two decimals.
pub fn format_amount(amount: f64, currency: &str) -> String {
    let cents = (amount * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.abs();
    let grouped = group_thousands(cents / 100);
    let body = format!("{}.{:02}", grouped, cents % 100);
    match currency_symbol(currency) {
        Some(symbol) => format!("{sign}{symbol}{body}"),
        None => format!("{sign}{currency} {body}"),
    }
}

fn group_thousands(value: i64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
