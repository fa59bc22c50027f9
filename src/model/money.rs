//! Money formatting
//!
//! Amounts are kept at full precision in the model and rounded to cents only
//! when they are turned into text.

use rust_decimal::{Decimal, RoundingStrategy};

/// Round to two decimal places (half away from zero, like `toFixed`)
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format an amount for display, e.g. `$19.99`
pub fn format_money(symbol: &str, amount: Decimal) -> String {
    format!("{}{:.2}", symbol, round_cents(amount))
}
