//! Compatibility shim for expenses recorded before the cents migration.
//!
//! Some historical expense amounts were stored 100x too large. Those records
//! cannot be told apart from legitimate ones with certainty, so this module
//! applies a best-effort heuristic at display time and leaves stored data
//! untouched. New records go through [`super::money`] and never need it.

use log::debug;
use rust_decimal::{Decimal, RoundingStrategy};
use shared::CurrencyCode;

const SUSPICIOUS_THRESHOLD: i64 = 1000;
const SCALE_FACTOR: i64 = 100;
const MIN_NORMALIZED_AMOUNT: i64 = 10;

/// Undo the historical 100x scaling on an expense amount when it looks affected.
///
/// An amount is treated as scaled when it is at least 1000, divisible by 100,
/// and still at least 10 after dividing by 100. Anything else is returned
/// unchanged. This is a heuristic, not a guaranteed-correct migration.
pub fn normalize_expense_amount(amount: impl Into<Decimal>) -> Decimal {
    let amount = amount.into();
    let factor = Decimal::from(SCALE_FACTOR);

    if amount >= Decimal::from(SUSPICIOUS_THRESHOLD) && (amount % factor).is_zero() {
        let normalized = amount / factor;
        if normalized >= Decimal::from(MIN_NORMALIZED_AMOUNT) {
            debug!("Normalizing historical expense amount {} to {}", amount, normalized);
            return normalized;
        }
    }

    amount
}

/// Normalize an expense amount and format it with two decimals
pub fn format_expense_amount(amount: impl Into<Decimal>, currency: &CurrencyCode) -> String {
    let mut normalized = normalize_expense_amount(amount)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    normalized.rescale(2);
    format!("{} {}", currency, normalized)
}
