//! Integer money arithmetic.
//!
//! Every figure the UI shows is aggregated here in whole cents and only
//! converted to decimal units afterwards, so repeated additions never pick up
//! floating-point drift.

use log::warn;
use shared::Cents;

/// Sum cent amounts exactly.
///
/// The accumulator is `i128`, which cannot overflow for any realistic number
/// of `i64` inputs, so the result is independent of input order. Only the
/// final total is saturated into the `i64` range.
pub fn sum_cents<I>(amounts: I) -> Cents
where
    I: IntoIterator<Item = Cents>,
{
    let total: i128 = amounts.into_iter().map(|c| c.value() as i128).sum();
    Cents(saturate_i64(total))
}

/// Integer percentage of `part` relative to `total`, rounded half-up.
///
/// Returns 0 when `total` is zero or negative, and clamps the result to
/// `0..=100`.
pub fn calculate_percentage(part: Cents, total: Cents) -> u8 {
    if total.value() <= 0 || part.value() <= 0 {
        return 0;
    }

    let part = part.value() as i128;
    let total = total.value() as i128;
    // round(part / total * 100) == floor((200 * part + total) / (2 * total))
    let rounded = (200 * part + total) / (2 * total);

    if rounded > 100 {
        warn!("Percentage part {} exceeds total {}, clamping to 100", part, total);
        return 100;
    }
    rounded as u8
}

pub(crate) fn saturate_i64(value: i128) -> i64 {
    i64::try_from(value).unwrap_or(if value < 0 { i64::MIN } else { i64::MAX })
}
