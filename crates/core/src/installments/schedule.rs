//! Exact-sum amortization schedule.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;

use crate::money::truncate_money;

/// Splits `total` into `count` currency amounts that sum back to `total`
/// exactly.
///
/// The per-installment base is the truncated (round-toward-zero, scale 2)
/// quotient; the fractional leftover is absorbed by the first installment,
/// so amounts[0] >= amounts[i] for every i.
pub fn split_amount(total: Decimal, count: u32) -> Vec<Decimal> {
    let divisor = Decimal::from(count);
    let base = truncate_money(total / divisor);
    let remainder = total - base * divisor;

    (0..count)
        .map(|i| if i == 0 { base + remainder } else { base })
        .collect()
}

/// Due date of the installment at 0-based `index`: the start date shifted
/// `index` calendar months, clamped to month end (Jan 31 + 1 month = Feb 28).
///
/// `None` only when the shifted date overflows the calendar range.
pub fn due_date(start: NaiveDate, index: u32) -> Option<NaiveDate> {
    start.checked_add_months(Months::new(index))
}
