//! Fixed-scale decimal arithmetic for currency amounts.
//!
//! All monetary values are `rust_decimal::Decimal` with a settlement scale of
//! two fractional digits. Threshold comparisons (`spent >= amount`, goal
//! progress) are exact decimal comparisons, never epsilon-based.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::{MONEY_SCALE, RATIO_SCALE};

/// Rounds a derived amount to currency scale, half-up away from zero.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Truncates an amount toward zero at currency scale.
///
/// This is the division mode used when splitting a total into installments:
/// the discarded fraction is re-absorbed by the first installment so the
/// schedule sums back to the exact total.
pub fn truncate_money(value: Decimal) -> Decimal {
    value.trunc_with_scale(MONEY_SCALE)
}

/// Percentage of `part` over `whole`, computed at ratio scale.
///
/// Returns zero when `whole` is not positive, mirroring how budget usage and
/// goal progress are reported for a zero limit/target.
pub fn percentage_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    (part / whole)
        .round_dp_with_strategy(RATIO_SCALE, RoundingStrategy::MidpointAwayFromZero)
        * Decimal::ONE_HUNDRED
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_truncate_money_rounds_toward_zero() {
        assert_eq!(truncate_money(dec!(33.339)), dec!(33.33));
        assert_eq!(truncate_money(dec!(33.331)), dec!(33.33));
        assert_eq!(truncate_money(dec!(-10.019)), dec!(-10.01));
        assert_eq!(truncate_money(dec!(25.00)), dec!(25.00));
    }

    #[test]
    fn test_round_money_half_up() {
        assert_eq!(round_money(dec!(10.005)), dec!(10.01));
        assert_eq!(round_money(dec!(10.004)), dec!(10.00));
    }

    #[test]
    fn test_percentage_of() {
        assert_eq!(percentage_of(dec!(450.00), dec!(500.00)), dec!(90.00));
        assert_eq!(percentage_of(dec!(1), dec!(3)), dec!(33.33));
        assert_eq!(percentage_of(dec!(50), Decimal::ZERO), Decimal::ZERO);
    }
}
