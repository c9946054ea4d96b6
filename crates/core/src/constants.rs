/// Decimal scale for monetary amounts (currency cents).
pub const MONEY_SCALE: u32 = 2;

/// Decimal scale for derived ratios (budget usage, goal progress).
pub const RATIO_SCALE: u32 = 4;

/// Minimum number of installments in an amortized purchase plan.
pub const MIN_INSTALLMENT_COUNT: u32 = 2;
