//! Currency amounts.
//!
//! Every stored amount is a [`Decimal`] with two fractional digits. Rounding to cents
//! happens on each stored value (line totals, subtotal, tax, total), half away from zero.

use rust_decimal::prelude::*;

pub type Money = Decimal;

pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Round to whole cents, half away from zero.
pub fn round_money(value: Decimal) -> Money {
    value.round_dp_with_strategy(MONEY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Build an amount from a count of cents: `cents(1299)` is `12.99`.
pub fn cents(amount: i64) -> Money {
    Decimal::new(amount, MONEY_DECIMAL_PLACES)
}
