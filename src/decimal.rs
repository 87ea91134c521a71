use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};
use std::str::FromStr;

/// Money type backed by an exact decimal.
///
/// Arithmetic never rounds; call [`Money::round_dp`] or
/// [`Money::round_dp_with_strategy`] when a figure leaves the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// largest principal or collected amount accepted at the boundary
    ///
    /// With rates capped at [`Rate::MAX_DAILY`] and day counts bounded by the
    /// calendar, every accrual stays far inside `Decimal`'s range.
    pub const MAX_AMOUNT: Money = Money(dec!(1000000000000000));

    /// create from decimal
    pub fn from_decimal(d: Decimal) -> Self {
        Money(d)
    }

    /// create from string with exact parsing
    pub fn from_str_exact(s: &str) -> Result<Self, rust_decimal::Error> {
        Ok(Money(Decimal::from_str_exact(s)?))
    }

    /// create from integer amount (rupees, dollars, etc)
    pub fn from_major(amount: i64) -> Self {
        Money(Decimal::from(amount))
    }

    /// create from minor amount (paise, cents, etc)
    pub fn from_minor(amount: i64, scale: u32) -> Self {
        Money(Decimal::new(amount, scale))
    }

    /// get underlying decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// round to specified decimal places (banker's rounding)
    pub fn round_dp(&self, dp: u32) -> Self {
        Money(self.0.round_dp(dp))
    }

    pub fn round_dp_with_strategy(&self, dp: u32, strategy: RoundingStrategy) -> Self {
        Money(self.0.round_dp_with_strategy(dp, strategy))
    }

    /// check if zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// strictly greater than zero
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// strictly less than zero
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// minimum of two values
    pub fn min(self, other: Self) -> Self {
        Money(self.0.min(other.0))
    }

    /// maximum of two values
    pub fn max(self, other: Self) -> Self {
        Money(self.0.max(other.0))
    }

    /// subtract, flooring the result at zero
    pub fn saturating_sub(self, other: Self) -> Self {
        Money((self.0 - other.0).max(Decimal::ZERO))
    }

    /// simple interest at a daily percentage: `self * rate * days / 100`
    ///
    /// Unchecked; inputs are bounded by [`Money::MAX_AMOUNT`] and
    /// [`Rate::MAX_DAILY`] before they reach the engine.
    pub fn daily_interest(&self, rate: Rate, days: u32) -> Self {
        Money(self.0 * rate.as_percent() * Decimal::from(days) / Decimal::ONE_HUNDRED)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::from_str_exact(s)
    }
}

impl From<Decimal> for Money {
    fn from(d: Decimal) -> Self {
        Money::from_decimal(d)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money(self.0 + other.0)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money(self.0 - other.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

/// daily interest rate, held as a percentage (1 means 1% per day)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Rate(Decimal);

impl Rate {
    pub const ZERO: Rate = Rate(Decimal::ZERO);

    /// highest daily percentage accepted at the boundary
    pub const MAX_DAILY: Rate = Rate(dec!(100));

    /// create from a percentage (e.g., 1.5 for 1.5% per day)
    pub fn from_percent(p: Decimal) -> Self {
        Rate(p)
    }

    /// create from basis points (e.g., 150 for 1.5% per day)
    pub fn from_bps(bps: u32) -> Self {
        Rate(Decimal::new(bps as i64, 2))
    }

    /// get as percentage
    pub fn as_percent(&self) -> Decimal {
        self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl From<Decimal> for Rate {
    fn from(d: Decimal) -> Self {
        Rate::from_percent(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interest::calendar_days_between;
    use chrono::NaiveDate;

    #[test]
    fn test_money_keeps_full_precision() {
        let m = Money::from_str_exact("100.123456789").unwrap();
        assert_eq!(m.to_string(), "100.123456789");
        assert_eq!(m.round_dp(2).to_string(), "100.12");
    }

    #[test]
    fn test_minor_units() {
        let paise = Money::from_minor(150_075, 2);
        assert_eq!(paise.as_decimal(), dec!(1500.75));
    }

    #[test]
    fn test_daily_interest() {
        let principal = Money::from_major(10_000);
        let rate = Rate::from_percent(dec!(1));

        assert_eq!(principal.daily_interest(rate, 10), Money::from_major(1_000));
        assert_eq!(principal.daily_interest(rate, 0), Money::ZERO);
    }

    #[test]
    fn test_daily_interest_is_not_rounded() {
        let principal = Money::from_major(333);
        let rate = Rate::from_percent(dec!(0.33));

        let interest = principal.daily_interest(rate, 7);
        assert_eq!(interest.as_decimal(), dec!(7.6923));
    }

    #[test]
    fn test_daily_interest_at_the_limits() {
        // widest span chrono can represent
        let days = calendar_days_between(NaiveDate::MIN, NaiveDate::MAX);
        let interest = Money::MAX_AMOUNT.daily_interest(Rate::MAX_DAILY, days);

        assert_eq!(interest.as_decimal(), Money::MAX_AMOUNT.as_decimal() * Decimal::from(days));
        assert!(Money::MAX_AMOUNT.daily_interest(Rate::MAX_DAILY, u32::MAX).is_positive());
    }

    #[test]
    fn test_saturating_sub_floors_at_zero() {
        let a = Money::from_major(50);
        let b = Money::from_major(80);

        assert_eq!(a.saturating_sub(b), Money::ZERO);
        assert_eq!(b.saturating_sub(a), Money::from_major(30));
    }

    #[test]
    fn test_rate_conversions() {
        let rate = Rate::from_bps(150);
        assert_eq!(rate.as_percent(), dec!(1.5));
        assert_eq!(rate.to_string(), "1.50%");
    }
}
