pub mod accrual;
pub mod penalty;

use chrono::NaiveDate;

use crate::decimal::{Money, Rate};
use crate::types::RateTier;

pub use accrual::{calendar_days_between, NormalAccrual};
pub use penalty::PenaltyAccrual;

/// interest calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterestCalculation {
    pub interest_amount: Money,
    pub daily_rate: Rate,
    pub days: u32,
    pub principal_base: Money,
    pub tier: RateTier,
}

/// simple daily interest at a fixed percentage
pub trait InterestCalculator {
    fn daily_rate(&self) -> Rate;

    fn tier(&self) -> RateTier;

    fn calculate_for_days(&self, principal: Money, days: u32) -> InterestCalculation {
        InterestCalculation {
            interest_amount: principal.daily_interest(self.daily_rate(), days),
            daily_rate: self.daily_rate(),
            days,
            principal_base: principal,
            tier: self.tier(),
        }
    }

    fn calculate_interest(
        &self,
        principal: Money,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> InterestCalculation {
        self.calculate_for_days(principal, calendar_days_between(start_date, end_date))
    }
}
