use chrono::NaiveDate;

use crate::decimal::Rate;
use crate::interest::InterestCalculator;
use crate::types::RateTier;

/// whole calendar days from `start` to `end`
///
/// Dates carry no time of day, so this is plain date subtraction. A span
/// that runs backwards counts as zero days.
pub fn calendar_days_between(start: NaiveDate, end: NaiveDate) -> u32 {
    let days = (end - start).num_days();
    u32::try_from(days.max(0)).unwrap_or(u32::MAX)
}

/// accrual at the contractual rate, up to the due date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalAccrual {
    pub rate: Rate,
}

impl NormalAccrual {
    pub fn new(rate: Rate) -> Self {
        Self { rate }
    }
}

impl InterestCalculator for NormalAccrual {
    fn daily_rate(&self) -> Rate {
        self.rate
    }

    fn tier(&self) -> RateTier {
        RateTier::Normal
    }
}
