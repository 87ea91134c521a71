use crate::decimal::Rate;
use crate::interest::InterestCalculator;
use crate::types::RateTier;

/// accrual at the penalty rate, for days past the due date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PenaltyAccrual {
    pub rate: Rate,
}

impl PenaltyAccrual {
    pub fn new(rate: Rate) -> Self {
        Self { rate }
    }
}

impl InterestCalculator for PenaltyAccrual {
    fn daily_rate(&self) -> Rate {
        self.rate
    }

    fn tier(&self) -> RateTier {
        RateTier::Penalty
    }
}
