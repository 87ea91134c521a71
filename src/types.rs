use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::{Money, Rate};
use crate::errors::{BalanceError, Result};

/// unique identifier for a loan
pub type LoanId = Uuid;

/// immutable terms a balance is computed from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// approved amount that was disbursed
    pub principal: Money,
    /// contracted tenure; only sizes the up-front interest of a loan that
    /// went overdue before its first collection
    pub tenure_days: u32,
    /// daily percentage applied up to the due date
    pub daily_rate_normal: Rate,
    /// daily percentage applied after the due date
    pub daily_rate_penalty: Rate,
    pub disbursal_date: NaiveDate,
    pub due_date: NaiveDate,
    /// the date the balance is computed for
    pub as_of_date: NaiveDate,
}

impl LoanTerms {
    /// reject inputs the engine is not defined for
    pub fn validate(&self) -> Result<()> {
        validate_principal(self.principal)?;
        validate_rate("normal", self.daily_rate_normal)?;
        validate_rate("penalty", self.daily_rate_penalty)
    }

    pub fn is_overdue(&self) -> bool {
        self.as_of_date > self.due_date
    }
}

/// principal must lie in `0..=Money::MAX_AMOUNT`
pub fn validate_principal(principal: Money) -> Result<()> {
    if principal.is_negative() {
        return Err(BalanceError::NegativePrincipal { principal });
    }

    if principal > Money::MAX_AMOUNT {
        return Err(BalanceError::AmountTooLarge {
            name: "principal",
            amount: principal,
        });
    }

    Ok(())
}

fn validate_rate(name: &'static str, rate: Rate) -> Result<()> {
    if rate.is_negative() {
        return Err(BalanceError::NegativeRate { name, rate });
    }

    if rate > Rate::MAX_DAILY {
        return Err(BalanceError::RateTooHigh { name, rate });
    }

    Ok(())
}

/// one repayment event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub amount: Money,
    pub date: NaiveDate,
}

impl Collection {
    pub fn new(amount: Money, date: NaiveDate) -> Self {
        Self { amount, date }
    }
}

/// which daily rate a gap was charged at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RateTier {
    Normal,
    Penalty,
}

/// how a single collection was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionApplication {
    pub collected_date: NaiveDate,
    pub collected_amount: Money,
    /// days since the previous accrual point
    pub gap_days: u32,
    pub tier: RateTier,
    /// interest charged for the gap before the collection was applied
    pub gap_interest: Money,
    pub to_penalty: Money,
    pub to_interest: Money,
    pub to_principal: Money,
    /// surplus after principal reached zero; not carried forward
    pub discarded: Money,
}

impl CollectionApplication {
    pub fn total_applied(&self) -> Money {
        self.to_penalty + self.to_interest + self.to_principal
    }
}

/// outstanding balance of a loan as of a date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceResult {
    pub outstanding_principal: Money,
    /// normal-rate interest net of allocations
    pub total_interest: Money,
    pub penalty_interest: Money,
    pub penalty_days: u32,
    pub current_repay_amount: Money,
    /// per-collection breakdown, oldest first
    pub applications: Vec<CollectionApplication>,
}

impl BalanceResult {
    pub fn new(
        outstanding_principal: Money,
        total_interest: Money,
        penalty_interest: Money,
        penalty_days: u32,
        applications: Vec<CollectionApplication>,
    ) -> Self {
        Self {
            outstanding_principal,
            total_interest,
            penalty_interest,
            penalty_days,
            current_repay_amount: outstanding_principal + total_interest + penalty_interest,
            applications,
        }
    }

    /// total surplus dropped across all collections
    pub fn discarded_total(&self) -> Money {
        self.applications.iter().map(|a| a.discarded).sum()
    }

    pub fn is_settled(&self) -> bool {
        self.current_repay_amount.is_zero()
    }
}
