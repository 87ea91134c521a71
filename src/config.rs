use chrono::{Duration, NaiveDate};
use rust_decimal::RoundingStrategy;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{BalanceError, Result};
use crate::types::LoanTerms;

/// loan product: tenure and the two daily rates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanProduct {
    pub name: String,
    pub tenure_days: u32,
    pub daily_rate_normal: Rate,
    pub daily_rate_penalty: Rate,
}

impl LoanProduct {
    /// 30 day loan at 1% per day, 2% per day once overdue
    pub fn short_term() -> Self {
        Self {
            name: "short_term".to_string(),
            tenure_days: 30,
            daily_rate_normal: Rate::from_percent(dec!(1)),
            daily_rate_penalty: Rate::from_percent(dec!(2)),
        }
    }

    /// 15 day advance against salary at 0.75% per day, 1.5% once overdue
    pub fn salary_advance() -> Self {
        Self {
            name: "salary_advance".to_string(),
            tenure_days: 15,
            daily_rate_normal: Rate::from_percent(dec!(0.75)),
            daily_rate_penalty: Rate::from_percent(dec!(1.5)),
        }
    }

    /// load a product definition from json
    pub fn from_json(json: &str) -> Result<Self> {
        let product: LoanProduct = serde_json::from_str(json).map_err(|e| {
            BalanceError::InvalidConfiguration {
                message: e.to_string(),
            }
        })?;
        product.validate()?;
        Ok(product)
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(BalanceError::InvalidConfiguration {
                message: "product name is empty".to_string(),
            });
        }

        if self.tenure_days == 0 {
            return Err(BalanceError::InvalidConfiguration {
                message: format!("product {} has zero tenure", self.name),
            });
        }

        if self.daily_rate_normal.is_negative() || self.daily_rate_penalty.is_negative() {
            return Err(BalanceError::InvalidConfiguration {
                message: format!("product {} has a negative rate", self.name),
            });
        }

        if self.daily_rate_normal > Rate::MAX_DAILY || self.daily_rate_penalty > Rate::MAX_DAILY {
            return Err(BalanceError::InvalidConfiguration {
                message: format!("product {} has a rate above {}", self.name, Rate::MAX_DAILY),
            });
        }

        Ok(())
    }

    /// contractual due date for a loan disbursed on `disbursal_date`
    pub fn due_date(&self, disbursal_date: NaiveDate) -> NaiveDate {
        disbursal_date + Duration::days(i64::from(self.tenure_days))
    }

    /// terms for a loan of this product, evaluated as of `as_of_date`
    pub fn terms(
        &self,
        principal: Money,
        disbursal_date: NaiveDate,
        as_of_date: NaiveDate,
    ) -> LoanTerms {
        LoanTerms {
            principal,
            tenure_days: self.tenure_days,
            daily_rate_normal: self.daily_rate_normal,
            daily_rate_penalty: self.daily_rate_penalty,
            disbursal_date,
            due_date: self.due_date(disbursal_date),
            as_of_date,
        }
    }
}

/// rounding applied when a figure leaves the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rounding {
    /// midpoint away from zero
    HalfUp,
    /// banker's rounding
    HalfEven,
    /// truncate toward zero
    Down,
}

impl From<Rounding> for RoundingStrategy {
    fn from(rounding: Rounding) -> Self {
        match rounding {
            Rounding::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            Rounding::HalfEven => RoundingStrategy::MidpointNearestEven,
            Rounding::Down => RoundingStrategy::ToZero,
        }
    }
}

/// presentation settings for summaries handed to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentationConfig {
    pub decimal_places: u32,
    pub rounding: Rounding,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            decimal_places: 2,
            rounding: Rounding::HalfUp,
        }
    }
}

impl PresentationConfig {
    pub fn round(&self, amount: Money) -> Money {
        amount.round_dp_with_strategy(self.decimal_places, self.rounding.into())
    }
}
