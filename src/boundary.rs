//! Request/response shapes used by loan-detail and report handlers.
//!
//! The query carries the loan record and its collections newest first,
//! exactly as the collections store returns them. Dates may be plain
//! calendar dates or RFC 3339 timestamps; only the calendar date is kept.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::PresentationConfig;
use crate::decimal::{Money, Rate};
use crate::engine::compute_balance;
use crate::errors::Result;
use crate::payments::CollectionHistory;
use crate::types::{BalanceResult, Collection, LoanTerms};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepaymentQuery {
    /// amount requested; kept for reference
    pub principal: Money,
    /// tenure in days
    pub tenure: u32,
    /// daily percentage up to the repayment date
    pub roi: Rate,
    /// daily percentage after the repayment date
    pub penalty_roi: Rate,
    /// sanctioned amount; the balance is computed on this
    pub amt_approved: Money,
    #[serde(with = "calendar_date")]
    pub disbursal_date: NaiveDate,
    #[serde(with = "calendar_date")]
    pub repayment_date: NaiveDate,
    #[serde(with = "calendar_date")]
    pub current_date: NaiveDate,
    /// newest first
    #[serde(default)]
    pub collections: Vec<CollectionRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionRecord {
    pub collected_amount: Money,
    #[serde(with = "calendar_date")]
    pub collected_date: NaiveDate,
}

impl RepaymentQuery {
    /// validated engine inputs
    pub fn into_inputs(self) -> Result<(LoanTerms, CollectionHistory)> {
        let terms = LoanTerms {
            principal: self.amt_approved,
            tenure_days: self.tenure,
            daily_rate_normal: self.roi,
            daily_rate_penalty: self.penalty_roi,
            disbursal_date: self.disbursal_date,
            due_date: self.repayment_date,
            as_of_date: self.current_date,
        };
        terms.validate()?;

        let history = CollectionHistory::from_ledger_order(
            self.collections
                .into_iter()
                .map(|c| Collection::new(c.collected_amount, c.collected_date)),
        )?;

        Ok((terms, history))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepaymentSummary {
    pub total_interest: Money,
    pub current_repay_amount: Money,
    pub penalty_interest: Money,
    pub penalty_days: u32,
}

impl RepaymentSummary {
    /// each figure is rounded on its own from the exact result
    pub fn from_result(result: &BalanceResult, presentation: &PresentationConfig) -> Self {
        Self {
            total_interest: presentation.round(result.total_interest),
            current_repay_amount: presentation.round(result.current_repay_amount),
            penalty_interest: presentation.round(result.penalty_interest),
            penalty_days: result.penalty_days,
        }
    }
}

/// validate, compute and round in one call
pub fn current_repay_amount(
    query: RepaymentQuery,
    presentation: &PresentationConfig,
) -> Result<RepaymentSummary> {
    let (terms, history) = query.into_inputs()?;
    let result = compute_balance(&terms, &history);
    Ok(RepaymentSummary::from_result(&result, presentation))
}

/// calendar date from either `YYYY-MM-DD` or an RFC 3339 timestamp
mod calendar_date {
    use chrono::{DateTime, NaiveDate};
    use serde::{de, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&date.format(FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;

        NaiveDate::parse_from_str(&raw, FORMAT)
            .or_else(|_| DateTime::parse_from_rfc3339(&raw).map(|dt| dt.date_naive()))
            .map_err(|_| de::Error::custom(format!("invalid date: {raw}")))
    }
}
