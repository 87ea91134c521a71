use chrono::NaiveDate;
use thiserror::Error;

use crate::decimal::{Money, Rate};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BalanceError {
    #[error("principal must not be negative: {principal}")]
    NegativePrincipal {
        principal: Money,
    },

    #[error("{name} rate must not be negative: {rate}")]
    NegativeRate {
        name: &'static str,
        rate: Rate,
    },

    #[error("{name} exceeds the supported maximum: {amount}")]
    AmountTooLarge {
        name: &'static str,
        amount: Money,
    },

    #[error("{name} rate exceeds the supported maximum: {rate}")]
    RateTooHigh {
        name: &'static str,
        rate: Rate,
    },

    #[error("collected amount must not be negative: {amount} on {date}")]
    NegativeCollection {
        amount: Money,
        date: NaiveDate,
    },

    #[error("collections out of order: {later} listed before {earlier}")]
    CollectionsOutOfOrder {
        later: NaiveDate,
        earlier: NaiveDate,
    },

    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, BalanceError>;
