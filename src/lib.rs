pub mod account;
pub mod boundary;
pub mod config;
pub mod decimal;
pub mod engine;
pub mod errors;
pub mod events;
pub mod interest;
pub mod payments;
pub mod types;

#[cfg(test)]
mod engine_props;

// re-export key types
pub use account::LoanAccount;
pub use boundary::{current_repay_amount, CollectionRecord, RepaymentQuery, RepaymentSummary};
pub use config::{LoanProduct, PresentationConfig, Rounding};
pub use decimal::{Money, Rate};
pub use engine::{compute_balance, AccrualState, BalanceEngine};
pub use errors::{BalanceError, Result};
pub use events::{Event, EventStore};
pub use interest::{
    calendar_days_between, InterestCalculation, InterestCalculator, NormalAccrual, PenaltyAccrual,
};
pub use payments::{CollectionHistory, PaymentWaterfall};
pub use types::{BalanceResult, Collection, CollectionApplication, LoanId, LoanTerms, RateTier};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
