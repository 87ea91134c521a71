use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use tracing::info;
use uuid::Uuid;

use crate::config::LoanProduct;
use crate::decimal::Money;
use crate::engine::compute_balance;
use crate::errors::{BalanceError, Result};
use crate::events::{Event, EventStore};
use crate::payments::CollectionHistory;
use crate::types::{validate_principal, BalanceResult, Collection, LoanId, LoanTerms};

/// a disbursed loan and its collection ledger
pub struct LoanAccount {
    pub id: LoanId,
    pub product: LoanProduct,
    pub principal: Money,
    pub disbursal_date: NaiveDate,
    /// newest first, as the ledger stores them
    collections: Vec<Collection>,
    pub events: EventStore,
}

impl LoanAccount {
    /// open an account for a freshly disbursed loan
    pub fn originate(
        product: LoanProduct,
        principal: Money,
        disbursal_date: NaiveDate,
    ) -> Result<Self> {
        product.validate()?;
        validate_principal(principal)?;

        let due_date = product.due_date(disbursal_date);
        let mut account = Self {
            id: Uuid::new_v4(),
            product,
            principal,
            disbursal_date,
            collections: Vec::new(),
            events: EventStore::new(),
        };

        account.events.emit(Event::LoanDisbursed {
            loan_id: account.id,
            product: account.product.name.clone(),
            principal,
            disbursal_date,
            due_date,
        });

        info!(loan_id = %account.id, product = %account.product.name, %principal, "loan disbursed");

        Ok(account)
    }

    pub fn due_date(&self) -> NaiveDate {
        self.product.due_date(self.disbursal_date)
    }

    /// collections in ledger order, newest first
    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    /// record a collection, keeping the ledger newest first
    pub fn record_collection(&mut self, amount: Money, collected_date: NaiveDate) -> Result<()> {
        if amount.is_negative() {
            return Err(BalanceError::NegativeCollection {
                amount,
                date: collected_date,
            });
        }

        if amount > Money::MAX_AMOUNT {
            return Err(BalanceError::AmountTooLarge {
                name: "collected amount",
                amount,
            });
        }

        if collected_date < self.disbursal_date {
            return Err(BalanceError::InvalidDate {
                message: format!(
                    "collection on {} precedes disbursal on {}",
                    collected_date, self.disbursal_date
                ),
            });
        }

        // back-dated entries go below every entry on or after their date
        let position = self
            .collections
            .iter()
            .position(|c| c.date <= collected_date)
            .unwrap_or(self.collections.len());
        self.collections.insert(position, Collection::new(amount, collected_date));

        self.events.emit(Event::CollectionRecorded {
            loan_id: self.id,
            amount,
            collected_date,
        });

        Ok(())
    }

    pub fn terms_as_of(&self, as_of_date: NaiveDate) -> LoanTerms {
        self.product.terms(self.principal, self.disbursal_date, as_of_date)
    }

    pub fn is_overdue_as_of(&self, as_of_date: NaiveDate) -> bool {
        self.terms_as_of(as_of_date).is_overdue()
    }

    /// outstanding balance as of a given date
    pub fn statement_as_of(&mut self, as_of_date: NaiveDate) -> Result<BalanceResult> {
        let terms = self.terms_as_of(as_of_date);
        terms.validate()?;

        let history = CollectionHistory::from_ledger_order(self.collections.iter().copied())?;
        let result = compute_balance(&terms, &history);

        for applied in &result.applications {
            self.events.emit(Event::CollectionApplied {
                loan_id: self.id,
                collected_date: applied.collected_date,
                gap_days: applied.gap_days,
                tier: applied.tier,
                applied_to_penalty: applied.to_penalty,
                applied_to_interest: applied.to_interest,
                applied_to_principal: applied.to_principal,
            });

            if applied.discarded.is_positive() {
                self.events.emit(Event::OverpaymentDiscarded {
                    loan_id: self.id,
                    collected_date: applied.collected_date,
                    amount: applied.discarded,
                });
            }
        }

        self.events.emit(Event::BalanceComputed {
            loan_id: self.id,
            as_of_date,
            outstanding_principal: result.outstanding_principal,
            total_interest: result.total_interest,
            penalty_interest: result.penalty_interest,
            penalty_days: result.penalty_days,
            current_repay_amount: result.current_repay_amount,
        });

        Ok(result)
    }

    /// outstanding balance as of the provider's current date
    pub fn statement(&mut self, time_provider: &SafeTimeProvider) -> Result<BalanceResult> {
        self.statement_as_of(time_provider.now().date_naive())
    }
}
