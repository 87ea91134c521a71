use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::{LoanId, RateTier};

/// all events that can be emitted by a loan account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    // lifecycle events
    LoanDisbursed {
        loan_id: LoanId,
        product: String,
        principal: Money,
        disbursal_date: NaiveDate,
        due_date: NaiveDate,
    },

    // collection events
    CollectionRecorded {
        loan_id: LoanId,
        amount: Money,
        collected_date: NaiveDate,
    },
    CollectionApplied {
        loan_id: LoanId,
        collected_date: NaiveDate,
        gap_days: u32,
        tier: RateTier,
        applied_to_penalty: Money,
        applied_to_interest: Money,
        applied_to_principal: Money,
    },
    OverpaymentDiscarded {
        loan_id: LoanId,
        collected_date: NaiveDate,
        amount: Money,
    },

    // statement events
    BalanceComputed {
        loan_id: LoanId,
        as_of_date: NaiveDate,
        outstanding_principal: Money,
        total_interest: Money,
        penalty_interest: Money,
        penalty_days: u32,
        current_repay_amount: Money,
    },
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
