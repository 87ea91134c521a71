//! Outstanding-balance computation for a loan with a partial collection history.
//!
//! Interest is simple daily interest on the running principal. Up to the due
//! date it accrues at the normal rate; after it, at the penalty rate. A
//! collection pays the interest charged for the gap since the previous
//! accrual point before it touches principal, and after the due date it pays
//! penalty interest first.
//!
//! The walk over collections is a fold over [`AccrualState`]. Each step takes
//! the previous state and one collection and returns the next state together
//! with a [`CollectionApplication`] describing the split.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::decimal::Money;
use crate::interest::{InterestCalculation, InterestCalculator, NormalAccrual, PenaltyAccrual};
use crate::payments::{Allocation, CollectionHistory, Outstanding, PaymentWaterfall};
use crate::types::{BalanceResult, Collection, CollectionApplication, LoanTerms};

/// running state of the collection walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccrualState {
    pub principal: Money,
    pub accrued_interest: Money,
    pub accrued_penalty: Money,
    pub penalty_days: u32,
    pub last_accrual: NaiveDate,
}

impl AccrualState {
    /// nothing accrued, accrual starting at disbursal
    pub fn opening(terms: &LoanTerms) -> Self {
        Self {
            principal: terms.principal,
            accrued_interest: Money::ZERO,
            accrued_penalty: Money::ZERO,
            penalty_days: 0,
            last_accrual: terms.disbursal_date,
        }
    }

    /// full-tenure normal interest booked up front, accrual restarting at the
    /// due date
    pub fn overdue_opening(terms: &LoanTerms, normal: &NormalAccrual) -> Self {
        let tenure = normal.calculate_for_days(terms.principal, terms.tenure_days);

        Self {
            accrued_interest: tenure.interest_amount,
            last_accrual: terms.due_date,
            ..Self::opening(terms)
        }
    }

    /// book normal interest up to `date` without a collection
    pub fn accrue_normal_to(self, date: NaiveDate, normal: &NormalAccrual) -> Self {
        let calc = normal.calculate_interest(self.principal, self.last_accrual, date);

        Self {
            accrued_interest: self.accrued_interest + calc.interest_amount,
            last_accrual: date,
            ..self
        }
    }

    /// book penalty interest up to `date` without a collection
    pub fn accrue_penalty_to(self, date: NaiveDate, penalty: &PenaltyAccrual) -> Self {
        let calc = penalty.calculate_interest(self.principal, self.last_accrual, date);

        Self {
            accrued_penalty: self.accrued_penalty + calc.interest_amount,
            penalty_days: self.penalty_days + calc.days,
            last_accrual: date,
            ..self
        }
    }

    /// apply a collection dated on or before the due date
    ///
    /// Only the gap interest and principal are payable; interest left unpaid
    /// by earlier collections stays in `accrued_interest` untouched.
    pub fn apply_current(
        self,
        collection: &Collection,
        normal: &NormalAccrual,
    ) -> (Self, CollectionApplication) {
        let gap = normal.calculate_interest(self.principal, self.last_accrual, collection.date);
        let allocation = PaymentWaterfall::current().allocate(
            collection.amount,
            Outstanding {
                penalty: Money::ZERO,
                interest: gap.interest_amount,
                principal: self.principal,
            },
        );

        let next = Self {
            principal: allocation.remaining.principal,
            accrued_interest: self.accrued_interest + allocation.remaining.interest,
            last_accrual: collection.date,
            ..self
        };

        (next, application(collection, &gap, &allocation))
    }

    /// apply a collection dated after the due date
    ///
    /// The gap is charged at the penalty rate even when it began before the
    /// due date.
    pub fn apply_overdue(
        self,
        collection: &Collection,
        penalty: &PenaltyAccrual,
    ) -> (Self, CollectionApplication) {
        let gap = penalty.calculate_interest(self.principal, self.last_accrual, collection.date);
        let allocation = PaymentWaterfall::overdue().allocate(
            collection.amount,
            Outstanding {
                penalty: gap.interest_amount,
                interest: self.accrued_interest,
                principal: self.principal,
            },
        );

        let next = Self {
            principal: allocation.remaining.principal,
            accrued_interest: allocation.remaining.interest,
            accrued_penalty: self.accrued_penalty + allocation.remaining.penalty,
            penalty_days: self.penalty_days + gap.days,
            last_accrual: collection.date,
        };

        (next, application(collection, &gap, &allocation))
    }

    /// penalty on the running principal over the whole due-date to as-of span
    ///
    /// The span is charged in full even if part of it was already charged to
    /// collections made after the due date.
    pub fn charge_overdue_span(self, terms: &LoanTerms, penalty: &PenaltyAccrual) -> Self {
        if !terms.is_overdue() {
            return self;
        }

        let span = penalty.calculate_interest(self.principal, terms.due_date, terms.as_of_date);

        Self {
            accrued_penalty: self.accrued_penalty + span.interest_amount,
            penalty_days: self.penalty_days.max(span.days),
            last_accrual: self.last_accrual.max(terms.as_of_date),
            ..self
        }
    }

    pub fn into_result(self, applications: Vec<CollectionApplication>) -> BalanceResult {
        BalanceResult::new(
            self.principal,
            self.accrued_interest,
            self.accrued_penalty,
            self.penalty_days,
            applications,
        )
    }
}

fn application(
    collection: &Collection,
    gap: &InterestCalculation,
    allocation: &Allocation,
) -> CollectionApplication {
    let applied = CollectionApplication {
        collected_date: collection.date,
        collected_amount: collection.amount,
        gap_days: gap.days,
        tier: gap.tier,
        gap_interest: gap.interest_amount,
        to_penalty: allocation.to_penalty,
        to_interest: allocation.to_interest,
        to_principal: allocation.to_principal,
        discarded: allocation.discarded,
    };

    debug!(
        collected_date = %applied.collected_date,
        collected_amount = %applied.collected_amount,
        gap_days = applied.gap_days,
        tier = ?applied.tier,
        daily_rate = %gap.daily_rate,
        principal_base = %gap.principal_base,
        gap_interest = %applied.gap_interest,
        to_penalty = %applied.to_penalty,
        to_interest = %applied.to_interest,
        to_principal = %applied.to_principal,
        "collection applied"
    );

    applied
}

/// stateless balance engine
#[derive(Debug, Clone, Copy, Default)]
pub struct BalanceEngine;

impl BalanceEngine {
    pub fn new() -> Self {
        Self
    }

    /// outstanding balance of `terms` as of `terms.as_of_date`
    pub fn compute(&self, terms: &LoanTerms, history: &CollectionHistory) -> BalanceResult {
        let normal = NormalAccrual::new(terms.daily_rate_normal);
        let penalty = PenaltyAccrual::new(terms.daily_rate_penalty);

        let result = match history.first() {
            None => Self::without_collections(terms, &normal, &penalty),
            Some(oldest) if oldest.date > terms.due_date => {
                Self::overdue_before_first_collection(terms, history, &normal, &penalty)
            }
            Some(_) => Self::collected_before_due(terms, history, &normal, &penalty),
        };

        info!(
            as_of = %terms.as_of_date,
            collections = history.len(),
            outstanding_principal = %result.outstanding_principal,
            total_interest = %result.total_interest,
            penalty_interest = %result.penalty_interest,
            penalty_days = result.penalty_days,
            current_repay_amount = %result.current_repay_amount,
            "balance computed"
        );

        let discarded = result.discarded_total();
        if discarded.is_positive() {
            warn!(%discarded, "collections exceeded the outstanding balance");
        }

        result
    }

    fn without_collections(
        terms: &LoanTerms,
        normal: &NormalAccrual,
        penalty: &PenaltyAccrual,
    ) -> BalanceResult {
        let opening = AccrualState::opening(terms);

        let state = if terms.is_overdue() {
            opening
                .accrue_normal_to(terms.due_date, normal)
                .accrue_penalty_to(terms.as_of_date, penalty)
        } else {
            opening.accrue_normal_to(terms.as_of_date, normal)
        };

        state.into_result(Vec::new())
    }

    /// the first collection arrived after the due date
    fn overdue_before_first_collection(
        terms: &LoanTerms,
        history: &CollectionHistory,
        normal: &NormalAccrual,
        penalty: &PenaltyAccrual,
    ) -> BalanceResult {
        let (state, applications) = history.iter().fold(
            (AccrualState::overdue_opening(terms, normal), Vec::with_capacity(history.len())),
            |(state, mut applications), collection| {
                let (next, applied) = state.apply_overdue(collection, penalty);
                applications.push(applied);
                (next, applications)
            },
        );

        let state = if terms.as_of_date > state.last_accrual {
            state.accrue_penalty_to(terms.as_of_date, penalty)
        } else {
            state
        };

        state.into_result(applications)
    }

    /// the first collection arrived on or before the due date
    fn collected_before_due(
        terms: &LoanTerms,
        history: &CollectionHistory,
        normal: &NormalAccrual,
        penalty: &PenaltyAccrual,
    ) -> BalanceResult {
        let (state, applications) = history.iter().fold(
            (AccrualState::opening(terms), Vec::with_capacity(history.len())),
            |(state, mut applications), collection| {
                let (next, applied) = if collection.date <= terms.due_date {
                    state.apply_current(collection, normal)
                } else {
                    state.apply_overdue(collection, penalty)
                };
                applications.push(applied);
                (next, applications)
            },
        );

        let state = if state.last_accrual < terms.due_date {
            state.accrue_normal_to(terms.due_date, normal)
        } else {
            state
        };

        state
            .charge_overdue_span(terms, penalty)
            .into_result(applications)
    }
}

/// outstanding balance of `terms` given its collection history
pub fn compute_balance(terms: &LoanTerms, history: &CollectionHistory) -> BalanceResult {
    BalanceEngine::new().compute(terms, history)
}
