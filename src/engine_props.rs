//! Property-based tests for the balance engine.
//!
//! Terms and collection histories are generated over a small calendar window
//! so every case mixes pre-due, post-due and overpaying collections.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::decimal::{Money, Rate};
use crate::engine::{compute_balance, BalanceEngine};
use crate::interest::calendar_days_between;
use crate::payments::CollectionHistory;
use crate::types::{Collection, LoanTerms};

fn disbursal() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

/// 0.00 to 100,000.00
fn amount() -> impl Strategy<Value = Money> {
    (0i64..10_000_000i64).prop_map(|paise| Money::from_minor(paise, 2))
}

/// 0.00% to 5.00% per day
fn daily_rate() -> impl Strategy<Value = Rate> {
    (0i64..=500i64).prop_map(|bps| Rate::from_percent(Decimal::new(bps, 2)))
}

fn loan_terms() -> impl Strategy<Value = LoanTerms> {
    (amount(), 1u32..120, daily_rate(), daily_rate(), 0i64..240).prop_map(
        |(principal, tenure_days, normal, penalty, as_of_offset)| LoanTerms {
            principal,
            tenure_days,
            daily_rate_normal: normal,
            daily_rate_penalty: penalty,
            disbursal_date: disbursal(),
            due_date: disbursal() + Duration::days(i64::from(tenure_days)),
            as_of_date: disbursal() + Duration::days(as_of_offset),
        },
    )
}

/// as-of on or before the due date
fn current_terms() -> impl Strategy<Value = LoanTerms> {
    loan_terms().prop_flat_map(|t| {
        let span = i64::from(t.tenure_days);
        (Just(t), 0i64..=span).prop_map(|(mut t, offset)| {
            t.as_of_date = t.disbursal_date + Duration::days(offset);
            t
        })
    })
}

/// as-of at least one day past the due date
fn overdue_terms() -> impl Strategy<Value = LoanTerms> {
    loan_terms().prop_flat_map(|t| {
        (Just(t), 1i64..120).prop_map(|(mut t, late)| {
            t.as_of_date = t.due_date + Duration::days(late);
            t
        })
    })
}

/// up to six collections in arbitrary ledger order
fn collections() -> impl Strategy<Value = Vec<Collection>> {
    prop::collection::vec(
        (amount(), 0i64..240).prop_map(|(amount, offset)| {
            Collection::new(amount, disbursal() + Duration::days(offset))
        }),
        0..6,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// the payable amount is always the exact sum of its parts
    #[test]
    fn prop_repay_amount_is_sum_of_parts(terms in loan_terms(), ledger in collections()) {
        let history = CollectionHistory::from_ledger_order(ledger).unwrap();
        let result = compute_balance(&terms, &history);

        prop_assert_eq!(
            result.current_repay_amount,
            result.outstanding_principal + result.total_interest + result.penalty_interest
        );
    }

    /// nothing ever goes negative, however much is collected
    #[test]
    fn prop_figures_never_negative(terms in loan_terms(), ledger in collections()) {
        let history = CollectionHistory::from_ledger_order(ledger).unwrap();
        let result = compute_balance(&terms, &history);

        prop_assert!(!result.outstanding_principal.is_negative());
        prop_assert!(!result.total_interest.is_negative());
        prop_assert!(!result.penalty_interest.is_negative());
        prop_assert!(!result.current_repay_amount.is_negative());
        for applied in &result.applications {
            prop_assert!(!applied.discarded.is_negative());
        }
    }

    /// collections only ever reduce principal
    #[test]
    fn prop_principal_never_grows(terms in loan_terms(), ledger in collections()) {
        let history = CollectionHistory::from_ledger_order(ledger).unwrap();
        let result = compute_balance(&terms, &history);

        prop_assert!(result.outstanding_principal <= terms.principal);
    }

    /// every collected unit is either applied or discarded
    #[test]
    fn prop_collections_fully_accounted(terms in loan_terms(), ledger in collections()) {
        let history = CollectionHistory::from_ledger_order(ledger).unwrap();
        let result = compute_balance(&terms, &history);

        prop_assert_eq!(result.applications.len(), history.len());
        for applied in &result.applications {
            prop_assert_eq!(applied.total_applied() + applied.discarded, applied.collected_amount);
        }
    }

    /// without collections and before the due date, interest is plain simple interest to as-of
    #[test]
    fn prop_no_collections_before_due(terms in current_terms()) {
        let result = compute_balance(&terms, &CollectionHistory::empty());
        let days = calendar_days_between(terms.disbursal_date, terms.as_of_date);

        prop_assert_eq!(
            result.total_interest,
            terms.principal.daily_interest(terms.daily_rate_normal, days)
        );
        prop_assert_eq!(result.penalty_interest, Money::ZERO);
        prop_assert_eq!(result.penalty_days, 0);
        prop_assert_eq!(result.outstanding_principal, terms.principal);
    }

    /// without collections and after the due date, penalty days are the days overdue
    #[test]
    fn prop_no_collections_after_due(terms in overdue_terms()) {
        let result = compute_balance(&terms, &CollectionHistory::empty());

        prop_assert_eq!(
            result.penalty_days,
            calendar_days_between(terms.due_date, terms.as_of_date)
        );
        prop_assert_eq!(
            result.total_interest,
            terms.principal.daily_interest(terms.daily_rate_normal, terms.tenure_days)
        );
    }

    /// same inputs, same output
    #[test]
    fn prop_idempotent(terms in loan_terms(), ledger in collections()) {
        let history = CollectionHistory::from_ledger_order(ledger).unwrap();
        let engine = BalanceEngine::new();

        prop_assert_eq!(engine.compute(&terms, &history), engine.compute(&terms, &history));
    }
}
