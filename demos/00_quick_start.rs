/// quick start - compute a balance from terms and a collection history
use loan_repayment_rs::chrono::NaiveDate;
use loan_repayment_rs::{compute_balance, Collection, CollectionHistory, LoanProduct, Money};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let disbursed = NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("bad date")?;
    let as_of = NaiveDate::from_ymd_opt(2024, 2, 10).ok_or("bad date")?;

    let terms = LoanProduct::short_term().terms(Money::from_major(10_000), disbursed, as_of);

    // ledger order: newest first
    let history = CollectionHistory::from_ledger_order(vec![
        Collection::new(
            Money::from_major(1_000),
            NaiveDate::from_ymd_opt(2024, 2, 5).ok_or("bad date")?,
        ),
        Collection::new(
            Money::from_major(3_000),
            NaiveDate::from_ymd_opt(2024, 1, 11).ok_or("bad date")?,
        ),
    ])?;

    let result = compute_balance(&terms, &history);

    println!("outstanding principal: {}", result.outstanding_principal.round_dp(2));
    println!("interest:              {}", result.total_interest.round_dp(2));
    println!("penalty interest:      {}", result.penalty_interest.round_dp(2));
    println!("penalty days:          {}", result.penalty_days);
    println!("amount to repay:       {}", result.current_repay_amount.round_dp(2));

    Ok(())
}
