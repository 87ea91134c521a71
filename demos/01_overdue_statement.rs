/// overdue statement - a loan account followed through controlled time
use loan_repayment_rs::chrono::{Duration, TimeZone, Utc};
use loan_repayment_rs::{Event, LoanAccount, LoanProduct, Money, SafeTimeProvider, TimeSource};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap()
    ));
    let controller = time.test_control().unwrap();

    let mut loan = LoanAccount::originate(
        LoanProduct::salary_advance(),
        Money::from_major(20_000),
        time.now().date_naive(),
    )?;
    println!("loan {} due on {}", loan.id, loan.due_date());

    // part payment a week in
    controller.advance(Duration::days(7));
    loan.record_collection(Money::from_major(5_000), time.now().date_naive())?;

    // nothing more until well past the due date
    controller.advance(Duration::days(20));
    let result = loan.statement(&time)?;
    println!("\nas of {}:", time.now().format("%Y-%m-%d"));
    println!("  principal  {}", result.outstanding_principal.round_dp(2));
    println!("  interest   {}", result.total_interest.round_dp(2));
    println!(
        "  penalty    {} over {} days",
        result.penalty_interest.round_dp(2),
        result.penalty_days
    );
    println!("  to repay   {}", result.current_repay_amount.round_dp(2));

    // settle with a large collection
    loan.record_collection(Money::from_major(40_000), time.now().date_naive())?;
    let result = loan.statement(&time)?;
    println!("\nafter settlement: {}", result.current_repay_amount.round_dp(2));

    for event in loan.events.take_events() {
        if let Event::OverpaymentDiscarded { amount, .. } = event {
            println!("discarded overpayment of {}", amount.round_dp(2));
        }
    }

    Ok(())
}
