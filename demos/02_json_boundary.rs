/// json boundary - the request/response shape used by loan-detail handlers
use loan_repayment_rs::{current_repay_amount, PresentationConfig, RepaymentQuery};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let request = r#"{
        "principal": "15000",
        "tenure": 30,
        "roi": "1",
        "penaltyRoi": "2",
        "amtApproved": "12000",
        "disbursalDate": "2024-05-01",
        "repaymentDate": "2024-05-31",
        "currentDate": "2024-06-12T09:15:00+05:30",
        "collections": [
            { "collected_amount": "2500", "collected_date": "2024-06-04" },
            { "collected_amount": "4000", "collected_date": "2024-05-16" }
        ]
    }"#;

    let query: RepaymentQuery = serde_json::from_str(request)?;
    let summary = current_repay_amount(query, &PresentationConfig::default())?;

    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
