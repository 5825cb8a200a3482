/// comparing extra-payment strategies on the same loan
use mortgage_calc_rs::chrono::NaiveDate;
use mortgage_calc_rs::{compare_scenarios, Decimal, ExtraPaymentScenario, LoanTerms, Money};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let terms = LoanTerms::new(Money::from_major(300_000), Decimal::new(65, 1), 30)?;
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("bad date")?;

    let scenarios = vec![
        ExtraPaymentScenario::monthly(Money::from_major(200)).named("$200 every month"),
        ExtraPaymentScenario::yearly(Money::from_major(2_400)).named("$2,400 every year"),
        ExtraPaymentScenario::one_time(Money::from_major(20_000), 12).named("$20,000 bonus"),
    ];

    for result in compare_scenarios(&terms, &scenarios, start)? {
        println!(
            "{:<20} payments {:>3}  saved {}y {}m  interest saved {}",
            result.scenario.name.as_deref().unwrap_or("unnamed"),
            result.total_payments_made,
            result.term_reduction_years,
            result.term_reduction_months,
            result.interest_savings,
        );
    }

    Ok(())
}
