/// quick start - minimal example to get started
use mortgage_calc_rs::chrono::NaiveDate;
use mortgage_calc_rs::{AmortizationSchedule, Decimal, LoanTerms, Money};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // $300,000 at 6.5% over 30 years
    let terms = LoanTerms::new(Money::from_major(300_000), Decimal::new(65, 1), 30)?;
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("bad date")?;

    let schedule = AmortizationSchedule::generate(&terms, start)?;

    println!("monthly payment: {}", schedule.monthly_payment);
    println!("total interest:  {}", schedule.total_interest());
    println!("payoff date:     {:?}", schedule.payoff_date());

    for year in schedule.yearly_summary().iter().take(3) {
        println!(
            "year {:>2}: principal {} interest {} balance {}",
            year.year, year.principal, year.interest, year.ending_balance
        );
    }

    Ok(())
}
