/// should I refinance?
use mortgage_calc_rs::{analyze_refinance, BreakEven, Decimal, Money, RefinanceInputs};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let inputs = RefinanceInputs {
        current_balance: Money::from_major(350_000),
        current_rate_percent: Decimal::new(725, 2),
        current_term_years_remaining: 30,
        new_rate_percent: Decimal::new(65, 1),
        new_term_years: 30,
        closing_costs: Money::from_major(5_000),
        cash_out: Money::ZERO,
    };

    let result = analyze_refinance(&inputs)?;
    println!("current payment: {}", result.current_monthly_payment);
    println!("new payment:     {}", result.new_monthly_payment);
    println!("monthly savings: {}", result.monthly_savings);
    match result.break_even {
        BreakEven::After { months } => println!("break-even after {months} months"),
        BreakEven::Never => println!("never breaks even"),
    }
    println!("lifetime interest saved: {}", result.total_interest_savings);
    println!("worth it: {}", result.worth_refinancing);

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
