/// pre-approval under conforming and FHA limits
use mortgage_calc_rs::{
    evaluate_pre_approval, AffordabilityInputs, Decimal, Money, UnderwritingThresholds,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let inputs = AffordabilityInputs {
        annual_income: Money::from_major(80_000),
        monthly_debts: Money::from_major(500),
        loan_amount: Money::from_major(300_000),
        annual_rate_percent: Decimal::new(65, 1),
        term_years: 30,
        down_payment: Money::from_major(60_000),
    };

    for (label, thresholds) in [
        ("conforming", UnderwritingThresholds::conforming()),
        ("fha", UnderwritingThresholds::fha()),
    ] {
        let result = evaluate_pre_approval(&inputs, &thresholds)?;
        println!("[{label}] approved: {}", result.approved);
        println!("  dti {}%  front-end {}%", result.debt_to_income_ratio_percent, result.front_end_ratio_percent);
        println!("  max qualifying loan: {}", result.max_qualifying_loan_amount);
        println!("  required income:     {}", result.required_annual_income);
        println!("  {}", result.explanation);
    }

    Ok(())
}
