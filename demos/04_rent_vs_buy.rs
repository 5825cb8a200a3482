/// ten years of renting versus buying
use mortgage_calc_rs::{
    project_rent_vs_buy, Decimal, Money, RentVsBuyInputs, RentVsBuyMethod, RentVsBuyOutcome,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let inputs = RentVsBuyInputs {
        home_price: Money::from_major(400_000),
        down_payment: Money::from_major(80_000),
        annual_rate_percent: Decimal::new(68, 1),
        term_years: 30,
        monthly_rent: Money::from_major(1_500),
        rent_growth_percent: Decimal::from(3),
        appreciation_percent: Decimal::new(35, 1),
        annual_property_tax: Money::from_major(4_800),
        annual_insurance: Money::from_major(1_200),
        annual_maintenance: Money::from_major(6_000),
        closing_costs: Money::from_major(8_000),
        horizon_years: 10,
    };

    let projection = project_rent_vs_buy(&inputs, RentVsBuyMethod::MonthlyAmortization)?;
    println!("monthly cost of owning: {}", projection.monthly_ownership_cost);
    for point in &projection.points {
        println!(
            "year {:>2}: rent {:>12}  buy {:>12}  equity {:>12}  {}",
            point.year,
            point.cumulative_rent_cost,
            point.cumulative_buy_cost,
            point.home_equity,
            if point.is_buy_ahead_of_rent { "buy ahead" } else { "rent ahead" },
        );
    }

    match projection.outcome {
        RentVsBuyOutcome::BuyAheadFrom { year } => println!("buying pulls ahead in year {year}"),
        RentVsBuyOutcome::RentingRemainsAhead => println!("renting remains ahead"),
    }
    Ok(())
}
