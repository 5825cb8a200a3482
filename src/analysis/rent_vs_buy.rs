use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amortization::{monthly_payment, Amortizer};
use crate::config::RentVsBuyMethod;
use crate::decimal::{Money, Rate};
use crate::errors::{MortgageError, Result};
use crate::types::{LoanTerms, RentVsBuyInputs};

/// position of both choices at the end of a year
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyComparisonPoint {
    pub year: u32,
    pub cumulative_rent_cost: Money,
    pub cumulative_buy_cost: Money,
    pub home_value: Money,
    pub remaining_balance: Money,
    pub home_equity: Money,
    /// equity minus everything spent on owning
    pub net_buy_position: Money,
    /// minus everything spent on renting
    pub net_rent_position: Money,
    pub is_buy_ahead_of_rent: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RentVsBuyOutcome {
    /// first year in which buying comes out ahead
    BuyAheadFrom { year: u32 },
    RentingRemainsAhead,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentVsBuyProjection {
    pub loan_amount: Money,
    pub monthly_payment: Money,
    /// mortgage payment plus monthly share of tax, insurance and maintenance
    pub monthly_ownership_cost: Money,
    pub method: RentVsBuyMethod,
    pub points: Vec<YearlyComparisonPoint>,
    pub outcome: RentVsBuyOutcome,
}

impl RentVsBuyProjection {
    pub fn break_even_year(&self) -> Option<u32> {
        match self.outcome {
            RentVsBuyOutcome::BuyAheadFrom { year } => Some(year),
            RentVsBuyOutcome::RentingRemainsAhead => None,
        }
    }

    pub fn final_point(&self) -> Option<&YearlyComparisonPoint> {
        self.points.last()
    }
}

/// how the mortgage balance comes down year over year
enum Paydown {
    /// nothing borrowed, or the loan is gone
    Clear,
    Monthly(Amortizer),
    Yearly {
        balance: Money,
        payment: Money,
        annual_rate: Rate,
        years_left: u32,
    },
}

impl Paydown {
    fn new(loan: Option<(LoanTerms, Money)>, method: RentVsBuyMethod) -> Self {
        let Some((terms, payment)) = loan else {
            return Paydown::Clear;
        };
        match method {
            RentVsBuyMethod::MonthlyAmortization => {
                Paydown::Monthly(Amortizer::new(&terms, payment, NaiveDate::default()))
            }
            RentVsBuyMethod::YearlyApproximation => Paydown::Yearly {
                balance: terms.principal,
                payment,
                annual_rate: terms.annual_rate(),
                years_left: terms.term_years,
            },
        }
    }

    fn balance(&self) -> Money {
        match self {
            Paydown::Clear => Money::ZERO,
            Paydown::Monthly(amortizer) => amortizer.balance(),
            Paydown::Yearly { balance, .. } => *balance,
        }
    }

    /// mortgage payments made over the next year
    fn advance_year(&mut self) -> Result<Money> {
        match self {
            Paydown::Clear => Ok(Money::ZERO),
            Paydown::Monthly(amortizer) => {
                let mut paid = Money::ZERO;
                for _ in 0..12 {
                    if amortizer.is_finished() {
                        break;
                    }
                    paid += amortizer.step(Money::ZERO)?.total_payment;
                }
                Ok(paid)
            }
            Paydown::Yearly {
                balance,
                payment,
                annual_rate,
                years_left,
            } => {
                if !balance.is_positive() || *years_left == 0 {
                    return Ok(Money::ZERO);
                }
                let paid = *payment * Decimal::from(12);
                // a full year of interest on the opening balance, no monthly compounding
                let principal = (paid - balance.apply_rate(*annual_rate)).max(Money::ZERO);
                *balance = (*balance - principal).max(Money::ZERO);
                *years_left -= 1;
                Ok(paid)
            }
        }
    }
}

fn grow(amount: Money, factor: Decimal, what: &str) -> Result<Money> {
    amount
        .checked_mul(factor)
        .ok_or_else(|| MortgageError::overflow(what))
}

/// year-by-year cost of renting versus buying the same home
///
/// Buying starts out down payment plus closing costs behind; renting starts at
/// zero. Rent grows at the start of each following year, the home appreciates
/// at the end of each year.
pub fn project_rent_vs_buy(
    inputs: &RentVsBuyInputs,
    method: RentVsBuyMethod,
) -> Result<RentVsBuyProjection> {
    inputs.validate()?;

    let loan_amount = inputs.loan_amount();
    let loan = if loan_amount.is_positive() {
        let terms = LoanTerms::new(loan_amount, inputs.annual_rate_percent, inputs.term_years)?;
        let payment = monthly_payment(&terms)?;
        Some((terms, payment))
    } else {
        None
    };
    let payment = loan.as_ref().map(|(_, payment)| *payment).unwrap_or(Money::ZERO);
    let mut paydown = Paydown::new(loan, method);

    let appreciation = Rate::from_percent(inputs.appreciation_percent).growth_factor();
    let rent_growth = Rate::from_percent(inputs.rent_growth_percent).growth_factor();
    let ownership_costs = inputs.annual_ownership_costs();

    let mut home_value = inputs.home_price;
    let mut current_rent = inputs.monthly_rent;
    let mut cumulative_rent_cost = Money::ZERO;
    let mut cumulative_buy_cost = inputs.down_payment + inputs.closing_costs;

    let mut points = Vec::with_capacity(inputs.horizon_years as usize);
    for year in 1..=inputs.horizon_years {
        if year > 1 {
            current_rent = grow(current_rent, rent_growth, "monthly rent")?;
        }
        cumulative_rent_cost = current_rent
            .checked_mul(Decimal::from(12))
            .and_then(|yearly_rent| cumulative_rent_cost.checked_add(yearly_rent))
            .ok_or_else(|| MortgageError::overflow(format!("rent paid by year {year}")))?;
        cumulative_buy_cost += paydown.advance_year()? + ownership_costs;
        home_value = grow(home_value, appreciation, "home value")?;

        let remaining_balance = paydown.balance();
        debug_assert!(!remaining_balance.is_negative());
        let home_equity = home_value - remaining_balance;
        let net_buy_position = home_equity - cumulative_buy_cost;
        let net_rent_position = -cumulative_rent_cost;

        points.push(YearlyComparisonPoint {
            year,
            cumulative_rent_cost: cumulative_rent_cost.round_cents(),
            cumulative_buy_cost: cumulative_buy_cost.round_cents(),
            home_value: home_value.round_cents(),
            remaining_balance: remaining_balance.round_cents(),
            home_equity: home_equity.round_cents(),
            net_buy_position: net_buy_position.round_cents(),
            net_rent_position: net_rent_position.round_cents(),
            is_buy_ahead_of_rent: net_buy_position > net_rent_position,
        });
    }

    let outcome = points
        .iter()
        .find(|point| point.is_buy_ahead_of_rent)
        .map(|point| RentVsBuyOutcome::BuyAheadFrom { year: point.year })
        .unwrap_or(RentVsBuyOutcome::RentingRemainsAhead);

    let monthly_ownership_cost = (payment + ownership_costs / Decimal::from(12)).round_cents();

    tracing::debug!(
        loan_amount = %loan_amount,
        monthly_payment = %payment,
        horizon_years = inputs.horizon_years,
        outcome = ?outcome,
        "rent vs buy projected"
    );

    Ok(RentVsBuyProjection {
        loan_amount,
        monthly_payment: payment,
        monthly_ownership_cost,
        method,
        points,
        outcome,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn starter_home(monthly_rent: i64) -> RentVsBuyInputs {
        RentVsBuyInputs {
            home_price: Money::from_major(400_000),
            down_payment: Money::from_major(80_000),
            annual_rate_percent: dec!(6.8),
            term_years: 30,
            monthly_rent: Money::from_major(monthly_rent),
            rent_growth_percent: dec!(3),
            appreciation_percent: dec!(3.5),
            annual_property_tax: Money::from_major(4_800),
            annual_insurance: Money::from_major(1_200),
            annual_maintenance: Money::from_major(6_000),
            closing_costs: Money::from_major(8_000),
            horizon_years: 10,
        }
    }

    #[test]
    fn test_first_year_positions() {
        let projection =
            project_rent_vs_buy(&starter_home(2_500), RentVsBuyMethod::MonthlyAmortization).unwrap();

        assert_eq!(projection.loan_amount, Money::from_major(320_000));
        assert_eq!(projection.monthly_payment, Money::from_decimal(dec!(2086.16)));
        assert_eq!(projection.monthly_ownership_cost, Money::from_decimal(dec!(3086.16)));
        assert_eq!(projection.points.len(), 10);

        let first = &projection.points[0];
        assert_eq!(first.cumulative_rent_cost, Money::from_major(30_000));
        assert_eq!(first.cumulative_buy_cost, Money::from_decimal(dec!(125033.92)));
        assert_eq!(first.home_value, Money::from_major(414_000));
        assert_eq!(first.remaining_balance, Money::from_decimal(dec!(316622.10)));
        assert_eq!(first.net_buy_position, Money::from_decimal(dec!(-27656.02)));
        assert_eq!(first.net_rent_position, Money::from_major(-30_000));
        assert!(first.is_buy_ahead_of_rent);
        assert_eq!(projection.outcome, RentVsBuyOutcome::BuyAheadFrom { year: 1 });
    }

    #[test]
    fn test_yearly_approximation_drifts_from_monthly() {
        let monthly =
            project_rent_vs_buy(&starter_home(2_500), RentVsBuyMethod::MonthlyAmortization).unwrap();
        let approx =
            project_rent_vs_buy(&starter_home(2_500), RentVsBuyMethod::YearlyApproximation).unwrap();

        assert_eq!(approx.points[0].remaining_balance, Money::from_decimal(dec!(316726.08)));
        // simple yearly interest overstates interest, so the balance falls more slowly
        for (m, a) in monthly.points.iter().zip(&approx.points) {
            assert!(a.remaining_balance > m.remaining_balance);
            assert_eq!(a.cumulative_buy_cost, m.cumulative_buy_cost);
        }
    }

    #[test]
    fn test_break_even_later_in_horizon() {
        for method in [RentVsBuyMethod::MonthlyAmortization, RentVsBuyMethod::YearlyApproximation] {
            let projection = project_rent_vs_buy(&starter_home(1_500), method).unwrap();
            assert_eq!(projection.break_even_year(), Some(6));
            assert!(!projection.points[4].is_buy_ahead_of_rent);
        }
    }

    #[test]
    fn test_cheap_rent_stays_ahead() {
        let projection =
            project_rent_vs_buy(&starter_home(800), RentVsBuyMethod::MonthlyAmortization).unwrap();
        assert_eq!(projection.outcome, RentVsBuyOutcome::RentingRemainsAhead);
        assert_eq!(projection.break_even_year(), None);
        assert!(projection.points.iter().all(|p| !p.is_buy_ahead_of_rent));
    }

    #[test]
    fn test_flat_market_is_deterministic() {
        let inputs = RentVsBuyInputs {
            home_price: Money::from_major(300_000),
            down_payment: Money::from_major(60_000),
            annual_rate_percent: dec!(6),
            term_years: 30,
            monthly_rent: Money::from_major(2_000),
            rent_growth_percent: Decimal::ZERO,
            appreciation_percent: Decimal::ZERO,
            annual_property_tax: Money::from_major(3_600),
            annual_insurance: Money::from_major(1_200),
            annual_maintenance: Money::from_major(3_000),
            closing_costs: Money::from_major(6_000),
            horizon_years: 35,
        };
        let a = project_rent_vs_buy(&inputs, RentVsBuyMethod::MonthlyAmortization).unwrap();
        let b = project_rent_vs_buy(&inputs, RentVsBuyMethod::MonthlyAmortization).unwrap();

        assert_eq!(a, b);
        assert_eq!(a.break_even_year(), Some(3));
        assert!(a.points.iter().all(|p| p.home_value == Money::from_major(300_000)));

        // after the loan is paid off only ownership costs accrue
        assert_eq!(a.points[29].remaining_balance, Money::ZERO);
        let after_payoff = a.points[30].cumulative_buy_cost - a.points[29].cumulative_buy_cost;
        assert_eq!(after_payoff, Money::from_major(7_800));
    }

    #[test]
    fn test_runaway_growth_is_calculation_error() {
        let inputs = RentVsBuyInputs {
            appreciation_percent: dec!(100),
            horizon_years: 100,
            ..starter_home(2_500)
        };
        assert!(inputs.validate().is_ok());
        let err = project_rent_vs_buy(&inputs, RentVsBuyMethod::MonthlyAmortization).unwrap_err();
        assert!(matches!(err, MortgageError::CalculationError { .. }));

        let inputs = RentVsBuyInputs {
            rent_growth_percent: dec!(100),
            horizon_years: 100,
            ..starter_home(2_500)
        };
        let err = project_rent_vs_buy(&inputs, RentVsBuyMethod::YearlyApproximation).unwrap_err();
        assert!(matches!(err, MortgageError::CalculationError { .. }));
    }

    #[test]
    fn test_doubling_home_value_within_range() {
        let inputs = RentVsBuyInputs {
            appreciation_percent: dec!(100),
            horizon_years: 20,
            ..starter_home(2_500)
        };
        let projection = project_rent_vs_buy(&inputs, RentVsBuyMethod::MonthlyAmortization).unwrap();
        let last = projection.final_point().unwrap();
        assert_eq!(last.year, 20);
        assert_eq!(last.home_value, Money::from_major(400_000 * (1 << 20)));
    }

    #[test]
    fn test_cash_purchase() {
        let inputs = RentVsBuyInputs {
            down_payment: Money::from_major(400_000),
            ..starter_home(2_500)
        };
        let projection = project_rent_vs_buy(&inputs, RentVsBuyMethod::MonthlyAmortization).unwrap();

        assert_eq!(projection.loan_amount, Money::ZERO);
        assert_eq!(projection.monthly_payment, Money::ZERO);
        assert!(projection.points.iter().all(|p| p.remaining_balance == Money::ZERO));
        assert_eq!(projection.points[0].home_equity, projection.points[0].home_value);
    }
}
