use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::Result;
use crate::types::LoanTerms;

use super::{monthly_payment, Amortizer};

/// one row of an amortization schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentLineItem {
    pub payment_number: u32,
    pub payment_date: NaiveDate,
    /// principal repaid by this payment, extra principal included
    pub principal_portion: Money,
    pub interest_portion: Money,
    /// part of `principal_portion` paid on top of the scheduled amount
    #[serde(default)]
    pub extra_principal: Money,
    pub total_payment: Money,
    pub remaining_balance: Money,
}

/// payments grouped by loan year (payments 1-12 are year 1)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlySummary {
    pub year: u32,
    pub principal: Money,
    pub interest: Money,
    pub extra_principal: Money,
    pub total_payment: Money,
    pub ending_balance: Money,
}

/// amortization schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationSchedule {
    pub terms: LoanTerms,
    pub start_date: NaiveDate,
    pub monthly_payment: Money,
    pub payments: Vec<PaymentLineItem>,
}

impl AmortizationSchedule {
    /// generate the full schedule, one row per nominal payment
    ///
    /// Payment `n` falls `n` months after `start_date`. The final payment is
    /// adjusted so the balance ends at exactly zero.
    pub fn generate(terms: &LoanTerms, start_date: NaiveDate) -> Result<Self> {
        let payment = monthly_payment(terms)?;
        let mut amortizer = Amortizer::new(terms, payment, start_date);

        let mut payments = Vec::with_capacity(terms.payment_count() as usize);
        while payments.len() < terms.payment_count() as usize {
            payments.push(amortizer.step(Money::ZERO)?);
        }
        debug_assert!(amortizer.balance().is_zero());

        let schedule = Self {
            terms: terms.clone(),
            start_date,
            monthly_payment: payment,
            payments,
        };

        tracing::debug!(
            principal = %terms.principal,
            rate = %terms.annual_rate_percent,
            term_years = terms.term_years,
            monthly_payment = %payment,
            total_interest = %schedule.total_interest(),
            "amortization schedule generated"
        );

        Ok(schedule)
    }

    pub fn len(&self) -> usize {
        self.payments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payments.is_empty()
    }

    /// get payment by its 1-based number
    pub fn payment(&self, payment_number: u32) -> Option<&PaymentLineItem> {
        let index = payment_number.checked_sub(1)? as usize;
        self.payments.get(index)
    }

    /// balance left after the given payment, the full principal before the first
    pub fn balance_after_payment(&self, payment_number: u32) -> Money {
        self.payment(payment_number)
            .map(|p| p.remaining_balance)
            .unwrap_or(self.terms.principal)
    }

    pub fn total_interest(&self) -> Money {
        self.payments.iter().map(|p| p.interest_portion).sum()
    }

    pub fn total_principal(&self) -> Money {
        self.payments.iter().map(|p| p.principal_portion).sum()
    }

    pub fn total_extra_principal(&self) -> Money {
        self.payments.iter().map(|p| p.extra_principal).sum()
    }

    pub fn total_paid(&self) -> Money {
        self.payments.iter().map(|p| p.total_payment).sum()
    }

    pub fn final_balance(&self) -> Money {
        self.payments
            .last()
            .map(|p| p.remaining_balance)
            .unwrap_or(self.terms.principal)
    }

    pub fn payoff_date(&self) -> Option<NaiveDate> {
        self.payments.last().map(|p| p.payment_date)
    }

    /// roll the monthly rows up into loan years
    pub fn yearly_summary(&self) -> Vec<YearlySummary> {
        self.payments
            .chunks(12)
            .enumerate()
            .map(|(i, year)| YearlySummary {
                year: i as u32 + 1,
                principal: year.iter().map(|p| p.principal_portion).sum(),
                interest: year.iter().map(|p| p.interest_portion).sum(),
                extra_principal: year.iter().map(|p| p.extra_principal).sum(),
                total_payment: year.iter().map(|p| p.total_payment).sum(),
                ending_balance: year
                    .last()
                    .map(|p| p.remaining_balance)
                    .unwrap_or(Money::ZERO),
            })
            .collect()
    }
}

/// `AmortizationSchedule::generate` from loose scalars
pub fn generate_schedule(
    principal: Money,
    annual_rate_percent: Decimal,
    term_years: u32,
    start_date: NaiveDate,
) -> Result<AmortizationSchedule> {
    AmortizationSchedule::generate(
        &LoanTerms::new(principal, annual_rate_percent, term_years)?,
        start_date,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn test_thirty_year_schedule_shape() {
        let schedule = generate_schedule(Money::from_major(300_000), dec!(6.5), 30, start()).unwrap();

        assert_eq!(schedule.len(), 360);
        assert_eq!(schedule.monthly_payment, Money::from_decimal(dec!(1896.20)));

        let first = schedule.payment(1).unwrap();
        assert_eq!(first.interest_portion, Money::from_decimal(dec!(1625.00)));
        assert_eq!(first.principal_portion, Money::from_decimal(dec!(271.20)));
        assert_eq!(first.remaining_balance, Money::from_decimal(dec!(299728.80)));
        assert_eq!(first.payment_date, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());

        let last = schedule.payment(360).unwrap();
        assert_eq!(last.payment_date, NaiveDate::from_ymd_opt(2054, 1, 1).unwrap());
        assert_eq!(last.remaining_balance, Money::ZERO);
    }

    #[test]
    fn test_final_payment_absorbs_rounding() {
        let schedule = generate_schedule(Money::from_major(300_000), dec!(6.5), 30, start()).unwrap();
        let last = schedule.payments.last().unwrap();

        // the last payment differs from the regular one, the balance still ends at zero
        assert_eq!(schedule.final_balance(), Money::ZERO);
        assert_eq!(last.principal_portion + last.interest_portion, last.total_payment);
        assert!((last.total_payment - schedule.monthly_payment).abs() < Money::from_major(10));
        assert_eq!(schedule.total_principal(), Money::from_major(300_000));
    }

    #[test]
    fn test_rows_balance_exactly() {
        let schedule = generate_schedule(Money::from_major(185_000), dec!(5.875), 15, start()).unwrap();
        for row in &schedule.payments {
            assert_eq!(row.principal_portion + row.interest_portion, row.total_payment);
            assert_eq!(row.extra_principal, Money::ZERO);
        }
        for pair in schedule.payments.windows(2) {
            assert!(pair[1].remaining_balance < pair[0].remaining_balance);
            assert_eq!(pair[1].payment_number, pair[0].payment_number + 1);
        }
    }

    #[test]
    fn test_zero_rate_schedule() {
        let schedule = generate_schedule(Money::from_major(100_000), dec!(0), 30, start()).unwrap();
        assert_eq!(schedule.len(), 360);
        assert_eq!(schedule.total_interest(), Money::ZERO);
        assert_eq!(schedule.total_principal(), Money::from_major(100_000));
        assert_eq!(schedule.final_balance(), Money::ZERO);
        // 100000 / 360 = 277.777..., so the last payment is a little smaller
        let last = schedule.payments.last().unwrap();
        assert!(last.total_payment < schedule.monthly_payment);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = generate_schedule(Money::from_major(420_000), dec!(6.125), 30, start()).unwrap();
        let b = generate_schedule(Money::from_major(420_000), dec!(6.125), 30, start()).unwrap();
        assert_eq!(a, b);
        assert_eq!(serde_json::to_vec(&a).unwrap(), serde_json::to_vec(&b).unwrap());
    }

    #[test]
    fn test_fifty_year_term() {
        let schedule = generate_schedule(Money::from_major(500_000), dec!(7), 50, start()).unwrap();
        assert_eq!(schedule.len(), 600);
        assert_eq!(schedule.final_balance(), Money::ZERO);
    }

    #[test]
    fn test_yearly_summary() {
        let schedule = generate_schedule(Money::from_major(200_000), dec!(6), 30, start()).unwrap();
        let years = schedule.yearly_summary();

        assert_eq!(years.len(), 30);
        assert_eq!(years[0].year, 1);
        assert_eq!(years[0].ending_balance, schedule.balance_after_payment(12));
        assert_eq!(years[29].ending_balance, Money::ZERO);

        let principal: Money = years.iter().map(|y| y.principal).sum();
        let interest: Money = years.iter().map(|y| y.interest).sum();
        assert_eq!(principal, schedule.total_principal());
        assert_eq!(interest, schedule.total_interest());
    }

    #[test]
    fn test_payment_lookup_bounds() {
        let schedule = generate_schedule(Money::from_major(10_000), dec!(5), 1, start()).unwrap();
        assert!(schedule.payment(0).is_none());
        assert!(schedule.payment(13).is_none());
        assert_eq!(schedule.balance_after_payment(0), Money::from_major(10_000));
    }

    #[test]
    fn test_high_rate_long_term_has_no_balloon() {
        let schedule = generate_schedule(Money::from_major(100_000), dec!(30), 60, start()).unwrap();
        let payment = schedule.monthly_payment;

        assert_eq!(schedule.len(), 720);
        assert_eq!(schedule.payments[0].principal_portion, Money::CENT);
        assert!(schedule.payments.iter().all(|p| p.total_payment <= payment));
        // the cent above the exact payment compounds into an early payoff
        assert!(schedule.balance_after_payment(506).is_positive());
        assert_eq!(schedule.balance_after_payment(507), Money::ZERO);
        assert_eq!(schedule.final_balance(), Money::ZERO);
        assert_eq!(schedule.total_principal(), Money::from_major(100_000));
    }
}
