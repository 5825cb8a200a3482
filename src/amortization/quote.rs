use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::analysis::ratios::loan_to_value_percent;
use crate::decimal::Money;
use crate::errors::Result;
use crate::types::MortgageRequest;

use super::schedule::AmortizationSchedule;

/// full monthly housing cost for a loan, principal and interest plus escrow items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MortgageQuote {
    pub principal_and_interest: Money,
    pub monthly_property_tax: Money,
    pub monthly_home_insurance: Money,
    pub monthly_pmi: Money,
    pub monthly_hoa: Money,
    pub total_monthly_payment: Money,
    /// sum of all principal and interest payments over the schedule
    pub total_of_payments: Money,
    pub total_interest: Money,
    pub loan_to_value_percent: Option<Decimal>,
    pub schedule: AmortizationSchedule,
}

impl MortgageQuote {
    /// the escrowed part of the monthly payment
    pub fn monthly_escrow(&self) -> Money {
        self.monthly_property_tax + self.monthly_home_insurance + self.monthly_pmi + self.monthly_hoa
    }
}

/// quote a mortgage, the local equivalent of the remote calculate endpoint
///
/// When only a down payment is given, the property value is taken as
/// principal plus down payment.
pub fn quote_mortgage(request: &MortgageRequest, start_date: NaiveDate) -> Result<MortgageQuote> {
    request.validate()?;

    let schedule = AmortizationSchedule::generate(&request.terms, start_date)?;
    let principal_and_interest = schedule.monthly_payment;

    let property_value = request
        .property_value
        .or_else(|| request.down_payment.map(|down| request.terms.principal + down));
    let loan_to_value_percent =
        property_value.map(|value| loan_to_value_percent(request.terms.principal, value).round_dp(2));

    let total_monthly_payment = (principal_and_interest
        + request.monthly_property_tax
        + request.monthly_home_insurance
        + request.monthly_pmi
        + request.monthly_hoa)
        .round_cents();

    tracing::debug!(
        principal = %request.terms.principal,
        principal_and_interest = %principal_and_interest,
        total_monthly_payment = %total_monthly_payment,
        "mortgage quoted"
    );

    Ok(MortgageQuote {
        principal_and_interest,
        monthly_property_tax: request.monthly_property_tax,
        monthly_home_insurance: request.monthly_home_insurance,
        monthly_pmi: request.monthly_pmi,
        monthly_hoa: request.monthly_hoa,
        total_monthly_payment,
        total_of_payments: schedule.total_paid(),
        total_interest: schedule.total_interest(),
        loan_to_value_percent,
        schedule,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LoanTerms;
    use rust_decimal_macros::dec;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn test_quote_adds_escrow_items() {
        let mut request =
            MortgageRequest::new(LoanTerms::new(Money::from_major(300_000), dec!(6.5), 30).unwrap());
        request.property_value = Some(Money::from_major(375_000));
        request.monthly_property_tax = Money::from_major(400);
        request.monthly_home_insurance = Money::from_major(100);
        request.monthly_hoa = Money::from_major(50);

        let quote = quote_mortgage(&request, start()).unwrap();

        assert_eq!(quote.principal_and_interest, Money::from_decimal(dec!(1896.20)));
        assert_eq!(quote.monthly_escrow(), Money::from_major(550));
        assert_eq!(quote.total_monthly_payment, Money::from_decimal(dec!(2446.20)));
        assert_eq!(quote.loan_to_value_percent, Some(dec!(80)));
        assert_eq!(quote.total_of_payments, quote.schedule.total_paid());
        assert_eq!(
            quote.total_of_payments - quote.total_interest,
            Money::from_major(300_000)
        );
    }

    #[test]
    fn test_property_value_inferred_from_down_payment() {
        let mut request =
            MortgageRequest::new(LoanTerms::new(Money::from_major(360_000), dec!(7), 30).unwrap());
        request.down_payment = Some(Money::from_major(40_000));

        let quote = quote_mortgage(&request, start()).unwrap();
        assert_eq!(quote.loan_to_value_percent, Some(dec!(90)));
    }

    #[test]
    fn test_quote_without_property_has_no_ltv() {
        let request =
            MortgageRequest::new(LoanTerms::new(Money::from_major(100_000), dec!(5), 15).unwrap());
        let quote = quote_mortgage(&request, start()).unwrap();
        assert_eq!(quote.loan_to_value_percent, None);
        assert_eq!(quote.total_monthly_payment, quote.principal_and_interest);
    }
}
