use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::Result;
use crate::types::{ExtraPaymentScenario, LoanTerms};

use super::schedule::AmortizationSchedule;
use super::Amortizer;

/// outcome of paying extra principal on a fixed-rate loan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraPaymentResult {
    pub scenario: ExtraPaymentScenario,
    pub monthly_payment: Money,
    pub total_interest_paid: Money,
    pub total_payments_made: u32,
    pub term_reduction_years: u32,
    /// 0-11, the remainder after `term_reduction_years`
    pub term_reduction_months: u32,
    /// interest of the plain schedule minus interest actually paid
    pub interest_savings: Money,
    pub total_extra_paid: Money,
    pub schedule: AmortizationSchedule,
}

impl ExtraPaymentResult {
    /// nominal payments skipped thanks to the extra principal
    pub fn months_saved(&self) -> u32 {
        self.term_reduction_years * 12 + self.term_reduction_months
    }

    pub fn payoff_date(&self) -> Option<NaiveDate> {
        self.schedule.payoff_date()
    }
}

/// run the loan with extra principal payments until it is paid off
///
/// Extra principal is capped at the outstanding balance; once the balance
/// reaches zero the schedule stops, so nothing paid is left unaccounted for.
pub fn simulate_extra_payments(
    terms: &LoanTerms,
    scenario: &ExtraPaymentScenario,
    start_date: NaiveDate,
) -> Result<ExtraPaymentResult> {
    scenario.validate()?;
    let baseline = AmortizationSchedule::generate(terms, start_date)?;
    simulate_against(&baseline, scenario)
}

/// evaluate several scenarios against the same loan, results in input order
pub fn compare_scenarios(
    terms: &LoanTerms,
    scenarios: &[ExtraPaymentScenario],
    start_date: NaiveDate,
) -> Result<Vec<ExtraPaymentResult>> {
    for scenario in scenarios {
        scenario.validate()?;
    }
    let baseline = AmortizationSchedule::generate(terms, start_date)?;
    scenarios
        .iter()
        .map(|scenario| simulate_against(&baseline, scenario))
        .collect()
}

fn simulate_against(
    baseline: &AmortizationSchedule,
    scenario: &ExtraPaymentScenario,
) -> Result<ExtraPaymentResult> {
    let terms = &baseline.terms;
    let mut amortizer = Amortizer::new(terms, baseline.monthly_payment, baseline.start_date);

    let mut payments = Vec::with_capacity(terms.payment_count() as usize);
    while !amortizer.is_finished() {
        let payment_number = payments.len() as u32 + 1;
        payments.push(amortizer.step(scenario.extra_for_payment(payment_number))?);
    }
    debug_assert!(amortizer.balance().is_zero());

    let schedule = AmortizationSchedule {
        terms: terms.clone(),
        start_date: baseline.start_date,
        monthly_payment: baseline.monthly_payment,
        payments,
    };

    let total_payments_made = schedule.len() as u32;
    debug_assert!(total_payments_made <= terms.payment_count());
    let months_saved = terms.payment_count() - total_payments_made;

    let total_interest_paid = schedule.total_interest();
    let interest_savings = baseline.total_interest() - total_interest_paid;

    tracing::debug!(
        scenario = scenario.name.as_deref().unwrap_or("unnamed"),
        payments_made = total_payments_made,
        months_saved,
        interest_savings = %interest_savings,
        "extra payment scenario simulated"
    );

    Ok(ExtraPaymentResult {
        scenario: scenario.clone(),
        monthly_payment: baseline.monthly_payment,
        total_interest_paid,
        total_payments_made,
        term_reduction_years: months_saved / 12,
        term_reduction_months: months_saved % 12,
        interest_savings,
        total_extra_paid: schedule.total_extra_principal(),
        schedule,
    })
}
