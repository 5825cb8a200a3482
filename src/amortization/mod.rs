pub mod extra_payments;
pub mod quote;
pub mod schedule;

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;

use crate::decimal::{Money, Rate};
use crate::errors::{MortgageError, Result};
use crate::types::LoanTerms;

pub use extra_payments::{compare_scenarios, simulate_extra_payments, ExtraPaymentResult};
pub use quote::{quote_mortgage, MortgageQuote};
pub use schedule::{generate_schedule, AmortizationSchedule, PaymentLineItem, YearlySummary};

/// fixed-rate monthly payment for the given loan, rounded half-up to cents
///
/// `P * r * (1 + r)^n / ((1 + r)^n - 1)`, or `P / n` when the rate is zero.
/// The payment is always at least one cent above the first month's interest,
/// so every payment repays some principal.
pub fn monthly_payment(terms: &LoanTerms) -> Result<Money> {
    terms.validate()?;

    let monthly_rate = terms.monthly_rate();
    let payment = raw_payment(terms.principal, monthly_rate, terms.payment_count())?;
    let rounded = payment.round_cents();
    if rounded.is_zero() {
        return Err(MortgageError::invalid(
            "principal",
            format!(
                "{} is too small to amortize over {} payments",
                terms.principal,
                terms.payment_count()
            ),
        ));
    }

    // long high-rate loans: the exact payment is within half a cent of the interest
    let first_interest = terms.principal.apply_rate(monthly_rate).round_cents();
    if !monthly_rate.is_zero() && rounded <= first_interest {
        return Ok(first_interest + Money::CENT);
    }
    Ok(rounded)
}

/// `monthly_payment` from loose scalars
pub fn compute_monthly_payment(
    principal: Money,
    annual_rate_percent: Decimal,
    term_years: u32,
) -> Result<Money> {
    monthly_payment(&LoanTerms::new(principal, annual_rate_percent, term_years)?)
}

/// interest paid over the life of the plain schedule
pub fn lifetime_interest(terms: &LoanTerms) -> Result<Money> {
    Ok(AmortizationSchedule::generate(terms, NaiveDate::default())?.total_interest())
}

/// largest principal a fixed monthly payment can carry, rounded down to cents
///
/// Inverse of the annuity formula: `A * ((1 + r)^n - 1) / (r * (1 + r)^n)`.
pub fn principal_for_payment(payment: Money, annual_rate: Rate, payment_count: u32) -> Result<Money> {
    if payment.is_negative() {
        return Err(MortgageError::invalid("payment", "must not be negative"));
    }
    if payment_count == 0 {
        return Ok(Money::ZERO);
    }

    let monthly_rate = annual_rate.monthly_rate();
    if monthly_rate.is_zero() {
        return payment
            .checked_mul(Decimal::from(payment_count))
            .map(|principal| principal.floor_cents())
            .ok_or_else(|| MortgageError::overflow(format!("{payment_count} payments of {payment}")));
    }

    let factor = compound_factor(monthly_rate, payment_count)?;
    let r = monthly_rate.as_decimal();
    // A / r * (1 - (1 + r)^-n), the factor only ever divides
    let principal = payment
        .as_decimal()
        .checked_div(r)
        .and_then(|perpetuity| perpetuity.checked_mul((factor - Decimal::ONE) / factor))
        .ok_or_else(|| MortgageError::overflow(format!("principal carried by {payment} at {annual_rate}")))?;
    Ok(Money::from_decimal(principal).floor_cents())
}

/// unrounded annuity payment
pub(crate) fn raw_payment(principal: Money, monthly_rate: Rate, payment_count: u32) -> Result<Money> {
    if payment_count == 0 {
        return Ok(principal);
    }
    if monthly_rate.is_zero() {
        return Ok(principal / Decimal::from(payment_count));
    }

    let r = monthly_rate.as_decimal();
    let factor = compound_factor(monthly_rate, payment_count)?;

    // factor / (factor - 1) first, so a large factor never meets the principal
    let payment = factor
        .checked_div(factor - Decimal::ONE)
        .and_then(|ratio| principal.as_decimal().checked_mul(r)?.checked_mul(ratio))
        .ok_or_else(|| MortgageError::overflow(format!("payment on {principal} at {monthly_rate}")))?;
    Ok(Money::from_decimal(payment))
}

/// `(1 + r)^n`
pub(crate) fn compound_factor(rate: Rate, periods: u32) -> Result<Decimal> {
    let base = rate.growth_factor();
    let mut compound = Decimal::ONE;
    for _ in 0..periods {
        compound = compound
            .checked_mul(base)
            .ok_or_else(|| MortgageError::overflow(format!("compounding {rate} over {periods} periods")))?;
    }
    Ok(compound)
}

/// calendar date `months` after `start`, clamped to the end of shorter months
pub(crate) fn add_months(start: NaiveDate, months: u32) -> Result<NaiveDate> {
    start
        .checked_add_months(Months::new(months))
        .ok_or_else(|| MortgageError::CalculationError {
            message: format!("payment date {months} months after {start} is out of range"),
        })
}

/// one step of a fixed-payment amortization, shared by the plain schedule
/// and the extra-payment simulation
pub(crate) struct Amortizer {
    monthly_rate: Rate,
    payment: Money,
    payment_count: u32,
    start_date: NaiveDate,
    balance: Money,
    last_number: u32,
}

impl Amortizer {
    pub(crate) fn new(terms: &LoanTerms, payment: Money, start_date: NaiveDate) -> Self {
        Self {
            monthly_rate: terms.monthly_rate(),
            payment,
            payment_count: terms.payment_count(),
            start_date,
            balance: terms.principal,
            last_number: 0,
        }
    }

    pub(crate) fn balance(&self) -> Money {
        self.balance
    }

    /// true once every nominal payment has been made or the balance is gone
    pub(crate) fn is_finished(&self) -> bool {
        self.last_number >= self.payment_count || self.balance.is_zero()
    }

    /// make the next payment, with `extra` principal on top of the scheduled amount
    pub(crate) fn step(&mut self, extra: Money) -> Result<PaymentLineItem> {
        let payment_number = self.last_number + 1;
        let interest_portion = self.balance.apply_rate(self.monthly_rate).round_cents();
        let scheduled_principal = (self.payment - interest_portion)
            .max(Money::ZERO)
            .min(self.balance);

        let (principal_portion, extra_principal) = if payment_number == self.payment_count {
            // last nominal payment absorbs the rounding drift
            let extra_applied = extra.min(self.balance - scheduled_principal).max(Money::ZERO);
            (self.balance, extra_applied)
        } else {
            let total = (scheduled_principal + extra).min(self.balance);
            (total, total - scheduled_principal)
        };

        self.balance -= principal_portion;
        self.last_number = payment_number;
        debug_assert!(!self.balance.is_negative(), "amortization balance went negative");

        Ok(PaymentLineItem {
            payment_number,
            payment_date: add_months(self.start_date, payment_number)?,
            principal_portion,
            interest_portion,
            extra_principal,
            total_payment: principal_portion + interest_portion,
            remaining_balance: self.balance,
        })
    }
}
