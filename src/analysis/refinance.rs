use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::amortization::{lifetime_interest, monthly_payment};
use crate::decimal::Money;
use crate::errors::Result;
use crate::types::RefinanceInputs;

/// refinances that pay back their costs within this many months count as worthwhile
const WORTHWHILE_BREAK_EVEN_MONTHS: Decimal = dec!(60);

/// when the monthly savings repay the financed costs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum BreakEven {
    After { months: Decimal },
    /// the new payment is not lower, so the costs are never recovered
    Never,
}

impl BreakEven {
    pub fn months(&self) -> Option<Decimal> {
        match self {
            BreakEven::After { months } => Some(*months),
            BreakEven::Never => None,
        }
    }

    pub fn is_never(&self) -> bool {
        matches!(self, BreakEven::Never)
    }
}

/// existing loan versus the proposed refinance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefinanceResult {
    pub current_monthly_payment: Money,
    pub new_monthly_payment: Money,
    /// current balance plus closing costs plus cash-out
    pub new_loan_amount: Money,
    /// positive when the new payment is lower
    pub monthly_savings: Money,
    pub break_even: BreakEven,
    pub current_total_interest: Money,
    pub new_total_interest: Money,
    /// lifetime interest of the current loan minus that of the new loan
    pub total_interest_savings: Money,
    pub worth_refinancing: bool,
}

/// compare keeping the current loan against refinancing it
///
/// Closing costs and cash-out are financed into the new principal, so the
/// borrower brings no cash to closing; the break-even divides those financed
/// costs by the monthly savings.
pub fn analyze_refinance(inputs: &RefinanceInputs) -> Result<RefinanceResult> {
    inputs.validate()?;

    let current_terms = inputs.current_terms();
    let new_terms = inputs.new_terms();

    let current_monthly_payment = monthly_payment(&current_terms)?;
    let new_monthly_payment = monthly_payment(&new_terms)?;
    let monthly_savings = current_monthly_payment - new_monthly_payment;

    let break_even = if monthly_savings.is_positive() {
        BreakEven::After {
            months: (inputs.financed_costs().as_decimal() / monthly_savings.as_decimal()).round_dp(2),
        }
    } else {
        BreakEven::Never
    };

    let current_total_interest = lifetime_interest(&current_terms)?;
    let new_total_interest = lifetime_interest(&new_terms)?;
    let total_interest_savings = current_total_interest - new_total_interest;

    let worth_refinancing = break_even
        .months()
        .map(|months| months < WORTHWHILE_BREAK_EVEN_MONTHS)
        .unwrap_or(false);

    tracing::debug!(
        current_payment = %current_monthly_payment,
        new_payment = %new_monthly_payment,
        monthly_savings = %monthly_savings,
        break_even = ?break_even,
        "refinance analyzed"
    );

    Ok(RefinanceResult {
        current_monthly_payment,
        new_monthly_payment,
        new_loan_amount: new_terms.principal,
        monthly_savings,
        break_even,
        current_total_interest,
        new_total_interest,
        total_interest_savings,
        worth_refinancing,
    })
}
