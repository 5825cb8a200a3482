use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::amortization::{monthly_payment, principal_for_payment};
use crate::config::UnderwritingThresholds;
use crate::decimal::Money;
use crate::errors::Result;
use crate::types::AffordabilityInputs;

use super::ratios::debt_to_income_percent;

/// pre-approval decision for a requested loan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffordabilityResult {
    pub approved: bool,
    /// largest loan whose payment keeps the front-end ratio at the limit
    pub max_qualifying_loan_amount: Money,
    /// existing debts plus the new payment, over monthly income
    pub debt_to_income_ratio_percent: Decimal,
    /// the new payment alone, over monthly income
    pub front_end_ratio_percent: Decimal,
    pub monthly_payment: Money,
    /// annual income at which the requested loan passes both limits
    pub required_annual_income: Money,
    pub explanation: String,
}

/// evaluate a borrower against the underwriting limits
///
/// Ratios are compared unrounded and reported to 2 decimal places. A ratio
/// exactly at its limit passes.
pub fn evaluate_pre_approval(
    inputs: &AffordabilityInputs,
    thresholds: &UnderwritingThresholds,
) -> Result<AffordabilityResult> {
    inputs.validate()?;
    thresholds.validate()?;

    let terms = inputs.loan_terms();
    let payment = monthly_payment(&terms)?;
    let monthly_income = inputs.monthly_income();

    let dti = debt_to_income_percent(inputs.monthly_debts + payment, monthly_income);
    let front_end = debt_to_income_percent(payment, monthly_income);

    let dti_ok = dti <= thresholds.max_debt_to_income_percent;
    let front_end_ok = front_end <= thresholds.max_front_end_percent;
    let approved = dti_ok && front_end_ok;

    let target_payment = monthly_income * fraction(thresholds.max_front_end_percent);
    let max_qualifying_loan_amount =
        principal_for_payment(target_payment, terms.annual_rate(), terms.payment_count())?;

    let yearly_payment = payment * Decimal::from(12);
    let yearly_debt_service = (payment + inputs.monthly_debts) * Decimal::from(12);
    let required_annual_income = (yearly_payment / fraction(thresholds.max_front_end_percent))
        .max(yearly_debt_service / fraction(thresholds.max_debt_to_income_percent))
        .ceil_cents();

    let debt_to_income_ratio_percent = report(dti);
    let front_end_ratio_percent = report(front_end);

    let explanation = match (dti_ok, front_end_ok) {
        (true, true) => format!(
            "Debt-to-income of {debt_to_income_ratio_percent}% and front-end ratio of \
             {front_end_ratio_percent}% are within the {}% and {}% limits.",
            thresholds.max_debt_to_income_percent, thresholds.max_front_end_percent
        ),
        (false, true) => format!(
            "Debt-to-income of {debt_to_income_ratio_percent}% exceeds the {}% limit. \
             Consider reducing debts or increasing income.",
            thresholds.max_debt_to_income_percent
        ),
        (true, false) => format!(
            "Front-end ratio of {front_end_ratio_percent}% exceeds the {}% limit. \
             A loan of at most {max_qualifying_loan_amount} fits this income.",
            thresholds.max_front_end_percent
        ),
        (false, false) => format!(
            "Debt-to-income of {debt_to_income_ratio_percent}% exceeds the {}% limit and \
             front-end ratio of {front_end_ratio_percent}% exceeds the {}% limit.",
            thresholds.max_debt_to_income_percent, thresholds.max_front_end_percent
        ),
    };

    tracing::debug!(
        approved,
        dti = %debt_to_income_ratio_percent,
        front_end = %front_end_ratio_percent,
        monthly_payment = %payment,
        "pre-approval evaluated"
    );

    Ok(AffordabilityResult {
        approved,
        max_qualifying_loan_amount,
        debt_to_income_ratio_percent,
        front_end_ratio_percent,
        monthly_payment: payment,
        required_annual_income,
        explanation,
    })
}

fn fraction(percent: Decimal) -> Decimal {
    percent / Decimal::ONE_HUNDRED
}

fn report(percent: Decimal) -> Decimal {
    percent.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn borrower(annual_income: i64, monthly_debts: i64, loan_amount: i64) -> AffordabilityInputs {
        AffordabilityInputs {
            annual_income: Money::from_major(annual_income),
            monthly_debts: Money::from_major(monthly_debts),
            loan_amount: Money::from_major(loan_amount),
            annual_rate_percent: dec!(6.5),
            term_years: 30,
            down_payment: Money::from_major(60_000),
        }
    }

    #[test]
    fn test_front_end_boundary_just_over() {
        // dti is well inside 43%, but the payment alone is 28.44% of income
        let result =
            evaluate_pre_approval(&borrower(80_000, 500, 300_000), &UnderwritingThresholds::conforming())
                .unwrap();

        assert_eq!(result.monthly_payment, Money::from_decimal(dec!(1896.20)));
        assert_eq!(result.debt_to_income_ratio_percent, dec!(35.94));
        assert_eq!(result.front_end_ratio_percent, dec!(28.44));
        assert!(!result.approved);
        assert!(result.explanation.contains("Front-end"));
        assert_eq!(result.required_annual_income, Money::from_decimal(dec!(81265.72)));
    }

    #[test]
    fn test_required_income_is_enough() {
        let result =
            evaluate_pre_approval(&borrower(80_000, 500, 300_000), &UnderwritingThresholds::conforming())
                .unwrap();
        let income = result.required_annual_income.as_decimal();
        let inputs = AffordabilityInputs {
            annual_income: Money::from_decimal(income),
            ..borrower(80_000, 500, 300_000)
        };
        let retry = evaluate_pre_approval(&inputs, &UnderwritingThresholds::conforming()).unwrap();
        assert!(retry.approved);
    }

    #[test]
    fn test_max_qualifying_loan_fits_front_end_limit() {
        let result =
            evaluate_pre_approval(&borrower(80_000, 500, 300_000), &UnderwritingThresholds::conforming())
                .unwrap();
        let max = result.max_qualifying_loan_amount;

        assert!(max < Money::from_major(300_000));
        assert!(max > Money::from_major(290_000));
        let payment = crate::amortization::compute_monthly_payment(max, dec!(6.5), 30).unwrap();
        assert!(payment <= Money::from_decimal(dec!(1866.67)));
    }

    #[test]
    fn test_fha_front_end_limit_approves_same_borrower() {
        let result =
            evaluate_pre_approval(&borrower(80_000, 500, 300_000), &UnderwritingThresholds::fha())
                .unwrap();
        assert!(result.approved);
        assert!(result.explanation.contains("within"));
    }

    #[test]
    fn test_debts_push_dti_over() {
        let result =
            evaluate_pre_approval(&borrower(80_000, 2_000, 150_000), &UnderwritingThresholds::conforming())
                .unwrap();
        assert_eq!(result.monthly_payment, Money::from_decimal(dec!(948.10)));
        assert!(result.debt_to_income_ratio_percent > dec!(43));
        assert!(result.front_end_ratio_percent < dec!(28));
        assert!(!result.approved);
        assert!(result.explanation.contains("Debt-to-income"));
        assert!(result.explanation.contains("reducing debts"));
    }

    #[test]
    fn test_comfortable_income_approved() {
        let result =
            evaluate_pre_approval(&borrower(120_000, 500, 300_000), &UnderwritingThresholds::conforming())
                .unwrap();
        assert!(result.approved);
        assert!(result.max_qualifying_loan_amount > Money::from_major(300_000));
        assert!(result.required_annual_income < Money::from_major(120_000));
    }

    #[test]
    fn test_zero_income_rejected() {
        let err = evaluate_pre_approval(&borrower(0, 500, 300_000), &UnderwritingThresholds::conforming())
            .unwrap_err();
        assert!(err.is_invalid_input());
    }
}
