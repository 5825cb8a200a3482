use rust_decimal::Decimal;

use crate::decimal::Money;

/// monthly debts over monthly income, as a percentage; 0 with no income
pub fn debt_to_income_percent(monthly_debts: Money, monthly_income: Money) -> Decimal {
    monthly_debts.percent_of(monthly_income)
}

/// loan amount over property value, as a percentage; 0 with no property value
pub fn loan_to_value_percent(loan_amount: Money, property_value: Money) -> Decimal {
    loan_amount.percent_of(property_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_ratios() {
        assert_eq!(
            debt_to_income_percent(Money::from_major(2_150), Money::from_major(5_000)),
            dec!(43)
        );
        assert_eq!(
            loan_to_value_percent(Money::from_major(320_000), Money::from_major(400_000)),
            dec!(80)
        );
    }

    #[test]
    fn test_zero_denominators() {
        assert_eq!(debt_to_income_percent(Money::from_major(500), Money::ZERO), Decimal::ZERO);
        assert_eq!(loan_to_value_percent(Money::from_major(500), Money::ZERO), Decimal::ZERO);
    }
}
