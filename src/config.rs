use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::errors::{MortgageError, Result};

/// debt-to-income limits used by pre-approval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnderwritingThresholds {
    /// all monthly debts including the new payment, over monthly income
    pub max_debt_to_income_percent: Decimal,
    /// the new housing payment alone, over monthly income
    pub max_front_end_percent: Decimal,
}

impl UnderwritingThresholds {
    /// conventional conforming loan: 43% back-end, 28% front-end
    pub fn conforming() -> Self {
        Self {
            max_debt_to_income_percent: dec!(43),
            max_front_end_percent: dec!(28),
        }
    }

    /// FHA-style limits: 43% back-end, 31% front-end
    pub fn fha() -> Self {
        Self {
            max_debt_to_income_percent: dec!(43),
            max_front_end_percent: dec!(31),
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("max_debt_to_income_percent", self.max_debt_to_income_percent),
            ("max_front_end_percent", self.max_front_end_percent),
        ] {
            if value <= Decimal::ZERO || value > Decimal::ONE_HUNDRED {
                return Err(MortgageError::InvalidConfiguration {
                    message: format!("{name} must be in (0, 100], got {value}"),
                });
            }
        }
        Ok(())
    }
}

impl Default for UnderwritingThresholds {
    fn default() -> Self {
        Self::conforming()
    }
}

/// how rent-vs-buy reduces the mortgage balance each year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum RentVsBuyMethod {
    /// twelve real payments through the amortization engine
    #[default]
    MonthlyAmortization,
    /// yearly payments minus a year of simple interest on the opening balance
    YearlyApproximation,
}

/// calculator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalculatorConfig {
    pub underwriting: UnderwritingThresholds,
    pub rent_vs_buy_method: RentVsBuyMethod,
    /// saved calculations kept before the oldest is dropped
    pub history_capacity: usize,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            underwriting: UnderwritingThresholds::conforming(),
            rent_vs_buy_method: RentVsBuyMethod::MonthlyAmortization,
            history_capacity: 20,
        }
    }
}

impl CalculatorConfig {
    /// parse and validate a JSON configuration, missing fields take defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: CalculatorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.underwriting.validate()?;
        if self.history_capacity == 0 {
            return Err(MortgageError::InvalidConfiguration {
                message: "history_capacity must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CalculatorConfig::default();
        assert_eq!(config.underwriting, UnderwritingThresholds::conforming());
        assert_eq!(config.rent_vs_buy_method, RentVsBuyMethod::MonthlyAmortization);
        assert_eq!(config.history_capacity, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let config = CalculatorConfig::from_json_str(
            r#"{ "rentVsBuyMethod": "yearlyApproximation", "historyCapacity": 5 }"#,
        )
        .unwrap();
        assert_eq!(config.rent_vs_buy_method, RentVsBuyMethod::YearlyApproximation);
        assert_eq!(config.history_capacity, 5);
        assert_eq!(config.underwriting, UnderwritingThresholds::conforming());
    }

    #[test]
    fn test_custom_thresholds_from_json() {
        let config = CalculatorConfig::from_json_str(
            r#"{ "underwriting": { "maxDebtToIncomePercent": "45", "maxFrontEndPercent": "31" } }"#,
        )
        .unwrap();
        assert_eq!(config.underwriting.max_debt_to_income_percent, dec!(45));
        assert_eq!(config.underwriting.max_front_end_percent, dec!(31));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = CalculatorConfig::from_json_str(r#"{ "historyCapacity": 0 }"#).unwrap_err();
        assert!(matches!(err, MortgageError::InvalidConfiguration { .. }));

        let err = CalculatorConfig::from_json_str(
            r#"{ "underwriting": { "maxDebtToIncomePercent": "0", "maxFrontEndPercent": "28" } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, MortgageError::InvalidConfiguration { .. }));

        assert!(matches!(
            CalculatorConfig::from_json_str("not json").unwrap_err(),
            MortgageError::Json(_)
        ));
    }
}
