use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{MortgageError, Result};

/// longest loan term accepted, keeps every schedule bounded
pub const MAX_TERM_YEARS: u32 = 100;

/// longest rent-vs-buy horizon accepted
pub const MAX_HORIZON_YEARS: u32 = 100;

/// fixed-rate loan parameters
///
/// Field names on the wire match the remote calculation endpoint
/// (`principal`, `annualRatePercent`, `termYears`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanTerms {
    pub principal: Money,
    pub annual_rate_percent: Decimal,
    pub term_years: u32,
}

impl LoanTerms {
    /// create validated loan terms
    pub fn new(principal: Money, annual_rate_percent: Decimal, term_years: u32) -> Result<Self> {
        let terms = Self {
            principal,
            annual_rate_percent,
            term_years,
        };
        terms.validate()?;
        Ok(terms)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.principal.is_positive() {
            return Err(MortgageError::invalid(
                "principal",
                format!("must be greater than zero, got {}", self.principal),
            ));
        }
        validate_rate_percent("annualRatePercent", self.annual_rate_percent)?;
        validate_term_years("termYears", self.term_years)
    }

    pub fn annual_rate(&self) -> Rate {
        Rate::from_percent(self.annual_rate_percent)
    }

    pub fn monthly_rate(&self) -> Rate {
        self.annual_rate().monthly_rate()
    }

    /// number of scheduled monthly payments
    pub fn payment_count(&self) -> u32 {
        self.term_years * 12
    }
}

/// extra principal payments layered on top of the scheduled payment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraPaymentScenario {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub monthly_extra: Money,
    /// applied on each 12-payment anniversary (payments 13, 25, ...)
    #[serde(default)]
    pub yearly_extra: Money,
    #[serde(default)]
    pub one_time_extra: Money,
    #[serde(default = "default_one_time_month")]
    pub one_time_payment_month: u32,
}

fn default_one_time_month() -> u32 {
    1
}

impl Default for ExtraPaymentScenario {
    fn default() -> Self {
        Self {
            name: None,
            monthly_extra: Money::ZERO,
            yearly_extra: Money::ZERO,
            one_time_extra: Money::ZERO,
            one_time_payment_month: 1,
        }
    }
}

impl ExtraPaymentScenario {
    pub fn monthly(amount: Money) -> Self {
        Self {
            monthly_extra: amount,
            ..Self::default()
        }
    }

    pub fn yearly(amount: Money) -> Self {
        Self {
            yearly_extra: amount,
            ..Self::default()
        }
    }

    pub fn one_time(amount: Money, payment_month: u32) -> Self {
        Self {
            one_time_extra: amount,
            one_time_payment_month: payment_month,
            ..Self::default()
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_monthly(mut self, amount: Money) -> Self {
        self.monthly_extra = amount;
        self
    }

    pub fn with_yearly(mut self, amount: Money) -> Self {
        self.yearly_extra = amount;
        self
    }

    pub fn with_one_time(mut self, amount: Money, payment_month: u32) -> Self {
        self.one_time_extra = amount;
        self.one_time_payment_month = payment_month;
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_non_negative("monthlyExtra", self.monthly_extra)?;
        validate_non_negative("yearlyExtra", self.yearly_extra)?;
        validate_non_negative("oneTimeExtra", self.one_time_extra)?;
        if self.one_time_payment_month == 0 {
            return Err(MortgageError::invalid(
                "oneTimePaymentMonth",
                "payment months are numbered from 1",
            ));
        }
        Ok(())
    }

    /// extra principal scheduled for the given payment number
    pub fn extra_for_payment(&self, payment_number: u32) -> Money {
        let mut extra = self.monthly_extra;
        if payment_number > 1 && (payment_number - 1) % 12 == 0 {
            extra += self.yearly_extra;
        }
        if payment_number == self.one_time_payment_month {
            extra += self.one_time_extra;
        }
        extra
    }

    pub fn has_extra(&self) -> bool {
        self.monthly_extra.is_positive()
            || self.yearly_extra.is_positive()
            || self.one_time_extra.is_positive()
    }
}

/// mortgage quote request, the loan plus monthly escrow items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MortgageRequest {
    #[serde(flatten)]
    pub terms: LoanTerms,
    #[serde(default)]
    pub down_payment: Option<Money>,
    #[serde(default)]
    pub property_value: Option<Money>,
    #[serde(default)]
    pub monthly_property_tax: Money,
    #[serde(default)]
    pub monthly_home_insurance: Money,
    #[serde(default)]
    pub monthly_pmi: Money,
    #[serde(default)]
    pub monthly_hoa: Money,
}

impl MortgageRequest {
    pub fn new(terms: LoanTerms) -> Self {
        Self {
            terms,
            down_payment: None,
            property_value: None,
            monthly_property_tax: Money::ZERO,
            monthly_home_insurance: Money::ZERO,
            monthly_pmi: Money::ZERO,
            monthly_hoa: Money::ZERO,
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.terms.validate()?;
        if let Some(down) = self.down_payment {
            validate_non_negative("downPayment", down)?;
        }
        if let Some(value) = self.property_value {
            if !value.is_positive() {
                return Err(MortgageError::invalid("propertyValue", "must be greater than zero"));
            }
        }
        validate_non_negative("monthlyPropertyTax", self.monthly_property_tax)?;
        validate_non_negative("monthlyHomeInsurance", self.monthly_home_insurance)?;
        validate_non_negative("monthlyPmi", self.monthly_pmi)?;
        validate_non_negative("monthlyHoa", self.monthly_hoa)
    }
}

/// existing loan versus a proposed refinance
///
/// Closing costs and cash-out are rolled into the new principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefinanceInputs {
    pub current_balance: Money,
    pub current_rate_percent: Decimal,
    pub current_term_years_remaining: u32,
    pub new_rate_percent: Decimal,
    pub new_term_years: u32,
    #[serde(default)]
    pub closing_costs: Money,
    #[serde(default)]
    pub cash_out: Money,
}

impl RefinanceInputs {
    pub fn validate(&self) -> Result<()> {
        self.current_terms().validate()?;
        validate_rate_percent("newRatePercent", self.new_rate_percent)?;
        validate_term_years("newTermYears", self.new_term_years)?;
        validate_non_negative("closingCosts", self.closing_costs)?;
        validate_non_negative("cashOut", self.cash_out)
    }

    /// the loan as it stands today
    pub fn current_terms(&self) -> LoanTerms {
        LoanTerms {
            principal: self.current_balance,
            annual_rate_percent: self.current_rate_percent,
            term_years: self.current_term_years_remaining,
        }
    }

    /// costs that the refinance adds on top of the current balance
    pub fn financed_costs(&self) -> Money {
        self.closing_costs + self.cash_out
    }

    /// the replacement loan
    pub fn new_terms(&self) -> LoanTerms {
        LoanTerms {
            principal: self.current_balance + self.financed_costs(),
            annual_rate_percent: self.new_rate_percent,
            term_years: self.new_term_years,
        }
    }
}

/// renting versus buying the same home
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentVsBuyInputs {
    pub home_price: Money,
    pub down_payment: Money,
    pub annual_rate_percent: Decimal,
    pub term_years: u32,
    pub monthly_rent: Money,
    #[serde(default)]
    pub rent_growth_percent: Decimal,
    #[serde(default)]
    pub appreciation_percent: Decimal,
    #[serde(default)]
    pub annual_property_tax: Money,
    #[serde(default)]
    pub annual_insurance: Money,
    #[serde(default)]
    pub annual_maintenance: Money,
    #[serde(default)]
    pub closing_costs: Money,
    pub horizon_years: u32,
}

impl RentVsBuyInputs {
    pub fn validate(&self) -> Result<()> {
        if !self.home_price.is_positive() {
            return Err(MortgageError::invalid("homePrice", "must be greater than zero"));
        }
        validate_non_negative("downPayment", self.down_payment)?;
        if self.down_payment > self.home_price {
            return Err(MortgageError::invalid(
                "downPayment",
                format!("{} exceeds home price {}", self.down_payment, self.home_price),
            ));
        }
        validate_rate_percent("annualRatePercent", self.annual_rate_percent)?;
        validate_term_years("termYears", self.term_years)?;
        validate_non_negative("monthlyRent", self.monthly_rent)?;
        validate_growth_percent("rentGrowthPercent", self.rent_growth_percent)?;
        validate_growth_percent("appreciationPercent", self.appreciation_percent)?;
        validate_non_negative("annualPropertyTax", self.annual_property_tax)?;
        validate_non_negative("annualInsurance", self.annual_insurance)?;
        validate_non_negative("annualMaintenance", self.annual_maintenance)?;
        validate_non_negative("closingCosts", self.closing_costs)?;
        if self.horizon_years == 0 || self.horizon_years > MAX_HORIZON_YEARS {
            return Err(MortgageError::invalid(
                "horizonYears",
                format!("must be between 1 and {MAX_HORIZON_YEARS}"),
            ));
        }
        Ok(())
    }

    pub fn loan_amount(&self) -> Money {
        self.home_price - self.down_payment
    }

    /// yearly tax, insurance and maintenance
    pub fn annual_ownership_costs(&self) -> Money {
        self.annual_property_tax + self.annual_insurance + self.annual_maintenance
    }
}

/// borrower profile for pre-approval
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffordabilityInputs {
    pub annual_income: Money,
    #[serde(default)]
    pub monthly_debts: Money,
    pub loan_amount: Money,
    pub annual_rate_percent: Decimal,
    pub term_years: u32,
    #[serde(default)]
    pub down_payment: Money,
}

impl AffordabilityInputs {
    pub fn validate(&self) -> Result<()> {
        if !self.annual_income.is_positive() {
            return Err(MortgageError::invalid("annualIncome", "must be greater than zero"));
        }
        validate_non_negative("monthlyDebts", self.monthly_debts)?;
        validate_non_negative("downPayment", self.down_payment)?;
        self.loan_terms().validate()
    }

    pub fn loan_terms(&self) -> LoanTerms {
        LoanTerms {
            principal: self.loan_amount,
            annual_rate_percent: self.annual_rate_percent,
            term_years: self.term_years,
        }
    }

    pub fn monthly_income(&self) -> Money {
        self.annual_income / Decimal::from(12)
    }
}

fn validate_non_negative(field: &'static str, amount: Money) -> Result<()> {
    if amount.is_negative() {
        return Err(MortgageError::invalid(field, format!("must not be negative, got {amount}")));
    }
    Ok(())
}

fn validate_rate_percent(field: &'static str, percent: Decimal) -> Result<()> {
    if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
        return Err(MortgageError::invalid(
            field,
            format!("must be between 0 and 100 percent, got {percent}"),
        ));
    }
    Ok(())
}

fn validate_growth_percent(field: &'static str, percent: Decimal) -> Result<()> {
    if percent <= -Decimal::ONE_HUNDRED || percent > Decimal::ONE_HUNDRED {
        return Err(MortgageError::invalid(
            field,
            format!("must be above -100 and at most 100 percent, got {percent}"),
        ));
    }
    Ok(())
}

fn validate_term_years(field: &'static str, years: u32) -> Result<()> {
    if years == 0 || years > MAX_TERM_YEARS {
        return Err(MortgageError::invalid(
            field,
            format!("must be between 1 and {MAX_TERM_YEARS} years, got {years}"),
        ));
    }
    Ok(())
}
