use chrono::NaiveDate;

use crate::amortization::{
    monthly_payment, quote_mortgage, simulate_extra_payments, AmortizationSchedule,
    ExtraPaymentResult, MortgageQuote,
};
use crate::analysis::{
    analyze_refinance, evaluate_pre_approval, project_rent_vs_buy, AffordabilityResult,
    RefinanceResult, RentVsBuyProjection,
};
use crate::config::CalculatorConfig;
use crate::decimal::Money;
use crate::errors::Result;
use crate::types::{
    AffordabilityInputs, ExtraPaymentScenario, LoanTerms, MortgageRequest, RefinanceInputs,
    RentVsBuyInputs,
};

/// the calculations a front end needs, local or remote
pub trait MortgageCalculator {
    fn monthly_payment(&self, terms: &LoanTerms) -> Result<Money>;

    fn amortization_schedule(
        &self,
        terms: &LoanTerms,
        start_date: NaiveDate,
    ) -> Result<AmortizationSchedule>;

    fn extra_payments(
        &self,
        terms: &LoanTerms,
        scenario: &ExtraPaymentScenario,
        start_date: NaiveDate,
    ) -> Result<ExtraPaymentResult>;

    fn refinance(&self, inputs: &RefinanceInputs) -> Result<RefinanceResult>;

    fn rent_vs_buy(&self, inputs: &RentVsBuyInputs) -> Result<RentVsBuyProjection>;

    fn pre_approval(&self, inputs: &AffordabilityInputs) -> Result<AffordabilityResult>;

    fn quote(&self, request: &MortgageRequest, start_date: NaiveDate) -> Result<MortgageQuote>;
}

/// answers every calculation in-process
#[derive(Debug, Clone, Default)]
pub struct LocalCalculator {
    config: CalculatorConfig,
}

impl LocalCalculator {
    pub fn new(config: CalculatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }
}

impl MortgageCalculator for LocalCalculator {
    fn monthly_payment(&self, terms: &LoanTerms) -> Result<Money> {
        monthly_payment(terms)
    }

    fn amortization_schedule(
        &self,
        terms: &LoanTerms,
        start_date: NaiveDate,
    ) -> Result<AmortizationSchedule> {
        AmortizationSchedule::generate(terms, start_date)
    }

    fn extra_payments(
        &self,
        terms: &LoanTerms,
        scenario: &ExtraPaymentScenario,
        start_date: NaiveDate,
    ) -> Result<ExtraPaymentResult> {
        simulate_extra_payments(terms, scenario, start_date)
    }

    fn refinance(&self, inputs: &RefinanceInputs) -> Result<RefinanceResult> {
        analyze_refinance(inputs)
    }

    fn rent_vs_buy(&self, inputs: &RentVsBuyInputs) -> Result<RentVsBuyProjection> {
        project_rent_vs_buy(inputs, self.config.rent_vs_buy_method)
    }

    fn pre_approval(&self, inputs: &AffordabilityInputs) -> Result<AffordabilityResult> {
        evaluate_pre_approval(inputs, &self.config.underwriting)
    }

    fn quote(&self, request: &MortgageRequest, start_date: NaiveDate) -> Result<MortgageQuote> {
        quote_mortgage(request, start_date)
    }
}

/// tries a remote calculator first and answers locally when it fails
///
/// Local answers are the same pure functions the remote is expected to run, so
/// the substitution is transparent. Errors from the local side, bad input
/// included, are returned as-is.
pub struct FallbackCalculator<R> {
    remote: R,
    local: LocalCalculator,
}

impl<R: MortgageCalculator> FallbackCalculator<R> {
    pub fn new(remote: R, local: LocalCalculator) -> Self {
        Self { remote, local }
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    pub fn local(&self) -> &LocalCalculator {
        &self.local
    }

    fn or_local<T>(
        &self,
        operation: &'static str,
        remote: Result<T>,
        local: impl FnOnce(&LocalCalculator) -> Result<T>,
    ) -> Result<T> {
        match remote {
            Ok(value) => Ok(value),
            Err(err) => {
                tracing::warn!(operation, error = %err, "remote calculator failed, using local");
                local(&self.local)
            }
        }
    }
}

impl<R: MortgageCalculator> MortgageCalculator for FallbackCalculator<R> {
    fn monthly_payment(&self, terms: &LoanTerms) -> Result<Money> {
        self.or_local("monthly_payment", self.remote.monthly_payment(terms), |local| {
            local.monthly_payment(terms)
        })
    }

    fn amortization_schedule(
        &self,
        terms: &LoanTerms,
        start_date: NaiveDate,
    ) -> Result<AmortizationSchedule> {
        self.or_local(
            "amortization_schedule",
            self.remote.amortization_schedule(terms, start_date),
            |local| local.amortization_schedule(terms, start_date),
        )
    }

    fn extra_payments(
        &self,
        terms: &LoanTerms,
        scenario: &ExtraPaymentScenario,
        start_date: NaiveDate,
    ) -> Result<ExtraPaymentResult> {
        self.or_local(
            "extra_payments",
            self.remote.extra_payments(terms, scenario, start_date),
            |local| local.extra_payments(terms, scenario, start_date),
        )
    }

    fn refinance(&self, inputs: &RefinanceInputs) -> Result<RefinanceResult> {
        self.or_local("refinance", self.remote.refinance(inputs), |local| {
            local.refinance(inputs)
        })
    }

    fn rent_vs_buy(&self, inputs: &RentVsBuyInputs) -> Result<RentVsBuyProjection> {
        self.or_local("rent_vs_buy", self.remote.rent_vs_buy(inputs), |local| {
            local.rent_vs_buy(inputs)
        })
    }

    fn pre_approval(&self, inputs: &AffordabilityInputs) -> Result<AffordabilityResult> {
        self.or_local("pre_approval", self.remote.pre_approval(inputs), |local| {
            local.pre_approval(inputs)
        })
    }

    fn quote(&self, request: &MortgageRequest, start_date: NaiveDate) -> Result<MortgageQuote> {
        self.or_local("quote", self.remote.quote(request, start_date), |local| {
            local.quote(request, start_date)
        })
    }
}
