pub mod amortization;
pub mod analysis;
pub mod calculator;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod export;
pub mod history;
pub mod types;

// re-export key types
pub use decimal::{Money, Rate};
pub use errors::{MortgageError, Result};
pub use amortization::{
    compare_scenarios, compute_monthly_payment, generate_schedule, lifetime_interest,
    monthly_payment, principal_for_payment, quote_mortgage, simulate_extra_payments,
    AmortizationSchedule, ExtraPaymentResult, MortgageQuote, PaymentLineItem, YearlySummary,
};
pub use analysis::{
    analyze_refinance, debt_to_income_percent, evaluate_pre_approval, loan_to_value_percent,
    project_rent_vs_buy, AffordabilityResult, BreakEven, RefinanceResult, RentVsBuyOutcome,
    RentVsBuyProjection, YearlyComparisonPoint,
};
pub use calculator::{FallbackCalculator, LocalCalculator, MortgageCalculator};
pub use config::{CalculatorConfig, RentVsBuyMethod, UnderwritingThresholds};
pub use export::{read_schedule_csv, write_schedule_csv, ScheduleRow};
pub use history::{
    CalculationHistory, HistoryEntry, HistoryRepository, HistorySnapshot, InMemoryRepository,
};
pub use types::{
    AffordabilityInputs, ExtraPaymentScenario, LoanTerms, MortgageRequest, RefinanceInputs,
    RentVsBuyInputs,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
