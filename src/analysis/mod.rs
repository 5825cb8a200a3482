pub mod affordability;
pub mod ratios;
pub mod refinance;
pub mod rent_vs_buy;

pub use affordability::{evaluate_pre_approval, AffordabilityResult};
pub use ratios::{debt_to_income_percent, loan_to_value_percent};
pub use refinance::{analyze_refinance, BreakEven, RefinanceResult};
pub use rent_vs_buy::{
    project_rent_vs_buy, RentVsBuyOutcome, RentVsBuyProjection, YearlyComparisonPoint,
};
