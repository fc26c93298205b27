use serde::Serialize;

/// Financial assumptions for one projection run. Rebuilt fresh from the
/// current UI field values on every recomputation; never mutated in place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Assumptions {
    pub current_age: u32,
    pub retirement_age: u32,
    pub contribution_cutoff_age: u32,
    pub current_savings: f64,
    pub annual_contribution: f64,
    pub expected_return: f64,
    pub social_security_benefit: f64,
    pub annual_expenses: f64,
    pub inflation_rate: f64,
}

/// One projected year. Balance and income figures are rounded to whole
/// currency units; `social_security` and `expenses` stay unrounded so the
/// display layer sees the same values the source widget produced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearSnapshot {
    pub age: u32,
    pub total_savings: f64,
    pub investment_income: f64,
    pub social_security: f64,
    pub total_income: f64,
    pub expenses: f64,
    pub net_income: f64,
}
