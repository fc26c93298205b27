use super::types::{Assumptions, YearSnapshot};

/// 4% rule: share of the balance assumed withdrawable each year. Fixed by the
/// source widget, not configurable.
pub const WITHDRAWAL_RATE: f64 = 0.04;

pub fn project_year(assumptions: &Assumptions, age: u32) -> YearSnapshot {
    let years_elapsed = age.saturating_sub(assumptions.current_age) as i32;

    let inflation_factor = (1.0 + assumptions.inflation_rate / 100.0).powi(years_elapsed);
    let adjusted_expenses = assumptions.annual_expenses * inflation_factor;
    let adjusted_social_security = assumptions.social_security_benefit * inflation_factor;

    let rate = assumptions.expected_return / 100.0;
    let growth = (1.0 + rate).powi(years_elapsed);

    // Future value of the contribution annuity. Contributions stop accruing
    // after the cutoff age; the balance itself keeps compounding. The division
    // is deliberately unguarded: a zero expected return yields NaN, matching
    // the source widget.
    let contribution_term = if age <= assumptions.contribution_cutoff_age {
        assumptions.annual_contribution * ((growth - 1.0) / rate)
    } else {
        0.0
    };
    let total_savings = assumptions.current_savings * growth + contribution_term;

    let investment_income = total_savings * WITHDRAWAL_RATE;
    let total_income = investment_income + adjusted_social_security;
    let net_income = total_income - adjusted_expenses;

    // Each rounded figure comes from the unrounded chain; social security and
    // expenses are not rounded at all. Source-widget parity.
    YearSnapshot {
        age,
        total_savings: total_savings.round(),
        investment_income: investment_income.round(),
        social_security: adjusted_social_security,
        total_income: total_income.round(),
        expenses: adjusted_expenses,
        net_income: net_income.round(),
    }
}

pub fn project_series(assumptions: &Assumptions, start_age: u32, count: u32) -> Vec<YearSnapshot> {
    (0..count)
        .map(|offset| project_year(assumptions, start_age + offset))
        .collect()
}
