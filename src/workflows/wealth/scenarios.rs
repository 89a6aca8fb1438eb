use super::gap::WealthGapInputs;
use serde::Serialize;

/// A withdrawal-rate planning scenario.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WithdrawalScenario {
    pub name: &'static str,
    pub rate: f64,
    pub risk_level: &'static str,
}

/// The three standard planning scenarios advisors walk owners through.
pub const fn standard_scenarios() -> [WithdrawalScenario; 3] {
    [
        WithdrawalScenario {
            name: "Conservative (4%)",
            rate: 0.04,
            risk_level: "Low Risk",
        },
        WithdrawalScenario {
            name: "Balanced (5%)",
            rate: 0.05,
            risk_level: "Moderate Risk",
        },
        WithdrawalScenario {
            name: "Growth (6%)",
            rate: 0.06,
            risk_level: "Higher Risk",
        },
    ]
}

/// Gap metrics under one withdrawal-rate assumption.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScenarioOutcome {
    pub name: &'static str,
    pub rate: f64,
    pub risk_level: &'static str,
    pub capital_needed: f64,
    pub wealth_gap: f64,
    pub surplus: f64,
    pub years_of_security: f64,
    pub adequacy_ratio: f64,
    pub has_gap: bool,
}

/// Evaluate every standard scenario against the same financial picture.
/// Annual needs take the larger of the desired income and the projected
/// post-exit expenses, so an expense-heavy plan is not understated.
pub fn scenario_analysis(inputs: &WealthGapInputs) -> Vec<ScenarioOutcome> {
    let annual_needs = inputs
        .desired_income
        .max(inputs.post_exit_expenses)
        .max(0.0);
    let total_assets = inputs.current_assets.max(0.0) + inputs.business_value.max(0.0);

    standard_scenarios()
        .into_iter()
        .map(|scenario| {
            let capital_needed = annual_needs / scenario.rate;
            let wealth_gap = (capital_needed - total_assets).max(0.0);
            let surplus = (total_assets - capital_needed).max(0.0);
            let years_of_security = if annual_needs > 0.0 {
                total_assets / annual_needs
            } else {
                0.0
            };
            let adequacy_ratio = if capital_needed > 0.0 {
                total_assets / capital_needed
            } else {
                0.0
            };

            ScenarioOutcome {
                name: scenario.name,
                rate: scenario.rate,
                risk_level: scenario.risk_level,
                capital_needed,
                wealth_gap,
                surplus,
                years_of_security,
                adequacy_ratio,
                has_gap: wealth_gap > 0.0,
            }
        })
        .collect()
}

/// The scenario to lead the conversation with: the first one the owner can
/// already fund, falling back to the most conservative.
pub fn headline_scenario(outcomes: &[ScenarioOutcome]) -> Option<&ScenarioOutcome> {
    outcomes
        .iter()
        .find(|outcome| !outcome.has_gap)
        .or_else(|| outcomes.first())
}
