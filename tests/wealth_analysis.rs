//! Numeric coverage for the wealth calculators: the 4%-rule gap analysis,
//! the withdrawal-rate scenario table, and cash-flow normalization.

use exit_advisor::workflows::wealth::{
    compute_wealth_gap, headline_scenario, normalize_cash_flow, parse_money, scenario_analysis,
    CashFlowInputs, WealthGapInputs,
};
use exit_advisor::workflows::wealth::cashflow::{OwnerAdjustments, ReplacementCosts};

#[test]
fn funded_retirement_shows_security_instead_of_a_gap() {
    let inputs = WealthGapInputs {
        desired_income: 100_000.0,
        current_assets: 3_000_000.0,
        business_value: 0.0,
        time_to_exit: 5.0,
        ..WealthGapInputs::default()
    };

    let result = compute_wealth_gap(&inputs);
    assert_eq!(result.capital_needed, 2_500_000.0);
    assert_eq!(result.total_assets, 3_000_000.0);
    assert!(!result.has_gap);
    assert_eq!(result.years_of_security, 30.0);
}

#[test]
fn near_miss_still_floors_the_gap_at_zero() {
    let inputs = WealthGapInputs {
        desired_income: 150_000.0,
        current_assets: 800_000.0,
        business_value: 3_000_000.0,
        time_to_exit: 5.0,
        ..WealthGapInputs::default()
    };

    let result = compute_wealth_gap(&inputs);
    assert_eq!(result.capital_needed, 3_750_000.0);
    assert_eq!(result.total_assets, 3_800_000.0);
    assert_eq!(result.wealth_gap, 0.0);
    assert!(!result.has_gap);
}

#[test]
fn shortfall_translates_into_annual_growth_targets() {
    let inputs = WealthGapInputs {
        desired_income: 150_000.0,
        current_assets: 500_000.0,
        business_value: 3_000_000.0,
        time_to_exit: 5.0,
        ..WealthGapInputs::default()
    };

    let result = compute_wealth_gap(&inputs);
    assert_eq!(result.wealth_gap, 250_000.0);
    assert_eq!(result.annual_value_needed, 50_000.0);
    assert_eq!(result.required_growth_pct, 1.7);
}

#[test]
fn blank_form_fields_compute_instead_of_failing() {
    let inputs = WealthGapInputs {
        desired_income: parse_money(""),
        current_assets: parse_money("not entered"),
        business_value: parse_money("$0"),
        ..WealthGapInputs::default()
    };

    let result = compute_wealth_gap(&inputs);
    assert_eq!(result.capital_needed, 0.0);
    assert_eq!(result.wealth_gap, 0.0);
    assert!(!result.has_gap);
    assert_eq!(result.years_of_security, 0.0);
}

#[test]
fn scenario_table_spans_the_withdrawal_policies() {
    let inputs = WealthGapInputs {
        desired_income: 120_000.0,
        current_assets: 1_000_000.0,
        business_value: 1_400_000.0,
        ..WealthGapInputs::default()
    };

    let outcomes = scenario_analysis(&inputs);
    assert_eq!(outcomes.len(), 3);
    assert_eq!(outcomes[0].capital_needed, 3_000_000.0);
    assert!(outcomes[0].has_gap);
    assert!(!outcomes[2].has_gap);

    let headline = headline_scenario(&outcomes).expect("outcomes exist");
    assert_eq!(headline.name, "Balanced (5%)");
    assert!(!headline.has_gap);
    assert!((headline.adequacy_ratio - 1.0).abs() < 1e-9);
}

#[test]
fn normalization_grades_owner_heavy_books() {
    let inputs = CashFlowInputs {
        net_income: 250_000.0,
        depreciation: 45_000.0,
        interest_expense: 25_000.0,
        owner_adjustments: OwnerAdjustments {
            salary_excess: 80_000.0,
            discretionary_bonuses: 40_000.0,
            personal_travel: 15_000.0,
            ..OwnerAdjustments::default()
        },
        replacement_costs: ReplacementCosts {
            management_replacement: 110_000.0,
            additional_benefits: 12_000.0,
            ..ReplacementCosts::default()
        },
    };

    let result = normalize_cash_flow(&inputs);
    assert_eq!(result.total_add_backs, 205_000.0);
    assert_eq!(result.total_deductions, 122_000.0);
    assert_eq!(result.adjusted_cash_flow, 333_000.0);
    assert_eq!(result.adjustment_pct, 33.0);
    // |135k - 122k| / 250k is a modest adjustment profile.
    assert_eq!(result.quality_score, 95);
}
