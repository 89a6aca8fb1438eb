use serde::{Deserialize, Serialize};

/// Capital multiple behind the 4% safe-withdrawal rule: one year of income
/// divided by 0.04. Domain policy carried as-is, not derived.
pub const CAPITAL_MULTIPLE: f64 = 25.0;

/// Raw financial picture for the gap analysis. All amounts are dollars and
/// non-negative; blank form fields arrive as zero (see `parse_money`).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WealthGapInputs {
    pub current_income: f64,
    pub desired_income: f64,
    pub current_assets: f64,
    pub business_value: f64,
    pub time_to_exit: f64,
    pub current_expenses: f64,
    pub post_exit_expenses: f64,
}

/// Derived gap metrics, recomputed from the inputs on every change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WealthGapResult {
    pub capital_needed: f64,
    pub total_assets: f64,
    pub wealth_gap: f64,
    pub has_gap: bool,
    pub annual_value_needed: f64,
    pub required_growth_pct: f64,
    pub years_of_security: f64,
}

impl WealthGapResult {
    /// Advisory headline for the result panel.
    pub fn recommendation(&self) -> String {
        if self.has_gap {
            format!(
                "Close a ${:.0} wealth gap: grow business value by ${:.0} per year ({:.1}% annually) through the exit window.",
                self.wealth_gap, self.annual_value_needed, self.required_growth_pct
            )
        } else {
            format!(
                "Projected assets fully fund the desired income at a 4% withdrawal rate, covering {:.1} years of income outright.",
                self.years_of_security
            )
        }
    }
}

/// Pure gap computation. Total over its domain: negative inputs are clamped
/// to zero and every division is guarded, so partial or blank data produces
/// a zeroed result rather than an error.
pub fn compute_wealth_gap(inputs: &WealthGapInputs) -> WealthGapResult {
    let desired_income = inputs.desired_income.max(0.0);
    let current_assets = inputs.current_assets.max(0.0);
    let business_value = inputs.business_value.max(0.0);

    let capital_needed = desired_income * CAPITAL_MULTIPLE;
    let total_assets = current_assets + business_value;
    let wealth_gap = (capital_needed - total_assets).max(0.0);
    let has_gap = wealth_gap > 0.0;

    // Sub-year horizons would inflate the annual requirement, so the window
    // floors at one year.
    let exit_years = inputs.time_to_exit.max(1.0);
    let annual_value_needed = wealth_gap / exit_years;

    let required_growth_pct = if business_value > 0.0 {
        round_tenth(annual_value_needed / business_value * 100.0)
    } else {
        0.0
    };

    let years_of_security = if desired_income > 0.0 {
        round_tenth(total_assets / desired_income)
    } else {
        0.0
    };

    WealthGapResult {
        capital_needed,
        total_assets,
        wealth_gap,
        has_gap,
        annual_value_needed,
        required_growth_pct,
        years_of_security,
    }
}

/// Lenient dollar parsing for form fields: strips `$`, thousands separators,
/// and whitespace; anything unparsable or negative becomes zero so the
/// calculator can always render a result.
pub fn parse_money(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | ' ' | '\t'))
        .collect();

    cleaned.parse::<f64>().unwrap_or(0.0).max(0.0)
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fully_funded_plan_reports_security_years() {
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
        assert_eq!(result.wealth_gap, 0.0);
        assert!(!result.has_gap);
        assert_eq!(result.years_of_security, 30.0);
        assert_eq!(result.required_growth_pct, 0.0);
    }

    #[test]
    fn gap_floors_at_zero_when_assets_exceed_needs() {
        let inputs = WealthGapInputs {
            desired_income: 150_000.0,
            current_assets: 800_000.0,
            business_value: 3_000_000.0,
            time_to_exit: 5.0,
            ..WealthGapInputs::default()
        };

        // capital needed 3.75M against 3.8M of assets: no gap.
        let result = compute_wealth_gap(&inputs);
        assert_eq!(result.capital_needed, 3_750_000.0);
        assert_eq!(result.total_assets, 3_800_000.0);
        assert_eq!(result.wealth_gap, 0.0);
        assert!(!result.has_gap);
    }

    #[test]
    fn shortfall_produces_annual_growth_requirement() {
        let inputs = WealthGapInputs {
            desired_income: 150_000.0,
            current_assets: 500_000.0,
            business_value: 3_000_000.0,
            time_to_exit: 5.0,
            ..WealthGapInputs::default()
        };

        let result = compute_wealth_gap(&inputs);
        assert_eq!(result.total_assets, 3_500_000.0);
        assert_eq!(result.wealth_gap, 250_000.0);
        assert!(result.has_gap);
        assert_eq!(result.annual_value_needed, 50_000.0);
        assert_eq!(result.required_growth_pct, 1.7);
        assert!(result.recommendation().contains("1.7%"));
    }

    #[test]
    fn exit_window_floors_at_one_year() {
        let inputs = WealthGapInputs {
            desired_income: 100_000.0,
            time_to_exit: 0.0,
            ..WealthGapInputs::default()
        };

        let result = compute_wealth_gap(&inputs);
        assert_eq!(result.annual_value_needed, result.wealth_gap);
    }

    #[test]
    fn all_blank_inputs_compute_to_zeroes() {
        let result = compute_wealth_gap(&WealthGapInputs::default());

        assert_eq!(result.capital_needed, 0.0);
        assert_eq!(result.total_assets, 0.0);
        assert_eq!(result.wealth_gap, 0.0);
        assert!(!result.has_gap);
        assert_eq!(result.required_growth_pct, 0.0);
        assert_eq!(result.years_of_security, 0.0);
    }

    #[test]
    fn money_parsing_tolerates_formatting_and_garbage() {
        assert_eq!(parse_money("150,000"), 150_000.0);
        assert_eq!(parse_money("$1,250,000.50"), 1_250_000.5);
        assert_eq!(parse_money("  42 "), 42.0);
        assert_eq!(parse_money(""), 0.0);
        assert_eq!(parse_money("n/a"), 0.0);
        assert_eq!(parse_money("-500"), 0.0);
    }

    #[test]
    fn recomputation_is_bit_identical() {
        let inputs = WealthGapInputs {
            desired_income: 123_456.0,
            current_assets: 654_321.0,
            business_value: 1_000_000.0,
            time_to_exit: 7.0,
            ..WealthGapInputs::default()
        };

        let first = compute_wealth_gap(&inputs);
        let second = compute_wealth_gap(&inputs);
        assert_eq!(first.wealth_gap.to_bits(), second.wealth_gap.to_bits());
        assert_eq!(
            first.required_growth_pct.to_bits(),
            second.required_growth_pct.to_bits()
        );
    }
}
