use serde::{Deserialize, Serialize};

/// Owner-specific add-backs discovered during normalization.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OwnerAdjustments {
    pub salary_excess: f64,
    pub discretionary_bonuses: f64,
    pub benefits_excess: f64,
    pub personal_auto: f64,
    pub personal_travel: f64,
    pub personal_other: f64,
    pub family_salary_excess: f64,
    pub family_benefits_excess: f64,
}

impl OwnerAdjustments {
    pub fn total(&self) -> f64 {
        self.salary_excess
            + self.discretionary_bonuses
            + self.benefits_excess
            + self.personal_auto
            + self.personal_travel
            + self.personal_other
            + self.family_salary_excess
            + self.family_benefits_excess
    }
}

/// Costs a buyer would incur to replace the owner's unpaid contribution.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplacementCosts {
    pub management_replacement: f64,
    pub additional_benefits: f64,
    pub additional_insurance: f64,
}

impl ReplacementCosts {
    pub fn total(&self) -> f64 {
        self.management_replacement + self.additional_benefits + self.additional_insurance
    }
}

/// Tax-return figures plus the adjustment schedules.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CashFlowInputs {
    pub net_income: f64,
    pub depreciation: f64,
    pub interest_expense: f64,
    pub owner_adjustments: OwnerAdjustments,
    pub replacement_costs: ReplacementCosts,
}

/// Normalized cash flow with a quality grade for the adjustment profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CashFlowResult {
    pub base_net_income: f64,
    pub total_add_backs: f64,
    pub total_deductions: f64,
    pub adjusted_cash_flow: f64,
    pub adjustment_pct: f64,
    pub quality_score: u8,
}

/// Normalize reported net income into buyer-view cash flow. Pure and total:
/// an all-zero form yields an all-zero result.
pub fn normalize_cash_flow(inputs: &CashFlowInputs) -> CashFlowResult {
    let base = inputs.net_income.max(0.0);
    let owner_add_backs = inputs.owner_adjustments.total().max(0.0);
    let deductions = inputs.replacement_costs.total().max(0.0);
    let non_cash = inputs.depreciation.max(0.0) + inputs.interest_expense.max(0.0);

    let adjusted = base + non_cash + owner_add_backs - deductions;
    let adjustment_pct = if base > 0.0 {
        ((adjusted - base) / base * 100.0).round()
    } else {
        0.0
    };

    CashFlowResult {
        base_net_income: base,
        total_add_backs: non_cash + owner_add_backs,
        total_deductions: deductions,
        adjusted_cash_flow: adjusted.max(0.0),
        adjustment_pct,
        quality_score: quality_score(base, owner_add_backs, deductions),
    }
}

/// Grade how defensible the normalization is: heavy owner adjustments
/// relative to reported income draw buyer scrutiny and a lower grade.
fn quality_score(base: f64, add_backs: f64, deductions: f64) -> u8 {
    if base <= 0.0 {
        return 0;
    }

    let adjustment_ratio = (add_backs - deductions).abs() / base;
    if adjustment_ratio < 0.1 {
        95
    } else if adjustment_ratio < 0.2 {
        85
    } else if adjustment_ratio < 0.4 {
        70
    } else if adjustment_ratio < 0.6 {
        55
    } else {
        40
    }
}
