pub mod cashflow;
pub mod gap;
pub mod scenarios;

pub use cashflow::{normalize_cash_flow, CashFlowInputs, CashFlowResult};
pub use gap::{compute_wealth_gap, parse_money, WealthGapInputs, WealthGapResult};
pub use scenarios::{headline_scenario, scenario_analysis, ScenarioOutcome};
