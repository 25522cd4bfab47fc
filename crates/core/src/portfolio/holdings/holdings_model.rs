use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::portfolio::snapshot::HoldingsCalculationWarning;

/// Valued snapshot of one open position, ready for display.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    // Identification
    pub account_id: String,
    pub security_id: String,
    pub security_name: Option<String>,
    pub security_ticker: Option<String>,
    pub institution_name: Option<String>,

    // Position data
    pub quantity: Decimal,
    pub cost_basis: Decimal,
    pub currency_code: String,

    // Valuation
    pub current_price: Decimal,
    pub current_value: Decimal,
    pub gain_loss: Decimal,
    /// Gain as a percentage of cost basis; zero when cost basis is not positive.
    pub gain_loss_percent: Decimal,
}

/// Holdings produced by one run of the engine, plus any warnings.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct HoldingsCalculationResult {
    pub holdings: Vec<Holding>,
    pub warnings: Vec<HoldingsCalculationWarning>,
}

impl HoldingsCalculationResult {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Totals across the holdings that share one currency.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HoldingsSummary {
    pub currency_code: String,
    pub holdings_count: usize,
    pub total_value: Decimal,
    pub total_cost_basis: Decimal,
    pub total_gain_loss: Decimal,
    pub gain_loss_percent: Decimal,
}
