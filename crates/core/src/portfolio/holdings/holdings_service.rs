use crate::accounts::AccountDirectory;
use crate::errors::{CalculatorError, Result};
use crate::portfolio::holdings::holdings_model::{
    Holding, HoldingsCalculationResult, HoldingsSummary,
};
use crate::portfolio::holdings::holdings_valuation_service::gain_loss_percent;
use crate::portfolio::snapshot::HoldingsCalculator;
use crate::securities::SecuritySnapshot;
use crate::settings::HoldingsSettings;
use crate::transactions::InvestmentTransaction;
use log::debug;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::{HoldingsValuationService, HoldingsValuationServiceTrait};

pub trait HoldingsServiceTrait: Send + Sync {
    /// Runs the full pipeline: normalize, accumulate, value.
    fn calculate_holdings(
        &self,
        transactions: &[InvestmentTransaction],
        securities: &SecuritySnapshot,
        accounts: &AccountDirectory,
    ) -> Result<HoldingsCalculationResult>;

    /// Holdings only, warnings discarded.
    fn get_holdings(
        &self,
        transactions: &[InvestmentTransaction],
        securities: &SecuritySnapshot,
        accounts: &AccountDirectory,
    ) -> Result<Vec<Holding>>;

    /// Holdings of a single account. The ledger is still validated as a whole.
    fn get_account_holdings(
        &self,
        account_id: &str,
        transactions: &[InvestmentTransaction],
        securities: &SecuritySnapshot,
        accounts: &AccountDirectory,
    ) -> Result<Vec<Holding>>;
}

/// Entry point of the holdings engine.
///
/// Holds no per-call state; one instance can serve concurrent callers.
pub struct HoldingsService {
    calculator: HoldingsCalculator,
    valuation_service: Arc<dyn HoldingsValuationServiceTrait>,
}

impl HoldingsService {
    pub fn new(settings: &HoldingsSettings) -> Self {
        Self::with_valuation_service(
            settings,
            Arc::new(HoldingsValuationService::new(settings.rounding_precision)),
        )
    }

    pub fn with_valuation_service(
        settings: &HoldingsSettings,
        valuation_service: Arc<dyn HoldingsValuationServiceTrait>,
    ) -> Self {
        Self {
            calculator: HoldingsCalculator::new(settings),
            valuation_service,
        }
    }
}

impl Default for HoldingsService {
    fn default() -> Self {
        Self::new(&HoldingsSettings::default())
    }
}

impl HoldingsServiceTrait for HoldingsService {
    fn calculate_holdings(
        &self,
        transactions: &[InvestmentTransaction],
        securities: &SecuritySnapshot,
        accounts: &AccountDirectory,
    ) -> Result<HoldingsCalculationResult> {
        debug!(
            "Calculating holdings from {} transactions against {} priced securities",
            transactions.len(),
            securities.len()
        );
        let positions = self.calculator.calculate_positions(transactions)?;
        let holdings =
            self.valuation_service
                .value_positions(&positions.positions, securities, accounts)?;

        Ok(HoldingsCalculationResult {
            holdings,
            warnings: positions.warnings,
        })
    }

    fn get_holdings(
        &self,
        transactions: &[InvestmentTransaction],
        securities: &SecuritySnapshot,
        accounts: &AccountDirectory,
    ) -> Result<Vec<Holding>> {
        Ok(self
            .calculate_holdings(transactions, securities, accounts)?
            .holdings)
    }

    fn get_account_holdings(
        &self,
        account_id: &str,
        transactions: &[InvestmentTransaction],
        securities: &SecuritySnapshot,
        accounts: &AccountDirectory,
    ) -> Result<Vec<Holding>> {
        let holdings = self.get_holdings(transactions, securities, accounts)?;
        Ok(holdings
            .into_iter()
            .filter(|h| h.account_id == account_id)
            .collect())
    }
}

/// Totals holdings per currency, ordered by currency code.
///
/// Holdings in different currencies are never added together. Fails if a
/// total overflows.
pub fn summarize_holdings(holdings: &[Holding]) -> Result<Vec<HoldingsSummary>> {
    let mut by_currency: BTreeMap<&str, HoldingsSummary> = BTreeMap::new();

    for holding in holdings {
        let summary = by_currency
            .entry(holding.currency_code.as_str())
            .or_insert_with(|| HoldingsSummary {
                currency_code: holding.currency_code.clone(),
                holdings_count: 0,
                total_value: Decimal::ZERO,
                total_cost_basis: Decimal::ZERO,
                total_gain_loss: Decimal::ZERO,
                gain_loss_percent: Decimal::ZERO,
            });
        summary.holdings_count += 1;
        summary.total_value = add_total(summary.total_value, holding.current_value, "value")?;
        summary.total_cost_basis =
            add_total(summary.total_cost_basis, holding.cost_basis, "cost basis")?;
        summary.total_gain_loss =
            add_total(summary.total_gain_loss, holding.gain_loss, "gain/loss")?;
    }

    by_currency
        .into_values()
        .map(|mut summary| {
            summary.gain_loss_percent =
                gain_loss_percent(summary.total_gain_loss, summary.total_cost_basis)?;
            Ok(summary)
        })
        .collect()
}

fn add_total(total: Decimal, amount: Decimal, what: &str) -> Result<Decimal> {
    total.checked_add(amount).ok_or_else(|| {
        CalculatorError::Calculation(format!("total {} overflowed", what)).into()
    })
}
