use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{CalculatorError, Result};
use crate::transactions::{InvestmentTransaction, TransactionType};

/// Grouping key for positions: one position per account and security.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub struct PositionKey {
    pub account_id: String,
    pub security_id: String,
}

impl PositionKey {
    pub fn new(account_id: impl Into<String>, security_id: impl Into<String>) -> Self {
        PositionKey {
            account_id: account_id.into(),
            security_id: security_id.into(),
        }
    }
}

impl fmt::Display for PositionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.account_id, self.security_id)
    }
}

/// Running state for one account+security pair.
///
/// Cost basis is a single blended total: every unit shares the same average
/// cost. There is no lot queue.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub account_id: String,
    pub security_id: String,
    pub quantity: Decimal,
    /// Total cost of the units held, in `currency_code`.
    pub cost_basis: Decimal,
    /// Currency of the last transaction applied to this position.
    pub currency_code: String,
}

/// What a single transaction did to a position.
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionOutcome {
    /// Quantity and/or cost basis changed.
    Applied,
    /// A sell arrived while nothing was held. Nothing changed.
    SellWithoutInventory,
    /// A fee arrived without a quantity. Nothing changed.
    FeeWithoutQuantity,
    /// Transfer, dividend, interest and other types never touch positions.
    Inert,
}

impl Position {
    /// Empty position for `key`, as seen before its first transaction.
    pub fn new(key: &PositionKey, currency_code: &str) -> Self {
        Position {
            account_id: key.account_id.clone(),
            security_id: key.security_id.clone(),
            quantity: Decimal::ZERO,
            cost_basis: Decimal::ZERO,
            currency_code: currency_code.to_string(),
        }
    }

    pub fn key(&self) -> PositionKey {
        PositionKey::new(self.account_id.clone(), self.security_id.clone())
    }

    /// A position is open while it holds a strictly positive quantity.
    pub fn is_open(&self) -> bool {
        self.quantity > Decimal::ZERO
    }

    /// Average cost per unit, or zero when nothing is held.
    pub fn average_cost(&self) -> Result<Decimal> {
        if !self.is_open() {
            return Ok(Decimal::ZERO);
        }
        checked(self.cost_basis.checked_div(self.quantity), "average cost")
    }

    /// Folds one transaction into the position and refreshes its currency.
    pub fn apply(&mut self, transaction: &InvestmentTransaction) -> Result<TransitionOutcome> {
        if transaction.account_key() != Some(self.account_id.as_str())
            || transaction.security_key() != Some(self.security_id.as_str())
        {
            return Err(CalculatorError::InvalidTransaction(format!(
                "transaction {} does not belong to position {}/{}",
                transaction.id, self.account_id, self.security_id
            ))
            .into());
        }

        let outcome = match transaction.transaction_type {
            TransactionType::Buy | TransactionType::Cash => self.add_units(
                transaction.qty(),
                transaction.unit_price(),
                transaction.fee_amt(),
            )?,
            TransactionType::Sell => self.reduce_units(transaction.qty())?,
            TransactionType::Fee => {
                if transaction.has_quantity() {
                    self.add_fee(transaction.fee_amt())?
                } else {
                    TransitionOutcome::FeeWithoutQuantity
                }
            }
            TransactionType::Transfer
            | TransactionType::Dividend
            | TransactionType::Interest
            | TransactionType::Other => TransitionOutcome::Inert,
        };
        self.currency_code = transaction.currency_code.clone();
        Ok(outcome)
    }

    /// Adds `quantity` units costing `quantity * unit_price + fee`.
    pub fn add_units(
        &mut self,
        quantity: Decimal,
        unit_price: Decimal,
        fee: Decimal,
    ) -> Result<TransitionOutcome> {
        let cost = checked(quantity.checked_mul(unit_price), "acquisition cost")?;
        let cost = checked(cost.checked_add(fee), "acquisition cost")?;
        self.quantity = checked(self.quantity.checked_add(quantity), "quantity")?;
        self.cost_basis = checked(self.cost_basis.checked_add(cost), "cost basis")?;
        Ok(TransitionOutcome::Applied)
    }

    /// Removes `quantity` units at the current average cost.
    ///
    /// Only applies while the position holds units; a sell against an empty or
    /// negative position leaves it untouched. A sell larger than the holding is
    /// applied in full, which closes the position.
    pub fn reduce_units(&mut self, quantity: Decimal) -> Result<TransitionOutcome> {
        if !self.is_open() {
            debug!(
                "Sell of {} against position {}/{} with no units held. Ignored.",
                quantity, self.account_id, self.security_id
            );
            return Ok(TransitionOutcome::SellWithoutInventory);
        }
        if quantity > self.quantity {
            debug!(
                "Sell of {} exceeds held {} for position {}/{}. Position will close.",
                quantity, self.quantity, self.account_id, self.security_id
            );
        }

        // cost_basis * sold / held, i.e. average cost times units sold
        let relieved = checked(self.cost_basis.checked_mul(quantity), "relieved cost")?;
        let relieved = checked(relieved.checked_div(self.quantity), "relieved cost")?;
        self.cost_basis = checked(self.cost_basis.checked_sub(relieved), "cost basis")?;
        self.quantity = checked(self.quantity.checked_sub(quantity), "quantity")?;
        Ok(TransitionOutcome::Applied)
    }

    /// Capitalises a fee into cost basis. Fees count by magnitude.
    pub fn add_fee(&mut self, fee: Decimal) -> Result<TransitionOutcome> {
        self.cost_basis = checked(self.cost_basis.checked_add(fee.abs()), "cost basis")?;
        Ok(TransitionOutcome::Applied)
    }
}

fn checked(value: Option<Decimal>, what: &str) -> Result<Decimal> {
    value.ok_or_else(|| CalculatorError::Calculation(format!("{} overflowed", what)).into())
}
