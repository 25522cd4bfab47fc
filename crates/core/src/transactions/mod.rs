//! Transactions module - the investment ledger rows fed into the engine.

mod transactions_constants;
mod transactions_model;


pub use transactions_constants::*;
pub use transactions_model::{InvestmentTransaction, TransactionType};
