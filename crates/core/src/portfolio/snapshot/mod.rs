//! Portfolio snapshot module - ledger replay into open positions.

pub mod holdings_calculator;
pub mod ledger_normalizer;
mod positions_model;
mod snapshot_model;

pub use holdings_calculator::*;
pub use ledger_normalizer::{normalize_ledger, NormalizedLedger};
pub use positions_model::*;
pub use snapshot_model::*;


#[cfg(test)]
mod ledger_normalizer_tests;

#[cfg(test)]
mod positions_model_tests;
