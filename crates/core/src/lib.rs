//! Finlink Core - investment holdings aggregation engine.
//!
//! Reconstructs open positions (quantity and average cost basis) from an
//! unordered ledger of investment transactions, then values them against a
//! snapshot of latest close prices. The engine is pure: callers supply fully
//! materialized transactions, securities and accounts, and every call is a
//! full recompute with no state kept between calls.
//!
//! ```
//! use finlink_core::{
//!     AccountDirectory, HoldingsService, HoldingsServiceTrait, InvestmentTransaction,
//!     SecuritySnapshot,
//! };
//!
//! let ledger: Vec<InvestmentTransaction> = serde_json::from_str(
//!     r#"[
//!         {"id": "t1", "date": "2024-01-02", "accountId": "acc", "securityId": "vti",
//!          "type": "buy", "quantity": "10", "price": "10", "currencyCode": "USD"},
//!         {"id": "t2", "date": "2024-02-01", "accountId": "acc", "securityId": "vti",
//!          "type": "sell", "quantity": "5", "price": "12", "currencyCode": "USD"}
//!     ]"#,
//! )
//! .unwrap();
//!
//! let service = HoldingsService::default();
//! let holdings = service
//!     .get_holdings(&ledger, &SecuritySnapshot::new(), &AccountDirectory::new())
//!     .unwrap();
//! assert_eq!(holdings.len(), 1);
//! assert_eq!(holdings[0].quantity.to_string(), "5");
//! assert_eq!(holdings[0].cost_basis.to_string(), "50");
//! ```

pub mod accounts;
pub mod constants;
pub mod errors;
pub mod portfolio;
pub mod securities;
pub mod settings;
pub mod transactions;

pub use accounts::{Account, AccountDirectory};
pub use portfolio::*;
pub use securities::{Security, SecuritySnapshot};
pub use settings::HoldingsSettings;
pub use transactions::{InvestmentTransaction, TransactionType};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
