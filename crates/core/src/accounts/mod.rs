//! Accounts module - pass-through account records used to label holdings.

mod accounts_model;

#[cfg(test)]
mod accounts_model_tests;

pub use accounts_model::{Account, AccountDirectory};
