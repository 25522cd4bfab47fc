//! Portfolio module - position reconstruction and valuation.

pub mod holdings;
pub mod snapshot;

pub use holdings::*;
pub use snapshot::*;
