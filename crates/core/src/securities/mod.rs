//! Securities module - instrument records and the latest-price snapshot.

mod securities_model;


pub use securities_model::{Security, SecuritySnapshot};
