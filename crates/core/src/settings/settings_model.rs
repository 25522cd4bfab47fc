//! Holdings engine settings.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::constants::{ENV_EMIT_WARNINGS, ENV_ROUNDING_DP, MAX_ROUNDING_PRECISION};
use crate::errors::{Error, Result, ValidationError};

/// Tunables for a holdings calculation.
///
/// Neither setting changes which holdings are produced; they only shape the
/// output. The defaults leave every figure unrounded and collect warnings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HoldingsSettings {
    /// Decimal places for monetary outputs. `None` keeps full precision.
    #[serde(default)]
    pub rounding_precision: Option<u32>,
    /// Whether non-fatal calculation warnings are collected.
    #[serde(default = "default_emit_warnings")]
    pub emit_warnings: bool,
}

fn default_emit_warnings() -> bool {
    true
}

impl Default for HoldingsSettings {
    fn default() -> Self {
        HoldingsSettings {
            rounding_precision: None,
            emit_warnings: default_emit_warnings(),
        }
    }
}

impl HoldingsSettings {
    /// Reads settings from the process environment, falling back to defaults
    /// for unset variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = HoldingsSettings::default();

        if let Some(raw) = non_empty(lookup(ENV_ROUNDING_DP)) {
            let precision = raw.parse::<u32>().map_err(|e| {
                ValidationError::InvalidInput(format!(
                    "{} must be a non-negative integer, got '{}': {}",
                    ENV_ROUNDING_DP, raw, e
                ))
            })?;
            settings.rounding_precision = Some(precision);
        }

        if let Some(raw) = non_empty(lookup(ENV_EMIT_WARNINGS)) {
            settings.emit_warnings = parse_bool(&raw).ok_or_else(|| {
                ValidationError::InvalidInput(format!(
                    "{} must be one of true/false/1/0, got '{}'",
                    ENV_EMIT_WARNINGS, raw
                ))
            })?;
        }

        settings.validate()?;
        debug!("Loaded holdings settings: {:?}", settings);
        Ok(settings)
    }

    /// Parses settings from a JSON payload, e.g. a stored preferences blob.
    pub fn from_json_str(payload: &str) -> Result<Self> {
        let settings: HoldingsSettings = serde_json::from_str(payload)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        match self.rounding_precision {
            Some(dp) if dp > MAX_ROUNDING_PRECISION => Err(Error::InvalidConfigValue(format!(
                "rounding precision {} exceeds the maximum of {}",
                dp, MAX_ROUNDING_PRECISION
            ))),
            _ => Ok(()),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
