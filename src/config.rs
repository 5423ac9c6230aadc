use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Parsing and output knobs for one run. Every field has a default so a
/// config file only needs the keys it overrides.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// separates the log prefix from the FIX body
    pub prefix_separator: String,
    /// printable stand-in for the SOH field delimiter
    pub escaped_delimiter: String,
    /// chrono format of TransactTime (60)
    pub timestamp_format: String,
    pub price_decimals: u32,
    pub improvement_decimals: u32,
    pub sort_venues: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prefix_separator: " : ".to_string(),
            escaped_delimiter: "^A".to_string(),
            timestamp_format: "%Y%m%d-%H:%M:%S%.f".to_string(),
            price_decimals: 6,
            improvement_decimals: 10,
            sort_venues: true,
        }
    }
}

impl Config {
    pub fn from_json(s: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json(&s).with_context(|| format!("parsing config {}", path.display()))
    }

    fn validate(&self) -> Result<()> {
        if self.prefix_separator.is_empty() {
            bail!("prefix_separator must not be empty");
        }
        if self.escaped_delimiter.is_empty() {
            bail!("escaped_delimiter must not be empty");
        }
        // rust_decimal keeps at most 28 fractional digits
        if self.price_decimals > 28 || self.improvement_decimals > 28 {
            bail!("decimal places must be at most 28");
        }
        Ok(())
    }
}
