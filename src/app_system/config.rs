use std::env;

use super::error::ConfigError;
use crate::analytics::DEFAULT_TOP_PRODUCTS;

pub const CHANNEL_BUFFER_VAR: &str = "INVENTORY_CHANNEL_BUFFER";
pub const TOP_PRODUCTS_VAR: &str = "INVENTORY_TOP_PRODUCTS";
pub const LOG_VAR: &str = "INVENTORY_LOG";

/// Runtime settings for an [`InventorySystem`](super::InventorySystem).
#[derive(Debug, Clone, PartialEq)]
pub struct SystemConfig {
    /// Capacity of each actor's inbox.
    pub channel_buffer: usize,
    /// How many products the dashboard ranks.
    pub top_products: usize,
    /// Filter used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            channel_buffer: 32,
            top_products: DEFAULT_TOP_PRODUCTS,
            log_filter: "info".to_string(),
        }
    }
}

impl SystemConfig {
    /// Reads settings from the process environment, after loading `.env`
    /// if one is present.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source. Unset variables
    /// keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            channel_buffer: positive(&lookup, CHANNEL_BUFFER_VAR, defaults.channel_buffer)?,
            top_products: positive(&lookup, TOP_PRODUCTS_VAR, defaults.top_products)?,
            log_filter: lookup(LOG_VAR)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.log_filter),
        })
    }
}

fn positive(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: usize) -> Result<usize, ConfigError> {
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    let value: usize = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: raw.clone(),
    })?;
    if value == 0 {
        return Err(ConfigError::Zero { key: key.to_string() });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn unset_variables_use_defaults() {
        let config = SystemConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, SystemConfig::default());
        assert_eq!(config.top_products, 5);
    }

    #[test]
    fn variables_override_defaults() {
        let config = SystemConfig::from_lookup(lookup_from(&[
            (CHANNEL_BUFFER_VAR, "64"),
            (TOP_PRODUCTS_VAR, " 3 "),
            (LOG_VAR, "debug"),
        ]))
        .unwrap();
        assert_eq!(config.channel_buffer, 64);
        assert_eq!(config.top_products, 3);
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn bad_values_are_rejected() {
        assert_eq!(
            SystemConfig::from_lookup(lookup_from(&[(CHANNEL_BUFFER_VAR, "lots")])),
            Err(ConfigError::InvalidValue { key: CHANNEL_BUFFER_VAR.into(), value: "lots".into() })
        );
        assert_eq!(
            SystemConfig::from_lookup(lookup_from(&[(TOP_PRODUCTS_VAR, "0")])),
            Err(ConfigError::Zero { key: TOP_PRODUCTS_VAR.into() })
        );
    }
}
