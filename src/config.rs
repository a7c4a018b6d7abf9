//! Engine configuration.
//!
//! Defaults are usable as-is. [`EngineConfig::from_env`] overrides them from
//! `COSTWRIGHT_*` environment variables (the binary loads `.env` first).

use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::ConfigError;
use crate::pricing::cache::DEFAULT_TTL;

/// How many of the cheapest items each catalog contributes to an estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryLimits {
    pub labor: usize,
    pub materials: usize,
    pub tools: usize,
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self {
            labor: 5,
            materials: 10,
            tools: 8,
        }
    }
}

/// Multipliers turning a point total into a min/max range.
///
/// `lower <= 1 <= upper` always holds, so a band never inverts a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarianceBand {
    lower: Decimal,
    upper: Decimal,
}

impl VarianceBand {
    pub fn new(lower: Decimal, upper: Decimal) -> Result<Self, ConfigError> {
        if lower < Decimal::ZERO || lower > Decimal::ONE || upper < Decimal::ONE {
            return Err(ConfigError::InvalidValue {
                key: "variance band".to_string(),
                reason: format!("expected 0 <= lower <= 1 <= upper, got {} / {}", lower, upper),
            });
        }
        Ok(Self { lower, upper })
    }

    const fn fixed(lower: Decimal, upper: Decimal) -> Self {
        Self { lower, upper }
    }

    pub fn lower(&self) -> Decimal {
        self.lower
    }

    pub fn upper(&self) -> Decimal {
        self.upper
    }
}

/// Per-category variance bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarianceBands {
    pub materials: VarianceBand,
    /// Wider than the others: trade rates vary more than list prices.
    pub labor: VarianceBand,
    pub tools: VarianceBand,
}

impl Default for VarianceBands {
    fn default() -> Self {
        Self {
            materials: VarianceBand::fixed(dec!(0.9), dec!(1.1)),
            labor: VarianceBand::fixed(dec!(0.8), dec!(1.2)),
            tools: VarianceBand::fixed(dec!(0.9), dec!(1.1)),
        }
    }
}

/// Configuration for the estimator.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub limits: QueryLimits,
    pub bands: VarianceBands,
    /// Per-catalog query timeout. A timeout counts as an empty result.
    pub catalog_timeout: Duration,
    /// Time-to-live for cached catalog queries.
    pub cache_ttl: Duration,
    pub cache_enabled: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            limits: QueryLimits::default(),
            bands: VarianceBands::default(),
            catalog_timeout: Duration::from_secs(5),
            cache_ttl: DEFAULT_TTL,
            cache_enabled: true,
        }
    }
}

impl EngineConfig {
    /// Defaults overridden by environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = parse::<usize>(&lookup, "COSTWRIGHT_LABOR_LIMIT")? {
            config.limits.labor = v;
        }
        if let Some(v) = parse::<usize>(&lookup, "COSTWRIGHT_MATERIAL_LIMIT")? {
            config.limits.materials = v;
        }
        if let Some(v) = parse::<usize>(&lookup, "COSTWRIGHT_TOOL_LIMIT")? {
            config.limits.tools = v;
        }
        if let Some(ms) = parse::<u64>(&lookup, "COSTWRIGHT_CATALOG_TIMEOUT_MS")? {
            if ms == 0 {
                return Err(ConfigError::InvalidValue {
                    key: "COSTWRIGHT_CATALOG_TIMEOUT_MS".to_string(),
                    reason: "must be greater than zero".to_string(),
                });
            }
            config.catalog_timeout = Duration::from_millis(ms);
        }
        if let Some(secs) = parse::<u64>(&lookup, "COSTWRIGHT_CACHE_TTL_SECS")? {
            config.cache_ttl = Duration::from_secs(secs);
        }
        if let Some(enabled) = parse::<bool>(&lookup, "COSTWRIGHT_CACHE_ENABLED")? {
            config.cache_enabled = enabled;
        }

        Ok(config)
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                reason: format!("'{}': {}", raw, e),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = EngineConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.limits, QueryLimits { labor: 5, materials: 10, tools: 8 });
        assert_eq!(config.bands.labor.lower(), dec!(0.8));
        assert_eq!(config.bands.labor.upper(), dec!(1.2));
        assert_eq!(config.cache_ttl, Duration::from_secs(900));
        assert!(config.cache_enabled);
    }

    #[test]
    fn test_env_overrides() {
        let config = EngineConfig::from_lookup(lookup(&[
            ("COSTWRIGHT_LABOR_LIMIT", "3"),
            ("COSTWRIGHT_CATALOG_TIMEOUT_MS", "250"),
            ("COSTWRIGHT_CACHE_ENABLED", "false"),
            ("COSTWRIGHT_TOOL_LIMIT", ""),
        ]))
        .unwrap();
        assert_eq!(config.limits.labor, 3);
        assert_eq!(config.limits.tools, 8);
        assert_eq!(config.catalog_timeout, Duration::from_millis(250));
        assert!(!config.cache_enabled);
    }

    #[test]
    fn test_invalid_values() {
        let err = EngineConfig::from_lookup(lookup(&[("COSTWRIGHT_MATERIAL_LIMIT", "ten")]))
            .unwrap_err();
        assert!(err.to_string().contains("COSTWRIGHT_MATERIAL_LIMIT"));

        assert!(
            EngineConfig::from_lookup(lookup(&[("COSTWRIGHT_CATALOG_TIMEOUT_MS", "0")])).is_err()
        );
    }

    #[test]
    fn test_band_invariant() {
        assert!(VarianceBand::new(dec!(0.8), dec!(1.2)).is_ok());
        assert!(VarianceBand::new(dec!(1.1), dec!(1.2)).is_err());
        assert!(VarianceBand::new(dec!(0.9), dec!(0.95)).is_err());
        assert!(VarianceBand::new(dec!(-0.1), dec!(1.0)).is_err());
    }
}
