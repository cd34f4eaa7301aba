//! Runtime configuration.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `POS_TAX_RATE` | `0.08` | Sales tax applied to the subtotal |
//! | `POS_DEFAULT_PREP_MINUTES` | `15` | Kitchen estimate when no line has one |
//! | `POS_MAILBOX_CAPACITY` | `32` | Order actor mailbox size |
//!
//! Unparseable or out-of-range values fall back to the default with a warning.

use crate::pricing::PricingEngine;
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::warn;

#[derive(Debug, Clone, PartialEq)]
pub struct PosConfig {
    pub tax_rate: Decimal,
    pub default_prep_minutes: u32,
    pub mailbox_capacity: usize,
}

impl Default for PosConfig {
    fn default() -> Self {
        Self {
            tax_rate: PricingEngine::DEFAULT_TAX_RATE,
            default_prep_minutes: 15,
            mailbox_capacity: 32,
        }
    }
}

impl PosConfig {
    /// Loads from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            tax_rate: parse_or(&lookup, "POS_TAX_RATE", defaults.tax_rate, |rate| {
                !rate.is_sign_negative() && *rate < Decimal::ONE
            }),
            default_prep_minutes: parse_or(
                &lookup,
                "POS_DEFAULT_PREP_MINUTES",
                defaults.default_prep_minutes,
                |minutes| *minutes > 0,
            ),
            mailbox_capacity: parse_or(
                &lookup,
                "POS_MAILBOX_CAPACITY",
                defaults.mailbox_capacity,
                |capacity| *capacity > 0,
            ),
        }
    }
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
    valid: impl Fn(&T) -> bool,
) -> T
where
    T: FromStr + std::fmt::Display,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse::<T>() {
        Ok(value) if valid(&value) => value,
        _ => {
            warn!(key, value = %raw, fallback = %default, "Invalid config value");
            default
        }
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
    fn missing_values_use_defaults() {
        let config = PosConfig::from_lookup(lookup(&[]));
        assert_eq!(config, PosConfig::default());
        assert_eq!(config.tax_rate, Decimal::new(8, 2));
        assert_eq!(config.default_prep_minutes, 15);
        assert_eq!(config.mailbox_capacity, 32);
    }

    #[test]
    fn values_are_read() {
        let config = PosConfig::from_lookup(lookup(&[
            ("POS_TAX_RATE", "0.0825"),
            ("POS_DEFAULT_PREP_MINUTES", " 20 "),
            ("POS_MAILBOX_CAPACITY", "128"),
        ]));
        assert_eq!(config.tax_rate, Decimal::new(825, 4));
        assert_eq!(config.default_prep_minutes, 20);
        assert_eq!(config.mailbox_capacity, 128);
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = PosConfig::from_lookup(lookup(&[
            ("POS_TAX_RATE", "-0.1"),
            ("POS_DEFAULT_PREP_MINUTES", "0"),
            ("POS_MAILBOX_CAPACITY", "lots"),
        ]));
        assert_eq!(config, PosConfig::default());
    }
}
