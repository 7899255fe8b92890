//! Engine configuration.
//!
//! Defaults can be overridden from the environment:
//!
//! | Variable | Field | Default |
//! |----------|-------|---------|
//! | `MATCHCORE_SYMBOL` | `symbol` | `BTC-USD` |
//! | `MATCHCORE_ORDER_CAPACITY` | `order_capacity` | `10000` |

use std::env;

use tracing::debug;

use crate::error::ConfigError;

pub const SYMBOL_VAR: &str = "MATCHCORE_SYMBOL";
pub const ORDER_CAPACITY_VAR: &str = "MATCHCORE_ORDER_CAPACITY";

pub const DEFAULT_SYMBOL: &str = "BTC-USD";
pub const DEFAULT_ORDER_CAPACITY: usize = 10_000;

/// Settings for a single [`crate::engine::MatchingEngine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Instrument this engine serves; stamped on orders decoded from the wire
    pub symbol: String,

    /// Slab slots pre-allocated per book side
    pub order_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            symbol: DEFAULT_SYMBOL.to_string(),
            order_capacity: DEFAULT_ORDER_CAPACITY,
        }
    }
}

impl EngineConfig {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Self::default()
        }
    }

    pub fn with_order_capacity(mut self, order_capacity: usize) -> Self {
        self.order_capacity = order_capacity;
        self
    }

    /// Defaults overridden by `MATCHCORE_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(symbol) = lookup(SYMBOL_VAR) {
            debug!(key = SYMBOL_VAR, value = %symbol, "config override");
            config.symbol = symbol;
        }

        if let Some(raw) = lookup(ORDER_CAPACITY_VAR) {
            debug!(key = ORDER_CAPACITY_VAR, value = %raw, "config override");
            config.order_capacity = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: ORDER_CAPACITY_VAR,
                value: raw.clone(),
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.symbol.trim().is_empty() {
            return Err(ConfigError::EmptySymbol);
        }
        Ok(())
    }
}
