//! Fill events emitted by the matcher.
//!
//! ## Roles
//!
//! - **Resting**: a previously resting order that was hit. One event per resting
//!   order consumed, at that order's own price.
//! - **Aggressor**: the incoming order's cumulative fill for the call, emitted
//!   once after the resting fills when anything traded.
//!
//! ## SSZ Serialization
//!
//! [`FillRecord`] is the fixed-size wire form of a fill. The symbol is not
//! encoded; one engine serves one instrument.

use std::fmt;

use ssz_rs::prelude::*;

use crate::error::EngineError;
use crate::types::order::{LimitOrder, OrderCore, Side};
use crate::types::price::from_fixed_trimmed;

/// Which party of the match a fill event describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FillRole {
    /// The incoming order
    Aggressor,
    /// A resting order hit by the aggressor
    Resting,
}

/// A single fill event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilledOrder {
    /// Id of the order this fill belongs to
    pub id: u64,

    /// Instrument identifier
    pub symbol: String,

    /// Traded quantity in fixed-point, not the order's original size
    pub quantity: u64,

    /// Execution price in fixed-point
    pub price: u64,

    pub side: Side,

    /// Ordering key of the filled order
    pub time: u64,

    pub role: FillRole,
}

impl FilledOrder {
    /// Fill for a resting order, priced at the resting order's own price.
    pub fn resting(order: &LimitOrder, quantity: u64) -> Self {
        Self {
            id: order.id(),
            symbol: order.symbol().to_string(),
            quantity,
            price: order.price(),
            side: order.side(),
            time: order.time(),
            role: FillRole::Resting,
        }
    }

    /// Summary fill for the aggressor.
    pub fn aggressor(order: &OrderCore, quantity: u64, price: u64) -> Self {
        Self {
            id: order.id(),
            symbol: order.symbol().to_string(),
            quantity,
            price,
            side: order.side(),
            time: order.time(),
            role: FillRole::Aggressor,
        }
    }

    #[inline]
    pub fn is_aggressor(&self) -> bool {
        self.role == FillRole::Aggressor
    }

    /// Notional value (price * quantity), scaled by 10^16.
    pub fn notional_raw(&self) -> u128 {
        (self.price as u128) * (self.quantity as u128)
    }

    /// Fixed-size wire record for this fill
    pub fn to_record(&self) -> FillRecord {
        FillRecord {
            id: self.id,
            quantity: self.quantity,
            price: self.price,
            side_raw: self.side.to_u8(),
            time: self.time,
            aggressor: self.is_aggressor(),
        }
    }

    /// SSZ-encode this fill.
    pub fn encode(&self) -> Result<Vec<u8>, EngineError> {
        ssz_rs::serialize(&self.to_record()).map_err(|e| EngineError::Codec(format!("{e:?}")))
    }
}

impl fmt::Display for FilledOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let role = match self.role {
            FillRole::Aggressor => "aggressor",
            FillRole::Resting => "resting",
        };
        write!(
            f,
            "{} {:?} #{} {} @ {} ({})",
            self.symbol,
            self.side,
            self.id,
            from_fixed_trimmed(self.quantity),
            from_fixed_trimmed(self.price),
            role
        )
    }
}

/// SSZ wire form of a [`FilledOrder`].
///
/// Layout: 8+8+8+1+8+1 = 34 bytes.
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct FillRecord {
    pub id: u64,
    pub quantity: u64,
    pub price: u64,
    /// Side as u8 (0=Buy, 1=Sell)
    pub side_raw: u8,
    pub time: u64,
    pub aggressor: bool,
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn resting_sell() -> LimitOrder {
        LimitOrder::new(10, "BTC-USD", 5, 5_000_000_000, Side::Sell, 3).unwrap()
    }

    #[test]
    fn test_resting_fill_uses_resting_price() {
        let order = resting_sell();
        let fill = FilledOrder::resting(&order, 2);

        assert_eq!(fill.id, 10);
        assert_eq!(fill.quantity, 2);
        assert_eq!(fill.price, 5_000_000_000);
        assert_eq!(fill.side, Side::Sell);
        assert_eq!(fill.time, 3);
        assert!(!fill.is_aggressor());
    }

    #[test]
    fn test_aggressor_fill() {
        let core = OrderCore::new(11, "BTC-USD", 9, Side::Buy, 4).unwrap();
        let fill = FilledOrder::aggressor(&core, 7, 51);

        assert_eq!(fill.id, 11);
        assert_eq!(fill.quantity, 7);
        assert_eq!(fill.price, 51);
        assert_eq!(fill.role, FillRole::Aggressor);
    }

    #[test]
    fn test_notional() {
        let fill = FilledOrder::resting(&resting_sell(), 3);
        assert_eq!(fill.notional_raw(), 15_000_000_000);
    }

    #[test]
    fn test_display() {
        let order = LimitOrder::new(1, "BTC-USD", 150_000_000, 5_000_000_000_000, Side::Buy, 0)
            .unwrap();
        let fill = FilledOrder::resting(&order, 150_000_000);
        assert_eq!(fill.to_string(), "BTC-USD Buy #1 1.5 @ 50000 (resting)");
    }

    #[test]
    fn test_record_ssz_size() {
        let fill = FilledOrder::resting(&resting_sell(), 1);
        let bytes = fill.encode().expect("Failed to serialize");
        assert_eq!(bytes.len(), 34, "FillRecord should serialize to 34 bytes");

        let decoded: FillRecord = ssz_rs::deserialize(&bytes).expect("Failed to deserialize");
        assert_eq!(decoded, fill.to_record());
        assert!(!decoded.aggressor);
    }
}
