//! Wire form of an incoming order.
//!
//! Raw side and type tags are only interpreted here. This is the one place
//! where `InvalidSide` and `UndefinedOrderType` can be produced; once a
//! message becomes an [`Order`] both are unrepresentable.

use ssz_rs::prelude::*;

use crate::error::{EngineError, OrderError};
use crate::types::order::{IocOrder, LimitOrder, MarketOrder, Order, OrderType, Side};

/// SSZ order message.
///
/// Layout: 8+1+1+8+8+8 = 34 bytes. `price` is ignored for Market orders.
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct OrderMessage {
    pub id: u64,
    /// Order type as u8 (0=Limit, 1=Market, 2=IOC)
    pub order_type_raw: u8,
    /// Side as u8 (0=Buy, 1=Sell)
    pub side_raw: u8,
    pub quantity: u64,
    pub price: u64,
    pub time: u64,
}

impl OrderMessage {
    /// Validate the message and build an order for `symbol`.
    ///
    /// Checks run in order: type tag, side tag, then the variant's own
    /// quantity/price rules.
    pub fn into_order(self, symbol: &str) -> Result<Order, OrderError> {
        let order_type = OrderType::try_from(self.order_type_raw)?;
        let side = Side::try_from(self.side_raw)?;

        let order = match order_type {
            OrderType::Limit => {
                LimitOrder::new(self.id, symbol, self.quantity, self.price, side, self.time)?.into()
            }
            OrderType::Market => {
                MarketOrder::new(self.id, symbol, self.quantity, side, self.time)?.into()
            }
            OrderType::ImmediateOrCancel => {
                IocOrder::new(self.id, symbol, self.quantity, self.price, side, self.time)?.into()
            }
        };
        Ok(order)
    }

    /// Decode an SSZ-encoded message.
    pub fn decode(bytes: &[u8]) -> Result<Self, EngineError> {
        ssz_rs::deserialize(bytes).map_err(|e| EngineError::Codec(format!("{e:?}")))
    }

    /// SSZ-encode this message.
    pub fn encode(&self) -> Result<Vec<u8>, EngineError> {
        ssz_rs::serialize(self).map_err(|e| EngineError::Codec(format!("{e:?}")))
    }
}

impl From<&Order> for OrderMessage {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id(),
            order_type_raw: order.order_type().to_u8(),
            side_raw: order.side().to_u8(),
            quantity: order.quantity(),
            price: order.price().unwrap_or(0),
            time: order.time(),
        }
    }
}
