//! Core data types for the matching core
//!
//! ## Types
//!
//! - [`Order`]: incoming order, one of [`LimitOrder`], [`MarketOrder`], [`IocOrder`]
//! - [`Side`]: Buy or Sell
//! - [`OrderType`]: Limit, Market or IOC
//! - [`FilledOrder`]: a fill event returned by the engine
//! - [`OrderMessage`]: SSZ wire form of an incoming order
//!
//! ## Fixed-Point Arithmetic
//!
//! All prices and quantities are stored as `u64` scaled by 10^8.

mod order;
mod fill;
mod message;
pub mod price;

pub use order::{IocOrder, LimitOrder, MarketOrder, Order, OrderCore, OrderType, Side};
pub use fill::{FillRecord, FillRole, FilledOrder};
pub use message::OrderMessage;
