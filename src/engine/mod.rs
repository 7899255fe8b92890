//! Matching engine.
//!
//! ## Matching Rules
//!
//! - **Buy orders** match against asks (lowest price first)
//! - **Sell orders** match against bids (highest price first)
//! - Within a price, the oldest resting order trades first
//! - Trades execute at the resting order's price
//! - **Limit** remainders rest; **Market** and **IOC** remainders are discarded
//!
//! ## Example
//!
//! ```
//! use matchcore::engine::MatchingEngine;
//! use matchcore::types::{LimitOrder, Order, Side};
//!
//! let mut engine = MatchingEngine::new("BTC-USD");
//!
//! let sell: Order = LimitOrder::new(1, "BTC-USD", 5, 100, Side::Sell, 1).unwrap().into();
//! assert!(engine.handle_order(&sell).unwrap().is_empty());
//!
//! let buy: Order = LimitOrder::new(2, "BTC-USD", 5, 101, Side::Buy, 2).unwrap().into();
//! let fills = engine.handle_order(&buy).unwrap();
//!
//! // resting fill at the resting price, then the aggressor summary
//! assert_eq!(fills.len(), 2);
//! assert_eq!(fills[0].id, 1);
//! assert_eq!(fills[0].price, 100);
//! assert_eq!(fills[1].id, 2);
//! assert!(engine.book().is_empty(Side::Sell));
//! ```

pub mod crossing;
pub mod matcher;

pub use crossing::{crosses, ResidualPolicy};
pub use matcher::{MatchResult, MatchingEngine, OrderOutcome};
