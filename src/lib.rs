//! # matchcore
//!
//! Single-instrument limit order book and price-time priority matching engine.
//!
//! ## Architecture
//!
//! - **Types**: orders, fill events and their SSZ wire forms
//! - **OrderBook**: bid and ask sides with slab-based storage
//! - **Engine**: the crossing loop for Limit, Market and IOC orders
//!
//! ## Design Principles
//!
//! 1. **Determinism**: identical order flow yields identical fills and state root
//! 2. **No Floating Point**: prices and quantities are u64 scaled by 10^8
//! 3. **Synchronous Execution**: each call runs to completion under `&mut self`

// ============================================================================
// Module declarations
// ============================================================================

/// Orders, fills, wire messages and fixed-point helpers
pub mod types;

/// Two-sided order book
pub mod orderbook;

/// Matching engine
pub mod engine;

pub mod config;
pub mod error;
pub mod logging;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use config::EngineConfig;
pub use engine::{MatchResult, MatchingEngine, OrderOutcome};
pub use error::{BookError, ConfigError, EngineError, OrderError};
pub use orderbook::{Book, BookSide, OrderNode, PriceLevel};
pub use types::{
    FillRole, FilledOrder, IocOrder, LimitOrder, MarketOrder, Order, OrderMessage, OrderType, Side,
};
