//! Price-time priority matcher.
//!
//! ## Crossing loop
//!
//! For an aggressor with remaining quantity `q` against the opposing side:
//!
//! 1. Stop if the side is empty or its best price does not cross
//! 2. Trade `min(q, best.quantity)` at the resting order's price
//! 3. Decrement the resting order, removing it at zero
//! 4. Stop once `q == 0`, otherwise repeat
//!
//! Then, if anything traded, one aggressor fill summarises the call, and the
//! order type's [`ResidualPolicy`] decides what happens to what is left.

use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::engine::crossing::{crosses, ResidualPolicy};
use crate::error::{BookError, EngineError};
use crate::orderbook::Book;
use crate::types::price::average_price;
use crate::types::{
    FilledOrder, IocOrder, LimitOrder, MarketOrder, Order, OrderCore, OrderMessage, OrderType,
};

/// Terminal path of a submitted order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderOutcome {
    /// Fully filled on arrival; never rested
    Filled,
    /// Partially filled, remainder rests (Limit only)
    PartiallyFilledResting,
    /// Nothing crossed, rests untouched (Limit only)
    Resting,
    /// Remainder dropped after whatever filled (Market, IOC)
    RemainderDiscarded,
}

/// Everything one matching call produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// Resting fills in consumption order, then the aggressor fill if any traded
    pub fills: Vec<FilledOrder>,

    /// Quantity the aggressor traded in this call
    pub filled_quantity: u64,

    /// Quantity that did not trade (rested or discarded, see `outcome`)
    pub remaining_quantity: u64,

    /// Exact sum of `price * quantity` over the resting fills (raw u128).
    /// The aggressor fill's price is this divided by `filled_quantity`, rounded.
    pub notional: u128,

    pub outcome: OrderOutcome,
}

impl MatchResult {
    #[inline]
    pub fn fully_filled(&self) -> bool {
        self.remaining_quantity == 0
    }

    /// Fills of the resting orders that were hit
    pub fn resting_fills(&self) -> impl Iterator<Item = &FilledOrder> {
        self.fills.iter().filter(|f| !f.is_aggressor())
    }

    /// The aggressor's summary fill, if anything traded
    pub fn aggressor_fill(&self) -> Option<&FilledOrder> {
        self.fills.iter().find(|f| f.is_aggressor())
    }
}

/// Output of the crossing loop before the residual policy runs.
struct Crossing {
    fills: Vec<FilledOrder>,
    filled: u64,
    remaining: u64,
    notional: u128,
}

/// Matching engine for a single instrument.
///
/// Owns both sides of the book. Every `handle_*` call takes `&mut self` and
/// runs to completion, so calls against one engine are serialized.
#[derive(Debug)]
pub struct MatchingEngine {
    book: Book,
    config: EngineConfig,
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::with_config(EngineConfig::default())
    }
}

impl MatchingEngine {
    /// Engine for `symbol` with default capacity
    pub fn new(symbol: impl Into<String>) -> Self {
        Self::with_config(EngineConfig::new(symbol))
    }

    pub fn with_config(config: EngineConfig) -> Self {
        info!(
            symbol = %config.symbol,
            order_capacity = config.order_capacity,
            "matching engine created"
        );
        Self {
            book: Book::with_capacity(config.order_capacity),
            config,
        }
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub fn symbol(&self) -> &str {
        &self.config.symbol
    }

    /// Read-only view of the book
    #[inline]
    pub fn book(&self) -> &Book {
        &self.book
    }

    #[inline]
    pub fn best_bid(&self) -> Option<u64> {
        self.book.best_bid()
    }

    #[inline]
    pub fn best_ask(&self) -> Option<u64> {
        self.book.best_ask()
    }

    // ========================================================================
    // Entry points
    // ========================================================================

    /// Match an order and return its fill events (possibly empty).
    pub fn handle_order(&mut self, order: &Order) -> Result<Vec<FilledOrder>, EngineError> {
        self.match_order(order).map(|result| result.fills)
    }

    /// Match an order and return the full [`MatchResult`].
    pub fn match_order(&mut self, order: &Order) -> Result<MatchResult, EngineError> {
        match order {
            Order::Limit(o) => self.handle_limit_order(o),
            Order::Market(o) => self.handle_market_order(o),
            Order::Ioc(o) => self.handle_ioc_order(o),
        }
    }

    /// Decode the raw tags of a wire message, then match it.
    ///
    /// `UndefinedOrderType` and `InvalidSide` are reported here, before the
    /// book is touched.
    pub fn handle_message(&mut self, message: OrderMessage) -> Result<Vec<FilledOrder>, EngineError> {
        let order_id = message.id;
        let order = message.into_order(&self.config.symbol).map_err(|e| {
            warn!(order_id, error = %e, "rejected order message");
            e
        })?;
        self.handle_order(&order)
    }

    /// Decode an SSZ-encoded [`OrderMessage`], then match it.
    pub fn handle_encoded(&mut self, bytes: &[u8]) -> Result<Vec<FilledOrder>, EngineError> {
        let message = OrderMessage::decode(bytes)?;
        self.handle_message(message)
    }

    /// Cross a limit order, then rest whatever is left on its own side.
    pub fn handle_limit_order(&mut self, order: &LimitOrder) -> Result<MatchResult, EngineError> {
        let core = order.core();
        self.check_unique(core)?;

        let crossing = self.cross(core, Some(order.price()));
        if crossing.remaining > 0 {
            let residual = LimitOrder::from_core(core.with_quantity(crossing.remaining)?, order.price())?;
            self.book.insert(residual)?;
            debug!(
                order_id = core.id(),
                side = ?core.side(),
                price = order.price(),
                quantity = crossing.remaining,
                "resting limit order"
            );
        }
        Ok(Self::finish(core, crossing, ResidualPolicy::for_type(OrderType::Limit)))
    }

    /// Cross a market order at any price; the remainder expires.
    pub fn handle_market_order(&mut self, order: &MarketOrder) -> Result<MatchResult, EngineError> {
        let core = order.core();
        self.check_unique(core)?;

        let crossing = self.cross(core, None);
        Ok(Self::finish(core, crossing, ResidualPolicy::for_type(OrderType::Market)))
    }

    /// Cross an IOC order up to its limit; the remainder is cancelled.
    pub fn handle_ioc_order(&mut self, order: &IocOrder) -> Result<MatchResult, EngineError> {
        let core = order.core();
        self.check_unique(core)?;

        let crossing = self.cross(core, Some(order.price()));
        Ok(Self::finish(
            core,
            crossing,
            ResidualPolicy::for_type(OrderType::ImmediateOrCancel),
        ))
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Reject an aggressor whose id is already resting, before any mutation.
    fn check_unique(&self, core: &OrderCore) -> Result<(), EngineError> {
        if self.book.contains(core.id()) {
            warn!(order_id = core.id(), "rejected order: id already resting");
            return Err(BookError::DuplicateOrderId(core.id()).into());
        }
        Ok(())
    }

    /// The shared crossing loop. `limit` of `None` crosses at any price.
    fn cross(&mut self, aggressor: &OrderCore, limit: Option<u64>) -> Crossing {
        let side = aggressor.side();
        let opposing = self.book.side_mut(side.opposite());

        let mut remaining = aggressor.quantity();
        let mut notional: u128 = 0;
        let mut fills = Vec::new();

        while remaining > 0 {
            let (price, traded, fill) = match opposing.best() {
                Some(resting) if crosses(side, limit, resting.price()) => {
                    let traded = remaining.min(resting.quantity());
                    (resting.price(), traded, FilledOrder::resting(resting, traded))
                }
                _ => break,
            };

            opposing.decrement_front(traded);
            debug!(
                aggressor_id = aggressor.id(),
                resting_id = fill.id,
                price,
                quantity = traded,
                "matched"
            );

            notional += price as u128 * traded as u128;
            remaining -= traded;
            fills.push(fill);
        }

        let filled = aggressor.quantity() - remaining;
        if let Some(avg_price) = average_price(notional, filled) {
            fills.push(FilledOrder::aggressor(aggressor, filled, avg_price));
        }

        Crossing {
            fills,
            filled,
            remaining,
            notional,
        }
    }

    fn finish(core: &OrderCore, crossing: Crossing, residual: ResidualPolicy) -> MatchResult {
        let outcome = match (crossing.remaining, residual) {
            (0, _) => OrderOutcome::Filled,
            (_, ResidualPolicy::Rest) if crossing.filled == 0 => OrderOutcome::Resting,
            (_, ResidualPolicy::Rest) => OrderOutcome::PartiallyFilledResting,
            (_, ResidualPolicy::Discard) => OrderOutcome::RemainderDiscarded,
        };

        if outcome == OrderOutcome::RemainderDiscarded {
            debug!(
                order_id = core.id(),
                discarded = crossing.remaining,
                "remainder discarded"
            );
        }
        debug!(
            order_id = core.id(),
            filled = crossing.filled,
            fills = crossing.fills.len(),
            outcome = ?outcome,
            "order handled"
        );

        MatchResult {
            fills: crossing.fills,
            filled_quantity: crossing.filled,
            remaining_quantity: crossing.remaining,
            notional: crossing.notional,
            outcome,
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
