//! Two-sided price-time order book.
//!
//! ## Price Ordering
//!
//! - **Bids** (buy orders): best = highest price, then oldest
//! - **Asks** (sell orders): best = lowest price, then oldest
//!
//! [`Book::insert`] routes an order by its own side, so a sell order can never
//! land among the bids.
//!
//! ## Example
//!
//! ```
//! use matchcore::orderbook::Book;
//! use matchcore::types::{LimitOrder, Side};
//!
//! let mut book = Book::with_capacity(10_000);
//!
//! book.insert(LimitOrder::new(1, "BTC-USD", 10, 100, Side::Buy, 1).unwrap()).unwrap();
//! book.insert(LimitOrder::new(2, "BTC-USD", 10, 105, Side::Sell, 2).unwrap()).unwrap();
//!
//! assert_eq!(book.best_bid(), Some(100));
//! assert_eq!(book.best_ask(), Some(105));
//! assert_eq!(book.spread(), Some(5));
//! ```

use sha2::{Digest, Sha256};

use crate::error::BookError;
use crate::orderbook::BookSide;
use crate::types::{LimitOrder, Side};

/// Resting limit orders for one instrument.
#[derive(Debug)]
pub struct Book {
    bids: BookSide,
    asks: BookSide,
}

impl Default for Book {
    fn default() -> Self {
        Self::new()
    }
}

impl Book {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a book with `order_capacity` pre-allocated slots per side
    ///
    /// ```
    /// use matchcore::orderbook::Book;
    ///
    /// let book = Book::with_capacity(100_000);
    /// assert!(book.capacity() >= 100_000);
    /// ```
    pub fn with_capacity(order_capacity: usize) -> Self {
        Self {
            bids: BookSide::with_capacity(Side::Buy, order_capacity),
            asks: BookSide::with_capacity(Side::Sell, order_capacity),
        }
    }

    // ========================================================================
    // Sides
    // ========================================================================

    /// Read access to one side
    #[inline]
    pub fn side(&self, side: Side) -> &BookSide {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    #[inline]
    pub(crate) fn side_mut(&mut self, side: Side) -> &mut BookSide {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }

    #[inline]
    pub fn bids(&self) -> &BookSide {
        &self.bids
    }

    #[inline]
    pub fn asks(&self) -> &BookSide {
        &self.asks
    }

    // ========================================================================
    // Capacity and Size
    // ========================================================================

    /// Pre-allocated slots on the smaller side
    #[inline]
    pub fn capacity(&self) -> usize {
        self.bids.capacity().min(self.asks.capacity())
    }

    /// Total resting orders on both sides
    #[inline]
    pub fn order_count(&self) -> usize {
        self.bids.len() + self.asks.len()
    }

    #[inline]
    pub fn bid_count(&self) -> usize {
        self.bids.len()
    }

    #[inline]
    pub fn ask_count(&self) -> usize {
        self.asks.len()
    }

    /// True iff no order rests on `side`
    #[inline]
    pub fn is_empty(&self, side: Side) -> bool {
        self.side(side).is_empty()
    }

    /// True iff an order with this id rests on either side
    pub fn contains(&self, order_id: u64) -> bool {
        self.bids.contains(order_id) || self.asks.contains(order_id)
    }

    // ========================================================================
    // Order Management
    // ========================================================================

    /// Highest-priority order on `side`
    #[inline]
    pub fn best(&self, side: Side) -> Option<&LimitOrder> {
        self.side(side).best()
    }

    /// Rest a limit order on its own side.
    ///
    /// Fails with [`BookError::DuplicateOrderId`] if the id already rests on
    /// either side.
    pub fn insert(&mut self, order: LimitOrder) -> Result<(), BookError> {
        let order_id = order.id();
        if self.side(order.side().opposite()).contains(order_id) {
            return Err(BookError::DuplicateOrderId(order_id));
        }
        self.side_mut(order.side()).insert(order)
    }

    /// Reduce the best order on `side`; see [`BookSide::decrement_front`].
    pub fn decrement_front(&mut self, side: Side, amount: u64) -> Option<LimitOrder> {
        self.side_mut(side).decrement_front(amount)
    }

    /// Clear all orders from the book
    pub fn clear(&mut self) {
        self.bids.clear();
        self.asks.clear();
    }

    // ========================================================================
    // Market data
    // ========================================================================

    /// Best bid price (highest buy price)
    #[inline]
    pub fn best_bid(&self) -> Option<u64> {
        self.bids.best_price()
    }

    /// Best ask price (lowest sell price)
    #[inline]
    pub fn best_ask(&self) -> Option<u64> {
        self.asks.best_price()
    }

    /// best_ask - best_bid, or None if either side is empty or the book is crossed
    pub fn spread(&self) -> Option<u64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) if ask >= bid => Some(ask - bid),
            _ => None,
        }
    }

    /// Aggregated (price, quantity) ladder of `side`, best first
    pub fn depth(&self, side: Side, max_levels: usize) -> Vec<(u64, u128)> {
        self.side(side).depth(max_levels)
    }

    /// Resting orders of `side` in priority order
    pub fn orders(&self, side: Side) -> impl Iterator<Item = &LimitOrder> + '_ {
        self.side(side).iter()
    }

    // ========================================================================
    // State root
    // ========================================================================

    /// SHA-256 over every resting order, bids then asks, each in priority order.
    ///
    /// Each order contributes `id | price | quantity | time` as little-endian
    /// u64s, and each side is prefixed with its side tag and order count.
    /// Identical order flow always yields an identical root.
    pub fn compute_state_root(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        for side in [&self.bids, &self.asks] {
            hasher.update([side.side().to_u8()]);
            hasher.update((side.len() as u64).to_le_bytes());
            for order in side.iter() {
                hasher.update(order.id().to_le_bytes());
                hasher.update(order.price().to_le_bytes());
                hasher.update(order.quantity().to_le_bytes());
                hasher.update(order.time().to_le_bytes());
            }
        }
        let mut root = [0u8; 32];
        root.copy_from_slice(&hasher.finalize());
        root
    }

    /// Hex rendering of [`Book::compute_state_root`]
    pub fn state_root_hex(&self) -> String {
        hex::encode(self.compute_state_root())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
