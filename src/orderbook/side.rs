//! One side of the book with price-time priority.
//!
//! ## Structure
//!
//! - **Slab**: resting order nodes, O(1) insert/remove by key
//! - **BTreeMap**: price levels keyed by price, O(log n) insert and best lookup
//! - **HashMap**: order id to slab key, for duplicate detection
//!
//! Priority is best price first, oldest `time` first within a price. Bids
//! take the highest key of the map, asks the lowest, so both sides share one
//! ascending map and never re-sort.

use std::collections::{BTreeMap, HashMap};

use slab::Slab;

use crate::error::BookError;
use crate::orderbook::{OrderNode, PriceLevel};
use crate::types::{LimitOrder, Side};

/// Resting limit orders of a single side.
#[derive(Debug)]
pub struct BookSide {
    side: Side,

    /// Resting order storage
    orders: Slab<OrderNode>,

    /// Price levels, ascending by price
    levels: BTreeMap<u64, PriceLevel>,

    /// Order id to slab key
    index: HashMap<u64, usize>,

    /// Sum of open quantity across all levels, in u128 so u64 quantities never wrap
    total_quantity: u128,
}

impl BookSide {
    pub fn new(side: Side) -> Self {
        Self::with_capacity(side, 0)
    }

    /// Create a side with `order_capacity` pre-allocated slab slots
    pub fn with_capacity(side: Side, order_capacity: usize) -> Self {
        Self {
            side,
            orders: Slab::with_capacity(order_capacity),
            levels: BTreeMap::new(),
            index: HashMap::with_capacity(order_capacity),
            total_quantity: 0,
        }
    }

    // ========================================================================
    // Size
    // ========================================================================

    /// Which side of the market this holds
    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.orders.capacity()
    }

    /// Number of distinct price levels
    #[inline]
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Open quantity summed over every resting order
    #[inline]
    pub fn total_quantity(&self) -> u128 {
        self.total_quantity
    }

    #[inline]
    pub fn contains(&self, order_id: u64) -> bool {
        self.index.contains_key(&order_id)
    }

    // ========================================================================
    // Best
    // ========================================================================

    fn best_level(&self) -> Option<&PriceLevel> {
        match self.side {
            Side::Buy => self.levels.values().next_back(),
            Side::Sell => self.levels.values().next(),
        }
    }

    /// Highest-priority resting order, if any
    pub fn best(&self) -> Option<&LimitOrder> {
        let key = self.best_level()?.peek_head()?;
        self.orders.get(key).map(|node| &node.order)
    }

    /// Price of the best level
    pub fn best_price(&self) -> Option<u64> {
        self.best_level().map(|level| level.price)
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Rest a limit order at the back of its price level.
    ///
    /// Rejects an order of the other side and an id already resting here.
    pub fn insert(&mut self, order: LimitOrder) -> Result<(), BookError> {
        if order.side() != self.side {
            return Err(BookError::SideMismatch {
                expected: self.side,
                found: order.side(),
            });
        }
        let order_id = order.id();
        if self.index.contains_key(&order_id) {
            return Err(BookError::DuplicateOrderId(order_id));
        }

        let price = order.price();
        let quantity = order.quantity();
        let key = self.orders.insert(OrderNode::new(order));
        self.index.insert(order_id, key);

        self.levels
            .entry(price)
            .or_insert_with(|| PriceLevel::new(price))
            .insert_by_time(key, &mut self.orders);
        self.total_quantity += u128::from(quantity);
        Ok(())
    }

    /// Reduce the best order by `amount`, removing it once nothing is left.
    ///
    /// `amount` is capped at the best order's open quantity. Returns the
    /// removed order when the front was fully consumed. Price and time of
    /// every other resting order are untouched.
    pub fn decrement_front(&mut self, amount: u64) -> Option<LimitOrder> {
        let mut entry = match self.side {
            Side::Buy => self.levels.last_entry()?,
            Side::Sell => self.levels.first_entry()?,
        };
        let level = entry.get_mut();
        let key = level.peek_head()?;
        let node = self.orders.get_mut(key)?;

        let taken = node.fill(amount);
        let consumed = node.is_filled();
        level.reduce_quantity(taken);
        self.total_quantity -= u128::from(taken);

        if !consumed {
            return None;
        }

        level.remove(key, &mut self.orders);
        if level.is_empty() {
            entry.remove();
        }
        let removed = self.orders.remove(key).order;
        self.index.remove(&removed.id());
        Some(removed)
    }

    /// Drop every resting order
    pub fn clear(&mut self) {
        self.orders.clear();
        self.levels.clear();
        self.index.clear();
        self.total_quantity = 0;
    }

    // ========================================================================
    // Read-only traversal
    // ========================================================================

    /// Price levels, best first
    pub fn levels(&self) -> Box<dyn Iterator<Item = &PriceLevel> + '_> {
        match self.side {
            Side::Buy => Box::new(self.levels.values().rev()),
            Side::Sell => Box::new(self.levels.values()),
        }
    }

    /// Every resting order in priority order
    pub fn iter(&self) -> impl Iterator<Item = &LimitOrder> + '_ {
        self.levels().flat_map(move |level| level.iter(&self.orders))
    }

    /// Aggregated (price, quantity) ladder for the best `max_levels` levels
    pub fn depth(&self, max_levels: usize) -> Vec<(u64, u128)> {
        self.levels()
            .take(max_levels)
            .map(|level| (level.price, level.total_quantity))
            .collect()
    }

    /// Open quantity resting at exactly `price`
    pub fn quantity_at(&self, price: u64) -> u128 {
        match self.levels.get(&price) {
            Some(level) => level.total_quantity,
            None => 0,
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
