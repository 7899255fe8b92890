//! Price level management for orders at the same price.
//!
//! A `PriceLevel` is a FIFO queue of resting orders at one price, kept as a
//! doubly-linked list threaded through the slab:
//!
//! ```text
//! head (oldest) <-> order2 <-> order3 <-> tail (newest)
//! ```
//!
//! - New orders are appended at the tail
//! - Matching consumes orders from the head
//! - Any order can be unlinked in O(1) using its slab key

use slab::Slab;

use crate::orderbook::OrderNode;
use crate::types::LimitOrder;

/// A price level containing orders at a single price.
///
/// Order data lives in the slab; this struct only holds queue metadata.
#[derive(Debug, Clone)]
pub struct PriceLevel {
    /// Price for this level (fixed-point)
    pub price: u64,

    /// Total open quantity at this level, summed in u128
    pub total_quantity: u128,

    /// Oldest order (slab key), matched first
    pub head: Option<usize>,

    /// Newest order (slab key)
    pub tail: Option<usize>,

    pub order_count: usize,
}

impl PriceLevel {
    pub fn new(price: u64) -> Self {
        Self {
            price,
            total_quantity: 0,
            head: None,
            tail: None,
            order_count: 0,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order_count == 0
    }

    /// Append an order to the tail of the queue.
    ///
    /// Returns `false` (and changes nothing) if `key` is not in the slab.
    pub fn push_back(&mut self, key: usize, slab: &mut Slab<OrderNode>) -> bool {
        let tail = self.tail;
        let quantity = match slab.get_mut(key) {
            Some(node) => {
                node.prev = tail;
                node.next = None;
                node.remaining()
            }
            None => return false,
        };

        match tail.and_then(|t| slab.get_mut(t)) {
            Some(tail_node) => tail_node.next = Some(key),
            None => self.head = Some(key),
        }

        self.tail = Some(key);
        self.order_count += 1;
        self.total_quantity += u128::from(quantity);
        true
    }

    /// Link an order at its time-priority position.
    ///
    /// Orders normally arrive in increasing `time`, making this a tail append;
    /// an out-of-sequence time walks back from the tail. Equal times keep
    /// arrival order.
    pub fn insert_by_time(&mut self, key: usize, slab: &mut Slab<OrderNode>) -> bool {
        let time = match slab.get(key) {
            Some(node) => node.order.time(),
            None => return false,
        };

        // Find the newest order that should stay ahead of the new one
        let mut after = self.tail;
        while let Some(k) = after {
            let node = &slab[k];
            if node.order.time() <= time {
                break;
            }
            after = node.prev;
        }

        if after == self.tail {
            return self.push_back(key, slab);
        }

        let before = match after {
            Some(k) => slab[k].next,
            None => self.head,
        };
        let quantity = {
            let node = &mut slab[key];
            node.prev = after;
            node.next = before;
            node.remaining()
        };
        match after {
            Some(k) => slab[k].next = Some(key),
            None => self.head = Some(key),
        }
        if let Some(k) = before {
            slab[k].prev = Some(key);
        }

        self.order_count += 1;
        self.total_quantity += u128::from(quantity);
        true
    }

    /// Unlink an order from the queue by slab key.
    ///
    /// The node stays in the slab; the caller removes it. Returns the open
    /// quantity of the unlinked order, or `None` if `key` is not in the slab.
    pub fn remove(&mut self, key: usize, slab: &mut Slab<OrderNode>) -> Option<u64> {
        let node = slab.get_mut(key)?;
        let quantity = node.remaining();
        let prev_key = node.prev.take();
        let next_key = node.next.take();

        match prev_key.and_then(|p| slab.get_mut(p)) {
            Some(prev_node) => prev_node.next = next_key,
            None => self.head = next_key,
        }

        match next_key.and_then(|n| slab.get_mut(n)) {
            Some(next_node) => next_node.prev = prev_key,
            None => self.tail = prev_key,
        }

        self.order_count -= 1;
        self.total_quantity = self.total_quantity.saturating_sub(u128::from(quantity));
        Some(quantity)
    }

    /// Slab key of the oldest order at this level
    #[inline]
    pub fn peek_head(&self) -> Option<usize> {
        self.head
    }

    /// Account for a partial fill of one of this level's orders
    pub fn reduce_quantity(&mut self, filled_quantity: u64) {
        self.total_quantity = self.total_quantity.saturating_sub(u128::from(filled_quantity));
    }

    /// Orders at this level, oldest first
    pub fn iter<'a>(&self, slab: &'a Slab<OrderNode>) -> LevelIter<'a> {
        LevelIter {
            slab,
            cursor: self.head,
        }
    }
}

/// Iterator over a level's orders in time priority.
pub struct LevelIter<'a> {
    slab: &'a Slab<OrderNode>,
    cursor: Option<usize>,
}

impl<'a> Iterator for LevelIter<'a> {
    type Item = &'a LimitOrder;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.slab.get(self.cursor?)?;
        self.cursor = node.next;
        Some(&node.order)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Side;

    fn create_test_node(slab: &mut Slab<OrderNode>, id: u64, quantity: u64) -> usize {
        create_timed_node(slab, id, quantity, id)
    }

    fn create_timed_node(slab: &mut Slab<OrderNode>, id: u64, quantity: u64, time: u64) -> usize {
        let order = LimitOrder::new(id, "X", quantity, 100, Side::Buy, time).unwrap();
        slab.insert(OrderNode::new(order))
    }

    #[test]
    fn test_price_level_new() {
        let level = PriceLevel::new(100);

        assert_eq!(level.price, 100);
        assert_eq!(level.total_quantity, 0);
        assert!(level.head.is_none());
        assert!(level.tail.is_none());
        assert!(level.is_empty());
    }

    #[test]
    fn test_price_level_push_multiple() {
        let mut slab = Slab::with_capacity(10);
        let mut level = PriceLevel::new(100);

        let key1 = create_test_node(&mut slab, 1, 10);
        let key2 = create_test_node(&mut slab, 2, 20);
        let key3 = create_test_node(&mut slab, 3, 30);

        assert!(level.push_back(key1, &mut slab));
        assert!(level.push_back(key2, &mut slab));
        assert!(level.push_back(key3, &mut slab));

        assert_eq!(level.order_count, 3);
        assert_eq!(level.total_quantity, 60);
        assert_eq!(level.head, Some(key1));
        assert_eq!(level.tail, Some(key3));

        // key1 <-> key2 <-> key3
        assert_eq!(slab[key1].next, Some(key2));
        assert_eq!(slab[key2].prev, Some(key1));
        assert_eq!(slab[key2].next, Some(key3));
        assert_eq!(slab[key3].prev, Some(key2));
        assert!(slab[key3].next.is_none());
    }

    #[test]
    fn test_price_level_push_unknown_key() {
        let mut slab: Slab<OrderNode> = Slab::with_capacity(10);
        let mut level = PriceLevel::new(100);

        assert!(!level.push_back(3, &mut slab));
        assert!(level.is_empty());
    }

    #[test]
    fn test_price_level_remove_middle() {
        let mut slab = Slab::with_capacity(10);
        let mut level = PriceLevel::new(100);

        let key1 = create_test_node(&mut slab, 1, 10);
        let key2 = create_test_node(&mut slab, 2, 20);
        let key3 = create_test_node(&mut slab, 3, 30);
        level.push_back(key1, &mut slab);
        level.push_back(key2, &mut slab);
        level.push_back(key3, &mut slab);

        assert_eq!(level.remove(key2, &mut slab), Some(20));

        assert_eq!(level.order_count, 2);
        assert_eq!(level.total_quantity, 40);
        assert_eq!(slab[key1].next, Some(key3));
        assert_eq!(slab[key3].prev, Some(key1));
        assert!(slab[key2].next.is_none() && slab[key2].prev.is_none());
    }

    #[test]
    fn test_price_level_remove_head() {
        let mut slab = Slab::with_capacity(10);
        let mut level = PriceLevel::new(100);

        let key1 = create_test_node(&mut slab, 1, 10);
        let key2 = create_test_node(&mut slab, 2, 20);
        level.push_back(key1, &mut slab);
        level.push_back(key2, &mut slab);

        level.remove(key1, &mut slab);

        assert_eq!(level.head, Some(key2));
        assert_eq!(level.tail, Some(key2));
        assert!(slab[key2].prev.is_none());
    }

    #[test]
    fn test_price_level_remove_only() {
        let mut slab = Slab::with_capacity(10);
        let mut level = PriceLevel::new(100);

        let key = create_test_node(&mut slab, 1, 10);
        level.push_back(key, &mut slab);
        level.remove(key, &mut slab);

        assert!(level.is_empty());
        assert_eq!(level.total_quantity, 0);
        assert!(level.head.is_none());
        assert!(level.tail.is_none());
    }

    #[test]
    fn test_price_level_reduce_quantity() {
        let mut level = PriceLevel::new(100);
        level.total_quantity = 100;

        level.reduce_quantity(30);
        assert_eq!(level.total_quantity, 70);

        level.reduce_quantity(1_000);
        assert_eq!(level.total_quantity, 0);
    }

    #[test]
    fn test_price_level_iter_oldest_first() {
        let mut slab = Slab::with_capacity(10);
        let mut level = PriceLevel::new(100);

        assert_eq!(level.iter(&slab).count(), 0);

        for id in [4, 9, 2] {
            let key = create_test_node(&mut slab, id, 5);
            level.push_back(key, &mut slab);
        }

        let ids: Vec<u64> = level.iter(&slab).map(|o| o.id()).collect();
        assert_eq!(ids, vec![4, 9, 2]);
    }

    #[test]
    fn test_insert_by_time_appends_in_sequence() {
        let mut slab = Slab::with_capacity(10);
        let mut level = PriceLevel::new(100);

        for (id, time) in [(1, 1), (2, 2), (3, 2)] {
            let key = create_timed_node(&mut slab, id, 5, time);
            assert!(level.insert_by_time(key, &mut slab));
        }

        let ids: Vec<u64> = level.iter(&slab).map(|o| o.id()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(level.total_quantity, 15);
    }

    #[test]
    fn test_insert_by_time_out_of_sequence() {
        let mut slab = Slab::with_capacity(10);
        let mut level = PriceLevel::new(100);

        for (id, time) in [(1, 10), (2, 30), (3, 20), (4, 5)] {
            let key = create_timed_node(&mut slab, id, 1, time);
            level.insert_by_time(key, &mut slab);
        }

        let ids: Vec<u64> = level.iter(&slab).map(|o| o.id()).collect();
        assert_eq!(ids, vec![4, 1, 3, 2]);
        assert_eq!(level.order_count, 4);
        assert_eq!(slab[level.head.unwrap()].order.id(), 4);
        assert_eq!(slab[level.tail.unwrap()].order.id(), 2);
    }

    #[test]
    fn test_total_quantity_does_not_wrap() {
        let mut slab = Slab::with_capacity(10);
        let mut level = PriceLevel::new(100);

        let key1 = create_test_node(&mut slab, 1, u64::MAX);
        let key2 = create_test_node(&mut slab, 2, u64::MAX);
        level.push_back(key1, &mut slab);
        level.insert_by_time(key2, &mut slab);

        assert_eq!(level.total_quantity, 2 * u128::from(u64::MAX));

        level.reduce_quantity(u64::MAX);
        assert_eq!(level.total_quantity, u128::from(u64::MAX));
    }
}
