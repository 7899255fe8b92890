//! Order node for slab-based storage.
//!
//! `OrderNode` wraps a resting [`LimitOrder`] with doubly-linked list pointers
//! so a price level can unlink any node in O(1) given its slab key.
//!
//! ## Linked List
//!
//! - `next`: the next (newer) order in the price level
//! - `prev`: the previous (older) order in the price level

use crate::types::LimitOrder;

/// Order node stored in the slab.
///
/// The pointers are slab keys (`usize`), not references.
#[derive(Debug, Clone)]
pub struct OrderNode {
    /// The resting order; its quantity is the amount still open
    pub order: LimitOrder,

    /// Next order in the price level queue (None at the tail)
    pub next: Option<usize>,

    /// Previous order in the price level queue (None at the head)
    pub prev: Option<usize>,
}

impl OrderNode {
    /// Create a new, unlinked order node
    #[inline]
    pub fn new(order: LimitOrder) -> Self {
        Self {
            order,
            next: None,
            prev: None,
        }
    }

    /// Open quantity
    #[inline]
    pub fn remaining(&self) -> u64 {
        self.order.quantity()
    }

    /// Fill a portion of this order, returning the amount actually taken
    #[inline]
    pub fn fill(&mut self, quantity: u64) -> u64 {
        self.order.fill(quantity)
    }

    #[inline]
    pub fn is_filled(&self) -> bool {
        self.order.is_filled()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
