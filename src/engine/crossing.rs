//! Crossing predicate and residual policy.
//!
//! Every order type runs the same crossing loop; the types differ only in the
//! price bound they cross against and what happens to quantity left over.

use crate::types::{OrderType, Side};

/// What to do with an aggressor's quantity once nothing more crosses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResidualPolicy {
    /// Rest the remainder in the aggressor's own side of the book
    Rest,
    /// Drop the remainder without error
    Discard,
}

impl ResidualPolicy {
    pub fn for_type(order_type: OrderType) -> Self {
        match order_type {
            OrderType::Limit => ResidualPolicy::Rest,
            OrderType::Market | OrderType::ImmediateOrCancel => ResidualPolicy::Discard,
        }
    }
}

/// Does a resting price satisfy the aggressor's bound?
///
/// - Buy crosses an ask priced at or below its limit
/// - Sell crosses a bid priced at or above its limit
/// - No limit (market) always crosses
#[inline]
pub fn crosses(aggressor_side: Side, limit: Option<u64>, resting_price: u64) -> bool {
    match (aggressor_side, limit) {
        (_, None) => true,
        (Side::Buy, Some(limit)) => resting_price <= limit,
        (Side::Sell, Some(limit)) => resting_price >= limit,
    }
}
