//! Order types for the matching core.
//!
//! ## Validation
//!
//! Every constructor validates its input and returns `Result<_, OrderError>`.
//! Fields are private, so an order that exists has already passed:
//!
//! - quantity > 0
//! - price > 0 (Limit and IOC only)
//!
//! The matcher relies on these invariants and never re-checks them.
//!
//! ## Fixed-Point Representation
//!
//! Prices and quantities are `u64` scaled by 10^8 (see [`crate::types::price`]).

use crate::error::OrderError;

// ============================================================================
// Side enum
// ============================================================================

/// Order side: Buy or Sell
///
/// Wire tags:
/// - Buy = 0
/// - Sell = 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    /// Buy order (bid)
    #[default]
    Buy,
    /// Sell order (ask)
    Sell,
}

impl Side {
    /// Convert to u8 for serialization
    pub fn to_u8(self) -> u8 {
        match self {
            Side::Buy => 0,
            Side::Sell => 1,
        }
    }

    /// Convert from u8 for deserialization
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Side::Buy),
            1 => Some(Side::Sell),
            _ => None,
        }
    }

    /// Returns the opposite side
    pub fn opposite(self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

impl TryFrom<u8> for Side {
    type Error = OrderError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Side::from_u8(value).ok_or(OrderError::InvalidSide(value))
    }
}

// ============================================================================
// OrderType enum
// ============================================================================

/// The closed set of order kinds the engine accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderType {
    /// Executes at the limit price or better; the remainder rests
    Limit,
    /// Executes at any available price; the remainder expires
    Market,
    /// Executes at the limit price or better; the remainder is cancelled
    ImmediateOrCancel,
}

impl OrderType {
    /// Convert to u8 for serialization
    pub fn to_u8(self) -> u8 {
        match self {
            OrderType::Limit => 0,
            OrderType::Market => 1,
            OrderType::ImmediateOrCancel => 2,
        }
    }

    /// Convert from u8 for deserialization
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(OrderType::Limit),
            1 => Some(OrderType::Market),
            2 => Some(OrderType::ImmediateOrCancel),
            _ => None,
        }
    }
}

impl TryFrom<u8> for OrderType {
    type Error = OrderError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        OrderType::from_u8(value).ok_or(OrderError::UndefinedOrderType(value))
    }
}

// ============================================================================
// Shared payload
// ============================================================================

/// Fields common to every order variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderCore {
    id: u64,
    symbol: String,
    quantity: u64,
    side: Side,
    time: u64,
}

impl OrderCore {
    /// Create the shared payload, rejecting a zero quantity.
    pub fn new(
        id: u64,
        symbol: impl Into<String>,
        quantity: u64,
        side: Side,
        time: u64,
    ) -> Result<Self, OrderError> {
        if quantity == 0 {
            return Err(OrderError::NonPositiveQuantity);
        }
        Ok(Self {
            id,
            symbol: symbol.into(),
            quantity,
            side,
            time,
        })
    }

    /// Caller-assigned order identifier
    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Instrument identifier
    #[inline]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Current quantity (fixed-point)
    #[inline]
    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Caller-assigned ordering key, used only to break ties within a price level
    #[inline]
    pub fn time(&self) -> u64 {
        self.time
    }

    /// Copy of this payload carrying a different positive quantity.
    pub(crate) fn with_quantity(&self, quantity: u64) -> Result<Self, OrderError> {
        Self::new(self.id, self.symbol.clone(), quantity, self.side, self.time)
    }
}

fn check_price(price: u64) -> Result<u64, OrderError> {
    if price == 0 {
        Err(OrderError::NonPositivePrice)
    } else {
        Ok(price)
    }
}

// ============================================================================
// Variants
// ============================================================================

/// A limit order: the only kind that can rest in the book.
///
/// ## Example
///
/// ```
/// use matchcore::types::{LimitOrder, Side};
///
/// let order = LimitOrder::new(1, "BTC-USD", 10, 100, Side::Buy, 1).unwrap();
/// assert_eq!(order.price(), 100);
/// assert_eq!(order.quantity(), 10);
///
/// assert!(LimitOrder::new(2, "BTC-USD", 0, 100, Side::Buy, 2).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitOrder {
    core: OrderCore,
    price: u64,
}

impl LimitOrder {
    pub fn new(
        id: u64,
        symbol: impl Into<String>,
        quantity: u64,
        price: u64,
        side: Side,
        time: u64,
    ) -> Result<Self, OrderError> {
        let core = OrderCore::new(id, symbol, quantity, side, time)?;
        Self::from_core(core, price)
    }

    /// Build from an already validated payload.
    pub fn from_core(core: OrderCore, price: u64) -> Result<Self, OrderError> {
        Ok(Self {
            core,
            price: check_price(price)?,
        })
    }

    #[inline]
    pub fn core(&self) -> &OrderCore {
        &self.core
    }

    #[inline]
    pub fn id(&self) -> u64 {
        self.core.id
    }

    #[inline]
    pub fn symbol(&self) -> &str {
        &self.core.symbol
    }

    #[inline]
    pub fn quantity(&self) -> u64 {
        self.core.quantity
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.core.side
    }

    #[inline]
    pub fn time(&self) -> u64 {
        self.core.time
    }

    /// Limit price (fixed-point)
    #[inline]
    pub fn price(&self) -> u64 {
        self.price
    }

    /// Reduce the quantity after a fill, returning the amount actually taken.
    ///
    /// Only the book calls this; it removes the order as soon as the quantity
    /// reaches zero.
    pub(crate) fn fill(&mut self, amount: u64) -> u64 {
        let taken = amount.min(self.core.quantity);
        self.core.quantity -= taken;
        taken
    }

    /// Check if the order has nothing left
    #[inline]
    pub(crate) fn is_filled(&self) -> bool {
        self.core.quantity == 0
    }
}

/// A market order: no price bound, never rests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketOrder {
    core: OrderCore,
}

impl MarketOrder {
    pub fn new(
        id: u64,
        symbol: impl Into<String>,
        quantity: u64,
        side: Side,
        time: u64,
    ) -> Result<Self, OrderError> {
        Ok(Self {
            core: OrderCore::new(id, symbol, quantity, side, time)?,
        })
    }

    #[inline]
    pub fn core(&self) -> &OrderCore {
        &self.core
    }
}

/// An immediate-or-cancel order: price-bounded, never rests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IocOrder {
    core: OrderCore,
    price: u64,
}

impl IocOrder {
    pub fn new(
        id: u64,
        symbol: impl Into<String>,
        quantity: u64,
        price: u64,
        side: Side,
        time: u64,
    ) -> Result<Self, OrderError> {
        let core = OrderCore::new(id, symbol, quantity, side, time)?;
        Ok(Self {
            core,
            price: check_price(price)?,
        })
    }

    #[inline]
    pub fn core(&self) -> &OrderCore {
        &self.core
    }

    #[inline]
    pub fn price(&self) -> u64 {
        self.price
    }
}

// ============================================================================
// Order sum type
// ============================================================================

/// An incoming order of any supported kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Order {
    Limit(LimitOrder),
    Market(MarketOrder),
    Ioc(IocOrder),
}

impl Order {
    /// Shared identity/quantity/side payload
    pub fn core(&self) -> &OrderCore {
        match self {
            Order::Limit(o) => o.core(),
            Order::Market(o) => o.core(),
            Order::Ioc(o) => o.core(),
        }
    }

    pub fn order_type(&self) -> OrderType {
        match self {
            Order::Limit(_) => OrderType::Limit,
            Order::Market(_) => OrderType::Market,
            Order::Ioc(_) => OrderType::ImmediateOrCancel,
        }
    }

    /// Price bound, if the variant has one
    pub fn price(&self) -> Option<u64> {
        match self {
            Order::Limit(o) => Some(o.price()),
            Order::Market(_) => None,
            Order::Ioc(o) => Some(o.price()),
        }
    }

    #[inline]
    pub fn id(&self) -> u64 {
        self.core().id()
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.core().side()
    }

    #[inline]
    pub fn quantity(&self) -> u64 {
        self.core().quantity()
    }

    #[inline]
    pub fn time(&self) -> u64 {
        self.core().time()
    }
}

impl From<LimitOrder> for Order {
    fn from(order: LimitOrder) -> Self {
        Order::Limit(order)
    }
}

impl From<MarketOrder> for Order {
    fn from(order: MarketOrder) -> Self {
        Order::Market(order)
    }
}

impl From<IocOrder> for Order {
    fn from(order: IocOrder) -> Self {
        Order::Ioc(order)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
