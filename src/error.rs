//! Error types for the matching core.
//!
//! Every failure is a distinct, inspectable variant. Construction and decoding
//! errors are raised before an order reaches the book; nothing here is raised
//! part-way through a crossing loop.

use thiserror::Error;

use crate::types::Side;

/// Order construction and decoding failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// Quantity was zero.
    #[error("quantity must be positive")]
    NonPositiveQuantity,

    /// Limit or IOC price was zero.
    #[error("price must be positive")]
    NonPositivePrice,

    /// Raw side tag outside {Buy, Sell}.
    #[error("side must be either Buy or Sell (got raw tag {0})")]
    InvalidSide(u8),

    /// Raw order type tag outside {Limit, Market, IOC}.
    #[error("undefined order type (raw tag {0})")]
    UndefinedOrderType(u8),

    /// Reserved for amend/replace: the replacement quantity must be strictly smaller.
    #[error("new quantity {requested} is not smaller than current quantity {current}")]
    NewQuantityNotSmaller { current: u64, requested: u64 },
}

/// Book structure violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookError {
    /// An order was offered to the book side of the opposite direction.
    #[error("{found:?} order cannot rest on the {expected:?} side")]
    SideMismatch { expected: Side, found: Side },

    /// An order with this id already rests in the book.
    #[error("order {0} is already resting")]
    DuplicateOrderId(u64),
}

/// Errors surfaced by [`crate::engine::MatchingEngine`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    Book(#[from] BookError),

    /// SSZ encode/decode failure at the wire boundary.
    #[error("codec error: {0}")]
    Codec(String),
}

/// Configuration loading failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },

    #[error("symbol must not be empty")]
    EmptySymbol,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(OrderError::NonPositiveQuantity.to_string(), "quantity must be positive");
        assert_eq!(
            OrderError::UndefinedOrderType(9).to_string(),
            "undefined order type (raw tag 9)"
        );
        let err = OrderError::NewQuantityNotSmaller { current: 5, requested: 7 };
        assert!(err.to_string().contains("not smaller"));
    }

    #[test]
    fn test_engine_error_from() {
        let err: EngineError = OrderError::InvalidSide(3).into();
        assert_eq!(err, EngineError::Order(OrderError::InvalidSide(3)));

        let err: EngineError = BookError::DuplicateOrderId(7).into();
        assert_eq!(err.to_string(), "order 7 is already resting");
    }

    #[test]
    fn test_side_mismatch_message() {
        let err = BookError::SideMismatch { expected: Side::Buy, found: Side::Sell };
        assert_eq!(err.to_string(), "Sell order cannot rest on the Buy side");
    }
}
