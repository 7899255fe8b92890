//! Fixed-point price and quantity utilities.
//!
//! Prices and quantities are stored as u64 scaled by 10^8 (8 decimal places).
//! Conversions to and from human-readable strings go through
//! `rust_decimal`, so no floating point is involved anywhere.
//!
//! ## Examples
//!
//! ```
//! use matchcore::types::price::{to_fixed, from_fixed};
//!
//! let price = to_fixed("50000.12345678").unwrap();
//! assert_eq!(price, 5_000_012_345_678);
//! assert_eq!(from_fixed(price), "50000.12345678");
//! ```

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Scaling factor for fixed-point arithmetic: 10^8
pub const SCALE: u64 = 100_000_000;

// ============================================================================
// Conversion Functions
// ============================================================================

/// Convert a decimal string to fixed-point u64
///
/// Returns `None` if parsing fails, the value is negative, or it overflows.
///
/// ```
/// use matchcore::types::price::to_fixed;
///
/// assert_eq!(to_fixed("1.0"), Some(100_000_000));
/// assert_eq!(to_fixed("0.00000001"), Some(1));
/// ```
pub fn to_fixed(s: &str) -> Option<u64> {
    let decimal = Decimal::from_str(s).ok()?;
    decimal_to_fixed(decimal)
}

/// Convert a Decimal to fixed-point u64
pub fn decimal_to_fixed(d: Decimal) -> Option<u64> {
    if d.is_sign_negative() {
        return None;
    }

    let scaled = d.checked_mul(Decimal::from(SCALE))?;
    let rounded = scaled.round_dp(0);
    rounded.to_u64()
}

/// Convert fixed-point u64 to a Decimal
pub fn fixed_to_decimal(value: u64) -> Decimal {
    Decimal::from(value) / Decimal::from(SCALE)
}

/// Convert fixed-point u64 to a string with 8 decimal places
pub fn from_fixed(value: u64) -> String {
    let decimal = fixed_to_decimal(value);
    format!("{:.8}", decimal)
}

/// Convert fixed-point u64 to a string with trailing zeros trimmed
///
/// ```
/// use matchcore::types::price::from_fixed_trimmed;
///
/// assert_eq!(from_fixed_trimmed(100_000_000), "1");
/// assert_eq!(from_fixed_trimmed(150_000_000), "1.5");
/// ```
pub fn from_fixed_trimmed(value: u64) -> String {
    let decimal = fixed_to_decimal(value);
    format!("{}", decimal.normalize())
}

// ============================================================================
// Arithmetic
// ============================================================================

/// Volume-weighted average price from an accumulated notional.
///
/// `notional` is the sum of `price * quantity` over the trades (raw u128),
/// `quantity` the summed traded quantity. Rounds half up. Returns `None` when
/// nothing traded.
///
/// ```
/// use matchcore::types::price::average_price;
///
/// // 5 @ 50 and 2 @ 51
/// assert_eq!(average_price(5 * 50 + 2 * 51, 7), Some(50));
/// assert_eq!(average_price(0, 0), None);
/// ```
pub fn average_price(notional: u128, quantity: u64) -> Option<u64> {
    if quantity == 0 {
        return None;
    }
    let quantity = quantity as u128;
    let rounded = (notional + quantity / 2) / quantity;
    u64::try_from(rounded).ok()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_fixed_basic() {
        assert_eq!(to_fixed("1"), Some(100_000_000));
        assert_eq!(to_fixed("0.5"), Some(50_000_000));
        assert_eq!(to_fixed("50000.12345678"), Some(5_000_012_345_678));
    }

    #[test]
    fn test_to_fixed_edge_cases() {
        assert_eq!(to_fixed("0"), Some(0));
        assert_eq!(to_fixed("-1.0"), None);
        assert_eq!(to_fixed("abc"), None);
        assert_eq!(to_fixed(""), None);
    }

    #[test]
    fn test_from_fixed() {
        assert_eq!(from_fixed(100_000_000), "1.00000000");
        assert_eq!(from_fixed(1), "0.00000001");
        assert_eq!(from_fixed(0), "0.00000000");
    }

    #[test]
    fn test_from_fixed_trimmed() {
        assert_eq!(from_fixed_trimmed(123_456_789), "1.23456789");
        assert_eq!(from_fixed_trimmed(5_000_000_000_000), "50000");
    }

    #[test]
    fn test_precision() {
        let value = "123456789.12345678";
        let fixed = to_fixed(value).unwrap();
        assert_eq!(from_fixed(fixed), value);
    }

    #[test]
    fn test_average_price_single_level() {
        assert_eq!(average_price(100 * 4, 4), Some(100));
    }

    #[test]
    fn test_average_price_rounds_half_up() {
        // 1 @ 10 and 1 @ 11 -> 10.5 -> 11
        assert_eq!(average_price(21, 2), Some(11));
        // 2 @ 10 and 1 @ 11 -> 10.33 -> 10
        assert_eq!(average_price(31, 3), Some(10));
    }

    #[test]
    fn test_average_price_large_values() {
        let price = 5_000_000_000_000u64;
        let qty = 1_000_000_000u64;
        let notional = price as u128 * qty as u128;
        assert_eq!(average_price(notional, qty), Some(price));
    }
}
