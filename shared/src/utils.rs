//! # Shared Utility Functions
//!
//! Display helpers used by the header and the storage section.
//!
//! ## Address Formatting
//!
//! - [`format_address`] - Format address with ellipsis (first N and last M characters)
//! - [`truncate_address`] - `0x` address with the default 6/4 split
//!
//! ## Amount Formatting
//!
//! - [`format_units_truncated`] - Fixed-point integer to decimal string, truncated
//! - [`display_balance`] - Header balance text, `0.000000` when unresolved
//! - [`parse_quantity`] - JSON-RPC hex quantity to `U256`
//!
//! ## Usage
//!
//! ```rust
//! use shared::utils::format_address;
//!
//! let address = "0x5FbDB2315678afecb367f032d93F642f64180aa3";
//! assert_eq!(format_address(address, 6, 4), "0x5FbD...0aa3");
//! ```

use alloy_primitives::U256;

use crate::dto::session::Balance;
use crate::error::{AppError, Result};

/// Fractional digits shown for the native balance.
pub const BALANCE_DISPLAY_PRECISION: usize = 6;

/// Format a wallet address by showing the first `prefix_len` and last `suffix_len` characters.
///
/// If the address is shorter than `prefix_len + suffix_len`, it is returned as-is.
///
/// # Examples
///
/// ```rust
/// use shared::utils::format_address;
///
/// let addr = "0x5FbDB2315678afecb367f032d93F642f64180aa3";
/// assert_eq!(format_address(addr, 6, 4), "0x5FbD...0aa3");
/// assert_eq!(format_address("short", 4, 4), "short");
/// ```
pub fn format_address(address: &str, prefix_len: usize, suffix_len: usize) -> String {
    let address_len = address.len();

    if address_len <= prefix_len + suffix_len || !address.is_ascii() {
        return address.to_string();
    }

    let prefix = &address[..prefix_len];
    let suffix = &address[address_len - suffix_len..];

    format!("{}...{}", prefix, suffix)
}

/// Format a `0x` address keeping the prefix plus four hex digits on each side.
///
/// ```rust
/// use shared::utils::truncate_address;
///
/// let addr = "0x5FbDB2315678afecb367f032d93F642f64180aa3";
/// assert_eq!(truncate_address(addr), "0x5FbD...0aa3");
/// ```
pub fn truncate_address(address: &str) -> String {
    format_address(address, 6, 4)
}

/// Render a fixed-point integer `value` with `decimals` implied decimals, keeping exactly
/// `precision` fractional digits. Extra digits are truncated, never rounded.
///
/// ```rust
/// use alloy_primitives::U256;
/// use shared::utils::format_units_truncated;
///
/// let wei = U256::from(1_234_567_891_234_567_891u64);
/// assert_eq!(format_units_truncated(wei, 18, 6), "1.234567");
/// ```
pub fn format_units_truncated(value: U256, decimals: u8, precision: usize) -> String {
    let base = U256::from(10u64).pow(U256::from(decimals));
    let whole = value / base;
    let fraction = value % base;

    if precision == 0 {
        return whole.to_string();
    }

    let mut digits = String::with_capacity(precision);
    if decimals > 0 {
        let raw = fraction.to_string();
        // left-pad to the full decimal width
        for _ in raw.len()..decimals as usize {
            digits.push('0');
        }
        digits.push_str(&raw);
    }
    digits.truncate(precision);
    while digits.len() < precision {
        digits.push('0');
    }

    format!("{}.{}", whole, digits)
}

/// Balance text for the header. Unresolved and zero balances both show `0.000000`.
pub fn display_balance(balance: Option<&Balance>) -> String {
    match balance {
        Some(balance) if !balance.value.is_zero() => {
            format_units_truncated(balance.value, balance.decimals, BALANCE_DISPLAY_PRECISION)
        }
        _ => format_units_truncated(U256::ZERO, 0, BALANCE_DISPLAY_PRECISION),
    }
}

/// Parse a JSON-RPC quantity (`0x`-prefixed hex) into a `U256`.
pub fn parse_quantity(quantity: &str) -> Result<U256> {
    let digits = quantity
        .strip_prefix("0x")
        .or_else(|| quantity.strip_prefix("0X"))
        .ok_or_else(|| AppError::Decoding(format!("quantity without 0x prefix: {}", quantity)))?;

    if digits.is_empty() {
        return Err(AppError::Decoding("empty quantity".to_string()));
    }

    U256::from_str_radix(digits, 16)
        .map_err(|e| AppError::Decoding(format!("invalid quantity {}: {}", quantity, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eth(symbol: &str, wei: u128) -> Balance {
        Balance::new(U256::from(wei), 18, symbol)
    }

    #[test]
    fn test_format_address() {
        let addr = "0x5FbDB2315678afecb367f032d93F642f64180aa3";
        assert_eq!(format_address(addr, 6, 4), "0x5FbD...0aa3");
        assert_eq!(format_address(addr, 2, 2), "0x...a3");
    }

    #[test]
    fn test_format_address_short() {
        assert_eq!(format_address("short", 4, 4), "short");
        assert_eq!(format_address("abc", 4, 4), "abc");
    }

    #[test]
    fn test_format_units_truncates_instead_of_rounding() {
        let wei = U256::from(1_999_999_999_999_999_999u128);
        assert_eq!(format_units_truncated(wei, 18, 6), "1.999999");
    }

    #[test]
    fn test_format_units_small_values_are_padded() {
        assert_eq!(format_units_truncated(U256::from(1u64), 18, 6), "0.000000");
        assert_eq!(
            format_units_truncated(U256::from(5_000_000_000_000u64), 18, 6),
            "0.000005"
        );
    }

    #[test]
    fn test_format_units_fewer_decimals_than_precision() {
        assert_eq!(format_units_truncated(U256::from(1234u64), 2, 6), "12.340000");
        assert_eq!(format_units_truncated(U256::from(42u64), 0, 6), "42.000000");
        assert_eq!(format_units_truncated(U256::from(42u64), 0, 0), "42");
    }

    #[test]
    fn test_display_balance_unresolved() {
        assert_eq!(display_balance(None), "0.000000");
        assert_eq!(display_balance(Some(&eth("ETH", 0))), "0.000000");
    }

    #[test]
    fn test_display_balance_is_stable_across_renders() {
        let balance = eth("ETH", 2_500_000_000_000_000_000);
        let first = display_balance(Some(&balance));
        let second = display_balance(Some(&balance));
        assert_eq!(first, "2.500000");
        assert_eq!(first, second);
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("0x0").unwrap(), U256::ZERO);
        assert_eq!(parse_quantity("0x2a").unwrap(), U256::from(42u64));
        assert_eq!(
            parse_quantity("0xde0b6b3a7640000").unwrap(),
            U256::from(1_000_000_000_000_000_000u128)
        );
    }

    #[test]
    fn test_parse_quantity_rejects_garbage() {
        assert!(parse_quantity("2a").is_err());
        assert!(parse_quantity("0x").is_err());
        assert!(parse_quantity("0xzz").is_err());
    }
}
