//! # Formatting Utilities for the Storage Page
//!
//! Page-specific display helpers. For addresses and balances, use
//! [`shared::utils::truncate_address`] and [`shared::utils::display_balance`].

use alloy_primitives::U256;

/// Placeholder shown until `retrieve()` has resolved once.
pub const LOADING_LABEL: &str = "Loading...";

/// Stored number text: the value itself, or [`LOADING_LABEL`] while unresolved.
///
/// ```rust
/// use alloy_primitives::U256;
/// use storage_web::utils::format::stored_number_label;
///
/// assert_eq!(stored_number_label(Some(U256::from(42u64))), "42");
/// assert_eq!(stored_number_label(None), "Loading...");
/// ```
pub fn stored_number_label(value: Option<U256>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => LOADING_LABEL.to_string(),
    }
}

/// Shorten a 32-byte transaction hash to `0x1234...abcd` form.
pub fn short_hash(hash: &str) -> String {
    shared::utils::format_address(hash, 6, 4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_number_label() {
        assert_eq!(stored_number_label(Some(U256::from(42u64))), "42");
        assert_eq!(stored_number_label(Some(U256::ZERO)), "0");
        assert_eq!(stored_number_label(None), LOADING_LABEL);
    }

    #[test]
    fn test_short_hash() {
        let hash = "0x5c504ed432cb51138bcf09aa5e8a410dd4a1e204ef84bfed1be16dfba1b22060";
        assert_eq!(short_hash(hash), "0x5c50...2060");
    }
}
