//! Form state for the storage section and its conversion into contract calls.

use alloy_primitives::U256;

use crate::contract::ContractCall;
use crate::error::{AppError, Result};

/// Raw text of the three inputs in the storage section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub favorite_number: String,
    pub person_name: String,
    pub person_number: String,
}

impl FormState {
    pub fn store_call(&self) -> Result<ContractCall> {
        Ok(ContractCall::Store {
            value: parse_uint_input(&self.favorite_number)?,
        })
    }

    /// The name is passed through untouched; only the number is checked.
    pub fn add_person_call(&self) -> Result<ContractCall> {
        Ok(ContractCall::AddPerson {
            name: self.person_name.clone(),
            value: parse_uint_input(&self.person_number)?,
        })
    }
}

/// Coerce numeric input text into a `uint256` argument.
///
/// Empty input is zero. A fractional part is accepted only when it is all zeros
/// (`"5.0"`), since the browser's number input may produce it. Negative, fractional,
/// exponent and overflowing values are rejected.
pub fn parse_uint_input(raw: &str) -> Result<U256> {
    let trimmed = raw.trim();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);

    if unsigned.is_empty() {
        return Ok(U256::ZERO);
    }
    if unsigned.starts_with('-') {
        return Err(AppError::InvalidInput("Number must not be negative".to_string()));
    }

    let whole = match unsigned.split_once('.') {
        Some((whole, fraction)) => {
            if !fraction.chars().all(|c| c == '0') {
                return Err(AppError::InvalidInput("Number must be a whole number".to_string()));
            }
            if whole.is_empty() {
                "0"
            } else {
                whole
            }
        }
        None => unsigned,
    };

    if !whole.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::InvalidInput(format!("\"{}\" is not a number", trimmed)));
    }

    U256::from_str_radix(whole, 10)
        .map_err(|_| AppError::InvalidInput("Number is too large".to_string()))
}
