//! # SimpleStorage Contract Interface
//!
//! ABI bindings for the three functions the dApp uses, generated with `alloy-sol-types`,
//! plus the JSON-RPC request shape used to send them through an injected provider.
//!
//! | Function                          | Kind  |
//! |-----------------------------------|-------|
//! | `retrieve() returns (uint256)`    | read  |
//! | `store(uint256)`                  | write |
//! | `addPerson(string, uint256)`      | write |

use alloy_primitives::{hex, Address, U256};
use alloy_sol_types::{sol, SolCall};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

sol! {
    interface ISimpleStorage {
        function retrieve() external view returns (uint256);
        function store(uint256 favoriteNumber) external;
        function addPerson(string name, uint256 favoriteNumber) external;
    }
}

/// A typed call against the SimpleStorage contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractCall {
    Retrieve,
    Store { value: U256 },
    AddPerson { name: String, value: U256 },
}

impl ContractCall {
    pub fn function_name(&self) -> &'static str {
        match self {
            ContractCall::Retrieve => "retrieve",
            ContractCall::Store { .. } => "store",
            ContractCall::AddPerson { .. } => "addPerson",
        }
    }

    /// Whether the call mutates state and must be sent as a signed transaction.
    pub fn is_write(&self) -> bool {
        !matches!(self, ContractCall::Retrieve)
    }

    /// ABI-encoded calldata (selector followed by arguments).
    pub fn calldata(&self) -> Vec<u8> {
        match self {
            ContractCall::Retrieve => ISimpleStorage::retrieveCall {}.abi_encode(),
            ContractCall::Store { value } => ISimpleStorage::storeCall {
                favoriteNumber: *value,
            }
            .abi_encode(),
            ContractCall::AddPerson { name, value } => ISimpleStorage::addPersonCall {
                name: name.clone(),
                favoriteNumber: *value,
            }
            .abi_encode(),
        }
    }

    /// Transaction object for `eth_call` / `eth_sendTransaction`.
    pub fn to_request(&self, contract: Address, from: Option<Address>) -> CallRequest {
        CallRequest {
            from,
            to: contract,
            data: hex::encode_prefixed(self.calldata()),
        }
    }
}

/// Transaction object accepted by `eth_call` and `eth_sendTransaction`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    pub to: Address,
    pub data: String,
}

/// Decode the `0x` hex result of `retrieve()`.
pub fn decode_retrieve(result: &str) -> Result<U256> {
    let bytes = hex::decode(result)
        .map_err(|e| AppError::Decoding(format!("retrieve() result is not hex: {}", e)))?;

    // an empty result means there is no contract code at the address
    if bytes.len() < 32 {
        return Err(AppError::Decoding(format!(
            "retrieve() returned {} bytes, expected 32",
            bytes.len()
        )));
    }

    Ok(U256::from_be_slice(&bytes[..32]))
}
