//! SimpleStorage calls over the injected provider

use alloy_primitives::{Address, U256};
use gloo_timers::future::TimeoutFuture;
use shared::contract::{decode_retrieve, ContractCall};
use shared::dto::TransactionReceipt;
use shared::error::Result;

use crate::services::wallet;

/// Current value of `retrieve()`.
pub async fn read_stored_number(contract: Address) -> Result<U256> {
    let request = ContractCall::Retrieve.to_request(contract, None);
    let raw = wallet::call(&request).await?;
    decode_retrieve(&raw)
}

/// Ask the wallet to sign and broadcast a write. Resolves to the transaction hash as soon
/// as the wallet accepts it, before mining.
pub async fn send(contract: Address, from: Address, call: &ContractCall) -> Result<String> {
    debug_assert!(call.is_write());
    let request = call.to_request(contract, Some(from));
    wallet::send_transaction(&request).await
}

/// Poll for the receipt of `hash` until the node reports it mined.
pub async fn wait_for_receipt(hash: &str, poll_interval_ms: u32) -> Result<TransactionReceipt> {
    loop {
        if let Some(receipt) = wallet::transaction_receipt(hash).await? {
            return Ok(receipt);
        }
        TimeoutFuture::new(poll_interval_ms).await;
    }
}
