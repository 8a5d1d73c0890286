//! Injected Wallet Integration via wasm-bindgen
//!
//! JavaScript interop for an EIP-1193 provider exposed as `window.ethereum`
//! (MetaMask and compatible extensions). Every request goes through
//! `ethereum.request({ method, params })`.

use alloy_primitives::{Address, U256};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::contract::CallRequest;
use shared::dto::TransactionReceipt;
use shared::error::{AppError, ProviderError, Result};
use shared::utils::parse_quantity;
use wasm_bindgen::prelude::*;

// ============================================================================
// PROVIDER BINDINGS (JavaScript Interop)
// ============================================================================

#[wasm_bindgen(inline_js = "
export function hasInjectedProvider() {
    return typeof window !== 'undefined'
        && typeof window.ethereum !== 'undefined'
        && window.ethereum !== null;
}

export async function providerRequest(method, params) {
    if (!window.ethereum) {
        throw { code: 4900, message: 'No injected wallet provider' };
    }
    return await window.ethereum.request({ method: method, params: params });
}

export function onAccountsChanged(callback) {
    if (window.ethereum && typeof window.ethereum.on === 'function') {
        window.ethereum.on('accountsChanged', callback);
    }
}

export async function copyToClipboard(text) {
    await navigator.clipboard.writeText(text);
}
")]
extern "C" {
    /// Whether `window.ethereum` exists
    pub fn hasInjectedProvider() -> bool;

    /// Raw EIP-1193 request
    #[wasm_bindgen(catch)]
    pub async fn providerRequest(method: &str, params: JsValue) -> std::result::Result<JsValue, JsValue>;

    /// Subscribe to the provider's `accountsChanged` event
    pub fn onAccountsChanged(callback: &Closure<dyn FnMut(JsValue)>);

    #[wasm_bindgen(catch)]
    pub async fn copyToClipboard(text: &str) -> std::result::Result<JsValue, JsValue>;
}

// ============================================================================
// WALLET SERVICE
// ============================================================================

/// Extract `{ code, message }` from whatever the provider threw.
pub fn provider_error(err: JsValue) -> ProviderError {
    if let Some(message) = err.as_string() {
        return ProviderError::new(None, Some(message));
    }

    let code = js_sys::Reflect::get(&err, &JsValue::from_str("code"))
        .ok()
        .and_then(|v| v.as_f64())
        .map(|c| c as i64);
    let message = js_sys::Reflect::get(&err, &JsValue::from_str("message"))
        .ok()
        .and_then(|v| v.as_string());

    if code.is_none() && message.is_none() {
        return ProviderError::new(None, Some(format!("{:?}", err)));
    }
    ProviderError::new(code, message)
}

/// Empty JSON-RPC params array.
const NO_PARAMS: [u8; 0] = [];

fn decode<T: DeserializeOwned>(method: &str, value: JsValue) -> Result<T> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| AppError::Decoding(format!("{} response: {}", method, e)))
}

/// Send one JSON-RPC request through the provider.
pub async fn request<P: Serialize + ?Sized>(method: &str, params: &P) -> Result<JsValue> {
    if !hasInjectedProvider() {
        return Err(AppError::NoProvider);
    }

    let params = params
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| AppError::Decoding(format!("{} params: {}", method, e)))?;

    log::debug!("provider request: {}", method);
    providerRequest(method, params).await.map_err(|e| {
        let err = provider_error(e);
        log::warn!("{} failed: {}", method, err);
        AppError::Provider(err)
    })
}

/// Ask the wallet for account access; resolves to the authorized accounts.
pub async fn request_accounts() -> Result<Vec<Address>> {
    let accounts = request("eth_requestAccounts", &NO_PARAMS).await?;
    decode("eth_requestAccounts", accounts)
}

/// Drop the dApp's account permission. Providers without the method reject it, which
/// callers treat the same as success.
pub async fn revoke_permissions() -> Result<()> {
    let params = serde_json::json!([{ "eth_accounts": {} }]);
    request("wallet_revokePermissions", &params).await.map(|_| ())
}

/// Native balance of `address` at the latest block, in the smallest unit.
pub async fn get_balance(address: Address) -> Result<U256> {
    let params = (address, "latest");
    let quantity: String = decode("eth_getBalance", request("eth_getBalance", &params).await?)?;
    parse_quantity(&quantity)
}

/// `eth_call` against the latest block; returns the raw `0x` result.
pub async fn call(call: &CallRequest) -> Result<String> {
    let params = (call, "latest");
    decode("eth_call", request("eth_call", &params).await?)
}

/// `eth_sendTransaction`; the wallet prompts the user to sign. Returns the tx hash.
pub async fn send_transaction(call: &CallRequest) -> Result<String> {
    let params = [call];
    decode("eth_sendTransaction", request("eth_sendTransaction", &params).await?)
}

/// Receipt of a transaction, or `None` while it is still pending.
pub async fn transaction_receipt(hash: &str) -> Result<Option<TransactionReceipt>> {
    let params = [hash];
    let value = request("eth_getTransactionReceipt", &params).await?;
    if value.is_null() || value.is_undefined() {
        return Ok(None);
    }
    decode("eth_getTransactionReceipt", value).map(Some)
}

/// Forward provider account changes to `on_change` for the lifetime of the page.
pub fn watch_accounts(mut on_change: impl FnMut(Vec<Address>) + 'static) {
    if !hasInjectedProvider() {
        return;
    }

    let callback = Closure::<dyn FnMut(JsValue)>::new(move |accounts: JsValue| {
        match serde_wasm_bindgen::from_value::<Vec<Address>>(accounts) {
            Ok(accounts) => on_change(accounts),
            Err(e) => log::error!("accountsChanged payload not understood: {}", e),
        }
    });
    onAccountsChanged(&callback);
    // the listener lives as long as the page
    callback.forget();
}

pub async fn copy_text(text: &str) -> Result<()> {
    copyToClipboard(text)
        .await
        .map(|_| ())
        .map_err(|e| AppError::Provider(provider_error(e)))
}
