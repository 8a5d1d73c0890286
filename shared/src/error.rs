//! # Centralized Error Handling
//!
//! This module defines the error type [`AppError`] shared by the session state machine,
//! the contract gateway and the browser front-end. It follows the `thiserror` pattern.
//!
//! ## Error Categories
//!
//! 1. **Permanent** - the environment cannot be used
//!    - [`NoProvider`](AppError::NoProvider) → user must install a wallet extension
//!
//! 2. **Recoverable** - the user may retry
//!    - [`Provider`](AppError::Provider) → rejection or provider failure
//!    - [`Busy`](AppError::Busy) → a request is already in flight
//!    - [`InvalidInput`](AppError::InvalidInput) → form value cannot be submitted
//!    - [`Reverted`](AppError::Reverted) → transaction mined but reverted
//!
//! 3. **Internal** - logged, surfaced generically
//!    - [`InvalidTransition`](AppError::InvalidTransition), [`Decoding`](AppError::Decoding),
//!      [`Config`](AppError::Config)
//!
//! ## Notification Text
//!
//! Every variant maps to a short, human-readable message via [`AppError::short_message`];
//! this is the text shown verbatim in toasts.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

/// EIP-1193 error code: the user rejected the request.
pub const USER_REJECTED_CODE: i64 = 4001;
/// EIP-1193 error code: the requested method or account is not authorized.
pub const UNAUTHORIZED_CODE: i64 = 4100;
/// MetaMask error code: a request of the same type is already pending.
pub const REQUEST_PENDING_CODE: i64 = -32002;

/// Error object returned by an injected wallet provider.
///
/// Providers reject with `{ code, message }`. Both fields are optional because some
/// providers throw plain strings or `Error` objects without a code.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProviderError {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ProviderError {
    pub fn new(code: Option<i64>, message: Option<String>) -> Self {
        Self { code, message }
    }

    /// Short message for notifications. Well-known codes get a fixed phrase, everything
    /// else uses the first line of the provider's own message.
    pub fn short_message(&self) -> Option<String> {
        match self.code {
            Some(USER_REJECTED_CODE) => return Some("User rejected the request.".to_string()),
            Some(UNAUTHORIZED_CODE) => {
                return Some("The requested account has not been authorized.".to_string())
            }
            Some(REQUEST_PENDING_CODE) => {
                return Some("A request is already pending in your wallet.".to_string())
            }
            _ => {}
        }

        self.message
            .as_deref()
            .and_then(|msg| msg.lines().next())
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.code, self.message.as_deref()) {
            (Some(code), Some(msg)) => write!(f, "{} (code {})", msg, code),
            (Some(code), None) => write!(f, "provider error code {}", code),
            (None, Some(msg)) => f.write_str(msg),
            (None, None) => f.write_str("unknown provider error"),
        }
    }
}

/// Error type covering every failure the dApp can observe.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AppError {
    /// No injected wallet provider exists in this browser.
    #[error("No wallet provider found")]
    NoProvider,

    /// The provider rejected or failed a request.
    #[error("Provider error: {0}")]
    Provider(ProviderError),

    /// A session operation was attempted from a state that does not allow it.
    #[error("Invalid session transition: {0}")]
    InvalidTransition(String),

    /// The triggering operation is already in flight.
    #[error("Operation already in progress: {0}")]
    Busy(String),

    /// The wallet is not connected.
    #[error("Wallet not connected")]
    NotConnected,

    /// Form input cannot be converted into a contract argument.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A provider response could not be decoded.
    #[error("Decoding error: {0}")]
    Decoding(String),

    /// The transaction was mined but reverted.
    #[error("Transaction reverted: {0}")]
    Reverted(String),

    /// Build-time configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// User-facing text for notifications.
    ///
    /// Provider errors keep the provider's short message; internal errors get a generic
    /// sentence so decoding details never reach the page.
    pub fn short_message(&self) -> String {
        match self {
            AppError::NoProvider => "Install MetaMask".to_string(),
            AppError::Provider(err) => err
                .short_message()
                .unwrap_or_else(|| "Wallet request failed".to_string()),
            AppError::Busy(_) => "Please wait for the pending request to finish".to_string(),
            AppError::NotConnected => "Connect your wallet first".to_string(),
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::Reverted(hash) => format!("Transaction {} reverted", hash),
            AppError::InvalidTransition(_) | AppError::Decoding(_) | AppError::Config(_) => {
                "Something went wrong, check the console for details".to_string()
            }
        }
    }

    /// Whether the user explicitly declined the request in their wallet.
    pub fn is_user_rejection(&self) -> bool {
        matches!(
            self,
            AppError::Provider(ProviderError { code: Some(USER_REJECTED_CODE), .. })
        )
    }
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        AppError::Provider(err)
    }
}

/// Convert `serde_json::Error` to `AppError`.
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Decoding(format!("JSON error: {}", err))
    }
}
