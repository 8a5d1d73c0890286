//! # Shared dApp Core
//!
//! Platform-independent pieces of the SimpleStorage dApp. Everything here compiles for
//! both the browser (`wasm32-unknown-unknown`) and the host, so it is unit-tested
//! natively.
//!
//! ## Structure
//!
//! - **[`dto`]**: Session, form, transaction and notification state
//! - **[`contract`]**: SimpleStorage ABI bindings and call encoding
//! - **[`error`]**: [`AppError`](error::AppError) and the `Result` alias
//! - **[`utils`]**: Address and amount formatting
//!
//! ## Usage in the Frontend
//!
//! ```rust
//! use shared::dto::FormState;
//! use shared::utils::display_balance;
//!
//! let form = FormState {
//!     favorite_number: "7".to_string(),
//!     ..Default::default()
//! };
//! let call = form.store_call().unwrap();
//! assert_eq!(call.function_name(), "store");
//! assert_eq!(display_balance(None), "0.000000");
//! ```

pub mod contract;
pub mod dto;
pub mod error;
pub mod utils;

pub use dto::*;
pub use error::{AppError, Result};
pub use utils::*;
