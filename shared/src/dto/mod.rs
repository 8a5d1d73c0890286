//! # Data Transfer Objects (DTOs)
//!
//! Transient, UI-local state shared between the wallet context and the components.
//! Nothing here is persisted.
//!
//! ## Module Organization
//!
//! - [`session`] - Wallet session state machine and balance
//! - [`form`] - Storage section form state and numeric coercion
//! - [`transaction`] - Write lifecycle and JSON-RPC receipts
//! - [`notification`] - Toast queue

pub mod form;
pub mod notification;
pub mod session;
pub mod transaction;

pub use form::*;
pub use notification::*;
pub use session::*;
pub use transaction::*;
