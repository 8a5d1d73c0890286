//! Application state shared through Leptos context

pub mod contract;
pub mod notifications;
pub mod wallet;
