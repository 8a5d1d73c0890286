//! Provider and contract services

pub mod contract;
pub mod wallet;
