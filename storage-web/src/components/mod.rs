//! UI Components

pub mod header;
pub mod storage_section;
pub mod toaster;

pub use header::Header;
pub use storage_section::StorageSection;
pub use toaster::Toaster;
