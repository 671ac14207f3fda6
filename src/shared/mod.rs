/// Shared kernel - error taxonomy, result alias and retry support
pub mod error;
pub mod result;
pub mod retry;

pub use result::Result;
