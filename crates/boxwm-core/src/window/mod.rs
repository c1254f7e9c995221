//! Managed client windows.

mod types;

pub use types::*;
