//! DNS API implementations

/// Shared utilities used by API implementations.
pub mod common;

mod nicru;

pub use nicru::{NICRU_API_BASE, NicruClient, NicruClientBuilder};
