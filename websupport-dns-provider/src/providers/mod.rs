//! DNS Provider implementations

/// Shared utilities used by provider implementations.
pub mod common;

mod websupport;

pub use websupport::{WebsupportProvider, WebsupportProviderBuilder};
