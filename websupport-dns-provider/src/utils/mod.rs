//! Utility modules.

/// Serde helpers for TTL durations expressed in whole seconds.
pub mod duration_secs;

/// Log sanitization utilities to prevent sensitive data exposure.
pub mod log_sanitizer;
