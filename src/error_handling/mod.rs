//! Error handling.
//!
//! This module provides:
//! - Error type definitions (initialization, fetch and describe failures)
//! - The transport failure taxonomy
//! - Conversion from `reqwest` errors
//!
//! Fetch failures are terminal for a request. Extraction never fails; the only
//! non-fetch failure is an internal fault around it.

mod categorization;
mod types;

// Re-export public API
pub use categorization::fetch_error_from_reqwest;
pub use types::{DescribeError, FailureKind, FetchError, InitializationError};
