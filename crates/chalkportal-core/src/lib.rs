//! # Chalkportal Core
//!
//! Core types, errors, and utilities for the Chalkportal client.
//!
//! This crate provides foundational types shared by every other crate in the workspace:
//!
//! - [`errors`]: The store error taxonomy and backend error message extraction
//! - [`params`]: Fetch parameters (parent scope, date range, extra filters)
//! - [`serde`]: Custom serde deserialization helpers for backend-owned fields
//!
//! # Example
//!
//! ```ignore
//! use chalkportal_core::errors::StoreError;
//! use chalkportal_core::params::FetchParams;
//!
//! // Scope a fetch to one class and a week of attendance
//! let params = FetchParams::scoped("c1").with_range(from, to);
//!
//! // Surface a client-side validation failure
//! let error = StoreError::validation("className is required");
//! assert_eq!(error.message(), "className is required");
//! ```

pub mod errors;
pub mod params;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::{StoreError, StoreResult, extract_error_message};
pub use params::FetchParams;
