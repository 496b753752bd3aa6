//! # Chalkportal Config
//!
//! Configuration types for the Chalkportal client.
//!
//! This crate provides configuration structures loaded from environment variables:
//!
//! - [`api`]: REST backend location and optional request timeout
//! - [`storage`]: Directory used by the local (file-backed) store backend
//! - [`login`]: Role-specific login routes reported when a session expires
//!
//! Every `from_env` constructor delegates to a `from_lookup` constructor taking
//! a key lookup function, so configurations can be built from any source.
//!
//! # Example
//!
//! ```ignore
//! use chalkportal_config::{ApiConfig, LoginRoutes, StorageConfig};
//!
//! // Load all configs from environment
//! let api_config = ApiConfig::from_env();
//! let storage_config = StorageConfig::from_env();
//! let login_routes = LoginRoutes::from_env();
//! ```

pub mod api;
pub mod login;
pub mod storage;

// Re-export commonly used types at crate root
pub use api::ApiConfig;
pub use login::LoginRoutes;
pub use storage::StorageConfig;
