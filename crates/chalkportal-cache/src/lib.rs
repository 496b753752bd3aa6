//! # Chalkportal Cache
//!
//! Client-side resource caching for the Chalkportal client.
//!
//! This crate provides:
//! - [`ResourceStore`]: cached collections per resource key with a shared
//!   loading flag, error message and change broadcast
//! - [`ResourceBackend`]: the persistence seam the store runs against
//! - [`HttpBackend`]: the portal's REST API over reqwest
//! - [`LocalBackend`]: JSON collection files on local disk
//! - [`ResourceKey`]: collection names
//!
//! # Example
//!
//! ```ignore
//! use chalkportal_auth::SessionContext;
//! use chalkportal_cache::{HttpBackend, ResourceKey, ResourceStore};
//! use chalkportal_config::{ApiConfig, LoginRoutes};
//! use chalkportal_core::FetchParams;
//! use chalkportal_models::Class;
//!
//! let session = SessionContext::new();
//! let backend = HttpBackend::new(ApiConfig::from_env(), session.clone(), LoginRoutes::from_env())?;
//! let store = ResourceStore::new(backend, session);
//!
//! let classes: Vec<Class> = store
//!     .fetch_all(&ResourceKey::of::<Class>(), &FetchParams::default())
//!     .await?;
//! ```

pub mod backend;
pub mod http;
pub mod keys;
pub mod local;
pub mod store;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use backend::ResourceBackend;
pub use http::HttpBackend;
pub use keys::ResourceKey;
pub use local::LocalBackend;
pub use store::{AuthExpiredHook, ResourceStore, StorePhase, StoreStatus};
