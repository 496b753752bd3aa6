//! # Chalkportal Auth
//!
//! Session context and token claim decoding for the Chalkportal client.
//!
//! This crate provides:
//!
//! - [`claims`]: Claim structure mirrored from the backend's access tokens, decoded
//!   without signature verification (the backend remains the verifier)
//! - [`session`]: The injected "current session" handle that store backends read
//!   the bearer token from, and that is cleared when the backend rejects it
//!
//! # Example
//!
//! ```ignore
//! use chalkportal_auth::{Role, Session, SessionContext};
//! use chalkportal_config::LoginRoutes;
//!
//! let context = SessionContext::new();
//! context.set(Session::from_token(&token)?);
//!
//! // Later, when the backend answers 401
//! let route = context.login_route(&LoginRoutes::from_env());
//! context.clear();
//! ```

pub mod claims;
pub mod session;

// Re-export commonly used types at crate root
pub use claims::{AuthError, Claims, decode_claims};
pub use session::{Role, Session, SessionContext};
