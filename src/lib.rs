//! # Chalkportal
//!
//! Client-side data layer for the school portal's student and teacher views.
//!
//! ## Overview
//!
//! Chalkportal fetches JSON from the portal's REST backend, caches named
//! resource collections, and keeps a shared `loading` flag and `error`
//! message that any number of views can subscribe to:
//!
//! - **Store**: one [`ResourceStore`](chalkportal_cache::ResourceStore) per
//!   portal, cloned into every view
//! - **Backends**: the REST API, or JSON files on disk for offline test authoring
//! - **Session**: an injected [`SessionContext`](chalkportal_auth::SessionContext)
//!   supplying the bearer token; a rejected token clears it and reports the
//!   role's login route
//! - **Services**: typed, validated operations per resource
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── modules/          # Feature modules
//! │   ├── classes/      # Classes (course sections)
//! │   ├── students/     # Students per class
//! │   ├── schedules/    # Timetables
//! │   ├── attendance/   # Attendance reads, bulk save, corrections
//! │   ├── notifications/
//! │   ├── syllabus/
//! │   ├── assessments/  # Tests and questions
//! │   └── submissions/  # Test submissions and grading
//! ├── state.rs          # Store and session wiring
//! └── validator.rs      # DTO validation
//! ```
//!
//! Each feature module has:
//!
//! - `mod.rs`: Model and DTO re-exports
//! - `service.rs`: Validated store operations
//!
//! ## Store Contract
//!
//! | Operation | On success | On failure |
//! |-----------|------------|------------|
//! | fetch | Replaces the cached collection | Sets `error`, keeps the collection |
//! | create | Appends unless the id is already cached | Sets `error` |
//! | update | Patches the cached entity in place | Sets `error` |
//! | delete | Removes the cached entity | Sets `error` |
//! | action | Leaves collections alone | Sets `error` |
//!
//! `loading` is true while any operation is in flight. A fetch answer that
//! settles after a newer request on the same resource is discarded.
//!
//! ## Quick Start
//!
//! ### Environment Variables
//!
//! ```bash
//! API_BASE_URL=http://localhost:3000
//! API_TIMEOUT_SECONDS=30
//! LOCAL_STORAGE_DIR=storage/local
//! STUDENT_LOGIN_ROUTE=/student/login
//! TEACHER_LOGIN_ROUTE=/teacher/login
//! ```
//!
//! ### Example
//!
//! ```ignore
//! use chalkportal::modules::ClassService;
//! use chalkportal::state::init_portal_state;
//! use chalkportal_auth::{Session, SessionContext};
//!
//! let session = SessionContext::with_session(Session::from_token(token)?);
//! let state = init_portal_state(session)?;
//! state.store.on_auth_expired(|route| println!("Please log in again at {route}"));
//!
//! let classes = ClassService::fetch_classes(&state.store).await?;
//! ```
//!
//! ## Modules
//!
//! - [`modules`]: Feature modules (classes, attendance, tests, etc.)
//! - [`state`]: Shared portal state
//! - [`validator`]: DTO validation utilities

pub mod modules;
pub mod state;
pub mod validator;

// Re-export workspace crates for convenience
pub use chalkportal_auth;
pub use chalkportal_cache;
pub use chalkportal_config;
pub use chalkportal_core;
pub use chalkportal_models;
pub use chalkportal_observability;
