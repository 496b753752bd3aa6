//! Tests (assessments) authored by teachers.
//!
//! Stored under the `tests` resource key. Run against a
//! [`LocalBackend`](chalkportal_cache::LocalBackend) to author tests offline.

pub mod service;

pub use chalkportal_models::assessments::{Assessment, CreateAssessmentDto, Question};
pub use service::AssessmentService;
