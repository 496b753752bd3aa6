pub mod service;

pub use chalkportal_models::submissions::{CreateSubmissionDto, GradeSubmissionDto, Submission};
pub use service::SubmissionService;
