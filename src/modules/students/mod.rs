pub mod service;

pub use chalkportal_models::students::{CreateStudentDto, Student};
pub use service::StudentService;
