pub mod service;

pub use chalkportal_models::syllabus::{CreateSyllabusDto, Syllabus};
pub use service::SyllabusService;
