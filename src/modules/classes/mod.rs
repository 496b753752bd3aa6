pub mod service;

pub use chalkportal_models::classes::{Class, CreateClassDto};
pub use service::ClassService;
