pub mod service;

pub use chalkportal_models::schedules::{CreateScheduleDto, Schedule};
pub use service::ScheduleService;
