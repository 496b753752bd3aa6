pub mod service;

pub use chalkportal_models::attendance::{
    AttendanceEntry, AttendanceRecord, AttendanceSaveResult, AttendanceStatus, SAVE_ACTION,
    SaveAttendanceDto, UpdateAttendanceDto,
};
pub use service::AttendanceService;
