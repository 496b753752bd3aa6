//! # Chalkportal Models
//!
//! Entity contract, domain models and DTOs for the Chalkportal client.
//!
//! The store only relies on [`Entity`] (an optional identifier) and, for typed
//! convenience, [`Resource`] (a well-known backend collection name). Field
//! shapes are owned by the backend and mirrored here in camelCase.
//!
//! # Modules
//!
//! - [`entity`]: The `Entity`/`Resource` traits and the dynamic [`Record`]
//! - [`classes`]: Classes (course sections)
//! - [`students`]: Students, read per class
//! - [`schedules`]: Timetable entries
//! - [`attendance`]: Attendance records, bulk save and corrections
//! - [`notifications`]: Notices addressed to students and teachers
//! - [`syllabus`]: Syllabus entries per class
//! - [`assessments`]: Tests and their questions
//! - [`submissions`]: Student submissions and grading
//!
//! # Example
//!
//! ```ignore
//! use chalkportal_models::{Class, CreateClassDto, Resource};
//! use validator::Validate;
//!
//! let dto = CreateClassDto { class_name: "Math".into(), description: None };
//! dto.validate()?;
//! assert_eq!(Class::KEY, "classes");
//! ```

pub mod assessments;
pub mod attendance;
pub mod classes;
pub mod entity;
pub mod notifications;
pub mod schedules;
pub mod students;
pub mod submissions;
pub mod syllabus;

// Re-export commonly used types at crate root for convenience
pub use entity::{Entity, ID_FIELDS, Record, Resource};

pub use assessments::{Assessment, CreateAssessmentDto, Question};
pub use attendance::{
    AttendanceEntry, AttendanceRecord, AttendanceSaveResult, AttendanceStatus, SAVE_ACTION,
    SaveAttendanceDto, UpdateAttendanceDto,
};
pub use classes::{Class, CreateClassDto};
pub use notifications::{Audience, CreateNotificationDto, Notification};
pub use schedules::{CreateScheduleDto, Schedule};
pub use students::{CreateStudentDto, Student};
pub use submissions::{CreateSubmissionDto, GradeSubmissionDto, Submission};
pub use syllabus::{CreateSyllabusDto, Syllabus};
